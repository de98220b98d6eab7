//! Ebook and chapter models
//!
//! Chapters are owned by their ebook and have no independent lifecycle.
//! Chapter `order` is dense and zero-based; it is re-derived from array
//! position by the ebook store after every structural change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Entity;

/// Publication state of an ebook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EbookStatus {
    Draft,
    Published,
}

impl fmt::Display for EbookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EbookStatus::Draft => write!(f, "draft"),
            EbookStatus::Published => write!(f, "published"),
        }
    }
}

/// Unrecognized ebook status name
#[derive(Debug, Error)]
#[error("unknown status '{0}' (expected draft or published)")]
pub struct ParseEbookStatusError(String);

impl FromStr for EbookStatus {
    type Err = ParseEbookStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(EbookStatus::Draft),
            "published" => Ok(EbookStatus::Published),
            _ => Err(ParseEbookStatusError(s.to_string())),
        }
    }
}

/// Output format for an ebook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EbookFormat {
    Pdf,
    Epub,
    Mobi,
}

impl fmt::Display for EbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EbookFormat::Pdf => write!(f, "pdf"),
            EbookFormat::Epub => write!(f, "epub"),
            EbookFormat::Mobi => write!(f, "mobi"),
        }
    }
}

/// Unrecognized ebook format name
#[derive(Debug, Error)]
#[error("unknown ebook format '{0}' (expected pdf, epub, or mobi)")]
pub struct ParseFormatError(String);

impl FromStr for EbookFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(EbookFormat::Pdf),
            "epub" => Ok(EbookFormat::Epub),
            "mobi" => Ok(EbookFormat::Mobi),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// A chapter within an ebook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Unique identifier
    pub id: Uuid,
    /// Chapter title
    pub title: String,
    /// Chapter body content (markdown)
    pub content: String,
    /// Zero-based position within the ebook. Assigned by the store; any
    /// caller-supplied value is overwritten on insert.
    pub order: u32,
}

impl Chapter {
    /// Create a new chapter with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            order: 0,
        }
    }

    /// Update the body content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

/// Partial update for a chapter. `order` is not patchable; it belongs to
/// the ordering submodel.
#[derive(Debug, Clone, Default)]
pub struct ChapterPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ChapterPatch {
    /// Shallow-merge this patch into the chapter
    pub fn apply(self, chapter: &mut Chapter) {
        if let Some(title) = self.title {
            chapter.title = title;
        }
        if let Some(content) = self.content {
            chapter.content = content;
        }
    }
}

/// An ebook with its ordered chapters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ebook {
    /// Unique identifier
    pub id: Uuid,
    /// Book title
    pub title: String,
    /// Back-cover description
    pub description: String,
    /// Optional cover image URL
    pub cover_image: Option<String>,
    /// Chapters in reading order
    pub chapters: Vec<Chapter>,
    /// Template the book was created from
    pub template: String,
    /// When this ebook was created
    pub created_at: DateTime<Utc>,
    /// When this ebook was last updated
    pub updated_at: DateTime<Utc>,
    /// Publication state
    pub status: EbookStatus,
    /// Output format
    pub format: EbookFormat,
}

impl Ebook {
    /// Create a new draft ebook with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            cover_image: None,
            chapters: Vec::new(),
            template: "custom".to_string(),
            created_at: now,
            updated_at: now,
            status: EbookStatus::Draft,
            format: EbookFormat::Pdf,
        }
    }

    /// Update the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Update the output format
    pub fn set_format(&mut self, format: EbookFormat) {
        self.format = format;
        self.touch();
    }

    /// Find a chapter by id
    pub fn chapter(&self, chapter_id: Uuid) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }
}

impl Entity for Ebook {
    const STORE: &'static str = "ebooks";
    const COLLECTION: &'static str = "ebooks";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = self.updated_at.max(Utc::now());
    }
}

/// Partial update for an ebook. Chapters are not patchable here; chapter
/// mutations go through the ordering submodel on the ebook store.
#[derive(Debug, Clone, Default)]
pub struct EbookPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub template: Option<String>,
    pub status: Option<EbookStatus>,
    pub format: Option<EbookFormat>,
}

impl EbookPatch {
    /// Shallow-merge this patch into the ebook
    pub fn apply(self, ebook: &mut Ebook) {
        if let Some(title) = self.title {
            ebook.title = title;
        }
        if let Some(description) = self.description {
            ebook.description = description;
        }
        if let Some(cover_image) = self.cover_image {
            ebook.cover_image = cover_image;
        }
        if let Some(template) = self.template {
            ebook.template = template;
        }
        if let Some(status) = self.status {
            ebook.status = status;
        }
        if let Some(format) = self.format {
            ebook.format = format;
        }
    }
}
