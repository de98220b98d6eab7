//! Ebook and chapter command handlers
//!
//! Chapters live inside their ebook's document, so every chapter mutation
//! mirrors the whole updated ebook.

use anyhow::{Context, Result};
use uuid::Uuid;

use quill_core::{
    Chapter, ChapterPatch, Ebook, EbookFormat, EbookPatch, EbookStore, SyncAdapter,
};

use crate::commands::{mirror_delete, mirror_upsert, resolve_id};
use crate::commands::blog::prompt_with_default;
use crate::editor::{confirm, edit_with_context};
use crate::output::Output;

/// Create a new ebook
pub async fn create(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    title: String,
    description: Option<String>,
    format: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut ebook = Ebook::new(title);

    if let Some(description) = description {
        ebook.set_description(description);
    }
    if let Some(format) = format {
        let format: EbookFormat = format.parse()?;
        ebook.set_format(format);
    }

    let snapshot = ebook.clone();
    store.add_ebook(ebook).context("Failed to create ebook")?;
    mirror_upsert(adapter, &snapshot, output).await;

    output.success(&format!("Created ebook: {}", snapshot.id));
    output.print_ebook(&snapshot);

    Ok(())
}

/// List all ebooks
pub fn list(store: &EbookStore, output: &Output) -> Result<()> {
    let ebooks: Vec<&Ebook> = store.ebooks().iter().collect();
    output.print_ebooks(&ebooks);
    Ok(())
}

/// Show a single ebook with its chapters
pub fn show(store: &EbookStore, id: String, output: &Output) -> Result<()> {
    let uuid = parse_ebook_id(&id, store)?;

    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", id))?;

    output.print_ebook(ebook);
    Ok(())
}

/// Edit an ebook's metadata interactively
pub async fn edit(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_ebook_id(&id, store)?;

    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", id))?
        .clone();

    println!("Editing ebook: {}", ebook.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut patch = EbookPatch::default();

    if let Some(title) = prompt_with_default("Title", &ebook.title)? {
        patch.title = Some(title);
    }
    if let Some(description) = prompt_with_default("Description", &ebook.description)? {
        patch.description = Some(description);
    }
    if let Some(format) = prompt_with_default("Format", &ebook.format.to_string())? {
        patch.format = Some(format.parse()?);
    }
    if let Some(status) = prompt_with_default("Status", &ebook.status.to_string())? {
        patch.status = Some(status.parse()?);
    }

    let updated = store
        .update_ebook(uuid, patch)
        .context("Failed to update ebook")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success("Ebook updated");
    output.print_ebook(&updated);

    Ok(())
}

/// Delete an ebook and all of its chapters
pub async fn delete(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_ebook_id(&id, store)?;

    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", id))?;

    if output.should_prompt() {
        println!(
            "Delete ebook: {} - {} ({} chapter(s))",
            &ebook.id.to_string()[..8],
            ebook.title,
            ebook.chapters.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_ebook(uuid).context("Failed to delete ebook")?;
    mirror_delete::<Ebook>(adapter, uuid, output).await;

    output.success(&format!("Deleted ebook: {}", uuid));

    Ok(())
}

// ==================== Chapter Operations ====================

/// Add a chapter to an ebook
pub async fn add_chapter(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    ebook_id: String,
    title: String,
    content: Option<String>,
    edit: bool,
    output: &Output,
) -> Result<()> {
    let uuid = parse_ebook_id(&ebook_id, store)?;
    let ebook_title = store
        .get_ebook(uuid)
        .map(|e| e.title.clone())
        .unwrap_or_default();

    let mut chapter = Chapter::new(title);
    match content {
        Some(content) => chapter.set_content(content),
        None if edit => {
            let context = vec![
                format!("Adding chapter to: {}", ebook_title),
                format!("Chapter: {}", chapter.title),
            ];
            chapter.set_content(edit_with_context(&context, "")?);
        }
        None => {}
    }

    let chapter_id = chapter.id;
    let updated = store
        .add_chapter(uuid, chapter)
        .context("Failed to add chapter")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success(&format!(
        "Added chapter {} to ebook {}",
        &chapter_id.to_string()[..8],
        &uuid.to_string()[..8]
    ));

    Ok(())
}

/// List an ebook's chapters in order
pub fn list_chapters(store: &EbookStore, ebook_id: String, output: &Output) -> Result<()> {
    let uuid = parse_ebook_id(&ebook_id, store)?;

    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", ebook_id))?;

    output.print_ebook(ebook);
    Ok(())
}

/// Edit one chapter interactively
pub async fn edit_chapter(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    ebook_id: String,
    chapter_id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_ebook_id(&ebook_id, store)?;
    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", ebook_id))?;

    let chapter_uuid = parse_chapter_id(&chapter_id, ebook)?;
    let chapter = ebook
        .chapter(chapter_uuid)
        .ok_or_else(|| anyhow::anyhow!("Chapter not found: {}", chapter_id))?
        .clone();
    let ebook_title = ebook.title.clone();

    println!("Editing chapter: {}", chapter.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut patch = ChapterPatch::default();

    if let Some(title) = prompt_with_default("Title", &chapter.title)? {
        patch.title = Some(title);
    }

    if confirm("Edit content in your editor?")? {
        let context = vec![
            format!("Editing chapter of: {}", ebook_title),
            format!("Chapter: {}", chapter.title),
        ];
        patch.content = Some(edit_with_context(&context, &chapter.content)?);
    }

    let updated = store
        .update_chapter(uuid, chapter_uuid, patch)
        .context("Failed to update chapter")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success("Chapter updated");

    Ok(())
}

/// Remove a chapter
pub async fn delete_chapter(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    ebook_id: String,
    chapter_id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_ebook_id(&ebook_id, store)?;
    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", ebook_id))?;

    let chapter_uuid = parse_chapter_id(&chapter_id, ebook)?;
    let chapter = ebook
        .chapter(chapter_uuid)
        .ok_or_else(|| anyhow::anyhow!("Chapter not found: {}", chapter_id))?;

    if output.should_prompt() {
        println!(
            "Delete chapter: {} - {}",
            &chapter.id.to_string()[..8],
            chapter.title
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .delete_chapter(uuid, chapter_uuid)
        .context("Failed to delete chapter")?;
    if let Some(updated) = store.get_ebook(uuid) {
        mirror_upsert(adapter, updated, output).await;
    }

    output.success(&format!("Deleted chapter: {}", &chapter_uuid.to_string()[..8]));

    Ok(())
}

/// Reorder chapters to the given id sequence
pub async fn reorder_chapters(
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    ebook_id: String,
    chapter_ids: Vec<String>,
    output: &Output,
) -> Result<()> {
    let uuid = parse_ebook_id(&ebook_id, store)?;
    let ebook = store
        .get_ebook(uuid)
        .ok_or_else(|| anyhow::anyhow!("Ebook not found: {}", ebook_id))?;

    let ordered: Vec<Uuid> = chapter_ids
        .iter()
        .map(|id| parse_chapter_id(id, ebook))
        .collect::<Result<_>>()?;

    let updated = store
        .reorder_chapters(uuid, &ordered)
        .context("Failed to reorder chapters")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success("Chapters reordered");
    output.print_ebook(&updated);

    Ok(())
}

/// Parse an ebook ID (supports full UUID or prefix)
fn parse_ebook_id(id: &str, store: &EbookStore) -> Result<Uuid> {
    resolve_id(
        id,
        store.ebooks().iter().map(|e| (e.id, e.title.as_str())),
        "ebook",
    )
}

/// Parse a chapter ID within one ebook (supports full UUID or prefix)
fn parse_chapter_id(id: &str, ebook: &Ebook) -> Result<Uuid> {
    resolve_id(
        id,
        ebook.chapters.iter().map(|c| (c.id, c.title.as_str())),
        "chapter",
    )
}
