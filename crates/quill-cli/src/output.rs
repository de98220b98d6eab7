//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::NaiveDate;
use quill_core::{BlogPost, Ebook, SocialPost};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single blog post
    pub fn print_blog_post(&self, post: &BlogPost) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", post.id);
                println!("Title:    {}", post.title);
                if !post.excerpt.is_empty() {
                    println!("Excerpt:  {}", post.excerpt);
                }
                println!(
                    "Status:   {}",
                    if post.published { "published" } else { "draft" }
                );
                if let Some(date) = post.scheduled_date {
                    println!("Schedule: {}", date.format("%Y-%m-%d %H:%M"));
                }
                if !post.keywords.is_empty() {
                    println!("Keywords: {}", post.keywords.join(", "));
                }
                println!("Created:  {}", post.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:  {}", post.updated_at.format("%Y-%m-%d %H:%M"));
                if !post.content.is_empty() {
                    println!();
                    println!("{}", post.content);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(post).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", post.id);
            }
        }
    }

    /// Print a list of blog posts
    pub fn print_blog_posts(&self, posts: &[&BlogPost]) {
        match self.format {
            OutputFormat::Human => {
                if posts.is_empty() {
                    println!("No posts found.");
                    return;
                }
                for post in posts {
                    let marker = if post.published { "published" } else { "draft" };
                    println!(
                        "{} | {} | {} | {}",
                        &post.id.to_string()[..8],
                        truncate(&post.title, 40),
                        marker,
                        post.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
                println!("\n{} post(s)", posts.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(posts).unwrap());
            }
            OutputFormat::Quiet => {
                for post in posts {
                    println!("{}", post.id);
                }
            }
        }
    }

    /// Print a single ebook with its chapters
    pub fn print_ebook(&self, ebook: &Ebook) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", ebook.id);
                println!("Title:       {}", ebook.title);
                if !ebook.description.is_empty() {
                    println!("Description: {}", ebook.description);
                }
                println!("Status:      {}", ebook.status);
                println!("Format:      {}", ebook.format);
                println!("Created:     {}", ebook.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:     {}", ebook.updated_at.format("%Y-%m-%d %H:%M"));

                if !ebook.chapters.is_empty() {
                    println!();
                    println!("── Chapters ({}) ──", ebook.chapters.len());
                    for chapter in &ebook.chapters {
                        println!(
                            "{:>3}. {} [{}]",
                            chapter.order + 1,
                            truncate(&chapter.title, 50),
                            &chapter.id.to_string()[..8]
                        );
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(ebook).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", ebook.id);
            }
        }
    }

    /// Print a list of ebooks
    pub fn print_ebooks(&self, ebooks: &[&Ebook]) {
        match self.format {
            OutputFormat::Human => {
                if ebooks.is_empty() {
                    println!("No ebooks found.");
                    return;
                }
                for ebook in ebooks {
                    println!(
                        "{} | {} | {} chapter(s) | {} | {}",
                        &ebook.id.to_string()[..8],
                        truncate(&ebook.title, 35),
                        ebook.chapters.len(),
                        ebook.status,
                        ebook.format
                    );
                }
                println!("\n{} ebook(s)", ebooks.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(ebooks).unwrap());
            }
            OutputFormat::Quiet => {
                for ebook in ebooks {
                    println!("{}", ebook.id);
                }
            }
        }
    }

    /// Print a single social post
    pub fn print_social_post(&self, post: &SocialPost) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", post.id);
                println!("Platform: {}", post.platform);
                println!("Status:   {}", post.status);
                if !post.caption.is_empty() {
                    println!("Caption:  {}", post.caption);
                }
                if !post.hashtags.is_empty() {
                    let tags: Vec<String> =
                        post.hashtags.iter().map(|t| format!("#{}", t)).collect();
                    println!("Hashtags: {}", tags.join(" "));
                }
                if let Some(date) = post.scheduled_date {
                    println!("Schedule: {}", date.format("%Y-%m-%d %H:%M"));
                }
                println!("Created:  {}", post.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:  {}", post.updated_at.format("%Y-%m-%d %H:%M"));
                if !post.content.is_empty() {
                    println!();
                    println!("{}", post.content);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(post).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", post.id);
            }
        }
    }

    /// Print a list of social posts
    pub fn print_social_posts(&self, posts: &[&SocialPost]) {
        match self.format {
            OutputFormat::Human => {
                if posts.is_empty() {
                    println!("No posts found.");
                    return;
                }
                for post in posts {
                    let schedule = post
                        .scheduled_date
                        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{} | {} | {} | {} | {}",
                        &post.id.to_string()[..8],
                        post.platform,
                        post.status,
                        truncate(&post.caption, 35),
                        schedule
                    );
                }
                println!("\n{} post(s)", posts.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(posts).unwrap());
            }
            OutputFormat::Quiet => {
                for post in posts {
                    println!("{}", post.id);
                }
            }
        }
    }

    /// Print the scheduled-post calendar, one bucket per day
    pub fn print_upcoming(&self, buckets: &[(NaiveDate, Vec<&SocialPost>)]) {
        match self.format {
            OutputFormat::Human => {
                if buckets.is_empty() {
                    println!("Nothing scheduled.");
                    return;
                }
                for (day, posts) in buckets {
                    println!("{}", day.format("%A, %Y-%m-%d"));
                    for post in posts {
                        let time = post
                            .scheduled_date
                            .map(|d| d.format("%H:%M").to_string())
                            .unwrap_or_default();
                        println!(
                            "  {} {} | {} | {}",
                            time,
                            post.platform,
                            truncate(&post.caption, 40),
                            &post.id.to_string()[..8]
                        );
                    }
                    println!();
                }
            }
            OutputFormat::Json => {
                let days: Vec<_> = buckets
                    .iter()
                    .map(|(day, posts)| {
                        serde_json::json!({
                            "date": day.to_string(),
                            "posts": posts,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&days).unwrap());
            }
            OutputFormat::Quiet => {
                for (_, posts) in buckets {
                    for post in posts {
                        println!("{}", post.id);
                    }
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
