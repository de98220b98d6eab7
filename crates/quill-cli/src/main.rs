//! Quill CLI
//!
//! Command-line interface for Quill - local-first content studio for blog
//! posts, ebooks, and social media posts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quill_core::{BlogStore, Config, EbookStore, SocialStore, SyncAdapter};

mod commands;
mod editor;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill - Local-first content studio")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage blog posts
    Blog {
        #[command(subcommand)]
        command: BlogCommands,
    },
    /// Manage ebooks and their chapters
    Ebook {
        #[command(subcommand)]
        command: EbookCommands,
    },
    /// Manage social media posts
    Social {
        #[command(subcommand)]
        command: SocialCommands,
    },
    /// Generate content from a prompt
    Generate {
        /// Prompt text
        prompt: Vec<String>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (mode, storage, counts)
    Status,
}

#[derive(Subcommand)]
enum BlogCommands {
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Post title
        title: String,
        /// Post content
        #[arg(short, long)]
        content: Option<String>,
        /// Short excerpt shown in listings
        #[arg(short, long)]
        excerpt: Option<String>,
        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: Option<String>,
        /// Publication schedule (YYYY-MM-DD or 'YYYY-MM-DD HH:MM')
        #[arg(long)]
        schedule: Option<String>,
        /// Draft the content in your editor
        #[arg(long)]
        edit: bool,
    },
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Published posts only
        #[arg(short, long)]
        published: bool,
    },
    /// Show post details
    Show {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Edit a post
    Edit {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Mark a post published
    Publish {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID (full UUID or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum EbookCommands {
    /// Create a new ebook
    #[command(alias = "add")]
    Create {
        /// Book title
        title: String,
        /// Back-cover description
        #[arg(short, long)]
        description: Option<String>,
        /// Output format (pdf, epub, mobi)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// List ebooks
    #[command(alias = "ls")]
    List,
    /// Show ebook details and chapters
    Show {
        /// Ebook ID (full UUID or prefix)
        id: String,
    },
    /// Edit ebook metadata
    Edit {
        /// Ebook ID (full UUID or prefix)
        id: String,
    },
    /// Delete an ebook and all of its chapters
    #[command(alias = "rm")]
    Delete {
        /// Ebook ID (full UUID or prefix)
        id: String,
    },
    /// Manage chapters of an ebook
    Chapter {
        #[command(subcommand)]
        command: ChapterCommands,
    },
}

#[derive(Subcommand)]
enum ChapterCommands {
    /// Add a chapter to an ebook
    #[command(alias = "create")]
    Add {
        /// Ebook ID (full UUID or prefix)
        ebook_id: String,
        /// Chapter title
        title: String,
        /// Chapter content
        #[arg(short, long)]
        content: Option<String>,
        /// Draft the content in your editor
        #[arg(long)]
        edit: bool,
    },
    /// List an ebook's chapters in order
    #[command(alias = "ls")]
    List {
        /// Ebook ID (full UUID or prefix)
        ebook_id: String,
    },
    /// Edit a chapter
    Edit {
        /// Ebook ID (full UUID or prefix)
        ebook_id: String,
        /// Chapter ID (full UUID or prefix)
        chapter_id: String,
    },
    /// Delete a chapter
    #[command(alias = "rm")]
    Delete {
        /// Ebook ID (full UUID or prefix)
        ebook_id: String,
        /// Chapter ID (full UUID or prefix)
        chapter_id: String,
    },
    /// Reorder chapters to the given id sequence
    Reorder {
        /// Ebook ID (full UUID or prefix)
        ebook_id: String,
        /// Chapter IDs in the desired order (must name every chapter)
        #[arg(required = true, num_args = 1..)]
        chapter_ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SocialCommands {
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Target platform (instagram, facebook, linkedin, tiktok, twitter)
        #[arg(short, long)]
        platform: String,
        /// Post caption
        #[arg(long)]
        caption: Option<String>,
        /// Post body content
        #[arg(short, long)]
        content: Option<String>,
        /// Comma-separated hashtags (without '#')
        #[arg(long)]
        hashtags: Option<String>,
        /// Schedule (YYYY-MM-DD or 'YYYY-MM-DD HH:MM')
        #[arg(long)]
        schedule: Option<String>,
    },
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Filter by platform
        #[arg(short, long)]
        platform: Option<String>,
        /// Filter by status (draft, scheduled, published)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show post details
    Show {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Edit a post
    Edit {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Show scheduled posts by day
    Upcoming,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, sync_url, sync_enabled, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the stores
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    match cli.command {
        Commands::Blog { command } => handle_blog_command(command, &config, &output).await,
        Commands::Ebook { command } => handle_ebook_command(command, &config, &output).await,
        Commands::Social { command } => handle_social_command(command, &config, &output).await,
        Commands::Generate { prompt } => commands::generate::run(prompt, &config, &output).await,
        Commands::Status => commands::status::show(&config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

async fn handle_blog_command(
    command: BlogCommands,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let mut store = BlogStore::open(config)?;
    let adapter = SyncAdapter::from_config(config)?;

    match command {
        BlogCommands::Create {
            title,
            content,
            excerpt,
            keywords,
            schedule,
            edit,
        } => {
            commands::blog::create(
                &mut store, &adapter, title, content, excerpt, keywords, schedule, edit, output,
            )
            .await
        }
        BlogCommands::List { published } => commands::blog::list(&store, published, output),
        BlogCommands::Show { id } => commands::blog::show(&store, id, output),
        BlogCommands::Edit { id } => commands::blog::edit(&mut store, &adapter, id, output).await,
        BlogCommands::Publish { id } => {
            commands::blog::publish(&mut store, &adapter, id, output).await
        }
        BlogCommands::Delete { id } => {
            commands::blog::delete(&mut store, &adapter, id, output).await
        }
    }
}

async fn handle_ebook_command(
    command: EbookCommands,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let mut store = EbookStore::open(config)?;
    let adapter = SyncAdapter::from_config(config)?;

    match command {
        EbookCommands::Create {
            title,
            description,
            format,
        } => {
            commands::ebook::create(&mut store, &adapter, title, description, format, output).await
        }
        EbookCommands::List => commands::ebook::list(&store, output),
        EbookCommands::Show { id } => commands::ebook::show(&store, id, output),
        EbookCommands::Edit { id } => commands::ebook::edit(&mut store, &adapter, id, output).await,
        EbookCommands::Delete { id } => {
            commands::ebook::delete(&mut store, &adapter, id, output).await
        }
        EbookCommands::Chapter { command } => {
            handle_chapter_command(command, &mut store, &adapter, output).await
        }
    }
}

async fn handle_chapter_command(
    command: ChapterCommands,
    store: &mut EbookStore,
    adapter: &SyncAdapter,
    output: &Output,
) -> Result<()> {
    match command {
        ChapterCommands::Add {
            ebook_id,
            title,
            content,
            edit,
        } => {
            commands::ebook::add_chapter(store, adapter, ebook_id, title, content, edit, output)
                .await
        }
        ChapterCommands::List { ebook_id } => commands::ebook::list_chapters(store, ebook_id, output),
        ChapterCommands::Edit {
            ebook_id,
            chapter_id,
        } => commands::ebook::edit_chapter(store, adapter, ebook_id, chapter_id, output).await,
        ChapterCommands::Delete {
            ebook_id,
            chapter_id,
        } => commands::ebook::delete_chapter(store, adapter, ebook_id, chapter_id, output).await,
        ChapterCommands::Reorder {
            ebook_id,
            chapter_ids,
        } => commands::ebook::reorder_chapters(store, adapter, ebook_id, chapter_ids, output).await,
    }
}

async fn handle_social_command(
    command: SocialCommands,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let mut store = SocialStore::open(config)?;
    let adapter = SyncAdapter::from_config(config)?;

    match command {
        SocialCommands::Create {
            platform,
            caption,
            content,
            hashtags,
            schedule,
        } => {
            commands::social::create(
                &mut store, &adapter, platform, caption, content, hashtags, schedule, output,
            )
            .await
        }
        SocialCommands::List { platform, status } => {
            commands::social::list(&store, platform, status, output)
        }
        SocialCommands::Show { id } => commands::social::show(&store, id, output),
        SocialCommands::Edit { id } => {
            commands::social::edit(&mut store, &adapter, id, output).await
        }
        SocialCommands::Delete { id } => {
            commands::social::delete(&mut store, &adapter, id, output).await
        }
        SocialCommands::Upcoming => commands::social::upcoming(&store, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
