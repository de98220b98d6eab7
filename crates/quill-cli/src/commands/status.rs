//! Status command handler

use anyhow::Result;

use quill_core::{BlogStore, Config, EbookStore, SocialStore, StorageStats};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(config: &Config, output: &Output) -> Result<()> {
    let blog = BlogStore::open(config)?;
    let ebooks = EbookStore::open(config)?;
    let social = SocialStore::open(config)?;

    let stats = StorageStats::collect(["blog", "ebooks", "social"].map(|name| {
        (name.to_string(), config.store_path(name))
    }));

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "mode": if config.local_mode() { "local" } else { "remote" },
                    "sync_enabled": config.sync_enabled,
                    "sync_url": config.sync_url,
                    "storage": {
                        "location": config.data_dir,
                        "total_size": stats.total_size(),
                        "files": stats.files.iter().map(|f| {
                            serde_json::json!({
                                "name": f.name,
                                "exists": f.exists,
                                "size": f.size
                            })
                        }).collect::<Vec<_>>()
                    },
                    "counts": {
                        "blog_posts": blog.post_count(),
                        "ebooks": ebooks.ebook_count(),
                        "social_posts": social.post_count()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Quill Status");
            println!("============");
            println!();
            println!("Mode:");
            println!(
                "  {}",
                if config.local_mode() {
                    "local (no remote mirroring)"
                } else {
                    "remote mirroring enabled"
                }
            );
            if let Some(ref url) = config.sync_url {
                println!("  Server: {}", url);
            }
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Size:     {}", stats.total_size_human());
            println!();
            println!("Contents:");
            println!("  Blog posts:   {}", blog.post_count());
            println!("  Ebooks:       {}", ebooks.ebook_count());
            println!("  Social posts: {}", social.post_count());
        }
    }

    Ok(())
}
