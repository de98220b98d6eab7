//! Blog command handlers

use anyhow::{Context, Result};
use uuid::Uuid;

use quill_core::{BlogPost, BlogPostPatch, BlogStore, SyncAdapter};

use crate::commands::{mirror_delete, mirror_upsert, parse_datetime, resolve_id, split_list};
use crate::editor::{confirm, edit_with_context};
use crate::output::Output;

/// Create a new blog post
#[allow(clippy::too_many_arguments)]
pub async fn create(
    store: &mut BlogStore,
    adapter: &SyncAdapter,
    title: String,
    content: Option<String>,
    excerpt: Option<String>,
    keywords: Option<String>,
    schedule: Option<String>,
    edit: bool,
    output: &Output,
) -> Result<()> {
    let mut post = BlogPost::new(title);

    match content {
        Some(content) => post.set_content(content),
        None if edit => {
            let drafted =
                edit_with_context(&[format!("Drafting: {}", post.title)], "")?;
            post.set_content(drafted);
        }
        None => {}
    }

    if let Some(excerpt) = excerpt {
        post.set_excerpt(excerpt);
    }
    if let Some(keywords) = keywords {
        post.set_keywords(split_list(&keywords));
    }
    if let Some(schedule) = schedule {
        post.set_scheduled_date(Some(parse_datetime(&schedule)?));
    }

    let snapshot = post.clone();
    store.add_post(post).context("Failed to create post")?;
    mirror_upsert(adapter, &snapshot, output).await;

    output.success(&format!("Created post: {}", snapshot.id));
    output.print_blog_post(&snapshot);

    Ok(())
}

/// List posts, optionally published only
pub fn list(store: &BlogStore, published_only: bool, output: &Output) -> Result<()> {
    let posts: Vec<&BlogPost> = if published_only {
        store.published()
    } else {
        store.posts().iter().collect()
    };

    output.print_blog_posts(&posts);
    Ok(())
}

/// Show a single post
pub fn show(store: &BlogStore, id: String, output: &Output) -> Result<()> {
    let uuid = parse_post_id(&id, store)?;

    let post = store
        .get_post(uuid)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", id))?;

    output.print_blog_post(post);
    Ok(())
}

/// Edit a post interactively
pub async fn edit(
    store: &mut BlogStore,
    adapter: &SyncAdapter,
    id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_post_id(&id, store)?;

    let post = store
        .get_post(uuid)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", id))?
        .clone();

    println!("Editing post: {}", post.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut patch = BlogPostPatch::default();

    if let Some(title) = prompt_with_default("Title", &post.title)? {
        patch.title = Some(title);
    }
    if let Some(excerpt) = prompt_with_default("Excerpt", &post.excerpt)? {
        patch.excerpt = Some(excerpt);
    }

    if confirm("Edit content in your editor?")? {
        let context = vec![format!("Editing: {}", post.title)];
        let content = edit_with_context(&context, &post.content)?;
        patch.content = Some(content);
    }

    let updated = store
        .update_post(uuid, patch)
        .context("Failed to update post")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success("Post updated");
    output.print_blog_post(&updated);

    Ok(())
}

/// Mark a post published
pub async fn publish(
    store: &mut BlogStore,
    adapter: &SyncAdapter,
    id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_post_id(&id, store)?;

    let patch = BlogPostPatch {
        published: Some(true),
        ..Default::default()
    };
    let updated = store
        .update_post(uuid, patch)
        .context("Failed to publish post")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success(&format!("Published post: {}", updated.title));
    Ok(())
}

/// Delete a post
pub async fn delete(
    store: &mut BlogStore,
    adapter: &SyncAdapter,
    id: String,
    output: &Output,
) -> Result<()> {
    let uuid = parse_post_id(&id, store)?;

    let post = store
        .get_post(uuid)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", id))?;

    if output.should_prompt() {
        println!(
            "Delete post: {} - {}",
            &post.id.to_string()[..8],
            post.title
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_post(uuid).context("Failed to delete post")?;
    mirror_delete::<BlogPost>(adapter, uuid, output).await;

    output.success(&format!("Deleted post: {}", uuid));

    Ok(())
}

/// Parse a post ID (supports full UUID or prefix)
fn parse_post_id(id: &str, store: &BlogStore) -> Result<Uuid> {
    resolve_id(
        id,
        store.posts().iter().map(|p| (p.id, p.title.as_str())),
        "post",
    )
}

/// Prompt with a default value, returns None if user keeps default
pub(crate) fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    use std::io::{self, Write};

    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}
