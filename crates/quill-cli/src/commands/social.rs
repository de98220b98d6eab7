//! Social post command handlers

use anyhow::{Context, Result};
use uuid::Uuid;

use quill_core::{PostStatus, SocialPlatform, SocialPost, SocialPostPatch, SocialStore, SyncAdapter};

use crate::commands::blog::prompt_with_default;
use crate::commands::{mirror_delete, mirror_upsert, parse_datetime, resolve_id, split_list};
use crate::editor::confirm;
use crate::output::Output;

/// Create a new social post
#[allow(clippy::too_many_arguments)]
pub async fn create(
    store: &mut SocialStore,
    adapter: &SyncAdapter,
    platform: String,
    caption: Option<String>,
    content: Option<String>,
    hashtags: Option<String>,
    schedule: Option<String>,
    output: &Output,
) -> Result<()> {
    let platform: SocialPlatform = platform.parse()?;
    let mut post = SocialPost::new(platform);

    if let Some(caption) = caption {
        post.set_caption(caption);
    }
    if let Some(content) = content {
        post.set_content(content);
    }
    if let Some(hashtags) = hashtags {
        post.set_hashtags(split_list(&hashtags));
    }
    if let Some(schedule) = schedule {
        post.schedule(parse_datetime(&schedule)?);
    }

    let snapshot = post.clone();
    store.add_post(post).context("Failed to create post")?;
    mirror_upsert(adapter, &snapshot, output).await;

    output.success(&format!("Created post: {}", snapshot.id));
    output.print_social_post(&snapshot);

    Ok(())
}

/// List posts, optionally filtered by platform and status
pub fn list(
    store: &SocialStore,
    platform: Option<String>,
    status: Option<String>,
    output: &Output,
) -> Result<()> {
    let platform = platform
        .map(|p| p.parse::<SocialPlatform>())
        .transpose()?;
    let status = status.map(|s| s.parse::<PostStatus>()).transpose()?;

    let posts: Vec<&SocialPost> = store
        .posts()
        .iter()
        .filter(|p| platform.map_or(true, |wanted| p.platform == wanted))
        .filter(|p| status.map_or(true, |wanted| p.status == wanted))
        .collect();

    output.print_social_posts(&posts);
    Ok(())
}

/// Show a single post
pub fn show(store: &SocialStore, id: String, output: &Output) -> Result<()> {
    let uuid = parse_post_id(&id, store)?;

    let post = store
        .get_post(uuid)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", id))?;

    output.print_social_post(post);
    Ok(())
}

/// Show scheduled posts bucketed by day
pub fn upcoming(store: &SocialStore, output: &Output) -> Result<()> {
    let buckets = store.upcoming();
    output.print_upcoming(&buckets);
    Ok(())
}

/// Edit a post interactively
pub async fn edit(
    store: &mut SocialStore,
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

    let mut patch = SocialPostPatch::default();

    if let Some(caption) = prompt_with_default("Caption", &post.caption)? {
        patch.caption = Some(caption);
    }
    if let Some(content) = prompt_with_default("Content", &post.content)? {
        patch.content = Some(content);
    }

    let current_tags = post.hashtags.join(", ");
    if let Some(hashtags) = prompt_with_default("Hashtags (comma-separated)", &current_tags)? {
        patch.hashtags = Some(split_list(&hashtags));
    }

    let current_schedule = post
        .scheduled_date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    if let Some(schedule) = prompt_with_default("Schedule", &current_schedule)? {
        patch.scheduled_date = Some(Some(parse_datetime(&schedule)?));
        if post.status == PostStatus::Draft {
            patch.status = Some(PostStatus::Scheduled);
        }
    }

    let updated = store
        .update_post(uuid, patch)
        .context("Failed to update post")?;
    mirror_upsert(adapter, &updated, output).await;

    output.success("Post updated");
    output.print_social_post(&updated);

    Ok(())
}

/// Delete a post
pub async fn delete(
    store: &mut SocialStore,
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
            "Delete post: {} - {} ({})",
            &post.id.to_string()[..8],
            post.caption,
            post.platform
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_post(uuid).context("Failed to delete post")?;
    mirror_delete::<SocialPost>(adapter, uuid, output).await;

    output.success(&format!("Deleted post: {}", uuid));

    Ok(())
}

/// Parse a post ID (supports full UUID or prefix)
fn parse_post_id(id: &str, store: &SocialStore) -> Result<Uuid> {
    resolve_id(
        id,
        store.posts().iter().map(|p| (p.id, p.caption.as_str())),
        "post",
    )
}
