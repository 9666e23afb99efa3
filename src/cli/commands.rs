use crate::app::{AppContext, MurmurError, Result};
use crate::domain::{display_count, Post};

pub fn list_posts(ctx: &mut AppContext) -> Result<()> {
    let feed = ctx.presenter.observe_all()?;
    let posts = feed.borrow();

    if posts.is_empty() {
        println!("No posts");
        return Ok(());
    }

    for post in posts.iter() {
        println!("{}", format_post(post));
    }

    Ok(())
}

pub fn add_post(ctx: &mut AppContext, content: &str) -> Result<()> {
    ctx.presenter.begin_edit(Post::empty());
    ctx.presenter.set_edit_content(content);
    let post = ctx.presenter.commit_edit()?;
    println!("Published post {}", post.id);
    Ok(())
}

pub fn edit_post(ctx: &mut AppContext, id: i64, content: &str) -> Result<()> {
    let post = find_post(ctx, id)?;

    ctx.presenter.begin_edit(post);
    if !ctx.presenter.set_edit_content(content) {
        println!("Post {} unchanged", id);
        return Ok(());
    }
    ctx.presenter.commit_edit()?;
    println!("Updated post {}", id);
    Ok(())
}

pub fn like_post(ctx: &mut AppContext, id: i64) -> Result<()> {
    ctx.presenter.like(id)?;
    let post = find_post(ctx, id)?;
    let verb = if post.liked_by_me { "Liked" } else { "Unliked" };
    println!("{} post {} ({} likes)", verb, id, display_count(post.likes));
    Ok(())
}

pub fn share_post(ctx: &mut AppContext, id: i64) -> Result<()> {
    ctx.presenter.share(id)?;
    let post = find_post(ctx, id)?;
    println!("Shared post {} ({} shares)", id, display_count(post.repost));
    Ok(())
}

pub fn remove_post(ctx: &mut AppContext, id: i64) -> Result<()> {
    ctx.presenter.remove(id)?;
    println!("Removed post {}", id);
    Ok(())
}

pub fn open_post(ctx: &mut AppContext, id: i64) -> Result<()> {
    let post = find_post(ctx, id)?;
    match post.video.filter(|v| !v.is_empty()) {
        Some(video) => println!("{}", video),
        None => println!("Post {} has no video", id),
    }
    Ok(())
}

fn find_post(ctx: &mut AppContext, id: i64) -> Result<Post> {
    ctx.presenter.refresh()?;
    ctx.presenter
        .posts()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(MurmurError::NotFound(id))
}

/// One feed entry as printed by `list`.
pub fn format_post(post: &Post) -> String {
    let like_marker = if post.liked_by_me { "♥" } else { "♡" };
    let mut out = format!(
        "#{} {} · {}\n  {}\n  {} {}  ↻ {}  👁 {}",
        post.id,
        post.author,
        post.published,
        post.content,
        like_marker,
        display_count(post.likes),
        display_count(post.repost),
        display_count(post.views),
    );
    if let Some(video) = post.video.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&format!("\n  ▶ {}", video));
    }
    out
}
