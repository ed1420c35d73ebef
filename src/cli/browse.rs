// src/cli/browse.rs — Courses, chapters, progress, dashboard, bookmarks

use super::context::AppContext;
use super::BookmarkAction;
use crate::client::types::{NewBookmark, ProgressStatus, ProgressUpdate};

pub async fn run_courses(ctx: &AppContext, category: Option<&str>) -> anyhow::Result<()> {
    let courses = ctx.api.courses(category).await?;
    if courses.is_empty() {
        println!("No courses found.");
        return Ok(());
    }
    for course in &courses {
        println!("{:<26} {:<12} {}", course.id, course.category, course.title);
    }
    Ok(())
}

pub async fn run_course(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let course = ctx.api.course(id).await?;
    let chapters = ctx.api.chapters_for_course(id).await?;

    println!("{}", course.title);
    if !course.subtitle.is_empty() {
        println!("{}", course.subtitle);
    }
    if !course.description.is_empty() {
        println!();
        println!("{}", course.description);
    }
    println!();
    println!("Chapters:");
    for ch in &chapters {
        println!("  {:>2}. {} ({})  [{}]", ch.order, ch.title, ch.reading_time, ch.id);
    }
    Ok(())
}

pub async fn run_chapter(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let chapter = ctx.api.chapter(id).await?;
    println!("{}", chapter.title);
    if !chapter.reading_time.is_empty() {
        println!("Reading time: {}", chapter.reading_time);
    }
    println!();
    println!("{}", chapter.content);

    let notes = ctx
        .records
        .list_by_parent::<crate::records::Note>(id)
        .await;
    if !notes.is_empty() {
        println!();
        println!("Your notes ({}):", notes.len());
        for note in &notes {
            println!("  - {}", note.content);
        }
    }
    Ok(())
}

pub async fn run_progress(ctx: &AppContext, update: Option<ProgressUpdate>) -> anyhow::Result<()> {
    ctx.require_login()?;
    if let Some(update) = update {
        let p = ctx.api.update_progress(&update).await?;
        println!("Progress for {} is now {:.0}%.", p.course_id, p.percentage);
        return Ok(());
    }

    let entries = ctx.api.progress().await?;
    let hours = ctx.api.study_hours().await?;
    println!(
        "Study hours: {:.1} across {} course(s)",
        hours.total_study_hours, hours.courses
    );
    println!();
    for p in &entries {
        let status = match p.status {
            ProgressStatus::NotStarted => "not started",
            ProgressStatus::InProgress => "in progress",
            ProgressStatus::Completed => "completed",
        };
        println!("  {:<26} {:>5.1}%  {}", p.course_id, p.percentage, status);
    }
    Ok(())
}

pub async fn run_dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.require_login()?;
    let dash = ctx.api.dashboard().await?;
    if let Some(user) = ctx.sessions.current_user() {
        println!("Hi, {}!", user.name);
    }
    println!("  Exam readiness:  {:.0}%", dash.exam_readiness);
    println!("  Study hours:     {:.1}", dash.total_study_hours);
    println!(
        "  Courses:         {} ({} completed)",
        dash.total_courses, dash.completed_courses
    );

    if let Some(reading) = &dash.continue_reading {
        let title = reading
            .chapter
            .as_ref()
            .and_then(|c| c.full())
            .map(|c| c.title.as_str())
            .unwrap_or("(chapter)");
        println!("  Continue reading: {title} ({:.0}%)", reading.progress);
    }
    for item in &dash.continue_learning {
        let title = item
            .course
            .as_ref()
            .and_then(|c| c.full())
            .map(|c| c.title.as_str())
            .unwrap_or("(course)");
        println!("  - {title}: {:.0}%", item.percentage);
    }
    Ok(())
}

pub async fn run_bookmarks(ctx: &AppContext, action: Option<BookmarkAction>) -> anyhow::Result<()> {
    ctx.require_login()?;
    match action.unwrap_or(BookmarkAction::List) {
        BookmarkAction::List => {
            let bookmarks = ctx.api.bookmarks().await?;
            if bookmarks.is_empty() {
                println!("No bookmarks.");
            }
            for b in &bookmarks {
                println!("[{}] {:?} {}  {}", b.id, b.item_type, b.title, b.url);
            }
        }
        BookmarkAction::Add {
            item_id,
            kind,
            title,
            url,
        } => {
            let url = url.unwrap_or_else(|| match kind {
                super::ItemKind::Course => format!("/course/{item_id}"),
                super::ItemKind::Chapter => format!("/chapter/{item_id}"),
            });
            let bookmark = ctx
                .api
                .add_bookmark(&NewBookmark {
                    item_id,
                    item_type: kind.into(),
                    url,
                    title,
                    subtitle: None,
                    image_url: None,
                })
                .await?;
            println!("Bookmarked ({}).", bookmark.id);
        }
        BookmarkAction::Rm { id } => {
            ctx.api.delete_bookmark(&id).await?;
            println!("Removed bookmark {id}.");
        }
        BookmarkAction::Check { item_id } => {
            let check = ctx.api.check_bookmark(&item_id).await?;
            if check.is_bookmarked {
                println!("{item_id} is bookmarked.");
            } else {
                println!("{item_id} is not bookmarked.");
            }
        }
    }
    Ok(())
}
