// src/cli/records.rs — Notes and quiz results on this device

use super::context::AppContext;
use super::{NoteAction, QuizAction};
use crate::records::{Note, QuizResult};

pub async fn run_notes(ctx: &AppContext, action: Option<NoteAction>) -> anyhow::Result<()> {
    match action.unwrap_or(NoteAction::List { chapter: None }) {
        NoteAction::List { chapter } => {
            let notes = match &chapter {
                Some(ch) => ctx.records.list_by_parent::<Note>(ch).await,
                None => ctx.records.list_all::<Note>().await,
            };
            if notes.is_empty() {
                println!("No notes yet. Add one with `studydesk notes add <chapter> <text>`.");
                return Ok(());
            }
            for note in &notes {
                println!(
                    "[{}] {}  chapter {}",
                    note.id,
                    note.created_at.format("%Y-%m-%d %H:%M"),
                    note.chapter_id
                );
                println!("    {}", note.content);
            }
        }
        NoteAction::Add { chapter, content } => {
            let note = Note::new(chapter, content)?;
            let id = note.id.clone();
            ctx.records.append(note).await?;
            println!("Saved note {id}.");
        }
        NoteAction::Rm { id } => {
            if ctx.records.remove::<Note>(&id).await? {
                println!("Deleted note {id}.");
            } else {
                println!("No note with id {id}.");
            }
        }
    }
    Ok(())
}

pub async fn run_quiz(ctx: &AppContext, action: Option<QuizAction>) -> anyhow::Result<()> {
    let threshold = ctx.config.quiz.pass_threshold;
    match action.unwrap_or(QuizAction::List { chapter: None }) {
        QuizAction::List { chapter } => {
            let results = match &chapter {
                Some(ch) => ctx.records.list_by_parent::<QuizResult>(ch).await,
                None => ctx.records.list_all::<QuizResult>().await,
            };
            if results.is_empty() {
                println!("No quiz results yet.");
                return Ok(());
            }
            for r in &results {
                println!(
                    "[{}] {}  chapter {}  {}/{} ({}%) {}",
                    r.id,
                    r.date.format("%Y-%m-%d"),
                    r.chapter_id,
                    r.score,
                    r.total_questions,
                    r.percentage(),
                    if r.passed(threshold) { "passed" } else { "not passed" }
                );
            }
        }
        QuizAction::Record {
            chapter,
            score,
            total,
        } => {
            let result = QuizResult::new(chapter, score, total)?;
            let summary = format!("{}/{} ({}%)", score, total, result.percentage());
            let passed = result.passed(threshold);
            ctx.records.append(result).await?;
            println!(
                "Saved quiz result {summary}{}",
                if passed { ", passed." } else { "." }
            );
        }
        QuizAction::Rm { id } => {
            if ctx.records.remove::<QuizResult>(&id).await? {
                println!("Deleted quiz result {id}.");
            } else {
                println!("No quiz result with id {id}.");
            }
        }
    }
    Ok(())
}
