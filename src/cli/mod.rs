// src/cli/mod.rs — CLI definition (clap derive)

pub mod account;
pub mod browse;
pub mod context;
pub mod records;
pub mod status;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::types::BookmarkItemType;

#[derive(Parser)]
#[command(name = "studydesk", about = "Study courses, notes and quizzes from the terminal", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password
    Login {
        email: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a student account and log in
    Register {
        name: String,
        email: String,
        /// Grade level (defaults to 12)
        #[arg(long)]
        grade: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update profile fields
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Change the account password (both values prompted)
    Password,
    /// List courses
    Courses {
        /// Only courses in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a course and its chapters
    Course { id: String },
    /// Print a chapter
    Chapter { id: String },
    /// Show learning progress
    Progress {
        /// Record progress for this course instead of listing
        #[arg(long)]
        course: Option<String>,
        #[arg(long, requires = "course")]
        chapter: Option<String>,
        #[arg(long, requires = "course")]
        percentage: Option<f64>,
    },
    /// Summary of readiness, study hours and courses in progress
    Dashboard,
    /// Manage server-side bookmarks
    Bookmarks {
        #[command(subcommand)]
        action: Option<BookmarkAction>,
    },
    /// Notes saved on this device
    Notes {
        #[command(subcommand)]
        action: Option<NoteAction>,
    },
    /// Quiz results saved on this device
    Quiz {
        #[command(subcommand)]
        action: Option<QuizAction>,
    },
    /// Show configuration, storage and session state
    Status,
}

#[derive(Subcommand, Clone)]
pub enum NoteAction {
    /// List notes, newest first (or one chapter's notes in order)
    List {
        #[arg(long)]
        chapter: Option<String>,
    },
    /// Add a note to a chapter
    Add { chapter: String, content: String },
    /// Delete a note by id
    Rm { id: String },
}

#[derive(Subcommand, Clone)]
pub enum QuizAction {
    /// List quiz results, newest first
    List {
        #[arg(long)]
        chapter: Option<String>,
    },
    /// Save a finished quiz
    Record {
        chapter: String,
        score: u32,
        total: u32,
    },
    /// Delete a quiz result by id
    Rm { id: String },
}

#[derive(Subcommand, Clone)]
pub enum BookmarkAction {
    /// List bookmarks
    List,
    /// Bookmark a course or chapter
    Add {
        item_id: String,
        #[arg(long, value_enum, default_value = "course")]
        kind: ItemKind,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: Option<String>,
    },
    /// Remove a bookmark by id
    Rm { id: String },
    /// Whether an item is bookmarked
    Check { item_id: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ItemKind {
    Course,
    Chapter,
}

impl From<ItemKind> for BookmarkItemType {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Course => BookmarkItemType::Course,
            ItemKind::Chapter => BookmarkItemType::Chapter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_note_add() {
        let cli = Cli::try_parse_from(["studydesk", "notes", "add", "ch1", "Osmosis"]).unwrap();
        match cli.command {
            Commands::Notes {
                action: Some(NoteAction::Add { chapter, content }),
            } => {
                assert_eq!(chapter, "ch1");
                assert_eq!(content, "Osmosis");
            }
            _ => panic!("expected notes add"),
        }
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["studydesk", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_progress_flags_require_course() {
        assert!(Cli::try_parse_from(["studydesk", "progress", "--percentage", "40"]).is_err());
        assert!(
            Cli::try_parse_from(["studydesk", "progress", "--course", "c1", "--percentage", "40"])
                .is_ok()
        );
    }
}
