// src/records/types.rs — Record kinds stored on the device

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::infra::errors::StudyError;

/// Category of a record collection. Each kind lives under one storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Notes,
    QuizResults,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Notes, RecordKind::QuizResults];

    /// Key of the JSON array holding every record of this kind.
    pub fn storage_key(self) -> &'static str {
        match self {
            RecordKind::Notes => "user_notes",
            RecordKind::QuizResults => "user_quiz_results",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Notes => "notes",
            RecordKind::QuizResults => "quiz-results",
        })
    }
}

/// A user-generated artifact scoped to a parent learning unit (chapter).
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    /// Unique within the kind's collection.
    fn id(&self) -> &str;

    fn parent_id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;
}

static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(0);

/// Timestamp-derived record identifiers.
pub struct RecordId;

impl RecordId {
    /// Epoch milliseconds as a string, bumped so ids issued by this process
    /// are strictly increasing even within one millisecond.
    pub fn generate() -> String {
        Self::after(Utc::now().timestamp_millis()).to_string()
    }

    fn after(now_ms: i64) -> i64 {
        let mut last = LAST_ISSUED_MS.load(Ordering::Relaxed);
        loop {
            let next = now_ms.max(last + 1);
            match LAST_ISSUED_MS.compare_exchange_weak(
                last,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

// ─── Notes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub chapter_id: String,
}

impl Note {
    pub fn new(chapter_id: impl Into<String>, content: impl Into<String>) -> Result<Self, StudyError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(StudyError::InvalidInput("note content is empty".into()));
        }
        Ok(Self {
            id: RecordId::generate(),
            content,
            created_at: Utc::now(),
            chapter_id: chapter_id.into(),
        })
    }
}

impl Record for Note {
    const KIND: RecordKind = RecordKind::Notes;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> &str {
        &self.chapter_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ─── Quiz results ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub chapter_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub date: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(chapter_id: impl Into<String>, score: u32, total_questions: u32) -> Result<Self, StudyError> {
        if total_questions == 0 {
            return Err(StudyError::InvalidInput("a quiz needs at least one question".into()));
        }
        if score > total_questions {
            return Err(StudyError::InvalidInput(format!(
                "score {score} exceeds {total_questions} questions"
            )));
        }
        Ok(Self {
            id: RecordId::generate(),
            chapter_id: chapter_id.into(),
            score,
            total_questions,
            date: Utc::now(),
        })
    }

    /// Score as a whole percentage, rounded half away from zero.
    pub fn percentage(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        let pct = f64::from(self.score) / f64::from(self.total_questions) * 100.0;
        pct.round() as u32
    }

    pub fn passed(&self, threshold: u32) -> bool {
        self.percentage() >= threshold
    }
}

impl Record for QuizResult {
    const KIND: RecordKind = RecordKind::QuizResults;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> &str {
        &self.chapter_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.date
    }
}
