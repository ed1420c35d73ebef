// src/client/types.rs — Response schemas for the learning backend
//
// Every optional field has a named default here so call sites never probe
// raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::types::User;

// ─── Courses & chapters ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub order: u32,
    /// Display string such as "8 min".
    #[serde(default)]
    pub reading_time: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A reference the backend may or may not have populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Populated<T> {
    Full(T),
    Id(String),
}

impl<T> Populated<T> {
    pub fn full(&self) -> Option<&T> {
        match self {
            Populated::Full(t) => Some(t),
            Populated::Id(_) => None,
        }
    }
}

// ─── Progress ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub chapter_id: Option<String>,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub study_hours: f64,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub last_accessed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyHours {
    #[serde(default)]
    pub total_study_hours: f64,
    #[serde(default)]
    pub courses: u32,
}

// ─── Bookmarks ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookmarkItemType {
    Course,
    Chapter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub item_id: String,
    pub item_type: BookmarkItemType,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub item_id: String,
    pub item_type: BookmarkItemType,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkCheck {
    #[serde(default)]
    pub is_bookmarked: bool,
    #[serde(default)]
    pub bookmark: Option<Bookmark>,
}

// ─── Dashboard ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueReading {
    #[serde(default)]
    pub course: Option<Populated<Course>>,
    #[serde(default)]
    pub chapter: Option<Populated<Chapter>>,
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueLearning {
    #[serde(default)]
    pub course: Option<Populated<Course>>,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default)]
    pub exam_readiness: f64,
    #[serde(default)]
    pub continue_reading: Option<ContinueReading>,
    #[serde(default)]
    pub continue_learning: Vec<ContinueLearning>,
    #[serde(default)]
    pub total_study_hours: f64,
    #[serde(default)]
    pub total_courses: u32,
    #[serde(default)]
    pub completed_courses: u32,
}

// ─── Profile ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.bio.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_tolerates_missing_optional_fields() {
        let course: Course = serde_json::from_str(r#"{"_id":"c1","title":"Biologi"}"#).unwrap();
        assert_eq!(course.title, "Biologi");
        assert!(course.subject.is_empty());
        assert!(course.created_at.is_none());
    }

    #[test]
    fn test_progress_status_snake_case() {
        let p: Progress = serde_json::from_str(
            r#"{"_id":"p1","courseId":"c1","percentage":42.5,"status":"in_progress"}"#,
        )
        .unwrap();
        assert_eq!(p.status, ProgressStatus::InProgress);
        assert!((p.percentage - 42.5).abs() < f64::EPSILON);
        assert!(p.chapter_id.is_none());
    }

    #[test]
    fn test_progress_update_omits_unset_fields() {
        let update = ProgressUpdate {
            course_id: "c1".into(),
            percentage: Some(50.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"courseId": "c1", "percentage": 50.0}));
    }

    #[test]
    fn test_dashboard_accepts_populated_and_bare_refs() {
        let json = r#"{
            "examReadiness": 64,
            "continueReading": {"course": {"_id": "c1", "title": "Fisika"}, "chapter": "ch9", "progress": 30},
            "continueLearning": [{"course": "c2", "percentage": 10}],
            "totalStudyHours": 12.5,
            "totalCourses": 4,
            "completedCourses": 1
        }"#;
        let dash: Dashboard = serde_json::from_str(json).unwrap();
        let reading = dash.continue_reading.unwrap();
        assert_eq!(reading.course.unwrap().full().unwrap().title, "Fisika");
        assert_eq!(reading.chapter, Some(Populated::Id("ch9".into())));
        assert_eq!(dash.continue_learning.len(), 1);
        assert_eq!(dash.completed_courses, 1);
    }

    #[test]
    fn test_empty_dashboard_defaults() {
        let dash: Dashboard = serde_json::from_str("{}").unwrap();
        assert_eq!(dash, Dashboard::default());
    }

    #[test]
    fn test_bookmark_item_type_wire_names() {
        let b = NewBookmark {
            item_id: "c1".into(),
            item_type: BookmarkItemType::Course,
            url: "/course/c1".into(),
            title: "Kimia".into(),
            subtitle: None,
            image_url: None,
        };
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["itemType"], "Course");
        assert!(json.get("subtitle").is_none());
    }

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            bio: Some("hi".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
