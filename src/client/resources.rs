// src/client/resources.rs — Typed calls for courses, chapters, progress,
// bookmarks, dashboard and profile

use super::types::{
    Bookmark, BookmarkCheck, Chapter, Course, Dashboard, NewBookmark, PasswordChange,
    ProfileResponse, ProfileUpdate, Progress, ProgressUpdate, StudyHours,
};
use super::ApiClient;
use crate::infra::errors::StudyError;
use crate::session::types::User;

impl ApiClient {
    // -- Courses --

    pub async fn courses(&self, category: Option<&str>) -> Result<Vec<Course>, StudyError> {
        match category {
            Some(c) => {
                self.get_with_query(&["api", "courses"], &[("category", c)])
                    .await
            }
            None => self.get(&["api", "courses"]).await,
        }
    }

    pub async fn course(&self, id: &str) -> Result<Course, StudyError> {
        self.get(&["api", "courses", id]).await
    }

    // -- Chapters --

    /// Chapters of a course, sorted by their `order` field.
    pub async fn chapters_for_course(&self, course_id: &str) -> Result<Vec<Chapter>, StudyError> {
        let mut chapters: Vec<Chapter> = self.get(&["api", "chapters", "course", course_id]).await?;
        chapters.sort_by_key(|c| c.order);
        Ok(chapters)
    }

    pub async fn chapter(&self, id: &str) -> Result<Chapter, StudyError> {
        self.get(&["api", "chapters", id]).await
    }

    // -- Progress --

    pub async fn progress(&self) -> Result<Vec<Progress>, StudyError> {
        self.get(&["api", "progress"]).await
    }

    pub async fn course_progress(&self, course_id: &str) -> Result<Progress, StudyError> {
        self.get(&["api", "progress", "course", course_id]).await
    }

    pub async fn update_progress(&self, update: &ProgressUpdate) -> Result<Progress, StudyError> {
        if let Some(p) = update.percentage {
            if !(0.0..=100.0).contains(&p) {
                return Err(StudyError::InvalidInput(format!(
                    "progress percentage must be within 0..=100, got {p}"
                )));
            }
        }
        self.put(&["api", "progress"], update).await
    }

    pub async fn study_hours(&self) -> Result<StudyHours, StudyError> {
        self.get(&["api", "progress", "study-hours"]).await
    }

    // -- Bookmarks --

    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>, StudyError> {
        self.get(&["api", "bookmarks"]).await
    }

    pub async fn add_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark, StudyError> {
        self.post(&["api", "bookmarks"], bookmark).await
    }

    pub async fn delete_bookmark(&self, id: &str) -> Result<(), StudyError> {
        self.delete(&["api", "bookmarks", id]).await
    }

    pub async fn check_bookmark(&self, item_id: &str) -> Result<BookmarkCheck, StudyError> {
        self.get(&["api", "bookmarks", "check", item_id]).await
    }

    // -- Dashboard --

    pub async fn dashboard(&self) -> Result<Dashboard, StudyError> {
        self.get(&["api", "dashboard"]).await
    }

    // -- Profile --

    /// Update the profile server-side, then mirror the returned user into
    /// the session.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, StudyError> {
        if !self.session().is_authenticated() {
            return Err(StudyError::NotAuthenticated);
        }
        let response: ProfileResponse = self.put(&["api", "users", "profile"], update).await?;
        self.session().update_user(response.user.clone()).await?;
        Ok(response.user)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), StudyError> {
        self.put_unit(&["api", "users", "change-password"], change)
            .await
    }
}
