use std::sync::Arc;

use tracing::warn;

use crate::client::{CourseApi, CourseCard};
use crate::models::Course;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Course>),
    Failed(String),
}

pub struct CourseListView {
    api: Arc<dyn CourseApi>,
    state: ListState,
    alert: Option<String>,
}

impl CourseListView {
    /// Starts in `Loading`; call [`CourseListView::load`] to mount.
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self {
            api,
            state: ListState::Loading,
            alert: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Last fetched courses; empty unless the last fetch succeeded.
    pub fn courses(&self) -> &[Course] {
        match &self.state {
            ListState::Loaded(courses) => courses,
            _ => &[],
        }
    }

    pub fn find(&self, id: i64) -> Option<&Course> {
        self.courses().iter().find(|c| c.id == id)
    }

    pub fn cards(&self) -> Vec<CourseCard<'_>> {
        self.courses().iter().map(CourseCard::new).collect()
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.state, ListState::Loaded(courses) if courses.is_empty())
    }

    /// Message from the last failed action, shown until dismissed.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Fetches the whole catalog. Also serves as the manual retry.
    pub async fn load(&mut self) {
        self.state = ListState::Loading;
        self.state = match self.api.list_courses().await {
            Ok(courses) => ListState::Loaded(courses),
            Err(e) => {
                warn!("failed to load courses: {}", e);
                ListState::Failed(e.to_string())
            }
        };
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        self.alert = None;
        match self.api.delete_course(id).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.alert = Some(format!("Error deleting course: {}", e));
                false
            }
        }
    }

    pub async fn toggle(&mut self, id: i64) -> bool {
        self.alert = None;
        match self.api.toggle_course(id).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.alert = Some(format!("Error updating course status: {}", e));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = match &self.state {
            ListState::Loading => "Loading courses...".to_string(),
            ListState::Failed(message) => format!("Error: {}\n[retry]", message),
            ListState::Loaded(courses) if courses.is_empty() => {
                "No courses available\nCreate your first course using the form".to_string()
            }
            ListState::Loaded(_) => self
                .cards()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n\n"),
        };
        if let Some(alert) = &self.alert {
            out = format!("! {}\n{}", alert, out);
        }
        out
    }
}
