//! Client side of the catalog: an HTTP binding of the course API plus the
//! view-models that drive the course list and the create/edit form.
//!
//! Views never patch their copy of the catalog. Every successful mutation is
//! followed by a full refetch, so the list only ever shows the last response
//! of `GET /api/courses`.

pub mod card;
pub mod cli;
pub mod form;
pub mod http;
pub mod list_view;
pub mod page;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Course, MessageResponse, NewCourseRequest, ToggleResponse, UpdateCourseRequest};

pub use card::CourseCard;
pub use form::{CourseDraft, CourseForm, FormMessage, FormMode, MessageKind, SubmitOutcome};
pub use http::HttpCourseApi;
pub use list_view::{CourseListView, ListState};
pub use page::CoursesPage;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `error` text.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ClientError>;
    async fn get_course(&self, id: i64) -> Result<Course, ClientError>;
    async fn create_course(&self, req: &NewCourseRequest) -> Result<Course, ClientError>;
    async fn update_course(
        &self,
        id: i64,
        req: &UpdateCourseRequest,
    ) -> Result<MessageResponse, ClientError>;
    async fn toggle_course(&self, id: i64) -> Result<ToggleResponse, ClientError>;
    async fn delete_course(&self, id: i64) -> Result<MessageResponse, ClientError>;
}
