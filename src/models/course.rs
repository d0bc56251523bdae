use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{self, Field, FieldErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor: String,
    /// Hours.
    pub duration: i64,
    pub price: f64,
    pub category: String,
    pub is_active: bool,
    pub image_url: Option<String>,
}

/// Body of both create and full update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: i64,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub type UpdateCourseRequest = NewCourseRequest;

fn default_active() -> bool {
    true
}

impl NewCourseRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validation::check_text(&mut errors, Field::Title, &self.title);
        validation::check_text(&mut errors, Field::Description, &self.description);
        validation::check_text(&mut errors, Field::Instructor, &self.instructor);
        validation::check_text(&mut errors, Field::Category, &self.category);
        validation::check_duration(&mut errors, self.duration);
        validation::check_price(&mut errors, self.price);
        errors.into_result()
    }
}

impl From<&Course> for NewCourseRequest {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            instructor: course.instructor.clone(),
            duration: course.duration,
            price: course.price,
            category: course.category.clone(),
            is_active: course.is_active,
            image_url: course.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ToggleResponse {
    pub id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
