use thiserror::Error;

use crate::client::CourseApi;
use crate::models::{Course, NewCourseRequest};
use crate::validation::{self, Field, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Raw input values, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub price: String,
    pub category: String,
    pub is_active: bool,
    pub image_url: String,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            instructor: String::new(),
            duration: String::new(),
            price: String::new(),
            category: String::new(),
            is_active: true,
            image_url: String::new(),
        }
    }
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            instructor: course.instructor.clone(),
            duration: course.duration.to_string(),
            price: course.price.to_string(),
            category: course.category.clone(),
            is_active: course.is_active,
            image_url: course.image_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("is_active must be true or false, got {0:?}")]
    InvalidFlag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Rejected locally; nothing was sent.
    Invalid,
    /// Saved. Carries the created course in create mode.
    Saved(Option<Course>),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

pub struct CourseForm {
    mode: FormMode,
    draft: CourseDraft,
    errors: FieldErrors,
    message: Option<FormMessage>,
}

impl CourseForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CourseDraft::default(),
            errors: FieldErrors::new(),
            message: None,
        }
    }

    pub fn edit(course: &Course) -> Self {
        Self {
            mode: FormMode::Edit(course.id),
            draft: CourseDraft::from(course),
            errors: FieldErrors::new(),
            message: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Sets one input by name. Editing a field clears its error.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        match name {
            "is_active" => {
                let active = match value.trim() {
                    "true" | "1" | "yes" | "on" => true,
                    "false" | "0" | "no" | "off" => false,
                    other => return Err(FormError::InvalidFlag(other.to_string())),
                };
                self.set_active(active);
                return Ok(());
            }
            "image_url" => {
                self.draft.image_url = value.to_string();
                return Ok(());
            }
            _ => {}
        }

        let field = Field::parse(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let slot = match field {
            Field::Title => &mut self.draft.title,
            Field::Description => &mut self.draft.description,
            Field::Instructor => &mut self.draft.instructor,
            Field::Duration => &mut self.draft.duration,
            Field::Price => &mut self.draft.price,
            Field::Category => &mut self.draft.category,
        };
        *slot = value.to_string();
        self.errors.remove(field);
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.draft.is_active = active;
    }

    /// Checks the draft and converts it into a request body.
    pub fn validate(&self) -> Result<NewCourseRequest, FieldErrors> {
        let draft = &self.draft;
        let mut errors = FieldErrors::new();
        validation::check_text(&mut errors, Field::Title, &draft.title);
        validation::check_text(&mut errors, Field::Description, &draft.description);
        validation::check_text(&mut errors, Field::Instructor, &draft.instructor);
        validation::check_text(&mut errors, Field::Category, &draft.category);
        let duration = validation::parse_duration(&mut errors, &draft.duration);
        let price = validation::parse_price(&mut errors, &draft.price);

        match (duration, price) {
            (Some(duration), Some(price)) if errors.is_empty() => Ok(NewCourseRequest {
                title: draft.title.clone(),
                description: draft.description.clone(),
                instructor: draft.instructor.clone(),
                duration,
                price,
                category: draft.category.clone(),
                is_active: draft.is_active,
                image_url: Some(draft.image_url.trim())
                    .filter(|url| !url.is_empty())
                    .map(str::to_string),
            }),
            _ => Err(errors),
        }
    }

    /// Validates, then creates or updates depending on the mode. An invalid
    /// draft never reaches `api`.
    pub async fn submit(&mut self, api: &dyn CourseApi) -> SubmitOutcome {
        self.message = None;

        let req = match self.validate() {
            Ok(req) => req,
            Err(errors) => {
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };
        self.errors.clear();

        let result = match self.mode {
            FormMode::Create => api.create_course(&req).await.map(Some),
            FormMode::Edit(id) => api.update_course(id, &req).await.map(|_| None),
        };

        match result {
            Ok(created) => {
                let text = match self.mode {
                    FormMode::Create => {
                        self.draft = CourseDraft::default();
                        "Course created successfully!"
                    }
                    FormMode::Edit(_) => "Course updated successfully!",
                };
                self.message = Some(FormMessage {
                    kind: MessageKind::Success,
                    text: text.to_string(),
                });
                SubmitOutcome::Saved(created)
            }
            Err(e) => {
                self.message = Some(FormMessage {
                    kind: MessageKind::Error,
                    text: format!("Error saving course: {}", e),
                });
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn render(&self) -> String {
        let heading = match self.mode {
            FormMode::Create => "Create new course".to_string(),
            FormMode::Edit(id) => format!("Edit course #{}", id),
        };
        let mut lines = vec![heading];
        let inputs = [
            (Field::Title, &self.draft.title),
            (Field::Description, &self.draft.description),
            (Field::Instructor, &self.draft.instructor),
            (Field::Category, &self.draft.category),
            (Field::Duration, &self.draft.duration),
            (Field::Price, &self.draft.price),
        ];
        for (field, value) in inputs {
            lines.push(format!("  {}: {}", field, value));
            if let Some(error) = self.errors.get(field) {
                lines.push(format!("    ! {}", error));
            }
        }
        lines.push(format!("  is_active: {}", self.draft.is_active));
        if let Some(message) = &self.message {
            lines.push(message.text.clone());
        }
        lines.join("\n")
    }
}
