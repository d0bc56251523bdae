use std::borrow::Cow;
use std::fmt;

use crate::models::Course;

/// Descriptions longer than this many characters are cut and suffixed with `...`.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

pub fn description_preview(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &description[..cut])),
        None => Cow::Borrowed(description),
    }
}

/// Display projection of one course in the list.
#[derive(Debug, Clone, Copy)]
pub struct CourseCard<'a> {
    course: &'a Course,
}

impl<'a> CourseCard<'a> {
    pub fn new(course: &'a Course) -> Self {
        Self { course }
    }

    pub fn id(&self) -> i64 {
        self.course.id
    }

    pub fn title(&self) -> &str {
        &self.course.title
    }

    pub fn description(&self) -> Cow<'a, str> {
        description_preview(&self.course.description)
    }

    pub fn instructor_label(&self) -> String {
        format!("By: {}", self.course.instructor)
    }

    pub fn duration_label(&self) -> String {
        match self.course.duration {
            1 => "1 hour".to_string(),
            hours => format!("{} hours", hours),
        }
    }

    pub fn price_label(&self) -> String {
        format!("${}", self.course.price)
    }

    pub fn category(&self) -> &str {
        &self.course.category
    }

    pub fn is_active(&self) -> bool {
        self.course.is_active
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active() { "Active" } else { "Inactive" }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.course
            .image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

impl fmt::Display for CourseCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {} [{}]", self.id(), self.title(), self.status_label())?;
        if let Some(url) = self.image_url() {
            writeln!(f, "  image: {}", url)?;
        }
        writeln!(f, "  {}", self.description())?;
        write!(
            f,
            "  {} | {} | {} | {}",
            self.instructor_label(),
            self.duration_label(),
            self.category(),
            self.price_label()
        )
    }
}
