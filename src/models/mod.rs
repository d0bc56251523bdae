pub mod course;

pub use course::{Course, MessageResponse, NewCourseRequest, ToggleResponse, UpdateCourseRequest};
