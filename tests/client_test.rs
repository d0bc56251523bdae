use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use clap::Parser;
use course_catalog::client::card::description_preview;
use course_catalog::client::cli::{self, Assignment, Cli, CliError, Command};
use course_catalog::client::{
    ClientError, CourseApi, CourseCard, CourseForm, CoursesPage, FormMode, ListState,
    MessageKind, SubmitOutcome,
};
use course_catalog::models::{Course, MessageResponse, NewCourseRequest, ToggleResponse};
use course_catalog::validation::Field;

/// In-memory stand-in for the HTTP API that records every call.
#[derive(Default)]
struct FakeCourseApi {
    courses: Mutex<Vec<Course>>,
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
    list_failing: AtomicBool,
}

impl FakeCourseApi {
    fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn set_list_failing(&self, failing: bool) {
        self.list_failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, call: String) -> Result<(), ClientError> {
        let failing = self.failing.load(Ordering::SeqCst)
            || (call == "list" && self.list_failing.load(Ordering::SeqCst));
        self.calls.lock().unwrap().push(call);
        if failing {
            return Err(ClientError::Api {
                status: 500,
                message: "Database error occurred".to_string(),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: "Course not found".to_string(),
        }
    }
}

fn to_course(id: i64, req: &NewCourseRequest) -> Course {
    Course {
        id,
        title: req.title.clone(),
        description: req.description.clone(),
        instructor: req.instructor.clone(),
        duration: req.duration,
        price: req.price,
        category: req.category.clone(),
        is_active: req.is_active,
        image_url: req.image_url.clone(),
    }
}

#[async_trait]
impl CourseApi for FakeCourseApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ClientError> {
        self.record("list".to_string())?;
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn get_course(&self, id: i64) -> Result<Course, ClientError> {
        self.record(format!("get {id}"))?;
        let courses = self.courses.lock().unwrap();
        courses.iter().find(|c| c.id == id).cloned().ok_or_else(Self::not_found)
    }

    async fn create_course(&self, req: &NewCourseRequest) -> Result<Course, ClientError> {
        self.record("create".to_string())?;
        let mut courses = self.courses.lock().unwrap();
        let id = courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let course = to_course(id, req);
        courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        id: i64,
        req: &NewCourseRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.record(format!("update {id}"))?;
        let mut courses = self.courses.lock().unwrap();
        let course = courses.iter_mut().find(|c| c.id == id).ok_or_else(Self::not_found)?;
        *course = to_course(id, req);
        Ok(MessageResponse::new("Course updated"))
    }

    async fn toggle_course(&self, id: i64) -> Result<ToggleResponse, ClientError> {
        self.record(format!("toggle {id}"))?;
        let mut courses = self.courses.lock().unwrap();
        let course = courses.iter_mut().find(|c| c.id == id).ok_or_else(Self::not_found)?;
        course.is_active = !course.is_active;
        Ok(ToggleResponse { id, is_active: course.is_active })
    }

    async fn delete_course(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.record(format!("delete {id}"))?;
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            return Err(Self::not_found());
        }
        Ok(MessageResponse::new("Course deleted"))
    }
}

fn course(id: i64, title: &str) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: "Learn the basics".to_string(),
        instructor: "Ada".to_string(),
        duration: 8,
        price: 25.0,
        category: "Programming".to_string(),
        is_active: true,
        image_url: None,
    }
}

fn fill_valid(form: &mut CourseForm) {
    for (name, value) in [
        ("title", "Rust"),
        ("description", "Systems programming"),
        ("instructor", "Ferris"),
        ("duration", "10"),
        ("price", "9.99"),
        ("category", "Programming"),
    ] {
        form.set(name, value).unwrap();
    }
}

#[tokio::test]
async fn test_invalid_form_makes_no_network_call() {
    let api = FakeCourseApi::default();
    let mut form = CourseForm::create();
    fill_valid(&mut form);
    form.set("title", "").unwrap();
    form.set("duration", "ten").unwrap();
    form.set("price", "-3").unwrap();

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(api.calls().is_empty());
    assert_eq!(form.errors().get(Field::Title), Some("Title is required"));
    assert_eq!(form.errors().get(Field::Duration), Some("Duration must be a positive number"));
    assert_eq!(form.errors().get(Field::Price), Some("Price must be a valid number"));
    assert_eq!(form.errors().len(), 3);
    assert_eq!(form.draft().duration, "ten");
}

#[tokio::test]
async fn test_blank_numbers_are_required() {
    let api = FakeCourseApi::default();
    let mut form = CourseForm::create();
    fill_valid(&mut form);
    form.set("duration", " ").unwrap();
    form.set("price", "").unwrap();

    assert_eq!(form.submit(&api).await, SubmitOutcome::Invalid);
    assert_eq!(form.errors().get(Field::Duration), Some("Duration is required"));
    assert_eq!(form.errors().get(Field::Price), Some("Price is required"));
}

#[tokio::test]
async fn test_changing_a_field_clears_its_error() {
    let api = FakeCourseApi::default();
    let mut form = CourseForm::create();

    form.submit(&api).await;
    assert!(form.errors().get(Field::Title).is_some());
    assert!(form.errors().get(Field::Category).is_some());

    form.set("title", "Rust").unwrap();
    assert!(form.errors().get(Field::Title).is_none());
    assert!(form.errors().get(Field::Category).is_some());
}

#[test]
fn test_unknown_field_is_rejected() {
    let mut form = CourseForm::create();
    assert!(form.set("semester", "Spring").is_err());
    assert!(form.set("is_active", "maybe").is_err());
    form.set("is_active", "false").unwrap();
    assert!(!form.draft().is_active);
}

#[tokio::test]
async fn test_create_resets_draft_and_refetches_list() {
    let api = Arc::new(FakeCourseApi::default());
    let mut page = CoursesPage::new(api.clone());
    page.mount().await;
    assert!(page.list.is_empty());

    fill_valid(&mut page.form);
    page.form.set("image_url", "  ").unwrap();
    let outcome = page.submit_form().await;

    let SubmitOutcome::Saved(Some(created)) = outcome else {
        panic!("expected a created course, got {:?}", outcome);
    };
    assert_eq!(created.title, "Rust");
    assert_eq!(created.duration, 10);
    assert_eq!(created.price, 9.99);
    assert_eq!(created.image_url, None);

    assert_eq!(page.form.draft(), &Default::default());
    assert!(page.form.draft().is_active);
    assert_eq!(page.form.message().unwrap().kind, MessageKind::Success);
    assert_eq!(page.list.courses(), &[created]);
    assert_eq!(api.calls(), vec!["list", "create", "list"]);
}

#[tokio::test]
async fn test_edit_mode_updates_and_keeps_draft() {
    let api = Arc::new(FakeCourseApi::with_courses(vec![course(1, "Old title")]));
    let mut page = CoursesPage::new(api.clone());
    page.mount().await;

    assert!(page.begin_edit(1));
    assert_eq!(page.form.mode(), FormMode::Edit(1));
    assert_eq!(page.form.draft().title, "Old title");
    assert_eq!(page.form.draft().duration, "8");
    assert_eq!(page.form.draft().price, "25");

    page.form.set("title", "New title").unwrap();
    let outcome = page.submit_form().await;

    assert_eq!(outcome, SubmitOutcome::Saved(None));
    assert_eq!(page.form.draft().title, "New title");
    assert_eq!(page.list.courses()[0].title, "New title");
    assert_eq!(page.list.courses()[0].price, 25.0);
    assert_eq!(api.calls(), vec!["list", "update 1", "list"]);

    page.cancel_edit();
    assert_eq!(page.form.mode(), FormMode::Create);
    assert!(!page.begin_edit(99));
}

#[tokio::test]
async fn test_failed_submit_keeps_draft_and_reports() {
    let api = FakeCourseApi::default();
    api.set_failing(true);
    let mut form = CourseForm::create();
    fill_valid(&mut form);

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, SubmitOutcome::Failed("Database error occurred".to_string()));
    assert_eq!(form.draft().title, "Rust");
    let message = form.message().unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert!(message.text.contains("Database error occurred"));
}

#[tokio::test]
async fn test_list_failure_then_retry() {
    let api = Arc::new(FakeCourseApi::with_courses(vec![course(1, "Rust")]));
    let mut page = CoursesPage::new(api.clone());
    assert_eq!(page.list.state(), &ListState::Loading);
    assert_eq!(page.list.render(), "Loading courses...");

    api.set_failing(true);
    page.mount().await;
    assert_eq!(
        page.list.state(),
        &ListState::Failed("Database error occurred".to_string())
    );
    assert!(page.list.courses().is_empty());
    assert!(page.list.render().starts_with("Error: Database error occurred"));

    api.set_failing(false);
    page.list.load().await;
    assert_eq!(page.list.courses().len(), 1);
}

#[tokio::test]
async fn test_delete_refetches_and_failure_alerts() {
    let api = Arc::new(FakeCourseApi::with_courses(vec![course(1, "One"), course(2, "Two")]));
    let mut page = CoursesPage::new(api.clone());
    page.mount().await;
    page.begin_edit(2);

    assert!(page.delete(2).await);
    assert_eq!(page.list.courses(), &[course(1, "One")]);
    assert_eq!(page.form.mode(), FormMode::Create);
    assert!(page.list.alert().is_none());

    assert!(!page.delete(2).await);
    assert_eq!(page.list.alert(), Some("Error deleting course: Course not found"));
    assert_eq!(page.list.courses(), &[course(1, "One")]);
    assert_eq!(api.calls(), vec!["list", "delete 2", "list", "delete 2"]);

    page.list.dismiss_alert();
    assert!(page.list.alert().is_none());
}

#[tokio::test]
async fn test_toggle_refetches_list() {
    let api = Arc::new(FakeCourseApi::with_courses(vec![course(1, "One")]));
    let mut page = CoursesPage::new(api.clone());
    page.mount().await;

    assert!(page.toggle(1).await);
    assert!(!page.list.courses()[0].is_active);
    assert_eq!(page.list.cards()[0].status_label(), "Inactive");
    assert_eq!(api.calls(), vec!["list", "toggle 1", "list"]);
}

#[tokio::test]
async fn test_empty_list_render() {
    let api = Arc::new(FakeCourseApi::default());
    let mut page = CoursesPage::new(api);
    page.mount().await;
    assert!(page.list.render().starts_with("No courses available"));
}

#[test]
fn test_description_preview_truncates_long_text() {
    let long = "x".repeat(150);
    let preview = description_preview(&long);
    assert_eq!(preview.chars().count(), 103);
    assert!(preview.ends_with("..."));

    let exact = "y".repeat(100);
    assert_eq!(description_preview(&exact), exact.as_str());

    let accented = "é".repeat(101);
    assert_eq!(description_preview(&accented), format!("{}...", "é".repeat(100)));
}

#[test]
fn test_course_card_labels() {
    let mut c = course(3, "Rust");
    c.price = 9.99;
    c.image_url = Some("https://example.com/rust.png".to_string());
    let card = CourseCard::new(&c);

    assert_eq!(card.instructor_label(), "By: Ada");
    assert_eq!(card.duration_label(), "8 hours");
    assert_eq!(card.price_label(), "$9.99");
    assert_eq!(card.status_label(), "Active");
    assert_eq!(card.image_url(), Some("https://example.com/rust.png"));

    let rendered = card.to_string();
    assert!(rendered.starts_with("#3 Rust [Active]"));
    assert!(rendered.contains("$9.99"));
}

#[test]
fn test_cli_parses_subcommands() {
    let cli = Cli::try_parse_from(["catalog", "edit", "3", "title=Rust", "price=0"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Edit {
            id: 3,
            fields: vec![
                Assignment { name: "title".to_string(), value: "Rust".to_string() },
                Assignment { name: "price".to_string(), value: "0".to_string() },
            ],
        }
    );

    let cli = Cli::try_parse_from(["catalog", "toggle", "7"]).unwrap();
    assert_eq!(cli.command, Command::Toggle { id: 7 });

    assert!(Cli::try_parse_from(["catalog", "create", "title"]).is_err());
    assert!(Cli::try_parse_from(["catalog", "delete", "seven"]).is_err());
}

#[tokio::test]
async fn test_cli_delete_and_toggle_report_failures() {
    let api = Arc::new(FakeCourseApi::with_courses(vec![course(1, "One")]));
    let mut page = CoursesPage::new(api.clone());

    let err = cli::run(&mut page, Command::Delete { id: 999 }).await.unwrap_err();
    assert!(matches!(&err, CliError::Action(_)));
    assert_eq!(err.to_string(), "Error deleting course: Course not found");

    let err = cli::run(&mut page, Command::Toggle { id: 999 }).await.unwrap_err();
    assert_eq!(err.to_string(), "Error updating course status: Course not found");

    let output = cli::run(&mut page, Command::Toggle { id: 1 }).await.unwrap();
    assert!(output.contains("#1 One [Inactive]"));
    assert_eq!(api.calls(), vec!["delete 999", "toggle 999", "toggle 1", "list"]);
}

#[tokio::test]
async fn test_cli_create_does_not_need_list() {
    let api = Arc::new(FakeCourseApi::default());
    api.set_list_failing(true);
    let mut page = CoursesPage::new(api.clone());

    let fields = [
        ("title", "A"),
        ("description", "B"),
        ("instructor", "C"),
        ("duration", "10"),
        ("price", "9.99"),
        ("category", "D"),
    ]
    .into_iter()
    .map(|(name, value)| Assignment { name: name.to_string(), value: value.to_string() })
    .collect();

    let output = cli::run(&mut page, Command::Create { fields }).await.unwrap();
    assert!(output.starts_with("Course created successfully!"));
    assert_eq!(api.calls(), vec!["create", "list"]);
    assert_eq!(api.courses.lock().unwrap().len(), 1);

    let err = cli::run(&mut page, Command::List).await.unwrap_err();
    assert!(matches!(err, CliError::LoadFailed(_)));
}

#[tokio::test]
async fn test_cli_edit_and_invalid_create() {
    let api = Arc::new(FakeCourseApi::with_courses(vec![course(1, "One")]));
    let mut page = CoursesPage::new(api.clone());

    let err = cli::run(&mut page, Command::Edit { id: 9, fields: vec![] }).await.unwrap_err();
    assert!(matches!(err, CliError::NotFound(9)));

    let fields = vec![Assignment { name: "title".to_string(), value: "Renamed".to_string() }];
    cli::run(&mut page, Command::Edit { id: 1, fields }).await.unwrap();
    assert_eq!(api.courses.lock().unwrap()[0].title, "Renamed");

    let mut page = CoursesPage::new(api.clone());
    let err = cli::run(&mut page, Command::Create { fields: vec![] }).await.unwrap_err();
    assert!(matches!(err, CliError::Invalid(_)));
    assert_eq!(api.courses.lock().unwrap().len(), 1);
}
