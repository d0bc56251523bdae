use std::sync::Arc;

use crate::client::{CourseApi, CourseForm, CourseListView, FormMode, SubmitOutcome};

/// The courses screen: the form beside the list.
pub struct CoursesPage {
    api: Arc<dyn CourseApi>,
    pub list: CourseListView,
    pub form: CourseForm,
}

impl CoursesPage {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self {
            list: CourseListView::new(api.clone()),
            form: CourseForm::create(),
            api,
        }
    }

    pub async fn mount(&mut self) {
        self.list.load().await;
    }

    /// Submits the form and refetches the list when the save succeeds.
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit(self.api.as_ref()).await;
        if outcome.is_saved() {
            self.list.load().await;
        }
        outcome
    }

    /// Switches the form to edit mode for a listed course.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.list.find(id) {
            Some(course) => {
                self.form = CourseForm::edit(course);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form = CourseForm::create();
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        let deleted = self.list.delete(id).await;
        if deleted && self.form.mode() == FormMode::Edit(id) {
            self.cancel_edit();
        }
        deleted
    }

    pub async fn toggle(&mut self, id: i64) -> bool {
        self.list.toggle(id).await
    }

    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.form.render(), self.list.render())
    }
}
