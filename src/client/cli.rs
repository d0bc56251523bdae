//! Command line front-end over [`CoursesPage`].

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::client::form::FormError;
use crate::client::{CoursesPage, ListState, SubmitOutcome};

/// Manage the course catalog from a terminal
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print every course
    List,

    /// Create a course from field=value pairs
    Create {
        /// title description instructor duration price category is_active image_url
        #[arg(value_parser = parse_assignment)]
        fields: Vec<Assignment>,
    },

    /// Change fields of an existing course
    Edit {
        id: i64,
        #[arg(value_parser = parse_assignment)]
        fields: Vec<Assignment>,
    },

    /// Flip a course between active and inactive
    Toggle { id: i64 },

    /// Remove a course
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got {:?}", raw))?;
    Ok(Assignment {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not load courses: {0}")]
    LoadFailed(String),

    #[error("course {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Form(#[from] FormError),

    /// The draft failed validation; carries the rendered form.
    #[error("the course was not saved\n{0}")]
    Invalid(String),

    #[error("{0}")]
    Action(String),
}

/// Runs one command and returns what should be printed.
pub async fn run(page: &mut CoursesPage, command: Command) -> Result<String, CliError> {
    match command {
        Command::List => {
            load(page).await?;
            Ok(page.list.render())
        }
        Command::Create { fields } => {
            apply(page, &fields)?;
            submit(page).await
        }
        Command::Edit { id, fields } => {
            load(page).await?;
            if !page.begin_edit(id) {
                return Err(CliError::NotFound(id));
            }
            apply(page, &fields)?;
            submit(page).await
        }
        Command::Toggle { id } => {
            if !page.toggle(id).await {
                return Err(action_failed(page));
            }
            Ok(page.list.render())
        }
        Command::Delete { id } => {
            if !page.delete(id).await {
                return Err(action_failed(page));
            }
            Ok(page.list.render())
        }
    }
}

async fn load(page: &mut CoursesPage) -> Result<(), CliError> {
    page.mount().await;
    match page.list.state() {
        ListState::Failed(message) => Err(CliError::LoadFailed(message.clone())),
        _ => Ok(()),
    }
}

fn apply(page: &mut CoursesPage, fields: &[Assignment]) -> Result<(), CliError> {
    for field in fields {
        page.form.set(&field.name, &field.value)?;
    }
    Ok(())
}

async fn submit(page: &mut CoursesPage) -> Result<String, CliError> {
    match page.submit_form().await {
        SubmitOutcome::Invalid => Err(CliError::Invalid(page.form.render())),
        SubmitOutcome::Failed(message) => Err(CliError::Action(message)),
        SubmitOutcome::Saved(_) => {
            let message = page
                .form
                .message()
                .map(|m| m.text.clone())
                .unwrap_or_default();
            Ok(format!("{}\n\n{}", message, page.list.render()))
        }
    }
}

fn action_failed(page: &CoursesPage) -> CliError {
    CliError::Action(page.list.alert().unwrap_or("request failed").to_string())
}
