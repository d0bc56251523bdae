use std::sync::Arc;

use clap::Parser;
use course_catalog::client::cli::{self, Cli};
use course_catalog::client::{CoursesPage, HttpCourseApi};
use course_catalog::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let api = Arc::new(HttpCourseApi::new(ClientConfig::from_env())?);
    let mut page = CoursesPage::new(api);

    let output = cli::run(&mut page, args.command).await?;
    println!("{}", output);
    Ok(())
}
