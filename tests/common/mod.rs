#![allow(dead_code)]

use course_catalog::db;
use course_catalog::models::NewCourseRequest;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// One connection so every query sees the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn sample_request(title: &str) -> NewCourseRequest {
    NewCourseRequest {
        title: title.to_string(),
        description: "Ownership, borrowing and lifetimes".to_string(),
        instructor: "Ferris".to_string(),
        duration: 12,
        price: 49.99,
        category: "Programming".to_string(),
        is_active: true,
        image_url: None,
    }
}
