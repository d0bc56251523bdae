use sqlx::SqlitePool;

use crate::models::{Course, NewCourseRequest, ToggleResponse, UpdateCourseRequest};

const COURSE_COLUMNS: &str =
    "id, title, description, instructor, duration, price, category, is_active, image_url";

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses ORDER BY id ASC"
    ))
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_course(
    db: &SqlitePool,
    req: NewCourseRequest,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        r#"
        INSERT INTO courses
            (title, description, instructor, duration, price, category, is_active, image_url)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING {COURSE_COLUMNS}
        "#
    ))
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.instructor)
    .bind(req.duration)
    .bind(req.price)
    .bind(&req.category)
    .bind(req.is_active)
    .bind(&req.image_url)
    .fetch_one(db)
    .await
}

/// Overwrites every mutable column. `None` when no row has `id`.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    req: UpdateCourseRequest,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        r#"
        UPDATE courses
        SET title = ?1,
            description = ?2,
            instructor = ?3,
            duration = ?4,
            price = ?5,
            category = ?6,
            is_active = ?7,
            image_url = ?8
        WHERE id = ?9
        RETURNING {COURSE_COLUMNS}
        "#
    ))
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.instructor)
    .bind(req.duration)
    .bind(req.price)
    .bind(&req.category)
    .bind(req.is_active)
    .bind(&req.image_url)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Flips `is_active` in a single statement so concurrent toggles never lose a flip.
pub async fn toggle_course(db: &SqlitePool, id: i64) -> Result<Option<ToggleResponse>, sqlx::Error> {
    sqlx::query_as::<_, ToggleResponse>(
        r#"
        UPDATE courses
        SET is_active = NOT is_active
        WHERE id = ?1
        RETURNING id, is_active
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
