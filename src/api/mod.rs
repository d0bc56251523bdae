use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::{HeaderValue, Method, header};
use axum::routing::patch;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/api/courses/{id}/toggle", patch(toggle_course))
        .with_state(state)
}

/// Router with request tracing and a CORS policy admitting `allowed_origin` only.
pub fn app(state: AppState, allowed_origin: HeaderValue) -> Router {
    router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(allowed_origin)),
    )
}

pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Course>, AppError> {
    let id = course_id(id)?;
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

async fn create_course(
    State(state): State<AppState>,
    req: Result<Json<NewCourseRequest>, JsonRejection>,
) -> Result<Json<Course>, AppError> {
    let req = course_body(req)?;
    let course = repository::insert_course(&state.db, req).await?;
    info!("created course {}", course.id);
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    req: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = course_id(id)?;
    let req = course_body(req)?;
    repository::update_course(&state.db, id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    info!("updated course {}", id);
    Ok(Json(MessageResponse::new("Course updated")))
}

async fn toggle_course(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ToggleResponse>, AppError> {
    let id = course_id(id)?;
    let toggled = repository::toggle_course(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    info!("course {} is_active -> {}", id, toggled.is_active);
    Ok(Json(toggled))
}

async fn delete_course(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = course_id(id)?;
    if repository::delete_course(&state.db, id).await? {
        info!("deleted course {}", id);
        Ok(Json(MessageResponse::new("Course deleted")))
    } else {
        Err(AppError::NotFound)
    }
}

fn course_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn course_body(req: Result<Json<NewCourseRequest>, JsonRejection>) -> Result<NewCourseRequest, AppError> {
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.body_text()))?;
    req.validate().map_err(AppError::Validation)?;
    Ok(req)
}
