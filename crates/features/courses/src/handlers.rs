use crate::model::{Course, CreateCourse, FILTERABLE_FIELDS, UpdateCourse};
use crate::repository::CourseRepository;
use axum::Json;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use camp_derive::api_handler;
use camp_domain::constants::{COURSE_TABLE, COURSES_TAG};
use camp_identity::CurrentUser;
use camp_kernel::prelude::*;
use camp_kernel::query::filter::Comparison;
use camp_kernel::query::list::{ListParams, execute_list};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_courses))
        .routes(routes!(list_bootcamp_courses, create_course))
        .routes(routes!(get_course, update_course, delete_course))
}

#[api_handler(
    get,
    path = "/courses",
    params(
        ("select" = Option<String>, Query, description = "Comma-separated fields to project"),
        ("sort" = Option<String>, Query, description = "Comma-separated sort keys, `-` prefix for descending"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size"),
    ),
    responses((status = OK, description = "Paged course list", body = ListEnvelope<Course>)),
    tag = COURSES_TAG,
)]
pub(crate) async fn list_courses(
    State(state): State<ApiState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListEnvelope<serde_json::Value>>, ApiError> {
    let params = ListParams::parse(query.as_deref().unwrap_or(""), FILTERABLE_FIELDS)?;
    let result = execute_list::<serde_json::Value>(&state.database, COURSE_TABLE, &params).await?;

    Ok(Json(result.into()))
}

#[api_handler(
    get,
    path = "/bootcamps/{id}/courses",
    params(("id" = String, Path, description = "Parent bootcamp id")),
    responses(
        (status = OK, description = "Courses of one bootcamp", body = ListEnvelope<Course>),
        (status = NOT_FOUND, description = "No bootcamp with this id", body = ErrorBody),
    ),
    tag = COURSES_TAG,
)]
pub(crate) async fn list_bootcamp_courses(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListEnvelope<serde_json::Value>>, ApiError> {
    let id = verify_record_id(id)?;
    let repo = CourseRepository::new(state.database.clone());

    if repo.bootcamp_owner(&id).await?.is_none() {
        return Err(ApiError::not_found(format!("Bootcamp not found with id of {id}")));
    }

    let mut params = ListParams::parse(query.as_deref().unwrap_or(""), FILTERABLE_FIELDS)?;
    params.filter.push("bootcamp", Comparison::Eq, json!(id));

    let result = execute_list::<serde_json::Value>(&state.database, COURSE_TABLE, &params).await?;
    Ok(Json(result.into()))
}

#[api_handler(
    get,
    path = "/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = OK, description = "The course", body = RecordEnvelope<Course>),
        (status = NOT_FOUND, description = "No course with this id", body = ErrorBody),
    ),
    tag = COURSES_TAG,
)]
pub(crate) async fn get_course(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<RecordEnvelope<Course>>, ApiError> {
    let id = verify_record_id(id)?;

    let course = CourseRepository::new(state.database.clone())
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Course not found with id of {id}")))?;

    Ok(Json(RecordEnvelope::new(course)))
}

#[api_handler(
    post,
    path = "/bootcamps/{id}/courses",
    params(("id" = String, Path, description = "Parent bootcamp id")),
    request_body = CreateCourse,
    responses(
        (status = CREATED, description = "Course created", body = RecordEnvelope<Course>),
        (status = NOT_FOUND, description = "No bootcamp with this id", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = COURSES_TAG,
)]
pub(crate) async fn create_course(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateCourse>,
) -> Result<(StatusCode, Json<RecordEnvelope<Course>>), ApiError> {
    let id = verify_record_id(id)?;
    let repo = CourseRepository::new(state.database.clone());

    let owner = repo
        .bootcamp_owner(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Bootcamp not found with id of {id}")))?;
    if !user.can_modify(&owner) {
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to add a course to this bootcamp",
            user.id
        )));
    }

    let course = repo.create(payload, &id, &user.id).await?;
    Ok((StatusCode::CREATED, Json(RecordEnvelope::new(course))))
}

#[api_handler(
    put,
    path = "/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = UpdateCourse,
    responses(
        (status = OK, description = "Updated course", body = RecordEnvelope<Course>),
        (status = NOT_FOUND, description = "No course with this id", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = COURSES_TAG,
)]
pub(crate) async fn update_course(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCourse>,
) -> Result<Json<RecordEnvelope<Course>>, ApiError> {
    let id = verify_record_id(id)?;
    let repo = CourseRepository::new(state.database.clone());

    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Course not found with id of {id}")))?;
    if !user.can_modify(&existing.user) {
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to update this course",
            user.id
        )));
    }

    let patch = serde_json::to_value(&payload).map_err(|e| ApiError::internal(e.to_string()))?;
    let course = repo.merge(&id, patch).await?;

    Ok(Json(RecordEnvelope::new(course)))
}

#[api_handler(
    delete,
    path = "/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = OK, description = "Course deleted and parent aggregate recomputed"),
        (status = NOT_FOUND, description = "No course with this id", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = COURSES_TAG,
)]
pub(crate) async fn delete_course(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<RecordEnvelope<serde_json::Value>>, ApiError> {
    let id = verify_record_id(id)?;
    let repo = CourseRepository::new(state.database.clone());

    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Course not found with id of {id}")))?;
    if !user.can_modify(&existing.user) {
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to delete this course",
            user.id
        )));
    }

    repo.delete(&existing).await?;
    Ok(Json(RecordEnvelope::new(json!({}))))
}
