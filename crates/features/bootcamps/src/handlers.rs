use crate::Bootcamps;
use crate::error::BootcampError;
use crate::model::{Bootcamp, CreateBootcamp, FILTERABLE_FIELDS, Location, UpdateBootcamp, slugify};
use crate::photo::{UPLOADS_DIR, check_size, photo_file_name};
use crate::repository::BootcampRepository;
use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use camp_derive::{api_handler, api_model};
use camp_domain::constants::{BOOTCAMP_TABLE, BOOTCAMPS_TAG};
use camp_domain::geo::radius_meters_from_miles;
use camp_identity::CurrentUser;
use camp_kernel::prelude::*;
use camp_kernel::query::list::{ListParams, execute_list};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Wire shape of the radius-search response.
#[api_model(deny_unknown_fields = false)]
pub struct RadiusEnvelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Bootcamp>,
}

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_bootcamps, create_bootcamp))
        .routes(routes!(get_bootcamp, update_bootcamp, delete_bootcamp))
        .routes(routes!(bootcamps_in_radius))
        .routes(routes!(upload_bootcamp_photo))
}

#[api_handler(
    get,
    path = "/bootcamps",
    params(
        ("select" = Option<String>, Query, description = "Comma-separated fields to project"),
        ("sort" = Option<String>, Query, description = "Comma-separated sort keys, `-` prefix for descending"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size"),
    ),
    responses((status = OK, description = "Paged bootcamp list", body = ListEnvelope<Bootcamp>)),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn list_bootcamps(
    State(state): State<ApiState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListEnvelope<serde_json::Value>>, ApiError> {
    let params = ListParams::parse(query.as_deref().unwrap_or(""), FILTERABLE_FIELDS)?;
    let result =
        execute_list::<serde_json::Value>(&state.database, BOOTCAMP_TABLE, &params).await?;

    Ok(Json(result.into()))
}

#[api_handler(
    get,
    path = "/bootcamps/{id}",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = OK, description = "The bootcamp", body = RecordEnvelope<Bootcamp>),
        (status = NOT_FOUND, description = "No bootcamp with this id", body = ErrorBody),
    ),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn get_bootcamp(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<RecordEnvelope<Bootcamp>>, ApiError> {
    let id = verify_record_id(id)?;

    let bootcamp = BootcampRepository::new(state.database.clone())
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Bootcamp not found with id of {id}")))?;

    Ok(Json(RecordEnvelope::new(bootcamp)))
}

#[api_handler(
    post,
    path = "/bootcamps",
    request_body = CreateBootcamp,
    responses(
        (status = CREATED, description = "Bootcamp created", body = RecordEnvelope<Bootcamp>),
        (status = BAD_REQUEST, description = "Second bootcamp for a non-admin publisher", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn create_bootcamp(
    State(state): State<ApiState>,
    user: CurrentUser,
    Json(payload): Json<CreateBootcamp>,
) -> Result<(StatusCode, Json<RecordEnvelope<Bootcamp>>), ApiError> {
    if !user.role.can_publish() {
        return Err(ApiError::forbidden(format!(
            "User role '{}' is not authorized to publish bootcamps",
            user.role
        )));
    }

    let repo = BootcampRepository::new(state.database.clone());

    // Publishers get exactly one bootcamp; admins are unrestricted.
    if !user.role.is_admin() && repo.count_owned_by(&user.id).await? > 0 {
        return Err(ApiError::bad_request(format!(
            "The user with ID {} has already published a bootcamp",
            user.id
        )));
    }

    let slice = state.try_get_slice::<Bootcamps>()?;
    let point = slice
        .geocoder
        .resolve_postal_code(&payload.zipcode)
        .await
        .map_err(BootcampError::from)?;
    let location = Location::from_point(point, payload.address.clone(), payload.zipcode.clone());

    let bootcamp = repo.create(payload, location, &user.id).await?;

    Ok((StatusCode::CREATED, Json(RecordEnvelope::new(bootcamp))))
}

#[api_handler(
    put,
    path = "/bootcamps/{id}",
    params(("id" = String, Path, description = "Bootcamp id")),
    request_body = UpdateBootcamp,
    responses(
        (status = OK, description = "Updated bootcamp", body = RecordEnvelope<Bootcamp>),
        (status = NOT_FOUND, description = "No bootcamp with this id", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn update_bootcamp(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBootcamp>,
) -> Result<Json<RecordEnvelope<Bootcamp>>, ApiError> {
    let id = verify_record_id(id)?;
    let repo = BootcampRepository::new(state.database.clone());

    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Bootcamp not found with id of {id}")))?;
    if !user.can_modify(&existing.user) {
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to update this bootcamp",
            user.id
        )));
    }

    let mut patch = serde_json::to_value(&payload)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    // `address`/`zipcode` fold into the geocoded location, never the root.
    if let Some(object) = patch.as_object_mut() {
        object.remove("address");
        object.remove("zipcode");
    }
    if let Some(name) = &payload.name {
        patch["slug"] = json!(slugify(name));
    }
    if let Some(zipcode) = &payload.zipcode {
        let slice = state.try_get_slice::<Bootcamps>()?;
        let point = slice
            .geocoder
            .resolve_postal_code(zipcode)
            .await
            .map_err(BootcampError::from)?;
        let location = Location::from_point(point, payload.address.clone(), zipcode.clone());
        patch["location"] =
            serde_json::to_value(location).map_err(|e| ApiError::internal(e.to_string()))?;
    }

    let bootcamp = repo.merge(&id, patch).await?;
    Ok(Json(RecordEnvelope::new(bootcamp)))
}

#[api_handler(
    delete,
    path = "/bootcamps/{id}",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = OK, description = "Bootcamp and its courses deleted"),
        (status = NOT_FOUND, description = "No bootcamp with this id", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn delete_bootcamp(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<RecordEnvelope<serde_json::Value>>, ApiError> {
    let id = verify_record_id(id)?;
    let repo = BootcampRepository::new(state.database.clone());

    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Bootcamp not found with id of {id}")))?;
    if !user.can_modify(&existing.user) {
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to delete this bootcamp",
            user.id
        )));
    }

    repo.delete(&id).await?;
    Ok(Json(RecordEnvelope::new(json!({}))))
}

#[api_handler(
    get,
    path = "/bootcamps/radius/{zipcode}/{distance}",
    params(
        ("zipcode" = String, Path, description = "Postal code at the circle's center"),
        ("distance" = f64, Path, description = "Radius in miles"),
    ),
    responses((status = OK, description = "Bootcamps within the radius", body = RadiusEnvelope)),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn bootcamps_in_radius(
    State(state): State<ApiState>,
    Path((zipcode, distance)): Path<(String, f64)>,
) -> Result<Json<RadiusEnvelope>, ApiError> {
    let slice = state.try_get_slice::<Bootcamps>()?;
    let center = slice
        .geocoder
        .resolve_postal_code(&zipcode)
        .await
        .map_err(BootcampError::from)?;

    let bootcamps = BootcampRepository::new(state.database.clone())
        .within_radius(center, radius_meters_from_miles(distance))
        .await?;

    Ok(Json(RadiusEnvelope { success: true, count: bootcamps.len(), data: bootcamps }))
}

#[api_handler(
    put,
    path = "/bootcamps/{id}/photo",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = OK, description = "Stored photo file name", body = RecordEnvelope<String>),
        (status = BAD_REQUEST, description = "Missing file, wrong type, or oversized", body = ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = BOOTCAMPS_TAG,
)]
pub(crate) async fn upload_bootcamp_photo(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<RecordEnvelope<String>>, ApiError> {
    let id = verify_record_id(id)?;
    let repo = BootcampRepository::new(state.database.clone());

    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Bootcamp not found with id of {id}")))?;
    if !user.can_modify(&existing.user) {
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to update this bootcamp",
            user.id
        )));
    }

    let slice = state.try_get_slice::<Bootcamps>()?;

    let mut stored = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let original_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("Could not read the uploaded file"))?;

        let file_name = photo_file_name(&id, original_name.as_deref(), content_type.as_deref())?;
        check_size(data.len(), slice.max_file_size)?;

        slice
            .storage
            .write(format!("{UPLOADS_DIR}/{file_name}"), &data)
            .await
            .map_err(BootcampError::from)?;
        repo.set_photo(&id, &file_name).await?;

        stored = Some(file_name);
        break;
    }

    let file_name = stored.ok_or_else(|| ApiError::bad_request("Please upload a file"))?;
    Ok(Json(RecordEnvelope::new(file_name)))
}
