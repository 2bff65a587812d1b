use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ErrorResponse, QueryParams, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, ConflictResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::UserId;
use crate::error::ServiceResult;
use crate::models::{ActivityResponse, CreateUser, EmailQuery, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_user,
        get_user_by_email,
        get_user,
        update_user,
        delete_user,
        get_user_activity,
    ),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, ActivityResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_user_by_email::<R>).post(create_user::<R>))
        .route(
            "/{id}",
            get(get_user::<R>)
                .put(update_user::<R>)
                .delete(delete_user::<R>),
        )
        .route("/{id}/active", get(get_user_activity::<R>))
        .with_state(shared_service)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> ServiceResult<impl IntoResponse> {
    let user = service.create_user(&input.email, &input.name).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Look a user up by email
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Missing or malformed email query", body = ErrorResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<EmailQuery>,
) -> ServiceResult<Json<UserResponse>> {
    let user = service.get_user_by_email(&query.email).await?;
    Ok(Json(user.into()))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> ServiceResult<Json<UserResponse>> {
    let user = service.get_user_by_id(&UserId::from(id)).await?;
    Ok(Json(user.into()))
}

/// Replace a user's email and name
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> ServiceResult<Json<UserResponse>> {
    let user = service
        .update_user(&UserId::from(id), &input.email, &input.name)
        .await?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    service.delete_user(&UserId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Whether a user is active
#[utoipa::path(
    get,
    path = "/{id}/active",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Activity flag", body = ActivityResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user_activity<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> ServiceResult<Json<ActivityResponse>> {
    let id = UserId::from(id);
    let active = service.is_user_active(&id).await?;
    Ok(Json(ActivityResponse {
        id: id.to_string(),
        active,
    }))
}
