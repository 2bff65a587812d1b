use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::hello::health,
        crate::api::hello::root,
        crate::api::hello::api_v1,
    ),
    components(
        schemas(
            axum_helpers::ErrorResponse,
            crate::api::hello::HealthResponse,
            crate::api::hello::WelcomeResponse,
            crate::api::hello::ApiV1Response,
        )
    ),
    info(
        title = "Hello World API",
        version = "1.0.0",
        description = "Hello World API with a users resource"
    ),
    nest(
        (path = crate::api::USERS_PATH, api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
