use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::users::{CreateUserRequest, DemoLoginRequest, DemoLoginResponse},
    error::AppResult,
    extract::AppJson,
    models::User,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/", post(create_user))
        .route("/demo/login", post(demo_login))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User and empty cart created", body = ApiResponse<User>),
        (status = 400, description = "Blank or malformed fields"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::create_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/demo/login",
    request_body = DemoLoginRequest,
    responses(
        (status = 200, description = "Existing or newly created demo user", body = DemoLoginResponse),
        (status = 400, description = "Malformed request"),
    ),
    tag = "Users"
)]
pub async fn demo_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DemoLoginRequest>,
) -> AppResult<Json<DemoLoginResponse>> {
    let resp = user_service::demo_login(&state, payload).await?;
    Ok(Json(resp))
}
