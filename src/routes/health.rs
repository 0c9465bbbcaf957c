use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::response::{ApiResponse, Meta};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct EndpointMap {
    pub health: &'static str,
    pub demo_login: &'static str,
    pub products: &'static str,
    pub cart: &'static str,
    pub checkout: &'static str,
    pub orders: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
    pub endpoints: EndpointMap,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ApiResponse<ServiceInfo>),
    ),
    tag = "Health"
)]
pub async fn service_info() -> Json<ApiResponse<ServiceInfo>> {
    let data = ServiceInfo {
        name: "Inventory System API",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/docs",
        endpoints: EndpointMap {
            health: "/health",
            demo_login: "/demo/login",
            products: "/products",
            cart: "/users/{user_id}/cart",
            checkout: "/users/{user_id}/checkout",
            orders: "/users/{user_id}/orders",
        },
    };

    Json(ApiResponse::success(
        "Inventory System API",
        data,
        Some(Meta::empty()),
    ))
}
