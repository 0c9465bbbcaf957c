use inventory_api::routes::health::{health_check, service_info};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn service_info_lists_entry_points() {
    let response = service_info().await;
    let data = response.0.data.expect("service info");
    assert_eq!(data.docs, "/docs");
    assert_eq!(data.endpoints.products, "/products");
    assert_eq!(data.endpoints.demo_login, "/demo/login");
}
