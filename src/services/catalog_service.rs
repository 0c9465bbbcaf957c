use crate::{
    dto::products::ProductList,
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
    store::{CatalogStore, OrmStore},
};

pub async fn find_product<S: CatalogStore>(store: &S, id: i32) -> AppResult<Product> {
    store.product(id).await?.ok_or(AppError::NotFound("Product"))
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = OrmStore::new(&state.orm).products().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_product(&OrmStore::new(&state.orm), id).await?;
    Ok(ApiResponse::success("Product", product, Some(Meta::empty())))
}
