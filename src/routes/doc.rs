use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartList, RemovedCartItem},
        orders::{CheckoutReceipt, OrderList},
        products::ProductList,
        users::{CreateUserRequest, DemoLoginRequest, DemoLoginResponse},
    },
    models::{Cart, CartItem, Order, OrderItem, OrderStatus, Product, User},
    response::{ApiResponse, Meta},
    routes::{cart, health, orders, products, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::service_info,
        users::create_user,
        users::demo_login,
        products::list_products,
        products::get_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::remove_from_cart,
        orders::checkout,
        orders::list_orders,
        orders::get_order
    ),
    components(
        schemas(
            User,
            Product,
            Cart,
            CartItem,
            Order,
            OrderItem,
            OrderStatus,
            AddToCartRequest,
            CartList,
            RemovedCartItem,
            CheckoutReceipt,
            OrderList,
            ProductList,
            CreateUserRequest,
            DemoLoginRequest,
            DemoLoginResponse,
            health::HealthData,
            health::ServiceInfo,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartList>,
            ApiResponse<OrderList>,
            ApiResponse<Order>
        )
    ),
    tags(
        (name = "Health", description = "Health check and service information"),
        (name = "Users", description = "User creation and demo login"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Checkout and order history"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
