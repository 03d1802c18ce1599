use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Wire shape of `models::customer::Model`. `id` is ignored on input.
#[derive(Serialize, ToSchema)]
pub struct CustomerDoc {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Wire shape of `models::order::Model`. `customerId` is not checked.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDoc {
    pub id: Option<i64>,
    pub customer_id: i64,
    pub product: String,
    pub quantity: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list,
        crate::routes::customers::get,
        crate::routes::customers::create,
        crate::routes::customers::update,
        crate::routes::customers::delete,
        crate::routes::orders::list,
        crate::routes::orders::get,
        crate::routes::orders::create,
        crate::routes::orders::update,
        crate::routes::orders::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerDoc,
            OrderDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "orders")
    )
)]
pub struct ApiDoc;
