use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::order::Order;
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/orders", tag = "orders",
    responses(
        (status = 200, description = "All orders", body = [crate::openapi::OrderDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Order>>, JsonApiError> {
    let list = state.orders.get_orders().await?;
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/orders/{id}", tag = "orders",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order, or null when absent", body = crate::openapi::OrderDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Option<Order>>, JsonApiError> {
    let found = state.orders.get_order(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    post, path = "/orders", tag = "orders",
    request_body = crate::openapi::OrderDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::OrderDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<Order>) -> Result<Json<Order>, JsonApiError> {
    let created = state.orders.create_order(input).await?;
    info!(id = created.id, customer_id = created.customer_id, product = %created.product, "created order");
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/orders/{id}", tag = "orders",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = crate::openapi::OrderDoc,
    responses(
        (status = 200, description = "Replaced (or created at this id)", body = crate::openapi::OrderDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<Order>,
) -> Result<Json<Order>, JsonApiError> {
    let updated = state.orders.update_order(id, input).await?;
    info!(id = updated.id, "updated order");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/orders/{id}", tag = "orders",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Deleted, or nothing to delete"),
        (status = 500, description = "Database Error")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.orders.delete_order(id).await?;
    info!(id, "deleted order");
    Ok(StatusCode::OK)
}
