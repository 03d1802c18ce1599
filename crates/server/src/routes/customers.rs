use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::customer::Customer;
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/customers", tag = "customers",
    responses(
        (status = 200, description = "All customers", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    let list = state.customers.get_customers().await?;
    Ok(Json(list))
}

/// A miss answers 200 with a `null` body.
#[utoipa::path(
    get, path = "/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer, or null when absent", body = crate::openapi::CustomerDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Option<Customer>>, JsonApiError> {
    let found = state.customers.get_customer(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    post, path = "/customers", tag = "customers",
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<Customer>) -> Result<Json<Customer>, JsonApiError> {
    let created = state.customers.create_customer(input).await?;
    info!(id = created.id, name = %created.name, "created customer");
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 200, description = "Replaced (or created at this id)", body = crate::openapi::CustomerDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<Customer>,
) -> Result<Json<Customer>, JsonApiError> {
    let updated = state.customers.update_customer(id, input).await?;
    info!(id = updated.id, "updated customer");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Deleted, or nothing to delete"),
        (status = 500, description = "Database Error")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.customers.delete_customer(id).await?;
    info!(id, "deleted customer");
    Ok(StatusCode::OK)
}
