use actix_web::{web, HttpResponse};

use super::errors::ApiError;
use crate::domain::customer::NewCustomer;
use crate::metrics::Metrics;
use crate::store::CustomerStore;

// ============================================================================
// Customer Handlers
// ============================================================================
//
// POST /api/customers  -> 201 + created record
// GET  /api/customers  -> 200 + every record
//
// Store errors are logged and forwarded to ApiError untouched.
//
// ============================================================================

pub async fn create_customer(
    store: web::Data<dyn CustomerStore>,
    metrics: web::Data<Metrics>,
    payload: web::Json<NewCustomer>,
) -> Result<HttpResponse, ApiError> {
    let _timer = metrics.start_timer("create");

    let result = store.create(payload.into_inner()).await;
    metrics.observe("create", &result);

    let customer = result.map_err(|e| {
        tracing::error!(operation = e.operation(), error = ?e, "Failed to create customer");
        e
    })?;

    metrics.customers_created.inc();
    tracing::info!(customer_id = %customer.id, "✅ Customer created");

    Ok(HttpResponse::Created().json(customer))
}

pub async fn get_all_customers(
    store: web::Data<dyn CustomerStore>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, ApiError> {
    let _timer = metrics.start_timer("list");

    let result = store.find_all().await;
    metrics.observe("list", &result);

    let customers = result.map_err(|e| {
        tracing::error!(operation = e.operation(), error = ?e, "Failed to list customers");
        e
    })?;

    tracing::debug!(count = customers.len(), "Listed customers");
    Ok(HttpResponse::Ok().json(customers))
}
