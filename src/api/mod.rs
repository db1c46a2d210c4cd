mod customers;
mod errors;

use actix_web::web;

pub use customers::{create_customer, get_all_customers};
pub use errors::ApiError;

use crate::metrics::{health_handler, Metrics};

/// Mount the customer routes and the health probe.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/customers")
            .route(web::post().to(create_customer))
            .route(web::get().to(get_all_customers)),
    )
    .route("/health", web::get().to(health_handler));
}

/// JSON extractor settings: body size limit, and rejections rendered as 400
/// with the same `{"error": ...}` body as every other failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, req| {
            tracing::warn!(error = %err, "Rejected customer payload");
            // Only the create route takes a JSON body.
            if let Some(metrics) = req.app_data::<web::Data<Metrics>>() {
                metrics.observe_rejected("create");
            }
            ApiError::BadRequest(err.to_string()).into()
        })
}
