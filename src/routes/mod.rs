//! HTTP route handlers.

pub mod billboards;
pub mod documents;
pub mod pricing;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(billboards::list))
        .route("/booking/add", post(billboards::add_to_booking))
        .route("/booking/remove", post(billboards::remove_from_booking))
        .route("/booking/clear", post(billboards::clear_booking))
        .route("/pricing", get(pricing::list))
        .route("/pricing/override", post(pricing::set_override))
        .route("/documents/offer", get(documents::offer))
        .route("/documents/invoice", get(documents::invoice))
}
