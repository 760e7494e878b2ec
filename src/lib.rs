//! Al Fares billboard rental quoting service.
//!
//! Server-rendered axum application: billboard inventory with a booking
//! selection, an editable pricing list backed by the pricing resolution
//! engine, and printable offer/invoice documents.

pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod qr;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::Inventory;
use crate::pricing::PricingEngine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PricingEngine>,
    pub inventory: Arc<Inventory>,
    /// Currently selected billboard ids, in selection order.
    booking: Arc<Mutex<Vec<String>>>,
}

impl AppState {
    pub fn new(engine: PricingEngine, inventory: Inventory) -> Self {
        Self {
            engine: Arc::new(engine),
            inventory: Arc::new(inventory),
            booking: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the current selection.
    pub fn selection(&self) -> Vec<String> {
        self.booking_lock().clone()
    }

    /// Add one billboard to the selection; duplicates are ignored.
    pub fn select(&self, id: &str) {
        let mut booking = self.booking_lock();
        if !booking.iter().any(|b| b == id) {
            booking.push(id.to_string());
        }
    }

    pub fn deselect(&self, id: &str) {
        self.booking_lock().retain(|b| b != id);
    }

    pub fn clear_selection(&self) {
        self.booking_lock().clear();
    }

    fn booking_lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.booking.lock().unwrap_or_else(|e| e.into_inner())
    }
}
