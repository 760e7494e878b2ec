//! Shipped data records.

mod billboard;

pub use billboard::{Billboard, BillboardStatus, Inventory};
