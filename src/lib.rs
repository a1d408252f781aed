//! Repair-order workflow for a small bicycle shop.
//!
//! Customers drop off bicycles ([`Shop::accept`]), the shop repairs them in
//! arrival order ([`Shop::repair`]) and customers pick them up again
//! ([`Shop::deliver`]). Lifecycle transitions are reported to an injected
//! [`AuditSink`].

pub mod audit;
pub mod config;
pub mod error;
pub mod order;
pub mod session;
pub mod shop;
pub mod ui;

pub use audit::{AuditEvent, AuditLevel, AuditSink};
pub use error::{OrderError, Result, ShopError};
pub use order::{BicycleType, Order, OrderRequest};
pub use shop::{AdmissionPolicy, OrderState, Rejection, SharedShop, Shop, ShopSnapshot};
