mod admission;
mod engine;
mod lifecycle;
mod shared;

pub use admission::{AdmissionPolicy, DEFAULT_MAX_PENDING, Rejection};
pub use engine::{Shop, ShopSnapshot};
pub use lifecycle::OrderState;
pub use shared::SharedShop;
