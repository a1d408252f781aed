use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::admission::Rejection;
use super::engine::{Shop, ShopSnapshot};
use crate::order::Order;

/// A [`Shop`] that several callers can drive at once.
///
/// Every operation holds one lock for its whole duration: the admission
/// rules and the lifecycle transitions read and write both queues together.
/// Clones share the same shop.
#[derive(Debug, Clone)]
pub struct SharedShop {
    inner: Arc<Mutex<Shop>>,
}

impl SharedShop {
    pub fn new(shop: Shop) -> Self {
        Self {
            inner: Arc::new(Mutex::new(shop)),
        }
    }

    pub fn accept(&self, order: Order) -> bool {
        self.lock().accept(order)
    }

    pub fn try_accept(&self, order: Order) -> Result<(), Rejection> {
        self.lock().try_accept(order)
    }

    pub fn repair(&self) -> Option<Order> {
        self.lock().repair()
    }

    pub fn deliver(&self, customer: &str) -> Option<Order> {
        self.lock().deliver(customer)
    }

    pub fn snapshot(&self) -> ShopSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the shop.
    pub fn with<R>(&self, f: impl FnOnce(&mut Shop) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Shop> {
        self.inner.lock()
    }
}

impl From<Shop> for SharedShop {
    fn from(shop: Shop) -> Self {
        Self::new(shop)
    }
}
