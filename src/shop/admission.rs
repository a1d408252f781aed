use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::order::{BicycleType, Order};

/// Default cap on the number of pending orders.
pub const DEFAULT_MAX_PENDING: usize = 5;

/// Why an order was turned away at the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The shop does not repair this kind of bicycle.
    RefusedBicycleType(BicycleType),
    /// The customer already has an order waiting in the queue.
    CustomerAlreadyPending(String),
    /// The pending queue is at capacity.
    QueueFull { capacity: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::RefusedBicycleType(ty) => write!(f, "{ty} bicycles are not repaired here"),
            Rejection::CustomerAlreadyPending(customer) => {
                write!(f, "{customer} already has a pending order")
            }
            Rejection::QueueFull { capacity } => {
                write!(f, "pending queue is full ({capacity} orders)")
            }
        }
    }
}

/// The rules that decide whether an order may join the pending queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    /// Bicycle types the shop refuses, checked in this order.
    pub refused_types: Vec<BicycleType>,
    /// Maximum number of pending orders at any time.
    pub max_pending: usize,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            refused_types: vec![BicycleType::Gravel, BicycleType::Ebike],
            max_pending: DEFAULT_MAX_PENDING,
        }
    }
}

impl AdmissionPolicy {
    /// Evaluate `order` against the current queue.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// refused bicycle types, then one pending order per customer, then the
    /// queue cap.
    pub fn check(&self, order: &Order, pending: &VecDeque<Order>) -> Result<(), Rejection> {
        if let Some(ty) = self
            .refused_types
            .iter()
            .find(|&&ty| ty == order.bicycle_type())
        {
            return Err(Rejection::RefusedBicycleType(*ty));
        }

        if pending.iter().any(|p| p.customer() == order.customer()) {
            return Err(Rejection::CustomerAlreadyPending(
                order.customer().to_string(),
            ));
        }

        if pending.len() >= self.max_pending {
            return Err(Rejection::QueueFull {
                capacity: self.max_pending,
            });
        }

        Ok(())
    }
}
