use std::fmt;

use serde::{Deserialize, Serialize};

/// The states a repair order moves through.
///
/// Each order flows through: CREATED → PENDING → COMPLETED → DELIVERED.
/// Only PENDING and COMPLETED are held by the shop; DELIVERED orders are
/// dropped without a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    Created,
    Pending,
    Completed,
    Delivered,
}

impl OrderState {
    /// The state reached by the next lifecycle operation, or `None` once delivered.
    pub fn next(self) -> Option<OrderState> {
        match self {
            OrderState::Created => Some(OrderState::Pending),
            OrderState::Pending => Some(OrderState::Completed),
            OrderState::Completed => Some(OrderState::Delivered),
            OrderState::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderState::Created => write!(f, "CREATED"),
            OrderState::Pending => write!(f, "PENDING"),
            OrderState::Completed => write!(f, "COMPLETED"),
            OrderState::Delivered => write!(f, "DELIVERED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_all_states() {
        let mut state = OrderState::Created;
        let mut history = vec![state];
        while let Some(next) = state.next() {
            state = next;
            history.push(state);
        }
        assert_eq!(
            history,
            vec![
                OrderState::Created,
                OrderState::Pending,
                OrderState::Completed,
                OrderState::Delivered
            ]
        );
    }

    #[test]
    fn only_delivered_is_terminal() {
        assert!(!OrderState::Created.is_terminal());
        assert!(!OrderState::Pending.is_terminal());
        assert!(!OrderState::Completed.is_terminal());
        assert!(OrderState::Delivered.is_terminal());
    }

    #[test]
    fn state_display() {
        assert_eq!(OrderState::Created.to_string(), "CREATED");
        assert_eq!(OrderState::Pending.to_string(), "PENDING");
        assert_eq!(OrderState::Completed.to_string(), "COMPLETED");
        assert_eq!(OrderState::Delivered.to_string(), "DELIVERED");
    }
}
