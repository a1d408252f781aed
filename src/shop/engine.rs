use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use super::admission::{AdmissionPolicy, Rejection};
use super::lifecycle::OrderState;
use crate::audit::{AuditEvent, AuditSink, NullSink};
use crate::order::Order;

const COMPONENT: &str = "Shop";

/// Point-in-time view of the shop's queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopSnapshot {
    pub pending: Vec<Order>,
    pub completed: Vec<Order>,
    pub capacity: usize,
}

/// A small bike shop.
///
/// Accepted orders wait in a FIFO queue, are repaired oldest first, and sit
/// in the completed list until their customer picks them up.
pub struct Shop {
    pending: VecDeque<Order>,
    // Insertion order is kept so that `deliver` is deterministic.
    completed: Vec<Order>,
    policy: AdmissionPolicy,
    audit: Box<dyn AuditSink>,
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shop")
            .field("pending", &self.pending)
            .field("completed", &self.completed)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Shop {
    /// An empty shop with the default admission policy and no audit trail.
    pub fn new() -> Self {
        Self::with_policy(AdmissionPolicy::default())
    }

    pub fn with_policy(policy: AdmissionPolicy) -> Self {
        Self {
            pending: VecDeque::with_capacity(policy.max_pending),
            completed: Vec::new(),
            policy,
            audit: Box::new(NullSink),
        }
    }

    /// Replace the audit sink that receives lifecycle events.
    pub fn with_audit(mut self, sink: impl AuditSink + 'static) -> Self {
        self.audit = Box::new(sink);
        self
    }

    pub fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    /// Accept a repair order.
    ///
    /// The order is only accepted if all conditions hold:
    /// - the bicycle type is not refused (GRAVEL and EBIKE by default),
    /// - the customer has no other pending order,
    /// - fewer than `max_pending` orders are waiting.
    ///
    /// Accepted orders are appended to the end of the pending queue. Returns
    /// `false` without touching the queue otherwise.
    pub fn accept(&mut self, order: Order) -> bool {
        self.try_accept(order).is_ok()
    }

    /// Like [`Shop::accept`], but reports why an order was turned away.
    pub fn try_accept(&mut self, order: Order) -> Result<(), Rejection> {
        if let Err(rejection) = self.policy.check(&order, &self.pending) {
            tracing::debug!(
                customer = order.customer(),
                bicycle_type = %order.bicycle_type(),
                "order rejected: {rejection}"
            );
            return Err(rejection);
        }

        tracing::debug!(
            customer = order.customer(),
            bicycle_type = %order.bicycle_type(),
            position = self.pending.len(),
            "order accepted"
        );
        self.pending.push_back(order);
        Ok(())
    }

    /// Take the oldest pending order and repair the bicycle.
    ///
    /// The order moves from the pending queue to the completed list and a
    /// copy is returned. Returns `None` and changes nothing when no order is
    /// waiting.
    pub fn repair(&mut self) -> Option<Order> {
        let Some(order) = self.pending.pop_front() else {
            tracing::debug!("repair requested with an empty queue");
            return None;
        };

        self.record(
            "repair",
            format!(
                "removed order {} {} from pending ({} -> {})",
                order.customer(),
                order.bicycle_type(),
                OrderState::Pending,
                OrderState::Completed
            ),
        );
        self.completed.push(order.clone());
        self.record(
            "repair",
            format!(
                "added order {} {} to completed ({} -> {})",
                order.customer(),
                order.bicycle_type(),
                OrderState::Pending,
                OrderState::Completed
            ),
        );

        Some(order)
    }

    /// Hand a repaired bicycle back to `customer`.
    ///
    /// Removes and returns the earliest completed order whose customer matches
    /// exactly, or `None` if there is nothing to pick up.
    pub fn deliver(&mut self, customer: &str) -> Option<Order> {
        let index = self
            .completed
            .iter()
            .position(|order| order.customer() == customer)?;
        let order = self.completed.remove(index);

        self.record(
            "deliver",
            format!(
                "removed order {} {} from completed ({} -> {})",
                order.customer(),
                order.bicycle_type(),
                OrderState::Completed,
                OrderState::Delivered
            ),
        );

        Some(order)
    }

    /// Where the customer's order currently is, if the shop holds one.
    ///
    /// A pending order takes precedence over one awaiting pickup.
    pub fn state_of(&self, customer: &str) -> Option<OrderState> {
        if self.pending.iter().any(|o| o.customer() == customer) {
            Some(OrderState::Pending)
        } else if self.completed.iter().any(|o| o.customer() == customer) {
            Some(OrderState::Completed)
        } else {
            None
        }
    }

    /// Pending orders, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Order> {
        self.pending.iter()
    }

    /// Completed orders awaiting pickup, in order of completion.
    pub fn completed(&self) -> impl Iterator<Item = &Order> {
        self.completed.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    /// True when no order is waiting for repair or pickup.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }

    pub fn snapshot(&self) -> ShopSnapshot {
        ShopSnapshot {
            pending: self.pending.iter().cloned().collect(),
            completed: self.completed.clone(),
            capacity: self.policy.max_pending,
        }
    }

    fn record(&self, operation: &str, message: String) {
        self.audit
            .record(&AuditEvent::info(operation, COMPONENT, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLevel, CsvFileSink, MemorySink};
    use crate::order::BicycleType;

    fn order(customer: &str, ty: BicycleType) -> Order {
        Order::new(customer, ty).unwrap()
    }

    fn audited_shop() -> (Shop, MemorySink) {
        let sink = MemorySink::new();
        let shop = Shop::new().with_audit(sink.clone());
        (shop, sink)
    }

    #[test]
    fn valid_order_is_accepted() {
        let mut shop = Shop::new();
        assert!(shop.accept(order("Kunde", BicycleType::Race)));
        assert_eq!(shop.pending_len(), 1);
    }

    #[test]
    fn refused_types_leave_queue_unchanged() {
        let mut shop = Shop::new();
        assert!(shop.accept(order("Alice", BicycleType::Race)));
        let before = shop.snapshot();

        for ty in [BicycleType::Gravel, BicycleType::Ebike] {
            assert!(!shop.accept(order("Bob", ty)));
        }
        assert_eq!(shop.snapshot(), before);
    }

    #[test]
    fn second_order_from_pending_customer_is_rejected() {
        let mut shop = Shop::new();
        assert!(shop.accept(order("Alice", BicycleType::Race)));
        assert_eq!(
            shop.try_accept(order("Alice", BicycleType::Fixie)),
            Err(Rejection::CustomerAlreadyPending("Alice".into()))
        );

        let pending: Vec<&Order> = shop.pending().collect();
        assert_eq!(pending, vec![&order("Alice", BicycleType::Race)]);
    }

    #[test]
    fn five_orders_fit_sixth_is_rejected() {
        let mut shop = Shop::new();
        for i in 1..=5 {
            assert!(shop.accept(order(&format!("Kunde{i}"), BicycleType::Race)));
        }
        assert!(!shop.accept(order("Kunde", BicycleType::Race)));
        assert_eq!(shop.pending_len(), 5);
    }

    #[test]
    fn pending_never_exceeds_cap() {
        let mut shop = Shop::new();
        for i in 0..20 {
            shop.accept(order(&format!("c{i}"), BicycleType::SingleSpeed));
            assert!(shop.pending_len() <= 5);
        }
    }

    #[test]
    fn repair_is_fifo() {
        let mut shop = Shop::new();
        shop.accept(order("first", BicycleType::Race));
        shop.accept(order("second", BicycleType::Fixie));
        shop.accept(order("third", BicycleType::SingleSpeed));

        assert_eq!(shop.repair(), Some(order("first", BicycleType::Race)));
        assert_eq!(shop.pending_len(), 2);
        assert_eq!(shop.pending().next(), Some(&order("second", BicycleType::Fixie)));
        assert_eq!(
            shop.completed().collect::<Vec<_>>(),
            vec![&order("first", BicycleType::Race)]
        );
    }

    #[test]
    fn repair_frees_a_slot() {
        let mut shop = Shop::new();
        for i in 0..5 {
            shop.accept(order(&format!("c{i}"), BicycleType::Race));
        }
        assert!(!shop.accept(order("late", BicycleType::Race)));
        shop.repair();
        assert!(shop.accept(order("late", BicycleType::Race)));
    }

    #[test]
    fn repair_on_empty_queue_returns_none() {
        let (mut shop, sink) = audited_shop();
        assert_eq!(shop.repair(), None);
        assert!(shop.is_idle());
        assert!(sink.is_empty());
    }

    #[test]
    fn repair_records_two_events() {
        let (mut shop, sink) = audited_shop();
        shop.accept(order("Alice", BicycleType::Race));
        shop.repair();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.operation == "repair"
            && e.component == "Shop"
            && e.level == AuditLevel::Info));
        assert_eq!(
            events[0].message,
            "removed order Alice RACE from pending (PENDING -> COMPLETED)"
        );
        assert_eq!(
            events[1].message,
            "added order Alice RACE to completed (PENDING -> COMPLETED)"
        );
    }

    #[test]
    fn accept_records_nothing() {
        let (mut shop, sink) = audited_shop();
        shop.accept(order("Alice", BicycleType::Race));
        shop.accept(order("Bob", BicycleType::Gravel));
        assert!(sink.is_empty());
    }

    #[test]
    fn deliver_removes_matching_order() {
        let (mut shop, sink) = audited_shop();
        for customer in ["Kunde1", "Kunde2", "Kunde3"] {
            shop.accept(order(customer, BicycleType::Race));
            shop.repair();
        }

        assert_eq!(
            shop.deliver("Kunde2"),
            Some(order("Kunde2", BicycleType::Race))
        );
        assert_eq!(shop.completed_len(), 2);
        assert_eq!(shop.deliver("Kunde2"), None);

        let last = sink.events().pop().unwrap();
        assert_eq!(last.operation, "deliver");
        assert_eq!(
            last.message,
            "removed order Kunde2 RACE from completed (COMPLETED -> DELIVERED)"
        );
    }

    #[test]
    fn deliver_unknown_customer_changes_nothing() {
        let (mut shop, sink) = audited_shop();
        shop.accept(order("Alice", BicycleType::Race));
        shop.repair();
        let before = shop.snapshot();
        let events_before = sink.len();

        assert_eq!(shop.deliver("nonexistent"), None);
        assert_eq!(shop.deliver("alice"), None);
        assert_eq!(shop.snapshot(), before);
        assert_eq!(sink.len(), events_before);
    }

    #[test]
    fn customer_can_return_after_repair() {
        let mut shop = Shop::new();
        assert!(shop.accept(order("Alice", BicycleType::Race)));
        shop.repair();
        assert_eq!(shop.state_of("Alice"), Some(OrderState::Completed));

        assert!(shop.accept(order("Alice", BicycleType::Race)));
        assert_eq!(shop.state_of("Alice"), Some(OrderState::Pending));
        shop.repair();

        // Both structurally equal orders are kept and delivered one at a time.
        assert_eq!(shop.completed_len(), 2);
        assert!(shop.deliver("Alice").is_some());
        assert!(shop.deliver("Alice").is_some());
        assert_eq!(shop.deliver("Alice"), None);
        assert_eq!(shop.state_of("Alice"), None);
    }

    #[test]
    fn deliver_returns_earliest_completed() {
        let mut shop = Shop::new();
        shop.accept(order("Alice", BicycleType::Fixie));
        shop.repair();
        shop.accept(order("Alice", BicycleType::Race));
        shop.repair();

        assert_eq!(shop.deliver("Alice"), Some(order("Alice", BicycleType::Fixie)));
        assert_eq!(shop.deliver("Alice"), Some(order("Alice", BicycleType::Race)));
    }

    #[test]
    fn end_to_end_scenario() {
        let (mut shop, sink) = audited_shop();
        let alice = order("Alice", BicycleType::Race);

        assert!(shop.accept(alice.clone()));
        assert!(!shop.accept(alice.clone()));

        assert_eq!(shop.repair(), Some(alice.clone()));
        assert_eq!(shop.pending_len(), 0);
        assert_eq!(shop.completed().collect::<Vec<_>>(), vec![&alice]);

        assert_eq!(shop.deliver("Alice"), Some(alice));
        assert_eq!(shop.completed_len(), 0);
        assert_eq!(shop.deliver("Alice"), None);

        assert!(shop.is_idle());
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn failing_audit_sink_does_not_change_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut shop = Shop::new().with_audit(CsvFileSink::new(blocker.join("audit.csv")));

        assert!(shop.accept(order("Alice", BicycleType::Race)));
        assert_eq!(shop.repair(), Some(order("Alice", BicycleType::Race)));
        assert_eq!(shop.deliver("Alice"), Some(order("Alice", BicycleType::Race)));
    }

    #[test]
    fn custom_policy_is_honoured() {
        let mut shop = Shop::with_policy(AdmissionPolicy {
            refused_types: vec![],
            max_pending: 2,
        });
        assert!(shop.accept(order("a", BicycleType::Gravel)));
        assert!(shop.accept(order("b", BicycleType::Ebike)));
        assert_eq!(
            shop.try_accept(order("c", BicycleType::Race)),
            Err(Rejection::QueueFull { capacity: 2 })
        );
        assert_eq!(shop.snapshot().capacity, 2);
    }

    #[test]
    fn snapshot_serializes() {
        let mut shop = Shop::new();
        shop.accept(order("Alice", BicycleType::Race));
        shop.accept(order("Bob", BicycleType::Fixie));
        shop.repair();

        let json = serde_json::to_value(shop.snapshot()).unwrap();
        assert_eq!(json["pending"][0]["customer"], "Bob");
        assert_eq!(json["completed"][0]["bicycle_type"], "RACE");
        assert_eq!(json["capacity"], 5);
    }
}
