//! Order backend: static fixture orders behind the load preamble
//!
//! `get_by_id` never reports "not found": any id yields a placeholder order.
//! The product service does return 404 for unknown ids; the two behaviors are
//! intentionally left different.

use rust_decimal::Decimal;

use crate::models::{Order, OrderStatus};
use crate::work_simulator::{LoadParams, WorkSimulator};

pub const PLACEHOLDER_CUSTOMER: &str = "DemoCustomer";

pub struct OrderService {
    orders: Vec<Order>,
    work: WorkSimulator,
}

impl OrderService {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            work: WorkSimulator::new(),
        }
    }

    /// The three demo orders
    pub fn with_fixtures() -> Self {
        Self::new(vec![
            Order::new(1, "Mohamed", Decimal::new(129999, 2), OrderStatus::Created),
            Order::new(2, "Sara", Decimal::new(49950, 2), OrderStatus::Paid),
            Order::new(3, "Ali", Decimal::new(8990, 2), OrderStatus::Shipped),
        ])
    }

    pub fn list(&self, params: &LoadParams) -> Vec<Order> {
        self.work.apply(params);
        self.orders.clone()
    }

    /// Synthesizes a placeholder for any id.
    pub fn get_by_id(&self, id: u64, params: &LoadParams) -> Order {
        self.work.apply(params);
        Order::new(
            id,
            PLACEHOLDER_CUSTOMER,
            Decimal::new(12345, 2),
            OrderStatus::Created,
        )
    }

    pub fn work(&self) -> &WorkSimulator {
        &self.work
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_list_has_three_orders() {
        let service = OrderService::with_fixtures();
        let orders = service.list(&LoadParams::default());
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[1].customer, "Sara");
        assert_eq!(orders[2].status, OrderStatus::Shipped);
    }

    #[test]
    fn test_get_by_id_synthesizes_for_any_id() {
        let service = OrderService::with_fixtures();
        for id in [1, 3, 777] {
            let order = service.get_by_id(id, &LoadParams::default());
            assert_eq!(order.id, id);
            assert_eq!(order.customer, PLACEHOLDER_CUSTOMER);
            assert_eq!(order.total, Decimal::new(12345, 2));
            assert_eq!(order.status, OrderStatus::Created);
        }
    }

    #[test]
    fn test_every_call_counts_towards_tail() {
        let service = OrderService::with_fixtures();
        let params = LoadParams::new(0, 5, 1);
        service.list(&params);
        service.get_by_id(9, &params);
        assert_eq!(service.work().calls(), 2);
    }
}
