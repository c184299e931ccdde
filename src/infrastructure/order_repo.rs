use chrono::NaiveDate;

use crate::domain::order::{CoffeeType, Order, OrderStatus};
use crate::domain::ports::OrderRepository;

// ── Seed data ────────────────────────────────────────────────────────────────

/// The three orders every session starts with, one per status.
fn seed_orders(today: NaiveDate) -> Vec<Order> {
    vec![
        Order::new(CoffeeType::Arabica, 3235, 2, today, today, OrderStatus::Picking),
        Order::new(CoffeeType::Robusta, 6433, 43, today, today, OrderStatus::InTransit),
        Order::new(CoffeeType::Decaf, 11123, 10, today, today, OrderStatus::Delivered),
    ]
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Vec<Order>,
}

impl InMemoryOrderRepository {
    /// A store holding the seed orders dated `today`.
    pub fn initialize(today: NaiveDate) -> Self {
        let orders = seed_orders(today);
        log::info!("Order store initialized with {} seed orders", orders.len());
        Self { orders }
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn append(&mut self, order: Order) {
        self.orders.push(order);
    }

    fn list_all(&self) -> &[Order] {
        &self.orders
    }
}
