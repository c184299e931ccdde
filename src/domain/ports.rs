use super::order::{Order, OrderStatus};

/// Append-only, insertion-ordered order storage.
pub trait OrderRepository {
    fn append(&mut self, order: Order);
    fn list_all(&self) -> &[Order];
}

/// Picks the status stamped on each new order.
pub trait StatusSource {
    fn next_status(&mut self) -> OrderStatus;
}
