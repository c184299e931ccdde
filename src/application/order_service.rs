use crate::domain::errors::DomainError;
use crate::domain::order::{Draft, FieldUpdate, Order};
use crate::domain::ports::{OrderRepository, StatusSource};

/// Owns the order store, the draft form and the status source for a session.
pub struct OrderService<R, S> {
    repo: R,
    draft: Draft,
    statuses: S,
}

impl<R: OrderRepository, S: StatusSource> OrderService<R, S> {
    pub fn new(repo: R, statuses: S) -> Self {
        Self {
            repo,
            draft: Draft::empty(),
            statuses,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        log::debug!("Draft field {} set to {:?}", update.field(), update);
        self.draft.apply(update);
    }

    /// Commits the draft as a new order and resets the form.
    ///
    /// On a validation error neither the store nor the draft is touched.
    pub fn submit(&mut self) -> Result<Order, DomainError> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            let err = DomainError::Validation { missing };
            log::warn!("Order rejected: {}", err);
            return Err(err);
        }

        let status = self.statuses.next_status();
        let order = self.draft.to_order(status)?;
        self.repo.append(order.clone());
        self.draft = Draft::empty();

        log::info!(
            "Order created: {} x{} ({} g), status {}",
            order.coffee_type(),
            order.amount(),
            order.weight(),
            order.status()
        );
        Ok(order)
    }

    pub fn list_orders(&self) -> &[Order] {
        self.repo.list_all()
    }
}
