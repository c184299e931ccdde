pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use rand::rngs::StdRng;

pub use application::order_service::OrderService;
pub use config::AppConfig;
pub use errors::AppError;
pub use infrastructure::order_repo::InMemoryOrderRepository;
pub use infrastructure::status_source::RandomStatusSource;

pub type SessionService = OrderService<InMemoryOrderRepository, RandomStatusSource<StdRng>>;

/// Build the session state: a seeded order store and an empty draft.
///
/// Status assignment is reproducible when `config.status_seed` is set.
pub fn build_service(config: &AppConfig) -> SessionService {
    let statuses = match config.status_seed {
        Some(seed) => RandomStatusSource::seeded(seed),
        None => RandomStatusSource::from_entropy(),
    };
    OrderService::new(InMemoryOrderRepository::initialize(config.today()), statuses)
}
