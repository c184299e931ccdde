use std::io::{self, Write};

use coffee_orders::handlers::orders::{render_table, run_session};
use coffee_orders::{build_service, AppConfig, AppError};
use dotenvy::dotenv;

fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;
    let mut service = build_service(&config);

    log::info!("Coffee Manager ready; type `help` for commands");

    let mut out = io::stdout().lock();
    writeln!(out, "{}", render_table(service.list_orders()))?;
    out.flush()?;

    run_session(io::stdin().lock(), out, &mut service)
}
