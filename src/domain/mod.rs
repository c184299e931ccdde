pub mod errors;
pub mod format;
pub mod order;
pub mod ports;
