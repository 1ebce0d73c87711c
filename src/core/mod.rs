pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod utils;

pub use config::AppConfig;
pub use errors::YomireiError;
pub use models::{ Cell, DisplayRow, Record, Table };
