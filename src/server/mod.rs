pub mod actor;
pub mod cli;
pub mod config;
pub mod render;
pub mod routes;
pub mod serde;

pub use cli::AppArgs;
pub use config::AppConfig;
pub use routes::{not_found, routes};
