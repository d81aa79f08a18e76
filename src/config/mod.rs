pub mod endpoints;
pub mod manager;
pub mod models;

pub use endpoints::select_endpoint;
pub use manager::ConfigManager;
pub use models::{Endpoint, GlobalConfig};
