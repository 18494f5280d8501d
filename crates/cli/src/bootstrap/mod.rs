mod config;
mod logging;
mod transport;

pub use config::load_config;
pub use logging::init_logging;
pub use transport::{bind_transport, preload_cache};
