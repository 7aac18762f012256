mod loader;
mod logging;
mod root;
mod timeout;
mod validator;

pub use loader::load_from_path;
pub use logging::LoggingConfig;
pub use root::ServerConfig;
pub use timeout::TimeoutConfig;
