pub mod config;
pub mod frontend;
pub mod guard_core;
pub mod logging;

pub use frontend::start_server;
