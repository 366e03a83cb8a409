// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod clock;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod security;

pub use clock::SystemClock;
pub use config::AppConfig;
