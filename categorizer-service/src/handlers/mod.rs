pub mod analyze;
pub mod health;
pub mod metrics;

pub use analyze::analyze;
pub use health::health_check;
pub use metrics::metrics;
