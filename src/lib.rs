pub mod collectors;
pub mod config;
pub mod diagnostics;
pub mod evaluator;
pub mod exec;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod types;

pub use config::{MonitorConfig, Thresholds};
pub use evaluator::{Alert, evaluate};
pub use monitor::Monitor;
pub use types::{MetricsSnapshot, ProcessSample};
