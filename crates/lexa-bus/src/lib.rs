pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod retry;
pub mod shutdown;

#[cfg(test)]
mod tests;

pub use dispatch::{MessageHandler, run_context};
pub use error::{BusError, Result};
pub use metrics::BusMetrics;
pub use registry::ContextRegistry;
pub use retry::{IsRetryable, RetryError, RetryPolicy, with_retry};
pub use shutdown::ShutdownCoordinator;
