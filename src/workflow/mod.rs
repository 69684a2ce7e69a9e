pub mod batch_flow;
pub mod retry;

pub use batch_flow::{BatchProcessor, BatchTask, MAX_ATTEMPTS};
pub use retry::{retry_with_limit, RetryExhausted};
