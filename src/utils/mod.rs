pub mod batching;
pub mod json_block;
pub mod logging;

pub use batching::create_balanced_batches;
pub use json_block::find_first_json_block;
pub use logging::truncate_text;
