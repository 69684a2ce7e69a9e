pub mod loaders;
pub mod paper;
pub mod summary;

pub use loaders::load_papers_from_json;
pub use paper::{format_papers, PaperRecord};
pub use summary::{PaperSummary, ReportEntry};
