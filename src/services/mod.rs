pub mod completion;
pub mod filter_service;
pub mod paper_source;
pub mod prompts;
pub mod report_writer;
pub mod summary_service;

pub use completion::CompletionService;
pub use filter_service::FilterStage;
pub use paper_source::{JsonPaperFile, PaperSource, SearchQuery};
pub use prompts::PromptTemplates;
pub use report_writer::ReportWriter;
pub use summary_service::SummarizeStage;
