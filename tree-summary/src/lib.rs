pub mod cleaner;
pub mod config;
pub mod prompt;
pub mod tree;
pub mod walker;

pub use cleaner::clean_markup;
pub use config::{load_api_key, ConfigError, SummarizerConfig};
pub use prompt::{build_prompt, summarize_file};
pub use tree::{render_document, write_document, Connector, TreeLine, TreeLineKind};
pub use walker::{FileOutcome, TreeSummarizer, WalkStats};
