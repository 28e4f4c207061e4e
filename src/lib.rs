pub mod documents;
pub mod error;
pub mod indexer;
pub mod logging;

// Re-export main types and functions
pub use documents::{Capabilities, DocumentExtractor, NativeExtractor};
pub use error::{ExtractError, IndexError, Result};
pub use indexer::{build_index, write_index, Index, IndexMode, IndexOptions, KeywordLimits};
