pub mod assembler;
pub mod keywords;
pub mod model;
pub mod reader;
pub mod scanner;
pub mod symbols;
pub mod util;
pub mod writer;

pub use assembler::{build_index, FileOutcome, IndexAssembler, IndexOptions, KeywordLimits};
pub use model::{
    CodeFileEntry, DocumentEntry, DocumentKind, FileCandidate, FileClass, GlobalSymbol, Index,
    IndexMode, Stats, SymbolKind, SymbolRecord,
};
pub use writer::write_index;
