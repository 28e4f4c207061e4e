use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format tag written into every index.
pub const INDEX_VERSION: &str = "2.0";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Excel,
    Word,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Excel => write!(f, "Excel"),
            Self::Word => write!(f, "Word"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Code,
    Document(DocumentKind),
}

/// A file found by the scanner, consumed once by the assembler.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub path: PathBuf,
    /// Lowercase, with the leading dot (`.py`).
    pub ext: String,
    pub class: FileClass,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Proc,
    Subproc,
    Section,
    Paragraph,
    Procedure,
    Method,
    Function,
    Class,
    Struct,
    Enum,
    Trait,
    Interface,
    Module,
    Table,
    View,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub line: usize,
}

/// A symbol in the flat cross-file list, pointing back at its file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GlobalSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub file: String,
    pub line: usize,
}

impl GlobalSymbol {
    pub fn new(record: &SymbolRecord, file: &str) -> Self {
        Self {
            name: record.name.clone(),
            kind: record.kind,
            file: file.to_string(),
            line: record.line,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CodeFileEntry {
    pub path: String,
    pub relative: String,
    pub ext: String,
    pub lines: usize,
    pub functions: Vec<SymbolRecord>,
    pub keywords: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentEntry {
    pub path: String,
    pub relative: String,
    pub doc_type: DocumentKind,
    pub ext: String,
    pub lines: usize,
    pub keywords: Vec<String>,
    /// Present only in full mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub code_files: usize,
    pub doc_files: usize,
    pub functions: usize,
    pub lines: usize,
    pub errors: usize,
    /// Documents passed over because their parser is not available.
    #[serde(default)]
    pub skipped: usize,
}

impl Stats {
    pub fn indexed_files(&self) -> usize {
        self.code_files + self.doc_files
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Documents keep their full extracted text.
    #[default]
    Full,
    /// Documents keep only a keyword summary.
    Lightweight,
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Lightweight => write!(f, "lightweight"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Index {
    pub version: String,
    pub mode: IndexMode,
    pub created: DateTime<Utc>,
    pub folders: Vec<String>,
    pub files: BTreeMap<String, CodeFileEntry>,
    pub documents: BTreeMap<String, DocumentEntry>,
    pub functions: Vec<GlobalSymbol>,
    pub stats: Stats,
}

impl Index {
    pub fn new(mode: IndexMode, folders: Vec<String>) -> Self {
        Self {
            version: INDEX_VERSION.to_string(),
            mode,
            created: Utc::now(),
            folders,
            files: BTreeMap::new(),
            documents: BTreeMap::new(),
            functions: Vec::new(),
            stats: Stats::default(),
        }
    }
}
