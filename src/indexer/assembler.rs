//! Index assembly: routes each scanned file through reading and extraction
//! and records the result. Per-file failures are counted, never fatal.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::documents::DocumentExtractor;
use crate::error::Result;
use crate::indexer::keywords::{
    extract_keywords, TokenShape, DEFAULT_CODE_KEYWORDS, DEFAULT_DOC_KEYWORDS,
    DEFAULT_DOC_SUMMARY_KEYWORDS,
};
use crate::indexer::model::{
    CodeFileEntry, DocumentEntry, DocumentKind, FileCandidate, FileClass, GlobalSymbol, Index,
    IndexMode,
};
use crate::indexer::reader::{read_code, read_document, DocumentRead};
use crate::indexer::scanner::scan_folders;
use crate::indexer::symbols::rule_for;
use crate::indexer::util::{line_count, path_key, relative_display};

/// Batch size for progress lines when not verbose.
const PROGRESS_EVERY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordLimits {
    pub code: usize,
    pub document: usize,
    /// Used for documents in lightweight mode.
    pub document_summary: usize,
}

impl Default for KeywordLimits {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE_KEYWORDS,
            document: DEFAULT_DOC_KEYWORDS,
            document_summary: DEFAULT_DOC_SUMMARY_KEYWORDS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub mode: IndexMode,
    pub skip_docs: bool,
    pub verbose: bool,
    pub limits: KeywordLimits,
}

impl IndexOptions {
    fn document_keyword_limit(&self) -> usize {
        match self.mode {
            IndexMode::Full => self.limits.document,
            IndexMode::Lightweight => self.limits.document_summary,
        }
    }
}

/// What happened to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Indexed,
    Skipped,
    Failed,
}

/// Sole owner of the [`Index`] while it is being built.
pub struct IndexAssembler<'a> {
    index: Index,
    roots: Vec<PathBuf>,
    options: IndexOptions,
    extractor: &'a dyn DocumentExtractor,
}

impl<'a> IndexAssembler<'a> {
    /// `roots` should already be absolute.
    pub fn new(
        roots: Vec<PathBuf>,
        options: IndexOptions,
        extractor: &'a dyn DocumentExtractor,
    ) -> Self {
        let folders = roots.iter().map(|r| path_key(r)).collect();
        Self {
            index: Index::new(options.mode, folders),
            roots,
            options,
            extractor,
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn add(&mut self, candidate: &FileCandidate) -> FileOutcome {
        let relative = relative_display(&candidate.path, &self.roots);
        let result = match candidate.class {
            FileClass::Code => self.add_code(candidate, relative),
            FileClass::Document(_) if self.options.skip_docs => Ok(FileOutcome::Skipped),
            FileClass::Document(kind) => self.add_document(candidate, kind, relative),
        };
        match result {
            Ok(outcome) => {
                if outcome == FileOutcome::Skipped && !self.options.skip_docs {
                    self.index.stats.skipped += 1;
                }
                outcome
            }
            Err(e) => {
                if self.options.verbose {
                    warn!("Could not index {}: {}", candidate.path.display(), e);
                } else {
                    debug!("Could not index {}: {}", candidate.path.display(), e);
                }
                self.index.stats.errors += 1;
                FileOutcome::Failed
            }
        }
    }

    fn add_code(&mut self, candidate: &FileCandidate, relative: String) -> Result<FileOutcome> {
        let content = read_code(&candidate.path)?;
        let key = path_key(&candidate.path);
        let lines = line_count(&content);
        let rule = rule_for(&candidate.ext);
        let functions = rule.map_or_else(Vec::new, |r| r.extract(&content));
        let shape = rule.map_or(TokenShape::Plain, |r| r.keyword_shape);
        let keywords = extract_keywords(&content, self.options.limits.code, shape);
        if let Some(rule) = rule {
            debug!("{}: {} {} symbols", relative, functions.len(), rule.language);
        }

        let stats = &mut self.index.stats;
        stats.code_files += 1;
        stats.lines += lines;
        stats.functions += functions.len();
        self.index
            .functions
            .extend(functions.iter().map(|f| GlobalSymbol::new(f, &key)));
        self.index.files.insert(
            key.clone(),
            CodeFileEntry {
                path: key,
                relative,
                ext: candidate.ext.clone(),
                lines,
                functions,
                keywords,
            },
        );
        Ok(FileOutcome::Indexed)
    }

    fn add_document(
        &mut self,
        candidate: &FileCandidate,
        kind: DocumentKind,
        relative: String,
    ) -> Result<FileOutcome> {
        let extracted = match read_document(&candidate.path, kind, self.extractor)? {
            DocumentRead::Text(extracted) => extracted,
            DocumentRead::Unsupported => return Ok(FileOutcome::Skipped),
        };
        debug!("{}: {:?}", relative, extracted.meta);

        let key = path_key(&candidate.path);
        let lines = line_count(&extracted.text);
        let keywords = extract_keywords(
            &extracted.text,
            self.options.document_keyword_limit(),
            TokenShape::Plain,
        );
        let text = match self.options.mode {
            IndexMode::Full => Some(extracted.text),
            IndexMode::Lightweight => None,
        };

        self.index.stats.doc_files += 1;
        self.index.stats.lines += lines;
        self.index.documents.insert(
            key.clone(),
            DocumentEntry {
                path: key,
                relative,
                doc_type: kind,
                ext: candidate.ext.clone(),
                lines,
                keywords,
                text,
            },
        );
        Ok(FileOutcome::Indexed)
    }

    pub fn finish(self) -> Index {
        self.index
    }
}

/// Make every root absolute without resolving symlinks.
pub fn absolute_roots(folders: &[PathBuf]) -> Vec<PathBuf> {
    folders
        .iter()
        .map(|f| std::path::absolute(f).unwrap_or_else(|_| f.clone()))
        .collect()
}

fn report_progress(done: usize, total: usize, path: &Path, roots: &[PathBuf], verbose: bool) {
    if verbose {
        info!("[{}/{}] {}", done, total, relative_display(path, roots));
    } else if done % PROGRESS_EVERY == 0 {
        info!("Processed {}/{} files...", done, total);
    }
}

/// Scan `folders` and build a complete index in one sequential pass.
pub fn build_index(
    folders: &[PathBuf],
    options: &IndexOptions,
    extractor: &dyn DocumentExtractor,
) -> Index {
    let roots = absolute_roots(folders);
    let mut candidates = scan_folders(&roots);
    if options.skip_docs {
        candidates.retain(|c| c.class == FileClass::Code);
    }
    info!("Found {} candidate files", candidates.len());

    let mut assembler = IndexAssembler::new(roots, options.clone(), extractor);
    let total = candidates.len();
    for (i, candidate) in candidates.iter().enumerate() {
        report_progress(i + 1, total, &candidate.path, assembler.roots(), options.verbose);
        assembler.add(candidate);
    }
    assembler.finish()
}
