use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::indexer::model::{DocumentKind, FileCandidate, FileClass};

/// Text-like files indexed as code.
pub const CODE_EXTENSIONS: &[&str] = &[
    // Legacy
    ".tal", ".cbl", ".cob", ".cobol", ".pli", ".pco", ".cpy",
    // Modern
    ".java", ".py", ".js", ".ts", ".jsx", ".tsx",
    // Systems
    ".c", ".cpp", ".h", ".hpp", ".cs", ".go", ".rs", ".rb",
    // Data
    ".sql", ".json", ".yaml", ".yml", ".xml",
    // Text
    ".txt", ".md", ".csv",
];

pub const DOC_EXTENSIONS: &[(&str, DocumentKind)] = &[
    (".pdf", DocumentKind::Pdf),
    (".xlsx", DocumentKind::Excel),
    (".xls", DocumentKind::Excel),
    (".docx", DocumentKind::Word),
];

/// Directory names whose contents are never visited.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    "__pycache__",
    "venv",
    ".venv",
    "env",
    ".env",
    "dist",
    "build",
    "target",
    "out",
    "generated",
];

/// `ext` is lowercase with its leading dot.
pub fn classify_extension(ext: &str) -> Option<FileClass> {
    if CODE_EXTENSIONS.contains(&ext) {
        return Some(FileClass::Code);
    }
    DOC_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, kind)| FileClass::Document(*kind))
}

pub fn classify(path: &Path) -> Option<FileCandidate> {
    let ext = format!(".{}", path.extension()?.to_str()?.to_lowercase());
    let class = classify_extension(&ext)?;
    Some(FileCandidate {
        path: path.to_path_buf(),
        ext,
        class,
    })
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// Walk one root. A missing root is a warning and yields nothing.
pub fn scan_root(root: &Path) -> Vec<FileCandidate> {
    let mut out = Vec::new();
    if !root.exists() {
        warn!("Directory not found: {}", root.display());
        return out;
    }
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if let Some(candidate) = classify(entry.path()) {
            out.push(candidate);
        }
    }
    out
}

/// Scan every root in the order given. A file reachable from several
/// (overlapping) roots is yielded once, under the first of them.
pub fn scan_folders(roots: &[PathBuf]) -> Vec<FileCandidate> {
    let mut seen = HashSet::new();
    roots
        .iter()
        .flat_map(|root| scan_root(root))
        .filter(|c| seen.insert(c.path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn classifies_code_and_documents() {
        assert_eq!(classify_extension(".py"), Some(FileClass::Code));
        assert_eq!(
            classify_extension(".xls"),
            Some(FileClass::Document(DocumentKind::Excel))
        );
        assert_eq!(classify_extension(".exe"), None);

        let c = classify(Path::new("/w/REPORT.PDF")).unwrap();
        assert_eq!(c.ext, ".pdf");
        assert_eq!(c.class, FileClass::Document(DocumentKind::Pdf));
        assert!(classify(Path::new("/w/Makefile")).is_none());
    }

    #[test]
    fn prunes_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("src/generated")).unwrap();
        fs::write(root.join("src/app.py"), "def main():\n").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "function x() {}\n").unwrap();
        fs::write(root.join("src/generated/out.py"), "def gen():\n").unwrap();
        fs::write(root.join("src/logo.png"), [0u8, 1, 2]).unwrap();

        let found = scan_root(root);
        let names: Vec<_> = found
            .iter()
            .map(|c| c.path.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("src/app.py")]);
    }

    #[test]
    fn missing_root_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();
        let roots = vec![dir.path().join("nope"), dir.path().to_path_buf()];
        let found = scan_folders(&roots);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].ext, ".rs");
    }

    #[test]
    fn overlapping_roots_yield_each_file_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "pub fn a() {}\n").unwrap();
        let roots = vec![dir.path().to_path_buf(), dir.path().join("src")];
        assert_eq!(scan_folders(&roots).len(), 1);
    }

    #[test]
    fn root_named_like_excluded_dir_is_still_walked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("x.sql"), "CREATE TABLE t (id int);\n").unwrap();
        assert_eq!(scan_root(&root).len(), 1);
    }
}
