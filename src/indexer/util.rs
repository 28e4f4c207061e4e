use std::path::{Path, PathBuf};

/// Number of `\n`-separated segments; an empty text is one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Path relative to the first root containing it, else the absolute path.
pub fn relative_display(path: &Path, roots: &[PathBuf]) -> String {
    roots
        .iter()
        .find_map(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b > MB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.1} KB", b / KB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_like_split() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("a\nb\n"), 3);
    }

    #[test]
    fn relative_uses_first_matching_root() {
        let roots = vec![PathBuf::from("/work/src"), PathBuf::from("/work")];
        assert_eq!(
            relative_display(Path::new("/work/src/a/b.py"), &roots),
            "a/b.py"
        );
        assert_eq!(relative_display(Path::new("/work/docs/x.pdf"), &roots), "docs/x.pdf");
        assert_eq!(relative_display(Path::new("/elsewhere/y.rs"), &roots), "/elsewhere/y.rs");
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(human_size(512), "0.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
