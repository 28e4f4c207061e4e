//! Heuristic, line-oriented symbol extraction.
//!
//! Each language is one [`LanguageRule`]: a list of anchored line patterns
//! selected through a static extension table. Lines are matched
//! independently, so declarations spread over several lines are missed.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::indexer::keywords::TokenShape;
use crate::indexer::model::{SymbolKind, SymbolRecord};

/// How a pattern interacts with the others on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Only the first matching exclusive pattern is used.
    Exclusive,
    /// Always evaluated, in addition to any exclusive match.
    Additional,
}

struct LinePattern {
    regex: Regex,
    slot: Slot,
    kind: fn(&Captures) -> SymbolKind,
}

pub struct LanguageRule {
    pub language: &'static str,
    pub extensions: &'static [&'static str],
    /// How keywords are tokenized for files in this language.
    pub keyword_shape: TokenShape,
    patterns: Vec<LinePattern>,
}

fn pattern(re: &str, slot: Slot, kind: fn(&Captures) -> SymbolKind) -> LinePattern {
    LinePattern {
        regex: Regex::new(re).expect("symbol pattern must compile"),
        slot,
        kind,
    }
}

fn exclusive(re: &str, kind: fn(&Captures) -> SymbolKind) -> LinePattern {
    pattern(re, Slot::Exclusive, kind)
}

fn additional(re: &str, kind: fn(&Captures) -> SymbolKind) -> LinePattern {
    pattern(re, Slot::Additional, kind)
}

fn keyword_kind(caps: &Captures) -> SymbolKind {
    let word = caps.name("kind").map_or("", |m| m.as_str());
    match word.to_ascii_lowercase().as_str() {
        "subproc" => SymbolKind::Subproc,
        "proc" => SymbolKind::Proc,
        "section" => SymbolKind::Section,
        "procedure" => SymbolKind::Procedure,
        "class" => SymbolKind::Class,
        "struct" => SymbolKind::Struct,
        "enum" => SymbolKind::Enum,
        "trait" => SymbolKind::Trait,
        "interface" => SymbolKind::Interface,
        "module" => SymbolKind::Module,
        "table" => SymbolKind::Table,
        "view" => SymbolKind::View,
        _ => SymbolKind::Function,
    }
}

/// Words that look like a return type in `word name(` but start a statement.
const NOT_A_RETURN_TYPE: &[&str] = &["return", "new", "else", "throw", "await", "yield"];

static RULES: LazyLock<Vec<LanguageRule>> = LazyLock::new(|| {
    vec![
        LanguageRule {
            language: "TAL",
            extensions: &[".tal"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![exclusive(
                r"(?i)^\s*(?P<kind>PROC|SUBPROC)\s+(?P<name>\w+)",
                keyword_kind,
            )],
        },
        LanguageRule {
            language: "COBOL",
            extensions: &[".cbl", ".cob", ".cobol", ".cpy", ".pco"],
            keyword_shape: TokenShape::HyphenatedNames,
            patterns: vec![exclusive(
                r"^\s{7}(?P<name>\w[\w-]*)\s*(?P<kind>SECTION)?\.",
                |caps| match caps.name("kind") {
                    Some(_) => SymbolKind::Section,
                    None => SymbolKind::Paragraph,
                },
            )],
        },
        LanguageRule {
            language: "Java",
            extensions: &[".java"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![exclusive(
                r"^\s*(?:(?:public|private|protected)\s+)?(?:static\s+)?(?P<ret>\w+)\s+(?P<name>\w+)\s*\(",
                |_| SymbolKind::Method,
            )],
        },
        LanguageRule {
            language: "C#",
            extensions: &[".cs"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![
                exclusive(
                    r"^\s*(?:(?:public|private|protected|internal|static|abstract|sealed|partial)\s+)*(?P<kind>class|interface|struct|enum)\s+(?P<name>\w+)",
                    keyword_kind,
                ),
                exclusive(
                    r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|async|abstract)\s+)*(?P<ret>[\w<>\[\],]+)\s+(?P<name>\w+)\s*\(",
                    |_| SymbolKind::Method,
                ),
            ],
        },
        LanguageRule {
            language: "Python",
            extensions: &[".py"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![
                exclusive(r"^\s*def\s+(?P<name>\w+)\s*\(", |_| SymbolKind::Function),
                additional(r"^\s*class\s+(?P<name>\w+)", |_| SymbolKind::Class),
            ],
        },
        LanguageRule {
            language: "JavaScript",
            extensions: &[".js", ".ts", ".jsx", ".tsx"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![
                exclusive(r"^\s*(?:async\s+)?function\s+(?P<name>\w+)", |_| {
                    SymbolKind::Function
                }),
                exclusive(
                    r"^\s*(?:const|let|var)\s+(?P<name>\w+)\s*=\s*(?:async\s+)?(?:\(|function)",
                    |_| SymbolKind::Function,
                ),
            ],
        },
        LanguageRule {
            language: "Go",
            extensions: &[".go"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![
                exclusive(r"^func\s+(?:\([^)]*\)\s*)?(?P<name>\w+)", |_| {
                    SymbolKind::Function
                }),
                exclusive(
                    r"^type\s+(?P<name>\w+)\s+(?P<kind>struct|interface)\b",
                    keyword_kind,
                ),
            ],
        },
        LanguageRule {
            language: "Rust",
            extensions: &[".rs"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![
                exclusive(
                    r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(?P<name>\w+)",
                    |_| SymbolKind::Function,
                ),
                exclusive(
                    r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?P<kind>struct|enum|trait)\s+(?P<name>\w+)",
                    keyword_kind,
                ),
            ],
        },
        LanguageRule {
            language: "Ruby",
            extensions: &[".rb"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![
                exclusive(r"^\s*def\s+(?:self\.)?(?P<name>\w+[?!=]?)", |_| {
                    SymbolKind::Method
                }),
                exclusive(r"^\s*(?P<kind>class|module)\s+(?P<name>[A-Z]\w*)", keyword_kind),
            ],
        },
        LanguageRule {
            language: "SQL",
            extensions: &[".sql"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![exclusive(
                r"(?i)^\s*create\s+(?:or\s+replace\s+)?(?P<kind>procedure|function|table|view)\s+(?P<name>[\w.]+)",
                keyword_kind,
            )],
        },
        LanguageRule {
            language: "PL/I",
            extensions: &[".pli"],
            keyword_shape: TokenShape::Plain,
            patterns: vec![exclusive(
                r"(?i)^\s*(?P<name>\w+)\s*:\s*(?:PROC|PROCEDURE)\b",
                |_| SymbolKind::Procedure,
            )],
        },
    ]
});

/// Look up the rule for a lowercase, dot-prefixed extension.
pub fn rule_for(ext: &str) -> Option<&'static LanguageRule> {
    RULES.iter().find(|rule| rule.extensions.contains(&ext))
}

impl LanguageRule {
    fn match_line(&self, line: &str, line_no: usize, out: &mut Vec<SymbolRecord>) {
        let mut exclusive_taken = false;
        for p in &self.patterns {
            if p.slot == Slot::Exclusive && exclusive_taken {
                continue;
            }
            let Some(caps) = p.regex.captures(line) else {
                continue;
            };
            if let Some(ret) = caps.name("ret") {
                if NOT_A_RETURN_TYPE.contains(&ret.as_str()) {
                    continue;
                }
            }
            let Some(name) = caps.name("name") else {
                continue;
            };
            out.push(SymbolRecord {
                name: name.as_str().to_string(),
                kind: (p.kind)(&caps),
                line: line_no,
            });
            if p.slot == Slot::Exclusive {
                exclusive_taken = true;
            }
        }
    }

    pub fn extract(&self, content: &str) -> Vec<SymbolRecord> {
        let mut out = Vec::new();
        for (i, line) in content.split('\n').enumerate() {
            self.match_line(line.trim_end_matches('\r'), i + 1, &mut out);
        }
        out
    }
}

/// Symbols in appearance order; empty for extensions without a rule.
pub fn extract_symbols(content: &str, ext: &str) -> Vec<SymbolRecord> {
    rule_for(ext).map_or_else(Vec::new, |rule| rule.extract(content))
}
