//! Frequency-ranked keyword summaries.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_CODE_KEYWORDS: usize = 20;
pub const DEFAULT_DOC_KEYWORDS: usize = 50;
pub const DEFAULT_DOC_SUMMARY_KEYWORDS: usize = 30;

/// Which identifier shapes count as one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenShape {
    /// Acronym-like tokens of 3+ characters or identifier-like tokens of 4+.
    #[default]
    Plain,
    /// Also keeps upper-case hyphen-joined names (`WS-OUT`) whole. Only
    /// meaningful where `-` cannot be an operator between identifiers.
    HyphenatedNames,
}

const ACRONYM: &str = r"\b[A-Z][A-Z0-9_]{2,}\b";
const IDENTIFIER: &str = r"\b[A-Za-z_][A-Za-z0-9_]{3,}\b";

static PLAIN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{ACRONYM}|{IDENTIFIER}")).expect("token pattern must compile")
});

static HYPHENATED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b[A-Z][A-Z0-9_]*(?:-[A-Z0-9_]+)+\b|{ACRONYM}|{IDENTIFIER}"
    ))
    .expect("token pattern must compile")
});

impl TokenShape {
    fn regex(self) -> &'static Regex {
        match self {
            TokenShape::Plain => &*PLAIN_TOKEN,
            TokenShape::HyphenatedNames => &*HYPHENATED_TOKEN,
        }
    }
}

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // English
        "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "ANY", "CAN", "HAS", "HAD",
        "HER", "HIS", "WAS", "ONE", "OUR", "OUT", "ITS", "MAY", "WHO", "HOW", "THIS", "THAT",
        "WITH", "HAVE", "FROM", "THEY", "WILL", "WHAT", "WHEN", "WHERE", "WHICH", "WHILE",
        "YOUR", "THERE", "THEIR", "THEM", "THEN", "THAN", "THESE", "THOSE", "WOULD", "COULD",
        "SHOULD", "ABOUT", "INTO", "OVER", "SOME", "SUCH", "ALSO", "BEEN", "WERE", "EACH",
        "MORE", "MOST", "ONLY", "OTHER", "VERY", "JUST", "BEING", "BOTH", "DOES", "DONE",
        // Code
        "PUBLIC", "PRIVATE", "PROTECTED", "INTERNAL", "STATIC", "FINAL", "CONST", "VOID",
        "RETURN", "CLASS", "FUNCTION", "VAR", "LET", "ELSE", "ELIF", "CASE", "SWITCH",
        "BREAK", "CONTINUE", "DEFAULT", "TRUE", "FALSE", "NULL", "NONE", "SELF",
        "IMPORT", "EXPORT", "PACKAGE", "INT", "STRING", "BOOL", "BOOLEAN", "CHAR", "FLOAT",
        "DOUBLE", "LONG", "NEW", "DEF", "PASS", "ASYNC", "AWAIT", "TRY", "CATCH", "THROW",
        "THROWS", "FINALLY", "EXTENDS", "IMPLEMENTS", "INTERFACE", "STRUCT", "ENUM", "IMPL",
        "USE", "MOD", "PUB", "FUNC", "LAMBDA", "YIELD", "UNDEFINED", "REQUIRE", "INCLUDE",
        "END", "BEGIN",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalized tokens with their counts, most frequent first. Ties keep the
/// order in which tokens were first seen.
pub fn keyword_frequencies(text: &str, shape: TokenShape) -> Vec<(String, usize)> {
    // token -> (count, first-seen position)
    let mut table: HashMap<String, (usize, usize)> = HashMap::new();
    for m in shape.regex().find_iter(text) {
        let token = m.as_str().to_uppercase();
        if is_stopword(&token) {
            continue;
        }
        let next = table.len();
        table.entry(token).or_insert((0, next)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = table
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by_key(|&(_, count, first)| (Reverse(count), first));
    ranked
        .into_iter()
        .map(|(token, count, _)| (token, count))
        .collect()
}

/// At most `max` keywords for `text`.
pub fn extract_keywords(text: &str, max: usize, shape: TokenShape) -> Vec<String> {
    keyword_frequencies(text, shape)
        .into_iter()
        .take(max)
        .map(|(token, _)| token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_frequency_case_folded() {
        let freq = keyword_frequencies("Widget widget widget Gadget", TokenShape::Plain);
        assert_eq!(
            freq,
            vec![("WIDGET".to_string(), 3), ("GADGET".to_string(), 1)]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let text = "zebra apple mango apple zebra mango";
        let kw = extract_keywords(text, 10, TokenShape::Plain);
        assert_eq!(kw, vec!["ZEBRA", "APPLE", "MANGO"]);
    }

    #[test]
    fn drops_stopwords_and_short_tokens() {
        let kw = extract_keywords(
            "public void run() { return the foo; } SQL abc",
            10,
            TokenShape::Plain,
        );
        assert_eq!(kw, vec!["SQL"]);
    }

    #[test]
    fn keeps_hyphenated_cobol_names() {
        let text = "MOVE CUST-NAME TO WS-OUT. MOVE CUST-NAME";
        let kw = extract_keywords(text, 3, TokenShape::HyphenatedNames);
        assert_eq!(kw, vec!["MOVE", "CUST-NAME", "WS-OUT"]);
    }

    #[test]
    fn subtraction_does_not_fuse_identifiers() {
        let text = "int last = buf[BUFSIZE-1];\n\
                    memcpy(out, in, BUFSIZE-HEADER_LEN);\n\
                    if (n > BUFSIZE) return;\n";
        let freq = keyword_frequencies(text, TokenShape::Plain);
        assert_eq!(freq[0], ("BUFSIZE".to_string(), 3));
        assert!(freq.iter().all(|(token, _)| !token.contains('-')));
        assert!(freq.contains(&("HEADER_LEN".to_string(), 1)));
    }

    #[test]
    fn respects_maximum() {
        let text = "alpha bravo charlie delta echo foxtrot";
        assert_eq!(extract_keywords(text, 2, TokenShape::Plain).len(), 2);
        assert!(extract_keywords(text, 0, TokenShape::Plain).is_empty());
    }
}
