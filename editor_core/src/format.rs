//! Best-effort SQL re-flow.
//!
//! `format_basic` is a heuristic, not a parser. It only breaks lines before
//! clause keywords and tidies whitespace. Keywords inside string literals or
//! comments are broken too, and original indentation is lost. The output is
//! never validated as SQL.
//!
//! All keywords are matched in one pass, longest first, rather than one
//! keyword at a time in list order. Walking the list would split `LEFT JOIN`
//! at its `JOIN` before reaching `LEFT JOIN`; the single pass keeps compound
//! keywords on one line.

use regex::Regex;
use std::sync::OnceLock;

/// Clause keywords that start a new line, in precedence order
pub const CLAUSE_KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
];

fn clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Longer keywords first so `LEFT JOIN` wins over `JOIN` at the same spot
        let mut keywords: Vec<&str> = CLAUSE_KEYWORDS.to_vec();
        keywords.sort_by_key(|keyword| std::cmp::Reverse(keyword.len()));
        let alternation = keywords
            .iter()
            .map(|keyword| {
                keyword
                    .split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("clause pattern is valid")
    })
}

/// Puts every clause keyword on a new line, trims each line and drops
/// blank ones. Keyword casing is left as typed.
pub fn format_basic(sql: &str) -> String {
    let broken = clause_pattern().replace_all(sql, "\n$0");
    broken
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
