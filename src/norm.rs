//! Text-level canonicalization of expression strings.
//!
//! The normalizer rewrites spacing and redundant parentheses without changing
//! the logical meaning of the text. It works on raw strings, independently of
//! the tree parser, and is used as a secondary pass for answer matching when
//! direct comparison fails.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(AND|OR|XOR|NOT)\b").unwrap());

/// Normalize the spacing and redundant parentheses of an expression string.
///
/// The rewrite is purely textual and idempotent. Rules, in order:
/// 1. runs of whitespace collapse to single spaces, ends are trimmed;
/// 2. the first ```=``` gets exactly one space on each side;
/// 3. the AND/OR/XOR/NOT keywords and parenthesized groups get exactly one
///    space around them (no space just inside a parenthesis);
/// 4. outer parentheses wrapping the entire right-hand side are stripped;
/// 5. legacy quirk: when the right-hand side begins with a parenthesized NOT
///    term, the space after ```=``` is omitted, reproducing the historical
///    output ```Z =(NOT (A AND B)) OR C```. The quirk is a fixed point of the
///    rewrite, which keeps rule 1-4 outputs and rule 5 outputs stable alike.
///
/// ```
/// use gatekit::normalize_expression;
///
/// assert_eq!(normalize_expression("A=B AND C"), "A = B AND C");
/// assert_eq!(
///     normalize_expression("Z = ((NOT (A AND B)) OR C)"),
///     "Z =(NOT (A AND B)) OR C"
/// );
/// ```
pub fn normalize_expression(text: &str) -> String {
    let text = RE_WHITESPACE.replace_all(text, " ");
    let text = text.trim();

    let (lhs, rhs) = match text.find('=') {
        Some(idx) => (Some(text[..idx].trim_end()), &text[idx + 1..]),
        None => (None, text),
    };

    let rhs = RE_KEYWORD.replace_all(rhs, " $1 ");
    let rhs = space_parens(&rhs);
    let rhs = strip_outer_parens(&rhs);

    match lhs {
        None => rhs.to_string(),
        Some(lhs) => {
            let sep = match starts_with_not_group(rhs) {
                true => "",
                false => " ",
            };
            format!("{} ={}{}", lhs, sep, rhs).trim_end().to_string()
        }
    }
}

/// Rebuild the string with one space around parenthesized groups and none just inside.
fn space_parens(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '(' => {
                if matches!(out.chars().last(), Some(p) if p != ' ' && p != '(') {
                    out.push(' ');
                }
                out.push('(');
            }
            ')' => {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push(')');
            }
            ' ' => {
                if !out.ends_with(' ') && !out.ends_with('(') && !out.is_empty() {
                    out.push(' ');
                }
            }
            _ => {
                if out.ends_with(')') {
                    out.push(' ');
                }
                out.push(c);
            }
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Strip balanced parentheses spanning the whole string, as often as they wrap it.
fn strip_outer_parens(s: &str) -> &str {
    let mut s = s.trim();
    while wrapped_by_outer_parens(s) {
        s = s[1..s.len() - 1].trim();
    }
    s
}

fn wrapped_by_outer_parens(s: &str) -> bool {
    if s.len() < 2 || !s.starts_with('(') || !s.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    for (idx, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return idx == s.len() - 1;
                }
            }
            _ => (),
        }
    }
    false
}

fn starts_with_not_group(rhs: &str) -> bool {
    let rhs = rhs.as_bytes();
    rhs.len() > 5 && rhs[0] == b'(' && rhs[1..5].eq_ignore_ascii_case(b"NOT ")
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn spacing_rules() {
        assert_eq!(normalize_expression("A=B AND C"), "A = B AND C");
        assert_eq!(normalize_expression("  A  =  B   AND  C "), "A = B AND C");
        assert_eq!(normalize_expression("Q = NOT(A)"), "Q = NOT (A)");
        assert_eq!(normalize_expression("Q = A AND( B OR C )"), "Q = A AND (B OR C)");
        assert_eq!(normalize_expression("(NOT A)AND B"), "(NOT A) AND B");
    }

    #[test]
    fn keywords_are_whole_words() {
        // no keyword spacing inside longer identifiers
        assert_eq!(normalize_expression("Q=ANDY"), "Q = ANDY");
        assert_eq!(normalize_expression("Q=NOTE OR A"), "Q = NOTE OR A");
    }

    #[test]
    fn outer_parens_are_stripped() {
        assert_eq!(normalize_expression("Q = (A AND B)"), "Q = A AND B");
        assert_eq!(normalize_expression("Q = ((A AND B))"), "Q = A AND B");
        // parens which do not span the whole right side stay
        assert_eq!(
            normalize_expression("Q = (A AND B) OR C"),
            "Q = (A AND B) OR C"
        );
        assert_eq!(normalize_expression("((A))"), "A");
    }

    #[test]
    fn legacy_not_quirk() {
        assert_eq!(
            normalize_expression("Z = ((NOT (A AND B)) OR C)"),
            "Z =(NOT (A AND B)) OR C"
        );
        // already-quirked text is stable
        assert_eq!(
            normalize_expression("Z =(NOT (A AND B)) OR C"),
            "Z =(NOT (A AND B)) OR C"
        );
        // the quirk needs a real NOT keyword, not a longer word
        assert_eq!(normalize_expression("Z = (NOTE) OR C"), "Z = (NOTE) OR C");
    }

    #[test]
    fn idempotence() {
        let samples = [
            "A=B AND C",
            "  q   =  (a and b)  ",
            "Z = ((NOT (A AND B)) OR C)",
            "Q = NOT (NOT (NOT (NOT A)))",
            "(A XOR B) OR ((C))",
            "Q =",
            "",
            "garbage ) ( text",
        ];
        for s in samples {
            let once = normalize_expression(s);
            assert_eq!(normalize_expression(&once), once, "not idempotent: {:?}", s);
        }
    }
}
