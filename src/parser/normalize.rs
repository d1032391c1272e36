//! Unicode normalization applied to every source line before classification.
//!
//! Standard PDF core fonts cannot draw most symbols, so arrows, check marks,
//! smart quotes, and a handful of math symbols are replaced with ASCII
//! spellings. Each table entry maps one character to text that contains no
//! other table character, so the result does not depend on replacement order.

use unicode_normalization::UnicodeNormalization;

/// Characters removed outright (joiners and variation selectors).
const STRIPPED: &[char] = &['\u{200B}', '\u{200D}', '\u{FE0E}', '\u{FE0F}'];

/// Fixed substitution table.
const REPLACEMENTS: &[(char, &str)] = &[
    // Arrows
    ('→', "->"),
    ('⇒', "=>"),
    ('⇔', "<=>"),
    ('↔', "<->"),
    ('↦', "|->"),
    ('⇠', "->>"),
    ('↣', "->>"),
    // Status marks
    ('✓', "OK"),
    ('✅', "OK"),
    ('🟢', "OK"),
    ('✗', "NO"),
    ('❌', "NO"),
    ('🟡', "WARN"),
    ('⚠', "WARN"),
    ('🔴', "CRIT"),
    ('ℹ', "INFO"),
    ('💡', "TIP"),
    // Quotes and dashes
    ('‘', "'"),
    ('’', "'"),
    ('“', "\""),
    ('”', "\""),
    ('„', "\""),
    ('—', "-"),
    ('–', "-"),
    ('‐', "-"),
    ('‑', "-"),
    // Math
    ('≈', "~="),
    ('±', "+/-"),
    ('⊕', " XOR "),
    ('∪', " U "),
    ('⋈', "JOIN"),
    ('⨝', "JOIN"),
    ('÷', "DIV"),
];

/// Normalize one line.
pub fn normalize_line(line: &str) -> String {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut out = String::with_capacity(line.len());

    for c in line.nfkc() {
        if STRIPPED.contains(&c) {
            continue;
        }
        if let Some((_, replacement)) = REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
            continue;
        }
        if is_pictograph(c) {
            continue;
        }
        out.push(c);
    }

    out
}

/// Normalize every line of a document.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines.iter().map(|l| normalize_line(l.as_ref())).collect()
}

/// Emoji and dingbat ranges the core fonts have no glyphs for.
fn is_pictograph(c: char) -> bool {
    matches!(c as u32, 0x1F300..=0x1FAFF | 0x2600..=0x27BF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_marks() {
        assert_eq!(normalize_line("a → b ⇒ c"), "a -> b => c");
        assert_eq!(normalize_line("✓ listo, ✗ falta"), "OK listo, NO falta");
        assert_eq!(normalize_line("⚠️ cuidado"), "WARN cuidado");
    }

    #[test]
    fn test_smart_quotes() {
        assert_eq!(normalize_line("“hola” ‘chau’"), "\"hola\" 'chau'");
    }

    #[test]
    fn test_pictographs_removed() {
        assert_eq!(normalize_line("ok 🚀 listo"), "ok  listo");
    }

    #[test]
    fn test_unmapped_passthrough() {
        assert_eq!(normalize_line("Caché año ∩ ∈"), "Caché año ∩ ∈");
    }

    #[test]
    fn test_trailing_newline_stripped() {
        assert_eq!(normalize_line("texto\r\n"), "texto");
    }

    #[test]
    fn test_normalize_lines() {
        let lines = vec!["x → y", "plain"];
        assert_eq!(normalize_lines(&lines), vec!["x -> y", "plain"]);
    }
}
