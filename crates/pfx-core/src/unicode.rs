//! Case folding and character-boundary prefix enumeration.

/// Fold a string to its canonical lower-case key form.
///
/// Each character is mapped through lowercase, then uppercase, then lowercase
/// again, independently of its neighbours. The round trip collapses
/// characters whose cases do not map back to each other: `ς`, `σ` and `Σ`
/// all fold to `σ`; `ß`, `ẞ` and `SS` all fold to `ss`. The result is the
/// same for `s`, `s.to_uppercase()` and `s.to_lowercase()`.
///
/// Folding works per character, so it distributes over concatenation:
/// `fold_case(a + b)` is always `fold_case(a) + fold_case(b)`, and the folded
/// prefix of a word is a prefix of the folded word.
pub fn fold_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        out.extend(fold_char(c));
    }
    out
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
}

/// Non-empty leading substrings of `s`, shortest first, one per character.
///
/// A word of `n` characters yields exactly `n` prefixes; no prefix ends
/// inside a multi-byte character.
pub fn char_prefixes(s: &str) -> impl Iterator<Item = &str> + '_ {
    s.char_indices().map(move |(i, c)| &s[..i + c.len_utf8()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case("Apple"), "apple");
        assert_eq!(fold_case("BANANA"), "banana");
        assert_eq!(fold_case("CaFÉ"), "café");
        assert_eq!(fold_case(""), "");
        assert_eq!(fold_case("hello-world 1"), "hello-world 1");
    }

    #[test]
    fn test_fold_case_distributes_over_concat() {
        let word = "ΟΔΟΣΣ";
        let folded = fold_case(word);
        for prefix in char_prefixes(word) {
            assert!(folded.starts_with(&fold_case(prefix)), "prefix {prefix}");
        }
    }

    #[test]
    fn test_fold_case_asymmetric_cases() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("οδος"), "οδοσ");
        assert_eq!(fold_case("straße"), "strasse");
        assert_eq!(fold_case("STRAẞE"), "strasse");
        assert_eq!(fold_case("STRASSE"), "strasse");
        assert_eq!(fold_case("ıi"), "ii");
        assert_eq!(fold_case("İ"), "i\u{307}");
    }

    #[test]
    fn test_fold_case_stable_under_case_mapping() {
        for s in ["ΟΔΟΣ", "οδος", "Straße", "İstanbul", "ǅemal", "naïve", "ΐ", "ﬁle"] {
            let folded = fold_case(s);
            assert_eq!(fold_case(&s.to_uppercase()), folded, "upper {s}");
            assert_eq!(fold_case(&s.to_lowercase()), folded, "lower {s}");
        }
    }

    #[test]
    fn test_fold_case_idempotent() {
        for s in ["İstanbul", "STRASSE", "Ǆemal", "naïve", "ς"] {
            let once = fold_case(s);
            assert_eq!(fold_case(&once), once);
        }
    }

    #[test]
    fn test_char_prefixes() {
        let prefixes: Vec<&str> = char_prefixes("hello").collect();
        assert_eq!(prefixes, vec!["h", "he", "hel", "hell", "hello"]);
    }

    #[test]
    fn test_char_prefixes_multibyte() {
        let prefixes: Vec<&str> = char_prefixes("café").collect();
        assert_eq!(prefixes, vec!["c", "ca", "caf", "café"]);
        let prefixes: Vec<&str> = char_prefixes("かんじ").collect();
        assert_eq!(prefixes, vec!["か", "かん", "かんじ"]);
    }

    #[test]
    fn test_char_prefixes_empty() {
        assert_eq!(char_prefixes("").count(), 0);
        assert_eq!(char_prefixes("naïve").count(), 5);
    }
}
