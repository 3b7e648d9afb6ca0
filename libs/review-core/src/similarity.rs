//! Similarity scoring between expected and recognized text.

/// Similarity score between two strings on a 0-100 scale.
///
/// Comparison is case-insensitive and ignores leading/trailing whitespace.
/// An exact match after normalization scores 100; two empty strings score 0
/// so that empty input is never rewarded. Anything else is scored by
/// normalized edit distance over characters.
pub fn accuracy(expected: &str, recognized: &str) -> u8 {
    let expected = expected.trim().to_lowercase();
    let recognized = recognized.trim().to_lowercase();

    if expected.is_empty() && recognized.is_empty() {
        return 0;
    }
    if expected == recognized {
        return 100;
    }

    let a: Vec<char> = expected.chars().collect();
    let b: Vec<char> = recognized.chars().collect();
    let distance = edit_distance(&a, &b);
    let max_len = a.len().max(b.len());

    let ratio = 1.0 - distance as f64 / max_len as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Levenshtein distance with unit insert/delete/substitute costs.
///
/// A whitespace character aligned against a non-whitespace character
/// contributes no substitution cost.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let ca = a[i - 1];
            let cb = b[j - 1];
            let cost = if ca == cb || ca.is_whitespace() != cb.is_whitespace() {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(accuracy("Hello", "Hello"), 100);
        assert_eq!(accuracy("bonjour le monde", "bonjour le monde"), 100);
    }

    #[test]
    fn normalization_ignores_case_and_outer_whitespace() {
        assert_eq!(accuracy("Hello", "  hello  "), 100);
        assert_eq!(accuracy("HELLO WORLD", "hello world"), 100);
    }

    #[test]
    fn both_empty_scores_zero() {
        assert_eq!(accuracy("", ""), 0);
        assert_eq!(accuracy("   ", ""), 0);
    }

    #[test]
    fn one_empty_scores_zero() {
        assert_eq!(accuracy("hello", ""), 0);
        assert_eq!(accuracy("", "hello"), 0);
    }

    #[test]
    fn single_substitution_in_five_chars() {
        // 1 substitution over max length 5.
        assert_eq!(accuracy("Hello", "Hallo"), 80);
    }

    #[test]
    fn disjoint_equal_length_strings_score_zero() {
        assert_eq!(accuracy("abc", "xyz"), 0);
        assert_eq!(accuracy("aaaa", "bbbb"), 0);
    }

    #[test]
    fn whitespace_against_letter_costs_nothing() {
        // "a b" vs "axb": the space aligns with 'x' at no substitution cost.
        assert_eq!(accuracy("a b", "axb"), 100);
    }

    #[test]
    fn unicode_is_compared_by_character() {
        // One substitution over four characters.
        assert_eq!(accuracy("über", "ober"), 75);
        assert_eq!(accuracy("こんにちは", "こんにちは"), 100);
    }

    #[test]
    fn distance_matches_known_pairs() {
        let d = |a: &str, b: &str| {
            edit_distance(
                &a.chars().collect::<Vec<_>>(),
                &b.chars().collect::<Vec<_>>(),
            )
        };
        assert_eq!(d("kitten", "sitting"), 3);
        assert_eq!(d("saturday", "sunday"), 3);
        assert_eq!(d("abc", ""), 3);
    }
}
