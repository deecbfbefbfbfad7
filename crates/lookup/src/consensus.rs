//! Title-consensus heuristic.
//!
//! Search result titles for a device code mostly repeat the same
//! "brand + model" stem, each with its own trailing noise ("... Review",
//! "... specs", "... vs <other device>"). The heuristic anchors on known
//! brand words, cuts a clean fragment out of each title, and picks the
//! fragment most of the titles agree on.

use crate::consts;
use devinfo_brands::BrandRegistry;

/// Pick the most likely device name from a set of filtered titles.
///
/// 1. Collect *anchor tokens*: every whitespace-delimited word (of length
///    two or more) that the registry recognizes as a brand.
/// 2. For each title and each anchor found within it, extract a *fragment*:
///    the substring starting at the anchor, truncated at the first character
///    that is not an ASCII letter, digit or whitespace, then truncated again
///    at any standalone `vs` token (comparison titles name a second device
///    after it), and trimmed.
/// 3. Tally each distinct fragment, counting every extracted fragment that
///    repeats it word-for-word at its start - so the stem shared by
///    "X Review", "X specs" and "X" itself outscores each one-off
///    continuation.
/// 4. Return the fragment with the highest tally. Ties go to the fragment
///    seen first, which makes the result deterministic in title order.
pub fn consensus(titles: &[&str], brands: &BrandRegistry) -> Option<String> {
    let mut anchors: Vec<&str> = Vec::new();
    for title in titles {
        for word in title.split_whitespace() {
            if word.len() >= 2 && brands.contains(word) && !anchors.contains(&word) {
                anchors.push(word);
            }
        }
    }

    let mut fragments: Vec<String> = Vec::new();
    for title in titles {
        for anchor in &anchors {
            if let Some(start) = title.find(anchor) {
                let fragment = device_fragment(&title[start..]);
                if !fragment.is_empty() {
                    fragments.push(fragment);
                }
            }
        }
    }

    // Keys in first-seen order so the tie-break below is stable.
    let mut tally: Vec<(String, usize)> = Vec::new();
    for fragment in &fragments {
        if !tally.iter().any(|(key, _)| key == fragment) {
            tally.push((fragment.clone(), 0));
        }
    }
    for (key, count) in &mut tally {
        *count = fragments.iter().filter(|fragment| is_stem_of(key, fragment)).count();
    }

    let mut best: Option<(&str, usize)> = None;
    for (key, count) in &tally {
        if best.is_none_or(|(_, top)| *count > top) {
            best = Some((key, *count));
        }
    }
    best.map(|(key, _)| key.to_string())
}

/// Cut a "brand + model" fragment out of a title tail that starts at an
/// anchor token.
fn device_fragment(tail: &str) -> String {
    let end = tail
        .find(|c: char| !(c.is_ascii_alphanumeric() || c.is_whitespace()))
        .unwrap_or(tail.len());
    let mut fragment = tail[..end].trim();
    if let Some(comparison) = consts::VS_TOKEN_REGEX.find(fragment) {
        fragment = fragment[..comparison.start()].trim_end();
    }
    fragment.to_string()
}

/// `true` when `fragment` starts with `key` on a whole-word boundary.
fn is_stem_of(key: &str, fragment: &str) -> bool {
    fragment.strip_prefix(key).is_some_and(|rest| {
        rest.chars().next().is_none_or(char::is_whitespace)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn samsung_only() -> BrandRegistry {
        BrandRegistry::from_names(["Samsung"])
    }

    #[test]
    fn shared_stem_wins_over_one_off_continuations() {
        let titles = [
            "Samsung Galaxy S23 Ultra Review",
            "Samsung Galaxy S23 Ultra vs iPhone 14",
            "Samsung Galaxy S23 Ultra specs",
        ];
        let device = consensus(&titles, &samsung_only());
        assert_eq!(device.as_deref(), Some("Samsung Galaxy S23 Ultra"));
    }

    #[rstest]
    #[case("Samsung Galaxy S23 Ultra vs iPhone 14", "Samsung Galaxy S23 Ultra")]
    #[case("Samsung Galaxy S23 Ultra VS iPhone 14", "Samsung Galaxy S23 Ultra")]
    #[case("Samsung Galaxy S23 Ultra vs", "Samsung Galaxy S23 Ultra")]
    #[case("Samsung Galaxy A52 (SM-A525F) specifications", "Samsung Galaxy A52")]
    #[case("Samsung Galaxy Watch, reviewed", "Samsung Galaxy Watch")]
    fn fragment_extraction(#[case] title: &str, #[case] expected: &str) {
        let device = consensus(&[title], &samsung_only());
        assert_eq!(device.as_deref(), Some(expected));
    }

    #[test]
    fn vs_inside_a_word_is_not_a_comparison() {
        let device = consensus(&["Samsung Advs 5"], &samsung_only());
        assert_eq!(device.as_deref(), Some("Samsung Advs 5"));
    }

    #[test]
    fn titles_without_brand_tokens_contribute_nothing() {
        let device = consensus(&["Best phones of 2023", "Flagship showdown"], &samsung_only());
        assert_eq!(device, None);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(consensus(&[], &samsung_only()), None);
    }

    #[test]
    fn tie_goes_to_first_seen_fragment() {
        let titles = ["Samsung Galaxy A52: hands on", "Samsung Galaxy S23: hands on"];
        let device = consensus(&titles, &samsung_only());
        assert_eq!(device.as_deref(), Some("Samsung Galaxy A52"));
    }

    #[test]
    fn anchor_match_is_case_sensitive_within_the_title() {
        // "samsung" is a recognized anchor token, and it is searched for in
        // the casing the title used.
        let device = consensus(&["samsung Galaxy M31 price"], &samsung_only());
        assert_eq!(device.as_deref(), Some("samsung Galaxy M31 price"));
    }

    #[test]
    fn stem_boundary_is_a_whole_word() {
        // "Samsung Galaxy S2" must not absorb the count of "Samsung Galaxy S23".
        let titles = [
            "Samsung Galaxy S2!",
            "Samsung Galaxy S23 Ultra Review",
            "Samsung Galaxy S23 Ultra specs",
            "Samsung Galaxy S23 Ultra",
        ];
        let device = consensus(&titles, &samsung_only());
        assert_eq!(device.as_deref(), Some("Samsung Galaxy S23 Ultra"));
    }
}
