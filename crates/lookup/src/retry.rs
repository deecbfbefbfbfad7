//! Shortened-code candidates for the primary lookup retry loop.

/// Retries never go past this many shortened codes.
pub const MAX_RETRY_ATTEMPTS: usize = 3;
/// Codes this short are too ambiguous to retry with; a four-character prefix
/// matches half a manufacturer's catalogue.
pub const MIN_RETRY_LENGTH: usize = 4;

/// Derive the shortened codes to retry after a full-code lookup misses.
///
/// The first candidate is the substring before the first `/` when the code
/// has a regional-variant suffix (`SM-A525F/DS` -> `SM-A525F`), otherwise the
/// code minus its trailing character (`SM-A525F` -> `SM-A525`). Each further
/// candidate drops one more trailing character. At most
/// [`MAX_RETRY_ATTEMPTS`] candidates are produced and none of length
/// [`MIN_RETRY_LENGTH`] or shorter; codes already that short get no retries
/// at all.
pub fn retry_candidates(code: &str) -> Vec<String> {
    let mut current = match code.find('/') {
        Some(slash) => code[..slash].to_string(),
        None => {
            let mut shortened = code.to_string();
            shortened.pop();
            shortened
        },
    };
    let mut candidates = Vec::new();
    while candidates.len() < MAX_RETRY_ATTEMPTS && current.len() > MIN_RETRY_LENGTH {
        candidates.push(current.clone());
        current.pop();
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SM-A525F/DS", &["SM-A525F", "SM-A525", "SM-A52"])]
    #[case("SM-A525F", &["SM-A525", "SM-A52", "SM-A5"])]
    #[case("SM-S918B", &["SM-S918", "SM-S91", "SM-S9"])]
    #[case("ABCDEF", &["ABCDE"])]
    #[case("ABCDE", &[])]
    #[case("ABCD", &[])]
    #[case("A/B", &[])]
    #[case("", &[])]
    fn candidate_derivation(#[case] code: &str, #[case] expected: &[&str]) {
        assert_eq!(retry_candidates(code), expected);
    }

    #[test]
    fn slash_split_comes_before_length_truncation() {
        // The variant suffix is dropped whole, not character by character.
        assert_eq!(retry_candidates("SM-A525F/DS")[0], "SM-A525F");
    }

    #[test]
    fn bounded_attempts_and_length() {
        let candidates = retry_candidates("VERY-LONG-DEVICE-CODE-123456789");
        assert!(candidates.len() <= MAX_RETRY_ATTEMPTS);
        assert!(candidates.iter().all(|candidate| candidate.len() > MIN_RETRY_LENGTH));
    }
}
