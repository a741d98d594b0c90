use super::error::Error;
use super::sequence::SENTINEL;
use std::fmt;
use std::str::FromStr;

/// An exact amino-acid motif: a non-empty string of ASCII letters.
///
/// Matching is case-sensitive, so `"tay"` never matches a sequence view, which
/// is always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Motif(String);

impl Motif {
    pub fn new(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::invalid_motif(text, "motif must not be empty"));
        }
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(Error::invalid_motif(
                text,
                format!("'{bad}' is not an ASCII letter"),
            ));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when every letter is an upper-case one-letter code.
    pub fn is_upper_case(&self) -> bool {
        self.0.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Motif {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// All start offsets where `motif` occurs in `sequence`, overlaps included,
/// in ascending order.
pub fn find_starts(sequence: &[u8], motif: &[u8]) -> Vec<usize> {
    if motif.is_empty() || motif.len() > sequence.len() {
        return Vec::new();
    }
    sequence
        .windows(motif.len())
        .enumerate()
        .filter(|(_, window)| *window == motif)
        .map(|(start, _)| start)
        .collect()
}

/// Like [`find_starts`] over a single contiguous run, except that a window
/// containing the [`SENTINEL`] never matches.
pub fn find_in_run(codes: &[u8], motif: &Motif) -> Vec<usize> {
    let width = motif.len();
    find_starts(codes, motif.as_bytes())
        .into_iter()
        .filter(|&start| !codes[start..start + width].contains(&SENTINEL))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brute_force(sequence: &[u8], motif: &[u8]) -> Vec<usize> {
        let mut starts = Vec::new();
        if motif.len() > sequence.len() {
            return starts;
        }
        for i in 0..=sequence.len() - motif.len() {
            if &sequence[i..i + motif.len()] == motif {
                starts.push(i);
            }
        }
        starts
    }

    #[test]
    fn motif_rejects_empty_and_non_letters() {
        assert!(matches!(Motif::new(""), Err(Error::InvalidMotif { .. })));
        assert!(matches!(Motif::new("   "), Err(Error::InvalidMotif { .. })));
        let err = Motif::new("TA1Y").unwrap_err();
        assert_eq!(err.to_string(), "invalid motif 'TA1Y': '1' is not an ASCII letter");
        assert!(Motif::new("TA-Y").is_err());
    }

    #[test]
    fn motif_keeps_case() {
        let motif: Motif = " tay ".parse().unwrap();
        assert_eq!(motif.as_str(), "tay");
        assert!(!motif.is_upper_case());
        assert!(Motif::new("TAY").unwrap().is_upper_case());
    }

    #[test]
    fn overlapping_matches_are_all_reported() {
        assert_eq!(find_starts(b"AAAA", b"AA"), vec![0, 1, 2]);
        assert_eq!(find_starts(b"AAA", b"AA"), vec![0, 1]);
    }

    #[test]
    fn no_match_or_motif_longer_than_sequence_is_empty() {
        assert!(find_starts(b"MKT", b"MKTA").is_empty());
        assert!(find_starts(b"MKTAYIAK", b"WW").is_empty());
        assert!(find_starts(b"", b"A").is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(find_starts(b"MKTAYIAK", b"tay").is_empty());
        assert_eq!(find_starts(b"MKTAYIAK", b"TAY"), vec![2]);
    }

    #[test]
    fn sentinel_never_matches() {
        let motif = Motif::new("AXG").unwrap();
        assert!(find_in_run(b"AXG", &motif).is_empty());
        let motif = Motif::new("AG").unwrap();
        assert!(find_in_run(b"AXG", &motif).is_empty());
        assert_eq!(find_in_run(b"AGXAG", &motif), vec![0, 3]);
    }

    #[test]
    fn runs_searched_independently_never_span_a_gap() {
        // residues 1,2,3 | 6,7,8 as two runs
        let motif = Motif::new("DA").unwrap();
        let joined = find_starts(b"ACDACD", motif.as_bytes());
        assert_eq!(joined, vec![2]);
        assert!(find_in_run(b"ACD", &motif).is_empty());
    }

    fn sequence_over(alphabet: &'static [u8]) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(proptest::sample::select(alphabet), 0..60)
    }

    proptest! {
        #[test]
        fn find_starts_agrees_with_brute_force(
            sequence in sequence_over(b"ACGT"),
            motif in proptest::collection::vec(proptest::sample::select(b"ACGT".as_slice()), 1..5),
        ) {
            prop_assert_eq!(find_starts(&sequence, &motif), brute_force(&sequence, &motif));
        }

        #[test]
        fn every_reported_window_equals_motif(
            sequence in sequence_over(b"AGX"),
            motif in "[AG]{1,3}",
        ) {
            let motif = Motif::new(&motif).unwrap();
            for start in find_in_run(&sequence, &motif) {
                let window = &sequence[start..start + motif.len()];
                prop_assert_eq!(window, motif.as_bytes());
                prop_assert!(!window.contains(&SENTINEL));
            }
        }
    }
}
