use super::internal::InternalCoordinateSet;
use crate::model::residue::ResidueId;
use serde::Serialize;

/// A contiguous residue window whose one-letter codes equal the motif.
///
/// `start` and `end` are 0-based, inclusive indices into the chain's residues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub structure_id: String,
    pub model: usize,
    pub chain_id: String,
    pub start: usize,
    pub end: usize,
    pub first_residue: ResidueId,
    pub last_residue: ResidueId,
    pub sequence: String,
}

/// One match together with its extracted geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    #[serde(rename = "match")]
    pub matched: Match,
    pub geometry: InternalCoordinateSet,
}

impl From<(Match, InternalCoordinateSet)> for MatchRecord {
    fn from((matched, geometry): (Match, InternalCoordinateSet)) -> Self {
        Self { matched, geometry }
    }
}

/// A structure or chain that could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTarget {
    pub protein_id: String,
    /// `None` when the whole structure was skipped.
    pub chain_id: Option<String>,
    pub reason: String,
}

/// Ordered results of a run: records in scan order plus every skipped target.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScanReport {
    pub records: Vec<MatchRecord>,
    pub skipped: Vec<SkippedTarget>,
    pub structures_scanned: usize,
    pub chains_scanned: usize,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the matches of one scanned chain, keeping their order.
    pub fn push_chain(&mut self, hits: impl IntoIterator<Item = (Match, InternalCoordinateSet)>) {
        self.chains_scanned += 1;
        self.records.extend(hits.into_iter().map(MatchRecord::from));
    }

    pub fn skip_structure(&mut self, protein_id: &str, reason: impl ToString) {
        self.skipped.push(SkippedTarget {
            protein_id: protein_id.to_string(),
            chain_id: None,
            reason: reason.to_string(),
        });
    }

    pub fn skip_chain(&mut self, protein_id: &str, chain_id: &str, reason: impl ToString) {
        self.skipped.push(SkippedTarget {
            protein_id: protein_id.to_string(),
            chain_id: Some(chain_id.to_string()),
            reason: reason.to_string(),
        });
    }

    /// Appends `other` after everything already collected.
    pub fn merge(&mut self, other: ScanReport) {
        self.records.extend(other.records);
        self.skipped.extend(other.skipped);
        self.structures_scanned += other.structures_scanned;
        self.chains_scanned += other.chains_scanned;
    }

    #[inline]
    pub fn match_count(&self) -> usize {
        self.records.len()
    }

    pub fn residue_count(&self) -> usize {
        self.records.iter().map(|r| r.geometry.len()).sum()
    }
}

impl FromIterator<ScanReport> for ScanReport {
    fn from_iter<I: IntoIterator<Item = ScanReport>>(iter: I) -> Self {
        let mut merged = ScanReport::new();
        for report in iter {
            merged.merge(report);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(structure: &str, chain: &str, start: usize) -> (Match, InternalCoordinateSet) {
        (
            Match {
                structure_id: structure.to_string(),
                model: 1,
                chain_id: chain.to_string(),
                start,
                end: start + 2,
                first_residue: ResidueId::from(start as i32 + 1),
                last_residue: ResidueId::from(start as i32 + 3),
                sequence: "TAY".to_string(),
            },
            InternalCoordinateSet::default(),
        )
    }

    #[test]
    fn merge_preserves_scan_order_without_dedup() {
        let mut first = ScanReport::new();
        first.structures_scanned = 1;
        first.push_chain(vec![hit("1ABC", "A", 2), hit("1ABC", "A", 7)]);
        first.push_chain(vec![hit("1ABC", "B", 2)]);

        let mut second = ScanReport::new();
        second.structures_scanned = 1;
        second.push_chain(vec![hit("2XYZ", "A", 2)]);
        second.skip_chain("2XYZ", "C", "chain 'C' not found");

        let merged: ScanReport = vec![first, second].into_iter().collect();
        let order: Vec<(&str, &str, usize)> = merged
            .records
            .iter()
            .map(|r| {
                (
                    r.matched.structure_id.as_str(),
                    r.matched.chain_id.as_str(),
                    r.matched.start,
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![("1ABC", "A", 2), ("1ABC", "A", 7), ("1ABC", "B", 2), ("2XYZ", "A", 2)]
        );
        assert_eq!(merged.structures_scanned, 2);
        assert_eq!(merged.chains_scanned, 3);
        assert_eq!(merged.skipped.len(), 1);
        assert_eq!(merged.skipped[0].chain_id.as_deref(), Some("C"));
    }

    #[test]
    fn empty_chain_still_counts_as_scanned() {
        let mut report = ScanReport::new();
        report.push_chain(Vec::new());
        assert_eq!(report.chains_scanned, 1);
        assert_eq!(report.match_count(), 0);
        assert_eq!(report.residue_count(), 0);
    }

    #[test]
    fn structure_skip_has_no_chain() {
        let mut report = ScanReport::new();
        report.skip_structure("BAD1", "unreadable");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped"][0]["chain_id"], serde_json::Value::Null);
        assert_eq!(json["skipped"][0]["reason"], "unreadable");
    }
}
