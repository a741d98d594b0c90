use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized amino acid code: '{0}'")]
pub struct ParseAminoAcidError(String);

/// The twenty canonical amino acids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AminoAcid {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::ALA,
        AminoAcid::ARG,
        AminoAcid::ASN,
        AminoAcid::ASP,
        AminoAcid::CYS,
        AminoAcid::GLN,
        AminoAcid::GLU,
        AminoAcid::GLY,
        AminoAcid::HIS,
        AminoAcid::ILE,
        AminoAcid::LEU,
        AminoAcid::LYS,
        AminoAcid::MET,
        AminoAcid::PHE,
        AminoAcid::PRO,
        AminoAcid::SER,
        AminoAcid::THR,
        AminoAcid::TRP,
        AminoAcid::TYR,
        AminoAcid::VAL,
    ];

    pub fn one_letter(&self) -> char {
        match self {
            AminoAcid::ALA => 'A',
            AminoAcid::ARG => 'R',
            AminoAcid::ASN => 'N',
            AminoAcid::ASP => 'D',
            AminoAcid::CYS => 'C',
            AminoAcid::GLN => 'Q',
            AminoAcid::GLU => 'E',
            AminoAcid::GLY => 'G',
            AminoAcid::HIS => 'H',
            AminoAcid::ILE => 'I',
            AminoAcid::LEU => 'L',
            AminoAcid::LYS => 'K',
            AminoAcid::MET => 'M',
            AminoAcid::PHE => 'F',
            AminoAcid::PRO => 'P',
            AminoAcid::SER => 'S',
            AminoAcid::THR => 'T',
            AminoAcid::TRP => 'W',
            AminoAcid::TYR => 'Y',
            AminoAcid::VAL => 'V',
        }
    }

    pub fn three_letter(&self) -> &'static str {
        match self {
            AminoAcid::ALA => "ALA",
            AminoAcid::ARG => "ARG",
            AminoAcid::ASN => "ASN",
            AminoAcid::ASP => "ASP",
            AminoAcid::CYS => "CYS",
            AminoAcid::GLN => "GLN",
            AminoAcid::GLU => "GLU",
            AminoAcid::GLY => "GLY",
            AminoAcid::HIS => "HIS",
            AminoAcid::ILE => "ILE",
            AminoAcid::LEU => "LEU",
            AminoAcid::LYS => "LYS",
            AminoAcid::MET => "MET",
            AminoAcid::PHE => "PHE",
            AminoAcid::PRO => "PRO",
            AminoAcid::SER => "SER",
            AminoAcid::THR => "THR",
            AminoAcid::TRP => "TRP",
            AminoAcid::TYR => "TYR",
            AminoAcid::VAL => "VAL",
        }
    }

    pub fn from_one_letter(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|aa| aa.one_letter() == code)
    }

    /// Side-chain torsion atom quadruples, chi1 first.
    pub fn chi_atoms(&self) -> &'static [[&'static str; 4]] {
        const CHI1_CG: [&str; 4] = ["N", "CA", "CB", "CG"];
        match self {
            AminoAcid::ALA | AminoAcid::GLY => &[],
            AminoAcid::ARG => &[
                CHI1_CG,
                ["CA", "CB", "CG", "CD"],
                ["CB", "CG", "CD", "NE"],
                ["CG", "CD", "NE", "CZ"],
                ["CD", "NE", "CZ", "NH1"],
            ],
            AminoAcid::ASN => &[CHI1_CG, ["CA", "CB", "CG", "OD1"]],
            AminoAcid::ASP => &[CHI1_CG, ["CA", "CB", "CG", "OD1"]],
            AminoAcid::CYS => &[["N", "CA", "CB", "SG"]],
            AminoAcid::GLN => &[
                CHI1_CG,
                ["CA", "CB", "CG", "CD"],
                ["CB", "CG", "CD", "OE1"],
            ],
            AminoAcid::GLU => &[
                CHI1_CG,
                ["CA", "CB", "CG", "CD"],
                ["CB", "CG", "CD", "OE1"],
            ],
            AminoAcid::HIS => &[CHI1_CG, ["CA", "CB", "CG", "ND1"]],
            AminoAcid::ILE => &[["N", "CA", "CB", "CG1"], ["CA", "CB", "CG1", "CD1"]],
            AminoAcid::LEU => &[CHI1_CG, ["CA", "CB", "CG", "CD1"]],
            AminoAcid::LYS => &[
                CHI1_CG,
                ["CA", "CB", "CG", "CD"],
                ["CB", "CG", "CD", "CE"],
                ["CG", "CD", "CE", "NZ"],
            ],
            AminoAcid::MET => &[
                CHI1_CG,
                ["CA", "CB", "CG", "SD"],
                ["CB", "CG", "SD", "CE"],
            ],
            AminoAcid::PHE => &[CHI1_CG, ["CA", "CB", "CG", "CD1"]],
            AminoAcid::PRO => &[CHI1_CG, ["CA", "CB", "CG", "CD"]],
            AminoAcid::SER => &[["N", "CA", "CB", "OG"]],
            AminoAcid::THR => &[["N", "CA", "CB", "OG1"]],
            AminoAcid::TRP => &[CHI1_CG, ["CA", "CB", "CG", "CD1"]],
            AminoAcid::TYR => &[CHI1_CG, ["CA", "CB", "CG", "CD1"]],
            AminoAcid::VAL => &[["N", "CA", "CB", "CG1"]],
        }
    }

    /// Heavy-atom side-chain bonds as colon-joined atom pairs, CA:CB first.
    pub fn side_chain_bonds(&self) -> &'static [&'static str] {
        match self {
            AminoAcid::GLY => &[],
            AminoAcid::ALA => &["CA:CB"],
            AminoAcid::ARG => &[
                "CA:CB", "CB:CG", "CG:CD", "CD:NE", "NE:CZ", "CZ:NH1", "CZ:NH2",
            ],
            AminoAcid::ASN => &["CA:CB", "CB:CG", "CG:OD1", "CG:ND2"],
            AminoAcid::ASP => &["CA:CB", "CB:CG", "CG:OD1", "CG:OD2"],
            AminoAcid::CYS => &["CA:CB", "CB:SG"],
            AminoAcid::GLN => &["CA:CB", "CB:CG", "CG:CD", "CD:OE1", "CD:NE2"],
            AminoAcid::GLU => &["CA:CB", "CB:CG", "CG:CD", "CD:OE1", "CD:OE2"],
            AminoAcid::HIS => &[
                "CA:CB", "CB:CG", "CG:ND1", "CG:CD2", "ND1:CE1", "CD2:NE2", "CE1:NE2",
            ],
            AminoAcid::ILE => &["CA:CB", "CB:CG1", "CB:CG2", "CG1:CD1"],
            AminoAcid::LEU => &["CA:CB", "CB:CG", "CG:CD1", "CG:CD2"],
            AminoAcid::LYS => &["CA:CB", "CB:CG", "CG:CD", "CD:CE", "CE:NZ"],
            AminoAcid::MET => &["CA:CB", "CB:CG", "CG:SD", "SD:CE"],
            AminoAcid::PHE => &[
                "CA:CB", "CB:CG", "CG:CD1", "CG:CD2", "CD1:CE1", "CD2:CE2", "CE1:CZ", "CE2:CZ",
            ],
            AminoAcid::PRO => &["CA:CB", "CB:CG", "CG:CD", "CD:N"],
            AminoAcid::SER => &["CA:CB", "CB:OG"],
            AminoAcid::THR => &["CA:CB", "CB:OG1", "CB:CG2"],
            AminoAcid::TRP => &[
                "CA:CB", "CB:CG", "CG:CD1", "CG:CD2", "CD1:NE1", "NE1:CE2", "CD2:CE2", "CD2:CE3",
                "CE2:CZ2", "CE3:CZ3", "CZ2:CH2", "CZ3:CH2",
            ],
            AminoAcid::TYR => &[
                "CA:CB", "CB:CG", "CG:CD1", "CG:CD2", "CD1:CE1", "CD2:CE2", "CE1:CZ", "CE2:CZ",
                "CZ:OH",
            ],
            AminoAcid::VAL => &["CA:CB", "CB:CG1", "CB:CG2"],
        }
    }

    /// Heavy-atom side-chain bond angles as colon-joined atom triples, the
    /// two CB angles at CA first.
    pub fn side_chain_angles(&self) -> &'static [&'static str] {
        match self {
            AminoAcid::GLY => &[],
            AminoAcid::ALA => &["N:CA:CB", "C:CA:CB"],
            AminoAcid::ARG => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD", "CG:CD:NE", "CD:NE:CZ",
                "NE:CZ:NH1", "NE:CZ:NH2",
            ],
            AminoAcid::ASN => &["N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:OD1", "CB:CG:ND2"],
            AminoAcid::ASP => &["N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:OD1", "CB:CG:OD2"],
            AminoAcid::CYS => &["N:CA:CB", "C:CA:CB", "CA:CB:SG"],
            AminoAcid::GLN => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD", "CG:CD:OE1", "CG:CD:NE2",
            ],
            AminoAcid::GLU => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD", "CG:CD:OE1", "CG:CD:OE2",
            ],
            AminoAcid::HIS => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:ND1", "CB:CG:CD2", "CG:ND1:CE1",
                "CG:CD2:NE2",
            ],
            AminoAcid::ILE => &["N:CA:CB", "C:CA:CB", "CA:CB:CG1", "CA:CB:CG2", "CB:CG1:CD1"],
            AminoAcid::LEU => &["N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD1", "CB:CG:CD2"],
            AminoAcid::LYS => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD", "CG:CD:CE", "CD:CE:NZ",
            ],
            AminoAcid::MET => &["N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:SD", "CG:SD:CE"],
            AminoAcid::PHE => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD1", "CB:CG:CD2", "CG:CD1:CE1",
                "CG:CD2:CE2", "CD1:CE1:CZ",
            ],
            AminoAcid::PRO => &["N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD", "CG:CD:N"],
            AminoAcid::SER => &["N:CA:CB", "C:CA:CB", "CA:CB:OG"],
            AminoAcid::THR => &["N:CA:CB", "C:CA:CB", "CA:CB:OG1", "CA:CB:CG2"],
            AminoAcid::TRP => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD1", "CB:CG:CD2", "CG:CD1:NE1",
                "CG:CD2:CE2", "CG:CD2:CE3", "CD2:CE2:CZ2", "CD2:CE3:CZ3", "CE2:CZ2:CH2",
            ],
            AminoAcid::TYR => &[
                "N:CA:CB", "C:CA:CB", "CA:CB:CG", "CB:CG:CD1", "CB:CG:CD2", "CG:CD1:CE1",
                "CG:CD2:CE2", "CD1:CE1:CZ", "CE1:CZ:OH",
            ],
            AminoAcid::VAL => &["N:CA:CB", "C:CA:CB", "CA:CB:CG1", "CA:CB:CG2"],
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter())
    }
}

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|aa| aa.three_letter() == upper)
            .ok_or_else(|| ParseAminoAcidError(s.to_string()))
    }
}

/// Closed classification of a residue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResidueKind {
    AminoAcid(AminoAcid),
    Water,
    Other,
}

impl ResidueKind {
    pub fn classify(residue_name: &str) -> Self {
        let name = residue_name.trim();
        if let Ok(aa) = AminoAcid::from_str(name) {
            return ResidueKind::AminoAcid(aa);
        }
        match name.to_ascii_uppercase().as_str() {
            "HOH" | "WAT" | "DOD" | "H2O" => ResidueKind::Water,
            _ => ResidueKind::Other,
        }
    }

    pub fn amino_acid(&self) -> Option<AminoAcid> {
        match self {
            ResidueKind::AminoAcid(aa) => Some(*aa),
            _ => None,
        }
    }

    #[inline]
    pub fn is_water(&self) -> bool {
        matches!(self, ResidueKind::Water)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amino_acid_from_str_accepts_any_case() {
        assert_eq!(AminoAcid::from_str("ALA").unwrap(), AminoAcid::ALA);
        assert_eq!(AminoAcid::from_str("trp").unwrap(), AminoAcid::TRP);
        assert_eq!(AminoAcid::from_str(" Gly ").unwrap(), AminoAcid::GLY);
    }

    #[test]
    fn amino_acid_from_str_rejects_modified_residues() {
        let err = AminoAcid::from_str("MSE").unwrap_err();
        assert_eq!(err.to_string(), "unrecognized amino acid code: 'MSE'");
    }

    #[test]
    fn one_letter_codes_are_unique_and_round_trip() {
        let mut seen = std::collections::HashSet::new();
        for aa in AminoAcid::ALL {
            assert!(seen.insert(aa.one_letter()), "duplicate code for {aa}");
            assert_eq!(AminoAcid::from_one_letter(aa.one_letter()), Some(aa));
        }
        assert_eq!(AminoAcid::from_one_letter('X'), None);
        assert_eq!(AminoAcid::from_one_letter('a'), None);
    }

    #[test]
    fn chi_counts_match_side_chain_lengths() {
        assert!(AminoAcid::GLY.chi_atoms().is_empty());
        assert!(AminoAcid::ALA.chi_atoms().is_empty());
        assert_eq!(AminoAcid::SER.chi_atoms().len(), 1);
        assert_eq!(AminoAcid::PHE.chi_atoms().len(), 2);
        assert_eq!(AminoAcid::MET.chi_atoms().len(), 3);
        assert_eq!(AminoAcid::LYS.chi_atoms().len(), 4);
        assert_eq!(AminoAcid::ARG.chi_atoms().len(), 5);
        assert_eq!(AminoAcid::ILE.chi_atoms()[1], ["CA", "CB", "CG1", "CD1"]);
    }

    #[test]
    fn side_chain_angles_are_built_from_listed_bonds() {
        let bonded = |aa: AminoAcid, a: &str, b: &str| {
            ["N:CA", "CA:C"]
                .iter()
                .chain(aa.side_chain_bonds())
                .filter_map(|id| id.split_once(':'))
                .any(|(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
        };
        for aa in AminoAcid::ALL {
            for id in aa.side_chain_bonds() {
                assert_eq!(id.split(':').count(), 2, "{aa} bond {id}");
            }
            for id in aa.side_chain_angles() {
                let atoms: Vec<&str> = id.split(':').collect();
                assert_eq!(atoms.len(), 3, "{aa} angle {id}");
                assert!(bonded(aa, atoms[0], atoms[1]), "{aa} angle {id}");
                assert!(bonded(aa, atoms[1], atoms[2]), "{aa} angle {id}");
            }
            for quad in aa.chi_atoms() {
                assert!(bonded(aa, quad[1], quad[2]), "{aa} torsion {quad:?}");
            }
        }
        assert!(AminoAcid::GLY.side_chain_bonds().is_empty());
        assert!(AminoAcid::GLY.side_chain_angles().is_empty());
        assert_eq!(AminoAcid::SER.side_chain_bonds(), &["CA:CB", "CB:OG"]);
        assert_eq!(AminoAcid::LYS.side_chain_angles().len(), 6);
    }

    #[test]
    fn residue_kind_classification() {
        assert_eq!(
            ResidueKind::classify("LYS"),
            ResidueKind::AminoAcid(AminoAcid::LYS)
        );
        assert_eq!(ResidueKind::classify("HOH"), ResidueKind::Water);
        assert_eq!(ResidueKind::classify("wat"), ResidueKind::Water);
        assert_eq!(ResidueKind::classify("MSE"), ResidueKind::Other);
        assert_eq!(ResidueKind::classify("HEM"), ResidueKind::Other);
        assert!(ResidueKind::classify("DOD").is_water());
        assert_eq!(ResidueKind::classify("NAG").amino_acid(), None);
    }
}
