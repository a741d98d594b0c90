use super::atom::Atom;
use super::types::ResidueKind;
use serde::Serialize;
use std::fmt;

/// Author numbering of a residue: sequence number plus optional insertion code.
///
/// Ordering follows the file convention: serial first, then a residue without an
/// insertion code before its lettered insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResidueId {
    pub serial: i32,
    pub insertion_code: Option<char>,
}

impl ResidueId {
    pub fn new(serial: i32, insertion_code: Option<char>) -> Self {
        Self {
            serial,
            insertion_code,
        }
    }

    /// Returns `true` when `next` directly follows `self` with no missing residue
    /// between them.
    ///
    /// Within a serial, insertion codes must advance one letter at a time
    /// (`52`, `52A`, `52B`); the next serial must carry no insertion code.
    pub fn is_followed_by(&self, next: &ResidueId) -> bool {
        if next.serial != self.serial {
            return next.serial == self.serial + 1 && next.insertion_code.is_none();
        }
        match (self.insertion_code, next.insertion_code) {
            (None, Some(code)) => code == 'A',
            (Some(code), Some(following)) => {
                char::from_u32(u32::from(code) + 1) == Some(following)
            }
            _ => false,
        }
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.insertion_code {
            Some(code) => write!(f, "{}{}", self.serial, code),
            None => write!(f, "{}", self.serial),
        }
    }
}

impl From<i32> for ResidueId {
    fn from(serial: i32) -> Self {
        Self::new(serial, None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub id: ResidueId,
    pub name: String,
    pub kind: ResidueKind,
    atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(id: impl Into<ResidueId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.trim().to_string(),
            kind: ResidueKind::classify(name),
            atoms: Vec::new(),
        }
    }

    /// Adds an atom, resolving alternate locations by occupancy.
    ///
    /// When an atom with the same name is already present, the one with the higher
    /// occupancy is kept; ties keep the atom seen first.
    pub fn add_atom(&mut self, atom: Atom) {
        match self.atoms.iter_mut().find(|a| a.name == atom.name) {
            Some(existing) if atom.occupancy > existing.occupancy => *existing = atom,
            Some(_) => {}
            None => self.atoms.push(atom),
        }
    }

    pub fn with_atom(mut self, name: &str, position: [f64; 3]) -> Self {
        self.add_atom(Atom::new(name, position));
        self
    }

    pub fn remove_atom(&mut self, name: &str) -> Option<Atom> {
        let index = self.atoms.iter().position(|a| a.name == name)?;
        Some(self.atoms.remove(index))
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    #[inline]
    pub fn position(&self, name: &str) -> Option<[f64; 3]> {
        self.atom(name).map(|a| a.position)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// One-letter code for canonical amino acids, `None` for anything else.
    pub fn one_letter(&self) -> Option<char> {
        self.kind.amino_acid().map(|aa| aa.one_letter())
    }
}
