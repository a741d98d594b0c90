use super::residue::Residue;
use std::path::{Path, PathBuf};

/// An ordered polymer chain.
///
/// `structure_id` names the owning [`Structure`] without holding a reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,
    pub structure_id: String,
    residues: Vec<Residue>,
}

impl Chain {
    pub fn new(id: impl Into<String>, structure_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            structure_id: structure_id.into(),
            residues: Vec::new(),
        }
    }

    pub fn add_residue(&mut self, residue: Residue) {
        self.residues.push(residue);
    }

    pub fn with_residues(mut self, residues: impl IntoIterator<Item = Residue>) -> Self {
        self.residues.extend(residues);
        self
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    #[inline]
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub serial: usize,
    chains: Vec<Chain>,
}

impl Model {
    pub fn new(serial: usize) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    /// Adds a chain; a chain whose id is already present is merged into the
    /// existing one so chain ids stay unique.
    pub fn add_chain(&mut self, chain: Chain) {
        match self.chains.iter_mut().find(|c| c.id == chain.id) {
            Some(existing) => existing.residues.extend(chain.residues),
            None => self.chains.push(chain),
        }
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain_ids(&self) -> Vec<&str> {
        self.chains.iter().map(|c| c.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub id: String,
    pub path: PathBuf,
    models: Vec<Model>,
}

impl Structure {
    pub fn new(id: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            id: id.into(),
            path: path.as_ref().to_path_buf(),
            models: Vec::new(),
        }
    }

    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Returns the designated model: the one with the given serial, or the first
    /// model when `serial` is `None`.
    pub fn model(&self, serial: Option<usize>) -> Option<&Model> {
        match serial {
            Some(serial) => self.models.iter().find(|m| m.serial == serial),
            None => self.models.first(),
        }
    }

    #[inline]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn residue_count(&self) -> usize {
        self.models
            .first()
            .map(|m| m.chains.iter().map(Chain::residue_count).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(id: &str, serials: &[i32]) -> Chain {
        Chain::new(id, "1TST").with_residues(serials.iter().map(|&s| Residue::new(s, "ALA")))
    }

    #[test]
    fn model_merges_duplicate_chain_ids() {
        let mut model = Model::new(1);
        model.add_chain(chain("A", &[1, 2]));
        model.add_chain(chain("B", &[1]));
        model.add_chain(chain("A", &[3]));

        assert_eq!(model.chain_ids(), vec!["A", "B"]);
        assert_eq!(model.chain("A").map(Chain::residue_count), Some(3));
        assert!(model.chain("C").is_none());
    }

    #[test]
    fn structure_selects_designated_model() {
        let mut structure = Structure::new("1TST", "1tst.pdb");
        let mut first = Model::new(1);
        first.add_chain(chain("A", &[1, 2, 3]));
        let mut second = Model::new(2);
        second.add_chain(chain("A", &[1]));
        structure.add_model(first);
        structure.add_model(second);

        assert_eq!(structure.model_count(), 2);
        assert_eq!(structure.model(None).map(|m| m.serial), Some(1));
        assert_eq!(structure.model(Some(2)).map(|m| m.serial), Some(2));
        assert!(structure.model(Some(9)).is_none());
        assert_eq!(structure.residue_count(), 3);
    }

    #[test]
    fn chain_keeps_back_reference_by_id() {
        let c = chain("A", &[1]);
        assert_eq!(c.structure_id, "1TST");
        assert!(!c.is_empty());
        assert!(Chain::new("Z", "1TST").is_empty());
    }
}
