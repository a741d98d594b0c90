use super::{Error, Format};
use crate::model::atom::Atom;
use crate::model::residue::{Residue, ResidueId};
use crate::model::structure::{Chain, Model, Structure};
use flate2::read::GzDecoder;
use log::debug;
use pdbtbx::{ReadOptions, StrictnessLevel};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Loads structure files into the owned [`Structure`] model.
///
/// ```no_run
/// use motif_ic::io::{Format, StructureReader};
///
/// let reader = StructureReader::new(Format::Mmcif).gzipped(true).base_dir("structures");
/// let structure = reader.load("1abc", "1abc.cif.gz".as_ref())?;
/// # Ok::<(), motif_ic::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StructureReader {
    format: Format,
    gzipped: bool,
    base_dir: Option<PathBuf>,
}

impl StructureReader {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            gzipped: false,
            base_dir: None,
        }
    }

    pub fn gzipped(mut self, gzipped: bool) -> Self {
        self.gzipped = gzipped;
        self
    }

    /// Directory that relative paths passed to [`load`](Self::load) resolve against.
    pub fn base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn is_gzipped(&self) -> bool {
        self.gzipped
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn load(&self, id: &str, path: &Path) -> Result<Structure, Error> {
        let path = self.resolve(path);
        let file = File::open(&path).map_err(|e| Error::open(&path, e))?;
        self.read(id, &path, file)
    }

    /// Parses a structure from `reader`; `path` is recorded on the structure and
    /// used in error messages.
    pub fn read<R: Read>(&self, id: &str, path: &Path, reader: R) -> Result<Structure, Error> {
        let mut bytes = Vec::new();
        if self.gzipped {
            GzDecoder::new(reader)
                .read_to_end(&mut bytes)
                .map_err(|e| Error::decompress(path, e))?;
        } else {
            BufReader::new(reader).read_to_end(&mut bytes)?;
        }
        self.parse(id, path, bytes)
    }

    fn parse(&self, id: &str, path: &Path, bytes: Vec<u8>) -> Result<Structure, Error> {
        let format = match self.format {
            Format::Pdb => pdbtbx::Format::Pdb,
            Format::Mmcif => pdbtbx::Format::Mmcif,
        };
        let (pdb, warnings) = ReadOptions::default()
            .set_level(StrictnessLevel::Loose)
            .set_format(format)
            .read_raw(BufReader::new(Cursor::new(bytes)))
            .map_err(|errors| {
                let details = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                Error::parse(self.format, path, details)
            })?;

        for warning in &warnings {
            debug!("{}: {}", path.display(), warning);
        }

        let structure = convert(&pdb, id, path, self.format)?;
        if structure.models().iter().all(|m| m.chains().is_empty()) {
            return Err(Error::parse(self.format, path, "no atoms found"));
        }
        debug!(
            "loaded {} from {} ({} model(s), {} residue(s))",
            id,
            path.display(),
            structure.model_count(),
            structure.residue_count()
        );
        Ok(structure)
    }
}

/// Loads one file, deriving its identifier from the file name.
pub fn load_structure(path: &Path, format: Format, gzipped: bool) -> Result<Structure, Error> {
    StructureReader::new(format)
        .gzipped(gzipped)
        .load(&protein_id(path), path)
}

/// File name up to its first `.`: `1abc.cif.gz` becomes `1abc`.
pub fn protein_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

fn convert(pdb: &pdbtbx::PDB, id: &str, path: &Path, format: Format) -> Result<Structure, Error> {
    let mut structure = Structure::new(id, path);
    let single = pdb.model_count() == 1;
    for pdb_model in pdb.models() {
        // a file without MODEL records holds model 1
        let serial = match pdb_model.serial_number() {
            0 if single => 1,
            n => n,
        };
        let mut model = Model::new(serial);
        for pdb_chain in pdb_model.chains() {
            let mut chain = Chain::new(pdb_chain.id(), id);
            for pdb_residue in pdb_chain.residues() {
                let serial = i32::try_from(pdb_residue.serial_number()).map_err(|_| {
                    Error::parse(
                        format,
                        path,
                        format!("residue number {} out of range", pdb_residue.serial_number()),
                    )
                })?;
                let icode = pdb_residue.insertion_code().and_then(|c| c.chars().next());
                let mut residue = Residue::new(
                    ResidueId::new(serial, icode),
                    pdb_residue.name().unwrap_or("UNK"),
                );
                for conformer in pdb_residue.conformers() {
                    let alt_loc = conformer.alternative_location().and_then(|a| a.chars().next());
                    for pdb_atom in conformer.atoms() {
                        let (x, y, z) = pdb_atom.pos();
                        let mut atom = Atom::new(pdb_atom.name(), [x, y, z])
                            .with_occupancy(pdb_atom.occupancy());
                        if let Some(alt) = alt_loc {
                            atom = atom.with_alt_loc(alt);
                        }
                        residue.add_atom(atom);
                    }
                }
                chain.add_residue(residue);
            }
            model.add_chain(chain);
        }
        structure.add_model(model);
    }
    Ok(structure)
}
