use std::fmt;

pub mod error;
pub mod output;
pub mod query;
pub mod structure;

pub use error::Error;
pub use output::{OutputFormat, write_report};
pub use query::{ChainSelection, StructureQuery, directory_queries, read_query_csv};
pub use structure::{StructureReader, load_structure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Pdb,
    Mmcif,
}

impl Format {
    /// Conventional file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pdb => "pdb",
            Format::Mmcif => "cif",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Mmcif => write!(f, "mmCIF"),
        }
    }
}
