//! Selection of the (structure, chain) pairs to scan.

use super::Error;
use super::structure::protein_id;
use csv::{ReaderBuilder, Trim};
use std::fs;
use std::path::{Path, PathBuf};

/// Chains of one structure that should be scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainSelection {
    /// Every chain of the designated model.
    All,
    /// The listed chains, in order, without duplicates.
    Only(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureQuery {
    pub protein_id: String,
    pub path: PathBuf,
    pub chains: ChainSelection,
}

impl StructureQuery {
    pub fn all_chains(protein_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            protein_id: protein_id.into(),
            path: path.into(),
            chains: ChainSelection::All,
        }
    }

    fn add_chain(&mut self, chain: &str) {
        match &mut self.chains {
            ChainSelection::Only(chains) => {
                if !chains.iter().any(|c| c == chain) {
                    chains.push(chain.to_string());
                }
            }
            ChainSelection::All => {}
        }
    }
}

/// Reads a long-format query list with columns `Protein ID, File Path, Chain`.
///
/// Rows of the same protein are grouped into one query, in first-seen order.
pub fn read_query_csv(path: &Path, has_header: bool) -> Result<Vec<StructureQuery>, Error> {
    let file = fs::File::open(path).map_err(|e| Error::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .trim(Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut queries: Vec<StructureQuery> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
            Error::query(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        if record.iter().all(str::is_empty) {
            continue;
        }
        let field = |index: usize, name: &str| match record.get(index) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::query(line, format!("missing {name}"))),
        };
        let protein = field(0, "protein id")?;
        let file_path = field(1, "file path")?;
        let chain = field(2, "chain id")?;

        match queries.iter_mut().find(|q| q.protein_id == protein) {
            Some(existing) => {
                if existing.path != Path::new(file_path) {
                    return Err(Error::query(
                        line,
                        format!(
                            "protein '{protein}' listed with two files: '{}' and '{file_path}'",
                            existing.path.display()
                        ),
                    ));
                }
                existing.add_chain(chain);
            }
            None => queries.push(StructureQuery {
                protein_id: protein.to_string(),
                path: PathBuf::from(file_path),
                chains: ChainSelection::Only(vec![chain.to_string()]),
            }),
        }
    }
    Ok(queries)
}

/// One query per regular file in `dir`, sorted by file name, scanning all chains.
///
/// Query paths are file names relative to `dir`, to be resolved by a reader
/// whose base directory is `dir`.
pub fn directory_queries(dir: &Path) -> Result<Vec<StructureQuery>, Error> {
    let entries = fs::read_dir(dir).map_err(|e| Error::open(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(PathBuf::from(entry.file_name()));
        }
    }
    paths.sort();
    Ok(paths
        .into_iter()
        .map(|path| StructureQuery::all_chains(protein_id(&path), path))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn groups_rows_by_protein_and_dedups_chains() {
        let file = csv_file(&[
            "Protein ID,File Path,Chain",
            "1abc,1abc.cif,A",
            "2xyz,sub/2xyz.cif,B",
            "1abc,1abc.cif,C",
            "1abc,1abc.cif,A",
        ]);
        let queries = read_query_csv(file.path(), true).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].protein_id, "1abc");
        assert_eq!(queries[0].path, PathBuf::from("1abc.cif"));
        assert_eq!(
            queries[0].chains,
            ChainSelection::Only(vec!["A".to_string(), "C".to_string()])
        );
        assert_eq!(queries[1].path, PathBuf::from("sub/2xyz.cif"));
    }

    #[test]
    fn headerless_list_keeps_first_row() {
        let file = csv_file(&["1abc, 1abc.pdb , A"]);
        let queries = read_query_csv(file.path(), false).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].path, PathBuf::from("1abc.pdb"));
        assert_eq!(queries[0].chains, ChainSelection::Only(vec!["A".to_string()]));
    }

    #[test]
    fn header_row_is_skipped_by_default() {
        let file = csv_file(&["Protein ID,File Path,Chain", "1abc,1abc.pdb,A"]);
        let queries = read_query_csv(file.path(), true).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].protein_id, "1abc");
    }

    #[test]
    fn missing_chain_is_reported_with_line() {
        let file = csv_file(&["Protein ID,File Path,Chain", "1abc,1abc.pdb,A", "2xyz,2xyz.pdb"]);
        match read_query_csv(file.path(), true) {
            Err(Error::Query { line, details }) => {
                assert_eq!(line, 3);
                assert!(details.contains("chain"));
            }
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn conflicting_paths_for_one_protein_are_rejected() {
        let file = csv_file(&["1abc,a.pdb,A", "1abc,b.pdb,B"]);
        assert!(matches!(
            read_query_csv(file.path(), false),
            Err(Error::Query { line: 2, .. })
        ));
    }

    #[test]
    fn directory_scan_is_sorted_and_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["3def.cif.gz", "1abc.cif.gz", "2xyz.cif.gz"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();

        let queries = directory_queries(dir.path()).unwrap();
        let ids: Vec<&str> = queries.iter().map(|q| q.protein_id.as_str()).collect();
        assert_eq!(ids, vec!["1abc", "2xyz", "3def"]);
        assert_eq!(queries[0].path, PathBuf::from("1abc.cif.gz"));
        assert!(queries.iter().all(|q| q.chains == ChainSelection::All));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            directory_queries(&dir.path().join("nope")),
            Err(Error::Open { .. })
        ));
    }
}
