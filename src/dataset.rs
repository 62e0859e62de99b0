//! One benchmark result directory, scanned once.

use crate::config::{self, ConfigKey, Dim, Group, VALUES_SUFFIX};
use crate::errors::*;
use crate::table::ResultTable;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

/// A results table found in the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResultEntry {
    /// configuration parsed from the file name
    pub key: ConfigKey,

    /// full path of the table
    pub path: PathBuf,
}

/// The parsed listing of a result directory: the results tables and the raw
/// sample directories, keyed by configuration.
#[derive(Debug, Clone)]
pub struct Dataset {
    dir: PathBuf,
    name: String,
    results: Vec<ResultEntry>,
    samples: Vec<(ConfigKey, PathBuf)>,
}

impl Dataset {
    /// Lists `dir`. Entries whose name does not encode a configuration are
    /// skipped with a warning; hidden entries are ignored.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Dataset> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            bail!(ErrorKind::MissingDirectory(dir.display().to_string()));
        }

        let mut results = Vec::new();
        let mut samples = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            let (key, tail) = match config::parse_name(&name) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            let file_type = entry.file_type()?;
            if file_type.is_dir() && tail == VALUES_SUFFIX {
                samples.push((key, entry.path()));
            } else if file_type.is_file() && tail != VALUES_SUFFIX {
                results.push(ResultEntry {
                    key: key,
                    path: entry.path(),
                });
            } else {
                warn!("skipping {}: unexpected entry", entry.path().display());
            }
        }
        results.sort();
        samples.sort();

        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        info!(
            "{}: {} results tables, {} sample directories",
            dir.display(),
            results.len(),
            samples.len()
        );
        Ok(Dataset {
            dir: dir.to_path_buf(),
            name: name,
            results: results,
            samples: samples,
        })
    }

    /// The scanned directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Name of the directory, used as the chart output subdirectory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All results tables, ordered by configuration.
    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    /// Every (kernel, block) group found, ascending.
    pub fn groups(&self) -> Vec<Group> {
        self.results
            .iter()
            .map(|r| r.key)
            .chain(self.samples.iter().map(|s| s.0))
            .map(|k| k.group())
            .sorted()
            .dedup()
            .collect()
    }

    /// Every matrix size found, ascending.
    pub fn matrix_sizes(&self) -> Vec<Dim> {
        self.results
            .iter()
            .map(|r| r.key)
            .chain(self.samples.iter().map(|s| s.0))
            .map(|k| k.matrix)
            .sorted()
            .dedup()
            .collect()
    }

    /// Results tables of one group.
    pub fn results_for<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a ResultEntry> + 'a {
        self.results.iter().filter(move |r| r.key.group() == *group)
    }

    /// Loads the results tables of one group.
    pub fn load_tables(&self, group: &Group) -> Result<Vec<(ConfigKey, ResultTable)>> {
        self.results_for(group)
            .map(|r| -> Result<(ConfigKey, ResultTable)> {
                let table = ResultTable::from_path(&r.path)
                    .chain_err(|| format!("failed to load {}", r.path.display()))?;
                Ok((r.key, table))
            })
            .collect()
    }

    /// Raw sample directories of one group, ordered by matrix size.
    pub fn sample_dirs(&self, group: &Group) -> Vec<(ConfigKey, &Path)> {
        self.samples
            .iter()
            .filter(|(key, _)| key.group() == *group)
            .map(|(key, path)| (*key, path.as_path()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    const TABLE: &str = "id,mean,std,median
cpu_seq_c_exec,10,0.5,10
cpu_seq_exec,8,0.4,8
gpu_par_c_exec,2,0.1,2
gpu_par_exec,1,0.05,1
";

    fn touch(dir: &Path, name: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(TABLE.as_bytes()).unwrap();
    }

    #[test]
    fn scan_classifies_entries() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "matrix: 64x64,kernel: 3x3,BlockDim: 8x8");
        touch(tmp.path(), "matrix: 32x32,kernel: 3x3,BlockDim: 8x8.csv");
        touch(tmp.path(), "matrix: 32x32,kernel: 5x5,BlockDim: 16x16");
        touch(tmp.path(), "README");
        touch(tmp.path(), ".hidden");
        fs::create_dir(tmp.path().join("matrix: 64x64,kernel: 3x3,BlockDim: 8x8_values")).unwrap();
        fs::create_dir(tmp.path().join("plots")).unwrap();

        let ds = Dataset::scan(tmp.path()).unwrap();
        assert_eq!(ds.results().len(), 3);
        assert_eq!(
            ds.groups(),
            vec![
                Group::new(Dim::square(3), Dim::square(8)),
                Group::new(Dim::square(5), Dim::square(16)),
            ]
        );
        assert_eq!(ds.matrix_sizes(), vec![Dim::square(32), Dim::square(64)]);

        let group = Group::new(Dim::square(3), Dim::square(8));
        let sizes = ds.results_for(&group).map(|r| r.key.matrix).collect::<Vec<_>>();
        assert_eq!(sizes, vec![Dim::square(32), Dim::square(64)]);
        assert_eq!(ds.sample_dirs(&group).len(), 1);
        assert_eq!(ds.load_tables(&group).unwrap().len(), 2);
    }

    #[test]
    fn scan_missing_directory() {
        let tmp = TempDir::new().unwrap();
        match Dataset::scan(tmp.path().join("absent")) {
            Err(Error(ErrorKind::MissingDirectory(_), _)) => {}
            other => panic!("unexpected {:?}", other.map(|d| d.results().len())),
        }
    }

    #[test]
    fn dataset_is_named_after_its_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("32-512_formats");
        fs::create_dir(&dir).unwrap();
        assert_eq!(Dataset::scan(&dir).unwrap().name(), "32-512_formats");
    }
}
