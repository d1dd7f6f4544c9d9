use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::core::types::DocId;
use crate::storage::layout::IndexPaths;

/// Ordered list of indexed document paths.
///
/// A document's id is its position here, assigned at registration and never
/// reused; the trie only ever stores these ids and relies on the registry to
/// map them back to paths.
#[derive(Debug, Default)]
pub struct FileRegistry {
    paths: Vec<PathBuf>,
}

impl FileRegistry {
    pub fn new() -> Self {
        FileRegistry { paths: Vec::new() }
    }

    pub fn add(&mut self, path: PathBuf) -> DocId {
        self.paths.push(path);
        DocId((self.paths.len() - 1) as u32)
    }

    pub fn get(&self, doc: DocId) -> Option<&Path> {
        self.paths.get(doc.index()).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Writes `<prefix>.files`, one path per line in id order.
    pub fn save(&self, paths: &IndexPaths) -> Result<()> {
        let file = File::create(paths.files_path())?;
        let mut writer = BufWriter::new(file);
        for path in &self.paths {
            writeln!(writer, "{}", path.display())?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn load(paths: &IndexPaths) -> Result<Self> {
        let file = File::open(paths.files_path())?;
        let reader = BufReader::new(file);
        let mut registry = FileRegistry::new();
        for line in reader.lines() {
            registry.paths.push(PathBuf::from(line?));
        }
        Ok(registry)
    }
}
