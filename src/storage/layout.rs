use std::ffi::OsString;
use std::path::PathBuf;

/// The three sibling files a persisted index consists of, derived from one
/// shared prefix path (e.g. `./corpus_db` -> `./corpus_db.index`).
#[derive(Debug, Clone)]
pub struct IndexPaths {
    prefix: PathBuf,
}

impl IndexPaths {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        IndexPaths {
            prefix: prefix.into(),
        }
    }

    /// Node count plus the per-node byte-offset table.
    pub fn index_path(&self) -> PathBuf {
        self.suffixed(".index")
    }

    /// Concatenated node records in arena order.
    pub fn data_path(&self) -> PathBuf {
        self.suffixed(".data")
    }

    /// Newline-delimited document paths; line N is document id N.
    pub fn files_path(&self) -> PathBuf {
        self.suffixed(".files")
    }

    // Appends rather than replaces, so a prefix like "mail.2024" keeps its
    // dot intact.
    fn suffixed(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.prefix.clone().into_os_string());
        name.push(suffix);
        PathBuf::from(name)
    }
}
