use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::Result;

/// Recursively collects every regular file under `root`.
///
/// Entries are visited in sorted order per directory, so the document ids
/// derived from this listing are stable across runs over the same tree.
pub fn enumerate_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    collect(root, &mut documents)?;
    Ok(documents)
}

fn collect(dir: &Path, documents: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        let meta = fs::symlink_metadata(&path)?;
        if meta.is_dir() {
            collect(&path, documents)?;
        } else if meta.is_file() {
            documents.push(path);
        }
        // Symlinks and special files are not indexed.
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(path: &Path, contents: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn walks_nested_directories_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("b_sub")).unwrap();
        touch(&root.join("z_last.txt"), "z");
        touch(&root.join("a_first.txt"), "a");
        touch(&root.join("b_sub").join("inner.txt"), "inner");

        let documents = enumerate_documents(root).unwrap();
        assert_eq!(
            documents,
            vec![
                root.join("a_first.txt"),
                root.join("b_sub").join("inner.txt"),
                root.join("z_last.txt"),
            ]
        );
    }

    #[test]
    fn empty_directory_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enumerate_documents(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enumerate_documents(&dir.path().join("absent")).is_err());
    }
}
