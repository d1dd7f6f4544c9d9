use std::fs;
use std::path::Path;

use crate::analysis::tokenizer::{DelimiterTokenizer, Tokenizer};
use crate::core::config::IndexConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::index_writer::TrieWriter;
use crate::index::trie::Trie;
use crate::storage::layout::IndexPaths;
use crate::storage::registry::FileRegistry;
use crate::storage::walker::enumerate_documents;

/// Build-side orchestrator: walks a corpus, tokenizes each document, and
/// accumulates (word, document id) pairs into the trie. `commit` persists
/// the registry and the serialized trie.
pub struct IndexBuilder {
    config: IndexConfig,
    tokenizer: Box<dyn Tokenizer>,
    trie: Trie,
    registry: FileRegistry,
}

#[derive(Debug)]
pub struct BuildSummary {
    pub documents: usize,
    pub nodes: usize,
    pub data_bytes: u64,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        let tokenizer = Box::new(DelimiterTokenizer::new(config.max_token_len));
        IndexBuilder {
            config,
            tokenizer,
            trie: Trie::new(),
            registry: FileRegistry::new(),
        }
    }

    pub fn with_tokenizer(config: IndexConfig, tokenizer: Box<dyn Tokenizer>) -> Self {
        IndexBuilder {
            config,
            tokenizer,
            trie: Trie::new(),
            registry: FileRegistry::new(),
        }
    }

    /// Indexes every regular file under `root`.
    pub fn build_from_dir(&mut self, root: &Path) -> Result<()> {
        for path in enumerate_documents(root)? {
            self.add_document(&path)?;
        }
        Ok(())
    }

    /// Reads, tokenizes and indexes one document.
    ///
    /// An unreadable file aborts the build unless `skip_unreadable` is set,
    /// in which case it is logged and consumes no document id.
    pub fn add_document(&mut self, path: &Path) -> Result<Option<DocId>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if self.config.skip_unreadable => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "skipping unreadable document"
                );
                return Ok(None);
            }
            Err(err) => {
                return Err(Error::new(
                    ErrorKind::Io,
                    format!("failed to read {}: {}", path.display(), err),
                ));
            }
        };

        // Lossy decode: the tokenizer drops non-ASCII tokens anyway, so
        // stray bytes in a document cost at most the words they touch.
        let text = String::from_utf8_lossy(&bytes);
        let words = self.tokenizer.tokenize(&text);
        let doc = self.add_tokens(path, words.iter().map(String::as_str))?;
        tracing::debug!(path = %path.display(), doc = doc.value(), words = words.len(), "indexed document");
        Ok(Some(doc))
    }

    /// Registers a document and indexes an already-tokenized word set.
    /// This is the raw build entry point; `add_document` is the file-reading
    /// convenience over it.
    pub fn add_tokens<'a>(
        &mut self,
        path: &Path,
        words: impl IntoIterator<Item = &'a str>,
    ) -> Result<DocId> {
        let doc = self.registry.add(path.to_path_buf());
        for word in words {
            self.trie.insert(word, doc)?;
        }
        Ok(doc)
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    /// Persists the registry (`<prefix>.files`) and the trie
    /// (`<prefix>.index` + `<prefix>.data`).
    pub fn commit(self, paths: &IndexPaths) -> Result<BuildSummary> {
        self.registry.save(paths)?;
        let data_bytes = TrieWriter::new(paths.clone()).write(&self.trie)?;
        let summary = BuildSummary {
            documents: self.registry.len(),
            nodes: self.trie.node_count(),
            data_bytes,
        };
        tracing::info!(
            documents = summary.documents,
            nodes = summary.nodes,
            data_bytes = summary.data_bytes,
            "index committed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roaring::RoaringBitmap;
    use std::fs::File;
    use std::io::Write;

    fn touch(path: &Path, contents: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn documents_get_sequential_ids() {
        let mut builder = IndexBuilder::new(IndexConfig::default());
        let a = builder.add_tokens(Path::new("a"), ["alpha"]).unwrap();
        let b = builder.add_tokens(Path::new("b"), ["beta"]).unwrap();
        assert_eq!((a, b), (DocId(0), DocId(1)));
        assert_eq!(builder.registry().len(), 2);
    }

    #[test]
    fn build_from_dir_indexes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("one.txt"), "cat car");
        touch(&dir.path().join("two.txt"), "cart, dog!");

        let mut builder = IndexBuilder::new(IndexConfig::default());
        builder.build_from_dir(dir.path()).unwrap();

        // Sorted walk: one.txt is document 0, two.txt is document 1.
        let trie = builder.trie();
        assert_eq!(trie.files_for_word("cat"), RoaringBitmap::from_iter([0u32]));
        assert_eq!(trie.files_for_word("dog"), RoaringBitmap::from_iter([1u32]));
        assert!(trie.contains("cart"));
    }

    #[test]
    fn missing_document_aborts_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = IndexBuilder::new(IndexConfig::default());
        let err = builder
            .add_document(&dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io));
    }

    #[test]
    fn skip_unreadable_consumes_no_document_id() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("real.txt"), "word");

        let config = IndexConfig {
            skip_unreadable: true,
            ..IndexConfig::default()
        };
        let mut builder = IndexBuilder::new(config);
        assert_eq!(
            builder.add_document(&dir.path().join("absent.txt")).unwrap(),
            None
        );
        let doc = builder
            .add_document(&dir.path().join("real.txt"))
            .unwrap()
            .unwrap();
        assert_eq!(doc, DocId(0));
    }

    #[test]
    fn commit_writes_all_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::new(dir.path().join("corpus_db"));

        let mut builder = IndexBuilder::new(IndexConfig::default());
        builder.add_tokens(Path::new("doc"), ["hello"]).unwrap();
        let summary = builder.commit(&paths).unwrap();

        assert_eq!(summary.documents, 1);
        // root + h,e,l,l,o
        assert_eq!(summary.nodes, 6);
        assert!(paths.index_path().exists());
        assert!(paths.data_path().exists());
        assert!(paths.files_path().exists());
    }
}
