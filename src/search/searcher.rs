use std::path::Path;

use roaring::RoaringBitmap;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::streamed_reader::StreamedTrie;
use crate::storage::layout::IndexPaths;
use crate::storage::registry::FileRegistry;

/// Query-time facade: resolves prefix and exact-word queries against the
/// persisted trie and maps the matching document ids back to paths through
/// the file registry.
pub struct Searcher {
    trie: StreamedTrie,
    registry: FileRegistry,
}

impl Searcher {
    pub fn open(paths: &IndexPaths) -> Result<Self> {
        Ok(Searcher {
            trie: StreamedTrie::open(paths)?,
            registry: FileRegistry::load(paths)?,
        })
    }

    /// Ids of the documents whose word sets contain at least one word
    /// starting with `prefix`.
    pub fn doc_ids_with_prefix(&mut self, prefix: &str) -> Result<RoaringBitmap> {
        self.trie.files_with_prefix(prefix)
    }

    /// Paths of the documents matching `prefix`, in document id order.
    pub fn files_with_prefix(&mut self, prefix: &str) -> Result<Vec<&Path>> {
        let docs = self.trie.files_with_prefix(prefix)?;
        self.resolve(docs)
    }

    /// Paths of the documents containing exactly `word`.
    pub fn files_for_word(&mut self, word: &str) -> Result<Vec<&Path>> {
        let docs = self.trie.files_for_word(word)?;
        self.resolve(docs)
    }

    pub fn contains_word(&mut self, word: &str) -> Result<bool> {
        self.trie.contains(word)
    }

    // A hit with no registry entry means the persisted artifacts disagree;
    // fail closed instead of returning a partial listing.
    fn resolve(&self, docs: RoaringBitmap) -> Result<Vec<&Path>> {
        let mut files = Vec::with_capacity(docs.len() as usize);
        for doc in docs {
            let path = self.registry.get(DocId(doc)).ok_or_else(|| {
                Error::new(
                    ErrorKind::Corrupt,
                    format!("document id {} is missing from the file registry", doc),
                )
            })?;
            files.push(path);
        }
        Ok(files)
    }
}
