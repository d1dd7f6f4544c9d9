use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Buf;
use roaring::RoaringBitmap;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::NodeId;
use crate::index::codec;
use crate::index::node::Node;
use crate::storage::layout::IndexPaths;

/// Read-only view of a persisted trie that decodes one node record per
/// transition instead of materializing the structure in memory.
///
/// The offset table is small and kept resident; node records are fetched
/// with a seek and a single-record decode. At most one decoded node is held
/// at a time, in a single-slot cache keyed by node id, so consecutive
/// operations on the same node cost no I/O.
///
/// Query methods take `&mut self`: an interleaved query on a shared instance
/// would evict the cache mid-traversal. For concurrent queries, [`fork`] an
/// independent reader per query — the underlying files are never mutated
/// after build, so parallel read-only access is safe.
///
/// [`fork`]: StreamedTrie::fork
#[derive(Debug)]
pub struct StreamedTrie {
    data_path: PathBuf,
    data_file: File,
    offsets: Arc<[u32]>,
    cached: Option<(NodeId, Node)>,
}

impl StreamedTrie {
    /// Opens `<prefix>.index` and `<prefix>.data`, loading the offset table
    /// in full. A short or inconsistent index file is reported as corrupt.
    pub fn open(paths: &IndexPaths) -> Result<Self> {
        let offsets = read_offset_table(&paths.index_path())?;
        let data_file = File::open(paths.data_path())?;
        Ok(StreamedTrie {
            data_path: paths.data_path(),
            data_file,
            offsets,
            cached: None,
        })
    }

    /// An independent reader over the same files: fresh handle, fresh cache,
    /// shared offset table.
    pub fn fork(&self) -> Result<StreamedTrie> {
        Ok(StreamedTrie {
            data_path: self.data_path.clone(),
            data_file: File::open(&self.data_path)?,
            offsets: Arc::clone(&self.offsets),
            cached: None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len()
    }

    /// Id of the record currently held by the single-slot cache.
    pub fn cached_node(&self) -> Option<NodeId> {
        self.cached.as_ref().map(|(id, _)| *id)
    }

    /// Brings `id` into the cache and returns it.
    ///
    /// A cache hit performs no I/O. An out-of-range id empties the cache and
    /// yields `Ok(None)`: a dangling child pointer is data corruption, and it
    /// surfaces as a miss rather than a crash. Decode failures (truncated
    /// data file) are fatal.
    pub fn load_node(&mut self, id: NodeId) -> Result<Option<&Node>> {
        if id.index() >= self.offsets.len() {
            self.cached = None;
            return Ok(None);
        }
        if self.cached_node() != Some(id) {
            self.data_file
                .seek(SeekFrom::Start(u64::from(self.offsets[id.index()])))?;
            let node = codec::decode_node(&mut self.data_file)?;
            self.cached = Some((id, node));
        }
        Ok(self.cached.as_ref().map(|(_, node)| node))
    }

    /// Exact path walk from the root: one record load per character, minus
    /// cache hits. A missing edge fails immediately, before any further
    /// loads.
    pub fn find_node(&mut self, word: &str) -> Result<Option<NodeId>> {
        if !word.is_ascii() {
            // Multi-byte characters cannot appear as edge labels.
            return Ok(None);
        }
        let mut cur = NodeId::ROOT;
        if self.load_node(cur)?.is_none() {
            return Ok(None);
        }
        for label in word.bytes() {
            let Some(node) = self.load_node(cur)? else {
                return Ok(None);
            };
            let Some(next) = node.child(label) else {
                return Ok(None);
            };
            if self.load_node(next)?.is_none() {
                return Ok(None);
            }
            cur = next;
        }
        Ok(Some(cur))
    }

    /// True only for complete indexed words, matching the in-memory form:
    /// a node that exists purely as a prefix does not count.
    pub fn contains(&mut self, word: &str) -> Result<bool> {
        match self.find_node(word)? {
            Some(id) => Ok(self
                .load_node(id)?
                .map(Node::is_terminal)
                .unwrap_or(false)),
            None => Ok(false),
        }
    }

    /// Documents whose word set contains exactly `word`.
    pub fn files_for_word(&mut self, word: &str) -> Result<RoaringBitmap> {
        match self.find_node(word)? {
            Some(id) => match self.load_node(id)? {
                Some(node) => Ok(node.files.clone()),
                None => Ok(RoaringBitmap::new()),
            },
            None => Ok(RoaringBitmap::new()),
        }
    }

    /// Union of document ids over every indexed word starting with `prefix`.
    /// A prefix nothing starts with yields an empty set, not an error.
    ///
    /// Depth-first over the persisted subtree with an explicit stack, one
    /// record load per node visited. The bitmap union deduplicates documents
    /// that terminate several words under the prefix.
    pub fn files_with_prefix(&mut self, prefix: &str) -> Result<RoaringBitmap> {
        let mut files = RoaringBitmap::new();
        let Some(start) = self.find_node(prefix)? else {
            return Ok(files);
        };

        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            // Out-of-range children are skipped like any other miss.
            let Some(node) = self.load_node(id)? else {
                continue;
            };
            // Children are copied onto the stack before descending, because
            // the next load evicts this record from the single-slot cache.
            files |= &node.files;
            stack.extend(node.children.values().copied());
        }
        Ok(files)
    }
}

// The offset table is read eagerly and in full; only node records stream.
fn read_offset_table(path: &Path) -> Result<Arc<[u32]>> {
    let mut file = File::open(path)?;
    let mut raw = Vec::new();
    file.read_to_end(&mut raw)?;

    let mut buf = &raw[..];
    if buf.remaining() < 4 {
        return Err(Error::new(
            ErrorKind::Corrupt,
            format!("index file {} is too short for a node count", path.display()),
        ));
    }
    let count = buf.get_u32_le() as usize;
    if (buf.remaining() as u64) < 4 * count as u64 {
        return Err(Error::new(
            ErrorKind::Corrupt,
            format!(
                "index file {} declares {} nodes but holds offsets for {}",
                path.display(),
                count,
                buf.remaining() / 4
            ),
        ));
    }

    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(buf.get_u32_le());
    }
    Ok(offsets.into())
}
