use std::fs::File;
use std::io::{BufWriter, Write};

use bytes::{BufMut, BytesMut};

use crate::core::error::{Error, ErrorKind, Result};
use crate::index::codec;
use crate::index::trie::Trie;
use crate::storage::layout::IndexPaths;

/// Writes the two-file persisted form of a [`Trie`]:
///
///   <prefix>.index  node count, then one byte offset per node
///   <prefix>.data   node records concatenated in arena order
///
/// The offset table is computed from [`codec::encoded_len`]; after the data
/// pass the predicted and written totals are compared, and any drift is
/// reported as corruption rather than left on disk.
pub struct TrieWriter {
    paths: IndexPaths,
}

impl TrieWriter {
    pub fn new(paths: IndexPaths) -> Self {
        TrieWriter { paths }
    }

    /// Serializes the trie, returning the data file size in bytes.
    pub fn write(&self, trie: &Trie) -> Result<u64> {
        let expected = self.write_offset_table(trie)?;
        let written = self.write_records(trie)?;
        if written != expected {
            return Err(Error::new(
                ErrorKind::Internal,
                format!(
                    "offset table predicts {} data bytes but {} were written",
                    expected, written
                ),
            ));
        }
        tracing::debug!(
            nodes = trie.node_count(),
            data_bytes = written,
            "trie serialized"
        );
        Ok(written)
    }

    fn write_offset_table(&self, trie: &Trie) -> Result<u64> {
        let nodes = trie.nodes();
        let mut buf = BytesMut::with_capacity(4 + 4 * nodes.len());
        buf.put_u32_le(nodes.len() as u32);

        let mut position: u64 = 0;
        for node in nodes {
            if position > u64::from(u32::MAX) {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "serialized trie exceeds the u32 offset range".to_string(),
                ));
            }
            buf.put_u32_le(position as u32);
            position += codec::encoded_len(node) as u64;
        }

        let mut file = File::create(self.paths.index_path())?;
        file.write_all(&buf)?;
        file.sync_all()?;
        Ok(position)
    }

    fn write_records(&self, trie: &Trie) -> Result<u64> {
        let file = File::create(self.paths.data_path())?;
        let mut writer = BufWriter::new(file);
        let mut buf = BytesMut::new();
        let mut written: u64 = 0;

        for node in trie.nodes() {
            buf.clear();
            codec::encode_node(node, &mut buf);
            writer.write_all(&buf)?;
            written += buf.len() as u64;
        }

        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(written)
    }
}
