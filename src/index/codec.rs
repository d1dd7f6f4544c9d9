use std::io::Read;

use bytes::{Buf, BufMut};

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::NodeId;
use crate::index::node::Node;

/// Fixed record header: children_count + files_count, both u32.
pub const RECORD_HEADER_LEN: usize = 8;
/// Bytes per (label, child id) edge entry.
pub const EDGE_ENTRY_LEN: usize = 5;
/// Bytes per document id entry.
pub const FILE_ENTRY_LEN: usize = 4;

// Edge labels are single bytes, so a record can never legitimately claim
// more children than this.
const MAX_CHILDREN: usize = 256;

/// Exact serialized size of a node's record.
///
/// The offset table is computed by summing this in arena order, so it is
/// authoritative: it must match the bytes [`encode_node`] produces for the
/// same node, byte for byte.
pub fn encoded_len(node: &Node) -> usize {
    RECORD_HEADER_LEN
        + EDGE_ENTRY_LEN * node.children.len()
        + FILE_ENTRY_LEN * node.files.len() as usize
}

/// Appends one node record to `buf`.
///
/// Record layout, all integers little-endian u32:
///   children_count, files_count,
///   children_count × (label: u8, child: u32),
///   files_count × doc_id: u32.
/// No padding, no length prefixes beyond the two counts.
pub fn encode_node(node: &Node, buf: &mut impl BufMut) {
    buf.put_u32_le(node.children.len() as u32);
    buf.put_u32_le(node.files.len() as u32);
    for (&label, &child) in &node.children {
        buf.put_u8(label);
        buf.put_u32_le(child.value());
    }
    for doc in &node.files {
        buf.put_u32_le(doc);
    }
}

/// Decodes exactly one record from the reader's current position, never
/// reading past it.
///
/// A short read anywhere inside the record means the persisted index is
/// truncated: the caller must treat it as unreadable, not retry.
pub fn decode_node(reader: &mut impl Read) -> Result<Node> {
    let mut header = [0u8; RECORD_HEADER_LEN];
    read_record_bytes(reader, &mut header)?;
    let mut header = &header[..];
    let children_count = header.get_u32_le() as usize;
    let files_count = header.get_u32_le() as usize;

    if children_count > MAX_CHILDREN {
        return Err(Error::new(
            ErrorKind::Corrupt,
            format!(
                "node record claims {} children but labels are single bytes",
                children_count
            ),
        ));
    }

    // Read through `take` so an absurd count from a corrupt record fails at
    // end-of-file instead of pre-allocating the claimed size.
    let body_len = EDGE_ENTRY_LEN * children_count + FILE_ENTRY_LEN * files_count;
    let mut body = Vec::new();
    reader
        .take(body_len as u64)
        .read_to_end(&mut body)
        .map_err(|err| {
            Error::new(
                ErrorKind::Corrupt,
                format!("truncated node record: {}", err),
            )
        })?;
    if body.len() < body_len {
        return Err(Error::new(
            ErrorKind::Corrupt,
            format!(
                "node record needs {} body bytes but only {} are present",
                body_len,
                body.len()
            ),
        ));
    }
    let mut body = &body[..];

    let mut node = Node::new();
    for _ in 0..children_count {
        let label = body.get_u8();
        let child = NodeId(body.get_u32_le());
        node.children.insert(label, child);
    }
    for _ in 0..files_count {
        node.files.insert(body.get_u32_le());
    }
    Ok(node)
}

fn read_record_bytes(reader: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|err| {
        Error::new(
            ErrorKind::Corrupt,
            format!("truncated node record: {}", err),
        )
    })
}
