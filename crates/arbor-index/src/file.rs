//! File-backed node store.
//!
//! One index file per store: a fixed header followed by fixed-size node
//! slots addressed by slot index. Freed slots are tombstoned and chained
//! into a free list headed in the file header, so merges never leak disk
//! space and IDs get reused by later allocations.

use crate::node::Node;
use crate::store::NodeStore;
use arbor_common::{
    slot_size, ArborError, FileHeader, NodeId, Result, StoreConfig, FLAG_FREE, HEADER_SIZE,
};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Node store backed by a single random-access file.
///
/// Every `write` goes straight to the file (optionally fsynced, per
/// [`StoreConfig::fsync_enabled`]), so a `read` of the same ID within the
/// process always sees the new bytes. The header is rewritten whenever
/// the slot count, root or free list changes.
pub struct FileNodeStore {
    file: File,
    config: StoreConfig,
    header: FileHeader,
    slot_len: usize,
}

impl FileNodeStore {
    /// Creates a fresh index file for a tree of the given order,
    /// truncating any existing file at the configured path.
    pub fn create(order: usize, config: &StoreConfig) -> Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&config.path)?;

        let header = FileHeader::new(order as u32);
        file.write_all(&header.to_bytes())?;
        if config.fsync_enabled {
            file.sync_all()?;
        }

        debug!(path = %config.path.display(), order, "created index file");

        Ok(Self {
            file,
            config: config.clone(),
            header,
            slot_len: slot_size(order),
        })
    }

    /// Opens an existing index file, reading the order back from the
    /// header.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let mut file = OpenOptions::new().read(true).write(true).open(&config.path)?;

        let mut buf = [0u8; HEADER_SIZE];
        file.seek(SeekFrom::Start(0))?;
        file.read_exact(&mut buf)?;
        let header = FileHeader::from_bytes(&buf)?;

        if header.order < 3 {
            return Err(ArborError::Corrupt(format!(
                "header order {} below minimum",
                header.order
            )));
        }

        debug!(
            path = %config.path.display(),
            order = header.order,
            slots = header.slot_count,
            live = header.live_nodes,
            "opened index file"
        );

        Ok(Self {
            file,
            config: config.clone(),
            slot_len: slot_size(header.order as usize),
            header,
        })
    }

    /// Tree order recorded in the file header.
    pub fn order(&self) -> usize {
        self.header.order as usize
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Total slots ever allocated, freed slots included.
    pub fn slot_count(&self) -> u32 {
        self.header.slot_count
    }

    fn slot_offset(&self, id: NodeId) -> u64 {
        HEADER_SIZE as u64 + id.0 as u64 * self.slot_len as u64
    }

    fn check_id(&self, id: NodeId) -> Result<()> {
        if id.0 < self.header.slot_count {
            Ok(())
        } else {
            Err(ArborError::InvalidNodeId(id))
        }
    }

    fn write_header(&mut self) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&self.header.to_bytes())?;
        Ok(())
    }

    fn read_slot_raw(&mut self, id: NodeId) -> Result<Vec<u8>> {
        let offset = self.slot_offset(id);
        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; self.slot_len];
        self.file.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn write_slot_raw(&mut self, id: NodeId, buf: &[u8]) -> Result<()> {
        let offset = self.slot_offset(id);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(buf)?;
        Ok(())
    }

    /// Writes a tombstone at `id` linking to the next free slot.
    ///
    /// The tombstone wipes the slot and reuses the own-ID cell as the
    /// free-list link.
    fn write_tombstone(&mut self, id: NodeId, next: Option<NodeId>) -> Result<()> {
        let mut buf = vec![0u8; self.slot_len];
        buf[2] = FLAG_FREE;
        buf[4..8].copy_from_slice(&NodeId::to_disk(next).to_le_bytes());
        self.write_slot_raw(id, &buf)
    }

    fn maybe_sync(&mut self) -> Result<()> {
        if self.config.fsync_enabled {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl NodeStore for FileNodeStore {
    fn allocate(&mut self, is_leaf: bool) -> Result<Node> {
        let id = match self.header.free_head {
            Some(free_id) => {
                // pop the free list: the tombstone's own-ID cell links to
                // the next free slot
                let buf = self.read_slot_raw(free_id)?;
                if buf[2] & FLAG_FREE == 0 {
                    return Err(ArborError::Corrupt(format!(
                        "free list points at live slot {}",
                        free_id
                    )));
                }
                let next = i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
                self.header.free_head = NodeId::from_disk(next);
                free_id
            }
            None => {
                let id = NodeId(self.header.slot_count);
                self.header.slot_count += 1;
                id
            }
        };

        let node = Node::new(id, is_leaf);
        let buf = node.to_slot(self.order())?;
        self.write_slot_raw(id, &buf)?;
        self.header.live_nodes += 1;
        self.write_header()?;
        self.maybe_sync()?;
        trace!(id = %id, is_leaf, "allocated node slot");
        Ok(node)
    }

    fn read(&mut self, id: NodeId) -> Result<Node> {
        self.check_id(id)?;
        let buf = self.read_slot_raw(id)?;
        if buf[2] & FLAG_FREE != 0 {
            return Err(ArborError::NodeFreed(id));
        }
        let node = Node::from_slot(&buf, self.order())?;
        if node.id != id {
            return Err(ArborError::Corrupt(format!(
                "slot {} holds node claiming id {}",
                id, node.id
            )));
        }
        Ok(node)
    }

    fn write(&mut self, node: &Node) -> Result<()> {
        self.check_id(node.id)?;
        let buf = node.to_slot(self.order())?;
        self.write_slot_raw(node.id, &buf)?;
        self.maybe_sync()
    }

    fn free(&mut self, id: NodeId) -> Result<()> {
        self.check_id(id)?;
        let buf = self.read_slot_raw(id)?;
        if buf[2] & FLAG_FREE != 0 {
            return Err(ArborError::NodeFreed(id));
        }
        self.write_tombstone(id, self.header.free_head)?;
        self.header.free_head = Some(id);
        self.header.live_nodes -= 1;
        self.write_header()?;
        self.maybe_sync()?;
        trace!(id = %id, "freed node slot");
        Ok(())
    }

    fn root(&self) -> Option<NodeId> {
        self.header.root
    }

    fn set_root(&mut self, root: Option<NodeId>) -> Result<()> {
        self.header.root = root;
        self.write_header()?;
        self.maybe_sync()
    }

    fn node_count(&self) -> u64 {
        self.header.live_nodes as u64
    }

    fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl Drop for FileNodeStore {
    fn drop(&mut self) {
        let _ = self.file.sync_all();
    }
}
