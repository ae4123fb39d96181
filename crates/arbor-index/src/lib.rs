//! ArborDB index engine: a B-tree over a pluggable node store.
//!
//! The tree algorithms are parameterised over [`NodeStore`], so the same
//! search, split, borrow and merge code drives both back-ends:
//!
//! - [`MemoryNodeStore`] keeps every node in a `Vec`; node IDs are vector
//!   indices. Useful for tests and throwaway indexes.
//! - [`FileNodeStore`] maps node IDs to fixed-size slots in a single
//!   binary file and pages nodes in and out on demand. The file header
//!   carries the order, the root ID and a freed-slot chain, so a closed
//!   index can be reopened with [`BTree::open`].
//!
//! ```no_run
//! use arbor_common::StoreConfig;
//! use arbor_index::BTree;
//!
//! # fn main() -> arbor_common::Result<()> {
//! let mut tree = BTree::create(4, &StoreConfig::at("index.arbor"))?;
//! tree.insert(10, 100)?;
//! assert_eq!(tree.get(10)?, Some(100));
//! tree.remove(10)?;
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod node;
pub mod print;
pub mod store;
pub mod tree;
pub mod validate;

pub use file::FileNodeStore;
pub use node::Node;
pub use print::{render_tree, write_tree};
pub use store::{MemoryNodeStore, NodeStore};
pub use tree::{BTree, InsertOutcome, SearchHit};
pub use validate::TreeSummary;
