//! A Module with some utilities for working with NodeIds

use crate::NodeId;
use std::hash::{BuildHasherDefault, Hasher};

/// A specialized [`HashMap`](hashbrown::HashMap) for NodeIds with a faster Hasher
pub type NodeIdMap<V> = hashbrown::HashMap<NodeId, V, BuildHasherDefault<NodeIdHasher>>;
/// A specialized [`HashSet`](hashbrown::HashSet) for NodeIds with a faster Hasher
pub type NodeIdSet = hashbrown::HashSet<NodeId, BuildHasherDefault<NodeIdHasher>>;

/// A [`Hasher`] specialized on NodeIds
///
/// Host ids are opaque numbers that are already spread well enough, so they are used as
/// the hash directly. The multiplication only scatters the bits hashbrown takes its
/// control bytes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NodeIdHasher(u64);

impl Hasher for NodeIdHasher {
	/// panics, since only NodeIds are supposed to be used
	fn write(&mut self, _: &[u8]) {
		unreachable!("This Hasher only works with NodeIds")
	}
	/// Writes a single NodeId into this hasher.
	fn write_u64(&mut self, id: NodeId) {
		self.0 = id.wrapping_mul(0x9E37_79B9_7F4A_7C15)
	}
	fn finish(&self) -> u64 {
		self.0
	}
}

/// create a new [`NodeIdMap`] with at least the given capacity
pub fn node_id_map_with_cap<V>(capacity: usize) -> NodeIdMap<V> {
	NodeIdMap::with_capacity_and_hasher(capacity, Default::default())
}
/// create a new [`NodeIdSet`] with at least the given capacity
pub fn node_id_set_with_cap(capacity: usize) -> NodeIdSet {
	NodeIdSet::with_capacity_and_hasher(capacity, Default::default())
}
