//! Label dictionaries and node-id mapping.
//!
//! A [`Dictionary`] maps externally meaningful type names to dense ids used
//! to index fixed-size arrays. [`NodeIdMap`] is the bijection between dense
//! [`NodeId`]s and the storage layer's [`OriginalNodeId`]s. Both are filled
//! during graph construction and read-only afterwards.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use metagraph_common::types::{EdgeTypeId, LabelId, NodeId, OriginalNodeId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_common::utils::hash::FxHashMap;

/// A dense integer id that can index an array.
pub trait DenseId: Copy {
    /// Creates the id from its raw value.
    fn from_raw(raw: u32) -> Self;
    /// Returns the raw value.
    fn raw(self) -> u32;
}

impl DenseId for LabelId {
    fn from_raw(raw: u32) -> Self {
        LabelId::new(raw)
    }
    fn raw(self) -> u32 {
        self.as_u32()
    }
}

impl DenseId for EdgeTypeId {
    fn from_raw(raw: u32) -> Self {
        EdgeTypeId::new(raw)
    }
    fn raw(self) -> u32 {
        self.as_u32()
    }
}

/// Bidirectional mapping between names and dense ids `0..len`.
#[derive(Debug, Clone)]
pub struct Dictionary<I> {
    name_to_id: FxHashMap<Arc<str>, u32>,
    id_to_name: Vec<Arc<str>>,
    _id: PhantomData<I>,
}

/// Dictionary of node labels.
pub type LabelDictionary = Dictionary<LabelId>;

/// Dictionary of edge labels.
pub type EdgeTypeDictionary = Dictionary<EdgeTypeId>;

impl<I: DenseId> Dictionary<I> {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            id_to_name: Vec::new(),
            _id: PhantomData,
        }
    }

    /// Returns the id for `name`, assigning the next dense id if it is new.
    pub fn get_or_insert(&mut self, name: &str) -> I {
        if let Some(&id) = self.name_to_id.get(name) {
            return I::from_raw(id);
        }
        let id = self.id_to_name.len() as u32;
        let name: Arc<str> = name.into();
        self.name_to_id.insert(name.clone(), id);
        self.id_to_name.push(name);
        I::from_raw(id)
    }

    /// Returns the id of a known name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<I> {
        self.name_to_id.get(name).map(|&id| I::from_raw(id))
    }

    /// Returns the name of an id, if it was assigned by this dictionary.
    #[must_use]
    pub fn name_of(&self, id: I) -> Option<&str> {
        self.id_to_name.get(id.raw() as usize).map(|name| name.as_ref())
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    /// Whether the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// Iterates `(id, name)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &str)> + '_ {
        self.id_to_name
            .iter()
            .enumerate()
            .map(|(id, name)| (I::from_raw(id as u32), name.as_ref()))
    }

    /// Id → name map handed to serialization collaborators.
    #[must_use]
    pub fn to_record(&self) -> BTreeMap<u32, String> {
        self.iter()
            .map(|(id, name)| (id.raw(), name.to_string()))
            .collect()
    }
}

impl<I: DenseId> Default for Dictionary<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bijection between dense node ids and original node ids.
#[derive(Debug, Clone, Default)]
pub struct NodeIdMap {
    to_original: Vec<OriginalNodeId>,
    to_mapped: FxHashMap<OriginalNodeId, NodeId>,
}

impl NodeIdMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next dense id to `original`.
    ///
    /// Fails with [`Error::DuplicateNode`] if `original` is already mapped.
    pub fn insert(&mut self, original: OriginalNodeId) -> Result<NodeId> {
        if self.to_mapped.contains_key(&original) {
            return Err(Error::DuplicateNode(original.as_u64()));
        }
        let id = u32::try_from(self.to_original.len())
            .map_err(|_| Error::invalid("node_count", "more than u32::MAX nodes"))?;
        let node = NodeId::new(id);
        self.to_original.push(original);
        self.to_mapped.insert(original, node);
        Ok(node)
    }

    /// Dense id of an original id.
    #[must_use]
    pub fn to_mapped(&self, original: OriginalNodeId) -> Option<NodeId> {
        self.to_mapped.get(&original).copied()
    }

    /// Original id of a dense id.
    #[must_use]
    pub fn to_original(&self, node: NodeId) -> Option<OriginalNodeId> {
        self.to_original.get(node.index()).copied()
    }

    /// Number of mapped nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_original.len()
    }

    /// Whether no node is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_original.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_assigns_dense_ids() {
        let mut dict = LabelDictionary::new();
        let author = dict.get_or_insert("Author");
        let paper = dict.get_or_insert("Paper");
        assert_eq!(author, LabelId::new(0));
        assert_eq!(paper, LabelId::new(1));
        assert_eq!(dict.get_or_insert("Author"), author);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_dictionary_lookup_both_ways() {
        let mut dict = EdgeTypeDictionary::new();
        let wrote = dict.get_or_insert("WROTE");
        assert_eq!(dict.id_of("WROTE"), Some(wrote));
        assert_eq!(dict.name_of(wrote), Some("WROTE"));
        assert_eq!(dict.id_of("CITES"), None);
        assert_eq!(dict.name_of(EdgeTypeId::new(5)), None);
    }

    #[test]
    fn test_dictionary_record() {
        let mut dict = LabelDictionary::new();
        dict.get_or_insert("A");
        dict.get_or_insert("B");
        let record = dict.to_record();
        assert_eq!(record.get(&0).map(String::as_str), Some("A"));
        assert_eq!(record.get(&1).map(String::as_str), Some("B"));
    }

    #[test]
    fn test_node_id_map() {
        let mut ids = NodeIdMap::new();
        let a = ids.insert(OriginalNodeId::new(100)).unwrap();
        let b = ids.insert(OriginalNodeId::new(7)).unwrap();
        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert_eq!(ids.to_mapped(OriginalNodeId::new(7)), Some(b));
        assert_eq!(ids.to_original(a), Some(OriginalNodeId::new(100)));
        assert_eq!(ids.to_original(NodeId::new(2)), None);
    }

    #[test]
    fn test_node_id_map_rejects_duplicates() {
        let mut ids = NodeIdMap::new();
        ids.insert(OriginalNodeId::new(1)).unwrap();
        assert!(matches!(
            ids.insert(OriginalNodeId::new(1)),
            Err(Error::DuplicateNode(1))
        ));
        assert_eq!(ids.len(), 1);
    }
}
