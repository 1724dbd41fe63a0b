use std::vec::Vec;

use super::Height;

/// A link between two towers: the index of a node in the [`Arena`], or one of
/// the two sentinels [`NodePtr::NULL`] and [`NodePtr::HEAD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodePtr(u32);

impl NodePtr {
  /// The absent link, past the last node of a level.
  pub(crate) const NULL: Self = Self(u32::MAX);

  /// The head of the skiplist, which holds no value.
  pub(crate) const HEAD: Self = Self(u32::MAX - 1);

  #[inline]
  pub(crate) const fn is_null(&self) -> bool {
    self.0 == Self::NULL.0
  }

  #[inline]
  const fn index(&self) -> usize {
    self.0 as usize
  }
}

#[derive(Debug)]
struct Node<T> {
  value: T,
  /// Offset of the first link of this node's tower in `Arena::links`.
  tower: usize,
  height: Height,
}

/// Owns every node of a skiplist and the towers linking them.
///
/// Towers are stored back to back in a single link table; the head tower comes
/// first and spans `max_height` levels, every other tower spans exactly the
/// height of its node. Nodes are never moved or freed individually, so a
/// [`NodePtr`] stays valid until the arena is cleared.
#[derive(Debug)]
pub(crate) struct Arena<T> {
  nodes: Vec<Node<T>>,
  links: Vec<NodePtr>,
  max_height: Height,
}

impl<T> Arena<T> {
  /// The largest number of nodes that can be addressed, the two sentinels are
  /// carved out of the `u32` index space.
  pub(crate) const MAX_NODES: usize = (u32::MAX - 1) as usize;

  pub(crate) fn new(max_height: Height, capacity: usize) -> Self {
    let head_height = max_height.to_usize();
    let mut links = Vec::with_capacity(head_height + capacity);
    links.resize(head_height, NodePtr::NULL);

    Self {
      nodes: Vec::with_capacity(capacity),
      links,
      max_height,
    }
  }

  /// Returns the number of nodes, the head excluded.
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub(crate) const fn max_height(&self) -> Height {
    self.max_height
  }

  /// Allocates a node with a tower of `height` levels, all of them unlinked.
  pub(crate) fn allocate(&mut self, value: T, height: Height) -> NodePtr {
    assert!(
      self.nodes.len() < Self::MAX_NODES,
      "skipset cannot hold more than {} elements",
      Self::MAX_NODES
    );
    debug_assert!(height <= self.max_height);

    let tower = self.links.len();
    self.links.resize(tower + height.to_usize(), NodePtr::NULL);

    let ptr = NodePtr(self.nodes.len() as u32);
    self.nodes.push(Node {
      value,
      tower,
      height,
    });
    ptr
  }

  /// Returns the number of levels the tower of `ptr` spans.
  #[inline]
  pub(crate) fn height(&self, ptr: NodePtr) -> usize {
    if ptr == NodePtr::HEAD {
      return self.max_height.to_usize();
    }
    self.nodes[ptr.index()].height.to_usize()
  }

  #[inline]
  fn tower(&self, ptr: NodePtr) -> usize {
    if ptr == NodePtr::HEAD {
      return 0;
    }
    self.nodes[ptr.index()].tower
  }

  /// Returns the successor of `ptr` on `level`.
  ///
  /// `ptr` must be the head or a node whose tower reaches `level`.
  #[inline]
  pub(crate) fn next(&self, ptr: NodePtr, level: usize) -> NodePtr {
    debug_assert!(!ptr.is_null());
    debug_assert!(level < self.height(ptr));
    self.links[self.tower(ptr) + level]
  }

  /// Links `ptr` to `next` on `level`.
  #[inline]
  pub(crate) fn set_next(&mut self, ptr: NodePtr, level: usize, next: NodePtr) {
    debug_assert!(!ptr.is_null());
    debug_assert!(level < self.height(ptr));
    let offset = self.tower(ptr) + level;
    self.links[offset] = next;
  }

  /// Returns the value stored in `ptr`, which must be a node.
  #[inline]
  pub(crate) fn value(&self, ptr: NodePtr) -> &T {
    &self.nodes[ptr.index()].value
  }

  /// Returns the value stored in `ptr`, or `None` for the sentinels.
  #[inline]
  pub(crate) fn get(&self, ptr: NodePtr) -> Option<&T> {
    self.nodes.get(ptr.index()).map(|node| &node.value)
  }

  /// Drops every node and unlinks the head tower.
  pub(crate) fn clear(&mut self) {
    self.nodes.clear();
    self.links.truncate(self.max_height.to_usize());
    self.links.fill(NodePtr::NULL);
  }

  /// Consumes the arena, returns the values in bottom level order.
  pub(crate) fn into_values(self) -> Vec<T> {
    let mut rank = Vec::with_capacity(self.nodes.len());
    rank.resize(self.nodes.len(), 0usize);

    let mut cur = self.next(NodePtr::HEAD, 0);
    let mut i = 0;
    while !cur.is_null() {
      rank[cur.index()] = i;
      i += 1;
      cur = self.next(cur, 0);
    }

    let mut slots: Vec<Option<T>> = Vec::with_capacity(self.nodes.len());
    slots.resize_with(self.nodes.len(), || None);
    for (node, rank) in self.nodes.into_iter().zip(rank) {
      slots[rank] = Some(node.value);
    }
    slots.into_iter().flatten().collect()
  }
}
