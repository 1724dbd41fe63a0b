use core::{
  cmp,
  fmt,
  hash::{Hash, Hasher},
  ops::{Bound, RangeBounds},
};

use rand::{rngs::SmallRng, RngCore, SeedableRng};

use super::{
  arena::{Arena, NodePtr},
  level::{seeded_rng, Leveler},
  Ascend, Comparator, Error, Height, Options, MAX_HEIGHT,
};

mod iterator;
pub use iterator::*;

#[cfg(test)]
mod tests;

/// An ordered set of unique elements based on a probabilistic skiplist.
///
/// Elements are kept sorted by the comparator `C`, and towers of "express lane"
/// links let lookups, insertions and bound queries run in expected `O(log n)`
/// without any rebalancing. The height of every tower is drawn from the random
/// source `R` when the element is inserted and never changes afterwards.
///
/// Elements are immutable once added and deletion is not supported. Iteration
/// only goes forward, from the smallest element to the largest.
///
/// All nodes live in an arena owned by the set and are addressed by index, so
/// dropping or [`clear`](SkipSet::clear)ing the set releases them in bulk.
pub struct SkipSet<T, C = Ascend, R = SmallRng> {
  arena: Arena<T>,
  /// Current height. 1 <= height <= max_height.
  height: usize,
  leveler: Leveler<R>,
  cmp: C,
}

/// Seeks a position on every level of the skiplist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seek {
  /// Stops before the first element not ordered before the key.
  Lower,
  /// Stops before the first element the key is ordered before.
  Upper,
}

/// The two nodes around a position on one level.
#[derive(Debug, Clone, Copy)]
struct Splice {
  prev: NodePtr,
  next: NodePtr,
}

// --------------------------------Public Methods--------------------------------
impl<T, C, R> SkipSet<T, C, R> {
  /// Returns the height of the highest tower within any of the nodes that
  /// have ever been allocated as part of this skiplist.
  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  /// Returns the maximum height a tower in this skiplist can have.
  #[inline]
  pub fn max_height(&self) -> Height {
    self.arena.max_height()
  }

  /// Returns the number of elements in the skipset.
  #[inline]
  pub fn len(&self) -> usize {
    self.arena.len()
  }

  /// Returns true if the skipset is empty.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the theoretical maximum number of elements a skipset can hold.
  ///
  /// This is a limit of the index space of the arena, not a promise that so
  /// many elements fit in memory.
  #[inline]
  pub const fn max_size(&self) -> usize {
    Arena::<T>::MAX_NODES
  }

  /// Returns the comparator used to order elements.
  #[inline]
  pub const fn comparator(&self) -> &C {
    &self.cmp
  }

  /// Returns the first element, if any.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([3, 1, 2]);
  /// assert_eq!(set.first(), Some(&1));
  /// ```
  #[inline]
  pub fn first(&self) -> Option<&T> {
    self.arena.get(self.arena.next(NodePtr::HEAD, 0))
  }

  /// Returns the last element, if any.
  ///
  /// Reaching the end takes a descent through the levels, so this is expected
  /// `O(log n)`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([3, 1, 2]);
  /// assert_eq!(set.last(), Some(&3));
  /// ```
  pub fn last(&self) -> Option<&T> {
    let mut prev = NodePtr::HEAD;
    for level in (0..self.height).rev() {
      loop {
        let next = self.arena.next(prev, level);
        if next.is_null() {
          break;
        }
        prev = next;
      }
    }
    self.arena.get(prev)
  }

  /// Returns a cursor at the first element, or the end cursor if the set is empty.
  #[inline]
  pub fn begin(&self) -> Cursor<'_, T> {
    Cursor::new(&self.arena, self.arena.next(NodePtr::HEAD, 0))
  }

  /// Returns the end cursor, the position one past the last element.
  ///
  /// Every lookup that misses returns this position.
  #[inline]
  pub fn end(&self) -> Cursor<'_, T> {
    Cursor::new(&self.arena, NodePtr::NULL)
  }

  /// Returns an iterator over the elements in order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(&self.arena, self.arena.next(NodePtr::HEAD, 0), self.len())
  }

  /// Removes all elements.
  ///
  /// The random source keeps its state, so towers built after a clear are not
  /// a replay of the ones built before it.
  pub fn clear(&mut self) {
    #[cfg(feature = "tracing")]
    tracing::debug!(len = self.len(), height = self.height, "clearing skipset");

    self.arena.clear();
    self.height = 1;
  }

  /// Swaps the content of two skipsets in `O(1)`.
  #[inline]
  pub fn swap(&mut self, other: &mut Self) {
    core::mem::swap(self, other);
  }
}

impl<T: Ord> SkipSet<T> {
  /// Creates an empty skipset with the default [`Options`], ordered ascending.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let mut set = SkipSet::new();
  /// set.insert(10);
  /// set.insert(5);
  /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [5, 10]);
  /// ```
  #[inline]
  pub fn new() -> Self {
    Self::with_comparator(Ascend)
  }

  /// Creates an empty skipset with the given [`Options`], ordered ascending.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Options, SkipSet};
  ///
  /// let set = SkipSet::<u64>::with_options(Options::new().with_seed(Some(42))).unwrap();
  /// assert!(set.is_empty());
  ///
  /// let err = SkipSet::<u64>::with_options(Options::new().with_probability(2.0));
  /// assert!(err.is_err());
  /// ```
  #[inline]
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    Self::with_options_and_comparator(opts, Ascend)
  }
}

impl<T, C> SkipSet<T, C> {
  /// Like [`SkipSet::new`], but with a custom [`Comparator`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Descend, SkipSet};
  ///
  /// let mut set = SkipSet::with_comparator(Descend);
  /// set.extend([1, 2, 3]);
  /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
  /// ```
  #[inline]
  pub fn with_comparator(cmp: C) -> Self {
    Self::from_parts(
      Arena::new(Height::new(), 0),
      Leveler::new(SmallRng::from_os_rng()),
      cmp,
    )
  }

  /// Like [`SkipSet::with_options`], but with a custom [`Comparator`].
  #[inline]
  pub fn with_options_and_comparator(opts: Options, cmp: C) -> Result<Self, Error> {
    let rng = seeded_rng(&opts);
    Self::with_options_comparator_and_rng(opts, cmp, rng)
  }
}

impl<T, C, R> SkipSet<T, C, R> {
  /// Creates an empty skipset with the given [`Options`], [`Comparator`] and
  /// random source used to pick tower heights.
  ///
  /// The seed in the options is ignored, the random source is used as given.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{rand::{rngs::StdRng, SeedableRng}, Ascend, Options, SkipSet};
  ///
  /// let mut set = SkipSet::with_options_comparator_and_rng(
  ///   Options::new(),
  ///   Ascend,
  ///   StdRng::seed_from_u64(7),
  /// )
  /// .unwrap();
  /// set.insert("a");
  /// assert!(set.contains(&"a"));
  /// ```
  pub fn with_options_comparator_and_rng(opts: Options, cmp: C, rng: R) -> Result<Self, Error> {
    let leveler = Leveler::with_options(&opts, rng)?;
    let arena = Arena::new(opts.max_height(), opts.capacity());
    Ok(Self::from_parts(arena, leveler, cmp))
  }

  #[inline]
  const fn from_parts(arena: Arena<T>, leveler: Leveler<R>, cmp: C) -> Self {
    Self {
      arena,
      height: 1,
      leveler,
      cmp,
    }
  }
}

impl<T, C, R> SkipSet<T, C, R>
where
  C: Comparator<T>,
  R: RngCore,
{
  /// Inserts a value if no equal element exists yet.
  ///
  /// Returns the position of the element equal to `value` and whether the
  /// value was inserted. When an equal element already exists the set is left
  /// unchanged, `value` is dropped and the position refers to the existing
  /// element.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let mut set = SkipSet::new();
  /// let (pos, inserted) = set.insert(42);
  /// assert!(inserted);
  /// assert_eq!(pos.get(), Ok(&42));
  ///
  /// let (pos, inserted) = set.insert(42);
  /// assert!(!inserted);
  /// assert_eq!(pos.get(), Ok(&42));
  /// assert_eq!(set.len(), 1);
  /// ```
  pub fn insert(&mut self, value: T) -> (Cursor<'_, T>, bool) {
    // Levels at or above the current height are empty, so their predecessor is the head.
    let mut update = [NodePtr::HEAD; MAX_HEIGHT];
    let spl = self.descend(&value, Seek::Lower, Some(&mut update));

    if !spl.next.is_null() && self.is_equal(self.arena.value(spl.next), &value) {
      #[cfg(feature = "tracing")]
      tracing::trace!(len = self.len(), "rejecting duplicate element");

      return (Cursor::new(&self.arena, spl.next), false);
    }

    let height = self.leveler.random_height().to_usize();
    if height > self.height {
      #[cfg(feature = "tracing")]
      tracing::trace!(from = self.height, to = height, "increasing skipset height");

      self.height = height;
    }

    let nd = self.arena.allocate(value, Height::from_usize_unchecked(height));

    // +----------------+     +------------+     +----------------+
    // |      prev      |     |     nd     |     |      next      |
    // |   next link    |---->| next link  |---->|                |
    // +----------------+     +------------+     +----------------+
    //
    // 1. Point nd at the old successor of prev.
    // 2. Point prev at nd.
    for (level, prev) in update.iter().copied().enumerate().take(height) {
      let next = self.arena.next(prev, level);
      self.arena.set_next(nd, level, next);
      self.arena.set_next(prev, level, nd);
    }

    (Cursor::new(&self.arena, nd), true)
  }

  /// Builds an element from `args` and inserts it, see [`SkipSet::insert`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let mut set = SkipSet::<String>::new();
  /// let (pos, inserted) = set.emplace("test");
  /// assert!(inserted);
  /// assert_eq!(pos.get().unwrap(), "test");
  /// ```
  #[inline]
  pub fn emplace<A>(&mut self, args: A) -> (Cursor<'_, T>, bool)
  where
    T: From<A>,
  {
    self.insert(T::from(args))
  }
}

impl<T, C, R> SkipSet<T, C, R>
where
  C: Comparator<T>,
{
  /// Returns the position of the element equal to `key`, or the end cursor.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([10, 20, 5, 15, 25]);
  /// assert_eq!(set.find(&15).get(), Ok(&15));
  /// assert!(set.find(&99).is_end());
  /// ```
  #[inline]
  pub fn find(&self, key: &T) -> Cursor<'_, T> {
    match self.find_node(key) {
      Some(nd) => Cursor::new(&self.arena, nd),
      None => self.end(),
    }
  }

  /// Returns the element equal to `key`, if any.
  #[inline]
  pub fn get(&self, key: &T) -> Option<&T> {
    self.find_node(key).map(|nd| self.arena.value(nd))
  }

  /// Returns true if the set contains an element equal to `key`.
  #[inline]
  pub fn contains(&self, key: &T) -> bool {
    self.find_node(key).is_some()
  }

  /// Returns the number of elements equal to `key`, which is `0` or `1`.
  #[inline]
  pub fn count(&self, key: &T) -> usize {
    self.contains(key) as usize
  }

  /// Returns the position of the first element not ordered before `key`, or
  /// the end cursor.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([1, 3, 5, 7, 9]);
  /// assert_eq!(set.lower_bound(&2).get(), Ok(&3));
  /// assert_eq!(set.lower_bound(&5).get(), Ok(&5));
  /// assert!(set.lower_bound(&10).is_end());
  /// ```
  #[inline]
  pub fn lower_bound(&self, key: &T) -> Cursor<'_, T> {
    let spl = self.descend(key, Seek::Lower, None);
    Cursor::new(&self.arena, spl.next)
  }

  /// Returns the position of the first element `key` is ordered before, or
  /// the end cursor.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([1, 3, 5, 7, 9]);
  /// assert_eq!(set.upper_bound(&2).get(), Ok(&3));
  /// assert_eq!(set.upper_bound(&5).get(), Ok(&7));
  /// assert!(set.upper_bound(&9).is_end());
  /// ```
  #[inline]
  pub fn upper_bound(&self, key: &T) -> Cursor<'_, T> {
    let spl = self.descend(key, Seek::Upper, None);
    Cursor::new(&self.arena, spl.next)
  }

  /// Returns the range of elements equal to `key` as the pair
  /// `(lower_bound(key), upper_bound(key))`.
  ///
  /// Elements are unique, so the range is either empty or holds one element.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([1, 3, 5, 7, 9]);
  ///
  /// let (lo, hi) = set.equal_range(&5);
  /// assert_eq!(lo.get(), Ok(&5));
  /// assert_eq!(hi.get(), Ok(&7));
  ///
  /// let (lo, hi) = set.equal_range(&6);
  /// assert_eq!(lo, hi);
  /// assert_eq!(lo.get(), Ok(&7));
  /// ```
  #[inline]
  pub fn equal_range(&self, key: &T) -> (Cursor<'_, T>, Cursor<'_, T>) {
    (self.lower_bound(key), self.upper_bound(key))
  }

  /// Returns an iterator over the elements within `range`, in order.
  ///
  /// A range whose start lies after its end yields nothing.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use core::ops::Bound;
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([1, 3, 5, 7, 9]);
  /// assert_eq!(set.range(3..7).copied().collect::<Vec<_>>(), [3, 5]);
  /// assert_eq!(set.range(4..=9).copied().collect::<Vec<_>>(), [5, 7, 9]);
  /// assert_eq!(
  ///   set.range((Bound::Excluded(3), Bound::Unbounded)).copied().collect::<Vec<_>>(),
  ///   [5, 7, 9],
  /// );
  /// assert_eq!(set.range((Bound::Included(8), Bound::Excluded(2))).count(), 0);
  /// ```
  pub fn range<Q>(&self, range: Q) -> Range<'_, T>
  where
    Q: RangeBounds<T>,
  {
    let mut start = match range.start_bound() {
      Bound::Included(key) => self.descend(key, Seek::Lower, None).next,
      Bound::Excluded(key) => self.descend(key, Seek::Upper, None).next,
      Bound::Unbounded => self.arena.next(NodePtr::HEAD, 0),
    };

    let end = match range.end_bound() {
      Bound::Included(key) => self.descend(key, Seek::Upper, None).next,
      Bound::Excluded(key) => self.descend(key, Seek::Lower, None).next,
      Bound::Unbounded => NodePtr::NULL,
    };

    if !start.is_null()
      && !end.is_null()
      && self.cmp.compare(self.arena.value(start), self.arena.value(end)) == cmp::Ordering::Greater
    {
      start = end;
    }

    Range::new(&self.arena, start, end)
  }

  fn find_node(&self, key: &T) -> Option<NodePtr> {
    let spl = self.descend(key, Seek::Lower, None);
    if !spl.next.is_null() && self.is_equal(self.arena.value(spl.next), key) {
      return Some(spl.next);
    }
    None
  }

  /// Walks from the head down to the bottom level, moving right on each level
  /// while `seek` allows it. When `update` is given, the last node visited on
  /// every level is recorded in it.
  ///
  /// Returns the splice around the position on the bottom level.
  fn descend(&self, key: &T, seek: Seek, mut update: Option<&mut [NodePtr; MAX_HEIGHT]>) -> Splice {
    let mut spl = Splice {
      prev: NodePtr::HEAD,
      next: NodePtr::NULL,
    };

    for level in (0..self.height).rev() {
      spl = self.find_splice_for_level(key, seek, level, spl.prev);
      if let Some(update) = update.as_deref_mut() {
        update[level] = spl.prev;
      }
    }
    spl
  }

  fn find_splice_for_level(&self, key: &T, seek: Seek, level: usize, start: NodePtr) -> Splice {
    let mut prev = start;

    loop {
      let next = self.arena.next(prev, level);
      if next.is_null() {
        // End of this level, so done.
        return Splice { prev, next };
      }

      let next_value = self.arena.value(next);
      let keep_moving = match seek {
        Seek::Lower => self.cmp.compare(next_value, key) == cmp::Ordering::Less,
        Seek::Upper => self.cmp.compare(key, next_value) != cmp::Ordering::Less,
      };

      if !keep_moving {
        // We are done for this level, since prev < key <= next (or prev <= key < next).
        return Splice { prev, next };
      }
      prev = next;
    }
  }

  #[inline]
  fn is_equal(&self, a: &T, b: &T) -> bool {
    self.cmp.compare(a, b) == cmp::Ordering::Equal
  }
}

#[cfg(test)]
impl<T, C: Comparator<T>, R> SkipSet<T, C, R> {
  /// Panics if the structure of the skiplist is broken.
  pub(crate) fn check_invariants(&self) {
    use std::vec::Vec;

    let max_height = self.max_height().to_usize();
    assert!(self.height >= 1 && self.height <= max_height);

    for level in self.height..max_height {
      assert!(
        self.arena.next(NodePtr::HEAD, level).is_null(),
        "level {level} is above the height but not empty"
      );
    }

    let mut below: Vec<NodePtr> = Vec::new();
    for level in 0..self.height {
      let mut nodes = Vec::new();
      let mut cur = self.arena.next(NodePtr::HEAD, level);
      while !cur.is_null() {
        let height = self.arena.height(cur);
        assert!(height > level, "node on level {level} has height {height}");
        assert!(height <= self.height, "tower taller than the skipset");

        if let Some(&prev) = nodes.last() {
          assert_eq!(
            self.cmp.compare(self.arena.value(prev), self.arena.value(cur)),
            cmp::Ordering::Less,
            "level {level} is not strictly increasing"
          );
        }
        nodes.push(cur);
        cur = self.arena.next(cur, level);
      }

      if level == 0 {
        assert_eq!(nodes.len(), self.len(), "bottom level misses elements");
      } else {
        // Every level is a subsequence of the one below it.
        let mut lower = below.iter();
        for nd in &nodes {
          assert!(lower.any(|l| l == nd), "level {level} skips a tower");
        }
      }
      below = nodes;
    }
  }

  pub(crate) fn tower_heights(&self) -> std::vec::Vec<usize> {
    let mut heights = std::vec::Vec::with_capacity(self.len());
    let mut cur = self.arena.next(NodePtr::HEAD, 0);
    while !cur.is_null() {
      heights.push(self.arena.height(cur));
      cur = self.arena.next(cur, 0);
    }
    heights
  }
}

impl<T, C, R> Default for SkipSet<T, C, R>
where
  C: Default,
  R: SeedableRng,
{
  #[inline]
  fn default() -> Self {
    Self::from_parts(
      Arena::new(Height::new(), 0),
      Leveler::new(R::from_os_rng()),
      C::default(),
    )
  }
}

impl<T, C, R> Clone for SkipSet<T, C, R>
where
  T: Clone,
  C: Comparator<T> + Clone,
  R: RngCore + Clone,
{
  /// Creates a new skipset holding clones of every element.
  ///
  /// The towers are not copied, elements are inserted again in order and
  /// draw new heights.
  fn clone(&self) -> Self {
    let mut set = Self::from_parts(
      Arena::new(self.max_height(), self.len()),
      self.leveler.clone(),
      self.cmp.clone(),
    );
    set.extend(self.iter().cloned());
    set
  }
}

impl<T, C, R> fmt::Debug for SkipSet<T, C, R>
where
  T: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl<T, C, R> Extend<T> for SkipSet<T, C, R>
where
  C: Comparator<T>,
  R: RngCore,
{
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for value in iter {
      self.insert(value);
    }
  }
}

impl<T, C, R> FromIterator<T> for SkipSet<T, C, R>
where
  C: Comparator<T> + Default,
  R: RngCore + SeedableRng,
{
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut set = Self::default();
    set.extend(iter);
    set
  }
}

impl<T: Ord, const N: usize> From<[T; N]> for SkipSet<T> {
  /// Creates a skipset from an array, duplicates are skipped.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([3, 1, 4, 1, 5]);
  /// assert_eq!(set.len(), 4);
  /// ```
  fn from(values: [T; N]) -> Self {
    Self::from_iter(values)
  }
}

impl<'a, T, C, R> IntoIterator for &'a SkipSet<T, C, R> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<T, C, R> IntoIterator for SkipSet<T, C, R> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  /// Consumes the skipset, yields the elements in order.
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    IntoIter::new(self.arena.into_values())
  }
}

impl<T: PartialEq, C, R> PartialEq for SkipSet<T, C, R> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<T: Eq, C, R> Eq for SkipSet<T, C, R> {}

impl<T: PartialOrd, C, R> PartialOrd for SkipSet<T, C, R> {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
    self.iter().partial_cmp(other.iter())
  }
}

impl<T: Ord, C, R> Ord for SkipSet<T, C, R> {
  #[inline]
  fn cmp(&self, other: &Self) -> cmp::Ordering {
    self.iter().cmp(other.iter())
  }
}

impl<T: Hash, C, R> Hash for SkipSet<T, C, R> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.len().hash(state);
    for value in self {
      value.hash(state);
    }
  }
}
