use core::{fmt, iter::FusedIterator};

use super::*;

/// A position in a [`SkipSet`]: either an element or the end position one past
/// the last element.
///
/// A cursor only moves forward. It is `Copy`, so remembering a position is as
/// cheap as copying the cursor.
pub struct Cursor<'a, T> {
  arena: &'a Arena<T>,
  nd: NodePtr,
}

impl<T> Clone for Cursor<'_, T> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
  #[inline]
  pub(super) const fn new(arena: &'a Arena<T>, nd: NodePtr) -> Self {
    Self { arena, nd }
  }

  /// Returns the element at this position.
  ///
  /// # Errors
  ///
  /// - Returns `Err(Error::PastTheEnd)` if this is the end position.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Error, SkipSet};
  ///
  /// let set = SkipSet::<i32>::new();
  /// assert_eq!(set.end().get(), Err(Error::PastTheEnd));
  /// ```
  #[inline]
  pub fn get(&self) -> Result<&'a T, Error> {
    self.arena.get(self.nd).ok_or(Error::PastTheEnd)
  }

  /// Returns true if this is the end position.
  #[inline]
  pub fn is_end(&self) -> bool {
    self.nd.is_null()
  }

  /// Moves to the next position. The end position stays where it is.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set = SkipSet::from([1, 2]);
  /// let mut cur = set.begin();
  /// assert_eq!(cur.get(), Ok(&1));
  /// cur.advance();
  /// assert_eq!(cur.get(), Ok(&2));
  /// cur.advance();
  /// assert_eq!(cur, set.end());
  /// cur.advance();
  /// assert!(cur.is_end());
  /// ```
  #[inline]
  pub fn advance(&mut self) {
    if !self.nd.is_null() {
      self.nd = self.arena.next(self.nd, 0);
    }
  }
}

impl<T> PartialEq for Cursor<'_, T> {
  /// Two cursors are equal when they point at the same position of the same skipset.
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    core::ptr::eq(self.arena, other.arena) && self.nd == other.nd
  }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.arena.get(self.nd) {
      Some(value) => f.debug_tuple("Cursor").field(value).finish(),
      None => f.write_str("Cursor(end)"),
    }
  }
}

impl<'a, T> IntoIterator for Cursor<'a, T> {
  type Item = &'a T;
  type IntoIter = Range<'a, T>;

  /// Returns an iterator from this position to the end of the skipset.
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    Range::new(self.arena, self.nd, NodePtr::NULL)
  }
}

/// An iterator over the elements of a [`SkipSet`], in order.
pub struct Iter<'a, T> {
  arena: &'a Arena<T>,
  nd: NodePtr,
  remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      arena: self.arena,
      nd: self.nd,
      remaining: self.remaining,
    }
  }
}

impl<'a, T> Iter<'a, T> {
  #[inline]
  pub(super) const fn new(arena: &'a Arena<T>, nd: NodePtr, remaining: usize) -> Self {
    Self {
      arena,
      nd,
      remaining,
    }
  }

  /// Returns the position of the next element this iterator yields.
  #[inline]
  pub fn cursor(&self) -> Cursor<'a, T> {
    Cursor::new(self.arena, self.nd)
  }
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.nd.is_null() {
      return None;
    }

    let value = self.arena.value(self.nd);
    self.nd = self.arena.next(self.nd, 0);
    self.remaining -= 1;
    Some(value)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.clone()).finish()
  }
}

/// An iterator over a range of elements of a [`SkipSet`], in order.
///
/// Created by [`SkipSet::range`], or by turning a [`Cursor`] into an iterator.
pub struct Range<'a, T> {
  arena: &'a Arena<T>,
  nd: NodePtr,
  end: NodePtr,
}

impl<T> Clone for Range<'_, T> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      arena: self.arena,
      nd: self.nd,
      end: self.end,
    }
  }
}

impl<'a, T> Range<'a, T> {
  #[inline]
  pub(super) const fn new(arena: &'a Arena<T>, nd: NodePtr, end: NodePtr) -> Self {
    Self { arena, nd, end }
  }

  /// Returns the position of the next element this iterator yields.
  #[inline]
  pub fn cursor(&self) -> Cursor<'a, T> {
    Cursor::new(self.arena, self.nd)
  }

  /// Returns the position the range stops at, which is not part of the range.
  #[inline]
  pub fn end(&self) -> Cursor<'a, T> {
    Cursor::new(self.arena, self.end)
  }
}

impl<'a, T> Iterator for Range<'a, T> {
  type Item = &'a T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.nd.is_null() || self.nd == self.end {
      return None;
    }

    let value = self.arena.value(self.nd);
    self.nd = self.arena.next(self.nd, 0);
    Some(value)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.nd.is_null() || self.nd == self.end {
      (0, Some(0))
    } else {
      (1, Some(self.arena.len()))
    }
  }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.clone()).finish()
  }
}

/// An owning iterator over the elements of a [`SkipSet`], in order.
///
/// Created by the [`IntoIterator`] implementation of [`SkipSet`].
#[derive(Debug, Clone)]
pub struct IntoIter<T> {
  inner: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
  #[inline]
  pub(super) fn new(values: std::vec::Vec<T>) -> Self {
    Self {
      inner: values.into_iter(),
    }
  }
}

impl<T> Iterator for IntoIter<T> {
  type Item = T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
