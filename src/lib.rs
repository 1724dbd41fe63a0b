#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use core::cmp;

mod arena;

mod error;
pub use error::Error;

mod level;

mod options;
pub use options::Options;

mod types;
pub use types::Height;

/// An ordered set implementation based on skiplist
pub mod set;
pub use set::{Cursor, IntoIter, Iter, Range, SkipSet};

pub use rand;

/// The maximum number of levels a skiplist can have.
pub const MAX_HEIGHT: usize = 32;

/// The default probability that a tower grows by one more level.
pub const DEFAULT_PROBABILITY: f64 = 0.25;

/// Comparator defines the ordering relation a [`SkipSet`] keeps its elements in.
///
/// The relation must be a strict weak order: two elements are considered the same
/// element when neither is ordered before the other, i.e. `compare` returns
/// [`Ordering::Equal`](cmp::Ordering::Equal).
///
/// Any closure of the shape `Fn(&T, &T) -> Ordering` is a comparator.
pub trait Comparator<T: ?Sized> {
  /// Compares two elements.
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering;
}

impl<T, F> Comparator<T> for F
where
  T: ?Sized,
  F: Fn(&T, &T) -> cmp::Ordering,
{
  #[inline]
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering {
    self(a, b)
  }
}

/// Ascend is a comparator that orders elements in ascending order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ascend;

impl<T: ?Sized + Ord> Comparator<T> for Ascend {
  #[inline]
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering {
    a.cmp(b)
  }
}

/// Descend is a comparator that orders elements in descending order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descend;

impl<T: ?Sized + Ord> Comparator<T> for Descend {
  #[inline]
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering {
    b.cmp(a)
  }
}
