use core::fmt;

use super::{Error, MAX_HEIGHT};

/// Height which is used to configure the maximum tower height of a skiplist, and
/// to describe the tower height of a single element. It is always in range `1..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height(u8);

impl Default for Height {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Height {
  /// The smallest height, a tower which only lives on the bottom level.
  pub const MIN: Self = Self(1);

  /// The largest height, see [`MAX_HEIGHT`].
  pub const MAX: Self = Self(MAX_HEIGHT as u8);

  /// Returns the default height, which is [`Height::MAX`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::Height;
  ///
  /// assert_eq!(Height::new(), Height::MAX);
  /// ```
  #[inline]
  pub const fn new() -> Self {
    Self::MAX
  }

  /// Creates a height, returns an error if `height` is not in range `1..=MAX_HEIGHT`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::Height;
  ///
  /// assert_eq!(Height::try_new(12).unwrap().to_usize(), 12);
  /// assert!(Height::try_new(0).is_err());
  /// assert!(Height::try_new(33).is_err());
  /// ```
  #[inline]
  pub const fn try_new(height: usize) -> Result<Self, Error> {
    if height == 0 || height > MAX_HEIGHT {
      return Err(Error::InvalidHeight(height));
    }
    Ok(Self(height as u8))
  }

  /// Creates a height without range checks, the caller keeps `1 <= height <= MAX_HEIGHT`.
  #[inline]
  pub(crate) const fn from_usize_unchecked(height: usize) -> Self {
    debug_assert!(height >= 1 && height <= MAX_HEIGHT);
    Self(height as u8)
  }

  /// Returns the height as `usize`.
  #[inline]
  pub const fn to_usize(self) -> usize {
    self.0 as usize
  }

  /// Returns the height as `u8`.
  #[inline]
  pub const fn to_u8(self) -> u8 {
    self.0
  }
}

impl TryFrom<usize> for Height {
  type Error = Error;

  #[inline]
  fn try_from(height: usize) -> Result<Self, Self::Error> {
    Self::try_new(height)
  }
}

impl TryFrom<u8> for Height {
  type Error = Error;

  #[inline]
  fn try_from(height: u8) -> Result<Self, Self::Error> {
    Self::try_new(height as usize)
  }
}

impl From<Height> for usize {
  #[inline]
  fn from(height: Height) -> Self {
    height.to_usize()
  }
}

impl From<Height> for u8 {
  #[inline]
  fn from(height: Height) -> Self {
    height.0
  }
}

impl PartialEq<usize> for Height {
  #[inline]
  fn eq(&self, other: &usize) -> bool {
    self.to_usize().eq(other)
  }
}

impl PartialOrd<usize> for Height {
  #[inline]
  fn partial_cmp(&self, other: &usize) -> Option<core::cmp::Ordering> {
    self.to_usize().partial_cmp(other)
  }
}

impl fmt::Display for Height {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
