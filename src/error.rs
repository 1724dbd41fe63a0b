/// Error type for the [`SkipSet`](crate::SkipSet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
  /// Indicates that the end position of a [`SkipSet`](crate::SkipSet) was dereferenced.
  /// The end position is one past the last element and never holds a value.
  PastTheEnd,

  /// Indicates that a height is not in range `1..=MAX_HEIGHT`.
  InvalidHeight(usize),

  /// Indicates that the probability for growing a tower is not in range `(0, 1)`.
  InvalidProbability(f64),
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::PastTheEnd => write!(f, "cannot dereference the end position of the skipset"),
      Self::InvalidHeight(height) => write!(
        f,
        "height {height} is out of range, expected 1..={}",
        crate::MAX_HEIGHT
      ),
      Self::InvalidProbability(p) => {
        write!(f, "probability {p} is out of range, expected (0, 1)")
      }
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
