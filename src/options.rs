use super::{Error, Height, DEFAULT_PROBABILITY};

/// Options for [`SkipSet`](crate::SkipSet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
  max_height: Height,
  probability: f64,
  capacity: usize,
  seed: Option<u64>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_height: Height::new(),
      probability: DEFAULT_PROBABILITY,
      capacity: 0,
      seed: None,
    }
  }

  /// Set the maximum height of the skiplist.
  ///
  /// No tower will be taller than this height, and the head of the skiplist
  /// is allocated with exactly this many levels.
  ///
  /// The default max height is `32`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Options, Height};
  ///
  /// let options = Options::new().with_max_height(Height::try_new(12).unwrap());
  /// assert_eq!(options.max_height().to_usize(), 12);
  /// ```
  #[inline]
  pub const fn with_max_height(mut self, max_height: Height) -> Self {
    self.max_height = max_height;
    self
  }

  /// Set the probability that a tower grows by one more level.
  ///
  /// The probability must be in range `(0, 1)`, otherwise constructing a
  /// [`SkipSet`](crate::SkipSet) with these options fails with
  /// [`Error::InvalidProbability`].
  ///
  /// The default probability is `0.25`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::Options;
  ///
  /// let options = Options::new().with_probability(0.5);
  /// assert_eq!(options.probability(), 0.5);
  /// ```
  #[inline]
  pub const fn with_probability(mut self, probability: f64) -> Self {
    self.probability = probability;
    self
  }

  /// Set the number of elements the skiplist reserves room for up front.
  ///
  /// The default capacity is `0`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::Options;
  ///
  /// let options = Options::new().with_capacity(1024);
  /// assert_eq!(options.capacity(), 1024);
  /// ```
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Set the seed of the random source used to pick tower heights.
  ///
  /// With a seed, two skipsets fed the same insertions build identical towers.
  /// Without one, the random source is seeded by the operating system.
  ///
  /// The default seed is `None`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::Options;
  ///
  /// let options = Options::new().with_seed(Some(42));
  /// assert_eq!(options.seed(), Some(42));
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
    self.seed = seed;
    self
  }

  /// Returns the maximum height of the skiplist.
  #[inline]
  pub const fn max_height(&self) -> Height {
    self.max_height
  }

  /// Returns the probability that a tower grows by one more level.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.probability
  }

  /// Returns the number of elements the skiplist reserves room for.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the seed of the random source.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }

  /// Checks the options, returns the first invalid setting as an error.
  pub(crate) fn validate(&self) -> Result<(), Error> {
    let p = self.probability;
    // Written as a positive check so NaN is rejected too.
    if !(p > 0.0 && p < 1.0) {
      return Err(Error::InvalidProbability(p));
    }
    Ok(())
  }
}
