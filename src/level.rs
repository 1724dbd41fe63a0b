use rand::{RngCore, SeedableRng};

use super::{Error, Height, Options, DEFAULT_PROBABILITY, MAX_HEIGHT};

/// Precompute the skiplist probabilities so that only a single random number
/// needs to be generated per tower. `probabilities[h]` is the threshold a draw
/// must not exceed for a tower to grow past height `h`, i.e. `u32::MAX * p^h`.
const fn probabilities(p: f64) -> [u32; MAX_HEIGHT] {
  let mut probabilities = [0; MAX_HEIGHT];
  let mut acc = 1f64;

  let mut i = 0;
  while i < MAX_HEIGHT {
    probabilities[i] = ((u32::MAX as f64) * acc) as u32;
    acc *= p;
    i += 1;
  }

  probabilities
}

const DEFAULT_PROBABILITIES: [u32; MAX_HEIGHT] = probabilities(DEFAULT_PROBABILITY);

/// Picks the tower height of every new node.
///
/// Heights follow a geometric distribution: a tower reaches height `h + 1`
/// with probability `p^h`, capped at the configured max height.
#[derive(Debug, Clone)]
pub(crate) struct Leveler<R> {
  probabilities: [u32; MAX_HEIGHT],
  max_height: Height,
  rng: R,
}

impl<R> Leveler<R> {
  /// Creates a leveler with the default probability and max height.
  #[inline]
  pub(crate) const fn new(rng: R) -> Self {
    Self {
      probabilities: DEFAULT_PROBABILITIES,
      max_height: Height::new(),
      rng,
    }
  }

  pub(crate) fn with_options(opts: &Options, rng: R) -> Result<Self, Error> {
    opts.validate()?;

    let p = opts.probability();
    let probabilities = if p == DEFAULT_PROBABILITY {
      DEFAULT_PROBABILITIES
    } else {
      probabilities(p)
    };

    Ok(Self {
      probabilities,
      max_height: opts.max_height(),
      rng,
    })
  }
}

impl<R: RngCore> Leveler<R> {
  pub(crate) fn random_height(&mut self) -> Height {
    let rnd = self.rng.next_u32();
    let max = self.max_height.to_usize();
    let mut h = 1;

    while h < max && rnd <= self.probabilities[h] {
      h += 1;
    }
    Height::from_usize_unchecked(h)
  }
}

/// Builds the random source described by the options: seeded when a seed is
/// configured, seeded by the operating system otherwise.
pub(crate) fn seeded_rng<R: SeedableRng>(opts: &Options) -> R {
  match opts.seed() {
    Some(seed) => R::seed_from_u64(seed),
    None => R::from_os_rng(),
  }
}
