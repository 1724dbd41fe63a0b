use super::*;
use crate::Descend;
use rand::seq::SliceRandom;
use std::{format, string::String, vec::Vec};

const N: usize = 1000;

fn seeded<T: Ord>(seed: u64) -> SkipSet<T> {
  SkipSet::with_options(Options::new().with_seed(Some(seed))).unwrap()
}

fn collect<T: Clone, C, R>(set: &SkipSet<T, C, R>) -> Vec<T> {
  set.iter().cloned().collect()
}

fn empty_in<C: Comparator<u64>, R>(l: SkipSet<u64, C, R>) {
  assert!(l.is_empty());
  assert_eq!(l.len(), 0);
  assert_eq!(l.height(), 1);
  assert!(l.first().is_none());
  assert!(l.last().is_none());
  assert!(l.get(&1).is_none());
  assert!(!l.contains(&1));
  assert_eq!(l.count(&1), 0);
  assert!(l.find(&1).is_end());
  assert!(l.lower_bound(&1).is_end());
  assert!(l.upper_bound(&1).is_end());
  assert_eq!(l.begin(), l.end());
  assert_eq!(l.end().get(), Err(Error::PastTheEnd));
  assert_eq!(l.iter().next(), None);
  assert_eq!(l.range(..).next(), None);
  l.check_invariants();
}

#[test]
fn test_empty() {
  empty_in(SkipSet::<u64>::new());
  empty_in(SkipSet::<u64, _>::with_comparator(Descend));
  empty_in(seeded::<u64>(0));
  empty_in(SkipSet::<u64>::default());
}

#[test]
fn test_basic() {
  let mut l = seeded(1);
  for v in [10, 20, 5, 15, 25] {
    let (pos, inserted) = l.insert(v);
    assert!(inserted);
    assert_eq!(pos.get(), Ok(&v));
  }

  assert_eq!(l.len(), 5);
  assert_eq!(collect(&l), [5, 10, 15, 20, 25]);
  assert_eq!(l.find(&15).get(), Ok(&15));
  assert!(l.find(&99).is_end());
  assert_eq!(l.first(), Some(&5));
  assert_eq!(l.last(), Some(&25));
  l.check_invariants();
}

#[test]
fn test_insert_duplicate_keeps_existing() {
  // Elements compare by id only, so the label tells which one was kept.
  #[derive(Debug, Clone)]
  struct Item {
    id: u32,
    label: &'static str,
  }

  let mut l = SkipSet::with_options_and_comparator(
    Options::new().with_seed(Some(2)),
    |a: &Item, b: &Item| a.id.cmp(&b.id),
  )
  .unwrap();

  assert!(l.insert(Item { id: 1, label: "first" }).1);
  let (pos, inserted) = l.insert(Item {
    id: 1,
    label: "second",
  });
  assert!(!inserted);
  assert_eq!(pos.get().unwrap().label, "first");
  assert_eq!(l.len(), 1);
  l.check_invariants();
}

#[test]
fn test_insert_position_is_new_node() {
  let mut l = seeded(3);
  l.extend([1, 3, 5]);

  let (pos, inserted) = l.insert(4);
  assert!(inserted);
  let mut pos = pos;
  assert_eq!(pos.get(), Ok(&4));
  pos.advance();
  assert_eq!(pos.get(), Ok(&5));
  pos.advance();
  assert!(pos.is_end());
}

#[test]
fn test_basic_large_testcases() {
  let mut l = seeded(4);
  let mut values: Vec<u64> = (0..N as u64).collect();
  values.shuffle(&mut SmallRng::seed_from_u64(4));

  for v in values.iter().copied() {
    assert!(l.insert(v).1);
  }
  l.check_invariants();

  for v in 0..N as u64 {
    assert_eq!(l.get(&v), Some(&v));
    assert_eq!(l.find(&v).get(), Ok(&v));
  }
  assert!(l.find(&(N as u64)).is_end());

  assert_eq!(N, l.len());
  assert_eq!(collect(&l), (0..N as u64).collect::<Vec<_>>());
  assert!(l.height() > 1);
}

#[test]
fn test_random_inserts_with_duplicates() {
  for (seed, p, max) in [(5, 0.25, 32), (6, 0.5, 8), (7, 0.9, 4), (8, 0.01, 1)] {
    let opts = Options::new()
      .with_seed(Some(seed))
      .with_probability(p)
      .with_max_height(Height::try_new(max).unwrap());
    let mut l = SkipSet::<u32>::with_options(opts).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut expected = std::collections::BTreeSet::new();

    for _ in 0..N {
      let v = rng.next_u32() % 300;
      let (pos, inserted) = l.insert(v);
      assert_eq!(pos.get(), Ok(&v));
      assert_eq!(inserted, expected.insert(v));
    }

    l.check_invariants();
    assert_eq!(l.len(), expected.len());
    assert!(l.height() <= max);
    assert!(l.iter().eq(expected.iter()));
    assert!(l.tower_heights().iter().all(|h| *h <= max));
  }
}

#[test]
fn test_bounds() {
  let l = SkipSet::from([1, 3, 5, 7, 9]);

  assert_eq!(l.lower_bound(&2).get(), Ok(&3));
  assert_eq!(l.lower_bound(&5).get(), Ok(&5));
  assert_eq!(l.lower_bound(&0).get(), Ok(&1));
  assert!(l.lower_bound(&10).is_end());

  assert_eq!(l.upper_bound(&2).get(), Ok(&3));
  assert_eq!(l.upper_bound(&5).get(), Ok(&7));
  assert_eq!(l.upper_bound(&0).get(), Ok(&1));
  assert!(l.upper_bound(&9).is_end());

  let (lo, hi) = l.equal_range(&5);
  assert_eq!(lo.get(), Ok(&5));
  assert_eq!(hi.get(), Ok(&7));

  let (lo, hi) = l.equal_range(&6);
  assert_eq!(lo, hi);
  assert_eq!(lo.get(), Ok(&7));

  let (lo, hi) = l.equal_range(&10);
  assert!(lo.is_end() && hi.is_end());
}

#[test]
fn test_bounds_match_btree() {
  let mut l = seeded(9);
  let mut rng = SmallRng::seed_from_u64(9);
  let mut expected = std::collections::BTreeSet::new();
  for _ in 0..500 {
    let v = (rng.next_u32() % 2000) as i64;
    l.insert(v);
    expected.insert(v);
  }

  for key in -5..2005i64 {
    let lower = expected.range(key..).next();
    let upper = expected
      .range((Bound::Excluded(key), Bound::Unbounded))
      .next();
    assert_eq!(l.lower_bound(&key).get().ok(), lower, "lower_bound({key})");
    assert_eq!(l.upper_bound(&key).get().ok(), upper, "upper_bound({key})");
    assert_eq!(l.contains(&key), expected.contains(&key));
  }
}

#[test]
fn test_range() {
  let l = SkipSet::from([1, 3, 5, 7, 9]);

  fn r(range: Range<'_, i32>) -> Vec<i32> {
    range.copied().collect()
  }

  assert_eq!(r(l.range(..)), [1, 3, 5, 7, 9]);
  assert_eq!(r(l.range(3..)), [3, 5, 7, 9]);
  assert_eq!(r(l.range(4..)), [5, 7, 9]);
  assert_eq!(r(l.range(..7)), [1, 3, 5]);
  assert_eq!(r(l.range(..=7)), [1, 3, 5, 7]);
  assert_eq!(r(l.range(3..7)), [3, 5]);
  assert_eq!(r(l.range(3..=7)), [3, 5, 7]);
  assert_eq!(r(l.range(2..3)), Vec::<i32>::new());
  assert_eq!(r(l.range(5..5)), Vec::<i32>::new());
  assert_eq!(r(l.range(5..=5)), [5]);
  assert_eq!(r(l.range(10..)), Vec::<i32>::new());
  assert_eq!(
    r(l.range((Bound::Included(9), Bound::Excluded(1)))),
    Vec::<i32>::new()
  );
  assert_eq!(
    r(l.range((Bound::Excluded(3), Bound::Excluded(9)))),
    [5, 7]
  );
  assert_eq!(
    r(l.range((Bound::Excluded(3), Bound::Included(9)))),
    [5, 7, 9]
  );

  let range = l.range(3..7);
  assert_eq!(range.cursor().get(), Ok(&3));
  assert_eq!(range.end().get(), Ok(&7));
}

#[test]
fn test_custom_comparator() {
  let mut l = SkipSet::with_options_and_comparator(Options::new().with_seed(Some(10)), Descend)
    .unwrap();
  l.extend([1, 2, 3]);
  assert_eq!(collect(&l), [3, 2, 1]);
  assert_eq!(l.lower_bound(&2).get(), Ok(&2));
  assert_eq!(l.upper_bound(&2).get(), Ok(&1));
  assert_eq!(l.first(), Some(&3));
  assert_eq!(l.last(), Some(&1));
  l.check_invariants();

  let mut l = SkipSet::with_comparator(|a: &String, b: &String| {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
  });
  for s in ["pear", "fig", "banana", "kiwi"] {
    l.insert(String::from(s));
  }
  assert_eq!(collect(&l), ["fig", "kiwi", "pear", "banana"]);
}

#[test]
fn test_clear() {
  let mut l = seeded(11);
  l.extend(0..100u32);
  assert_eq!(l.len(), 100);

  l.clear();
  empty_in_u32(&l);

  l.extend([3, 1, 2]);
  assert_eq!(collect(&l), [1, 2, 3]);
  l.check_invariants();
}

fn empty_in_u32(l: &SkipSet<u32>) {
  assert!(l.is_empty());
  assert_eq!(l.height(), 1);
  assert!(l.first().is_none());
  assert!(l.begin().is_end());
  l.check_invariants();
}

#[test]
fn test_clone_is_independent() {
  let mut a = seeded(12);
  a.extend(0..50u32);

  let b = a.clone();
  assert_eq!(a, b);
  b.check_invariants();

  a.insert(1000);
  a.insert(1001);
  assert_eq!(a.len(), 52);
  assert_eq!(b.len(), 50);
  assert!(!b.contains(&1000));
  assert_eq!(collect(&b), (0..50).collect::<Vec<_>>());
}

#[test]
fn test_same_seed_same_towers() {
  let mut a = seeded(13);
  let mut b = seeded(13);
  for i in 0..200u32 {
    a.insert(i.wrapping_mul(7919) % 1000);
    b.insert(i.wrapping_mul(7919) % 1000);
  }
  assert_eq!(a.tower_heights(), b.tower_heights());
  assert_eq!(a.height(), b.height());
}

#[test]
fn test_clear_and_clone_keep_drawing() {
  // `cont` draws the heights a set with seed 14 hands out to its second batch of towers.
  let mut cont = seeded(14);
  cont.extend(0..200u32);
  cont.extend(1000..1200u32);
  let second_batch = cont.tower_heights()[200..].to_vec();

  let mut fresh = seeded(14);
  fresh.extend(0..200u32);
  let first_batch = fresh.tower_heights();
  assert_ne!(first_batch, second_batch);

  let mut a = seeded(14);
  let mut b = seeded(14);
  a.extend(0..200u32);
  b.extend(0..200u32);
  assert_eq!(a.tower_heights(), b.tower_heights());

  // Clearing keeps the random source going instead of replaying the seed.
  a.clear();
  a.extend(0..200u32);
  b.extend(0..200u32);
  a.check_invariants();
  assert_eq!(collect(&a), collect(&b));
  assert_eq!(b.tower_heights(), first_batch);
  assert_eq!(a.tower_heights(), second_batch);
  assert_ne!(a.tower_heights(), first_batch);

  // A clone re-inserts its elements and draws new heights from the copied random state.
  let c = b.clone();
  c.check_invariants();
  assert_eq!(c, b);
  assert_eq!(c.tower_heights(), second_batch);
  assert_ne!(c.tower_heights(), b.tower_heights());
}

#[test]
fn test_swap_and_take() {
  let mut a = SkipSet::from([1, 2, 3]);
  let mut b = SkipSet::from([4, 5]);

  a.swap(&mut b);
  assert_eq!(collect(&a), [4, 5]);
  assert_eq!(collect(&b), [1, 2, 3]);

  let moved = core::mem::take(&mut b);
  assert_eq!(moved.len(), 3);
  assert!(b.is_empty());
  b.check_invariants();
  moved.check_invariants();
}

#[test]
fn test_comparison() {
  let a = SkipSet::from([1, 2, 3]);
  let b = SkipSet::from([1, 2, 3]);
  let c = SkipSet::from([1, 2, 4]);
  let d = SkipSet::from([1, 2]);

  assert_eq!(a, b);
  assert_ne!(a, c);
  assert_ne!(a, d);
  assert!(a < c);
  assert!(!(a < b));
  assert!(d < a);
  assert!(c > a);
  assert_eq!(a.cmp(&b), cmp::Ordering::Equal);
  assert!(SkipSet::<i32>::new() < d);
}

#[test]
fn test_into_iter() {
  let mut l = seeded(14);
  let mut values: Vec<u32> = (0..300).collect();
  values.shuffle(&mut SmallRng::seed_from_u64(14));
  l.extend(values);

  let owned = l.into_iter();
  assert_eq!(owned.len(), 300);
  assert_eq!(owned.collect::<Vec<_>>(), (0..300).collect::<Vec<_>>());
}

#[test]
fn test_iter_size_hint() {
  let l = SkipSet::from([1, 2, 3]);
  let mut it = l.iter();
  assert_eq!(it.len(), 3);
  assert_eq!(it.size_hint(), (3, Some(3)));
  it.next();
  assert_eq!(it.len(), 2);
  assert_eq!(it.cursor().get(), Ok(&2));
  it.next();
  it.next();
  assert_eq!(it.len(), 0);
  assert_eq!(it.next(), None);
  assert_eq!(it.len(), 0);

  assert_eq!(SkipSet::<u8>::new().iter().len(), 0);

  let from_cursor: Vec<_> = l.find(&2).into_iter().copied().collect();
  assert_eq!(from_cursor, [2, 3]);
  assert_eq!(l.end().into_iter().next(), None);
}

#[test]
fn test_debug() {
  let l = SkipSet::from([2, 1]);
  assert_eq!(format!("{l:?}"), "{1, 2}");
  assert_eq!(format!("{:?}", l.find(&1)), "Cursor(1)");
  assert_eq!(format!("{:?}", l.end()), "Cursor(end)");
  assert_eq!(format!("{:?}", l.iter()), "[1, 2]");
}

#[test]
fn test_cursor_across_sets() {
  let a = SkipSet::<u8>::new();
  let b = SkipSet::<u8>::new();
  assert_eq!(a.end(), a.end());
  assert_ne!(a.end(), b.end());
}

#[test]
fn test_max_size() {
  let l = SkipSet::<u8>::new();
  assert!(l.max_size() > 0);
  assert_eq!(l.max_size(), (u32::MAX - 1) as usize);
  assert_eq!(l.max_height(), Height::MAX);
}
