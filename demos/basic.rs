use std::time::Instant;

use skipset::SkipSet;

fn show<T: std::fmt::Display>(pos: skipset::Cursor<'_, T>) -> String {
  match pos.get() {
    Ok(v) => v.to_string(),
    Err(_) => "end".to_string(),
  }
}

fn basic_operations() {
  println!("=== basic operations ===");

  let mut set = SkipSet::new();
  for v in [10, 20, 5, 15, 25] {
    set.insert(v);
  }

  println!("len: {}", set.len());
  println!("elements: {set:?}");

  if let Ok(v) = set.find(&15).get() {
    println!("found: {v}");
  }

  println!("lower_bound(12): {}", show(set.lower_bound(&12)));
  println!("upper_bound(12): {}", show(set.upper_bound(&12)));
  println!("upper_bound(25): {}", show(set.upper_bound(&25)));
}

fn strings() {
  println!("\n=== strings ===");

  let mut set = SkipSet::<String>::new();
  for fruit in ["pear", "banana", "orange", "apple"] {
    set.emplace(fruit);
  }

  let sorted: Vec<&str> = set.iter().map(String::as_str).collect();
  println!("in alphabetical order: {}", sorted.join(" "));
}

fn cursors() {
  println!("\n=== cursors ===");

  let set: SkipSet<i32> = (1..=10).collect();

  let mut forward = Vec::new();
  let mut cur = set.begin();
  while let Ok(v) = cur.get() {
    forward.push(*v);
    cur.advance();
  }
  println!("forward: {forward:?}");

  // Only forward traversal is supported, go through a Vec to reverse.
  let mut backward: Vec<i32> = set.iter().copied().collect();
  backward.reverse();
  println!("backward: {backward:?}");

  let between: Vec<i32> = set.range(3..=6).copied().collect();
  println!("range(3..=6): {between:?}");
}

fn performance() {
  println!("\n=== performance ===");

  const N: i32 = 10_000;
  let mut set = SkipSet::new();

  let start = Instant::now();
  for i in 0..N {
    set.insert(i);
  }
  println!("inserted {N} elements in {:?}", start.elapsed());

  let start = Instant::now();
  let found = (0..N).step_by(100).filter(|i| set.contains(i)).count();
  println!("looked up {found} elements in {:?}", start.elapsed());
  println!("height: {}", set.height());
}

fn main() {
  basic_operations();
  strings();
  cursors();
  performance();
}
