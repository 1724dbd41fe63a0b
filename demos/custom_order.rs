use std::cmp::Ordering;

use skipset::{Descend, Options, SkipSet};

#[derive(Debug, Clone)]
struct Task {
  priority: u8,
  name: &'static str,
}

fn by_priority(a: &Task, b: &Task) -> Ordering {
  b.priority.cmp(&a.priority).then_with(|| a.name.cmp(b.name))
}

fn main() {
  println!("=== descending ===");
  let mut scores = SkipSet::with_comparator(Descend);
  scores.extend([72, 95, 88, 61, 95]);
  println!("scores: {scores:?}");
  println!("best: {:?}", scores.first());
  println!("first below 90: {:?}", scores.upper_bound(&90).get().ok());

  println!("\n=== comparator function ===");
  let mut tasks =
    SkipSet::with_options_and_comparator(Options::new().with_seed(Some(1)), by_priority)
      .expect("default probability is valid");
  tasks.insert(Task { priority: 1, name: "write docs" });
  tasks.insert(Task { priority: 3, name: "fix crash" });
  tasks.insert(Task { priority: 2, name: "review" });
  tasks.insert(Task { priority: 3, name: "deploy" });

  for task in &tasks {
    println!("[{}] {}", task.priority, task.name);
  }

  println!("\n=== closure ===");
  let mut words = SkipSet::with_comparator(|a: &String, b: &String| {
    a.to_lowercase().cmp(&b.to_lowercase())
  });
  for w in ["Rust", "arena", "rust", "Skip", "list"] {
    let (_, inserted) = words.insert(w.to_string());
    if !inserted {
      println!("skipped {w:?}, already present");
    }
  }
  println!("words: {words:?}");
}
