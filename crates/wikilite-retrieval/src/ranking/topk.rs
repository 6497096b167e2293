//! Bounded top-k selection by ascending distance.
//!
//! Two admission policies:
//! - [`SelectionPolicy::Exact`]: max-heap keyed on (distance, arrival). A new
//!   entry evicts the worst retained one only if strictly closer, so the
//!   earliest arrival wins ties.
//! - [`SelectionPolicy::ReplaceFirstWorse`]: append while there is room, then
//!   replace the first retained entry (in retention order) whose distance is
//!   strictly greater. Not a true top-k.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wikilite_core::config::SelectionPolicy;

/// Upper bound on up-front allocation; storage grows on demand past it.
const PREALLOCATE_MAX: usize = 1024;

/// A retained entry. Ordered by distance, then arrival.
#[derive(Debug)]
struct Ranked<T> {
    distance: f64,
    seq: u64,
    item: T,
}

impl<T> Ranked<T> {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

enum Retained<T> {
    Heap(BinaryHeap<Ranked<T>>),
    List(Vec<Ranked<T>>),
}

/// Keeps at most `capacity` items with the smallest distances.
pub struct BoundedSelector<T> {
    capacity: usize,
    next_seq: u64,
    retained: Retained<T>,
}

impl<T> BoundedSelector<T> {
    pub fn new(capacity: usize, policy: SelectionPolicy) -> Self {
        let initial = capacity.min(PREALLOCATE_MAX);
        let retained = match policy {
            SelectionPolicy::Exact => Retained::Heap(BinaryHeap::with_capacity(initial)),
            SelectionPolicy::ReplaceFirstWorse => Retained::List(Vec::with_capacity(initial)),
        };
        Self {
            capacity,
            next_seq: 0,
            retained,
        }
    }

    /// Offer an item. Returns whether it was retained.
    pub fn push(&mut self, distance: f64, item: T) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let entry = Ranked {
            distance,
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;

        match &mut self.retained {
            Retained::Heap(heap) => {
                if heap.len() < self.capacity {
                    heap.push(entry);
                    return true;
                }
                match heap.peek() {
                    // Later arrival, so equal distance is never admitted.
                    Some(worst) if entry.distance < worst.distance => {
                        heap.pop();
                        heap.push(entry);
                        true
                    }
                    _ => false,
                }
            }
            Retained::List(list) => {
                if list.len() < self.capacity {
                    list.push(entry);
                    return true;
                }
                match list.iter().position(|r| r.distance > entry.distance) {
                    Some(i) => {
                        list[i] = entry;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match &self.retained {
            Retained::Heap(heap) => heap.len(),
            Retained::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Survivors ascending by distance, ties by arrival.
    pub fn into_sorted(self) -> Vec<(f64, T)> {
        let mut entries = match self.retained {
            Retained::Heap(heap) => heap.into_vec(),
            Retained::List(list) => list,
        };
        entries.sort_unstable();
        entries.into_iter().map(|r| (r.distance, r.item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(selector: BoundedSelector<&'static str>) -> Vec<(f64, &'static str)> {
        selector.into_sorted()
    }

    #[test]
    fn exact_keeps_true_top_k() {
        let mut s = BoundedSelector::new(2, SelectionPolicy::Exact);
        for (d, name) in [(5.0, "e"), (1.0, "a"), (4.0, "d"), (2.0, "b"), (3.0, "c")] {
            s.push(d, name);
        }
        assert_eq!(drain(s), vec![(1.0, "a"), (2.0, "b")]);
    }

    #[test]
    fn exact_earliest_arrival_wins_ties() {
        let mut s = BoundedSelector::new(2, SelectionPolicy::Exact);
        assert!(s.push(1.0, "first"));
        assert!(s.push(1.0, "second"));
        assert!(!s.push(1.0, "third"));
        assert_eq!(drain(s), vec![(1.0, "first"), (1.0, "second")]);
    }

    #[test]
    fn replace_first_worse_is_approximate() {
        // Retained [5, 9]; 3 replaces 5 (the first worse), leaving 9 behind
        // even though a true top-2 of {5, 9, 3} is {3, 5}.
        let mut s = BoundedSelector::new(2, SelectionPolicy::ReplaceFirstWorse);
        s.push(5.0, "five");
        s.push(9.0, "nine");
        assert!(s.push(3.0, "three"));
        assert_eq!(drain(s), vec![(3.0, "three"), (9.0, "nine")]);
    }

    #[test]
    fn replace_first_worse_rejects_equal_distance() {
        let mut s = BoundedSelector::new(1, SelectionPolicy::ReplaceFirstWorse);
        s.push(2.0, "kept");
        assert!(!s.push(2.0, "dropped"));
        assert_eq!(drain(s), vec![(2.0, "kept")]);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        for policy in [SelectionPolicy::Exact, SelectionPolicy::ReplaceFirstWorse] {
            let mut s = BoundedSelector::new(0, policy);
            assert!(!s.push(0.0, "x"));
            assert!(s.is_empty());
        }
    }

    #[test]
    fn unbounded_capacity_does_not_preallocate() {
        for policy in [SelectionPolicy::Exact, SelectionPolicy::ReplaceFirstWorse] {
            let mut s = BoundedSelector::new(usize::MAX, policy);
            s.push(2.0, "b");
            s.push(1.0, "a");
            assert_eq!(drain(s), vec![(1.0, "a"), (2.0, "b")]);
        }
    }

    #[test]
    fn under_capacity_keeps_everything_sorted() {
        let mut s = BoundedSelector::new(10, SelectionPolicy::ReplaceFirstWorse);
        s.push(3.0, "c");
        s.push(1.0, "a");
        s.push(2.0, "b");
        assert_eq!(s.len(), 3);
        assert_eq!(drain(s), vec![(1.0, "a"), (2.0, "b"), (3.0, "c")]);
    }
}
