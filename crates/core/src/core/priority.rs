//! Priority queue for BPE merge candidates.
//!
//! Used by the incremental training strategy, where pair counts change a few
//! at a time and re-sorting the full table every iteration is wasteful.

use super::pairs::Pair;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of tokens to merge
    pub pair: Pair,
    /// The frequency of this pair
    pub count: u64,
}

impl MergeCandidate {
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }

    /// Selection order shared by every strategy: higher count wins, equal
    /// counts go to the smaller pair.
    #[inline]
    pub fn rank(count: u64, pair: &Pair, other_count: u64, other_pair: &Pair) -> Ordering {
        count.cmp(&other_count).then_with(|| other_pair.cmp(pair))
    }
}

// Max-heap order: the greatest candidate is the next merge.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::rank(self.count, &self.pair, other.count, &other.pair)
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge operations.
///
/// Uses an 8-ary heap for better cache locality than a binary heap. Counts
/// are never edited inside the heap; a newer push makes older entries for
/// the same pair stale, and stale entries are discarded on pop.
pub struct PairPriorityQueue {
    /// The heap storing merge candidates
    heap: OctonaryHeap<MergeCandidate>,
    /// Live count per pair, used to detect stale entries
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.current_counts.insert(candidate.pair.clone(), candidate.count);
        self.heap.push(candidate);
    }

    /// Record a new count for a pair. A zero count retires the pair.
    pub fn update(&mut self, pair: Pair, new_count: u64) {
        if new_count == 0 {
            self.current_counts.remove(&pair);
        } else {
            self.push(MergeCandidate::new(pair, new_count));
        }
    }

    /// Pop the highest priority live candidate.
    ///
    /// Returns None once only stale entries remain.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if self.current_counts.get(&candidate.pair) == Some(&candidate.count) {
                self.current_counts.remove(&candidate.pair);
                return Some(candidate);
            }
        }
        None
    }

    /// Peek at the highest priority live candidate, dropping stale entries
    /// from the top of the heap.
    pub fn peek(&mut self) -> Option<&MergeCandidate> {
        while let Some(top) = self.heap.peek() {
            if self.current_counts.get(&top.pair) == Some(&top.count) {
                break;
            }
            self.heap.pop();
        }
        self.heap.peek()
    }

    /// Number of heap entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current_counts.is_empty()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}
