use ordered_float::OrderedFloat;

/// A binary min-heap of `(weight, node)` pairs with no decrease-key operation.
///
/// Prim's algorithm pushes a node again each time a better connecting edge to
/// it is found, so the heap may hold several entries for the same node at
/// once. [`pop`](MinHeap::pop) always returns the entry with the globally
/// smallest weight, including entries that have since been superseded; the
/// caller is responsible for discarding a popped entry whose node it has
/// already finalized (lazy deletion). This is cheaper than maintaining a
/// decrease-key heap and the extra entries are bounded by the number of
/// relaxations.
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    /// The heap entries in array layout: the children of `i` are at
    /// `2i + 1` and `2i + 2`.
    entries: Vec<(OrderedFloat<f64>, u32)>,
}

impl MinHeap {
    /// Create an empty [`MinHeap`].
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Returns the number of entries currently held, counting superseded
    /// duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the heap holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push an entry, sifting it up until its parent is no larger.
    pub fn push(&mut self, weight: f64, node: u32) {
        self.entries.push((OrderedFloat(weight), node));
        let mut child = self.entries.len() - 1;
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.entries[child].0 < self.entries[parent].0 {
                self.entries.swap(child, parent);
                child = parent;
            } else {
                break;
            }
        }
    }

    /// Remove and return the entry with the smallest weight.
    ///
    /// The last entry replaces the root and is sifted down, swapping with its
    /// smaller child while that child is smaller than it. The right child is
    /// preferred only when it is strictly smaller than the left.
    pub fn pop(&mut self) -> Option<(f64, u32)> {
        if self.entries.is_empty() {
            return None;
        }
        let (weight, node) = self.entries.swap_remove(0);

        let mut parent = 0;
        loop {
            let left = 2 * parent + 1;
            let right = 2 * parent + 2;
            if left >= self.entries.len() {
                break;
            }
            let child = if right < self.entries.len() && self.entries[right].0 < self.entries[left].0
            {
                right
            } else {
                left
            };
            if self.entries[child].0 < self.entries[parent].0 {
                self.entries.swap(parent, child);
                parent = child;
            } else {
                break;
            }
        }

        Some((weight.0, node))
    }
}
