//! Minimum spanning tree construction over the palette's complete RGB graph.
//!
//! Every pair of distinct colors is implicitly connected by an edge weighted
//! with the Euclidean distance between their channel vectors. [`SpanningTree`]
//! runs Prim's algorithm over this complete graph, scanning every unfinalized
//! node when a node is finalized rather than materializing an adjacency
//! structure (which would need quadratic memory to describe a complete graph
//! anyway). The frontier is a [`MinHeap`] with lazy deletion of stale entries.

mod heap;

pub use heap::MinHeap;

use crate::PaletteBuf;
use palette::Srgb;

/// Euclidean distance between two colors' channel vectors, in double
/// precision.
#[inline]
pub(crate) fn color_distance(a: Srgb<u8>, b: Srgb<u8>) -> f64 {
    let dr = f64::from(a.red) - f64::from(b.red);
    let dg = f64::from(a.green) - f64::from(b.green);
    let db = f64::from(a.blue) - f64::from(b.blue);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// A spanning tree edge connecting a node to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    /// The Euclidean RGB distance between the two endpoint colors.
    pub weight: f64,
    /// The child endpoint's node id.
    pub node: u32,
    /// The parent endpoint's node id.
    pub parent: u32,
}

/// A minimum spanning tree over the complete graph of a color palette.
///
/// Holds one [`TreeEdge`] per non-root node, sorted ascending by weight, plus
/// the total tree weight. Node ids are palette indices; node 0 is the root
/// and has no parent edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// The number of nodes the tree spans.
    node_count: u32,
    /// The tree edges sorted ascending by weight; exactly `node_count - 1`
    /// entries.
    edges: Vec<TreeEdge>,
    /// The sum of all edge weights.
    cost: f64,
}

impl SpanningTree {
    /// Build the minimum spanning tree of the complete graph over `palette`.
    ///
    /// This is the quadratic-scan variant of Prim's algorithm: starting from
    /// node 0 with tentative weight 0, the minimum-weight frontier entry is
    /// popped; entries for already finalized nodes are stale and discarded.
    /// When a node is finalized, every remaining node whose distance to it
    /// beats its current best connection is updated and re-pushed.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn of_palette(palette: &PaletteBuf<Srgb<u8>>) -> Self {
        let n = palette.len();
        let mut heap = MinHeap::new();
        let mut finalized = vec![false; n];
        let mut best = vec![f64::INFINITY; n];
        let mut parent = vec![0u32; n];

        best[0] = 0.0;
        heap.push(0.0, 0);
        while let Some((_, node)) = heap.pop() {
            if finalized[node as usize] {
                continue;
            }
            finalized[node as usize] = true;
            let color = palette[node];
            for (other, other_best) in best.iter_mut().enumerate() {
                if finalized[other] {
                    continue;
                }
                let weight = color_distance(color, palette[other]);
                if weight < *other_best {
                    *other_best = weight;
                    parent[other] = node;
                    heap.push(weight, other as u32);
                }
            }
        }

        let mut edges: Vec<TreeEdge> = (1..n)
            .map(|node| TreeEdge {
                weight: best[node],
                node: node as u32,
                parent: parent[node],
            })
            .collect();
        edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
        let cost = edges.iter().map(|edge| edge.weight).sum();

        Self {
            node_count: n as u32,
            edges,
            cost,
        }
    }

    /// Returns the number of nodes the tree spans.
    #[inline]
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Returns the tree edges sorted ascending by weight.
    #[inline]
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Returns the total weight of the tree.
    ///
    /// This is the "MST cost" metric reported alongside the quantized image.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    /// Independent MST cost via Kruskal's algorithm with a small union-find.
    fn kruskal_cost(colors: &[palette::Srgb<u8>]) -> f64 {
        let n = colors.len();
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((color_distance(colors[u], colors[v]), u, v));
            }
        }
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut root: Vec<usize> = (0..n).collect();
        fn find(root: &mut [usize], mut x: usize) -> usize {
            while root[x] != x {
                root[x] = root[root[x]];
                x = root[x];
            }
            x
        }

        let mut cost = 0.0;
        for (weight, u, v) in edges {
            let (ru, rv) = (find(&mut root, u), find(&mut root, v));
            if ru != rv {
                root[ru] = rv;
                cost += weight;
            }
        }
        cost
    }

    #[test]
    fn singleton_palette_has_empty_tree() {
        let palette = palette_of(&[(42, 42, 42)]);
        let tree = SpanningTree::of_palette(&palette);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edges(), &[]);
        assert_eq!(tree.cost(), 0.0);
    }

    #[test]
    fn two_colors_connect_by_their_distance() {
        let palette = palette_of(&[(0, 0, 0), (3, 4, 0)]);
        let tree = SpanningTree::of_palette(&palette);
        assert_eq!(tree.edges().len(), 1);
        assert_eq!(tree.edges()[0].weight, 5.0);
        assert_eq!(tree.cost(), 5.0);
    }

    #[test]
    fn edges_are_sorted_ascending() {
        let palette = palette_of(&[(0, 0, 0), (200, 200, 200), (10, 10, 10), (90, 90, 90)]);
        let tree = SpanningTree::of_palette(&palette);
        let weights: Vec<f64> = tree.edges().iter().map(|e| e.weight).collect();
        let mut sorted = weights.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(weights, sorted);
        assert_eq!(tree.edges().len(), 3);
    }

    #[test]
    fn cost_matches_kruskal_on_small_palettes() {
        let cases: &[&[(u8, u8, u8)]] = &[
            &[(0, 0, 0), (255, 255, 255)],
            &[(10, 10, 10), (20, 20, 20), (200, 200, 200)],
            &[(0, 0, 0), (1, 2, 3), (50, 60, 70), (255, 0, 0), (0, 255, 0)],
            &[
                (13, 200, 7),
                (240, 3, 77),
                (12, 12, 12),
                (100, 150, 200),
                (99, 1, 255),
                (0, 0, 0),
                (77, 77, 78),
                (128, 128, 128),
                (254, 254, 254),
                (33, 66, 99),
            ],
        ];
        for colors in cases {
            let palette = palette_of(colors);
            let tree = SpanningTree::of_palette(&palette);
            let expected = kruskal_cost(palette.as_slice());
            assert!(
                (tree.cost() - expected).abs() < 1e-9,
                "prim cost {} != kruskal cost {expected}",
                tree.cost()
            );
        }
    }

    #[test]
    fn tree_has_one_edge_per_non_root_node() {
        let palette = palette_of(&[(1, 1, 1), (2, 2, 2), (3, 3, 3), (4, 4, 4), (5, 5, 5)]);
        let tree = SpanningTree::of_palette(&palette);
        assert_eq!(tree.edges().len(), palette.len() - 1);

        let mut nodes: Vec<u32> = tree.edges().iter().map(|e| e.node).collect();
        nodes.sort_unstable();
        assert_eq!(nodes, vec![1, 2, 3, 4]);
        for edge in tree.edges() {
            assert!(edge.weight >= 0.0);
            assert!(edge.parent < palette.num_colors());
            assert_ne!(edge.parent, edge.node);
        }
    }
}
