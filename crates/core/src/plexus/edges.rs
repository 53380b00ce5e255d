//! Per-frame edge rebuild
//!
//! An edge connects particles `i < j` whose distance is strictly below the
//! connection distance. Edges are written into a pre-sized `EdgeBuffer` in
//! index order (`i` ascending, then `j` ascending); once the buffer is full,
//! further pairs are counted as dropped rather than stored.
//!
//! The `EdgeBuilder` trait lets the pair search be swapped without changing
//! that contract: `BruteForceEdges` tests all pairs, `GridEdges` only tests
//! pairs in neighbouring spatial hash cells and sorts candidates so emission
//! order matches the brute-force scan exactly.

use crate::core_types::{SpatialIndex, Vec3};

use super::config::EdgeStrategy;

/// Pre-sized line segment buffer with an explicit valid-length counter
///
/// Storage is allocated once at `capacity`; each rebuild only rewrites the
/// prefix `[0, len)` that renderers should draw.
#[derive(Debug, Clone)]
pub struct EdgeBuffer {
    segments: Vec<[Vec3; 2]>,
    pairs: Vec<(u32, u32)>,
    len: usize,
    dropped: usize,
}

impl EdgeBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: vec![[Vec3::zeros(); 2]; capacity],
            pairs: vec![(0, 0); capacity],
            len: 0,
            dropped: 0,
        }
    }

    /// Maximum number of segments this buffer can hold
    #[inline]
    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    /// Number of valid segments from the last rebuild
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Qualifying pairs that did not fit during the last rebuild
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether the last rebuild found more pairs than fit
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }

    /// Valid segments, each as its two endpoint positions
    #[inline]
    pub fn segments(&self) -> &[[Vec3; 2]] {
        &self.segments[..self.len]
    }

    /// Valid `(i, j)` particle index pairs, aligned with `segments()`
    #[inline]
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs[..self.len]
    }

    /// Forget the previous frame's edges without touching the storage
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.dropped = 0;
    }

    /// Append one segment, or count it as dropped when full
    #[inline]
    pub fn push(&mut self, i: u32, j: u32, a: &Vec3, b: &Vec3) -> bool {
        if self.len == self.segments.len() {
            self.dropped += 1;
            return false;
        }
        self.segments[self.len] = [*a, *b];
        self.pairs[self.len] = (i, j);
        self.len += 1;
        true
    }
}

#[inline(always)]
fn within(a: &Vec3, b: &Vec3, max_distance_sq: f32) -> bool {
    (b - a).norm_squared() < max_distance_sq
}

/// Pair search backend for the per-frame edge rebuild
pub trait EdgeBuilder: Send + Sync {
    /// Clear `edges` and refill it with every pair closer than `connection_distance`
    fn rebuild(&mut self, positions: &[Vec3], connection_distance: f32, edges: &mut EdgeBuffer);

    /// Which strategy this builder implements
    fn strategy(&self) -> EdgeStrategy;
}

/// All-pairs scan
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceEdges;

impl EdgeBuilder for BruteForceEdges {
    fn rebuild(&mut self, positions: &[Vec3], connection_distance: f32, edges: &mut EdgeBuffer) {
        edges.clear();
        let max_sq = connection_distance * connection_distance;

        for i in 0..positions.len() {
            let a = &positions[i];
            for j in (i + 1)..positions.len() {
                let b = &positions[j];
                if within(a, b, max_sq) {
                    edges.push(i as u32, j as u32, a, b);
                }
            }
        }
    }

    fn strategy(&self) -> EdgeStrategy {
        EdgeStrategy::BruteForce
    }
}

// Cells slightly larger than the query radius absorb rounding in the cell
// coordinate, so a pair just under the radius never lands two cells apart.
const CELL_SLACK: f32 = 1.0 + 1e-4;

/// Spatial hash pair search
pub struct GridEdges {
    index: SpatialIndex,
    candidates: Vec<u32>,
}

impl GridEdges {
    pub fn new(connection_distance: f32) -> Self {
        Self {
            index: SpatialIndex::new(connection_distance * CELL_SLACK),
            candidates: Vec::with_capacity(64),
        }
    }
}

impl EdgeBuilder for GridEdges {
    fn rebuild(&mut self, positions: &[Vec3], connection_distance: f32, edges: &mut EdgeBuffer) {
        edges.clear();
        let max_sq = connection_distance * connection_distance;

        if self.index.cell_size() < connection_distance {
            self.index = SpatialIndex::new(connection_distance * CELL_SLACK);
        }
        self.index.rebuild(positions);

        for (i, a) in positions.iter().enumerate() {
            self.candidates.clear();
            self.index.neighbors_into(a, &mut self.candidates);
            self.candidates.retain(|&j| j as usize > i);
            self.candidates.sort_unstable();
            self.candidates.dedup();

            for &j in &self.candidates {
                let b = &positions[j as usize];
                if within(a, b, max_sq) {
                    edges.push(i as u32, j, a, b);
                }
            }
        }
    }

    fn strategy(&self) -> EdgeStrategy {
        EdgeStrategy::Grid
    }
}

/// Create the edge builder for a strategy
pub fn create_edge_builder(
    strategy: EdgeStrategy,
    connection_distance: f32,
) -> Box<dyn EdgeBuilder> {
    match strategy {
        EdgeStrategy::BruteForce => Box::new(BruteForceEdges),
        EdgeStrategy::Grid => Box::new(GridEdges::new(connection_distance)),
    }
}
