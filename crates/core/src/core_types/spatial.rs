use rustc_hash::FxHashMap;

use super::vec3::Vec3;

/// Uniform spatial hash for fixed-radius neighbor queries.
///
/// Cells are cubes of side `cell_size`, keyed by the Morton code of their
/// integer coordinates. With `cell_size` equal to the query radius, every
/// point within the radius of `p` lies in one of the 27 cells around `p`'s cell.
pub struct SpatialIndex {
    cells: FxHashMap<u64, Vec<u32>>,
    cell_size: f32,
    inv_cell_size: f32,
}

impl SpatialIndex {
    /// Create a new spatial index. `cell_size` must be positive and finite.
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size.is_finite() && cell_size > 0.0);
        SpatialIndex {
            cells: FxHashMap::default(),
            cell_size,
            inv_cell_size: 1.0 / cell_size,
        }
    }

    /// Side length of a cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Integer cell coordinates containing a position
    #[inline]
    fn cell_of(&self, pos: &Vec3) -> (i32, i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
            (pos.z * self.inv_cell_size).floor() as i32,
        )
    }

    /// Insert an element into the spatial index
    pub fn insert(&mut self, id: u32, position: &Vec3) {
        let (x, y, z) = self.cell_of(position);
        self.cells
            .entry(morton_encode(x, y, z))
            .or_default()
            .push(id);
    }

    /// Clear and rebuild the index from a position slice; ids are slice indices.
    ///
    /// Buckets occupied last rebuild keep their allocation, buckets that stayed
    /// empty for a whole rebuild are dropped.
    pub fn rebuild(&mut self, positions: &[Vec3]) {
        self.cells.retain(|_, ids| {
            let keep = !ids.is_empty();
            ids.clear();
            keep
        });

        for (id, position) in positions.iter().enumerate() {
            self.insert(id as u32, position);
        }
    }

    /// Append the ids stored in the 27 cells around `pos` to `out`.
    ///
    /// Ids are appended unsorted. A Morton collision between two far-apart
    /// cells can append an id twice, so callers that need a set must dedup.
    pub fn neighbors_into(&self, pos: &Vec3, out: &mut Vec<u32>) {
        let (cx, cy, cz) = self.cell_of(pos);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = morton_encode(
                        cx.wrapping_add(dx),
                        cy.wrapping_add(dy),
                        cz.wrapping_add(dz),
                    );
                    if let Some(ids) = self.cells.get(&key) {
                        out.extend_from_slice(ids);
                    }
                }
            }
        }
    }

    /// Get number of occupied cells in the index
    pub fn cell_count(&self) -> usize {
        self.cells.values().filter(|ids| !ids.is_empty()).count()
    }

    /// Get number of elements in the index
    pub fn element_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

/// Morton encode 3D coordinates into a single 64-bit integer
/// This provides spatial locality for hash lookups
fn morton_encode(x: i32, y: i32, z: i32) -> u64 {
    // Two's complement bits keep negative coordinates distinct within 21 bits
    let x = u64::from(x as u32);
    let y = u64::from(y as u32);
    let z = u64::from(z as u32);

    let mut result = 0u64;

    for i in 0..21 {
        // 21 bits per coordinate = 63 bits total
        result |= ((x & (1 << i)) << (2 * i))
            | ((y & (1 << i)) << (2 * i + 1))
            | ((z & (1 << i)) << (2 * i + 2));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_insert_query() {
        let mut index = SpatialIndex::new(10.0);

        index.rebuild(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(50.0, 50.0, 50.0),
            Vec3::new(-3.0, -3.0, -3.0),
        ]);

        let mut nearby = Vec::new();
        index.neighbors_into(&Vec3::new(0.0, 0.0, 0.0), &mut nearby);
        assert!(nearby.contains(&0));
        assert!(nearby.contains(&1));
        assert!(!nearby.contains(&2));
        assert!(nearby.contains(&3));
        assert_eq!(index.element_count(), 4);
    }

    #[test]
    fn test_rebuild_drops_stale_entries() {
        let mut index = SpatialIndex::new(1.0);
        index.rebuild(&[Vec3::new(0.5, 0.5, 0.5), Vec3::new(8.5, 8.5, 8.5)]);
        assert_eq!(index.cell_count(), 2);

        index.rebuild(&[Vec3::new(0.5, 0.5, 0.5)]);
        assert_eq!(index.element_count(), 1);
        assert_eq!(index.cell_count(), 1);

        let mut nearby = Vec::new();
        index.neighbors_into(&Vec3::new(8.5, 8.5, 8.5), &mut nearby);
        assert!(nearby.is_empty());
    }

    #[test]
    fn test_morton_encoding() {
        let origin = morton_encode(0, 0, 0);
        assert_eq!(origin, 0);
        assert_ne!(origin, morton_encode(1, 0, 0));
        assert_ne!(morton_encode(1, 0, 0), morton_encode(0, 1, 0));
        assert_ne!(morton_encode(-1, 0, 0), morton_encode(1, 0, 0));
    }
}
