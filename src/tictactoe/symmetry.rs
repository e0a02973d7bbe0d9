//! D4 symmetry group operations for board canonicalization

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::board::{Cell, Cells};
use crate::types::{BOARD_SIZE, StateKey};

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to apply reflection
    pub reflection: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// Get all 8 D4 transforms, identity first
    pub fn all() -> Vec<D4Transform> {
        let mut transforms = Vec::with_capacity(8);
        for rotation in [0, 90, 180, 270] {
            transforms.push(D4Transform {
                rotation,
                reflection: false,
            });
            transforms.push(D4Transform {
                rotation,
                reflection: true,
            });
        }
        transforms
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Apply transform to a position (0-8)
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        // Mirror across the vertical axis before rotating
        if self.reflection {
            col = 2 - col;
        }

        // Rotate clockwise
        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = 2 - row;
            row = new_row;
            col = new_col;
        }

        row * 3 + col
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &Cells) -> Cells {
        let mut transformed = [Cell::Empty; BOARD_SIZE];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }
}

/// Which board symmetries are merged into one state key.
///
/// `Dihedral` is the full group of the square (identity, three rotations, four
/// reflections). `Reflections` keeps only the identity and the four
/// reflections. That set is not closed under composition, so a key built from
/// it is not guaranteed to be idempotent or orbit-invariant; it exists to
/// reproduce learning runs made with the reduced orbit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum SymmetryGroup {
    #[default]
    Dihedral,
    Reflections,
}

impl SymmetryGroup {
    /// Transforms of this group, identity first
    pub fn transforms(self) -> Vec<D4Transform> {
        match self {
            SymmetryGroup::Dihedral => D4Transform::all(),
            SymmetryGroup::Reflections => D4Transform::all()
                .into_iter()
                .filter(|t| t.reflection || t.is_identity())
                .collect(),
        }
    }

    /// Number of transforms (orbit size including duplicates)
    pub fn order(self) -> usize {
        match self {
            SymmetryGroup::Dihedral => 8,
            SymmetryGroup::Reflections => 5,
        }
    }
}

/// Images of `cells` under every transform of `group`, identity first.
///
/// Symmetric boards produce duplicates; they are kept.
pub fn symmetry_orbit(cells: &Cells, group: SymmetryGroup) -> Vec<Cells> {
    group
        .transforms()
        .iter()
        .map(|t| t.apply_to_cells(cells))
        .collect()
}

/// Lexicographically smallest encoding in the orbit of `cells`
pub fn canonical_key(cells: &Cells, group: SymmetryGroup) -> StateKey {
    symmetry_orbit(cells, group)
        .iter()
        .map(StateKey::from_cells)
        .min()
        .unwrap_or_else(|| StateKey::from_cells(cells))
}

/// Memoizing wrapper around [`canonical_key`].
///
/// The cache is keyed by raw cells and never evicted. It cannot outgrow the
/// 3^9 = 19 683 possible cell arrays.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    group: SymmetryGroup,
    cache: HashMap<Cells, StateKey>,
}

impl Canonicalizer {
    pub fn new(group: SymmetryGroup) -> Self {
        Self {
            group,
            cache: HashMap::new(),
        }
    }

    pub fn key(&mut self, cells: &Cells) -> StateKey {
        if let Some(key) = self.cache.get(cells) {
            return key.clone();
        }
        let key = canonical_key(cells, self.group);
        self.cache.insert(*cells, key.clone());
        key
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::board::parse_cells;

    /// Gather-style index tables for the eight square symmetries
    const PERMUTATIONS: [&str; 8] = [
        "012345678",
        "210543876",
        "678345012",
        "036147258",
        "852741630",
        "630741852",
        "876543210",
        "258147036",
    ];

    fn gather(cells: &Cells, perm: &str) -> Cells {
        let mut out = [Cell::Empty; BOARD_SIZE];
        for (i, c) in perm.chars().enumerate() {
            let src = c.to_digit(10).unwrap() as usize;
            out[i] = cells[src];
        }
        out
    }

    #[test]
    fn test_all_transforms_are_permutations() {
        for t in D4Transform::all() {
            let mut seen = [false; BOARD_SIZE];
            for pos in 0..BOARD_SIZE {
                seen[t.transform_position(pos)] = true;
            }
            assert!(seen.iter().all(|&s| s), "{t:?} is not a bijection");
        }
    }

    #[test]
    fn test_dihedral_matches_index_tables() {
        // Both enumerations must yield the same multiset of images
        let cells = parse_cells("XO.X..OOX").unwrap();
        let mut from_transforms: Vec<String> = symmetry_orbit(&cells, SymmetryGroup::Dihedral)
            .iter()
            .map(|c| StateKey::from_cells(c).into_string())
            .collect();
        let mut from_tables: Vec<String> = PERMUTATIONS
            .iter()
            .map(|p| StateKey::from_cells(&gather(&cells, p)).into_string())
            .collect();
        from_transforms.sort();
        from_tables.sort();
        assert_eq!(from_transforms, from_tables);
    }

    #[test]
    fn test_orbit_starts_with_identity() {
        let cells = parse_cells("X...O....").unwrap();
        for group in [SymmetryGroup::Dihedral, SymmetryGroup::Reflections] {
            let orbit = symmetry_orbit(&cells, group);
            assert_eq!(orbit.len(), group.order());
            assert_eq!(orbit[0], cells);
        }
    }

    #[test]
    fn test_reflections_group() {
        let transforms = SymmetryGroup::Reflections.transforms();
        assert_eq!(transforms.len(), 5);
        assert!(transforms[0].is_identity());
        assert!(transforms[1..].iter().all(|t| t.reflection));
    }

    #[test]
    fn test_corners_share_key() {
        let keys: Vec<StateKey> = [0, 2, 6, 8]
            .iter()
            .map(|&pos| {
                let mut cells = [Cell::Empty; BOARD_SIZE];
                cells[pos] = Cell::X;
                canonical_key(&cells, SymmetryGroup::Dihedral)
            })
            .collect();
        assert!(keys.windows(2).all(|w| w[0] == w[1]));
        // '.' sorts before 'X', so the piece ends up in the last corner
        assert_eq!(keys[0].as_str(), "........X");
    }

    #[test]
    fn test_canonicalizer_caches() {
        let mut canonicalizer = Canonicalizer::new(SymmetryGroup::Dihedral);
        let cells = parse_cells("X...O....").unwrap();
        let first = canonicalizer.key(&cells);
        let second = canonicalizer.key(&cells);
        assert_eq!(first, second);
        assert_eq!(canonicalizer.cache_len(), 1);
        assert_eq!(first, canonical_key(&cells, SymmetryGroup::Dihedral));
    }
}
