//! Spring topology: structural, shear, and bend springs over the node grid.

use crate::float::Float;
use crate::vec::Vec3;

/// Classification of a spring by the offset between its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringKind {
    /// Axis-aligned single step.
    Structural,
    /// Diagonal single step.
    Shear,
    /// Axis-aligned double step.
    Bend,
}

/// The neighbor offsets `(di, dj)` every node is connected along, in
/// iteration order.
///
/// Only one diagonal direction is bent over, and each offset is applied once
/// per node, so the spring set is not symmetric near the grid boundary.
pub const SPRING_OFFSETS: [(isize, isize); 6] = [(0, 2), (0, 1), (1, 1), (2, 0), (1, 0), (1, -1)];

impl SpringKind {
    /// Classify an offset from [`SPRING_OFFSETS`].
    pub fn of_offset(offset: (isize, isize)) -> Self {
        match offset {
            (0, 2) | (2, 0) => SpringKind::Bend,
            (0, 1) | (1, 0) => SpringKind::Structural,
            _ => SpringKind::Shear,
        }
    }
}

/// A damped spring between nodes `a` and `b`, identified by their row-major
/// indices `i * n + j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub kind: SpringKind,
    rest_length: F,
}

impl<F: Float> Spring<F> {
    /// Create a spring whose rest length is the current distance between
    /// its endpoints.
    pub fn from_positions(a: usize, b: usize, kind: SpringKind, positions: &[Vec3<F>]) -> Self {
        let rest_length = positions[a].distance(positions[b]);
        Spring { a, b, kind, rest_length }
    }

    /// Natural length, fixed when the topology was built.
    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    /// Grid coordinates `((i, j), (ni, nj))` of both endpoints.
    pub fn endpoints(&self, n: usize) -> ((usize, usize), (usize, usize)) {
        ((self.a / n, self.a % n), (self.b / n, self.b % n))
    }
}

/// The immutable spring list of an `n x n` cloth.
#[derive(Clone, Debug)]
pub struct Topology<F: Float> {
    springs: Vec<Spring<F>>,
    n: usize,
}

impl<F: Float> Topology<F> {
    /// Build the springs of an `n x n` grid from the node positions.
    ///
    /// Nodes are visited row by row (`i`, then `j`), and offsets in the order
    /// of [`SPRING_OFFSETS`]. Rest lengths come from `positions` as they are
    /// now, so call this after the first reset has laid the cloth out.
    pub fn build(n: usize, positions: &[Vec3<F>]) -> Self {
        debug_assert_eq!(positions.len(), n * n);
        let mut springs = Vec::with_capacity(expected_spring_count(n));

        for i in 0..n {
            for j in 0..n {
                for &(di, dj) in SPRING_OFFSETS.iter() {
                    let Some(ni) = i.checked_add_signed(di).filter(|&ni| ni < n) else { continue };
                    let Some(nj) = j.checked_add_signed(dj).filter(|&nj| nj < n) else { continue };
                    springs.push(Spring::from_positions(
                        i * n + j,
                        ni * n + nj,
                        SpringKind::of_offset((di, dj)),
                        positions,
                    ));
                }
            }
        }

        Topology { springs, n }
    }

    pub fn springs(&self) -> &[Spring<F>] {
        &self.springs
    }

    pub fn spring(&self, index: usize) -> &Spring<F> {
        &self.springs[index]
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn resolution(&self) -> usize {
        self.n
    }

    /// Number of springs of the given kind.
    pub fn count_of(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }
}

/// Spring count of an `n x n` grid, in closed form.
///
/// Bend offsets fit `n * (n - 2)` times each, structural `n * (n - 1)`, and
/// each diagonal `(n - 1)^2`.
pub fn expected_spring_count(n: usize) -> usize {
    let bend = 2 * n * n.saturating_sub(2);
    let structural = 2 * n * n.saturating_sub(1);
    let shear = 2 * n.saturating_sub(1) * n.saturating_sub(1);
    bend + structural + shear
}
