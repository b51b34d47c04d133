//! Per-node simulation buffers.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::vec::Vec3;

/// Position, velocity, and force buffers of an `n x n` cloth, plus the
/// vertex buffer published to the renderer.
///
/// Node `(i, j)` lives at index `i * n + j` in every buffer.
#[derive(Clone, Debug)]
pub struct ClothState<F: Float> {
    n: usize,
    quad_size: F,
    half_size: F,
    height: F,
    pub(crate) positions: Vec<Vec3<F>>,
    pub(crate) velocities: Vec<Vec3<F>>,
    pub(crate) forces: Vec<Vec3<F>>,
    pub(crate) vertices: Vec<Vec3<F>>,
}

impl<F: Float> ClothState<F> {
    /// Allocate buffers for the configured grid. All nodes start at the
    /// origin; call [`reset`](Self::reset) to lay the cloth out.
    pub fn new(config: &ClothConfig<F>) -> Self {
        let count = config.resolution * config.resolution;
        ClothState {
            n: config.resolution,
            quad_size: config.quad_size(),
            half_size: config.cloth_size * F::half(),
            height: config.cloth_height,
            positions: vec![Vec3::zero(); count],
            velocities: vec![Vec3::zero(); count],
            forces: vec![Vec3::zero(); count],
            vertices: vec![Vec3::zero(); count],
        }
    }

    /// Flat layout position of node `(i, j)`, before jitter.
    pub fn flat_position(&self, i: usize, j: usize) -> Vec3<F> {
        Vec3::new(
            F::from_f64(i as f64) * self.quad_size - self.half_size,
            self.height,
            F::from_f64(j as f64) * self.quad_size - self.half_size,
        )
    }

    /// Lay the cloth out flat, shifted by `jitter`, at rest. Forces start
    /// at `gravity` and the whole vertex buffer is rewritten.
    pub fn reset(&mut self, jitter: Vec3<F>, gravity: Vec3<F>) {
        let n = self.n;
        for i in 0..n {
            for j in 0..n {
                let idx = i * n + j;
                let p = self.flat_position(i, j) + jitter;
                self.positions[idx] = p;
                self.velocities[idx] = Vec3::zero();
                self.forces[idx] = gravity;
                self.vertices[idx] = p;
            }
        }
    }

    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Grid coordinates of a flat index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.n, index % self.n)
    }

    pub fn resolution(&self) -> usize { self.n }
    pub fn node_count(&self) -> usize { self.positions.len() }
    pub fn quad_size(&self) -> F { self.quad_size }

    pub fn position(&self, i: usize, j: usize) -> Vec3<F> {
        self.positions[self.index(i, j)]
    }

    pub fn velocity(&self, i: usize, j: usize) -> Vec3<F> {
        self.velocities[self.index(i, j)]
    }

    pub fn force(&self, i: usize, j: usize) -> Vec3<F> {
        self.forces[self.index(i, j)]
    }

    /// Move a node, keeping its published vertex in sync.
    pub fn set_position(&mut self, i: usize, j: usize, pos: Vec3<F>) {
        let idx = self.index(i, j);
        self.positions[idx] = pos;
        self.vertices[idx] = pos;
    }

    pub fn set_velocity(&mut self, i: usize, j: usize, vel: Vec3<F>) {
        let idx = self.index(i, j);
        self.velocities[idx] = vel;
    }

    pub fn positions(&self) -> &[Vec3<F>] { &self.positions }
    pub fn velocities(&self) -> &[Vec3<F>] { &self.velocities }
    pub fn forces(&self) -> &[Vec3<F>] { &self.forces }

    /// The renderable vertex buffer, one position per node.
    pub fn vertices(&self) -> &[Vec3<F>] { &self.vertices }

    /// Total kinetic energy with every node weighing `mass`.
    pub fn kinetic_energy(&self, mass: F) -> F {
        self.velocities
            .iter()
            .fold(F::zero(), |acc, v| acc + v.length_sq() * mass * F::half())
    }
}
