//! The simulation loop: periodic resets, fixed substeps, and frame handoff.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::Sphere;
use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::forces::{accumulate_forces, par_accumulate_forces};
use crate::integrator::{integrate, par_integrate};
use crate::mesh::ClothMesh;
use crate::observer::StepObserver;
use crate::render::{Frame, Renderer, SceneParams};
use crate::state::ClothState;
use crate::topology::Topology;
use crate::vec::Vec3;

/// Uniform XZ offset in `[-0.5, 0.5)`, applied to the whole cloth on reset.
fn draw_jitter<F: Float, R: Rng>(rng: &mut R) -> Vec3<F> {
    let x = rng.random::<f32>() - 0.5;
    let z = rng.random::<f32>() - 0.5;
    Vec3::new(F::from_f32(x), F::zero(), F::from_f32(z))
}

/// Where the loop is in its reset cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The reset threshold was reached; the next frame starts over.
    Resetting,
    /// Substepping.
    Running,
}

/// A cloth over a sphere, restarted every `reset_threshold` time units.
///
/// The topology is built once, from the layout of the first reset, and
/// persists across later resets.
pub struct Simulation<F: Float, R: Rng = StdRng> {
    config: ClothConfig<F>,
    state: ClothState<F>,
    topology: Topology<F>,
    mesh: ClothMesh,
    sphere: Sphere<F>,
    scene: SceneParams,
    rng: R,
    phase: Phase,
    elapsed: F,
    substeps: usize,
    resets: usize,
    scratch: Vec<Option<Vec3<F>>>,
}

impl<F: Float> Simulation<F> {
    /// Validate `config` and start the first run.
    ///
    /// The jitter source is seeded from `config.seed`, or from OS entropy
    /// when no seed is given.
    ///
    /// # Errors
    ///
    /// Returns the [`ClothError`] for the first invalid option.
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        let rng = config.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl<F: Float, R: Rng> Simulation<F, R> {
    /// Like [`Simulation::new`], drawing reset jitter from `rng` instead.
    ///
    /// # Errors
    ///
    /// Returns the [`ClothError`] for the first invalid option.
    pub fn with_rng(config: ClothConfig<F>, mut rng: R) -> Result<Self, ClothError> {
        config.validate()?;

        let n = config.resolution;
        let jitter = draw_jitter(&mut rng);
        let mut state = ClothState::new(&config);
        // Lay the cloth out before measuring rest lengths; an unplaced grid
        // would give every spring a zero rest length.
        state.reset(jitter, config.gravity);
        let topology = Topology::build(n, state.positions());

        ftlog::info!(
            "Cloth of {}x{} nodes with {} springs, {} substeps per frame",
            n,
            n,
            topology.len(),
            config.substeps_per_frame(),
        );

        Ok(Simulation {
            sphere: Sphere::new(config.sphere_center, config.sphere_radius),
            substeps: config.substeps_per_frame(),
            mesh: ClothMesh::new(n),
            scene: SceneParams::default(),
            phase: Phase::Running,
            elapsed: F::zero(),
            resets: 1,
            scratch: Vec::with_capacity(topology.len()),
            config,
            state,
            topology,
            rng,
        })
    }

    /// Replace the scene parameters handed to the renderer.
    pub fn with_scene(mut self, scene: SceneParams) -> Self {
        self.scene = scene;
        self
    }

    /// Start over: flat cloth shifted by a fresh random XZ jitter, at rest,
    /// with the elapsed time cleared.
    pub fn reset(&mut self) {
        self.reset_observed(&mut crate::observer::NoOpStepObserver);
    }

    /// [`reset`](Self::reset), notifying `observer`.
    pub fn reset_observed<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let jitter = draw_jitter(&mut self.rng);
        self.state.reset(jitter, self.config.gravity);
        self.elapsed = F::zero();
        self.phase = Phase::Running;
        self.resets += 1;

        ftlog::debug!("Reset #{} with jitter ({}, {})", self.resets, jitter.x, jitter.z);
        observer.on_reset(jitter);
    }

    /// Advance by one `dt`: accumulate forces, then integrate.
    pub fn substep<O: StepObserver<F>>(&mut self, observer: &mut O) {
        self.elapsed = self.elapsed + self.config.dt;

        if self.config.parallel {
            par_accumulate_forces(&mut self.state, &self.topology, &self.config, &mut self.scratch, observer);
            par_integrate(&mut self.state, self.config.dt, self.config.mass, &self.sphere, observer);
        } else {
            accumulate_forces(&mut self.state, &self.topology, &self.config, observer);
            integrate(&mut self.state, self.config.dt, self.config.mass, &self.sphere, observer);
        }

        if self.elapsed >= self.config.reset_threshold {
            self.phase = Phase::Resetting;
        }
        observer.on_substep_complete(self.elapsed);
    }

    /// Simulate one rendered frame: reset if the threshold was reached, then
    /// run the frame's substeps.
    pub fn advance_frame<O: StepObserver<F>>(&mut self, observer: &mut O) {
        if self.phase == Phase::Resetting {
            self.reset_observed(observer);
        }
        for _ in 0..self.substeps {
            self.substep(observer);
        }
    }

    /// Advance one frame and hand it to `renderer`.
    pub fn run_frame<D: Renderer<F>, O: StepObserver<F>>(&mut self, renderer: &mut D, observer: &mut O) {
        self.advance_frame(observer);
        renderer.present(&self.frame());
    }

    /// Run frames until the renderer stops. Returns the number of frames
    /// presented.
    pub fn run<D: Renderer<F>, O: StepObserver<F>>(&mut self, renderer: &mut D, observer: &mut O) -> usize {
        let mut frames = 0;
        while renderer.is_running() {
            self.run_frame(renderer, observer);
            frames += 1;
        }
        frames
    }

    /// Borrow the current render buffers.
    pub fn frame(&self) -> Frame<'_, F> {
        Frame {
            vertices: self.state.vertices(),
            indices: self.mesh.indices(),
            colors: self.mesh.colors(),
            sphere: self.sphere,
            scene: self.scene,
            elapsed: self.elapsed,
        }
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn state(&self) -> &ClothState<F> { &self.state }

    /// Mutable access to the node buffers, e.g. for scripted setups.
    pub fn state_mut(&mut self) -> &mut ClothState<F> { &mut self.state }

    pub fn topology(&self) -> &Topology<F> { &self.topology }
    pub fn mesh(&self) -> &ClothMesh { &self.mesh }
    pub fn sphere(&self) -> &Sphere<F> { &self.sphere }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn elapsed(&self) -> F { self.elapsed }
    pub fn substeps_per_frame(&self) -> usize { self.substeps }

    /// Number of resets performed, including the initial one.
    pub fn reset_count(&self) -> usize { self.resets }
}
