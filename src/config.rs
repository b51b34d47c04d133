//! Configuration types for the cloth simulation.

use serde::Deserialize;

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

/// Configuration for a cloth simulation.
///
/// Every field has a default, so a YAML document only needs the options it
/// overrides.
///
/// # Builder Pattern
/// ```
/// use drape::config::ClothConfig;
/// use drape::vec::Vec3;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_resolution(64)
///     .with_dt(2e-3)
///     .with_gravity(Vec3::new(0.0, -9.8, 0.0))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, bound(deserialize = ""))]
pub struct ClothConfig<F: Float> {
    /// Nodes per grid side. Default: 128.
    pub resolution: usize,
    /// Substep length. Default: 1e-3.
    pub dt: F,
    /// Simulated time per rendered frame. Default: 1/60.
    pub frame_time: F,
    /// Uniform gravity acceleration. Default: (0, -9.8, 0).
    pub gravity: Vec3<F>,
    /// Spring stiffness. Default: 1e3.
    pub stiffness: F,
    /// Damping coefficient along the spring axis. Default: 1e2.
    pub damping: F,
    /// Mass of every node. Default: 1.
    pub mass: F,
    /// Collision sphere center. Default: origin.
    pub sphere_center: Vec3<F>,
    /// Collision sphere radius. Default: 0.3.
    pub sphere_radius: F,
    /// Elapsed time after which the cloth restarts. Default: 1.5.
    pub reset_threshold: F,
    /// Edge length of the flat cloth along X and Z. Default: 1.
    pub cloth_size: F,
    /// Height of the flat cloth at reset. Default: 0.6.
    pub cloth_height: F,
    /// Seed for the reset jitter. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Run force accumulation and integration on the rayon pool.
    pub parallel: bool,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            resolution: 128,
            dt: F::from_f64(1e-3),
            frame_time: F::one() / F::from_f64(60.0),
            gravity: Vec3::new(F::zero(), F::from_f64(-9.8), F::zero()),
            stiffness: F::from_f64(1e3),
            damping: F::from_f64(1e2),
            mass: F::one(),
            sphere_center: Vec3::zero(),
            sphere_radius: F::from_f64(0.3),
            reset_threshold: F::from_f64(1.5),
            cloth_size: F::one(),
            cloth_height: F::from_f64(0.6),
            seed: None,
            parallel: false,
        }
    }

    /// Set the number of nodes per grid side.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the substep length.
    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    /// Set the simulated time covered by one rendered frame.
    pub fn with_frame_time(mut self, frame_time: F) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the spring stiffness.
    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Set the damping coefficient.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the mass of every node.
    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    /// Set the collision sphere.
    pub fn with_sphere(mut self, center: Vec3<F>, radius: F) -> Self {
        self.sphere_center = center;
        self.sphere_radius = radius;
        self
    }

    /// Set the elapsed time after which the cloth restarts.
    pub fn with_reset_threshold(mut self, reset_threshold: F) -> Self {
        self.reset_threshold = reset_threshold;
        self
    }

    /// Set the flat cloth's edge length and height.
    pub fn with_cloth_layout(mut self, size: F, height: F) -> Self {
        self.cloth_size = size;
        self.cloth_height = height;
        self
    }

    /// Seed the reset jitter for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the rayon substep passes.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Distance between neighboring nodes of the flat cloth.
    pub fn quad_size(&self) -> F {
        self.cloth_size / F::from_f64(self.resolution as f64)
    }

    /// Number of substeps per rendered frame: `floor(frame_time / dt)`, at
    /// least one.
    pub fn substeps_per_frame(&self) -> usize {
        let steps = (self.frame_time / self.dt).floor().to_f64();
        if steps >= 1.0 {
            steps as usize
        } else {
            1
        }
    }

    /// Check every option, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the [`ClothError`] describing the offending option.
    pub fn validate(&self) -> Result<(), ClothError> {
        let n = self.resolution;
        if n < 2 {
            return Err(ClothError::InvalidResolution { n });
        }
        if n.checked_mul(n).map_or(true, |count| u32::try_from(count).is_err()) {
            return Err(ClothError::ResolutionTooLarge { n });
        }
        if !(self.dt.is_finite() && self.dt > F::zero()) {
            return Err(ClothError::InvalidTimeStep);
        }
        if !(self.frame_time.is_finite() && self.frame_time > F::zero()) {
            return Err(ClothError::InvalidFrameTime);
        }
        if !(self.sphere_radius.is_finite() && self.sphere_radius >= F::zero()) {
            return Err(ClothError::InvalidRadius);
        }
        if !(self.stiffness.is_finite() && self.stiffness >= F::zero()) {
            return Err(ClothError::InvalidStiffness);
        }
        if !(self.damping.is_finite() && self.damping >= F::zero()) {
            return Err(ClothError::InvalidDamping);
        }
        if !(self.mass.is_finite() && self.mass > F::zero()) {
            return Err(ClothError::InvalidMass);
        }
        if !(self.cloth_size.is_finite() && self.cloth_size > F::zero()) {
            return Err(ClothError::InvalidClothSize);
        }
        if !(self.reset_threshold.is_finite() && self.reset_threshold > F::zero()) {
            return Err(ClothError::InvalidResetThreshold);
        }
        for (name, v) in [("gravity", self.gravity), ("sphere center", self.sphere_center)] {
            if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
                return Err(ClothError::NonFiniteVector { name });
            }
        }
        if !self.cloth_height.is_finite() {
            return Err(ClothError::InvalidClothHeight);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
