//! Mass-spring cloth simulation.
//!
//! `drape` simulates a square cloth as an `n x n` grid of point masses joined
//! by structural, shear, and bend springs, falling under gravity onto a static
//! sphere. It owns everything a renderer needs (vertex, index, and color
//! buffers) and leaves windowing and drawing to the host.
//!
//! # Features
//!
//! - **Damped springs**: Hooke forces on strain, damped by closing speed
//! - **Semi-implicit Euler**: Velocity first, then position, fixed substeps
//! - **Sphere collision**: Projection to the surface, inward velocity removed
//! - **Periodic restart**: Random XZ jitter every `reset_threshold` time units
//! - **Deterministic**: Seeded jitter; parallel mode matches sequential bit for bit
//! - **Observable**: Monitor substeps and skipped updates via `StepObserver`
//!
//! # Example
//! ```
//! use drape::{ClothConfig, NoOpStepObserver, Simulation};
//!
//! let config: ClothConfig<f32> = ClothConfig::new().with_resolution(16).with_seed(1);
//! let mut sim = Simulation::new(config).unwrap();
//! sim.advance_frame(&mut NoOpStepObserver);
//! assert_eq!(sim.frame().vertices.len(), 16 * 16);
//! ```

pub mod float;
pub mod vec;
pub mod config;
pub mod error;
pub mod observer;
pub mod topology;
pub mod state;
pub mod forces;
pub mod collision;
pub mod integrator;
pub mod mesh;
pub mod render;
pub mod simulation;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use config::ClothConfig;
pub use error::{ClothError, Degeneracy};
pub use observer::{StepObserver, NoOpStepObserver};
pub use topology::{Spring, SpringKind, Topology, SPRING_OFFSETS, expected_spring_count};
pub use state::ClothState;
pub use forces::{accumulate_forces, par_accumulate_forces};
pub use collision::{Contact, Sphere};
pub use integrator::{integrate, par_integrate};
pub use mesh::{ClothMesh, Rgb};
pub use render::{Frame, Renderer, SceneParams};
pub use simulation::{Phase, Simulation};
