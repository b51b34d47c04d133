//! The seam between the simulation core and an external renderer.

use crate::collision::Sphere;
use crate::float::Float;
use crate::mesh::Rgb;
use crate::vec::Vec3;

/// Scene parameters that accompany every frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub light_position: [f32; 3],
    pub light_color: Rgb,
    pub sphere_color: Rgb,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub background: Rgb,
}

impl Default for SceneParams {
    fn default() -> Self {
        SceneParams {
            light_position: [0.0, 1.0, 2.0],
            light_color: [1.0, 1.0, 1.0],
            sphere_color: [0.3, 0.2, 0.5],
            camera_position: [0.0, 0.0, 3.0],
            camera_target: [0.0, 0.0, 0.0],
            background: [0.0, 0.0, 0.0],
        }
    }
}

/// Everything a renderer needs to draw one frame. All buffers are borrowed
/// from the simulation and read-only.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a, F: Float> {
    /// One position per node, row-major.
    pub vertices: &'a [Vec3<F>],
    /// Triangle list over `vertices`.
    pub indices: &'a [u32],
    /// One color per node.
    pub colors: &'a [Rgb],
    pub sphere: Sphere<F>,
    pub scene: SceneParams,
    /// Simulated time since the last reset.
    pub elapsed: F,
}

/// A consumer of simulation frames, such as a window or a headless recorder.
pub trait Renderer<F: Float> {
    /// Whether the host wants more frames.
    fn is_running(&self) -> bool {
        true
    }

    /// Draw the frame. May block, e.g. on vsync.
    fn present(&mut self, frame: &Frame<'_, F>);
}
