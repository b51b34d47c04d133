//! Force accumulation: gravity plus damped spring forces.
//!
//! Springs are applied in list order so the floating-point sum on each node
//! is reproducible. The parallel variant evaluates springs concurrently but
//! reduces their contributions in the same order, giving identical results.

use rayon::prelude::*;

use crate::config::ClothConfig;
use crate::error::Degeneracy;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::state::ClothState;
use crate::topology::{Spring, Topology};
use crate::vec::Vec3;

/// Lengths below this are treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-10;

/// Force a spring exerts on its `a` endpoint; `b` receives the negation.
///
/// Returns `None` when the current or rest length is zero, since the spring
/// direction (or its strain) is then undefined.
pub fn spring_force<F: Float>(
    spring: &Spring<F>,
    positions: &[Vec3<F>],
    velocities: &[Vec3<F>],
    stiffness: F,
    damping: F,
) -> Option<Vec3<F>> {
    let epsilon = F::from_f32(DEGENERATE_EPSILON);
    let rest = spring.rest_length();
    if rest.is_near_zero(epsilon) {
        return None;
    }

    let (u, current) = (positions[spring.b] - positions[spring.a]).normalize_with_length(epsilon)?;

    // Closing speed along the spring axis.
    let v_rel = u.dot(velocities[spring.a]) + (-u).dot(velocities[spring.b]);
    let magnitude = stiffness * (current / rest - F::one()) - damping * v_rel;

    Some(u.scale(magnitude))
}

fn report<F: Float, O: StepObserver<F>>(index: usize, observer: &mut O) {
    let degeneracy = Degeneracy::Spring { index };
    ftlog::debug!("Skipping spring: {degeneracy}");
    observer.on_degeneracy(degeneracy);
}

/// Reset every node's force to gravity, then add all spring forces.
pub fn accumulate_forces<F: Float, O: StepObserver<F>>(
    state: &mut ClothState<F>,
    topology: &Topology<F>,
    config: &ClothConfig<F>,
    observer: &mut O,
) {
    let ClothState { positions, velocities, forces, .. } = state;
    let (positions, velocities) = (&*positions, &*velocities);

    forces.fill(config.gravity);

    for (index, spring) in topology.springs().iter().enumerate() {
        match spring_force(spring, positions, velocities, config.stiffness, config.damping) {
            Some(f) => {
                forces[spring.a] += f;
                forces[spring.b] += -f;
            }
            None => report::<F, O>(index, observer),
        }
    }

    observer.on_forces_accumulated();
}

/// Parallel [`accumulate_forces`].
///
/// Each spring's contribution is computed on the rayon pool into `scratch`,
/// which is reused across calls, then the contributions are added to the
/// force buffer in spring order. Returns only once every spring is applied.
pub fn par_accumulate_forces<F: Float, O: StepObserver<F>>(
    state: &mut ClothState<F>,
    topology: &Topology<F>,
    config: &ClothConfig<F>,
    scratch: &mut Vec<Option<Vec3<F>>>,
    observer: &mut O,
) {
    let ClothState { positions, velocities, forces, .. } = state;
    let (positions, velocities) = (&*positions, &*velocities);

    forces.par_iter_mut().for_each(|f| *f = config.gravity);

    topology
        .springs()
        .par_iter()
        .map(|spring| spring_force(spring, positions, velocities, config.stiffness, config.damping))
        .collect_into_vec(scratch);

    for (index, (spring, contribution)) in topology.springs().iter().zip(scratch.iter()).enumerate() {
        match contribution {
            Some(f) => {
                forces[spring.a] += *f;
                forces[spring.b] += -*f;
            }
            None => report::<F, O>(index, observer),
        }
    }

    observer.on_forces_accumulated();
}
