//! Semi-implicit Euler integration with sphere collision response.

use rayon::prelude::*;

use crate::collision::{Contact, Sphere};
use crate::error::Degeneracy;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::state::ClothState;
use crate::vec::Vec3;

/// Advance one node by `dt`: velocity from force first, then position from
/// the new velocity, then collision with `sphere`.
///
/// Returns `false` if the collision normal was undefined and the correction
/// was skipped.
fn step_node<F: Float>(
    pos: &mut Vec3<F>,
    vel: &mut Vec3<F>,
    force: Vec3<F>,
    dt_over_mass: F,
    dt: F,
    sphere: &Sphere<F>,
) -> bool {
    *vel += force.scale(dt_over_mass);
    *pos += vel.scale(dt);

    match sphere.resolve(*pos, *vel) {
        Contact::Separated => true,
        Contact::Resolved { pos: p, vel: v } => {
            *pos = p;
            *vel = v;
            true
        }
        Contact::Degenerate => false,
    }
}

fn report<F: Float, O: StepObserver<F>>(state: &ClothState<F>, index: usize, observer: &mut O) {
    let degeneracy = Degeneracy::CollisionNormal { node: state.coords(index) };
    ftlog::debug!("Skipping collision: {degeneracy}");
    observer.on_degeneracy(degeneracy);
}

/// Integrate every node over one substep and publish the vertex buffer.
///
/// Forces must already be accumulated for this substep.
pub fn integrate<F: Float, O: StepObserver<F>>(
    state: &mut ClothState<F>,
    dt: F,
    mass: F,
    sphere: &Sphere<F>,
    observer: &mut O,
) {
    let dt_over_mass = dt / mass;

    for index in 0..state.node_count() {
        let ok = step_node(
            &mut state.positions[index],
            &mut state.velocities[index],
            state.forces[index],
            dt_over_mass,
            dt,
            sphere,
        );
        state.vertices[index] = state.positions[index];
        if !ok {
            report::<F, O>(state, index, observer);
        }
    }

    observer.on_integrate();
}

/// Parallel [`integrate`]. Nodes are independent, so the result matches the
/// sequential pass exactly; degeneracies are reported afterwards in node
/// order.
pub fn par_integrate<F: Float, O: StepObserver<F>>(
    state: &mut ClothState<F>,
    dt: F,
    mass: F,
    sphere: &Sphere<F>,
    observer: &mut O,
) {
    let dt_over_mass = dt / mass;

    let degenerate: Vec<usize> = {
        let ClothState { positions, velocities, forces, vertices, .. } = &mut *state;
        positions
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .zip(forces.par_iter())
            .zip(vertices.par_iter_mut())
            .enumerate()
            .filter_map(|(index, (((pos, vel), force), vertex))| {
                let ok = step_node(pos, vel, *force, dt_over_mass, dt, sphere);
                *vertex = *pos;
                (!ok).then_some(index)
            })
            .collect()
    };

    for index in degenerate {
        report::<F, O>(state, index, observer);
    }

    observer.on_integrate();
}
