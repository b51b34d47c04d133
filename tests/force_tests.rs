use drape::{
    accumulate_forces, par_accumulate_forces, ClothConfig, ClothState, Degeneracy, NoOpStepObserver, StepObserver,
    Topology, Vec3,
};
use rand::{Rng, SeedableRng};

#[derive(Default)]
struct Recorder {
    degeneracies: Vec<Degeneracy>,
    accumulated: usize,
}

impl StepObserver<f32> for Recorder {
    fn on_forces_accumulated(&mut self) {
        self.accumulated += 1;
    }

    fn on_degeneracy(&mut self, degeneracy: Degeneracy) {
        self.degeneracies.push(degeneracy);
    }
}

fn flat(config: &ClothConfig<f32>) -> (ClothState<f32>, Topology<f32>) {
    let mut state = ClothState::new(config);
    state.reset(Vec3::zero(), config.gravity);
    let topology = Topology::build(config.resolution, state.positions());
    (state, topology)
}

#[test]
fn rest_state_has_zero_spring_force() {
    let config = ClothConfig::new().with_resolution(6).with_gravity(Vec3::zero());
    let (mut state, topology) = flat(&config);

    accumulate_forces(&mut state, &topology, &config, &mut NoOpStepObserver);

    for (idx, f) in state.forces().iter().enumerate() {
        assert_eq!(*f, Vec3::zero(), "node {:?} should be in equilibrium", state.coords(idx));
    }
}

#[test]
fn forces_start_from_gravity() {
    let config = ClothConfig::new().with_resolution(3);
    let (mut state, topology) = flat(&config);

    accumulate_forces(&mut state, &topology, &config, &mut NoOpStepObserver);

    assert!(state.forces().iter().all(|f| *f == config.gravity));
}

#[test]
fn uniform_stretch_pulls_corners_inward() {
    let config = ClothConfig::new().with_resolution(4).with_gravity(Vec3::zero());
    let (mut state, topology) = flat(&config);

    let center = Vec3::new(-0.125f32, 0.6, -0.125);
    for i in 0..4 {
        for j in 0..4 {
            let p = state.position(i, j);
            state.set_position(i, j, center + (p - center).scale(1.1));
        }
    }

    accumulate_forces(&mut state, &topology, &config, &mut NoOpStepObserver);

    let corner = state.force(0, 0);
    assert!(corner.x > 0.0 && corner.z > 0.0, "corner (0, 0) force {:?} should point inward", corner);
    let far_corner = state.force(3, 3);
    assert!(far_corner.x < 0.0 && far_corner.z < 0.0, "corner (3, 3) force {:?} should point inward", far_corner);
    assert!(corner.y.abs() < 1e-3);
}

#[test]
fn spring_forces_cancel_in_total() {
    let config = ClothConfig::new().with_resolution(5).with_gravity(Vec3::zero());
    let (mut state, topology) = flat(&config);

    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    for i in 0..5 {
        for j in 0..5 {
            let p = state.position(i, j);
            let wiggle = Vec3::<f32>::new(rng.random_range(-0.02..0.02), rng.random_range(-0.02..0.02), rng.random_range(-0.02..0.02));
            state.set_position(i, j, p + wiggle);
            state.set_velocity(i, j, Vec3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0));
        }
    }

    accumulate_forces(&mut state, &topology, &config, &mut NoOpStepObserver);

    let total = state.forces().iter().fold(Vec3::zero(), |acc, f| acc + *f);
    assert!(total.length() < 1e-2, "internal forces should sum to zero, got {:?}", total);
}

#[test]
fn damping_resists_closing_speed() {
    // 2x2 grid, 0.5 apart. Node (0, 0) moves toward (0, 1) at unit speed.
    let config = ClothConfig::new()
        .with_resolution(2)
        .with_gravity(Vec3::zero())
        .with_stiffness(0.0)
        .with_damping(100.0);
    let (mut state, topology) = flat(&config);
    state.set_velocity(0, 0, Vec3::new(0.0, 0.0, 1.0));

    accumulate_forces(&mut state, &topology, &config, &mut NoOpStepObserver);

    // Structural spring to (0, 1): -100 along +z. Shear spring to (1, 1):
    // closing speed 1/sqrt(2), giving -50 along x and z. Spring to (1, 0)
    // is perpendicular to the motion.
    let f = state.force(0, 0);
    assert!((f.x + 50.0).abs() < 1e-3, "f = {:?}", f);
    assert!(f.y.abs() < 1e-6, "f = {:?}", f);
    assert!((f.z + 150.0).abs() < 1e-3, "f = {:?}", f);

    // The partner on the structural spring is dragged along.
    assert!(state.force(0, 1).z > 0.0);
}

#[test]
fn zero_length_spring_is_skipped() {
    let config = ClothConfig::new().with_resolution(2).with_gravity(Vec3::zero());
    let (mut state, topology) = flat(&config);
    // Spring 0 joins (0, 0) and (0, 1).
    state.set_position(0, 1, state.position(0, 0));

    let mut recorder = Recorder::default();
    accumulate_forces(&mut state, &topology, &config, &mut recorder);

    assert_eq!(recorder.degeneracies, vec![Degeneracy::Spring { index: 0 }]);
    assert_eq!(recorder.accumulated, 1);
    for f in state.forces() {
        assert!(f.x.is_finite() && f.y.is_finite() && f.z.is_finite(), "force {:?} must stay finite", f);
    }
}

#[test]
fn parallel_accumulation_is_bit_identical() {
    let config = ClothConfig::new().with_resolution(12);
    let (mut state, topology) = flat(&config);

    let mut rng = rand::rngs::StdRng::seed_from_u64(17);
    for i in 0..12 {
        for j in 0..12 {
            let p = state.position(i, j);
            let wiggle = Vec3::<f32>::new(rng.random_range(-0.01..0.01), rng.random_range(-0.01..0.01), rng.random_range(-0.01..0.01));
            state.set_position(i, j, p + wiggle);
            state.set_velocity(i, j, Vec3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)));
        }
    }
    // One degenerate spring as well.
    state.set_position(5, 6, state.position(5, 5));

    let mut sequential = state.clone();
    let mut seq_recorder = Recorder::default();
    accumulate_forces(&mut sequential, &topology, &config, &mut seq_recorder);

    let mut parallel = state;
    let mut par_recorder = Recorder::default();
    let mut scratch = Vec::new();
    par_accumulate_forces(&mut parallel, &topology, &config, &mut scratch, &mut par_recorder);

    assert_eq!(sequential.forces(), parallel.forces());
    assert_eq!(seq_recorder.degeneracies, par_recorder.degeneracies);
    assert_eq!(scratch.len(), topology.len());
}

#[test]
fn topology_from_unplaced_nodes_is_fully_degenerate() {
    let config = ClothConfig::new().with_resolution(4);
    let mut state = ClothState::new(&config);
    // Every node still sits at the origin, so every rest length is zero.
    let topology = Topology::build(config.resolution, state.positions());
    state.reset(Vec3::zero(), config.gravity);

    let mut recorder = Recorder::default();
    accumulate_forces(&mut state, &topology, &config, &mut recorder);

    let expected: Vec<_> = (0..topology.len()).map(|index| Degeneracy::Spring { index }).collect();
    assert_eq!(recorder.degeneracies, expected);
    assert_eq!(recorder.accumulated, 1);
    for f in state.forces() {
        assert!(f.x.is_finite() && f.y.is_finite() && f.z.is_finite());
        assert_eq!(*f, config.gravity);
    }
}
