use drape::{expected_spring_count, ClothConfig, ClothState, NoOpStepObserver, Simulation, Topology, Vec3, SPRING_OFFSETS};

fn flat_state(n: usize) -> ClothState<f32> {
    let config = ClothConfig::new().with_resolution(n);
    let mut state = ClothState::new(&config);
    state.reset(Vec3::zero(), config.gravity);
    state
}

#[test]
fn spring_count_matches_closed_form() {
    for n in 2..=12 {
        let topology = Topology::build(n, flat_state(n).positions());
        assert_eq!(topology.len(), expected_spring_count(n), "spring count mismatch for n = {}", n);
    }
}

#[test]
fn four_by_four_has_58_springs() {
    // Bend: 2 * 4 * 2 = 16
    // Structural: 2 * 4 * 3 = 24
    // Shear: 2 * 3 * 3 = 18
    let topology = Topology::build(4, flat_state(4).positions());
    assert_eq!(topology.len(), 58);
}

#[test]
fn springs_follow_node_then_offset_order() {
    let n = 5;
    let topology = Topology::build(n, flat_state(n).positions());

    let mut expected = Vec::new();
    for i in 0..n as isize {
        for j in 0..n as isize {
            for (di, dj) in SPRING_OFFSETS {
                let (ni, nj) = (i + di, j + dj);
                if (0..n as isize).contains(&ni) && (0..n as isize).contains(&nj) {
                    expected.push(((i as usize, j as usize), (ni as usize, nj as usize)));
                }
            }
        }
    }

    let actual: Vec<_> = topology.springs().iter().map(|s| s.endpoints(n)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn rest_lengths_match_build_time_distances() {
    let config: ClothConfig<f32> = ClothConfig::new().with_resolution(8).with_seed(11);
    let sim = Simulation::new(config).unwrap();
    let positions = sim.state().positions();

    for spring in sim.topology().springs() {
        let d = (positions[spring.b] - positions[spring.a]).length();
        assert_eq!(spring.rest_length(), d);
    }
}

#[test]
fn rest_lengths_survive_motion_and_resets() {
    let config: ClothConfig<f32> = ClothConfig::new().with_resolution(8).with_seed(5);
    let mut sim = Simulation::new(config).unwrap();
    let before: Vec<f32> = sim.topology().springs().iter().map(|s| s.rest_length()).collect();

    // ~0.32 time units: long enough to fall onto the sphere.
    for _ in 0..20 {
        sim.advance_frame(&mut NoOpStepObserver);
    }

    let positions = sim.state().positions();
    let moved = sim
        .topology()
        .springs()
        .iter()
        .any(|s| (positions[s.b] - positions[s.a]).length() != s.rest_length());
    assert!(moved, "cloth should have deformed on the sphere");

    let after: Vec<f32> = sim.topology().springs().iter().map(|s| s.rest_length()).collect();
    assert_eq!(before, after);

    sim.reset();
    let after_reset: Vec<f32> = sim.topology().springs().iter().map(|s| s.rest_length()).collect();
    assert_eq!(before, after_reset);
}

#[test]
fn flat_rest_lengths_by_kind() {
    let n = 4;
    let q = 0.25f32;
    let topology = Topology::build(n, flat_state(n).positions());
    for spring in topology.springs() {
        let expected = match spring.kind {
            drape::SpringKind::Structural => q,
            drape::SpringKind::Shear => (2.0 * q * q).sqrt(),
            drape::SpringKind::Bend => 2.0 * q,
        };
        assert!(
            (spring.rest_length() - expected).abs() < 1e-6,
            "{:?} spring has rest length {}, expected {}",
            spring.kind,
            spring.rest_length(),
            expected,
        );
    }
}
