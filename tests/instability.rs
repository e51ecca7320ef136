//! Runs with a time step far beyond the explicit stability limit

use std::f64::consts::PI;
use wavedrift::config::SimulationConfig;
use wavedrift::error::SimulationError;
use wavedrift::physics::integrators::ExplicitEuler;
use wavedrift::physics::math::TAU;
use wavedrift::physics::profiles::{InitialProfile, PulseProfile};
use wavedrift::physics::stability::StabilityEstimate;
use wavedrift::physics::{Grid, State, TimeParams};
use wavedrift::render::SnapshotRecorder;
use wavedrift::simulation::{Phase, Simulation};

fn step_function_simulation() -> Simulation {
    let grid = Grid::new(TAU, 64).unwrap();
    let time = TimeParams::new(100.0, 0.05).unwrap();
    let state = State::from_fn(&grid, |x| if x < PI { 1.0 } else { 0.0 });
    Simulation::new(grid, time, state, Box::new(ExplicitEuler)).unwrap()
}

#[test]
fn test_large_step_is_flagged_by_the_estimate() {
    let grid = Grid::new(TAU, 64).unwrap();
    let time = TimeParams::new(100.0, 0.05).unwrap();
    let estimate = StabilityEstimate::new(&ExplicitEuler, &grid, &time);

    assert!(estimate.is_worrying());
    assert!(estimate.max_gain > 100.0);
}

#[test]
fn test_non_finite_state_aborts_the_run() {
    let mut simulation = step_function_simulation();
    assert!(simulation.time().steps() >= 2000);

    let failure = loop {
        match simulation.advance() {
            Ok(_) => continue,
            Err(error) => break error,
        }
    };

    let SimulationError::NonFiniteState { step, index, value } = failure else {
        panic!("expected a non-finite state, got {failure:?}");
    };
    assert!(step <= 500, "blow-up detected only after {step} steps");
    assert_eq!(step, simulation.steps_taken());
    assert!(index < 64);
    assert!(!value.is_finite());
    assert_eq!(simulation.phase(), Phase::Aborted(step));
}

#[test]
fn test_aborted_run_stays_aborted() {
    let mut simulation = step_function_simulation();
    let first = simulation.run().unwrap_err();
    let steps = simulation.steps_taken();

    assert!(matches!(first, SimulationError::NonFiniteState { .. }));
    assert!(matches!(
        simulation.advance(),
        Err(SimulationError::NonFiniteState { step, .. }) if step == steps
    ));
    assert!(simulation.run().is_err());
    assert_eq!(simulation.steps_taken(), steps);
}

#[test]
fn test_unstable_config_still_starts() {
    let mut config = SimulationConfig::default();
    config.time.dt = 0.05;
    config.time.total_time = 50.0;
    config.validate().unwrap();

    let mut simulation = Simulation::from_config(&config).unwrap();
    assert!(matches!(
        simulation.run(),
        Err(SimulationError::NonFiniteState { .. })
    ));
}

#[test]
fn test_aborted_run_renders_no_frames() {
    let mut simulation = step_function_simulation();
    let steps = match simulation.run() {
        Err(SimulationError::NonFiniteState { step, .. }) => step,
        other => panic!("expected a non-finite state, got {other:?}"),
    };

    let mut recorder = SnapshotRecorder::new();
    assert!(matches!(
        simulation.run_with(&mut recorder, 1),
        Err(SimulationError::NonFiniteState { step, .. }) if step == steps
    ));
    assert!(recorder.frames().is_empty());
}

#[test]
fn test_zero_width_pulse_is_rejected_before_stepping() {
    for total_time in [0.0, 1e-3] {
        let mut config = SimulationConfig::default();
        config.time.total_time = total_time;
        config.time.dt = 1e-5;
        config.initial = InitialProfile::Gaussian(PulseProfile {
            center: None,
            width: 0.0,
            amplitude: 1.0,
        });

        assert!(matches!(
            Simulation::from_config(&config),
            Err(SimulationError::InvalidInitialState(_))
        ));
    }
}

#[test]
fn test_non_finite_initial_state_is_rejected() {
    let grid = Grid::new(TAU, 16).unwrap();
    let mut values = vec![0.0; 16];
    values[5] = f64::NAN;
    values[9] = f64::INFINITY;

    for time in [
        TimeParams::new(0.0, 0.1).unwrap(),
        TimeParams::new(1.0, 0.1).unwrap(),
    ] {
        let state = State::from_values(&grid, values.clone()).unwrap();
        let result = Simulation::new(grid, time, state, Box::new(ExplicitEuler));
        let Err(SimulationError::InvalidInitialState(message)) = result else {
            panic!("expected the initial state to be rejected");
        };
        assert!(message.contains("index 5"), "{message}");
    }
}
