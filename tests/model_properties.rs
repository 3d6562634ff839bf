mod common;

use hydra_gate::domain::{Channel, OptimizeMode, ParameterSet};
use hydra_gate::error::ErrorKind;
use hydra_gate::math::FrequencyGrid;
use hydra_gate::models::constants::KHZ;
use hydra_gate::models::evaluate;
use hydra_gate::optimize::{evaluate_at, operating_point, optimize_frequency};

fn optional_channel_enabled(channel: Channel, p: &ParameterSet) -> Option<bool> {
    match channel {
        Channel::Amplitude => Some(p.toggles.amplitude_noise),
        Channel::Asymmetry => Some(p.toggles.ccw_noise),
        Channel::SymmetricFluctuation => Some(p.toggles.symmetric_fluctuation),
        Channel::OffResonant => Some(p.toggles.off_resonant),
        _ => None,
    }
}

#[test]
fn random_valid_sets_give_aligned_non_negative_curves() {
    let grid = FrequencyGrid::default();
    let mut rng = common::rng(7);

    for _ in 0..200 {
        let p = common::random_params(&mut rng);
        let b = evaluate(&grid, &p).unwrap();

        assert_eq!(b.frequencies, grid.values());
        assert_eq!(b.channels.len(), Channel::ALL.len());
        assert_eq!(b.total.len(), grid.len());

        for curve in &b.channels {
            assert_eq!(curve.values.len(), grid.len());
            assert!(curve.values.iter().all(|v| v.is_finite() && *v >= 0.0), "{:?}", curve.channel);

            if optional_channel_enabled(curve.channel, &p) == Some(false) {
                assert!(curve.values.iter().all(|&v| v == 0.0), "{:?}", curve.channel);
            }
        }

        for i in 0..grid.len() {
            let sum: f64 = b.channels.iter().map(|c| c.values[i]).sum();
            assert!((sum - b.total[i]).abs() <= 1e-12 * b.total[i].max(1e-300));
        }
    }
}

#[test]
fn search_result_is_always_a_grid_point() {
    let grid = FrequencyGrid::default();
    let mut rng = common::rng(11);

    for _ in 0..100 {
        let mut p = common::random_params(&mut rng);
        p.optimize = OptimizeMode::Search;
        let b = evaluate(&grid, &p).unwrap();
        let opt = optimize_frequency(&b, &p).unwrap();
        let idx = opt.index.unwrap();
        assert_eq!(grid.values()[idx], opt.frequency);
        assert!(b.total.iter().all(|&t| t >= opt.infidelity));
    }
}

#[test]
fn chip_com_search_has_interior_minimum() {
    let grid = FrequencyGrid::default();
    let p = ParameterSet::default();
    let b = evaluate(&grid, &p).unwrap();

    let heating = b.channel(Channel::Heating);
    let decoherence = b.channel(Channel::Decoherence);
    assert!(heating.windows(2).all(|w| w[1] < w[0]));
    assert!(decoherence.windows(2).all(|w| w[1] > w[0]));

    let point = operating_point(&b, &p).unwrap();
    assert!(point.frequency > 100.0 * KHZ && point.frequency < 500.0 * KHZ);
    assert!(point.frequency > grid.first() && point.frequency < grid.last());
}

#[test]
fn fixed_mode_at_first_grid_point_returns_first_total() {
    let grid = FrequencyGrid::default();
    let mut p = ParameterSet::default();
    p.optimize = OptimizeMode::Fixed;
    p.fixed_frequency = 100;

    let b = evaluate(&grid, &p).unwrap();
    let point = operating_point(&b, &p).unwrap();
    assert_eq!(point.frequency, grid.first());
    assert_eq!(point.infidelity, b.total[0]);
}

#[test]
fn fixed_mode_interpolates_between_neighbours() {
    let grid = FrequencyGrid::default();
    let b = evaluate(&grid, &ParameterSet::default()).unwrap();
    let xs = grid.values();

    for i in [0usize, 17, 50, 98] {
        let mid = 0.5 * (xs[i] + xs[i + 1]);
        let opt = evaluate_at(xs, &b.total, mid).unwrap();
        let expected = 0.5 * (b.total[i] + b.total[i + 1]);
        assert!((opt.infidelity - expected).abs() <= 1e-12 * expected);
        assert_eq!(evaluate_at(xs, &b.total, xs[i]).unwrap().infidelity, b.total[i]);
        assert_eq!(evaluate_at(xs, &b.total, xs[i + 1]).unwrap().infidelity, b.total[i + 1]);
    }
}

#[test]
fn fixed_target_outside_grid_is_a_configuration_error() {
    let grid = FrequencyGrid::linear_khz(200.0, 400.0, 50).unwrap();
    let mut p = ParameterSet::default();
    p.optimize = OptimizeMode::Fixed;
    p.fixed_frequency = 450;

    let b = evaluate(&grid, &p).unwrap();
    let err = operating_point(&b, &p).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn degenerate_grid_is_a_computation_error() {
    let err = FrequencyGrid::linear_khz(100.0, 500.0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Computation);
}

#[test]
fn out_of_range_parameters_are_rejected_not_clamped() {
    let grid = FrequencyGrid::default();
    let mut p = ParameterSet::default();
    p.voltage_noise_psd = -100;
    let err = evaluate(&grid, &p).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
