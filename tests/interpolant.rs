//! Integration tests for interval search and strategy dispatch.

use std::io::Write;

use scene_numeric::interp::Samples;
use scene_numeric::prelude::*;

use tempfile::NamedTempFile;

/// Linear strategy that counts interval changes.
#[derive(Default)]
struct Counting {
    changes: usize,
    last_interval: Option<(usize, f64, f64)>,
}

impl Interpolator for Counting {
    fn interval_changed(&mut self, _samples: &Samples<'_>, i1: usize, t0: Chrono, t1: Chrono) {
        self.changes += 1;
        self.last_interval = Some((i1, t0, t1));
    }

    fn interpolate(
        &mut self,
        samples: &Samples<'_>,
        i1: usize,
        t0: Chrono,
        t: Chrono,
        t1: Chrono,
        result: &mut [f64],
    ) {
        Linear.interpolate(samples, i1, t0, t, t1, result);
    }
}

/// First index whose time is greater than `t`, i.e. the expected cache slot.
fn oracle_index(times: &[f64], t: f64) -> usize {
    if t < times[0] {
        return 0;
    }
    times.iter().position(|&s| s > t).unwrap_or(times.len())
}

/// Discrete value at `t` by brute force.
fn oracle_value(times: &[f64], values: &[f64], t: f64) -> f64 {
    match oracle_index(times, t) {
        0 => values[0],
        i => values[i - 1],
    }
}

/// Small deterministic generator for query sequences.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[test]
fn test_boundaries_hold_end_samples() {
    let mut interp = Interpolant::new(vec![1.0, 2.0, 4.0], vec![5.0, 6.0, 7.0], 1).unwrap();

    for t in [-100.0, 0.0, 0.999] {
        assert_eq!(interp.evaluate(t).unwrap(), &[5.0]);
        assert_eq!(interp.cached_index(), 0);
    }
    for t in [4.0, 4.5, 1e9, f64::INFINITY] {
        assert_eq!(interp.evaluate(t).unwrap(), &[7.0]);
        assert_eq!(interp.cached_index(), 3);
    }
    assert_eq!(interp.evaluate(f64::NEG_INFINITY).unwrap(), &[5.0]);
}

#[test]
fn test_boundaries_do_not_notify_strategy() {
    let mut interp =
        Interpolant::with_interpolator(vec![0.0, 1.0], vec![0.0, 1.0], 1, Counting::default())
            .unwrap();
    interp.evaluate(-1.0).unwrap();
    interp.evaluate(5.0).unwrap();
    assert_eq!(interp.interpolator().changes, 0);
}

#[test]
fn test_monotonic_sweep_notifies_once_per_interval() {
    let times = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let values = vec![0.0, 10.0, 20.0, 30.0, 40.0];
    let mut interp =
        Interpolant::with_interpolator(times, values, 1, Counting::default()).unwrap();

    let mut t = 0.0;
    while t < 4.0 {
        let expected = t * 10.0;
        let got = interp.evaluate(t).unwrap()[0];
        assert!((got - expected).abs() < 1e-9, "t={t}: {got} != {expected}");
        t += 0.125;
    }
    // four intervals entered in order, each exactly once
    assert_eq!(interp.interpolator().changes, 4);
    assert_eq!(interp.interpolator().last_interval, Some((4, 3.0, 4.0)));
}

#[test]
fn test_repeated_time_is_idempotent() {
    let mut interp = Interpolant::with_interpolator(
        vec![0.0, 2.0, 3.0],
        vec![0.0, 4.0, 5.0],
        1,
        Counting::default(),
    )
    .unwrap();

    let first = interp.evaluate(1.0).unwrap().to_vec();
    let index = interp.cached_index();
    for _ in 0..5 {
        assert_eq!(interp.evaluate(1.0).unwrap(), first.as_slice());
        assert_eq!(interp.cached_index(), index);
    }
    assert_eq!(interp.interpolator().changes, 1);
    assert_eq!(first, vec![2.0]);
}

#[test]
fn test_jump_back_to_opening_interval_three_samples() {
    let mut interp = Interpolant::new(vec![0.0, 1.0, 2.0], vec![10.0, 20.0, 30.0], 1).unwrap();

    assert_eq!(interp.evaluate(1.5).unwrap(), &[20.0]);
    assert_eq!(interp.cached_index(), 2);

    assert_eq!(interp.evaluate(0.5).unwrap(), &[10.0]);
    assert_eq!(interp.cached_index(), 1);

    assert_eq!(interp.evaluate(-0.5).unwrap(), &[10.0]);
    assert_eq!(interp.cached_index(), 0);
}

#[test]
fn test_jump_back_from_after_end_two_samples() {
    let mut interp = Interpolant::new(vec![0.0, 1.0], vec![10.0, 20.0], 1).unwrap();

    assert_eq!(interp.evaluate(2.0).unwrap(), &[20.0]);
    assert_eq!(interp.cached_index(), 2);

    assert_eq!(interp.evaluate(0.5).unwrap(), &[10.0]);
    assert_eq!(interp.cached_index(), 1);

    assert_eq!(interp.evaluate(-1.0).unwrap(), &[10.0]);
    assert_eq!(interp.cached_index(), 0);

    assert_eq!(interp.evaluate(1.0).unwrap(), &[20.0]);
    assert_eq!(interp.cached_index(), 2);
}

#[test]
fn test_random_jumps_match_brute_force() {
    // samples 4k and 4k+1 share a time
    let times: Vec<f64> = (0..40).map(|i| ((i * 3) / 4) as f64 * 0.5).collect();
    let values: Vec<f64> = (0..40).map(|i| (i * i) as f64).collect();
    let mut interp = Interpolant::new(times.clone(), values.clone(), 1).unwrap();

    let mut rng = Lcg(0x5eed);
    let span = times[times.len() - 1] + 4.0;
    for step in 0..2000 {
        let t = rng.next_f64() * span - 2.0;
        let got = interp.evaluate(t).unwrap()[0];
        assert_eq!(got, oracle_value(&times, &values, t), "step {step}, t={t}");
        assert_eq!(interp.cached_index(), oracle_index(&times, t), "step {step}, t={t}");
    }

    // exact sample hits land after the last sample sharing that time
    for &t in times.iter().rev() {
        assert_eq!(interp.evaluate(t).unwrap(), &[oracle_value(&times, &values, t)]);
        assert_eq!(interp.cached_index(), oracle_index(&times, t), "t={t}");
    }
}

#[test]
fn test_small_steps_match_brute_force() {
    let times = vec![0.0, 0.0, 0.25, 0.5, 1.0, 1.0, 1.0, 1.5, 3.0, 3.25, 6.0, 6.0];
    let values: Vec<f64> = (1..=12).map(|v| v as f64).collect();
    let mut interp = Interpolant::new(times.clone(), values.clone(), 1).unwrap();

    let mut rng = Lcg(7);
    let mut t = 3.0;
    for _ in 0..1000 {
        t += (rng.next_f64() - 0.5) * 1.5;
        t = t.clamp(-1.0, 7.0);
        assert_eq!(interp.evaluate(t).unwrap()[0], oracle_value(&times, &values, t), "t={t}");
    }
}

#[test]
fn test_multi_component_records() {
    let mut interp = Interpolant::with_interpolator(
        vec![0.0, 1.0],
        vec![0.0, 0.0, 0.0, 2.0, 4.0, 6.0],
        3,
        Linear,
    )
    .unwrap();
    assert_eq!(interp.evaluate(0.5).unwrap(), &[1.0, 2.0, 3.0]);
    assert_eq!(interp.result(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_settings_change_resets_cache() {
    let mut interp = Interpolant::with_interpolator(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0, 1.0, 4.0, 9.0],
        1,
        Cubic::default(),
    )
    .unwrap();

    interp.evaluate(1.5).unwrap();
    assert_eq!(interp.cached_index(), 2);

    interp.set_settings(InterpolantSettings::uniform(Ending::ZeroSlope));
    assert_eq!(interp.cached_index(), 0);
    assert_eq!(interp.settings().ending_start, Ending::ZeroSlope);

    // endpoint samples are reproduced under any ending
    assert!((interp.evaluate(1.0).unwrap()[0] - 1.0).abs() < 1e-12);
    assert!((interp.evaluate(2.0).unwrap()[0] - 4.0).abs() < 1e-12);
}

#[test]
fn test_track_load_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{ "times": [0, 1, 2], "values": [10, 20, 30], "mode": "linear" }}"#
    )
    .expect("Failed to write track");

    let track = Track::load(file.path()).expect("Failed to load track");
    assert_eq!(track.mode, InterpolationMode::Linear);

    let mut interp = track.interpolant().unwrap();
    assert_eq!(interp.evaluate(0.5).unwrap(), &[15.0]);
    assert_eq!(interp.evaluate(5.0).unwrap(), &[30.0]);
}

#[test]
fn test_track_load_errors() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.json");
    assert!(matches!(Track::load(&missing), Err(Error::Io(_))));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "times": [1, 0], "values": [1, 2] }}"#).unwrap();
    let track = Track::load(file.path()).unwrap();
    assert!(matches!(track.interpolant(), Err(Error::UnsortedTimes { index: 1 })));
}

#[test]
fn test_quaternion_track() {
    let half = std::f64::consts::FRAC_1_SQRT_2;
    let track = Track {
        times: vec![0.0, 1.0],
        values: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, half, half],
        value_size: 4,
        mode: InterpolationMode::Quaternion,
        settings: InterpolantSettings::default(),
    };
    let mut interp = track.interpolant().unwrap();
    let q = interp.evaluate(0.5).unwrap();

    let angle = std::f64::consts::FRAC_PI_8;
    let expected = [0.0, 0.0, angle.sin(), angle.cos()];
    for (got, want) in q.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{q:?}");
    }
}
