//! Cubic interpolation with configurable track endings.

use crate::util::Chrono;

use super::{Ending, Interpolator, Samples};

/// Catmull-Rom style cubic through the samples.
///
/// Tangents come from the samples on either side of the interval. At the
/// ends of the track the missing neighbour is synthesized according to
/// the interpolant's [`InterpolantSettings`](super::InterpolantSettings).
/// Neighbour weights are computed once per interval change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cubic {
    weight_prev: f64,
    weight_next: f64,
    offset_prev: usize,
    offset_next: usize,
}

impl Interpolator for Cubic {
    fn interval_changed(&mut self, samples: &Samples<'_>, i1: usize, t0: Chrono, t1: Chrono) {
        let times = samples.times;
        let len = times.len();

        // A neighbour at the same time as the interval end is a jump, not a
        // tangent source; treat that side as a track end.
        let prev = i1
            .checked_sub(2)
            .map(|i| (i, times[i]))
            .filter(|&(_, t)| t < t0);
        let (i_prev, t_prev) = match prev {
            Some(prev) => prev,
            None => match samples.settings.ending_start {
                Ending::ZeroSlope => (i1, 2.0 * t0 - t1),
                Ending::WrapAround if times[len - 2] < times[len - 1] => {
                    let i = len - 2;
                    (i, t0 + times[i] - times[i + 1])
                }
                Ending::WrapAround | Ending::ZeroCurvature => (i1, t1),
            },
        };

        let next = times
            .get(i1 + 1)
            .map(|&t| (i1 + 1, t))
            .filter(|&(_, t)| t > t1);
        let (i_next, t_next) = match next {
            Some(next) => next,
            None => match samples.settings.ending_end {
                Ending::ZeroSlope => (i1, 2.0 * t1 - t0),
                Ending::WrapAround if times[0] < times[1] => (1, t1 + times[1] - times[0]),
                Ending::WrapAround | Ending::ZeroCurvature => (i1 - 1, t0),
            },
        };

        let half_dt = (t1 - t0) * 0.5;
        self.weight_prev = half_dt / (t0 - t_prev);
        self.weight_next = half_dt / (t_next - t1);
        self.offset_prev = i_prev * samples.value_size;
        self.offset_next = i_next * samples.value_size;
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
        let stride = samples.value_size;
        let values = samples.values;
        let o1 = i1 * stride;
        let o0 = o1 - stride;
        let op = self.offset_prev;
        let on = self.offset_next;
        let wp = self.weight_prev;
        let wn = self.weight_next;

        let p = (t - t0) / (t1 - t0);
        let pp = p * p;
        let ppp = pp * p;

        let sp = -wp * ppp + 2.0 * wp * pp - wp * p;
        let s0 = (1.0 + wp) * ppp + (-1.5 - 2.0 * wp) * pp + (-0.5 + wp) * p + 1.0;
        let s1 = (-1.0 - wn) * ppp + (1.5 + wn) * pp + 0.5 * p;
        let sn = wn * ppp - wn * pp;

        for (i, out) in result.iter_mut().enumerate() {
            *out = sp * values[op + i] + s0 * values[o0 + i] + s1 * values[o1 + i] + sn * values[on + i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::{InterpolantSettings, Interpolant};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_cubic_hits_samples() {
        let times = vec![0.0, 1.0, 2.0, 3.0];
        let values = vec![0.0, 1.0, 4.0, 9.0];
        let mut interp = Interpolant::with_interpolator(times, values, 1, Cubic::default()).unwrap();
        for (t, v) in [(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)] {
            assert!(close(interp.evaluate(t).unwrap()[0], v), "t = {t}");
        }
    }

    #[test]
    fn test_cubic_reproduces_linear_data() {
        let times = vec![0.0, 1.0, 2.0, 3.0];
        let values = vec![0.0, 2.0, 4.0, 6.0];
        let mut interp = Interpolant::with_interpolator(times, values, 1, Cubic::default()).unwrap();
        // inner interval: both neighbours are real samples
        assert!(close(interp.evaluate(1.5).unwrap()[0], 3.0));
        assert!(close(interp.evaluate(1.25).unwrap()[0], 2.5));
    }

    #[test]
    fn test_cubic_endings_differ() {
        let times = vec![0.0, 1.0, 2.0];
        let values = vec![0.0, 1.0, 0.0];
        let mut curvature = Interpolant::with_interpolator(times.clone(), values.clone(), 1, Cubic::default()).unwrap();
        let mut slope = Interpolant::with_interpolator(times, values, 1, Cubic::default())
            .unwrap()
            .with_settings(InterpolantSettings::uniform(Ending::ZeroSlope));

        let a = curvature.evaluate(0.5).unwrap()[0];
        let b = slope.evaluate(0.5).unwrap()[0];
        assert!(!close(a, b));
        assert!(a > 0.0 && a < 1.0);
    }

    #[test]
    fn test_cubic_wrap_around() {
        let times = vec![0.0, 1.0, 2.0];
        let values = vec![0.0, 1.0, 0.0];
        let mut interp = Interpolant::with_interpolator(times, values, 1, Cubic::default())
            .unwrap()
            .with_settings(InterpolantSettings::uniform(Ending::WrapAround));
        // looping closed curve: symmetric around the middle sample
        let left = interp.evaluate(0.5).unwrap()[0];
        let right = interp.evaluate(1.5).unwrap()[0];
        assert!(close(left, right));
    }

    #[test]
    fn test_cubic_duplicate_times_stay_finite() {
        let times = vec![0.0, 1.0, 1.0, 2.0, 3.0];
        let values = vec![0.0, 1.0, 5.0, 6.0, 7.0];
        for ending in [Ending::ZeroCurvature, Ending::ZeroSlope, Ending::WrapAround] {
            let mut interp = Interpolant::with_interpolator(times.clone(), values.clone(), 1, Cubic::default())
                .unwrap()
                .with_settings(InterpolantSettings::uniform(ending));
            for t in [0.25, 0.5, 0.99, 1.0, 1.5, 1.99, 2.5] {
                let v = interp.evaluate(t).unwrap()[0];
                assert!(v.is_finite(), "{ending:?} at {t} = {v}");
            }
            // the jump lands exactly on the second sample at time 1
            assert!(close(interp.evaluate(1.0).unwrap()[0], 5.0));
            assert!(close(interp.evaluate(2.0).unwrap()[0], 6.0));
        }

        // duplicated end samples under wrap-around
        let mut interp = Interpolant::with_interpolator(
            vec![0.0, 0.0, 1.0, 2.0, 2.0],
            vec![3.0, 0.0, 1.0, 4.0, 9.0],
            1,
            Cubic::default(),
        )
        .unwrap()
        .with_settings(InterpolantSettings::uniform(Ending::WrapAround));
        for t in [0.0, 0.5, 1.5] {
            assert!(interp.evaluate(t).unwrap()[0].is_finite(), "t = {t}");
        }
    }
}
