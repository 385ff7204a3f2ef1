//! Spherical interpolation of rotation tracks.

use crate::util::{Chrono, DQuat, Error, Result};

use super::{Interpolator, Samples};

/// Slerp between quaternion samples stored as `(x, y, z, w)`.
///
/// The value size must be a multiple of 4; each group of four scalars is
/// interpolated as its own quaternion, always along the shorter arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuaternionSlerp;

impl Interpolator for QuaternionSlerp {
    fn validate(&self, value_size: usize) -> Result<()> {
        if value_size % 4 != 0 {
            return Err(Error::InvalidShape {
                expected: 4,
                actual: value_size,
            });
        }
        Ok(())
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
        let alpha = (t - t0) / (t1 - t0);
        let from = samples.value(i1 - 1).chunks_exact(4);
        let to = samples.value(i1).chunks_exact(4);
        for ((out, a), b) in result.chunks_exact_mut(4).zip(from).zip(to) {
            let q = DQuat::from_slice(a).slerp(DQuat::from_slice(b), alpha);
            q.write_to_slice(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Interpolant;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rejects_non_quaternion_width() {
        let err = Interpolant::with_interpolator(vec![0.0], vec![0.0; 3], 3, QuaternionSlerp).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { expected: 4, actual: 3 }));
    }

    #[test]
    fn test_slerp_halfway() {
        let a = DQuat::IDENTITY;
        let b = DQuat::from_rotation_z(FRAC_PI_2);
        let mut values = a.to_array().to_vec();
        values.extend(b.to_array());

        let mut interp = Interpolant::with_interpolator(vec![0.0, 1.0], values, 4, QuaternionSlerp).unwrap();
        let out = DQuat::from_slice(interp.evaluate(0.5).unwrap());
        let expected = DQuat::from_rotation_z(FRAC_PI_2 / 2.0);
        assert!(out.abs_diff_eq(expected, 1e-9));

        // boundaries still hold the raw samples
        assert_eq!(interp.evaluate(4.0).unwrap(), &b.to_array());
    }
}
