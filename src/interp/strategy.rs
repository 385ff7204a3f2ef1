//! Interpolation strategies.
//!
//! The interpolant finds the interval; an [`Interpolator`] turns the
//! interval into a value. [`Discrete`] and [`Linear`] live here, the
//! stateful strategies have their own modules.

use crate::util::{Chrono, Result};

use super::InterpolantSettings;

/// Read-only view of an interpolant's samples, handed to strategies.
#[derive(Clone, Copy, Debug)]
pub struct Samples<'a> {
    /// Sample times, non-decreasing
    pub times: &'a [Chrono],
    /// Flat sample values, `times.len() * value_size` long
    pub values: &'a [f64],
    /// Scalars per sample
    pub value_size: usize,
    /// Settings of the owning interpolant
    pub settings: &'a InterpolantSettings,
}

impl<'a> Samples<'a> {
    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Value record of sample `index`.
    #[inline]
    pub fn value(&self, index: usize) -> &'a [f64] {
        let offset = index * self.value_size;
        &self.values[offset..offset + self.value_size]
    }

    /// Copy the value record of sample `index` into `result`.
    #[inline]
    pub fn copy_value(&self, index: usize, result: &mut [f64]) {
        result.copy_from_slice(self.value(index));
    }
}

/// Produces a value for a located interval `[t0, t1)` whose upper sample is `i1`.
///
/// `result` always has exactly `value_size` elements. Every method except
/// [`interpolate`](Self::interpolate) has a default.
pub trait Interpolator: Send {
    /// Reject value sizes this strategy cannot handle.
    fn validate(&self, _value_size: usize) -> Result<()> {
        Ok(())
    }

    /// Called once each time the interpolant moves to a different interval,
    /// before [`interpolate`](Self::interpolate).
    fn interval_changed(&mut self, _samples: &Samples<'_>, _i1: usize, _t0: Chrono, _t1: Chrono) {}

    /// Write the value at time `t` (with `t0 <= t < t1`) into `result`.
    fn interpolate(
        &mut self,
        samples: &Samples<'_>,
        i1: usize,
        t0: Chrono,
        t: Chrono,
        t1: Chrono,
        result: &mut [f64],
    );

    /// Value for a time before the first sample. Holds sample 0.
    fn before_start(&mut self, samples: &Samples<'_>, _t: Chrono, result: &mut [f64]) {
        samples.copy_value(0, result);
    }

    /// Value for a time at or after the last sample. Holds the last sample.
    fn after_end(&mut self, samples: &Samples<'_>, _t: Chrono, result: &mut [f64]) {
        samples.copy_value(samples.len() - 1, result);
    }
}

impl<I: Interpolator + ?Sized> Interpolator for Box<I> {
    fn validate(&self, value_size: usize) -> Result<()> {
        (**self).validate(value_size)
    }

    fn interval_changed(&mut self, samples: &Samples<'_>, i1: usize, t0: Chrono, t1: Chrono) {
        (**self).interval_changed(samples, i1, t0, t1)
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
        (**self).interpolate(samples, i1, t0, t, t1, result)
    }

    fn before_start(&mut self, samples: &Samples<'_>, t: Chrono, result: &mut [f64]) {
        (**self).before_start(samples, t, result)
    }

    fn after_end(&mut self, samples: &Samples<'_>, t: Chrono, result: &mut [f64]) {
        (**self).after_end(samples, t, result)
    }
}

/// Step interpolation: hold the sample that opens the interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Discrete;

impl Interpolator for Discrete {
    #[inline]
    fn interpolate(
        &mut self,
        samples: &Samples<'_>,
        i1: usize,
        _t0: Chrono,
        _t: Chrono,
        _t1: Chrono,
        result: &mut [f64],
    ) {
        samples.copy_value(i1 - 1, result);
    }
}

/// Componentwise linear interpolation between the two bracketing samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Linear;

impl Interpolator for Linear {
    fn interpolate(
        &mut self,
        samples: &Samples<'_>,
        i1: usize,
        t0: Chrono,
        t: Chrono,
        t1: Chrono,
        result: &mut [f64],
    ) {
        let v0 = samples.value(i1 - 1);
        let v1 = samples.value(i1);
        let weight1 = (t - t0) / (t1 - t0);
        let weight0 = 1.0 - weight1;
        for ((out, a), b) in result.iter_mut().zip(v0).zip(v1) {
            *out = a * weight0 + b * weight1;
        }
    }
}
