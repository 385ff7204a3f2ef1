//! Cached interval search over sampled tracks.

use std::fmt;
use std::sync::Arc;

use crate::util::{Chrono, Error, Result};

use super::{Discrete, InterpolantSettings, Interpolator, Samples};

/// Time of sample `index`, or `None` past either end.
#[inline]
fn time_at(times: &[Chrono], index: usize) -> Option<Chrono> {
    times.get(index).copied()
}

/// Time of the sample before `index`, or `None` when `index` is 0.
#[inline]
fn time_before(times: &[Chrono], index: usize) -> Option<Chrono> {
    index.checked_sub(1).and_then(|i| time_at(times, i))
}

/// `t < bound`; false for a missing bound.
#[inline]
fn is_before(t: Chrono, bound: Option<Chrono>) -> bool {
    matches!(bound, Some(b) if t < b)
}

/// `t >= bound`; false for a missing bound.
#[inline]
fn is_at_or_after(t: Chrono, bound: Option<Chrono>) -> bool {
    matches!(bound, Some(b) if t >= b)
}

/// Interpolant over `times.len()` samples of `value_size` scalars each.
///
/// `evaluate` locates the half-open interval `[t0, t1)` that contains the
/// query time and hands it to the [`Interpolator`]. The upper index of the
/// last interval is cached: queries that stay in it skip the search,
/// nearby queries are found by a short linear scan, and only far jumps
/// fall back to binary search. Times outside the samples hold the first
/// or last sample.
///
/// The cache is an optimization only and is not part of the interpolant's
/// value. Each playback cursor should own its own interpolant; the sample
/// arrays themselves are shared cheaply through `Arc`.
pub struct Interpolant<I = Discrete> {
    times: Arc<[Chrono]>,
    values: Arc<[f64]>,
    value_size: usize,
    settings: InterpolantSettings,
    interpolator: I,
    result: Vec<f64>,
    cached_index: usize,
}

impl Interpolant<Discrete> {
    /// Step interpolant holding the previous sample.
    pub fn new(
        times: impl Into<Arc<[Chrono]>>,
        values: impl Into<Arc<[f64]>>,
        value_size: usize,
    ) -> Result<Self> {
        Self::with_interpolator(times, values, value_size, Discrete)
    }
}

impl<I: Interpolator> Interpolant<I> {
    /// Interpolant using a custom strategy.
    ///
    /// Fails if `value_size` is 0, if `values` does not hold exactly one
    /// record per time, if times decrease or contain NaN, or if the
    /// strategy rejects the value size.
    pub fn with_interpolator(
        times: impl Into<Arc<[Chrono]>>,
        values: impl Into<Arc<[f64]>>,
        value_size: usize,
        interpolator: I,
    ) -> Result<Self> {
        let times = times.into();
        let values = values.into();

        if value_size < 1 {
            return Err(Error::invalid("value size must be at least 1"));
        }
        let expected = times
            .len()
            .checked_mul(value_size)
            .ok_or_else(|| Error::invalid("sample count overflows"))?;
        if values.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        if let Some(index) = times.iter().position(|t| t.is_nan()) {
            return Err(Error::UnsortedTimes { index });
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::UnsortedTimes { index: i + 1 });
        }
        interpolator.validate(value_size)?;

        tracing::debug!(samples = times.len(), value_size, "created interpolant");
        Ok(Self {
            times,
            values,
            value_size,
            settings: InterpolantSettings::default(),
            interpolator,
            result: vec![0.0; value_size],
            cached_index: 0,
        })
    }

    /// Builder-style settings override.
    pub fn with_settings(mut self, settings: InterpolantSettings) -> Self {
        self.settings = settings;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn times(&self) -> &[Chrono] {
        &self.times
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn value_size(&self) -> usize {
        self.value_size
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    pub fn settings(&self) -> &InterpolantSettings {
        &self.settings
    }

    /// Replace the settings. Resets the cache so stateful strategies
    /// recompute their interval data under the new settings.
    pub fn set_settings(&mut self, settings: InterpolantSettings) {
        self.settings = settings;
        self.reset_cache();
    }

    #[inline]
    pub fn interpolator(&self) -> &I {
        &self.interpolator
    }

    /// Upper sample index of the last located interval.
    ///
    /// 0 after a before-start query, `len()` after an after-end query.
    #[inline]
    pub fn cached_index(&self) -> usize {
        self.cached_index
    }

    /// Forget the cached interval; the next query searches from the start.
    #[inline]
    pub fn reset_cache(&mut self) {
        self.cached_index = 0;
    }

    /// The result of the last `evaluate` call.
    #[inline]
    pub fn result(&self) -> &[f64] {
        &self.result
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluate the track at `time`.
    ///
    /// The returned slice is the interpolant's reused result buffer and is
    /// overwritten by the next call.
    pub fn evaluate(&mut self, time: Chrono) -> Result<&[f64]> {
        if self.times.is_empty() {
            return Err(Error::NoSamples);
        }

        let times: &[Chrono] = &self.times;
        let samples = Samples {
            times,
            values: &self.values,
            value_size: self.value_size,
            settings: &self.settings,
        };

        let mut i1 = self.cached_index;
        let mut t1 = time_at(times, i1);
        let mut t0 = time_before(times, i1);

        let moved = 'seek: {
            let mut right = times.len();

            'linear_scan: {
                'forward_scan: {
                    if is_before(time, t1) {
                        break 'forward_scan;
                    }
                    let give_up_at = i1 + 2;
                    loop {
                        if t1.is_none() {
                            if is_before(time, t0) {
                                break 'forward_scan;
                            }
                            self.cached_index = times.len();
                            tracing::trace!(time, "after end");
                            self.interpolator.after_end(&samples, time, &mut self.result);
                            return Ok(&self.result);
                        }
                        if i1 == give_up_at {
                            break;
                        }
                        t0 = t1;
                        i1 += 1;
                        t1 = time_at(times, i1);
                        if is_before(time, t1) {
                            break 'seek true;
                        }
                    }
                    // binary search on the right of the cache
                    break 'linear_scan;
                }

                if !is_at_or_after(time, t0) {
                    // Re-check against the second sample first, so a jump back
                    // to the opening interval does not scan down from the cache.
                    let t1_global = time_at(times, 1);
                    if is_before(time, t1_global) {
                        i1 = 2;
                        t0 = t1_global;
                    }

                    let give_up_at = i1.saturating_sub(2);
                    loop {
                        if t0.is_none() {
                            self.cached_index = 0;
                            tracing::trace!(time, "before start");
                            self.interpolator.before_start(&samples, time, &mut self.result);
                            return Ok(&self.result);
                        }
                        if i1 == give_up_at {
                            break;
                        }
                        t1 = t0;
                        i1 -= 1;
                        t0 = time_before(times, i1);
                        if is_at_or_after(time, t0) {
                            break 'seek true;
                        }
                    }
                    // binary search on the left of the cache
                    right = i1;
                    i1 = 0;
                    break 'linear_scan;
                }

                // still inside the cached interval
                break 'seek false;
            }

            tracing::trace!(time, lo = i1, hi = right, "binary search");
            while i1 < right {
                let mid = (i1 + right) >> 1;
                if time < times[mid] {
                    right = mid;
                } else {
                    i1 = mid + 1;
                }
            }

            t1 = time_at(times, i1);
            t0 = time_before(times, i1);

            if t0.is_none() {
                self.cached_index = 0;
                self.interpolator.before_start(&samples, time, &mut self.result);
                return Ok(&self.result);
            }
            if t1.is_none() {
                self.cached_index = times.len();
                self.interpolator.after_end(&samples, time, &mut self.result);
                return Ok(&self.result);
            }
            true
        };

        let (Some(t0), Some(t1)) = (t0, t1) else {
            return Err(Error::other("interval search ended without bounds"));
        };

        if moved {
            self.cached_index = i1;
            self.interpolator.interval_changed(&samples, i1, t0, t1);
        }
        self.interpolator
            .interpolate(&samples, i1, t0, time, t1, &mut self.result);
        Ok(&self.result)
    }
}

impl<I: Clone> Clone for Interpolant<I> {
    fn clone(&self) -> Self {
        Self {
            times: Arc::clone(&self.times),
            values: Arc::clone(&self.values),
            value_size: self.value_size,
            settings: self.settings,
            interpolator: self.interpolator.clone(),
            result: self.result.clone(),
            cached_index: self.cached_index,
        }
    }
}

impl<I> fmt::Debug for Interpolant<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolant")
            .field("samples", &self.times.len())
            .field("value_size", &self.value_size)
            .field("settings", &self.settings)
            .field("cached_index", &self.cached_index)
            .finish()
    }
}
