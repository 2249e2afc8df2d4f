use std::cmp::Ordering;

use crate::animation::values::Interpolatable;

/// How a track blends between neighbouring keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Lerp for vectors, shortest-arc slerp for rotations.
    #[default]
    Linear,
    /// Hold the previous key until the next one is reached.
    Step,
}

/// Remembers where the previous lookup landed.
///
/// Stores the index of the first key strictly after the last sampled time.
/// It is only a search hint: a stale cursor never changes the sampled value,
/// it merely falls back to a binary search.
///
/// A cursor belongs to one track. It remembers whether that track's key
/// times are strictly increasing; on unordered keys the hint is never used.
/// Reset it with `KeyframeCursor::default()` after editing the key times.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub next_index: usize,
    ordered: Option<bool>,
}

/// A time-ordered sequence of `(time, value)` keys for one animated channel.
///
/// Times are in milliseconds and expected to be strictly increasing.
/// Malformed data (unsorted or duplicated times, length mismatch between
/// `times` and `values`) is tolerated and sampled with clamping.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), InterpolationMode::Linear)
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[must_use]
    pub fn linear(times: Vec<f32>, values: Vec<T>) -> Self {
        Self::new(times, values, InterpolationMode::Linear)
    }

    /// Number of usable keys (the shorter of `times` and `values`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len().min(self.values.len())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Latest key time, `None` for an empty track.
    #[must_use]
    pub fn end_time(&self) -> Option<f32> {
        self.times[..self.len()].iter().copied().reduce(f32::max)
    }

    /// Samples the track at `time`. Returns `None` when the track has no keys.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let next = self.times[..len].partition_point(|&t| t <= time);
        Some(self.sample_segment(next, time))
    }

    /// Same result as [`sample`](Self::sample), reusing the cursor position
    /// from the previous call so that monotonic playback stays O(1).
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        // On unordered keys several segments can bracket `time`; only the
        // binary search gives the same answer as `sample`.
        let ordered = *cursor
            .ordered
            .get_or_insert_with(|| self.first_unordered_key().is_none());
        let next = ordered
            .then(|| self.locate_near(time, cursor.next_index, len))
            .flatten()
            .unwrap_or_else(|| self.times[..len].partition_point(|&t| t <= time));
        cursor.next_index = next;

        Some(self.sample_segment(next, time))
    }

    /// Index of the first key whose time does not increase over its
    /// predecessor, if any.
    #[must_use]
    pub fn first_unordered_key(&self) -> Option<usize> {
        self.times
            .windows(2)
            .position(|pair| pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater))
            .map(|i| i + 1)
    }

    /// Checks the hint and its successor; sequential playback almost always
    /// lands on one of them.
    fn locate_near(&self, time: f32, hint: usize, len: usize) -> Option<usize> {
        [hint, hint.saturating_add(1)].into_iter().find(|&next| {
            next <= len
                && (next == 0 || self.times[next - 1] <= time)
                && (next == len || self.times[next] > time)
        })
    }

    /// `next` is the index of the first key after `time`.
    fn sample_segment(&self, next: usize, time: f32) -> T {
        let len = self.len();
        if next == 0 {
            return self.values[0];
        }
        if next >= len {
            return self.values[len - 1];
        }

        let prev = next - 1;
        match self.interpolation {
            InterpolationMode::Step => self.values[prev],
            InterpolationMode::Linear => {
                let t0 = self.times[prev];
                let span = self.times[next] - t0;
                let factor = if span > 0.0 {
                    ((time - t0) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                T::interpolate_linear(self.values[prev], self.values[next], factor)
            }
        }
    }
}
