// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::easing::{Easing, Lerp};

/// A time box for one interpolation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Time at which the transition begins.
    pub start: Duration,
    /// Length of the transition. Zero completes immediately.
    pub duration: Duration,
    /// Easing applied to progress.
    pub easing: Easing,
}

impl Transition {
    /// Creates a transition starting at `start`.
    #[must_use]
    #[inline]
    pub const fn new(start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    /// Time at which the transition completes.
    #[must_use]
    #[inline]
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// Linear progress at `now`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return if now >= self.start { 1.0 } else { 0.0 };
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress at `now`.
    #[must_use]
    #[inline]
    pub fn eased(&self, now: Duration) -> f64 {
        self.easing.apply(self.progress(now))
    }

    /// Returns `true` once `now` has reached the end.
    #[must_use]
    #[inline]
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }
}

/// A value that may be moving toward a target.
///
/// The value at any instant is a pure function of the time passed in.
/// Calling [`Animated::animate_to`] while a transition is in flight starts
/// the new transition from the value observed at that instant, so the
/// newest request always wins and there is no visible jump.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animated<T> {
    from: T,
    to: T,
    transition: Option<Transition>,
}

impl<T: Lerp> Animated<T> {
    /// A settled value.
    #[must_use]
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            from: value,
            to: value,
            transition: None,
        }
    }

    /// The value at `now`.
    #[must_use]
    pub fn value(&self, now: Duration) -> T {
        match self.transition {
            Some(transition) if !transition.is_finished(now) => {
                self.from.lerp(self.to, transition.eased(now))
            }
            _ => self.to,
        }
    }

    /// The value this property is heading to (or resting at).
    #[must_use]
    #[inline]
    pub fn target(&self) -> T {
        self.to
    }

    /// The in-flight transition, if any was started and not replaced by
    /// [`Animated::set`].
    #[must_use]
    #[inline]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Jumps to `value`, dropping any transition.
    pub fn set(&mut self, value: T) {
        self.from = value;
        self.to = value;
        self.transition = None;
    }

    /// Moves toward `target`, starting from the value observed at `now`.
    pub fn animate_to(&mut self, target: T, now: Duration, duration: Duration, easing: Easing) {
        self.from = self.value(now);
        self.to = target;
        self.transition = Some(Transition::new(now, duration, easing));
    }

    /// Jumps to `from`, then moves toward `target`.
    ///
    /// This is the usual shape of an entering element: appear at a
    /// starting value (for example fully transparent) and animate in.
    pub fn animate_from(
        &mut self,
        from: T,
        target: T,
        now: Duration,
        duration: Duration,
        easing: Easing,
    ) {
        self.set(from);
        self.animate_to(target, now, duration, easing);
    }

    /// Returns `true` if no transition is running at `now`.
    #[must_use]
    pub fn is_settled(&self, now: Duration) -> bool {
        self.transition.is_none_or(|t| t.is_finished(now))
    }
}

impl<T: Lerp + Default> Default for Animated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
