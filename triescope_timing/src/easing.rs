// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use peniko::Color;

/// Easing curve applied to transition progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow end.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    ///
    /// Inputs outside `[0, 1]` are clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// Linear interpolation between two values.
pub trait Lerp: Copy {
    /// Returns the value `t` of the way from `self` to `to`.
    ///
    /// `t == 0` yields `self` and `t == 1` yields `to`.
    #[must_use]
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for f32 {
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "interpolation factors are in [0, 1]; f32 precision is enough"
    )]
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t as f32
    }
}

impl Lerp for Point {
    #[inline]
    fn lerp(self, to: Self, t: f64) -> Self {
        Self::lerp(self, to, t)
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp(self, to: Self, t: f64) -> Self {
        Self::lerp(self, to, t)
    }
}

impl Lerp for Color {
    /// Interpolates premultiplication-free sRGB components channel by channel.
    fn lerp(self, to: Self, t: f64) -> Self {
        let mut components = self.components;
        for (c, target) in components.iter_mut().zip(to.components) {
            *c = Lerp::lerp(*c, target, t);
        }
        Self::new(components)
    }
}
