// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triescope Timing: host-agnostic animation time primitives.
//!
//! Nothing in this crate reads a clock. Hosts pass the current time as a
//! [`Duration`](core::time::Duration) measured from any epoch they like
//! (`performance.now()`, an `Instant` captured at startup, a test counter),
//! and every query is a pure function of that value. This keeps animation
//! deterministic in tests and lets the same code run in a browser frame
//! loop or in a headless renderer.
//!
//! - [`Easing`]: easing curves mapping linear progress to eased progress.
//! - [`Lerp`]: linear interpolation for scalars, points, vectors, colors.
//! - [`Transition`]: a time box (`start`, `duration`, `easing`).
//! - [`Animated`]: a property that moves toward a target over a
//!   transition. Starting a new transition begins from the value observed
//!   at that instant, so it interrupts and supersedes the previous one.
//! - [`TimerQueue`]: deadline-ordered queue for "do this when the
//!   animation ends" bookkeeping, such as removing faded-out elements.
//!
//! ```
//! use core::time::Duration;
//! use triescope_timing::{Animated, Easing};
//!
//! let ms = Duration::from_millis;
//! let mut opacity = Animated::new(0.0_f64);
//! opacity.animate_to(1.0, ms(0), ms(100), Easing::Linear);
//! assert_eq!(opacity.value(ms(50)), 0.5);
//!
//! // Interrupt halfway: the new transition starts from 0.5.
//! opacity.animate_to(0.0, ms(50), ms(100), Easing::Linear);
//! assert_eq!(opacity.value(ms(100)), 0.25);
//! assert!(opacity.is_settled(ms(150)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animated;
mod easing;
mod queue;

pub use animated::{Animated, Transition};
pub use easing::{Easing, Lerp};
pub use queue::TimerQueue;
