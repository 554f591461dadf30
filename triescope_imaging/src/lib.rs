// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triescope Imaging: the drawing vocabulary between a scene and its outputs.
//!
//! A scene describes a frame as a flat stream of operations against a
//! backend. Backends own resources and decide what the operations become:
//! SVG markup, Canvas 2D calls, or a plain recording in tests.
//!
//! - Resources are referred to by small copyable handles, [`PathId`] and
//!   [`PaintId`], created and destroyed through [`ResourceBackend`].
//! - [`StateOp`] changes the current paint, stroke, or layer stack.
//!   [`DrawOp`] draws with that state. [`ImagingOp`] holds either, for
//!   backends that record.
//! - A [`LayerOp`] scopes a rectangular clip and a group opacity. Pushes
//!   and pops must balance.
//! - [`ImagingBackendExt`] wraps a closure in a layer.
//!
//! Tree diagrams are mostly circles, curves, and short labels, so circles
//! and single-line text are draw ops of their own rather than flattened
//! paths. Geometry is stored in `f32`.
//!
//! ```
//! use peniko::{Brush, Color};
//! use triescope_imaging::{
//!     DrawOp, ImagingBackend, ImagingBackendExt, ImagingOp, PaintDesc, PaintId, PathDesc,
//!     PathId, ResourceBackend, StateOp,
//! };
//!
//! #[derive(Default)]
//! struct Recorder {
//!     paints: u32,
//!     ops: Vec<ImagingOp>,
//! }
//!
//! impl ResourceBackend for Recorder {
//!     fn create_path(&mut self, _desc: PathDesc) -> PathId {
//!         PathId(0)
//!     }
//!     fn destroy_path(&mut self, _id: PathId) {}
//!     fn create_paint(&mut self, _desc: PaintDesc) -> PaintId {
//!         self.paints += 1;
//!         PaintId(self.paints - 1)
//!     }
//!     fn destroy_paint(&mut self, _id: PaintId) {}
//! }
//!
//! impl ImagingBackend for Recorder {
//!     fn state(&mut self, op: StateOp) {
//!         self.ops.push(ImagingOp::State(op));
//!     }
//!     fn draw(&mut self, op: DrawOp) {
//!         self.ops.push(ImagingOp::Draw(op));
//!     }
//! }
//!
//! let mut rec = Recorder::default();
//! let white = rec.create_paint(PaintDesc {
//!     brush: Brush::Solid(Color::WHITE),
//! });
//! rec.with_opacity_layer(0.5, |b| {
//!     b.state(StateOp::SetPaint(white));
//!     b.draw(DrawOp::FillCircle { cx: 10.0, cy: 10.0, r: 4.0 });
//! });
//! assert_eq!(rec.ops.len(), 4);
//! ```

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;

use kurbo::{BezPath, PathEl, Stroke};
use peniko::Brush;

/// Handle to a path owned by a backend.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Handle to a paint owned by a backend.
///
/// One paint may serve any number of draws.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(pub u32);

/// Axis-aligned rectangle, `x0 <= x1` and `y0 <= y1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl RectF {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// `x1 - x0`.
    #[inline]
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    /// `y1 - y0`.
    #[inline]
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }

    /// Narrows a [`kurbo::Rect`].
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "diagram coordinates fit comfortably in f32"
    )]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        Self::new(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.x1 as f32,
            rect.y1 as f32,
        )
    }
}

/// Effects of one pushed layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerOp {
    /// Draws inside the layer are clipped to this rectangle.
    pub clip: Option<RectF>,
    /// The layer's contents are composited as a group at this opacity.
    pub opacity: Option<f32>,
}

impl LayerOp {
    /// Returns `true` if pushing this layer changes nothing.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.clip.is_none() && self.opacity.is_none()
    }
}

/// Changes to the current drawing state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Opens a layer. Must be matched by [`StateOp::PopLayer`].
    PushLayer(LayerOp),
    /// Closes the innermost open layer.
    PopLayer,
    /// Paint used by subsequent draws.
    SetPaint(PaintId),
    /// Stroke used by subsequent stroking draws.
    SetStroke(Stroke),
}

/// Where a [`TextRun`]'s `x` sits along the text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Left end.
    Start,
    /// Center.
    #[default]
    Middle,
    /// Right end.
    End,
}

/// One line of text filled with the current paint.
///
/// `y` is the vertical middle of the line, which centers labels inside
/// shapes without font metrics. Fonts and shaping belong to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Content.
    pub text: Arc<str>,
    /// Anchor point, horizontally.
    pub x: f32,
    /// Vertical middle of the line.
    pub y: f32,
    /// Font size.
    pub size: f32,
    /// How the text is aligned on `x`.
    pub anchor: TextAnchor,
}

/// Operations that draw with the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fills a path.
    FillPath(PathId),
    /// Strokes a path.
    StrokePath(PathId),
    /// Fills the circle of radius `r` centered on `(cx, cy)`.
    FillCircle {
        /// Center, horizontally.
        cx: f32,
        /// Center, vertically.
        cy: f32,
        /// Radius.
        r: f32,
    },
    /// Strokes the circle of radius `r` centered on `(cx, cy)`.
    StrokeCircle {
        /// Center, horizontally.
        cx: f32,
        /// Center, vertically.
        cy: f32,
        /// Radius.
        r: f32,
    },
    /// Fills a line of text.
    Text(TextRun),
}

/// Either kind of operation, as recorded by a backend.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// See [`StateOp`].
    State(StateOp),
    /// See [`DrawOp`].
    Draw(DrawOp),
}

/// Path geometry handed to [`ResourceBackend::create_path`].
#[derive(Clone, Debug)]
pub struct PathDesc {
    /// Segments in drawing order.
    pub commands: Box<[PathCmd]>,
}

impl PathDesc {
    /// Narrows a kurbo path segment by segment.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "diagram coordinates fit comfortably in f32"
    )]
    pub fn from_bez_path(path: &BezPath) -> Self {
        let narrow = |p: kurbo::Point| [p.x as f32, p.y as f32];
        let commands = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathCmd::MoveTo(narrow(p)),
                PathEl::LineTo(p) => PathCmd::LineTo(narrow(p)),
                PathEl::QuadTo(c, p) => PathCmd::QuadTo(narrow(c), narrow(p)),
                PathEl::CurveTo(c1, c2, p) => PathCmd::CurveTo(narrow(c1), narrow(c2), narrow(p)),
                PathEl::ClosePath => PathCmd::Close,
            })
            .collect();
        Self { commands }
    }
}

/// One path segment. Points are `[x, y]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCmd {
    /// Starts a subpath at a point.
    MoveTo([f32; 2]),
    /// Straight line to a point.
    LineTo([f32; 2]),
    /// Quadratic curve through one control point.
    QuadTo([f32; 2], [f32; 2]),
    /// Cubic curve through two control points.
    CurveTo([f32; 2], [f32; 2], [f32; 2]),
    /// Closes the subpath.
    Close,
}

/// Paint handed to [`ResourceBackend::create_paint`].
#[derive(Clone, Debug)]
pub struct PaintDesc {
    /// What to fill or stroke with.
    pub brush: Brush,
}

/// Creation and release of backend resources.
///
/// A handle stays valid, and keeps naming the same resource, until it is
/// destroyed.
pub trait ResourceBackend {
    /// Stores a path.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Releases a path.
    fn destroy_path(&mut self, id: PathId);
    /// Stores a paint.
    fn create_paint(&mut self, desc: PaintDesc) -> PaintId;
    /// Releases a paint.
    fn destroy_paint(&mut self, id: PaintId);
}

/// A consumer of imaging operations.
pub trait ImagingBackend: ResourceBackend {
    /// Applies a state change.
    fn state(&mut self, op: StateOp);

    /// Draws with the current state.
    fn draw(&mut self, op: DrawOp);
}

/// Closure-scoped layers for any [`ImagingBackend`].
///
/// Kept apart from [`ImagingBackend`] so the latter stays usable as
/// `dyn ImagingBackend`.
pub trait ImagingBackendExt: ImagingBackend {
    /// Runs `f` between a push of `op` and the matching pop.
    ///
    /// A panic in `f` leaves the layer open.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.state(StateOp::PushLayer(op));
        let out = f(self);
        self.state(StateOp::PopLayer);
        out
    }

    /// [`with_layer`](Self::with_layer) with only a clip.
    #[inline]
    fn with_clip_rect<R>(&mut self, clip: RectF, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(
            LayerOp {
                clip: Some(clip),
                opacity: None,
            },
            f,
        )
    }

    /// [`with_layer`](Self::with_layer) with only a group opacity.
    #[inline]
    fn with_opacity_layer<R>(&mut self, opacity: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(
            LayerOp {
                clip: None,
                opacity: Some(opacity),
            },
            f,
        )
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}
