// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output for the Triescope imaging IR.
//!
//! [`SvgBackend`] keeps the resources and operations it is given and turns
//! them into one self-contained `<svg>` document on request.
//!
//! - Only solid brushes carry color; anything else is drawn black.
//! - A layer becomes a `<g>` with `opacity` and a `clip-path` pointing at a
//!   `<clipPath>` in `<defs>`. Layers with no effect produce no element.
//! - Circles become `<circle>`. Text runs become `<text>` with
//!   `dominant-baseline="central"`, so their `y` is the middle of the line.
//!
//! ```
//! use peniko::{Brush, Color};
//! use triescope_imaging::{DrawOp, ImagingBackend, PaintDesc, RectF, ResourceBackend, StateOp};
//! use triescope_imaging_svg::SvgBackend;
//!
//! let mut svg = SvgBackend::default();
//! let red = svg.create_paint(PaintDesc {
//!     brush: Brush::Solid(Color::from_rgb8(255, 0, 0)),
//! });
//! svg.state(StateOp::SetPaint(red));
//! svg.draw(DrawOp::FillCircle { cx: 0.0, cy: 0.0, r: 5.0 });
//!
//! let doc = svg.to_svg_with_view_box(RectF::new(-10.0, -10.0, 10.0, 10.0));
//! assert!(doc.starts_with("<svg"));
//! assert!(doc.contains(r##"<circle cx="0" cy="0" r="5" fill="#ff0000"/>"##));
//! ```

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use kurbo::{Cap, Join, Stroke};
use peniko::{Brush, Color};
use triescope_imaging::{
    DrawOp, ImagingBackend, ImagingOp, LayerOp, PaintDesc, PaintId, PathCmd, PathDesc, PathId,
    RectF, ResourceBackend, StateOp, TextAnchor, TextRun,
};

/// A backend that records operations and exports them as SVG.
#[derive(Debug, Default)]
pub struct SvgBackend {
    paths: Vec<Option<PathDesc>>,
    paints: Vec<Option<PaintDesc>>,
    ops: Vec<ImagingOp>,
}

impl SvgBackend {
    /// Forgets operations and resources. Old handles become dangling.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.paths.clear();
        self.paints.clear();
    }

    /// Operations recorded so far.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Exports a `width` by `height` document with its origin at `(0, 0)`.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        #[allow(
            clippy::cast_precision_loss,
            reason = "document sizes are far below f32 precision limits"
        )]
        let view_box = RectF::new(0.0, 0.0, width as f32, height as f32);
        self.to_svg_with_view_box(view_box)
    }

    /// Exports a document showing `view_box`.
    ///
    /// The document is as large as the view box, so one user unit is one
    /// CSS pixel. The view box origin may be negative.
    pub fn to_svg_with_view_box(&self, view_box: RectF) -> String {
        let mut doc = Document::new(self);
        for op in &self.ops {
            match op {
                ImagingOp::State(op) => doc.state(op),
                ImagingOp::Draw(op) => doc.draw(op),
            }
        }
        doc.finish(view_box)
    }

    fn path(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(id.0 as usize)?.as_ref()
    }

    fn color(&self, id: Option<PaintId>) -> Color {
        let brush = id
            .and_then(|id| self.paints.get(id.0 as usize))
            .and_then(Option::as_ref)
            .map(|desc| &desc.brush);
        match brush {
            Some(Brush::Solid(color)) => *color,
            _ => Color::BLACK,
        }
    }
}

impl ResourceBackend for SvgBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id = u32::try_from(self.paths.len()).expect("SvgBackend: path ids exhausted");
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        if let Some(slot) = self.paths.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id = u32::try_from(self.paints.len()).expect("SvgBackend: paint ids exhausted");
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        if let Some(slot) = self.paints.get_mut(id.0 as usize) {
            *slot = None;
        }
    }
}

impl ImagingBackend for SvgBackend {
    fn state(&mut self, op: StateOp) {
        self.ops.push(ImagingOp::State(op));
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op));
    }
}

#[derive(Copy, Clone)]
enum Mode {
    Fill,
    Stroke,
}

/// Replays recorded operations into SVG markup.
struct Document<'a> {
    backend: &'a SvgBackend,
    defs: String,
    body: String,
    /// One entry per open layer: whether it opened a `<g>`.
    layers: Vec<bool>,
    clips: u32,
    paint: Option<PaintId>,
    stroke: Option<Stroke>,
}

impl<'a> Document<'a> {
    fn new(backend: &'a SvgBackend) -> Self {
        Self {
            backend,
            defs: String::new(),
            body: String::new(),
            layers: Vec::new(),
            clips: 0,
            paint: None,
            stroke: None,
        }
    }

    fn state(&mut self, op: &StateOp) {
        match op {
            StateOp::SetPaint(id) => self.paint = Some(*id),
            StateOp::SetStroke(stroke) => self.stroke = Some(stroke.clone()),
            StateOp::PushLayer(layer) => self.push_layer(layer),
            StateOp::PopLayer => {
                let opened = self.layers.pop();
                debug_assert!(opened.is_some(), "PopLayer without a matching PushLayer");
                if opened == Some(true) {
                    self.body.push_str("</g>");
                }
            }
        }
    }

    fn push_layer(&mut self, layer: &LayerOp) {
        if layer.is_noop() {
            self.layers.push(false);
            return;
        }
        self.body.push_str("<g");
        if let Some(clip) = layer.clip {
            self.clips += 1;
            let _ = write!(
                self.defs,
                r#"<clipPath id="clip{}" clipPathUnits="userSpaceOnUse"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                self.clips,
                num(clip.x0),
                num(clip.y0),
                num(clip.width()),
                num(clip.height()),
            );
            let _ = write!(self.body, r#" clip-path="url(#clip{})""#, self.clips);
        }
        if let Some(opacity) = layer.opacity.map(|o| o.clamp(0.0, 1.0))
            && opacity < 1.0
        {
            let _ = write!(self.body, r#" opacity="{}""#, num(opacity));
        }
        self.body.push('>');
        self.layers.push(true);
    }

    fn draw(&mut self, op: &DrawOp) {
        match op {
            DrawOp::FillPath(id) | DrawOp::StrokePath(id) => {
                let Some(path) = self.backend.path(*id) else {
                    return;
                };
                let mode = if matches!(op, DrawOp::FillPath(_)) {
                    Mode::Fill
                } else {
                    Mode::Stroke
                };
                self.body.push_str(r#"<path d=""#);
                write_path_data(&mut self.body, path);
                self.body.push('"');
                self.paint_attrs(mode);
                self.body.push_str("/>");
            }
            DrawOp::FillCircle { cx, cy, r } => self.circle(*cx, *cy, *r, Mode::Fill),
            DrawOp::StrokeCircle { cx, cy, r } => self.circle(*cx, *cy, *r, Mode::Stroke),
            DrawOp::Text(run) => self.text(run),
        }
    }

    fn circle(&mut self, cx: f32, cy: f32, r: f32, mode: Mode) {
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            num(cx),
            num(cy),
            num(r.max(0.0)),
        );
        self.paint_attrs(mode);
        self.body.push_str("/>");
    }

    fn text(&mut self, run: &TextRun) {
        let anchor = match run.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="central""#,
            num(run.x),
            num(run.y),
            num(run.size),
        );
        self.paint_attrs(Mode::Fill);
        self.body.push('>');
        escape_into(&mut self.body, &run.text);
        self.body.push_str("</text>");
    }

    /// Writes `fill`/`stroke` attributes for the current paint and stroke.
    fn paint_attrs(&mut self, mode: Mode) {
        let rgba = self.backend.color(self.paint).to_rgba8();
        let hex = HexColor(rgba.r, rgba.g, rgba.b);
        let alpha = f32::from(rgba.a) / 255.0;
        let out = &mut self.body;
        match mode {
            Mode::Fill => {
                let _ = write!(out, r#" fill="{hex}""#);
                if alpha < 1.0 {
                    let _ = write!(out, r#" fill-opacity="{}""#, num(alpha));
                }
            }
            Mode::Stroke => {
                let _ = write!(out, r#" fill="none" stroke="{hex}""#);
                if alpha < 1.0 {
                    let _ = write!(out, r#" stroke-opacity="{}""#, num(alpha));
                }
                if let Some(stroke) = &self.stroke {
                    write_stroke_attrs(out, stroke);
                }
            }
        }
    }

    fn finish(mut self, view_box: RectF) -> String {
        for opened in self.layers.drain(..).rev() {
            if opened {
                self.body.push_str("</g>");
            }
        }
        let (w, h) = (num(view_box.width()), num(view_box.height()));
        let mut svg = String::with_capacity(self.defs.len() + self.body.len() + 128);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{} {} {w} {h}">"#,
            num(view_box.x0),
            num(view_box.y0),
        );
        if !self.defs.is_empty() {
            let _ = write!(svg, "<defs>{}</defs>", self.defs);
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "stroke parameters are small; f32 output precision is enough"
)]
fn write_stroke_attrs(out: &mut String, stroke: &Stroke) {
    // SVG has one linecap for both ends.
    let cap = match stroke.start_cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    };
    let join = match stroke.join {
        Join::Miter => "miter",
        Join::Round => "round",
        Join::Bevel => "bevel",
    };
    let _ = write!(
        out,
        r#" stroke-width="{}" stroke-linecap="{cap}" stroke-linejoin="{join}""#,
        num(stroke.width as f32),
    );
}

fn write_path_data(out: &mut String, path: &PathDesc) {
    for cmd in path.commands.iter() {
        let _ = match *cmd {
            PathCmd::MoveTo([x, y]) => write!(out, "M{} {}", num(x), num(y)),
            PathCmd::LineTo([x, y]) => write!(out, "L{} {}", num(x), num(y)),
            PathCmd::QuadTo([cx, cy], [x, y]) => {
                write!(out, "Q{} {} {} {}", num(cx), num(cy), num(x), num(y))
            }
            PathCmd::CurveTo([c1x, c1y], [c2x, c2y], [x, y]) => write!(
                out,
                "C{} {} {} {} {} {}",
                num(c1x),
                num(c1y),
                num(c2x),
                num(c2y),
                num(x),
                num(y)
            ),
            PathCmd::Close => write!(out, "Z"),
        };
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// `#rrggbb`.
struct HexColor(u8, u8, u8);

impl core::fmt::Display for HexColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Compact number formatting: integers without a fraction, everything
/// else with at most three decimals and no trailing zeros.
fn num(v: f32) -> Num {
    Num(v)
}

struct Num(f32);

impl core::fmt::Display for Num {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return write!(f, "{v}");
        }
        let mut buf = String::new();
        let _ = write!(buf, "{v:.3}");
        let trimmed = buf.trim_end_matches('0').trim_end_matches('.');
        // Avoid printing "-0".
        if trimmed == "-0" {
            f.write_str("0")
        } else {
            f.write_str(trimmed)
        }
    }
}
