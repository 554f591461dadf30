// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emits the retained scene as imaging ops.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Stroke;
use peniko::{Brush, Color};
use triescope_imaging::{
    DrawOp, ImagingBackend, ImagingBackendExt, PaintDesc, PaintId, PathDesc, PathId, RectF,
    StateOp, TextAnchor, TextRun,
};
use triescope_scene::KeyedLayer;
use triescope_trie::PrefixId;

use crate::element::{LABEL_FONT_SIZE, LinkElement, NODE_STROKE_WIDTH, NodeElement, RING_OFFSET};
use crate::render::Surface;
use crate::theme::Palette;

/// Paths and paints created for one frame.
///
/// Backends that record ops read these when they export, so the frame is
/// released only after the backend is done with it.
#[derive(Debug, Default)]
#[must_use = "frame resources leak unless released"]
pub struct FrameResources {
    paints: Vec<([u8; 4], PaintId)>,
    paths: Vec<PathId>,
}

impl FrameResources {
    fn paint<B: ImagingBackend>(&mut self, backend: &mut B, color: Color) -> PaintId {
        let rgba = color.to_rgba8();
        let key = [rgba.r, rgba.g, rgba.b, rgba.a];
        if let Some((_, id)) = self.paints.iter().find(|(k, _)| *k == key) {
            return *id;
        }
        let id = backend.create_paint(PaintDesc {
            brush: Brush::Solid(color),
        });
        self.paints.push((key, id));
        id
    }

    /// Destroys every path and paint of the frame on `backend`.
    pub fn release<B: ImagingBackend>(self, backend: &mut B) {
        for (_, id) in self.paints {
            backend.destroy_paint(id);
        }
        for id in self.paths {
            backend.destroy_path(id);
        }
    }
}

/// Runs `f` inside an opacity layer, unless the layer would be fully opaque.
fn with_opacity<B: ImagingBackend>(backend: &mut B, opacity: f64, f: impl FnOnce(&mut B)) {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "opacity is in [0, 1]; f32 precision is enough"
    )]
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity < 1.0 {
        backend.with_opacity_layer(opacity, f);
    } else {
        f(backend);
    }
}

/// Paints links, then nodes, clipped to the visible part of `surface`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the imaging IR stores geometry in f32"
)]
pub(crate) fn paint_scene<B: ImagingBackend>(
    backend: &mut B,
    links: &KeyedLayer<PrefixId, LinkElement>,
    nodes: &KeyedLayer<PrefixId, NodeElement>,
    surface: &Surface,
    palette: &Palette,
    now: Duration,
) -> FrameResources {
    let mut res = FrameResources::default();
    backend.with_clip_rect(RectF::from_kurbo(surface.visible()), |b| {
        for (_, link) in links.iter() {
            with_opacity(b, link.opacity(now), |b| {
                let path = b.create_path(PathDesc::from_bez_path(&link.path(now)));
                res.paths.push(path);
                let paint = res.paint(b, palette.border);
                b.state(StateOp::SetPaint(paint));
                b.state(StateOp::SetStroke(Stroke::new(link.stroke_width())));
                b.draw(DrawOp::StrokePath(path));
            });
        }

        for (_, node) in nodes.iter() {
            let center = node.position(now);
            let (cx, cy) = (center.x as f32, center.y as f32);
            let radius = node.radius(now);
            with_opacity(b, node.opacity(now), |b| {
                if let Some(ring) = node.ring() {
                    with_opacity(b, ring.opacity(now), |b| {
                        let paint = res.paint(b, palette.accent);
                        b.state(StateOp::SetPaint(paint));
                        b.state(StateOp::SetStroke(Stroke::new(NODE_STROKE_WIDTH)));
                        b.draw(DrawOp::StrokeCircle {
                            cx,
                            cy,
                            r: (radius + RING_OFFSET) as f32,
                        });
                    });
                }

                let r = radius as f32;
                let fill = res.paint(b, node.fill(now));
                b.state(StateOp::SetPaint(fill));
                b.draw(DrawOp::FillCircle { cx, cy, r });
                let stroke = res.paint(b, node.stroke(now));
                b.state(StateOp::SetPaint(stroke));
                b.state(StateOp::SetStroke(Stroke::new(node.stroke_width())));
                b.draw(DrawOp::StrokeCircle { cx, cy, r });

                if let Some(label) = &node.label {
                    let color = res.paint(b, node.label_color(now));
                    b.state(StateOp::SetPaint(color));
                    b.draw(DrawOp::Text(TextRun {
                        text: label.clone(),
                        x: cx,
                        y: cy,
                        size: LABEL_FONT_SIZE as f32,
                        anchor: TextAnchor::Middle,
                    }));
                }
            });
        }
    });
    res
}
