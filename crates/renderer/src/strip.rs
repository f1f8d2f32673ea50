//! Geometry for the marquee strip.
//!
//! The strip is a row of textured quads: one quad per item, the whole
//! sequence laid out twice back-to-back so the wrapped translation never
//! exposes an edge. Everything here is plain arithmetic in device pixels;
//! the GPU resources live in [`crate::gpu`].

use bytemuck::{Pod, Zeroable};
use motion::SequenceLayout;

/// Vertical padding above/below items inside the strip, in logical pixels.
pub(crate) const STRIP_PAD_Y: f32 = 12.0;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct StripVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub center: [f32; 2],
    pub quad_index: f32,
    pub _pad: f32,
}

/// One rendered quad and where it sits in track space (device pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QuadSlot {
    pub item: usize,
    pub copy: usize,
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

pub(crate) struct StripGeometry {
    pub vertices: Vec<StripVertex>,
    pub quads: Vec<QuadSlot>,
    /// Full strip height including padding, in device pixels.
    pub height: f32,
}

impl StripGeometry {
    /// Lays out both copies of the measured sequence at the given device
    /// pixel ratio. Quad indices run `copy * item_count + item` so the
    /// hovered quad can be addressed from the shader.
    pub fn build(layout: &SequenceLayout, item_height: f32, dpr: f32) -> Self {
        let item_count = layout.positions.len();
        let mut vertices = Vec::with_capacity(item_count * 2 * 6);
        let mut quads = Vec::with_capacity(item_count * 2);
        let y0 = STRIP_PAD_Y * dpr;
        let y1 = (STRIP_PAD_Y + item_height) * dpr;

        for copy in 0..motion::Marquee::copies() {
            let origin = layout.copy_origin(copy);
            for item in 0..item_count {
                let x0 = (origin + layout.positions[item]) * dpr;
                let x1 = x0 + layout.widths[item] * dpr;
                let index = (copy * item_count + item) as f32;
                let center = [(x0 + x1) * 0.5, (y0 + y1) * 0.5];

                let corners = [
                    ([x0, y0], [0.0, 0.0]),
                    ([x1, y0], [1.0, 0.0]),
                    ([x1, y1], [1.0, 1.0]),
                    ([x0, y0], [0.0, 0.0]),
                    ([x1, y1], [1.0, 1.0]),
                    ([x0, y1], [0.0, 1.0]),
                ];
                for (position, uv) in corners {
                    vertices.push(StripVertex {
                        position,
                        uv,
                        center,
                        quad_index: index,
                        _pad: 0.0,
                    });
                }
                quads.push(QuadSlot {
                    item,
                    copy,
                    x0,
                    x1,
                    y0,
                    y1,
                });
            }
        }

        Self {
            vertices,
            quads,
            height: (item_height + 2.0 * STRIP_PAD_Y) * dpr,
        }
    }

    /// Finds the quad under the cursor, given the strip's current translation
    /// and its top edge, all in device pixels. Returns the quad index used by
    /// the hover-scale uniform.
    pub fn hit_test(
        &self,
        cursor: (f32, f32),
        translation_px: f32,
        strip_top: f32,
    ) -> Option<usize> {
        let local_y = cursor.1 - strip_top;
        self.quads.iter().enumerate().find_map(|(index, quad)| {
            let x0 = quad.x0 + translation_px;
            let x1 = quad.x1 + translation_px;
            (cursor.0 >= x0 && cursor.0 < x1 && local_y >= quad.y0 && local_y < quad.y1)
                .then_some(index)
        })
    }

    /// True when the cursor is anywhere inside the strip's vertical band.
    pub fn contains_y(&self, cursor_y: f32, strip_top: f32) -> bool {
        cursor_y >= strip_top && cursor_y < strip_top + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenecfg::MarqueeSettings;

    fn layout(widths: &[f32], gap: f32) -> SequenceLayout {
        let mut marquee = motion::Marquee::new(&MarqueeSettings {
            gap,
            ..MarqueeSettings::default()
        });
        marquee.measure(widths)
    }

    #[test]
    fn copies_are_pixel_identical() {
        let geometry = StripGeometry::build(&layout(&[40.0, 60.0], 10.0), 44.0, 2.0);
        assert_eq!(geometry.quads.len(), 4);
        let width = (40.0 + 10.0 + 60.0) * 2.0;
        for item in 0..2 {
            let a = geometry.quads[item];
            let b = geometry.quads[item + 2];
            assert_eq!(b.x0 - a.x0, width);
            assert_eq!(b.x1 - a.x1, width);
            assert_eq!(a.x1 - a.x0, b.x1 - b.x0);
            assert_eq!(a.y0, b.y0);
            assert_eq!(a.y1, b.y1);
        }
    }

    #[test]
    fn quad_indices_are_unique_and_ordered() {
        let geometry = StripGeometry::build(&layout(&[30.0, 30.0, 30.0], 5.0), 32.0, 1.0);
        let indices: Vec<f32> = geometry
            .vertices
            .iter()
            .step_by(6)
            .map(|v| v.quad_index)
            .collect();
        assert_eq!(indices, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn hit_test_respects_translation() {
        let geometry = StripGeometry::build(&layout(&[40.0, 60.0], 10.0), 44.0, 1.0);
        let strip_top = 100.0;
        let y = strip_top + STRIP_PAD_Y + 10.0;

        assert_eq!(geometry.hit_test((20.0, y), 0.0, strip_top), Some(0));
        assert_eq!(geometry.hit_test((60.0, y), 0.0, strip_top), Some(1));
        // Gap between items hits nothing.
        assert_eq!(geometry.hit_test((45.0, y), 0.0, strip_top), None);
        // Scrolled by 50px the second item sits where the first was.
        assert_eq!(geometry.hit_test((20.0, y), -50.0, strip_top), Some(1));
        // Outside the strip band.
        assert_eq!(geometry.hit_test((20.0, 10.0), 0.0, strip_top), None);
    }

    #[test]
    fn strip_band_covers_padding() {
        let geometry = StripGeometry::build(&layout(&[40.0], 0.0), 44.0, 1.0);
        assert!(geometry.contains_y(101.0, 100.0));
        assert!(geometry.contains_y(100.0 + 44.0 + 23.0, 100.0));
        assert!(!geometry.contains_y(99.0, 100.0));
        assert!(!geometry.contains_y(100.0 + geometry.height, 100.0));
    }
}
