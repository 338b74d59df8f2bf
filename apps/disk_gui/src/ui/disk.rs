//! Disk geometry and painting.
//!
//! The tick/label geometry of both rings is computed once from the
//! alphabet and never touched again; per-frame painting only applies the
//! current cumulative rotation to the outer ring and rescales into the
//! allotted rect.

use cipher::{ALPHABET, SECTOR_DEGREES};
use egui::{epaint::TextShape, vec2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

/// The geometry is laid out on a fixed 400x400-unit canvas (radius 200),
/// matching the proportions of the printed disk, and scaled at paint
/// time.
pub const DISK_UNITS: f32 = 200.0;

pub struct SectorGlyph {
    pub letter: char,
    /// Label center, offset from the disk center, -90° so that position 0
    /// sits at the top.
    pub label_offset: Vec2,
    /// Upright-at-top label rotation, radians.
    pub label_angle: f32,
    /// Sector-boundary tick, inner and outer endpoints.
    pub tick: [Vec2; 2],
    /// The fixed reference mark (first alphabet symbol).
    pub is_reference: bool,
}

pub struct RingLayout {
    pub glyphs: Vec<SectorGlyph>,
    pub font_units: f32,
}

impl RingLayout {
    fn new(text_r: f32, tick_outer_r: f32, tick_inner_r: f32, font_units: f32) -> Self {
        let step = SECTOR_DEGREES as f32;
        let glyphs = ALPHABET
            .iter()
            .enumerate()
            .map(|(i, &letter)| {
                let angle_deg = i as f32 * step;
                let label_rad = (angle_deg - 90.0).to_radians();
                // Ticks sit on sector boundaries, half a step past the label.
                let tick_rad = (angle_deg + step / 2.0 - 90.0).to_radians();
                SectorGlyph {
                    letter,
                    label_offset: polar(text_r, label_rad),
                    label_angle: angle_deg.to_radians(),
                    tick: [polar(tick_inner_r, tick_rad), polar(tick_outer_r, tick_rad)],
                    is_reference: i == 0,
                }
            })
            .collect();
        Self { glyphs, font_units }
    }
}

/// Both rings of the disk. Built once at startup, immutable afterwards.
pub struct DiskGeometry {
    pub outer: RingLayout,
    pub inner: RingLayout,
}

impl DiskGeometry {
    pub fn new() -> Self {
        Self {
            outer: RingLayout::new(160.0, 185.0, 135.0, 15.0),
            inner: RingLayout::new(110.0, 135.0, 45.0, 13.0),
        }
    }
}

pub struct DiskStyle {
    pub letter_color: Color32,
    pub reference_color: Color32,
    pub tick_stroke: Stroke,
    pub rim_stroke: Stroke,
}

/// Paints the disk into `rect`. Only the outer ring is rotated, by the
/// unbounded cumulative angle, so repeated rotation never snaps back
/// across the 360° seam.
pub fn paint_disk(
    painter: &Painter,
    rect: Rect,
    geometry: &DiskGeometry,
    cumulative_angle_deg: f64,
    style: &DiskStyle,
) {
    let center = rect.center();
    let scale = rect.width().min(rect.height()) / (2.0 * DISK_UNITS);

    for radius in [195.0, 135.0, 45.0] {
        painter.circle_stroke(center, radius * scale, style.rim_stroke);
    }

    let outer_rotation = cumulative_angle_deg.to_radians() as f32;
    paint_ring(painter, center, scale, &geometry.outer, outer_rotation, style);
    paint_ring(painter, center, scale, &geometry.inner, 0.0, style);
}

fn paint_ring(
    painter: &Painter,
    center: Pos2,
    scale: f32,
    ring: &RingLayout,
    rotation: f32,
    style: &DiskStyle,
) {
    let font = FontId::proportional(ring.font_units * scale);
    for glyph in &ring.glyphs {
        let a = center + rotate(glyph.tick[0], rotation) * scale;
        let b = center + rotate(glyph.tick[1], rotation) * scale;
        painter.line_segment([a, b], style.tick_stroke);

        let color = if glyph.is_reference {
            style.reference_color
        } else {
            style.letter_color
        };
        let angle = glyph.label_angle + rotation;
        let at = center + rotate(glyph.label_offset, rotation) * scale;
        let galley = painter.layout_no_wrap(glyph.letter.to_string(), font.clone(), color);
        let half = vec2(galley.size().x / 2.0, galley.size().y / 2.0);
        let mut text = TextShape::new(at - rotate(half, angle), galley, color);
        text.angle = angle;
        painter.add(text);
    }
}

fn polar(radius: f32, rad: f32) -> Vec2 {
    vec2(radius * rad.cos(), radius * rad.sin())
}

fn rotate(v: Vec2, rad: f32) -> Vec2 {
    let (sin, cos) = rad.sin_cos();
    vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
