//! Draws a [`ChordScene`] as a standalone SVG document.
//!
//! Angles follow the layout: 0 at 12 o'clock, growing clockwise. The
//! diagram is centered in the viewport, group arcs form an annulus, the
//! category ring wraps it and ribbons are quadratic curves through the center.

use log::debug;
use mixchord_traits::{ChordError, ChordResult, Rgb};
use mixchord_view::{ChordScene, Renderer, SceneChord, SceneGroup};
use std::f64::consts::{PI, TAU};
use std::fmt::Write;

/// Room left around the circle for the labels.
pub const LABEL_MARGIN: f64 = 90.0;
/// Radial thickness of the group annulus.
pub const GROUP_THICKNESS: f64 = 12.0;
const RING_GAP: f64 = 4.0;
const RING_THICKNESS: f64 = 6.0;
const LABEL_GAP: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    /// Emitted as `<title>` when set.
    pub title: Option<String>,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: None,
        }
    }
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Outer radius of the group annulus.
    pub fn outer_radius(&self) -> f64 {
        (f64::from(self.width.min(self.height)) / 2.0 - LABEL_MARGIN).max(GROUP_THICKNESS * 2.0)
    }

    pub fn inner_radius(&self) -> f64 {
        self.outer_radius() - GROUP_THICKNESS
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, scene: &ChordScene) -> ChordResult<String> {
        if self.width == 0 || self.height == 0 {
            return Err(ChordError::Render(format!(
                "cannot draw on a {}x{} surface",
                self.width, self.height
            )));
        }
        let outer = self.outer_radius();
        let inner = self.inner_radius();
        let mut out = String::new();

        write_svg_preamble(&mut out, self.width, self.height, self.title.as_deref());
        let _ = writeln!(
            out,
            r#"  <g transform="translate({:.2},{:.2})">"#,
            f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0
        );

        if !scene.chords.is_empty() {
            let _ = writeln!(out, "    <defs>");
            for chord in &scene.chords {
                write_gradient(&mut out, chord, inner);
            }
            let _ = writeln!(out, "    </defs>");
        }

        let _ = writeln!(out, r#"    <g class="category-arcs">"#);
        for arc in &scene.category_arcs {
            let d = arc_path(
                outer + RING_GAP,
                outer + RING_GAP + RING_THICKNESS,
                arc.start_angle,
                arc.end_angle,
            );
            let _ = writeln!(
                out,
                r#"      <path d="{d}" fill="{}" fill-opacity="{:.2}"><title>{}</title></path>"#,
                arc.color, arc.opacity, arc.category
            );
        }
        let _ = writeln!(out, "    </g>");

        let _ = writeln!(out, r#"    <g class="groups">"#);
        for group in &scene.groups {
            write_group(&mut out, group, inner, outer);
        }
        let _ = writeln!(out, "    </g>");

        let _ = writeln!(out, r#"    <g class="chords">"#);
        for chord in &scene.chords {
            let d = ribbon_path(inner, chord);
            let _ = writeln!(
                out,
                r#"      <path d="{d}" fill="url(#{id})" fill-opacity="{:.2}" stroke="url(#{id})" stroke-width="{:.2}"/>"#,
                chord.attributes.opacity,
                chord.attributes.stroke_width,
                id = gradient_id(chord),
            );
        }
        let _ = writeln!(out, "    </g>");

        let _ = writeln!(out, "  </g>");
        let _ = writeln!(out, "</svg>");
        debug!(
            "Rendered {} groups and {} chords to SVG",
            scene.groups.len(),
            scene.chords.len()
        );
        Ok(out)
    }
}

/// Escape the five XML special characters.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Cartesian position of `angle` on a circle of `radius` around the origin.
pub fn point(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

const FULL_TURN_EPSILON: f64 = 1e-9;

/// Arc commands from angle `from` to angle `to` around the origin, clockwise
/// when `to > from`. An arc whose ends coincide draws nothing in SVG, so a
/// full turn is emitted as two halves.
fn arc_to(radius: f64, from: f64, to: f64) -> String {
    let span = (to - from).abs();
    if span >= TAU - FULL_TURN_EPSILON {
        let mid = (from + to) / 2.0;
        return arc_to(radius, from, mid) + &arc_to(radius, mid, to);
    }
    let (x, y) = point(radius, to);
    format!(
        "A{radius:.2},{radius:.2} 0 {} {} {x:.2},{y:.2}",
        u8::from(span > PI),
        u8::from(to > from)
    )
}

/// Annulus sector between two radii, drawn clockwise from `start` to `end`.
pub fn arc_path(inner: f64, outer: f64, start: f64, end: f64) -> String {
    let (ox0, oy0) = point(outer, start);
    let (ix1, iy1) = point(inner, end);
    format!(
        "M{ox0:.2},{oy0:.2}{}L{ix1:.2},{iy1:.2}{}Z",
        arc_to(outer, start, end),
        arc_to(inner, end, start)
    )
}

/// Ribbon joining the two endpoint sub-spans of a chord through the center.
pub fn ribbon_path(radius: f64, chord: &SceneChord) -> String {
    let source = &chord.chord.source;
    let target = &chord.chord.target;
    let (s0x, s0y) = point(radius, source.start_angle);
    let (t0x, t0y) = point(radius, target.start_angle);
    format!(
        "M{s0x:.2},{s0y:.2}{}Q0,0 {t0x:.2},{t0y:.2}{}Q0,0 {s0x:.2},{s0y:.2}Z",
        arc_to(radius, source.start_angle, source.end_angle),
        arc_to(radius, target.start_angle, target.end_angle),
    )
}

fn gradient_id(chord: &SceneChord) -> String {
    format!("chord-{}-{}", chord.chord.source.index, chord.chord.target.index)
}

fn write_svg_preamble(out: &mut String, width: u32, height: u32, title: Option<&str>) {
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
    );
    if let Some(title) = title {
        let _ = writeln!(out, "  <title>{}</title>", xml_escape(title));
    }
}

/// The gradient runs in user space from the middle of the source sub-span to
/// the middle of the target sub-span.
fn write_gradient(out: &mut String, chord: &SceneChord, radius: f64) {
    let (x1, y1) = point(radius, chord.chord.source.mid_angle());
    let (x2, y2) = point(radius, chord.chord.target.mid_angle());
    let _ = writeln!(
        out,
        r#"      <linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}">"#,
        gradient_id(chord)
    );
    for stop in &chord.attributes.gradient {
        let _ = writeln!(
            out,
            r#"        <stop offset="{:.2}" stop-color="{}"/>"#,
            stop.offset, stop.color
        );
    }
    let _ = writeln!(out, "      </linearGradient>");
}

fn write_group(out: &mut String, group: &SceneGroup, inner: f64, outer: f64) {
    let d = arc_path(inner, outer, group.start_angle, group.end_angle);
    let label = xml_escape(&group.label);
    let _ = writeln!(
        out,
        r#"      <path d="{d}" fill="{}" fill-opacity="{:.2}"><title>{label} ({})</title></path>"#,
        group.color, group.attributes.opacity, group.category
    );

    let mid = (group.start_angle + group.end_angle) / 2.0;
    let (x, y) = point(outer + RING_GAP + RING_THICKNESS + LABEL_GAP, mid);
    let anchor = if mid > PI { "end" } else { "start" };
    let _ = writeln!(
        out,
        r#"      <text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" dominant-baseline="middle" fill="{}" fill-opacity="{:.2}">{label}</text>"#,
        label_color(group.color),
        group.attributes.opacity.max(0.3),
    );
}

fn label_color(color: Rgb) -> Rgb {
    color.lerp(Rgb::new(0, 0, 0), 0.4)
}
