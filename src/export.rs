//! Laser-cutting export of the mechanism's rods.
//!
//! Every link becomes a capsule-shaped outline with a hole at each end.
//! Links of similar length are grouped, and the parts are laid out in rows on a sheet.

use crate::math::Point2d;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Description, Group, Path};
use svg::node::Text;
use svg::Document;

/// The smallest body width and hole diameter, in mm.
const MIN_FEATURE: f64 = 0.1;

/// The smallest length grouping tolerance, in mm.
const MIN_GROUP_TOLERANCE: f64 = 1e-3;

/// Settings for the exported sheet. All lengths are in mm.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportConfig {
    /// The width of each rod.
    pub link_width: f64,
    /// The diameter of the hinge holes.
    pub hole_dia: f64,
    /// Links whose lengths round to the same multiple of this are cut identically.
    pub group_tol: f64,
    /// The gap between parts, which is also the sheet margin.
    pub spacing: f64,
    /// The number of mm per mechanism unit.
    pub px_to_mm: f64,
    /// The stroke width of the cut lines.
    pub stroke_width: f64,
    /// Added to the rod width and hole diameter to compensate for the cutter.
    pub kerf: f64,
    /// The maximum number of parts per row.
    pub per_row: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            link_width: 12.0,
            hole_dia: 4.0,
            group_tol: 0.1,
            spacing: 6.0,
            px_to_mm: 1.0,
            stroke_width: 0.1,
            kerf: 0.0,
            per_row: 8,
        }
    }
}

impl ExportConfig {
    /// The width of a rod including the kerf.
    fn body_width(&self) -> f64 {
        f64::max(MIN_FEATURE, self.link_width + self.kerf)
    }

    /// The diameter of a hole including the kerf.
    fn hole_diameter(&self) -> f64 {
        f64::max(MIN_FEATURE, self.hole_dia + self.kerf)
    }
}

/// An error produced while exporting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("the mechanism has no links to export")]
    NoLinks,
}

/// A rod placed on the sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedLink {
    /// The top left corner of the part's cell.
    pub x: f64,
    pub y: f64,
    /// The distance between the hole centres.
    pub length: f64,
}

/// The parts arranged on a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetLayout {
    pub width: f64,
    pub height: f64,
    pub parts: Vec<PlacedLink>,
}

/// Groups link lengths, in mm, by rounding them to a multiple of `tol`.
///
/// Returns `(length, count)` pairs, shortest first.
pub fn group_lengths(lengths: impl IntoIterator<Item = f64>, tol: f64) -> Vec<(f64, usize)> {
    let tol = tol.max(MIN_GROUP_TOLERANCE);
    let mut groups = BTreeMap::<i64, usize>::new();
    for length in lengths {
        *groups.entry((length / tol).round() as i64).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(key, count)| (key as f64 * tol, count))
        .collect()
}

/// Arranges the link segments on a sheet.
pub fn layout_links(
    segments: impl IntoIterator<Item = [Point2d; 2]>,
    config: &ExportConfig,
) -> Result<SheetLayout, ExportError> {
    let lengths = segments
        .into_iter()
        .map(|[a, b]| a.distance(b) * config.px_to_mm)
        .collect::<Vec<_>>();
    if lengths.is_empty() {
        return Err(ExportError::NoLinks);
    }

    let body = config.body_width();
    let per_row = config.per_row.max(1);
    let margin = config.spacing;
    let row_advance = 2.0 * body + config.spacing;

    let mut parts = Vec::with_capacity(lengths.len());
    let (mut x, mut y, mut col) = (margin, margin, 0);
    let mut max_row_x = 0.0f64;

    for (length, count) in group_lengths(lengths, config.group_tol) {
        for _ in 0..count {
            parts.push(PlacedLink { x, y, length });
            x += length + config.spacing + body;
            col += 1;
            max_row_x = max_row_x.max(x);
            if col >= per_row {
                (x, col) = (margin, 0);
                y += row_advance;
            }
        }
        // Each group starts on a fresh row.
        if col != 0 {
            (x, col) = (margin, 0);
            y += row_advance;
        }
    }

    Ok(SheetLayout {
        width: max_row_x.max(per_row as f64 * (config.spacing + body)) + margin,
        height: y + margin + body,
        parts,
    })
}

/// The outline of a rod: two straight edges joined by semicircular ends.
fn capsule(cx: f64, cy: f64, length: f64, width: f64) -> Data {
    let r = 0.5 * width;
    let (x1, x2) = (cx - 0.5 * length, cx + 0.5 * length);
    let (y1, y2) = (cy - r, cy + r);
    Data::new()
        .move_to((x1, y1))
        .horizontal_line_to(x2)
        .elliptical_arc_to((r, r, 0, 0, 1, x2, y2))
        .horizontal_line_to(x1)
        .elliptical_arc_to((r, r, 0, 0, 1, x1, y1))
        .close()
}

/// Renders a sheet layout as an SVG document.
pub fn layout_to_svg(layout: &SheetLayout, config: &ExportConfig) -> String {
    let body = config.body_width();
    let hole_r = 0.5 * config.hole_diameter();

    let mut group = Group::new()
        .set("fill", "none")
        .set("stroke", "#ff0000")
        .set("stroke-width", config.stroke_width)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");
    for part in &layout.parts {
        let cx = part.x + 0.5 * part.length;
        let cy = part.y + 0.5 * body;
        group = group.add(Path::new().set("d", capsule(cx, cy, part.length, body)));
        for hx in [cx - 0.5 * part.length, cx + 0.5 * part.length] {
            group = group.add(
                Circle::new()
                    .set("cx", hx)
                    .set("cy", cy)
                    .set("r", hole_r),
            );
        }
    }

    let desc = format!(
        "Scissor links export · linkWidth={}mm hole={}mm tol={}mm px2mm={} kerf={}",
        config.link_width, config.hole_dia, config.group_tol, config.px_to_mm, config.kerf
    );
    let document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("version", "1.1")
        .set("width", format!("{}mm", layout.width))
        .set("height", format!("{}mm", layout.height))
        .set("viewBox", format!("0 0 {} {}", layout.width, layout.height))
        .add(Description::new().add(Text::new(desc)))
        .add(group);

    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", document)
}

/// Lays out and renders the link segments as an SVG document.
pub fn export_svg(
    segments: impl IntoIterator<Item = [Point2d; 2]>,
    config: &ExportConfig,
) -> Result<String, ExportError> {
    let layout = layout_links(segments, config)?;
    log::debug!(
        "exporting {} links on a {:.1} x {:.1} mm sheet",
        layout.parts.len(),
        layout.width,
        layout.height
    );
    Ok(layout_to_svg(&layout, config))
}
