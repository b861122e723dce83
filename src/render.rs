use anyhow::{bail, Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use crate::constants::geometry::{PADDING_DIVISOR, RADIUS_DIVISOR, STROKE_DIVISOR};
use crate::constants::palette::{FILL, OUTLINE, TRANSPARENT};

/// Placement of the rounded rectangle inside a square icon.
///
/// The box spans `padding..=size - padding` on both axes, so at small sizes
/// its far edge can land one pixel past the raster and is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGeometry {
    pub size: u32,
    pub padding: u32,
    pub radius: u32,
    pub stroke: u32,
}

impl IconGeometry {
    pub fn for_size(size: u32) -> Self {
        IconGeometry {
            size,
            padding: size / PADDING_DIVISOR,
            radius: size / RADIUS_DIVISOR,
            stroke: (size / STROKE_DIVISOR).max(1),
        }
    }

    /// Inclusive start of the bounding box on either axis
    pub fn min_edge(&self) -> u32 {
        self.padding
    }

    /// Inclusive end of the bounding box on either axis
    pub fn max_edge(&self) -> u32 {
        self.size - self.padding
    }

    /// Whether pixel (x, y) lies inside the rounded rectangle shrunk by `inset`
    /// pixels on every side. Corner radii shrink along with the box.
    pub fn contains(&self, x: u32, y: u32, inset: u32) -> bool {
        let lo = (self.min_edge() + inset) as f32;
        let hi = self.max_edge() as f32 - inset as f32;
        if lo > hi {
            return false;
        }

        let (x, y) = (x as f32, y as f32);
        if x < lo || x > hi || y < lo || y > hi {
            return false;
        }

        let radius = (self.radius.saturating_sub(inset) as f32).min((hi - lo) / 2.0);

        // Distance to the core rectangle the corner arcs are centred on
        let dx = (lo + radius - x).max(0.0) + (x - (hi - radius)).max(0.0);
        let dy = (lo + radius - y).max(0.0) + (y - (hi - radius)).max(0.0);
        let reach = radius + 0.5;

        dx * dx + dy * dy <= reach * reach
    }
}

/// Rasterize the placeholder glyph at `size`×`size` pixels.
///
/// The background is transparent. One rounded rectangle is drawn, filled with
/// the palette fill color and outlined inward with the outline color.
pub fn render_icon(size: u32) -> Result<RgbaImage> {
    if size == 0 {
        bail!("icon size must be greater than 0");
    }

    let geometry = IconGeometry::for_size(size);
    let mut img = RgbaImage::from_pixel(size, size, Rgba(TRANSPARENT));

    let fill = Rgba(FILL);
    let outline = Rgba(OUTLINE);

    let start = geometry.min_edge();
    let end = geometry.max_edge().min(size - 1);

    for y in start..=end {
        for x in start..=end {
            if !geometry.contains(x, y, 0) {
                continue;
            }
            let color = if geometry.contains(x, y, geometry.stroke) {
                fill
            } else {
                outline
            };
            img.put_pixel(x, y, color);
        }
    }

    Ok(img)
}

pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write PNG: {}", path.display()))
}

/// Render at `size` and write the result as a PNG at `path`
pub fn render_to_png(size: u32, path: &Path) -> Result<()> {
    let img = render_icon(size)?;
    save_png(&img, path)
}
