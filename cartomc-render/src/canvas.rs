use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

use crate::area::RenderArea;
use crate::colors::Rgb;

/// The output pixel buffer, one pixel per world column.
///
/// Starts fully transparent; every write is fully opaque, so the finished
/// image is transparent exactly where no chunk data was rendered.
pub struct MapCanvas {
    image: RgbaImage,
    area: RenderArea,
}

impl MapCanvas {
    pub fn new(area: RenderArea) -> Self {
        let image = RgbaImage::from_pixel(area.width(), area.height(), Rgba([0, 0, 0, 0]));
        Self { image, area }
    }

    /// Write the pixel for a world column. The caller guarantees the
    /// coordinates lie inside the render area.
    pub fn set_block_pixel(&mut self, world_x: i32, world_z: i32, color: Rgb) {
        let bx = (world_x - self.area.min_x) as u32;
        let by = (world_z - self.area.min_z) as u32;
        self.image
            .put_pixel(bx, by, Rgba([color.r, color.g, color.b, 255]));
    }

    /// Encode the buffer as PNG, once, at the end of a run.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("writing map image to {path:?}"))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_transparent() {
        let area = RenderArea::new(0, 4, 0, 4).unwrap();
        let canvas = MapCanvas::new(area);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn writes_are_opaque_and_offset_by_the_area_origin() {
        let area = RenderArea::new(-16, 16, -16, 16).unwrap();
        let mut canvas = MapCanvas::new(area);
        canvas.set_block_pixel(-16, -16, Rgb { r: 10, g: 20, b: 30 });
        canvas.set_block_pixel(15, 15, Rgb { r: 1, g: 2, b: 3 });

        assert_eq!(canvas.image().get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(canvas.image().get_pixel(31, 31).0, [1, 2, 3, 255]);
    }
}
