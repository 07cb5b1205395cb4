use eframe::egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

/// Transparent ink layer sitting 1:1 over the background image. All drawing
/// operations blend source-over and clip to the buffer bounds.
pub struct DrawingSurface {
    image: RgbaImage,
    revision: u64,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            // RgbaImage::new zero-fills, so the surface starts fully transparent.
            image: RgbaImage::new(width, height),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Bumped on every mutation; lets the GUI skip texture re-uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Source-over blend of one pixel, ignoring out-of-bounds coordinates.
    pub fn blend_clipped(&mut self, x: i32, y: i32, color: Color32) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let bottom = *self.image.get_pixel(x, y);
        let top = Rgba([color.r(), color.g(), color.b(), color.a()]);
        self.image.put_pixel(x, y, blend_rgba(bottom, top));
        self.revision += 1;
    }

    /// Filled circle, the round cap every stroke segment is built from.
    pub fn disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        let radius_sq = radius * radius;
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_clipped(x, y, color);
                }
            }
        }
    }

    /// Round-capped line segment: discs stamped at sub-pixel steps from
    /// `start` to `end` so strokes stay visually continuous.
    pub fn line(&mut self, start: Pos2, end: Pos2, color: Color32, width: f32) {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        let radius = (width / 2.0).max(0.5);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let point = Pos2::new(start.x + dx * t, start.y + dy * t);
            self.disc(point, radius, color);
        }
    }
}

/// Unmultiplied source-over blend, shared with the compositor.
pub(crate) fn blend_rgba(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let sa = top.0[3] as f32 / 255.0;
    let da = bottom.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(top.0[0], bottom.0[0]),
        blend(top.0[1], bottom.0[1]),
        blend(top.0[2], bottom.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
