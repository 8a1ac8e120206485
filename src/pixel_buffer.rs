use egui::{Color32, ColorImage, Pos2, Vec2};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::{CanvasError, Result};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A 2-D grid of straight-alpha RGBA8 pixels.
///
/// Pixel `(x, y)` is sampled at the integer point `(x, y)`: it belongs to a
/// shape when that point lies inside it. Shapes are clipped to the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer. Zero dimensions are raised to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    /// Returns the RGBA value at `(x, y)`, or None outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Sets every pixel to full transparency
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Clears the ellipse of the given size centered at `center`, leaving
    /// everything outside it untouched.
    pub fn clear_ellipse(&mut self, center: Pos2, size: Vec2) {
        let radii = size * 0.5;
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.for_each_covered(
            center - radii,
            center + radii,
            |p| {
                let d = (p - center) / radii;
                d.x * d.x + d.y * d.y <= 1.0
            },
            |pixel| *pixel = TRANSPARENT,
        );
    }

    /// Alpha-blends a filled circle onto the buffer
    pub fn fill_circle(&mut self, center: Pos2, diameter: f32, color: Color32) {
        let radius = diameter * 0.5;
        let src = color.to_srgba_unmultiplied();
        self.for_each_covered(
            center - Vec2::splat(radius),
            center + Vec2::splat(radius),
            |p| p.distance_sq(center) <= radius * radius,
            |pixel| blend(pixel, src),
        );
    }

    /// Alpha-blends a straight segment with round caps.
    ///
    /// Every covered pixel is blended once, so a translucent segment has a
    /// uniform tint even where the caps overlap the body.
    pub fn draw_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = width * 0.5;
        let src = color.to_srgba_unmultiplied();
        let min = from.min(to) - Vec2::splat(radius);
        let max = from.max(to) + Vec2::splat(radius);
        self.for_each_covered(
            min,
            max,
            |p| distance_sq_to_segment(p, from, to) <= radius * radius,
            |pixel| blend(pixel, src),
        );
    }

    /// Returns a copy at least `width` x `height` in size, with this buffer's
    /// pixels at the top-left origin and transparency elsewhere.
    pub fn grown(&self, width: u32, height: u32) -> Self {
        let width = width.max(self.width());
        let height = height.max(self.height());
        if [width, height] == self.size() {
            return self.clone();
        }
        let mut image = RgbaImage::new(width, height);
        image::imageops::replace(&mut image, &self.image, 0, 0);
        Self { image }
    }

    /// Encodes the buffer as PNG into `writer`
    pub fn write_png<W: Write + Seek>(
        &self,
        writer: &mut W,
    ) -> std::result::Result<(), ImageError> {
        self.image.write_to(writer, ImageFormat::Png)
    }

    /// Writes the buffer as a PNG file at `path`
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let io_error = |source| CanvasError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        self.write_png(&mut writer).map_err(|err| match err {
            ImageError::IoError(source) => io_error(source),
            other => CanvasError::Encode(other),
        })?;
        writer.flush().map_err(io_error)
    }

    /// Converts the buffer for upload as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        let [w, h] = self.size();
        ColorImage::from_rgba_unmultiplied([w as usize, h as usize], self.as_raw())
    }

    /// Visits every in-bounds pixel of the box `min..=max` that `inside` accepts
    fn for_each_covered(
        &mut self,
        min: Pos2,
        max: Pos2,
        inside: impl Fn(Pos2) -> bool,
        mut op: impl FnMut(&mut Rgba<u8>),
    ) {
        let last_x = (self.width() - 1) as f32;
        let last_y = (self.height() - 1) as f32;
        if max.x < 0.0 || max.y < 0.0 || min.x > last_x || min.y > last_y {
            return;
        }
        let x0 = min.x.ceil().max(0.0) as u32;
        let y0 = min.y.ceil().max(0.0) as u32;
        let x1 = max.x.floor().min(last_x) as u32;
        let y1 = max.y.floor().min(last_y) as u32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(Pos2::new(x as f32, y as f32)) {
                    op(self.image.get_pixel_mut(x, y));
                }
            }
        }
    }
}

fn distance_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance_sq(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_sq(a + ab * t)
}

/// Straight-alpha source-over
fn blend(dst: &mut Rgba<u8>, src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => *dst = Rgba(src),
        _ => {
            let sa = f32::from(src[3]) / 255.0;
            let da = f32::from(dst[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let mut out = [0u8; 4];
            for i in 0..3 {
                let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
                out[i] = c.round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_a * 255.0).round() as u8;
            *dst = Rgba(out);
        }
    }
}
