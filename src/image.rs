use crate::error::UndoCaptureError;
use crate::geometry::{Point, Rect};
use image::{Rgba, RgbaImage};

/// Color of a single pixel
pub type Color = Rgba<u8>;

/// One pixel that differs between two buffers of the same size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelChange {
    pub point: Point,
    pub before: Color,
    pub after: Color,
}

/// The editable RGBA raster addressed by integer image-space coordinates.
///
/// Writes outside the buffer are silently dropped so drawing routines can run
/// off the edge without bounds checks of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, fill),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Rect covering the whole buffer, `None` for an empty buffer
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_size(self.width(), self.height())
    }

    /// Raw RGBA bytes held by the buffer
    pub fn byte_len(&self) -> usize {
        self.image.as_raw().len()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width() && (p.y as u32) < self.height()
    }

    pub fn get(&self, p: Point) -> Option<Color> {
        self.contains(p)
            .then(|| *self.image.get_pixel(p.x as u32, p.y as u32))
    }

    /// Write one pixel. Returns whether the pixel was inside the buffer.
    pub fn put(&mut self, p: Point, color: Color) -> bool {
        if !self.contains(p) {
            return false;
        }
        self.image.put_pixel(p.x as u32, p.y as u32, color);
        true
    }

    /// Write one pixel, dropping it when it falls outside `clip`.
    pub fn put_clipped(&mut self, p: Point, color: Color, clip: Option<Rect>) -> bool {
        if clip.is_some_and(|clip| !clip.contains(p)) {
            return false;
        }
        self.put(p, color)
    }

    /// Copy of the whole buffer, failing instead of aborting when the
    /// allocation cannot be satisfied.
    pub fn try_snapshot(&self) -> Result<PixelBuffer, UndoCaptureError> {
        let raw = self.image.as_raw();
        let mut data = Vec::new();
        data.try_reserve_exact(raw.len())
            .map_err(|_| UndoCaptureError::OutOfMemory { bytes: raw.len() })?;
        data.extend_from_slice(raw);

        let image = RgbaImage::from_raw(self.width(), self.height(), data)
            .ok_or(UndoCaptureError::OutOfMemory { bytes: raw.len() })?;
        Ok(Self { image })
    }

    /// Overwrite this buffer with `other`. Buffers of another size replace
    /// this one entirely.
    pub fn restore_from(&mut self, other: &PixelBuffer) {
        if self.size() == other.size() {
            self.image.copy_from_slice(other.image.as_raw());
        } else {
            self.image = other.image.clone();
        }
    }

    /// Every pixel that differs from `before`, in row-major order.
    /// Both buffers must have the same size; otherwise nothing is reported.
    pub fn diff(&self, before: &PixelBuffer) -> Vec<PixelChange> {
        if self.size() != before.size() {
            return Vec::new();
        }
        self.image
            .enumerate_pixels()
            .zip(before.image.pixels())
            .filter(|((_, _, after), before)| after != before)
            .map(|((x, y, after), before)| PixelChange {
                point: Point::new(x as i32, y as i32),
                before: *before,
                after: *after,
            })
            .collect()
    }
}
