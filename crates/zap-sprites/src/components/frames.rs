//! Bitmap frame store: the pixel data behind a sprite.
//!
//! A sprite owns one or more equal-sized RGBA frames. Pixel-exact collision
//! and point tests read the alpha channel directly; debug overlays use the
//! derived collision mask, which is cached and rebuilt only when the frames
//! change (see [`FrameStore::bite`]).

use bytemuck::{Pod, Zeroable};
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::api::error::FrameError;

/// A single RGBA8 pixel. Byte-compatible with tightly packed RGBA buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Default marker color for opaque pixels in collision masks.
    pub const MASK: Self = Self::new(0, 255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// One image of a sprite, stored unrotated and unscaled.
///
/// Pixels are stored in row-major order: index = y * width + x
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Frame {
    /// Create a frame from decoded pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroSize { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FrameError::BufferLength {
                expected: expected * 4,
                found: pixels.len() * 4,
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Create a frame from a tightly packed RGBA8 byte buffer.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                found: bytes.len(),
            });
        }
        let pixels: &[Rgba] = bytemuck::try_cast_slice(bytes).map_err(|_| FrameError::BufferLength {
            expected,
            found: bytes.len(),
        })?;
        Self::new(width, height, pixels.to_vec())
    }

    /// Create a frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, FrameError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, e.g. for uploading to a texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y). Returns None outside the frame.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Get the alpha value at (x, y). Returns None outside the frame.
    pub fn alpha(&self, x: i32, y: i32) -> Option<u8> {
        self.pixel(x, y).map(|p| p.a)
    }

    /// Set the pixel at (x, y). Writes outside the frame are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Copy a `w` x `h` region starting at (x0, y0). The region must lie inside the frame.
    fn region(&self, x0: u32, y0: u32, w: u32, h: u32) -> Frame {
        let mut pixels = Vec::with_capacity(w as usize * h as usize);
        for y in y0..y0 + h {
            let start = (y * self.width + x0) as usize;
            pixels.extend_from_slice(&self.pixels[start..start + w as usize]);
        }
        Frame { width: w, height: h, pixels }
    }

    /// Threshold this frame into a two-color collision mask.
    fn to_mask(&self, alpha_level: u8, color: Rgba) -> Frame {
        let pixels = self
            .pixels
            .iter()
            .map(|p| if p.a < alpha_level { Rgba::TRANSPARENT } else { color })
            .collect();
        Frame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Collision mask frames, derived from the sprite frames on demand.
#[derive(Debug, Clone)]
struct MaskCache {
    frames: Vec<Frame>,
    alpha_level: u8,
    color: Rgba,
    dirty: bool,
}

/// All frames of one sprite, plus the pristine copies `restore` goes back to.
#[derive(Debug, Clone)]
pub struct FrameStore {
    frames: Vec<Frame>,
    original: Vec<Frame>,
    mask: MaskCache,
    width: u32,
    height: u32,
}

impl FrameStore {
    /// Build a store from one or more frames of identical size.
    pub fn new(frames: Vec<Frame>) -> Result<Self, FrameError> {
        let first = frames.first().ok_or(FrameError::Empty)?;
        let (width, height) = (first.width, first.height);
        for (index, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(FrameError::SizeMismatch {
                    index,
                    width,
                    height,
                    found_width: frame.width,
                    found_height: frame.height,
                });
            }
        }
        Ok(Self {
            original: frames.clone(),
            frames,
            mask: MaskCache {
                frames: Vec::new(),
                alpha_level: 0,
                color: Rgba::TRANSPARENT,
                dirty: true,
            },
            width,
            height,
        })
    }

    /// Build a store holding a single frame.
    pub fn single(frame: Frame) -> Self {
        let (width, height) = (frame.width, frame.height);
        Self {
            original: vec![frame.clone()],
            frames: vec![frame],
            mask: MaskCache {
                frames: Vec::new(),
                alpha_level: 0,
                color: Rgba::TRANSPARENT,
                dirty: true,
            },
            width,
            height,
        }
    }

    /// Split a tiled sprite sheet into frames.
    /// Tiles are taken left to right, top to bottom.
    pub fn from_sheet(sheet: &Frame, cols: u32, rows: u32) -> Result<Self, FrameError> {
        if cols == 0 || rows == 0 || sheet.width % cols != 0 || sheet.height % rows != 0 {
            return Err(FrameError::SheetGrid {
                width: sheet.width,
                height: sheet.height,
                cols,
                rows,
            });
        }
        let (w, h) = (sheet.width / cols, sheet.height / rows);
        let frames = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (col, row)))
            .map(|(col, row)| sheet.region(col * w, row * h, w, h))
            .collect();
        Self::new(frames)
    }

    /// Width of every frame in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of every frame in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames (always at least one).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Alpha at (x, y) of frame `index`. None if either is out of range.
    pub fn alpha(&self, index: usize, x: i32, y: i32) -> Option<u8> {
        self.frames.get(index).and_then(|f| f.alpha(x, y))
    }

    /// Whether the collision mask must be rebuilt before its next use.
    pub fn is_mask_dirty(&self) -> bool {
        self.mask.dirty
    }

    /// Collision mask frames, one per sprite frame.
    ///
    /// Each pixel is transparent if its source alpha is below `alpha_level`,
    /// otherwise `color`. Rebuilt only after the frames change or when asked
    /// for a different threshold or color.
    pub fn collision_mask(&mut self, alpha_level: u8, color: Rgba) -> &[Frame] {
        let mask = &mut self.mask;
        if mask.dirty || mask.alpha_level != alpha_level || mask.color != color {
            log::debug!(
                "rebuilding collision mask for {} frame(s) at alpha level {}",
                self.frames.len(),
                alpha_level
            );
            mask.frames = self
                .frames
                .iter()
                .map(|f| f.to_mask(alpha_level, color))
                .collect();
            mask.alpha_level = alpha_level;
            mask.color = color;
            mask.dirty = false;
        }
        &mask.frames
    }

    /// Clear alpha to zero for every pixel within `radius` of `center`
    /// (local pixel coordinates), in every frame.
    ///
    /// The write region is clipped to the frame; a negative radius does nothing.
    pub fn bite(&mut self, center: IVec2, radius: i32) {
        if radius < 0 {
            return;
        }
        let x1 = center.x.saturating_sub(radius).max(0);
        let y1 = center.y.saturating_sub(radius).max(0);
        let x2 = center.x.saturating_add(radius).min(self.width as i32 - 1);
        let y2 = center.y.saturating_add(radius).min(self.height as i32 - 1);
        if x1 > x2 || y1 > y2 {
            return;
        }

        // Offsets can span the whole i32 range, so square them wide.
        let r2 = radius as i128 * radius as i128;
        for frame in &mut self.frames {
            for py in y1..=y2 {
                for px in x1..=x2 {
                    let dx = px as i128 - center.x as i128;
                    let dy = py as i128 - center.y as i128;
                    if dx * dx + dy * dy <= r2 {
                        let i = py as usize * frame.width as usize + px as usize;
                        frame.pixels[i].a = 0;
                    }
                }
            }
        }
        self.mask.dirty = true;
        log::debug!("bite at ({}, {}) radius {}", center.x, center.y, radius);
    }

    /// Put every frame back the way it was constructed, undoing bites.
    pub fn restore(&mut self) {
        self.frames.clone_from(&self.original);
        self.mask.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(w: u32, h: u32) -> Frame {
        Frame::filled(w, h, Rgba::opaque(200, 10, 10)).unwrap()
    }

    #[test]
    fn from_rgba8_casts_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let frame = Frame::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(frame.pixel(0, 0), Some(Rgba::new(1, 2, 3, 4)));
        assert_eq!(frame.alpha(1, 0), Some(8));
        assert_eq!(frame.as_bytes(), &bytes);
    }

    #[test]
    fn from_rgba8_rejects_wrong_length() {
        let err = Frame::from_rgba8(2, 2, &[0; 12]).unwrap_err();
        assert_eq!(err, FrameError::BufferLength { expected: 16, found: 12 });
    }

    #[test]
    fn zero_sized_frame_is_rejected() {
        assert!(matches!(
            Frame::filled(0, 4, Rgba::TRANSPARENT),
            Err(FrameError::ZeroSize { .. })
        ));
    }

    #[test]
    fn alpha_outside_frame_is_none() {
        let frame = opaque(4, 4);
        assert_eq!(frame.alpha(-1, 0), None);
        assert_eq!(frame.alpha(4, 0), None);
        assert_eq!(frame.alpha(3, 3), Some(255));
    }

    #[test]
    fn store_rejects_mismatched_frames() {
        let err = FrameStore::new(vec![opaque(4, 4), opaque(4, 5)]).unwrap_err();
        assert_eq!(
            err,
            FrameError::SizeMismatch {
                index: 1,
                width: 4,
                height: 4,
                found_width: 4,
                found_height: 5,
            }
        );
        assert_eq!(FrameStore::new(Vec::new()).unwrap_err(), FrameError::Empty);
    }

    #[test]
    fn sheet_is_sliced_left_to_right_top_to_bottom() {
        // 4x2 sheet, 2 cols x 2 rows -> four 2x1 tiles, red channel = tile number
        let mut sheet = Frame::filled(4, 2, Rgba::TRANSPARENT).unwrap();
        for y in 0..2 {
            for x in 0..4 {
                let tile = (y * 2 + x / 2) as u8;
                sheet.set_pixel(x, y, Rgba::opaque(tile, 0, 0));
            }
        }
        let store = FrameStore::from_sheet(&sheet, 2, 2).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!((store.width(), store.height()), (2, 1));
        for i in 0..4 {
            assert_eq!(store.frame(i).unwrap().pixel(1, 0).unwrap().r, i as u8);
        }
    }

    #[test]
    fn sheet_must_divide_evenly() {
        let sheet = opaque(5, 2);
        assert!(matches!(
            FrameStore::from_sheet(&sheet, 2, 1),
            Err(FrameError::SheetGrid { .. })
        ));
    }

    #[test]
    fn mask_thresholds_alpha() {
        let mut frame = opaque(3, 1);
        frame.set_pixel(0, 0, Rgba::new(255, 255, 255, 19));
        frame.set_pixel(1, 0, Rgba::new(255, 255, 255, 20));
        let mut store = FrameStore::single(frame);
        let mask = store.collision_mask(20, Rgba::MASK);
        assert_eq!(mask[0].pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(mask[0].pixel(1, 0), Some(Rgba::MASK));
        assert_eq!(mask[0].pixel(2, 0), Some(Rgba::MASK));
    }

    #[test]
    fn mask_is_cached_until_bite() {
        let mut store = FrameStore::single(opaque(8, 8));
        assert!(store.is_mask_dirty());
        store.collision_mask(20, Rgba::MASK);
        assert!(!store.is_mask_dirty());

        store.bite(IVec2::new(4, 4), 2);
        assert!(store.is_mask_dirty());
        let mask = store.collision_mask(20, Rgba::MASK);
        assert_eq!(mask[0].alpha(4, 4), Some(0));
        assert_eq!(mask[0].alpha(0, 0), Some(255));
    }

    #[test]
    fn bite_clears_disc_in_every_frame() {
        let mut store = FrameStore::new(vec![opaque(10, 10), opaque(10, 10)]).unwrap();
        let center = IVec2::new(5, 5);
        store.bite(center, 3);

        for frame in store.frames() {
            for y in 0..10 {
                for x in 0..10 {
                    let d2 = (x - 5) * (x - 5) + (y - 5) * (y - 5);
                    let expected = if d2 <= 9 { 0 } else { 255 };
                    assert_eq!(frame.alpha(x, y), Some(expected), "pixel ({x}, {y})");
                }
            }
            // colour channels survive
            assert_eq!(frame.pixel(5, 5).unwrap().r, 200);
        }
    }

    #[test]
    fn bite_is_clipped_to_frame() {
        let mut store = FrameStore::single(opaque(4, 4));
        store.bite(IVec2::new(0, 0), 10);
        assert!(store.frames()[0].pixels().iter().all(|p| p.a == 0));

        let mut store = FrameStore::single(opaque(4, 4));
        store.bite(IVec2::new(-20, -20), 3);
        assert!(store.frames()[0].pixels().iter().all(|p| p.a == 255));
    }

    #[test]
    fn bite_extent_saturates() {
        let mut store = FrameStore::single(opaque(5, 5));
        store.bite(IVec2::new(2, 2), i32::MAX);
        assert!(store.frames()[0].pixels().iter().all(|p| p.a == 0));

        let mut store = FrameStore::single(opaque(5, 5));
        store.bite(IVec2::new(i32::MAX, i32::MIN), 3);
        assert!(store.frames()[0].pixels().iter().all(|p| p.a == 255));

        let mut store = FrameStore::single(opaque(5, 5));
        store.bite(IVec2::new(i32::MIN, 2), i32::MAX);
        assert!(store.frames()[0].pixels().iter().all(|p| p.a == 255));
    }

    #[test]
    fn restore_undoes_bites() {
        let mut store = FrameStore::single(opaque(6, 6));
        store.bite(IVec2::new(3, 3), 2);
        assert_eq!(store.alpha(0, 3, 3), Some(0));
        store.restore();
        assert_eq!(store.alpha(0, 3, 3), Some(255));
        assert!(store.is_mask_dirty());
    }
}
