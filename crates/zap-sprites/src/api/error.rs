/// Ways that building a sprite's frames can fail.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum FrameError {
    /// A sprite needs at least one frame.
    #[error("a sprite needs at least one frame")]
    Empty,
    /// Frames must have a non-zero width and height.
    #[error("frame has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    /// Every frame of a sprite must match the first frame's dimensions.
    #[error("frame {index} is {found_width}x{found_height}, expected {width}x{height}")]
    SizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },
    /// A raw pixel buffer did not hold `width * height` RGBA pixels.
    #[error("pixel buffer holds {found} bytes, expected {expected}")]
    BufferLength { expected: usize, found: usize },
    /// A sprite sheet cannot be split evenly into the requested grid.
    #[error("{width}x{height} sheet cannot be split into {cols} columns and {rows} rows")]
    SheetGrid {
        width: u32,
        height: u32,
        cols: u32,
        rows: u32,
    },
}
