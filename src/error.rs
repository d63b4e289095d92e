use alloc::string::String;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemapError {
    #[error("unknown colormap {0:?}")]
    UnknownColormap(String),

    #[error(
        "colormap tables must be non-empty and equal in length, got source={source_len} target={target_len}"
    )]
    TableMismatch {
        source_len: usize,
        target_len: usize,
    },

    #[error("colormap table size must be greater than zero")]
    InvalidTableSize,

    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error(
        "region {width}x{height} at ({left}, {top}) exceeds image bounds {image_width}x{image_height}"
    )]
    RegionOutOfBounds {
        left: usize,
        top: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("pixel access failed at ({x}, {y}): {message}")]
    PixelIo { x: usize, y: usize, message: String },
}

impl RemapError {
    /// Build a [`RemapError::PixelIo`] for a host read or write failure.
    pub fn pixel_io(x: usize, y: usize, message: impl Into<String>) -> Self {
        Self::PixelIo {
            x,
            y,
            message: message.into(),
        }
    }
}
