use thiserror::Error;

use crate::vertex::AttributeFormat;

/// Setup failures reported by the engine.
///
/// Only construction and configuration calls return these. Per-frame paths
/// (clipping, rasterization, shading) never fail; they degrade and record the
/// outcome in [`RasterStats`](crate::raster::RasterStats) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("render target has zero size ({width}x{height})")]
    ZeroSizedTarget { width: usize, height: usize },

    #[error("depth buffer is {depth_width}x{depth_height}, target is {width}x{height}")]
    DepthSizeMismatch {
        width: usize,
        height: usize,
        depth_width: usize,
        depth_height: usize,
    },

    #[error("vertex stride {stride} exceeds the {max} byte vertex capacity")]
    LayoutTooLarge { stride: usize, max: usize },

    #[error("attribute at offset {offset} ({size} bytes) does not fit in stride {stride}")]
    AttributeOutOfBounds { offset: usize, size: usize, stride: usize },

    #[error("vertex layout declares more than one position attribute")]
    DuplicatePosition,

    #[error("position attribute must be Float4 (x, y, z, w), found {format:?}")]
    PositionNotFloat4 { format: AttributeFormat },

    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),

    #[error("worker pool needs at least one worker")]
    NoWorkers,

    #[error("clip polygon is full ({capacity} vertices)")]
    PolygonFull { capacity: usize },
}
