//! Screen-space triangle filling.
//!
//! - [`Projection`] maps clipped view-space vertices to the screen.
//! - [`Rasterizer`] walks scanlines, depth tests and shades pixels.
//! - [`RowSink`] abstracts how rows of the target are reached, exclusively
//!   ([`FrameRows`]) or through per-band locks ([`BandedRows`]).

mod fragment;
mod project;
mod rows;
mod scanline;
mod stats;
mod target;

pub use fragment::Fragment;
pub use project::Projection;
pub use rows::{BandedRows, FrameRows, RowSink, SharedRows};
pub use scanline::{Rasterizer, TriangleShape};
pub use stats::RasterStats;
pub use target::{DepthBuffer, RenderTarget, FAR_DEPTH};
