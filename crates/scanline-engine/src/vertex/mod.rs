//! Generic vertex data.
//!
//! A vertex is a fixed-capacity byte buffer. Its meaning comes from a
//! [`VertexLayout`] (attribute offsets, numeric formats, usage tags), and all
//! generic arithmetic over it goes through an [`Assembler`]. Concrete formats
//! implement [`VertexFormat`] to supply the layout and the shading function.

mod assembler;
mod buffer;
mod format;
mod formats;
mod layout;

pub use assembler::Assembler;
pub use buffer::Vertex;
pub use format::VertexFormat;
pub use formats::{ColorFormat, ColorVertex, FlatFormat};
pub use layout::{Attribute, AttributeFormat, MAX_VERTEX_SIZE, Usage, UsageFilter, VertexLayout};
