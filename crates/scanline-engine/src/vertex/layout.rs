use crate::error::RasterError;

/// Byte capacity of an opaque [`Vertex`](super::Vertex).
///
/// Every layout's stride must fit in this many bytes.
pub const MAX_VERTEX_SIZE: usize = 128;

/// Numeric format of a single attribute. All components are native-endian `f32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttributeFormat {
    Float,
    Float2,
    Float3,
    Float4,
}

impl AttributeFormat {
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            AttributeFormat::Float => 1,
            AttributeFormat::Float2 => 2,
            AttributeFormat::Float3 => 3,
            AttributeFormat::Float4 => 4,
        }
    }

    /// Size in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        self.components() * size_of::<f32>()
    }
}

/// Semantic label of an attribute slot.
///
/// Only `Position` has meaning to the pipeline; every other usage is carried
/// through clipping and interpolation untouched and handed to the shading
/// function.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Usage {
    Position,
    Color,
    TexCoord,
    Normal,
    Generic(u8),
}

/// Selects which attributes an operation applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UsageFilter {
    All,
    Only(Usage),
    Except(Usage),
}

impl UsageFilter {
    #[inline]
    pub fn accepts(self, usage: Usage) -> bool {
        match self {
            UsageFilter::All => true,
            UsageFilter::Only(u) => u == usage,
            UsageFilter::Except(u) => u != usage,
        }
    }
}

/// One attribute descriptor: where it lives, how wide it is, what it means.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Attribute {
    pub offset: usize,
    pub format: AttributeFormat,
    pub usage: Usage,
}

impl Attribute {
    #[inline]
    pub const fn new(offset: usize, format: AttributeFormat, usage: Usage) -> Self {
        Self { offset, format, usage }
    }

    #[inline]
    pub(crate) const fn end(&self) -> usize {
        self.offset + self.format.size()
    }
}

/// Describes how raw vertex bytes are interpreted.
///
/// Invariants (checked at construction):
/// - `stride <= MAX_VERTEX_SIZE`
/// - every attribute lies within `stride`
/// - at most one attribute is tagged `Usage::Position`
/// - the position attribute, if any, is `Float4`
///
/// A layout with no position attribute is accepted (and logged); position
/// lookups through it degrade to the zero vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexLayout {
    attributes: Vec<Attribute>,
    stride: usize,
    position: Option<usize>,
}

impl VertexLayout {
    /// A layout with no attributes. Every generic operation through it is a no-op.
    #[inline]
    pub const fn empty() -> Self {
        Self { attributes: Vec::new(), stride: 0, position: None }
    }

    /// Builds a layout from explicit offsets.
    pub fn new(stride: usize, attributes: impl Into<Vec<Attribute>>) -> Result<Self, RasterError> {
        let attributes = attributes.into();

        if stride > MAX_VERTEX_SIZE {
            return Err(RasterError::LayoutTooLarge { stride, max: MAX_VERTEX_SIZE });
        }

        let mut position = None;
        for (i, attr) in attributes.iter().enumerate() {
            if attr.end() > stride {
                return Err(RasterError::AttributeOutOfBounds {
                    offset: attr.offset,
                    size: attr.format.size(),
                    stride,
                });
            }
            if attr.usage == Usage::Position {
                if position.is_some() {
                    return Err(RasterError::DuplicatePosition);
                }
                if attr.format != AttributeFormat::Float4 {
                    return Err(RasterError::PositionNotFloat4 { format: attr.format });
                }
                position = Some(i);
            }
        }

        if position.is_none() {
            log::warn!("vertex layout has no position attribute; positions will read as zero");
        }

        Ok(Self { attributes, stride, position })
    }

    /// Builds a tightly packed layout: attributes are placed back to back in
    /// the given order and the stride is their total size.
    pub fn packed(fields: &[(AttributeFormat, Usage)]) -> Result<Self, RasterError> {
        let mut offset = 0;
        let attributes: Vec<Attribute> = fields
            .iter()
            .map(|&(format, usage)| {
                let attr = Attribute::new(offset, format, usage);
                offset += format.size();
                attr
            })
            .collect();
        Self::new(offset, attributes)
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The position attribute, if the layout has one.
    #[inline]
    pub fn position(&self) -> Option<&Attribute> {
        self.position.map(|i| &self.attributes[i])
    }

    /// First attribute carrying `usage`.
    #[inline]
    pub fn find(&self, usage: Usage) -> Option<&Attribute> {
        if usage == Usage::Position {
            return self.position();
        }
        self.attributes.iter().find(|a| a.usage == usage)
    }
}
