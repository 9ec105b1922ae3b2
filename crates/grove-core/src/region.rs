//! Regions and layer kinds.

use std::fmt;

use crate::error::CodeError;

/// Broad geographic region a BEC zone belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Coastal region, alias `'C'`.
    Coastal,
    /// Interior region, alias `'I'`.
    Interior,
}

impl Region {
    /// Both regions, in canonical order.
    pub const ALL: [Region; 2] = [Region::Coastal, Region::Interior];

    /// Decode a region from its single-character alias.
    pub fn from_alias(alias: char) -> Result<Self, CodeError> {
        match alias {
            'C' => Ok(Self::Coastal),
            'I' => Ok(Self::Interior),
            other => Err(CodeError::Unrecognized {
                kind: "region",
                code: other.to_string(),
            }),
        }
    }

    /// The single-character alias.
    pub fn alias(self) -> char {
        match self {
            Self::Coastal => 'C',
            Self::Interior => 'I',
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias())
    }
}

/// The kind of a stand layer.
///
/// The set is closed: bank addressing treats anything else as caller
/// misuse rather than bad data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerType {
    /// The main canopy layer.
    Primary,
    /// Residual older trees above the primary layer.
    Veteran,
}

impl LayerType {
    /// Every layer kind, in canonical order.
    pub const ALL: [LayerType; 2] = [LayerType::Primary, LayerType::Veteran];

    /// Decode a layer kind from its file code (`"P"` or `"V"`).
    pub fn from_code(code: &str) -> Result<Self, CodeError> {
        match code.trim() {
            "P" => Ok(Self::Primary),
            "V" => Ok(Self::Veteran),
            other => Err(CodeError::Unrecognized {
                kind: "layer",
                code: other.to_string(),
            }),
        }
    }

    /// The file code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Primary => "P",
            Self::Veteran => "V",
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Veteran => f.write_str("veteran"),
        }
    }
}
