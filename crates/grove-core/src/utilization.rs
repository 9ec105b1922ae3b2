//! Diameter-class buckets used to disaggregate per-species values.

use std::fmt;

use crate::error::CodeError;

/// A utilization class.
///
/// Indices are signed and start at -1, matching how per-utilization
/// coefficient vectors are laid out in the source tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UtilizationClass {
    /// Trees below 7.5 cm.
    Small,
    /// The sum over every class from 7.5 cm up.
    All,
    /// 7.5 cm to 12.5 cm.
    U75To125,
    /// 12.5 cm to 17.5 cm.
    U125To175,
    /// 17.5 cm to 22.5 cm.
    U175To225,
    /// Over 22.5 cm.
    Over225,
}

impl UtilizationClass {
    /// Every class, in index order.
    pub const ALL: [UtilizationClass; 6] = [
        UtilizationClass::Small,
        UtilizationClass::All,
        UtilizationClass::U75To125,
        UtilizationClass::U125To175,
        UtilizationClass::U175To225,
        UtilizationClass::Over225,
    ];

    /// The four diameter bands summed by [`UtilizationClass::All`].
    pub const UTIL_CLASSES: [UtilizationClass; 4] = [
        UtilizationClass::U75To125,
        UtilizationClass::U125To175,
        UtilizationClass::U175To225,
        UtilizationClass::Over225,
    ];

    /// Signed index, from -1 (small) to 4 (over 22.5 cm).
    pub fn index(self) -> i32 {
        match self {
            Self::Small => -1,
            Self::All => 0,
            Self::U75To125 => 1,
            Self::U125To175 => 2,
            Self::U175To225 => 3,
            Self::Over225 => 4,
        }
    }

    /// Decode a class from its signed index.
    pub fn from_index(index: i32) -> Result<Self, CodeError> {
        Self::ALL
            .into_iter()
            .find(|c| c.index() == index)
            .ok_or_else(|| CodeError::Unrecognized {
                kind: "utilization class",
                code: index.to_string(),
            })
    }

    /// Lower diameter bound in centimetres.
    pub fn lower_bound(self) -> f32 {
        match self {
            Self::Small => 0.0,
            Self::All | Self::U75To125 => 7.5,
            Self::U125To175 => 12.5,
            Self::U175To225 => 17.5,
            Self::Over225 => 22.5,
        }
    }
}

impl fmt::Display for UtilizationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Small => "<7.5 cm",
            Self::All => "ALL",
            Self::U75To125 => "7.5 - 12.5 cm",
            Self::U125To175 => "12.5 - 17.5 cm",
            Self::U175To225 => "17.5 - 22.5 cm",
            Self::Over225 => ">22.5 cm",
        };
        f.write_str(label)
    }
}
