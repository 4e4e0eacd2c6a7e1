//! Field-code vocabularies for header-declared record layouts.
//!
//! The header declares which scalar fields a body record carries and in what
//! order. Each vocabulary keeps a `UserDefined` arm holding the raw code so
//! that files using codes outside the known catalog still round-trip
//! losslessly instead of failing.

use crate::units::Quantity;

/// Per-tally total fields declared by the `TT` record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TotalField {
    /// Total vehicle count for the period. Code `V`.
    Volume,
    /// Counts-weighted average speed, stored km/h. Code `A`.
    AverageSpeed,
    /// Average gap between vehicles in seconds. Code `G`.
    AverageGap,
    /// Detector occupancy percentage. Code `O`.
    Occupancy,
    /// A code outside the known catalog, preserved verbatim.
    UserDefined(String),
}

impl TotalField {
    /// Map a wire code to a total field. Unknown codes are preserved.
    pub fn from_code(code: &str) -> Self {
        match code {
            "V" => TotalField::Volume,
            "A" => TotalField::AverageSpeed,
            "G" => TotalField::AverageGap,
            "O" => TotalField::Occupancy,
            other => TotalField::UserDefined(other.into()),
        }
    }

    /// The wire code for this field.
    pub fn as_code(&self) -> &str {
        match self {
            TotalField::Volume => "V",
            TotalField::AverageSpeed => "A",
            TotalField::AverageGap => "G",
            TotalField::Occupancy => "O",
            TotalField::UserDefined(code) => code,
        }
    }

    /// The physical quantity converted at the unit boundary, if any.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            TotalField::AverageSpeed => Some(Quantity::Speed),
            _ => None,
        }
    }
}

/// Vehicle observation fields declared by the `VF` record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservationField {
    /// Vehicle speed, stored km/h. Code `SP`.
    Speed,
    /// Vehicle length, stored metres. Code `LE`.
    Length,
    /// Gap to the preceding vehicle in seconds. Code `GP`.
    Gap,
    /// Headway to the preceding vehicle in seconds. Code `HW`.
    Headway,
    /// Primary type classification ID. Code `C1`.
    TypeClass1,
    /// Secondary type classification ID. Code `C2`.
    TypeClass2,
    /// Tertiary type classification ID. Code `C3`.
    TypeClass3,
    /// Gross vehicle weight, stored tonnes. Code `WT`.
    GrossWeight,
    /// Number of axles. Code `AC`.
    AxleCount,
    /// A code outside the known catalog, preserved verbatim.
    UserDefined(String),
}

impl ObservationField {
    /// Map a wire code to an observation field. Unknown codes are preserved.
    pub fn from_code(code: &str) -> Self {
        match code {
            "SP" => ObservationField::Speed,
            "LE" => ObservationField::Length,
            "GP" => ObservationField::Gap,
            "HW" => ObservationField::Headway,
            "C1" => ObservationField::TypeClass1,
            "C2" => ObservationField::TypeClass2,
            "C3" => ObservationField::TypeClass3,
            "WT" => ObservationField::GrossWeight,
            "AC" => ObservationField::AxleCount,
            other => ObservationField::UserDefined(other.into()),
        }
    }

    /// The wire code for this field.
    pub fn as_code(&self) -> &str {
        match self {
            ObservationField::Speed => "SP",
            ObservationField::Length => "LE",
            ObservationField::Gap => "GP",
            ObservationField::Headway => "HW",
            ObservationField::TypeClass1 => "C1",
            ObservationField::TypeClass2 => "C2",
            ObservationField::TypeClass3 => "C3",
            ObservationField::GrossWeight => "WT",
            ObservationField::AxleCount => "AC",
            ObservationField::UserDefined(code) => code,
        }
    }

    /// The physical quantity converted at the unit boundary, if any.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            ObservationField::Speed => Some(Quantity::Speed),
            ObservationField::Length => Some(Quantity::Length),
            ObservationField::GrossWeight => Some(Quantity::Weight),
            _ => None,
        }
    }
}

/// Axle sub-record fields declared by the `VA` record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxleField {
    /// Axle weight, stored tonnes. Code `WT`.
    Weight,
    /// Spacing to the preceding axle, stored metres. Code `SP`.
    Spacing,
    /// A code outside the known catalog, preserved verbatim.
    UserDefined(String),
}

impl AxleField {
    /// Map a wire code to an axle field. Unknown codes are preserved.
    pub fn from_code(code: &str) -> Self {
        match code {
            "WT" => AxleField::Weight,
            "SP" => AxleField::Spacing,
            other => AxleField::UserDefined(other.into()),
        }
    }

    /// The wire code for this field.
    pub fn as_code(&self) -> &str {
        match self {
            AxleField::Weight => "WT",
            AxleField::Spacing => "SP",
            AxleField::UserDefined(code) => code,
        }
    }

    /// The physical quantity converted at the unit boundary, if any.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            AxleField::Weight => Some(Quantity::Weight),
            AxleField::Spacing => Some(Quantity::Length),
            AxleField::UserDefined(_) => None,
        }
    }
}
