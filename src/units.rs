//! The unit boundary between file text and the metric in-memory model.
//!
//! Every stored value is metric (km/h, metres, tonnes). The display units a
//! file declares in its `FU` record are applied only while encoding or
//! decoding text, through the [`UnitConverter`] collaborator. The codec ships
//! [`StandardConverter`] covering the two unit systems the format defines;
//! callers with exotic needs substitute their own implementation.

/// The physical quantities the codec converts at the text boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Speeds, metric form km/h.
    Speed,
    /// Vehicle and bin-boundary lengths, metric form metres.
    Length,
    /// Gross and axle weights, metric form tonnes.
    Weight,
}

/// Display unit system declared by a file's `FU` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSystem {
    /// km/h, metres, tonnes. Code `0`.
    #[default]
    Metric,
    /// mi/h, feet, short tons. Code `1`.
    Imperial,
}

impl UnitSystem {
    /// The numeric code used on the wire.
    pub fn to_code(self) -> u8 {
        match self {
            UnitSystem::Metric => 0,
            UnitSystem::Imperial => 1,
        }
    }

    /// Convert a wire code to a unit system. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(UnitSystem::Metric),
            1 => Some(UnitSystem::Imperial),
            _ => None,
        }
    }
}

/// Converts values between a file's declared display units and metric storage.
///
/// Implementations must be pure: the codec may call either direction any
/// number of times while encoding or decoding a single dataset.
pub trait UnitConverter {
    /// Convert a value read from file text into its metric form.
    fn to_metric(&self, quantity: Quantity, value: f64) -> f64;

    /// Convert a stored metric value into the display form written to text.
    fn from_metric(&self, quantity: Quantity, value: f64) -> f64;
}

const KPH_PER_MPH: f64 = 1.609_344;
const METRES_PER_FOOT: f64 = 0.3048;
const TONNES_PER_SHORT_TON: f64 = 0.907_184_74;

/// The standard conversion table for the unit systems the format defines.
///
/// Metric files pass values through unchanged; imperial files convert with
/// the exact statute factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConverter {
    system: UnitSystem,
}

impl StandardConverter {
    /// Create a converter for the given declared unit system.
    pub fn new(system: UnitSystem) -> Self {
        StandardConverter { system }
    }

    fn factor(&self, quantity: Quantity) -> f64 {
        match self.system {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => match quantity {
                Quantity::Speed => KPH_PER_MPH,
                Quantity::Length => METRES_PER_FOOT,
                Quantity::Weight => TONNES_PER_SHORT_TON,
            },
        }
    }
}

impl UnitConverter for StandardConverter {
    fn to_metric(&self, quantity: Quantity, value: f64) -> f64 {
        value * self.factor(quantity)
    }

    fn from_metric(&self, quantity: Quantity, value: f64) -> f64 {
        value / self.factor(quantity)
    }
}
