//! Classification bin systems for tally records.
//!
//! A tally line carries one integer count per bin for each classification
//! dimension the header declares. Three dimensions exist:
//!
//! - [`SpeedClassification`]: linear bins over speed, with a first bin whose
//!   width may differ from the rest and an open-ended final bin.
//! - [`LengthClassification`]: explicit ascending boundary cutoffs with an
//!   open-ended final bin.
//! - [`VehicleTypeClassification`]: bins mapping 1:1 onto an external
//!   classification ID range.
//!
//! All three expose the same record contract through [`BinSet`]:
//! `number_of_bins_in_record()` is always `maximum_bin() + 1`, the implicit
//! terminal unbounded bin included, even though each variant computes its
//! maximum bin differently.

mod length;
mod speed;
mod vehicle_type;

pub use length::LengthClassification;
pub use speed::SpeedClassification;
pub use vehicle_type::VehicleTypeClassification;

/// The uniform bin-count contract shared by all classification variants.
pub trait BinSet {
    /// Index of the highest bin, the open-ended terminal bin included.
    fn maximum_bin(&self) -> usize;

    /// Whether this classification currently records anything.
    ///
    /// A cleared classification keeps its slot in the header but contributes
    /// no tally part.
    fn is_recording(&self) -> bool;

    /// Number of count values each tally record carries for this dimension.
    fn number_of_bins_in_record(&self) -> usize {
        self.maximum_bin() + 1
    }
}
