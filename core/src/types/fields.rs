use std::fmt;

/// The four semantic fields pulled from a file's header
///
/// Values are lower-cased. A missing field is the empty string, never
/// `None`, so a failed extraction is simply `FieldSet::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FieldSet {
    /// Contrast agent (DICOM ContrastBolusAgent)
    pub contrast: String,

    /// Dose signal (DICOM KVP)
    pub dose: String,

    /// Reconstruction filter / kernel (DICOM ConvolutionKernel)
    pub filter: String,

    /// Anatomical direction / plane (DICOM SeriesDescription)
    pub direction: String,
}

impl FieldSet {
    /// Creates a field set, lower-casing every value
    pub fn new(
        contrast: impl AsRef<str>,
        dose: impl AsRef<str>,
        filter: impl AsRef<str>,
        direction: impl AsRef<str>,
    ) -> Self {
        Self {
            contrast: contrast.as_ref().to_lowercase(),
            dose: dose.as_ref().to_lowercase(),
            filter: filter.as_ref().to_lowercase(),
            direction: direction.as_ref().to_lowercase(),
        }
    }

    /// Returns whether no field carries a value
    pub fn is_empty(&self) -> bool {
        self.contrast.is_empty()
            && self.dose.is_empty()
            && self.filter.is_empty()
            && self.direction.is_empty()
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contrast={:?} dose={:?} filter={:?} direction={:?}",
            self.contrast, self.dose, self.filter, self.direction
        )
    }
}
