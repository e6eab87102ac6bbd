//! Choice of the three bands shown as image channels

use std::fmt;

/// Why an explicit band list was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandSelectionError {
    /// Exactly three bands are stacked into the image
    WrongCount(usize),
    /// Band indices are 1-based and bounded by the band count
    OutOfRange { band: u32, band_count: usize },
}

impl fmt::Display for BandSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandSelectionError::WrongCount(n) => write!(f, "expected 3 band indices, got {}", n),
            BandSelectionError::OutOfRange { band, band_count } => {
                write!(f, "band {} out of range 1..={}", band, band_count)
            },
        }
    }
}

impl std::error::Error for BandSelectionError {}

/// Three 1-based band indices, in channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSelection {
    bands: [u32; 3],
}

impl BandSelection {
    /// Default selection `[1, n/4, n/2]`
    ///
    /// The fourth candidate `n - 1` of the heuristic is never used. Indices
    /// that come out as 0 for fewer than four bands are raised to 1, so
    /// small rasters repeat their first band.
    pub fn heuristic(band_count: usize) -> Self {
        let candidates = [1, band_count / 4, band_count / 2, band_count.saturating_sub(1)];
        let mut bands = [1u32; 3];
        for (slot, &candidate) in bands.iter_mut().zip(candidates.iter()) {
            *slot = candidate.clamp(1, u32::MAX as usize) as u32;
        }
        BandSelection { bands }
    }

    /// Validates a caller-supplied selection against the band count
    pub fn explicit(bands: &[u32], band_count: usize) -> Result<Self, BandSelectionError> {
        if bands.len() != 3 {
            return Err(BandSelectionError::WrongCount(bands.len()));
        }
        if let Some(&band) = bands.iter().find(|&&b| b == 0 || b as usize > band_count) {
            return Err(BandSelectionError::OutOfRange { band, band_count });
        }
        Ok(BandSelection { bands: [bands[0], bands[1], bands[2]] })
    }

    /// Explicit selection when given, heuristic otherwise
    pub fn resolve(bands: Option<&[u32]>, band_count: usize) -> Result<Self, BandSelectionError> {
        match bands {
            Some(bands) => Self::explicit(bands, band_count),
            None => Ok(Self::heuristic(band_count)),
        }
    }

    pub fn indices(&self) -> [u32; 3] {
        self.bands
    }

    /// Indices as used by the band reader
    pub fn zero_based(&self) -> Vec<usize> {
        self.bands.iter().map(|&b| b as usize - 1).collect()
    }
}

impl fmt::Display for BandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.bands[0], self.bands[1], self.bands[2])
    }
}
