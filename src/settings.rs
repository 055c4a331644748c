//! The user-facing compression level.
//!
//! The level is presented as a percentage slider: integers in [10, 90] in
//! steps of 5, defaulting to 90. [`CompressionLevel::new`] clamps and snaps so
//! every constructed value is one the slider could produce. The level belongs
//! to the session, not to any particular image — selecting a new source does
//! not reset it.

pub const LEVEL_MIN: u8 = 10;
pub const LEVEL_MAX: u8 = 90;
pub const LEVEL_STEP: u8 = 5;
pub const LEVEL_DEFAULT: u8 = 90;

/// Compression level percentage (10–90, step 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// Clamp to [10, 90] and snap to the nearest multiple of 5 (half rounds
    /// up), mirroring what the slider control can emit.
    pub fn new(value: u8) -> Self {
        let snapped = (value.saturating_add(LEVEL_STEP / 2) / LEVEL_STEP) * LEVEL_STEP;
        Self(snapped.clamp(LEVEL_MIN, LEVEL_MAX))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(LEVEL_DEFAULT)
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
