//! Pure size-budget math.
//!
//! Translates the user-facing compression level into the size ceiling (in
//! megabytes) handed to the compression backend. Everything here is pure and
//! testable without any I/O or images.

/// Smallest budget ever handed to the backend, in megabytes.
///
/// Keeps tiny originals from producing a degenerate near-zero target the
/// encoder cannot hit.
pub const MIN_BUDGET_MB: f64 = 0.05;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Compute the output size ceiling for one compression run.
///
/// `ratio = percent / 100`, applied to the original size in megabytes, then
/// floored at [`MIN_BUDGET_MB`]. Total over its domain: any positive size and
/// any percent in [1, 100] produce a positive budget; there is no error path.
///
/// The level scales the ceiling *up*: level 90 on a 10 MB original yields a
/// 9 MB budget, level 10 yields 1 MB. Deliberate — see
/// [`tests::higher_level_allows_larger_output`].
///
/// # Examples
/// ```
/// # use pixpress::budget::size_budget_mb;
/// assert_eq!(size_budget_mb(10 * 1024 * 1024, 50), 5.0);
/// assert_eq!(size_budget_mb(1024, 50), 0.05);
/// ```
pub fn size_budget_mb(original_size_bytes: u64, percent: u8) -> f64 {
    let ratio = f64::from(percent) / 100.0;
    let raw = original_size_bytes as f64 / BYTES_PER_MB * ratio;
    raw.max(MIN_BUDGET_MB)
}

/// Convert a megabyte budget into the byte count the encoder loop compares
/// against.
pub fn budget_bytes(size_budget_mb: f64) -> u64 {
    (size_budget_mb * BYTES_PER_MB) as u64
}
