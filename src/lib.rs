//! # pixpress
//!
//! An image compressor that keeps EXIF metadata across the squeeze. You hand
//! it an image and a compression level; it hands back a smaller file that
//! still knows what camera took it.
//!
//! # Architecture: One Pipeline, Two Capabilities
//!
//! A run is a straight line through three steps, with the interesting
//! machinery hidden behind two capability traits:
//!
//! ```text
//! level ──► size budget ──► Compressor ──► ExifCodec splice ──► result
//!           (pure math)     (fatal on       (best effort,
//!                            failure)        falls back)
//! ```
//!
//! The two external capabilities — lossy re-encoding and the EXIF binary
//! format — are not this crate's business. They sit behind the
//! [`compress::Compressor`] and [`metadata::ExifCodec`] traits with
//! production implementations on the `image` crate and
//! `img-parts`/`kamadak-exif` respectively, so either can be swapped (or
//! mocked) without touching pipeline logic.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`budget`] | Pure level → size-budget math with the 0.05 MB floor |
//! | [`settings`] | The user-facing level: 10–90, step 5, default 90 |
//! | [`compress`] | Compression capability: trait, params, production backend |
//! | [`metadata`] | EXIF capability: decode / encode / splice, tag map types |
//! | [`pipeline`] | The orchestrator: one-shot runs, failure policy |
//! | [`session`] | Caller-owned state: selection, level, single-slot result register |
//! | [`naming`] | `compressed-<name>` output filename derivation |
//! | [`inputs`] | CLI argument expansion (files and walked directories) |
//! | [`output`] | Report rendering, human and JSON |
//! | [`config`] | `pixpress.toml` loading and the stock template |
//!
//! # Design Decisions
//!
//! ## Asymmetric Failure Policy
//!
//! Metadata is a side channel: extraction and reinsertion failures are logged
//! and absorbed, degrading to a metadata-less output. The compressed bytes
//! are the main channel: a compression failure is the only error that crosses
//! the pipeline boundary. Collapsing the two into one error type would force
//! identical handling; keeping them apart is the point.
//!
//! ## Lossless Metadata Carriage
//!
//! The production codec decodes tags for display and equality checks, but
//! what it splices back is the source's raw TIFF payload, byte for byte.
//! Maker notes and tags the decoder has no name for survive anyway.
//!
//! ## Best-Effort Budgets
//!
//! The backend steps quality and then scale toward the byte budget and
//! returns its smallest attempt when the budget is out of reach. A missed
//! budget is a diagnostic, not an error — the user asked for a smaller file,
//! not for no file.

pub mod budget;
pub mod compress;
pub mod config;
pub mod inputs;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;
