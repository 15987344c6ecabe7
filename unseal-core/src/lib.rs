//! Unseal Core - C2PA provenance metadata detection and removal
//!
//! This crate finds and strips C2PA / Content Credentials metadata from JPEG
//! and PNG images while leaving the pixels alone.
//!
//! # Features
//!
//! - Tolerant JPEG marker-segment and PNG chunk walkers (truncated or
//!   malformed input yields a partial walk, never a panic)
//! - Recall-oriented C2PA detection over APP11/XMP segments and PNG
//!   text chunks
//! - Two-tier removal: decode/re-encode first, selective segment/chunk
//!   copy as fallback
//! - Every cleaned output is re-checked before it is returned
//! - Optional diagnostic sink instead of global logging switches
//!
//! # Example
//!
//! ```no_run
//! use unseal_core::{detect, Outcome, RecordingSink, RemovalConfig, Remover};
//!
//! let input = std::fs::read("photo.jpg").unwrap();
//! if detect(&input) {
//!     let sink = RecordingSink::new();
//!     let removal = Remover::new(RemovalConfig::from_env())
//!         .with_sink(&sink)
//!         .remove(&input);
//!
//!     match removal.outcome {
//!         Outcome::Cleaned => std::fs::write("photo.cleaned.jpg", &removal.bytes).unwrap(),
//!         other => eprintln!("left untouched: {other}"),
//!     }
//!     for diagnostic in sink.take() {
//!         eprintln!("{diagnostic}");
//!     }
//! }
//! ```

pub mod config;
pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod jpeg;
pub mod png;
#[cfg(feature = "reencode")]
pub mod reencode;
pub mod remove;
pub mod span;
pub mod walk;

// Re-export main types for convenience
pub use config::{RemovalConfig, DEFAULT_JPEG_QUALITY};
pub use detect::{detect, inspect, Detection, Detector, Evidence};
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use error::{Result, UnsealError};
pub use format::{sniff, sniff_strict, ImageFormat};
pub use remove::{remove, Outcome, Removal, Remover, Stage, Strategy};
pub use span::Span;
pub use walk::WalkStop;

#[cfg(feature = "reencode")]
pub use reencode::Reencoder;
