#![no_main]

//! Fuzz target for the removal state machine
//!
//! Whatever the input, cleaned output must not be flagged by the detector,
//! and any other outcome must hand back the input unchanged.
//!
//! Run with: cargo +nightly fuzz run fuzz_remove

use libfuzzer_sys::fuzz_target;
use unseal_core::{detect, remove};

fuzz_target!(|data: &[u8]| {
    let removal = remove(data);
    if removal.is_cleaned() {
        assert!(!detect(&removal.bytes));
    } else {
        assert_eq!(removal.as_bytes(), data);
    }
});
