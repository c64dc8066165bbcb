//! Validation utilities
//!
//! Offline checks of save files, independent of any store.

mod roundtrip;

pub use roundtrip::{inspect_save_file, SaveFileSummary};
