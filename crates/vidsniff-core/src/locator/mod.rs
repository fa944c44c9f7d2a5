//! Locator identity and filename derivation.
//!
//! `normalize` gives every discovered locator a canonical form used for
//! dedup; the filename helpers turn an entry's label or URL path into a
//! safe name for the saved download.

mod filename;
mod normalize;

pub use filename::{derive_filename, filename_from_path, sanitize_filename};
pub use normalize::normalize;
