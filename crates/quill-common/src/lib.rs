//! Common utilities for the Quill parser crates.
//!
//! - **Warning System** - deduplicated, colored stderr output for parse issues

pub mod warning;
