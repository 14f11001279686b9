//! Common utilities for the tern viewer.
//!
//! This crate provides shared infrastructure used by the other
//! components:
//! - **Warning System** - colored, deduplicated terminal warnings
//! - **HTTP Fetch** - blocking page retrieval with a content-type check
//! - **URL Helpers** - lightweight well-formedness probing

pub mod net;
pub mod url;
pub mod warning;
