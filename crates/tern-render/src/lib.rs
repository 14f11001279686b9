//! Tree-to-text interpreter for the tern viewer.
//!
//! # Scope
//!
//! The final stage of the rendering pipeline: a depth-first walk over the
//! document tree that emits a linear, ANSI-styled text stream plus
//! side-channel metadata (page title, hyperlink report). Formatting is
//! keyed to semantic tag meaning through a single per-tag transform
//! table; whitespace between blocks is negotiated so adjacent block
//! elements never accumulate doubled separators.
//!
//! No I/O happens here: rendering is a pure, synchronous, deterministic
//! function of its tree input.

/// Entity reference decoding.
pub mod entity;
/// Tree walking and the per-tag transform table.
pub mod interpret;
/// Whitespace normalization for text leaves.
pub mod sanitize;
/// ANSI style escape constants.
pub mod style;

pub use entity::decode_entities;
pub use interpret::{RenderResult, render};
pub use sanitize::sanitize;
