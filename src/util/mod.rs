//! Utility helpers shared across the widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure text and time helpers live here so components stay declarative and
//! the browser-specific parts are isolated behind the `csr` feature.

pub mod clock;
pub mod format;
