//! verdate - Date-versioned dataset resolution
//!
//! A library for datasets whose files carry a calendar date in their path:
//! it infers the date-encoding convention, computes trailing reference
//! windows with optional weekday alignment, and selects, loads and
//! concatenates the files that fall inside them.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::VerdateError;
