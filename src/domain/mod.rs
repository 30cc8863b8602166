//! Domain layer - date patterns, windows, and path templates

pub mod pattern;
pub mod template;
pub mod window;

pub use pattern::{infer, infer_batch, DatePattern, DateResolution};
pub use template::{format_path, PlaceholderFormats};
pub use window::{most_recent_aligned, resolve_window, DateWindowSpec, ResolvedWindow, TimeScale};
