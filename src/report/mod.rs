//! Output renderers.
//!
//! - [`terminal`] — colored summary table on stderr, page body to stdout or a file

pub mod terminal;
