//! URL handling module for Image-Survey
//!
//! This module provides scheme defaulting for input entries and resolution of
//! image references against the page they were found on.

mod normalize;
mod resolve;

// Re-export main functions
pub use normalize::{ensure_scheme, parse_page_url};
pub use resolve::{is_data_uri, resolve_reference};
