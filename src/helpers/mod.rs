//! Helper functions shared by the renderers
//!
//! Date formatting, URL generation and HTML construction.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
