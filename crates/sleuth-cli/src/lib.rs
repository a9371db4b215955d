//! # sleuth-cli
//!
//! Console front end. `console::play` drives a session over any line-based
//! input and output; `render` formats person cards and the final listing.

pub mod console;
pub mod render;
