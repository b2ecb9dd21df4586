//! Miscellaneous utility functions for atax.
//!
//! - [cli]: command-line parsing, help and key listing.
//! - [helpers]: color parsing, start directory and home shortening.

pub mod cli;
pub mod helpers;

pub use helpers::{get_home, parse_color, shorten_home_path, start_dir};
