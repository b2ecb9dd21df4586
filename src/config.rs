//! Configuration for atax.
//!
//! Submodules:
//! - [load]: the [Config] struct and explicit file loading.
//! - [general]: message lifetime and other general settings.
//! - [input]: key bindings and external program candidates.
//! - [theme]: colors of the listing roles and bars.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::{General, InternalGeneral};
pub use input::{Keys, Programs};
pub use load::{CONFIG_ENV, Config, RawConfig};
pub use theme::{ColorPair, Theme};
