//! Board-agnostic core logic for the dot plotter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuators, sensors, buttons, clock, display)
//! - Raster handling (pixel rows, image sources, the row encoder)
//! - Motion primitives and vertical homing
//! - The print engine (row driver, pause/abort controls, print session)
//! - State machine for the operator flow
//! - Configuration type definitions and parsing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the log macros are visible to every module below
#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod error;
pub mod motion;
pub mod raster;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod sim;

pub use error::{ImageError, PlotError};
