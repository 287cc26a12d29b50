//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stipple-core on top of `embedded-hal` 1.0:
//!
//! - Motor drivers (DC H-bridge with encoder feedback, four-motor bank)
//! - Sensors (touch limit switch, reflectance)
//! - Debounced front-panel buttons
//! - Board composition

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod input;
pub mod motor;
pub mod sensor;

pub use board::Board;
