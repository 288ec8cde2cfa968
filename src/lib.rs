//! Lightbridge firmware library.
//!
//! USB-CDC traffic-light bridge: the host writes single ASCII command
//! characters to a virtual serial port, the firmware drives three indicator
//! lamp lines (red/amber/green) and echoes one acknowledgment byte per
//! recognized command.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All AVR-specific code is guarded by
//! `#[cfg(target_arch = "avr")]` within each module.

#![no_std]
#![deny(unused_must_use)]

pub mod app;
pub mod config;

// Hardware-facing modules; the AVR implementations are guarded by cfg
// attributes inside.
pub mod adapters;
pub mod drivers;
