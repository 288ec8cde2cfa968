//! Application core — ports, the command table, events, and the
//! polling-loop service.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
