//! Adapters — implementations of the port traits over real collaborators.

pub mod indicator;
pub mod log_sink;
pub mod usb_serial;
