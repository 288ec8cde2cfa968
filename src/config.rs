//! USB device configuration.
//!
//! The identity and endpoint sizing the external USB stack presents to
//! the host at enumeration.  An explicitly owned value consumed once by
//! the channel adapter at startup; nothing mutates it afterwards.

use core::fmt;

/// Identity and endpoint sizing for the CDC virtual serial port.
///
/// The endpoint topology itself is fixed by the class: one control
/// interface, one bulk IN/OUT data endpoint pair, one interrupt
/// notification endpoint, none of them double-buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbBridgeConfig {
    /// USB vendor ID presented at enumeration.
    pub vendor_id: u16,
    /// USB product ID presented at enumeration.
    pub product_id: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
    /// Max packet size of the default control endpoint, in bytes.
    pub control_ep_size: u8,
    /// Max packet size of the bulk data endpoint pair, in bytes.  The
    /// CDC class negotiates this with the host at enumeration.
    pub data_ep_size: u16,
}

impl Default for UsbBridgeConfig {
    fn default() -> Self {
        Self {
            // pid.codes test allocation
            vendor_id: 0x1209,
            product_id: 0x0001,
            manufacturer: "Lightbridge",
            product: "USB traffic-light bridge",
            serial_number: "0001",
            control_ep_size: 8,
            data_ep_size: 64,
        }
    }
}

impl UsbBridgeConfig {
    /// Validate endpoint sizing and identity strings.
    ///
    /// Full-speed control and bulk endpoints accept 8/16/32/64-byte
    /// packets only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.control_ep_size, 8 | 16 | 32 | 64) {
            return Err(ConfigError::InvalidControlEndpointSize(self.control_ep_size));
        }
        if !matches!(self.data_ep_size, 8 | 16 | 32 | 64) {
            return Err(ConfigError::InvalidDataEndpointSize(self.data_ep_size));
        }
        if self.manufacturer.is_empty() || self.product.is_empty() {
            return Err(ConfigError::MissingIdentity);
        }
        Ok(())
    }
}

/// Errors from [`UsbBridgeConfig::validate`] and channel construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Control endpoint size is not a legal full-speed packet size.
    InvalidControlEndpointSize(u8),
    /// Bulk endpoint size is not a legal full-speed packet size.
    InvalidDataEndpointSize(u16),
    /// Manufacturer or product string is empty.
    MissingIdentity,
    /// The USB stack rejected part of the configuration.
    Rejected(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidControlEndpointSize(n) => {
                write!(f, "invalid control endpoint size: {}", n)
            }
            Self::InvalidDataEndpointSize(n) => write!(f, "invalid bulk endpoint size: {}", n),
            Self::MissingIdentity => write!(f, "manufacturer/product strings must be non-empty"),
            Self::Rejected(what) => write!(f, "USB stack rejected {}", what),
        }
    }
}
