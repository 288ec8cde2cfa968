//! USB-CDC channel adapter.
//!
//! Wraps the external USB stack (the `usb-device` framework plus the
//! `usbd-serial` CDC-ACM class) behind the [`CommandChannel`] port.  The
//! stack owns enumeration, endpoint management, and control transfers;
//! this adapter only moves single bytes and relays observed
//! control-plane changes to a [`CdcEventHook`].
//!
//! Generic over [`UsbBus`], so the same adapter serves the AVR
//! peripheral on target and compiles on the host.

use usb_device::LangID;
use usb_device::bus::{UsbBus, UsbBusAllocator};
use usb_device::device::{
    StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid,
};
use usbd_serial::SerialPort;

use crate::app::ports::{CdcEventHook, CommandChannel, LineEncoding, Parity, StopBits};
use crate::config::{ConfigError, UsbBridgeConfig};

// ───────────────────────────────────────────────────────────────
// Control-plane edge detection
// ───────────────────────────────────────────────────────────────

/// Control-plane state observed after a stack poll, cached between
/// housekeeping calls for edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ControlState {
    configured: bool,
    encoding: LineEncoding,
    dtr: bool,
    rts: bool,
}

impl ControlState {
    fn initial() -> Self {
        Self {
            configured: false,
            encoding: LineEncoding::default(),
            dtr: false,
            rts: false,
        }
    }
}

/// Which hook callbacks one housekeeping call must fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ControlChanges {
    configured: bool,
    encoding: bool,
    control_lines: bool,
}

fn detect_control_changes(prev: &ControlState, next: &ControlState) -> ControlChanges {
    ControlChanges {
        configured: next.configured && !prev.configured,
        encoding: next.encoding != prev.encoding,
        control_lines: next.dtr != prev.dtr || next.rts != prev.rts,
    }
}

fn encoding_from(coding: &usbd_serial::LineCoding) -> LineEncoding {
    LineEncoding {
        baud_rate: coding.data_rate(),
        data_bits: coding.data_bits(),
        stop_bits: match coding.stop_bits() {
            usbd_serial::StopBits::One => StopBits::One,
            usbd_serial::StopBits::OnePointFive => StopBits::OnePointFive,
            usbd_serial::StopBits::Two => StopBits::Two,
        },
        parity: match coding.parity_type() {
            usbd_serial::ParityType::None => Parity::None,
            usbd_serial::ParityType::Odd => Parity::Odd,
            usbd_serial::ParityType::Even => Parity::Even,
            usbd_serial::ParityType::Mark => Parity::Mark,
            usbd_serial::ParityType::Space => Parity::Space,
        },
    }
}

// ───────────────────────────────────────────────────────────────
// UsbSerialChannel
// ───────────────────────────────────────────────────────────────

/// The CDC virtual serial port behind the [`CommandChannel`] port.
pub struct UsbSerialChannel<'a, B: UsbBus, H: CdcEventHook> {
    device: UsbDevice<'a, B>,
    port: SerialPort<'a, B>,
    hook: H,
    control: ControlState,
}

impl<'a, B: UsbBus, H: CdcEventHook> UsbSerialChannel<'a, B, H> {
    /// Build the CDC class and device from the bridge configuration.
    ///
    /// Consumes the configuration once; the stack negotiates the
    /// endpoint topology (one control interface, one bulk IN/OUT pair,
    /// one notification endpoint) from it at enumeration time.
    pub fn new(
        alloc: &'a UsbBusAllocator<B>,
        config: &UsbBridgeConfig,
        hook: H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        // Class first: the allocator hands out endpoints in creation order.
        let port = SerialPort::new(alloc);

        let strings = StringDescriptors::new(LangID::EN_US)
            .manufacturer(config.manufacturer)
            .product(config.product)
            .serial_number(config.serial_number);
        let device =
            UsbDeviceBuilder::new(alloc, UsbVidPid(config.vendor_id, config.product_id))
                .strings(&[strings])
                .map_err(|_| ConfigError::Rejected("string descriptors"))?
                .device_class(usbd_serial::USB_CLASS_CDC)
                .max_packet_size_0(config.control_ep_size)
                .map_err(|_| ConfigError::Rejected("control endpoint size"))?
                .build();

        Ok(Self {
            device,
            port,
            hook,
            control: ControlState::initial(),
        })
    }

    fn snapshot_control_state(&self) -> ControlState {
        ControlState {
            configured: self.device.state() == UsbDeviceState::Configured,
            encoding: encoding_from(self.port.line_coding()),
            dtr: self.port.dtr(),
            rts: self.port.rts(),
        }
    }
}

impl<B: UsbBus, H: CdcEventHook> CommandChannel for UsbSerialChannel<'_, B, H> {
    fn try_receive_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(n) if n > 0 => Some(byte[0]),
            // WouldBlock and zero-length reads both mean "nothing yet".
            _ => None,
        }
    }

    fn send_byte(&mut self, byte: u8) {
        // Best-effort: if the host has not drained the IN endpoint the
        // byte is dropped, matching the no-backpressure contract.
        self.port.write(&[byte]).ok();
    }

    fn service(&mut self) {
        // Device-class and core housekeeping: enumeration, control
        // transfers, endpoint state.  Class-specific control requests
        // are delegated to the CDC class inside this call.
        self.device.poll(&mut [&mut self.port]);

        let next = self.snapshot_control_state();
        let changes = detect_control_changes(&self.control, &next);
        if changes.configured {
            self.hook.configuration_changed();
        }
        if changes.encoding {
            // A SET_LINE_CODING class request was just delegated.
            self.hook.control_request();
            self.hook.line_encoding_changed(&next.encoding);
        }
        if changes.control_lines {
            // A SET_CONTROL_LINE_STATE class request was just delegated.
            self.hook.control_request();
            self.hook.control_line_state_changed(next.dtr, next.rts);
        }
        self.control = next;
    }
}
