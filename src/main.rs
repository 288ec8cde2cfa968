//! Lightbridge firmware — main entry point.
//!
//! Hardware setup runs exactly once, then the polling loop is the entire
//! program lifetime:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  UsbSerialChannel   GpioIndicator      LogEventSink      │
//! │  (CommandChannel)   (IndicatorPort)    (EventSink)       │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ───────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          BridgeService (pure logic)            │      │
//! │  │  command table · lamp state · poll loop        │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]
#![deny(unused_must_use)]

#[cfg(target_arch = "avr")]
use atmega_usbd::UsbBus;
#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use lightbridge::adapters::indicator::GpioIndicator;
#[cfg(target_arch = "avr")]
use lightbridge::adapters::log_sink::LogEventSink;
#[cfg(target_arch = "avr")]
use lightbridge::adapters::usb_serial::UsbSerialChannel;
#[cfg(target_arch = "avr")]
use lightbridge::app::ports::NullCdcHook;
#[cfg(target_arch = "avr")]
use lightbridge::app::service::BridgeService;
#[cfg(target_arch = "avr")]
use lightbridge::config::UsbBridgeConfig;
#[cfg(target_arch = "avr")]
use lightbridge::drivers;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    let dp = atmega_hal::Peripherals::take().unwrap();
    let pins = atmega_hal::pins!(dp);

    // ── 1. Hardware setup, performed exactly once ─────────────
    drivers::watchdog::disable_on_boot(&dp.CPU, &dp.WDT);

    // Lamp lines low = off.  PORTB bit order matches the indicator
    // head: PB5 red, PB6 amber, PB7 green.
    let mut indicator = GpioIndicator::new(
        pins.pb5.into_output().downgrade(),
        pins.pb6.into_output().downgrade(),
        pins.pb7.into_output().downgrade(),
    );

    // Status LED on PB4 is active low: drive it low to show power.
    let mut status_led = pins.pb4.into_output();
    status_led.set_low();

    // Hold the downstream target's /RESET line high so it keeps running.
    let _target_reset = pins.pd7.into_output_high();

    // ── 2. USB bring-up ───────────────────────────────────────
    drivers::clock::configure_usb_pll(&dp.PLL);
    let usb_bus = UsbBus::new(dp.USB_DEVICE);

    let config = UsbBridgeConfig::default();
    let mut channel = match UsbSerialChannel::new(&usb_bus, &config, NullCdcHook) {
        Ok(channel) => channel,
        // No console exists this early; halt and let the operator notice
        // the missing enumeration.
        Err(_) => loop {},
    };

    // SAFETY: single-threaded init is complete; the only handler is the
    // deliberately empty USART1 receive stub below.
    unsafe { avr_device::interrupt::enable() };

    // ── 3. Polling loop — runs until power-off ────────────────
    let mut sink = LogEventSink::new();
    let mut bridge = BridgeService::new();
    bridge.start(&mut indicator, &mut sink);

    loop {
        bridge.poll_once(&mut channel, &mut indicator, &mut sink);
    }
}

/// Hardware-UART receive interrupt.  Bytes arriving on the USART outside
/// the USB path are deliberately discarded; the bridge does not forward
/// them.
#[cfg(target_arch = "avr")]
#[avr_device::interrupt(atmega32u4)]
fn USART1_RX() {}

/// The firmware proper targets AVR; the host build only checks that the
/// binary compiles.
#[cfg(not(target_arch = "avr"))]
fn main() {
    println!("lightbridge: AVR firmware image; build for an avr target");
}
