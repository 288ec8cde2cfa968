//! Watchdog control.
//!
//! The bootloader can hand over with the watchdog running and `WDRF`
//! set, which would reset the part mid-enumeration.  Disabling it is the
//! first step of hardware setup.
//!
//! ## Dual-target design
//!
//! On AVR: clears `WDRF` and runs the timed `WDTCSR` disable sequence.
//! On host/test: logs and does nothing.

#[cfg(target_arch = "avr")]
use avr_device::atmega32u4::{CPU, WDT};

/// Disable the watchdog left armed by the bootloader or fuses.
///
/// Must run early, with interrupts disabled: the `WDTCSR` change
/// sequence has a four-cycle window.
#[cfg(target_arch = "avr")]
pub fn disable_on_boot(cpu: &CPU, wdt: &WDT) {
    cpu.mcusr().modify(|_, w| w.wdrf().clear_bit());
    avr_device::interrupt::free(|_| {
        wdt.wdtcsr().modify(|_, w| w.wdce().set_bit().wde().set_bit());
        // SAFETY: writing zero stops the watchdog; permitted within the
        // four-cycle window opened by setting WDCE above.
        wdt.wdtcsr().write(|w| unsafe { w.bits(0) });
    });
}

#[cfg(not(target_arch = "avr"))]
pub fn disable_on_boot() {
    log::info!("watchdog(sim): disable skipped");
}
