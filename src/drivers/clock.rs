//! USB clock bring-up.
//!
//! The USB peripheral needs a 48 MHz clock: the 16 MHz crystal is
//! prescaled to 8 MHz at the PLL input, multiplied to 96 MHz, then
//! divided by two for USB (and by 1.5 for the high-speed timers).
//!
//! ## Dual-target design
//!
//! On AVR: programs and locks the PLL.
//! On host/test: logs and does nothing.

#[cfg(target_arch = "avr")]
use avr_device::atmega32u4::PLL;

/// Configure and lock the PLL for 48 MHz USB operation.
///
/// Spins until the PLL reports lock; on a healthy board this takes a few
/// hundred microseconds.
#[cfg(target_arch = "avr")]
pub fn configure_usb_pll(pll: &PLL) {
    // Prescale the 16 MHz crystal to the 8 MHz PLL input.
    pll.pllcsr().modify(|_, w| w.pindiv().set_bit());
    // 96 MHz PLL output; /1.5 for 64 MHz timers, /2 for 48 MHz USB.
    pll.pllfrq()
        .modify(|_, w| w.pdiv().mhz96().plltm().factor_15().pllusb().set_bit());
    pll.pllcsr().modify(|_, w| w.plle().set_bit());
    while pll.pllcsr().read().plock().bit_is_clear() {}
}

#[cfg(not(target_arch = "avr"))]
pub fn configure_usb_pll() {
    log::info!("clock(sim): PLL bring-up skipped");
}
