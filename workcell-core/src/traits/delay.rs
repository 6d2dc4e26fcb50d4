//! Pacing trait
//!
//! Simulated dwell times (travel, gripper handoff, processing) go through
//! this trait. They carry no correctness semantics.

/// Blocking delay provider
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Block for `s` seconds
    fn delay_s(&mut self, s: u16) {
        self.delay_ms(u32::from(s) * 1000);
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}

impl<T: Delay + ?Sized> Delay for Box<T> {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
