//! Pin bank type exchanged between drivers and the Control Unit.

use core::fmt;

use crate::consts::MAX_PINS;

/// Electrical levels of up to 64 digital pins (bit `n` = pin `n`, 1 = high).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PinBank(pub u64);

impl PinBank {
    /// Every pin low.
    pub const ALL_LOW: Self = Self(0);

    /// Level of `pin`. Pins outside the bank read low.
    #[inline]
    pub const fn level(self, pin: u16) -> bool {
        if pin >= MAX_PINS {
            return false;
        }
        (self.0 >> pin) & 1 != 0
    }

    /// Set the level of `pin`. Pins outside the bank are ignored.
    #[inline]
    pub fn set_level(&mut self, pin: u16, high: bool) {
        if pin >= MAX_PINS {
            return;
        }
        if high {
            self.0 |= 1u64 << pin;
        } else {
            self.0 &= !(1u64 << pin);
        }
    }

    /// Builder form of [`set_level`](Self::set_level).
    #[inline]
    pub fn with_level(mut self, pin: u16, high: bool) -> Self {
        self.set_level(pin, high);
        self
    }
}

impl fmt::Debug for PinBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PinBank({:#018x})", self.0)
    }
}
