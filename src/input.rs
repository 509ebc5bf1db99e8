// Input module - Controller button encoding
//
// The console consumes a single 8-bit latch per controller. A read of $4016
// shifts the latch out one bit at a time, LSB first, in the hardware order
// A, B, Select, Start, Up, Down, Left, Right, then yields 0 until the host
// latches a new value.

use bitflags::bitflags;

bitflags! {
    /// Button mask for the standard controller
    ///
    /// Bit positions match the $4016 shift-out order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const A = 0x01;
        const B = 0x02;
        const SELECT = 0x04;
        const START = 0x08;
        const UP = 0x10;
        const DOWN = 0x20;
        const LEFT = 0x40;
        const RIGHT = 0x80;
    }
}

impl Buttons {
    /// Encode the pressed set into the controller latch value
    #[inline]
    pub fn to_latch(self) -> u8 {
        self.bits()
    }
}
