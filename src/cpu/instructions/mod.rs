// Instruction implementations, grouped by semantic family

mod arithmetic;
mod branch;
mod compare;
mod jump_subroutine;
mod load_store;
mod logic;
mod miscellaneous;
mod shift_rotate;
mod stack;
mod transfer;

use super::addressing::AddressingResult;
use super::Cpu;
use crate::cartridge::Cartridge;
use crate::error::EmulationError;

impl Cpu {
    /// Read the operand: inline literal for immediate/accumulator modes,
    /// a bus read otherwise
    #[inline]
    pub(crate) fn read_operand(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<u8, EmulationError> {
        match operand.value {
            Some(value) => Ok(value),
            None => self.bus_read(cart, operand.address),
        }
    }
}
