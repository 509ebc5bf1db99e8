// Logical instructions

use crate::cartridge::Cartridge;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::EmulationError;

impl Cpu {
    /// AND - Logical AND with accumulator. Flags: N, Z
    pub(crate) fn and(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.a &= self.read_operand(cart, operand)?;
        self.update_nz(self.a);
        Ok(())
    }

    /// ORA - Logical OR with accumulator. Flags: N, Z
    pub(crate) fn ora(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.a |= self.read_operand(cart, operand)?;
        self.update_nz(self.a);
        Ok(())
    }

    /// EOR - Exclusive OR with accumulator. Flags: N, Z
    pub(crate) fn eor(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.a ^= self.read_operand(cart, operand)?;
        self.update_nz(self.a);
        Ok(())
    }

    /// BIT - Bit Test
    ///
    /// Z from A & M; N and V copied straight from bits 7 and 6 of M.
    pub(crate) fn bit(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let value = self.read_operand(cart, operand)?;
        self.z = self.a & value == 0;
        self.n = value & 0x80 != 0;
        self.v = value & 0x40 != 0;
        Ok(())
    }
}
