// Compare instructions
//
// CMP/CPX/CPY compute register - M and throw the result away, setting
// C = register >= M, Z = equal, N = bit 7 of the difference.

use crate::cartridge::Cartridge;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::EmulationError;

impl Cpu {
    /// CMP - Compare Accumulator. Flags: C, Z, N
    pub(crate) fn cmp(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let value = self.read_operand(cart, operand)?;
        self.compare(self.a, value);
        Ok(())
    }

    /// CPX - Compare X Register. Flags: C, Z, N
    pub(crate) fn cpx(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let value = self.read_operand(cart, operand)?;
        self.compare(self.x, value);
        Ok(())
    }

    /// CPY - Compare Y Register. Flags: C, Z, N
    pub(crate) fn cpy(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let value = self.read_operand(cart, operand)?;
        self.compare(self.y, value);
        Ok(())
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.c = register >= value;
        self.update_nz(register.wrapping_sub(value));
    }
}
