// Load and store instructions

use crate::cartridge::Cartridge;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::EmulationError;

impl Cpu {
    /// LDA - Load Accumulator. Flags: N, Z
    pub(crate) fn lda(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.a = self.read_operand(cart, operand)?;
        self.update_nz(self.a);
        Ok(())
    }

    /// LDX - Load X Register. Flags: N, Z
    pub(crate) fn ldx(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.x = self.read_operand(cart, operand)?;
        self.update_nz(self.x);
        Ok(())
    }

    /// LDY - Load Y Register. Flags: N, Z
    pub(crate) fn ldy(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.y = self.read_operand(cart, operand)?;
        self.update_nz(self.y);
        Ok(())
    }

    /// STA - Store Accumulator
    pub(crate) fn sta(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.bus_write(cart, operand.address, self.a)
    }

    /// STX - Store X Register
    pub(crate) fn stx(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.bus_write(cart, operand.address, self.x)
    }

    /// STY - Store Y Register
    pub(crate) fn sty(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.bus_write(cart, operand.address, self.y)
    }
}
