// Arithmetic instructions
//
// The 2A03 has no decimal mode, so ADC/SBC are binary-only regardless of
// the D flag; D is stored by SED/CLD but never consulted here.

use crate::cartridge::Cartridge;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::EmulationError;

impl Cpu {
    /// ADC - Add with Carry. Flags: C, Z, V, N
    ///
    /// A = A + M + C. Overflow is signed: both operands share a sign and
    /// the result does not, detectable as (A^result) & (M^result) & 0x80.
    pub(crate) fn adc(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let value = self.read_operand(cart, operand)?;
        self.add_to_accumulator(value);
        Ok(())
    }

    /// SBC - Subtract with Carry. Flags: C, Z, V, N
    ///
    /// A = A - M - (1-C), implemented as A + ~M + C. Carry ends up set
    /// exactly when no borrow occurred (A >= M when C was set).
    pub(crate) fn sbc(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let value = self.read_operand(cart, operand)?;
        self.add_to_accumulator(!value);
        Ok(())
    }

    fn add_to_accumulator(&mut self, value: u8) {
        let carry = u16::from(self.c);
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;

        self.c = sum > 0xFF;
        self.v = (self.a ^ result) & (value ^ result) & 0x80 != 0;
        self.a = result;
        self.update_nz(result);
    }

    /// INC - Increment Memory. Flags: N, Z
    pub(crate) fn inc(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let result = self.bus_read(cart, operand.address)?.wrapping_add(1);
        self.bus_write(cart, operand.address, result)?;
        self.update_nz(result);
        Ok(())
    }

    /// DEC - Decrement Memory. Flags: N, Z
    pub(crate) fn dec(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        let result = self.bus_read(cart, operand.address)?.wrapping_sub(1);
        self.bus_write(cart, operand.address, result)?;
        self.update_nz(result);
        Ok(())
    }

    /// INX - Increment X. Flags: N, Z
    pub(crate) fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_nz(self.x);
    }

    /// INY - Increment Y. Flags: N, Z
    pub(crate) fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_nz(self.y);
    }

    /// DEX - Decrement X. Flags: N, Z
    pub(crate) fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_nz(self.x);
    }

    /// DEY - Decrement Y. Flags: N, Z
    pub(crate) fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_nz(self.y);
    }
}

#[cfg(test)]
mod tests {
    use crate::cartridge::Mirroring;
    use crate::cpu::addressing::AddressingResult;
    use crate::cpu::bus::tests::test_cartridge;
    use crate::cpu::Cpu;

    fn cpu() -> Cpu {
        Cpu::new(Mirroring::Horizontal)
    }

    #[test]
    fn test_adc_simple() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.a = 0x10;
        cpu.adc(&cart, &AddressingResult::literal(0x22)).unwrap();
        assert_eq!(cpu.a, 0x32);
        assert!(!cpu.c && !cpu.v && !cpu.z && !cpu.n);
    }

    #[test]
    fn test_adc_carry_out_and_in() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.a = 0xFF;
        cpu.adc(&cart, &AddressingResult::literal(0x01)).unwrap();
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.c && cpu.z);

        // Carry feeds into the next addition
        cpu.adc(&cart, &AddressingResult::literal(0x00)).unwrap();
        assert_eq!(cpu.a, 0x01);
        assert!(!cpu.c);
    }

    #[test]
    fn test_adc_signed_overflow() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        // 0x50 + 0x50 = 0xA0: positive + positive -> negative
        cpu.a = 0x50;
        cpu.adc(&cart, &AddressingResult::literal(0x50)).unwrap();
        assert_eq!(cpu.a, 0xA0);
        assert!(cpu.v && cpu.n && !cpu.c);
    }

    #[test]
    fn test_sbc_no_borrow_sets_carry() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        // SBC with carry set: A >= M leaves carry set (no borrow)
        cpu.a = 0x50;
        cpu.c = true;
        cpu.sbc(&cart, &AddressingResult::literal(0x30)).unwrap();
        assert_eq!(cpu.a, 0x20);
        assert!(cpu.c);
    }

    #[test]
    fn test_sbc_borrow_clears_carry() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.a = 0x30;
        cpu.c = true;
        cpu.sbc(&cart, &AddressingResult::literal(0x50)).unwrap();
        assert_eq!(cpu.a, 0xE0);
        assert!(!cpu.c && cpu.n);
    }

    #[test]
    fn test_sbc_equal_operands() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.a = 0x42;
        cpu.c = true;
        cpu.sbc(&cart, &AddressingResult::literal(0x42)).unwrap();
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.c && cpu.z);
    }

    #[test]
    fn test_inc_dec_memory() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.ram[0x30] = 0xFF;

        cpu.inc(&cart, &AddressingResult::at(0x0030)).unwrap();
        assert_eq!(cpu.ram[0x30], 0x00);
        assert!(cpu.z);

        cpu.dec(&cart, &AddressingResult::at(0x0030)).unwrap();
        assert_eq!(cpu.ram[0x30], 0xFF);
        assert!(cpu.n);
    }

    #[test]
    fn test_register_inc_dec_wrap() {
        let mut cpu = cpu();
        cpu.x = 0xFF;
        cpu.inx();
        assert_eq!(cpu.x, 0x00);
        assert!(cpu.z);

        cpu.y = 0x00;
        cpu.dey();
        assert_eq!(cpu.y, 0xFF);
        assert!(cpu.n);
    }
}
