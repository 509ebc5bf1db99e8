// Shift and rotate instructions
//
// Each comes in an accumulator variant and memory variants; the shared
// helpers read-modify-write whichever the addressing produced. Carry takes
// the shifted-out bit.

use crate::cartridge::Cartridge;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::EmulationError;

impl Cpu {
    /// ASL - Arithmetic Shift Left. Flags: C, N, Z
    pub(crate) fn asl(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.modify(cart, operand, |cpu, value| {
            cpu.c = value & 0x80 != 0;
            value << 1
        })
    }

    /// LSR - Logical Shift Right. Flags: C, N (always clear), Z
    pub(crate) fn lsr(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.modify(cart, operand, |cpu, value| {
            cpu.c = value & 0x01 != 0;
            value >> 1
        })
    }

    /// ROL - Rotate Left through carry. Flags: C, N, Z
    pub(crate) fn rol(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.modify(cart, operand, |cpu, value| {
            let carry_in = u8::from(cpu.c);
            cpu.c = value & 0x80 != 0;
            (value << 1) | carry_in
        })
    }

    /// ROR - Rotate Right through carry. Flags: C, N, Z
    pub(crate) fn ror(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
    ) -> Result<(), EmulationError> {
        self.modify(cart, operand, |cpu, value| {
            let carry_in = u8::from(cpu.c) << 7;
            cpu.c = value & 0x01 != 0;
            (value >> 1) | carry_in
        })
    }

    /// Shared read-modify-write: accumulator variant when the operand is a
    /// literal, memory variant otherwise
    fn modify(
        &mut self,
        cart: &Cartridge,
        operand: &AddressingResult,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) -> Result<(), EmulationError> {
        match operand.value {
            Some(value) => {
                let result = f(self, value);
                self.a = result;
                self.update_nz(result);
            }
            None => {
                let value = self.bus_read(cart, operand.address)?;
                let result = f(self, value);
                self.bus_write(cart, operand.address, result)?;
                self.update_nz(result);
            }
        }
        Ok(())
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
    fn test_asl_accumulator() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.asl(&cart, &AddressingResult::literal(0b1000_0001))
            .unwrap();
        assert_eq!(cpu.a, 0b0000_0010);
        assert!(cpu.c && !cpu.n && !cpu.z);
    }

    #[test]
    fn test_lsr_memory() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.ram[0x50] = 0b0000_0011;
        cpu.lsr(&cart, &AddressingResult::at(0x0050)).unwrap();
        assert_eq!(cpu.ram[0x50], 0b0000_0001);
        assert!(cpu.c);
    }

    #[test]
    fn test_rol_through_carry() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.c = true;
        cpu.rol(&cart, &AddressingResult::literal(0b0100_0000))
            .unwrap();
        assert_eq!(cpu.a, 0b1000_0001);
        assert!(!cpu.c && cpu.n);
    }

    #[test]
    fn test_ror_through_carry() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.c = true;
        cpu.ror(&cart, &AddressingResult::literal(0b0000_0001))
            .unwrap();
        assert_eq!(cpu.a, 0b1000_0000);
        assert!(cpu.c && cpu.n);
    }

    #[test]
    fn test_lsr_result_zero() {
        let cart = test_cartridge();
        let mut cpu = cpu();
        cpu.lsr(&cart, &AddressingResult::literal(0x01)).unwrap();
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.z && cpu.c);
    }
}
