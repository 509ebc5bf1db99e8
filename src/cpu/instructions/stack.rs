// Stack instructions

use crate::cpu::Cpu;

impl Cpu {
    /// PHA - Push Accumulator
    pub(crate) fn pha(&mut self) {
        self.push(self.a);
    }

    /// PLA - Pull Accumulator. Flags: N, Z
    pub(crate) fn pla(&mut self) {
        self.a = self.pop();
        self.update_nz(self.a);
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed byte always has the B bit set (the 6502 cannot push a
    /// status byte without it from an instruction).
    pub(crate) fn php(&mut self) {
        let status = self.flags_to_byte(true);
        self.push(status);
    }

    /// PLP - Pull Processor Status
    pub(crate) fn plp(&mut self) {
        let status = self.pop();
        self.set_flags_from_byte(status);
    }
}

#[cfg(test)]
mod tests {
    use crate::cartridge::Mirroring;
    use crate::cpu::Cpu;

    #[test]
    fn test_pha_pla_roundtrip() {
        let mut cpu = Cpu::new(Mirroring::Horizontal);
        cpu.sp = 0xFD;
        cpu.a = 0x5A;
        cpu.pha();

        cpu.a = 0x00;
        cpu.pla();
        assert_eq!(cpu.a, 0x5A);
        assert!(!cpu.z && !cpu.n);
    }

    #[test]
    fn test_php_sets_b_bit() {
        let mut cpu = Cpu::new(Mirroring::Horizontal);
        cpu.sp = 0xFD;
        cpu.c = true;
        cpu.php();
        assert_eq!(cpu.ram[0x01FD], 0b0011_0001);
    }

    #[test]
    fn test_plp_ignores_b_bit() {
        let mut cpu = Cpu::new(Mirroring::Horizontal);
        cpu.sp = 0xFC;
        cpu.ram[0x01FD] = 0b1111_1111;
        cpu.plp();
        assert!(cpu.n && cpu.v && cpu.d && cpu.i && cpu.z && cpu.c);
    }
}
