// Opcode decode table
//
// Explicit mapping from the 151 documented opcodes to (mnemonic, mode).
// Anything outside the table is fatal; this core never guesses at
// undocumented opcodes.

use super::addressing::AddressingMode;

/// RTI, the normal burst terminator
pub const OPCODE_RTI: u8 = 0x40;

/// Absolute JMP, the self-loop burst terminator
pub const OPCODE_JMP_ABS: u8 = 0x4C;

/// Instruction mnemonics of the documented 6502 set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

/// One decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode) -> Option<Opcode> {
    Some(Opcode { mnemonic, mode })
}

/// Decode an opcode byte, or `None` for anything undocumented
pub const fn lookup(opcode: u8) -> Option<Opcode> {
    use AddressingMode::*;
    use Mnemonic::*;

    match opcode {
        // Load/store
        0xA9 => op(Lda, Immediate),
        0xA5 => op(Lda, ZeroPage),
        0xB5 => op(Lda, ZeroPageX),
        0xAD => op(Lda, Absolute),
        0xBD => op(Lda, AbsoluteX),
        0xB9 => op(Lda, AbsoluteY),
        0xA1 => op(Lda, IndexedIndirect),
        0xB1 => op(Lda, IndirectIndexed),
        0xA2 => op(Ldx, Immediate),
        0xA6 => op(Ldx, ZeroPage),
        0xB6 => op(Ldx, ZeroPageY),
        0xAE => op(Ldx, Absolute),
        0xBE => op(Ldx, AbsoluteY),
        0xA0 => op(Ldy, Immediate),
        0xA4 => op(Ldy, ZeroPage),
        0xB4 => op(Ldy, ZeroPageX),
        0xAC => op(Ldy, Absolute),
        0xBC => op(Ldy, AbsoluteX),
        0x85 => op(Sta, ZeroPage),
        0x95 => op(Sta, ZeroPageX),
        0x8D => op(Sta, Absolute),
        0x9D => op(Sta, AbsoluteX),
        0x99 => op(Sta, AbsoluteY),
        0x81 => op(Sta, IndexedIndirect),
        0x91 => op(Sta, IndirectIndexed),
        0x86 => op(Stx, ZeroPage),
        0x96 => op(Stx, ZeroPageY),
        0x8E => op(Stx, Absolute),
        0x84 => op(Sty, ZeroPage),
        0x94 => op(Sty, ZeroPageX),
        0x8C => op(Sty, Absolute),

        // Transfers
        0xAA => op(Tax, Implied),
        0xA8 => op(Tay, Implied),
        0x8A => op(Txa, Implied),
        0x98 => op(Tya, Implied),
        0xBA => op(Tsx, Implied),
        0x9A => op(Txs, Implied),

        // Stack
        0x48 => op(Pha, Implied),
        0x68 => op(Pla, Implied),
        0x08 => op(Php, Implied),
        0x28 => op(Plp, Implied),

        // Arithmetic
        0x69 => op(Adc, Immediate),
        0x65 => op(Adc, ZeroPage),
        0x75 => op(Adc, ZeroPageX),
        0x6D => op(Adc, Absolute),
        0x7D => op(Adc, AbsoluteX),
        0x79 => op(Adc, AbsoluteY),
        0x61 => op(Adc, IndexedIndirect),
        0x71 => op(Adc, IndirectIndexed),
        0xE9 => op(Sbc, Immediate),
        0xE5 => op(Sbc, ZeroPage),
        0xF5 => op(Sbc, ZeroPageX),
        0xED => op(Sbc, Absolute),
        0xFD => op(Sbc, AbsoluteX),
        0xF9 => op(Sbc, AbsoluteY),
        0xE1 => op(Sbc, IndexedIndirect),
        0xF1 => op(Sbc, IndirectIndexed),

        // Increments/decrements
        0xE6 => op(Inc, ZeroPage),
        0xF6 => op(Inc, ZeroPageX),
        0xEE => op(Inc, Absolute),
        0xFE => op(Inc, AbsoluteX),
        0xC6 => op(Dec, ZeroPage),
        0xD6 => op(Dec, ZeroPageX),
        0xCE => op(Dec, Absolute),
        0xDE => op(Dec, AbsoluteX),
        0xE8 => op(Inx, Implied),
        0xC8 => op(Iny, Implied),
        0xCA => op(Dex, Implied),
        0x88 => op(Dey, Implied),

        // Logical
        0x29 => op(And, Immediate),
        0x25 => op(And, ZeroPage),
        0x35 => op(And, ZeroPageX),
        0x2D => op(And, Absolute),
        0x3D => op(And, AbsoluteX),
        0x39 => op(And, AbsoluteY),
        0x21 => op(And, IndexedIndirect),
        0x31 => op(And, IndirectIndexed),
        0x09 => op(Ora, Immediate),
        0x05 => op(Ora, ZeroPage),
        0x15 => op(Ora, ZeroPageX),
        0x0D => op(Ora, Absolute),
        0x1D => op(Ora, AbsoluteX),
        0x19 => op(Ora, AbsoluteY),
        0x01 => op(Ora, IndexedIndirect),
        0x11 => op(Ora, IndirectIndexed),
        0x49 => op(Eor, Immediate),
        0x45 => op(Eor, ZeroPage),
        0x55 => op(Eor, ZeroPageX),
        0x4D => op(Eor, Absolute),
        0x5D => op(Eor, AbsoluteX),
        0x59 => op(Eor, AbsoluteY),
        0x41 => op(Eor, IndexedIndirect),
        0x51 => op(Eor, IndirectIndexed),
        0x24 => op(Bit, ZeroPage),
        0x2C => op(Bit, Absolute),

        // Shifts/rotates
        0x0A => op(Asl, Accumulator),
        0x06 => op(Asl, ZeroPage),
        0x16 => op(Asl, ZeroPageX),
        0x0E => op(Asl, Absolute),
        0x1E => op(Asl, AbsoluteX),
        0x4A => op(Lsr, Accumulator),
        0x46 => op(Lsr, ZeroPage),
        0x56 => op(Lsr, ZeroPageX),
        0x4E => op(Lsr, Absolute),
        0x5E => op(Lsr, AbsoluteX),
        0x2A => op(Rol, Accumulator),
        0x26 => op(Rol, ZeroPage),
        0x36 => op(Rol, ZeroPageX),
        0x2E => op(Rol, Absolute),
        0x3E => op(Rol, AbsoluteX),
        0x6A => op(Ror, Accumulator),
        0x66 => op(Ror, ZeroPage),
        0x76 => op(Ror, ZeroPageX),
        0x6E => op(Ror, Absolute),
        0x7E => op(Ror, AbsoluteX),

        // Compares
        0xC9 => op(Cmp, Immediate),
        0xC5 => op(Cmp, ZeroPage),
        0xD5 => op(Cmp, ZeroPageX),
        0xCD => op(Cmp, Absolute),
        0xDD => op(Cmp, AbsoluteX),
        0xD9 => op(Cmp, AbsoluteY),
        0xC1 => op(Cmp, IndexedIndirect),
        0xD1 => op(Cmp, IndirectIndexed),
        0xE0 => op(Cpx, Immediate),
        0xE4 => op(Cpx, ZeroPage),
        0xEC => op(Cpx, Absolute),
        0xC0 => op(Cpy, Immediate),
        0xC4 => op(Cpy, ZeroPage),
        0xCC => op(Cpy, Absolute),

        // Branches
        0x90 => op(Bcc, Relative),
        0xB0 => op(Bcs, Relative),
        0xF0 => op(Beq, Relative),
        0xD0 => op(Bne, Relative),
        0x30 => op(Bmi, Relative),
        0x10 => op(Bpl, Relative),
        0x50 => op(Bvc, Relative),
        0x70 => op(Bvs, Relative),

        // Jumps/subroutines
        0x4C => op(Jmp, Absolute),
        0x6C => op(Jmp, Indirect),
        0x20 => op(Jsr, Absolute),
        0x60 => op(Rts, Implied),

        // Flags
        0x18 => op(Clc, Implied),
        0x38 => op(Sec, Implied),
        0x58 => op(Cli, Implied),
        0x78 => op(Sei, Implied),
        0xB8 => op(Clv, Implied),
        0xD8 => op(Cld, Implied),
        0xF8 => op(Sed, Implied),

        // Interrupts / misc
        0x00 => op(Brk, Implied),
        0x40 => op(Rti, Implied),
        0xEA => op(Nop, Implied),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_opcode_count() {
        let count = (0u16..256).filter(|&b| lookup(b as u8).is_some()).count();
        assert_eq!(count, 151);
    }

    #[test]
    fn test_terminal_opcodes_decode() {
        let rti = lookup(OPCODE_RTI).unwrap();
        assert_eq!(rti.mnemonic, Mnemonic::Rti);

        let jmp = lookup(OPCODE_JMP_ABS).unwrap();
        assert_eq!(jmp.mnemonic, Mnemonic::Jmp);
        assert_eq!(jmp.mode, AddressingMode::Absolute);
    }

    #[test]
    fn test_undocumented_opcodes_rejected() {
        assert!(lookup(0x02).is_none());
        assert!(lookup(0xFF).is_none());
        assert!(lookup(0x1A).is_none()); // undocumented NOP variant
    }
}
