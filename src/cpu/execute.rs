// Instruction fetch/decode/execute

use super::opcodes::{lookup, Mnemonic};
use super::Cpu;
use crate::cartridge::Cartridge;
use crate::error::EmulationError;

impl Cpu {
    /// Execute one instruction and return its opcode byte
    ///
    /// The logical clock ticks before any of the instruction's bus traffic,
    /// so a register read inside the instruction observes the incremented
    /// count. The burst driver uses the returned opcode for terminal
    /// detection.
    pub fn step(&mut self, cart: &Cartridge) -> Result<u8, EmulationError> {
        self.instruction_count += 1;

        let opcode_addr = self.pc;
        let opcode = self.bus_read(cart, opcode_addr)?;
        let decoded = lookup(opcode).ok_or(EmulationError::UnknownOpcode {
            opcode,
            pc: opcode_addr,
        })?;
        self.pc = self.pc.wrapping_add(1);

        let operand = self.resolve(cart, decoded.mode)?;

        match decoded.mnemonic {
            // Load/store
            Mnemonic::Lda => self.lda(cart, &operand)?,
            Mnemonic::Ldx => self.ldx(cart, &operand)?,
            Mnemonic::Ldy => self.ldy(cart, &operand)?,
            Mnemonic::Sta => self.sta(cart, &operand)?,
            Mnemonic::Stx => self.stx(cart, &operand)?,
            Mnemonic::Sty => self.sty(cart, &operand)?,

            // Transfers
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Tya => self.tya(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txs => self.txs(),

            // Stack
            Mnemonic::Pha => self.pha(),
            Mnemonic::Pla => self.pla(),
            Mnemonic::Php => self.php(),
            Mnemonic::Plp => self.plp(),

            // Arithmetic
            Mnemonic::Adc => self.adc(cart, &operand)?,
            Mnemonic::Sbc => self.sbc(cart, &operand)?,
            Mnemonic::Inc => self.inc(cart, &operand)?,
            Mnemonic::Dec => self.dec(cart, &operand)?,
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),

            // Logical
            Mnemonic::And => self.and(cart, &operand)?,
            Mnemonic::Ora => self.ora(cart, &operand)?,
            Mnemonic::Eor => self.eor(cart, &operand)?,
            Mnemonic::Bit => self.bit(cart, &operand)?,

            // Shifts/rotates
            Mnemonic::Asl => self.asl(cart, &operand)?,
            Mnemonic::Lsr => self.lsr(cart, &operand)?,
            Mnemonic::Rol => self.rol(cart, &operand)?,
            Mnemonic::Ror => self.ror(cart, &operand)?,

            // Compares
            Mnemonic::Cmp => self.cmp(cart, &operand)?,
            Mnemonic::Cpx => self.cpx(cart, &operand)?,
            Mnemonic::Cpy => self.cpy(cart, &operand)?,

            // Branches
            Mnemonic::Bcc => self.branch(!self.c, &operand),
            Mnemonic::Bcs => self.branch(self.c, &operand),
            Mnemonic::Beq => self.branch(self.z, &operand),
            Mnemonic::Bne => self.branch(!self.z, &operand),
            Mnemonic::Bmi => self.branch(self.n, &operand),
            Mnemonic::Bpl => self.branch(!self.n, &operand),
            Mnemonic::Bvc => self.branch(!self.v, &operand),
            Mnemonic::Bvs => self.branch(self.v, &operand),

            // Jumps/subroutines
            Mnemonic::Jmp => self.jmp(&operand),
            Mnemonic::Jsr => self.jsr(&operand),
            Mnemonic::Rts => self.rts(),

            // Flags
            Mnemonic::Clc => self.c = false,
            Mnemonic::Sec => self.c = true,
            Mnemonic::Cli => self.i = false,
            Mnemonic::Sei => self.i = true,
            Mnemonic::Clv => self.v = false,
            Mnemonic::Cld => self.d = false,
            Mnemonic::Sed => self.d = true,

            // Interrupts / misc
            Mnemonic::Brk => self.brk(cart)?,
            Mnemonic::Rti => self.rti(),
            Mnemonic::Nop => {}
        }

        Ok(opcode)
    }
}
