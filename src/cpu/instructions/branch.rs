// Branch instructions
//
// All eight branches funnel through one helper; the addressing stage has
// already resolved the relative offset into an absolute target.

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// Take the branch when the condition holds
    ///
    /// No cycle penalty is modeled for taken branches or page crossings.
    pub(crate) fn branch(&mut self, condition: bool, operand: &AddressingResult) {
        if condition {
            self.pc = operand.address;
        }
    }
}
