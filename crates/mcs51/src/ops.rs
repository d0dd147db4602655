//! Instruction descriptors and operand shapes.

/// Names of the eight general registers of the active bank.
pub const REGISTERS: [&str; 8] = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"];

/// Names of the two registers usable as indirect pointers.
pub const INDIRECT_REGISTERS: [&str; 2] = ["@r0", "@r1"];

/// Which register name table a shape indexes with the opcode's variable bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFile {
    /// `r0`..`r7`
    General,
    /// `@r0`, `@r1`
    Indirect,
}

impl RegisterFile {
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Self::General => &REGISTERS,
            Self::Indirect => &INDIRECT_REGISTERS,
        }
    }
}

/// The operand layout of an instruction. Each variant has exactly one
/// rendering rule in [`crate::render`].
///
/// In the comments below `rn` is a general register, `@ri` an indirect
/// register, `rel` a relative offset and `#imm` an immediate byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// no operands
    None,
    /// `addr11`
    Addr11,
    /// `addr16`
    Addr16,

    /// `a`
    Acc,
    /// `ab`
    AccB,
    /// `a, rn`
    AccReg,
    /// `a, @ri`
    AccIndirect,
    /// `a, #imm`
    AccImm,
    /// `a, #imm, rel`
    AccImmRel,
    /// `a, direct`
    AccDirect,
    /// `a, direct, rel`
    AccDirectRel,
    /// `a, @dptr`
    AccAtDptr,
    /// `a, @a+dptr`
    AccAtAccDptr,
    /// `a, @a+pc`
    AccAtAccPc,

    /// `rn`
    Reg,
    /// `rn, a`
    RegAcc,
    /// `rn, #imm`
    RegImm,
    /// `rn, #imm, rel`
    RegImmRel,
    /// `rn, direct`
    RegDirect,
    /// `rn, rel`
    RegRel,

    /// `direct`
    Direct,
    /// `direct, a`
    DirectAcc,
    /// `direct, rn`
    DirectReg,
    /// `direct, @ri`
    DirectIndirect,
    /// `direct, #imm`
    DirectImm,
    /// `direct, direct`
    DirectDirect,
    /// `direct, rel`
    DirectRel,

    /// `dptr`
    Dptr,
    /// `dptr, #imm16`
    DptrImm,

    /// `bit`
    Bit,
    /// `bit, c`
    BitCarry,
    /// `bit, rel`
    BitRel,

    /// `c`
    Carry,
    /// `c, bit`
    CarryBit,
    /// `c, /bit`
    CarryNotBit,

    /// `@ri`
    Indirect,
    /// `@ri, a`
    IndirectAcc,
    /// `@ri, #imm`
    IndirectImm,
    /// `@ri, #imm, rel`
    IndirectImmRel,
    /// `@ri, direct`
    IndirectDirect,

    /// `@dptr, a`
    AtDptrAcc,
    /// `@a+dptr`
    AtAccDptr,

    /// `rel`
    Rel,
}

impl Shape {
    /// Number of bytes following the opcode that this shape reads.
    pub const fn operand_len(self) -> usize {
        use Shape::*;
        match self {
            None | Acc | AccB | AccReg | AccIndirect | AccAtDptr | AccAtAccDptr | AccAtAccPc
            | Reg | RegAcc | Dptr | Carry | Indirect | IndirectAcc | AtDptrAcc | AtAccDptr => 0,

            Addr11 | AccImm | AccDirect | RegImm | RegDirect | RegRel | Direct | DirectAcc
            | DirectReg | DirectIndirect | Bit | BitCarry | CarryBit | CarryNotBit
            | IndirectImm | IndirectDirect | Rel => 1,

            Addr16 | AccImmRel | AccDirectRel | RegImmRel | DirectImm | DirectDirect
            | DirectRel | DptrImm | BitRel | IndirectImmRel => 2,
        }
    }

    /// The register table indexed by the opcode's variable bits, if any.
    pub const fn register(self) -> Option<RegisterFile> {
        use Shape::*;
        match self {
            AccReg | Reg | RegAcc | RegImm | RegImmRel | RegDirect | RegRel | DirectReg => {
                Some(RegisterFile::General)
            }
            AccIndirect | DirectIndirect | Indirect | IndirectAcc | IndirectImm
            | IndirectImmRel | IndirectDirect => Some(RegisterFile::Indirect),
            _ => Option::None,
        }
    }
}

/// One row of the instruction table.
///
/// A byte `op` selects this descriptor when the bits set in `mask` equal the
/// same bits of `opcode`, and the remaining (variable) bits of `op` fall in
/// `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub opcode: u8,
    pub mask: u8,
    pub min: u8,
    pub max: u8,
    /// Total length in bytes, opcode included.
    pub size: u8,
    pub shape: Shape,
    pub mnemonic: &'static str,
}

impl Descriptor {
    /// The bits of `op` not covered by the mask.
    #[inline]
    pub const fn variable(&self, op: u8) -> u8 {
        op & !self.mask
    }

    #[inline]
    pub const fn matches(&self, op: u8) -> bool {
        if (op ^ self.opcode) & self.mask != 0 {
            return false;
        }
        let v = self.variable(op);
        self.min <= v && v <= self.max
    }

    /// Zero-based register index encoded in `op`. Only meaningful when
    /// [`Descriptor::matches`] holds.
    #[inline]
    pub const fn register_index(&self, op: u8) -> usize {
        self.variable(op).wrapping_sub(self.min) as usize
    }

    /// Name of the register encoded in `op`, for shapes that carry one.
    pub fn register_name(&self, op: u8) -> Option<&'static str> {
        let names = self.shape.register()?.names();
        names.get(self.register_index(op)).copied()
    }
}
