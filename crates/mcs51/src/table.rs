//! The MCS-51 instruction table.
//!
//! One `OP` line per opcode family:
//!
//! ```text
//! OP "mnemonic" opcode [- mask min..=max] [size] Shape;
//! ```
//!
//! Without a mask the opcode must match all eight bits. With a mask, the
//! zero bits of the mask hold a register number (or the high address bits of
//! `ajmp`/`acall`) whose raw value must lie in `min..=max`.

use crate::ops::{Descriptor, Shape};

macro_rules! ops {
    (@row $name:literal $opcode:literal - $mask:literal $min:literal ..= $max:literal [$size:literal] $shape:ident) => {
        Descriptor {
            opcode: $opcode,
            mask: $mask,
            min: $min,
            max: $max,
            size: $size,
            shape: Shape::$shape,
            mnemonic: $name,
        }
    };
    (@row $name:literal $opcode:literal [$size:literal] $shape:ident) => {
        Descriptor {
            opcode: $opcode,
            mask: 0xff,
            min: 0,
            max: 0,
            size: $size,
            shape: Shape::$shape,
            mnemonic: $name,
        }
    };
    (
        $(
            OP $name:literal $opcode:literal $(- $mask:literal $min:literal ..= $max:literal)? [$size:literal] $shape:ident ;
        )*
    ) => {
        /// Every MCS-51 opcode family, in opcode order.
        pub static TABLE: &[Descriptor] = &[
            $( ops!(@row $name $opcode $(- $mask $min ..= $max)? [$size] $shape), )*
        ];
    };
}

ops! {
    OP "nop"   0x00                    [1] None;
    OP "ajmp"  0x01 - 0x1f 0x00..=0xe0 [2] Addr11;
    OP "ljmp"  0x02                    [3] Addr16;
    OP "rr"    0x03                    [1] Acc;
    OP "inc"   0x04                    [1] Acc;
    OP "inc"   0x05                    [2] Direct;
    OP "inc"   0x06 - 0xf0 0x6..=0x7   [1] Indirect;
    OP "inc"   0x08 - 0xf0 0x8..=0xf   [1] Reg;

    OP "jbc"   0x10                    [3] BitRel;
    OP "acall" 0x11 - 0x1f 0x00..=0xe0 [2] Addr11;
    OP "lcall" 0x12                    [3] Addr16;
    OP "rrc"   0x13                    [1] Acc;
    OP "dec"   0x14                    [1] Acc;
    OP "dec"   0x15                    [2] Direct;
    OP "dec"   0x16 - 0xf0 0x6..=0x7   [1] Indirect;
    OP "dec"   0x18 - 0xf0 0x8..=0xf   [1] Reg;

    OP "jb"    0x20                    [3] BitRel;
    OP "ret"   0x22                    [1] None;
    OP "rl"    0x23                    [1] Acc;
    OP "add"   0x24                    [2] AccImm;
    OP "add"   0x25                    [2] AccDirect;
    OP "add"   0x26 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "add"   0x28 - 0xf0 0x8..=0xf   [1] AccReg;

    OP "jnb"   0x30                    [3] BitRel;
    OP "reti"  0x32                    [1] None;
    OP "rlc"   0x33                    [1] Acc;
    OP "addc"  0x34                    [2] AccImm;
    OP "addc"  0x35                    [2] AccDirect;
    OP "addc"  0x36 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "addc"  0x38 - 0xf0 0x8..=0xf   [1] AccReg;

    // Logical
    OP "jc"    0x40                    [2] Rel;
    OP "orl"   0x42                    [2] DirectAcc;
    OP "orl"   0x43                    [3] DirectImm;
    OP "orl"   0x44                    [2] AccImm;
    OP "orl"   0x45                    [2] AccDirect;
    OP "orl"   0x46 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "orl"   0x48 - 0xf0 0x8..=0xf   [1] AccReg;

    OP "jnc"   0x50                    [2] Rel;
    OP "anl"   0x52                    [2] DirectAcc;
    OP "anl"   0x53                    [3] DirectImm;
    OP "anl"   0x54                    [2] AccImm;
    OP "anl"   0x55                    [2] AccDirect;
    OP "anl"   0x56 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "anl"   0x58 - 0xf0 0x8..=0xf   [1] AccReg;

    OP "jz"    0x60                    [2] Rel;
    OP "xrl"   0x62                    [2] DirectAcc;
    OP "xrl"   0x63                    [3] DirectImm;
    OP "xrl"   0x64                    [2] AccImm;
    OP "xrl"   0x65                    [2] AccDirect;
    OP "xrl"   0x66 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "xrl"   0x68 - 0xf0 0x8..=0xf   [1] AccReg;

    OP "jnz"   0x70                    [2] Rel;
    OP "orl"   0x72                    [2] CarryBit;
    OP "jmp"   0x73                    [1] AtAccDptr;
    OP "mov"   0x74                    [2] AccImm;
    OP "mov"   0x75                    [3] DirectImm;
    OP "mov"   0x76 - 0xf0 0x6..=0x7   [2] IndirectImm;
    OP "mov"   0x78 - 0xf0 0x8..=0xf   [2] RegImm;

    // Moves and arithmetic
    OP "sjmp"  0x80                    [2] Rel;
    OP "anl"   0x82                    [2] CarryBit;
    OP "movc"  0x83                    [1] AccAtAccPc;
    OP "div"   0x84                    [1] AccB;
    OP "mov"   0x85                    [3] DirectDirect;
    OP "mov"   0x86 - 0xf0 0x6..=0x7   [2] DirectIndirect;
    OP "mov"   0x88 - 0xf0 0x8..=0xf   [2] DirectReg;

    OP "mov"   0x90                    [3] DptrImm;
    OP "mov"   0x92                    [2] BitCarry;
    OP "movc"  0x93                    [1] AccAtAccDptr;
    OP "subb"  0x94                    [2] AccImm;
    OP "subb"  0x95                    [2] AccDirect;
    OP "subb"  0x96 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "subb"  0x98 - 0xf0 0x8..=0xf   [1] AccReg;

    // 0xa5 is reserved and falls through to `byte`.
    OP "orl"   0xa0                    [2] CarryNotBit;
    OP "mov"   0xa2                    [2] CarryBit;
    OP "inc"   0xa3                    [1] Dptr;
    OP "mul"   0xa4                    [1] AccB;
    OP "mov"   0xa6 - 0xf0 0x6..=0x7   [2] IndirectDirect;
    OP "mov"   0xa8 - 0xf0 0x8..=0xf   [2] RegDirect;

    OP "anl"   0xb0                    [2] CarryNotBit;
    OP "cpl"   0xb2                    [2] Bit;
    OP "cpl"   0xb3                    [1] Carry;
    OP "cjne"  0xb4                    [3] AccImmRel;
    OP "cjne"  0xb5                    [3] AccDirectRel;
    OP "cjne"  0xb6 - 0xf0 0x6..=0x7   [3] IndirectImmRel;
    OP "cjne"  0xb8 - 0xf0 0x8..=0xf   [3] RegImmRel;

    // Stack and bit operations
    OP "push"  0xc0                    [2] Direct;
    OP "clr"   0xc2                    [2] Bit;
    OP "clr"   0xc3                    [1] Carry;
    OP "swap"  0xc4                    [1] Acc;
    OP "xch"   0xc5                    [2] AccDirect;
    OP "xch"   0xc6 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "xch"   0xc8 - 0xf0 0x8..=0xf   [1] AccReg;

    OP "pop"   0xd0                    [2] Direct;
    OP "setb"  0xd2                    [2] Bit;
    OP "setb"  0xd3                    [1] Carry;
    OP "da"    0xd4                    [1] Acc;
    OP "djnz"  0xd5                    [3] DirectRel;
    OP "xchd"  0xd6 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "djnz"  0xd8 - 0xf0 0x8..=0xf   [2] RegRel;

    // External memory and accumulator moves
    OP "movx"  0xe0                    [1] AccAtDptr;
    OP "movx"  0xe2 - 0xfc 0x2..=0x3   [1] AccIndirect;
    OP "clr"   0xe4                    [1] Acc;
    OP "mov"   0xe5                    [2] AccDirect;
    OP "mov"   0xe6 - 0xf0 0x6..=0x7   [1] AccIndirect;
    OP "mov"   0xe8 - 0xf0 0x8..=0xf   [1] AccReg;

    OP "movx"  0xf0                    [1] AtDptrAcc;
    OP "movx"  0xf2 - 0xfc 0x2..=0x3   [1] IndirectAcc;
    OP "cpl"   0xf4                    [1] Acc;
    OP "mov"   0xf5                    [2] DirectAcc;
    OP "mov"   0xf6 - 0xf0 0x6..=0x7   [1] IndirectAcc;
    OP "mov"   0xf8 - 0xf0 0x8..=0xf   [1] RegAcc;
}

/// All table entries that accept `op`, in table order.
#[cfg(test)]
pub(crate) fn candidates(table: &[Descriptor], op: u8) -> impl Iterator<Item = &Descriptor> {
    table.iter().filter(move |d| d.matches(op))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_matches_shape() {
        for d in TABLE {
            assert_eq!(
                d.size as usize,
                1 + d.shape.operand_len(),
                "{} {:#04x} has size {} but shape {:?}",
                d.mnemonic,
                d.opcode,
                d.size,
                d.shape
            );
        }
    }

    #[test]
    fn no_byte_matches_two_entries() {
        for op in 0..=u8::MAX {
            let hits: Vec<_> = candidates(TABLE, op).collect();
            assert!(hits.len() <= 1, "{op:#04x} matches {hits:?}");
        }
    }

    #[test]
    fn only_the_reserved_opcode_is_unmatched() {
        let unmatched: Vec<u8> = (0..=u8::MAX)
            .filter(|&op| candidates(TABLE, op).next().is_none())
            .collect();
        assert_eq!(unmatched, vec![0xa5]);
    }

    #[test]
    fn register_families_cover_every_index() {
        for d in TABLE.iter().filter(|d| d.shape.register().is_some()) {
            let names = d.shape.register().map(|r| r.names().len()).unwrap_or(0);
            assert_eq!(
                (d.max - d.min) as usize + 1,
                names,
                "{} {:#04x}",
                d.mnemonic,
                d.opcode
            );
            for v in d.min..=d.max {
                let op = (d.opcode & d.mask) | v;
                assert!(d.matches(op));
                assert!(d.register_name(op).is_some());
            }
        }
    }

    #[test]
    fn absolute_jumps_match_every_page() {
        for page in 0..8u8 {
            let ajmp = (page << 5) | 0x01;
            let acall = (page << 5) | 0x11;
            assert_eq!(candidates(TABLE, ajmp).next().map(|d| d.mnemonic), Some("ajmp"));
            assert_eq!(candidates(TABLE, acall).next().map(|d| d.mnemonic), Some("acall"));
        }
    }
}
