//! Operand text for a decoded instruction.

use std::fmt;

use crate::ops::{Descriptor, Shape};

/// 11-bit in-page address of `ajmp`/`acall`: the top three bits of the opcode
/// above the second byte.
#[inline]
pub fn addr11(bytes: &[u8]) -> u16 {
    ((bytes[0] as u16 & 0xe0) << 3) | bytes[1] as u16
}

/// Big-endian 16-bit value in the two bytes after the opcode.
#[inline]
pub fn addr16(bytes: &[u8]) -> u16 {
    ((bytes[1] as u16) << 8) | bytes[2] as u16
}

/// The rendered operands of one instruction.
///
/// Formatting is lazy; nothing is allocated until the value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands<'a> {
    /// Operands of a table instruction. `bytes` starts at the opcode.
    Table {
        descriptor: &'a Descriptor,
        bytes: &'a [u8],
    },
    /// The literal value of a byte that matched no table entry.
    Byte(u8),
}

impl Operands<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Operands::Table {
                descriptor: Descriptor {
                    shape: Shape::None,
                    ..
                },
                ..
            }
        )
    }
}

impl fmt::Display for Operands<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, data) = match *self {
            Operands::Byte(value) => return write!(f, "{value:#04x}"),
            Operands::Table { descriptor, bytes } => (descriptor, bytes),
        };

        if data.len() < 1 + d.shape.operand_len() {
            return write!(f, "undecoded operands, inst is 0x{:04x}", data.first().copied().unwrap_or(0));
        }
        let op = data[0];
        let reg = d.register_name(op).unwrap_or("?");
        let b1 = || data[1];
        let b2 = || data[2];

        use Shape::*;
        match d.shape {
            None => Ok(()),
            Addr11 => write!(f, "0x{:03x}", addr11(data)),
            Addr16 => write!(f, "0x{:04x}", addr16(data)),

            Acc => f.write_str("a"),
            AccB => f.write_str("ab"),
            AccReg | AccIndirect => write!(f, "a, {reg}"),
            AccImm => write!(f, "a, #0x{:02x}", b1()),
            AccImmRel => write!(f, "a, #0x{:02x}, 0x{:02x}", b1(), b2()),
            AccDirect => write!(f, "a, 0x{:02x}", b1()),
            AccDirectRel => write!(f, "a, 0x{:02x}, 0x{:02x}", b1(), b2()),
            AccAtDptr => f.write_str("a, @dptr"),
            AccAtAccDptr => f.write_str("a, @a+dptr"),
            AccAtAccPc => f.write_str("a, @a+pc"),

            Reg | Indirect => f.write_str(reg),
            RegAcc | IndirectAcc => write!(f, "{reg}, a"),
            RegImm | IndirectImm => write!(f, "{reg}, #0x{:02x}", b1()),
            RegImmRel | IndirectImmRel => write!(f, "{reg}, #0x{:02x}, 0x{:02x}", b1(), b2()),
            RegDirect | RegRel | IndirectDirect => write!(f, "{reg}, 0x{:02x}", b1()),

            Direct | Bit | Rel => write!(f, "0x{:02x}", b1()),
            DirectAcc => write!(f, "0x{:02x}, a", b1()),
            DirectReg | DirectIndirect => write!(f, "0x{:02x}, {reg}", b1()),
            DirectImm => write!(f, "0x{:02x}, #0x{:02x}", b1(), b2()),
            // Encoded as `src, dst`; printed in assembler order.
            DirectDirect => write!(f, "0x{:02x}, 0x{:02x}", b2(), b1()),
            DirectRel | BitRel => write!(f, "0x{:02x}, 0x{:02x}", b1(), b2()),

            Dptr => f.write_str("dptr"),
            DptrImm => write!(f, "dptr, #0x{:04x}", addr16(data)),

            BitCarry => write!(f, "0x{:02x}, c", b1()),
            Carry => f.write_str("c"),
            CarryBit => write!(f, "c, 0x{:02x}", b1()),
            CarryNotBit => write!(f, "c, /0x{:02x}", b1()),

            AtDptrAcc => f.write_str("@dptr, a"),
            AtAccDptr => f.write_str("@a+dptr"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{TABLE, candidates};
    use pretty_assertions::assert_eq;

    fn render(bytes: &[u8]) -> String {
        let descriptor = candidates(TABLE, bytes[0]).last().unwrap();
        Operands::Table { descriptor, bytes }.to_string()
    }

    #[test]
    fn address_extraction() {
        assert_eq!(addr11(&[0xe1, 0xff]), 0x7ff);
        assert_eq!(addr11(&[0x21, 0x34]), 0x134);
        assert_eq!(addr16(&[0x02, 0x12, 0x34]), 0x1234);
    }

    #[test]
    fn accumulator_forms() {
        assert_eq!(render(&[0x04]), "a");
        assert_eq!(render(&[0x84]), "ab");
        assert_eq!(render(&[0x2b]), "a, r3");
        assert_eq!(render(&[0x27]), "a, @r1");
        assert_eq!(render(&[0x74, 0x55]), "a, #0x55");
        assert_eq!(render(&[0xb4, 0x10, 0xfe]), "a, #0x10, 0xfe");
        assert_eq!(render(&[0xe5, 0x81]), "a, 0x81");
        assert_eq!(render(&[0xb5, 0x30, 0x02]), "a, 0x30, 0x02");
        assert_eq!(render(&[0xe0]), "a, @dptr");
        assert_eq!(render(&[0x93]), "a, @a+dptr");
        assert_eq!(render(&[0x83]), "a, @a+pc");
        assert_eq!(render(&[0xe3]), "a, @r1");
    }

    #[test]
    fn register_forms() {
        assert_eq!(render(&[0x0f]), "r7");
        assert_eq!(render(&[0xfa]), "r2, a");
        assert_eq!(render(&[0x7b, 0x12]), "r3, #0x12");
        assert_eq!(render(&[0xbc, 0x01, 0x80]), "r4, #0x01, 0x80");
        assert_eq!(render(&[0xab, 0x12]), "r3, 0x12");
        assert_eq!(render(&[0xdd, 0xfe]), "r5, 0xfe");
    }

    #[test]
    fn direct_forms() {
        assert_eq!(render(&[0xc0, 0xe0]), "0xe0");
        assert_eq!(render(&[0xf5, 0x90]), "0x90, a");
        assert_eq!(render(&[0x89, 0x20]), "0x20, r1");
        assert_eq!(render(&[0x86, 0x20]), "0x20, @r0");
        assert_eq!(render(&[0x75, 0x81, 0x60]), "0x81, #0x60");
        assert_eq!(render(&[0x85, 0x30, 0x40]), "0x40, 0x30");
        assert_eq!(render(&[0xd5, 0x30, 0xfd]), "0x30, 0xfd");
    }

    #[test]
    fn indirect_forms() {
        assert_eq!(render(&[0x06]), "@r0");
        assert_eq!(render(&[0xf7]), "@r1, a");
        assert_eq!(render(&[0xf2]), "@r0, a");
        assert_eq!(render(&[0x76, 0xaa]), "@r0, #0xaa");
        assert_eq!(render(&[0xb7, 0x00, 0x05]), "@r1, #0x00, 0x05");
        assert_eq!(render(&[0xa7, 0x44]), "@r1, 0x44");
    }

    #[test]
    fn bit_and_carry_forms() {
        assert_eq!(render(&[0xd2, 0x97]), "0x97");
        assert_eq!(render(&[0x92, 0x20]), "0x20, c");
        assert_eq!(render(&[0x20, 0xe7, 0x03]), "0xe7, 0x03");
        assert_eq!(render(&[0xb3]), "c");
        assert_eq!(render(&[0xa2, 0x08]), "c, 0x08");
        assert_eq!(render(&[0xb0, 0x08]), "c, /0x08");
    }

    #[test]
    fn pointer_and_jump_forms() {
        assert_eq!(render(&[0xa3]), "dptr");
        assert_eq!(render(&[0x90, 0xbe, 0xef]), "dptr, #0xbeef");
        assert_eq!(render(&[0xf0]), "@dptr, a");
        assert_eq!(render(&[0x73]), "@a+dptr");
        assert_eq!(render(&[0x80, 0xfe]), "0xfe");
        assert_eq!(render(&[0xe1, 0x00]), "0x700");
        assert_eq!(render(&[0x12, 0x00, 0x03]), "0x0003");
        assert_eq!(render(&[0x22]), "");
    }

    #[test]
    fn short_input_renders_a_placeholder() {
        let descriptor = candidates(TABLE, 0x02).last().unwrap();
        let operands = Operands::Table {
            descriptor,
            bytes: &[0x02, 0x12],
        };
        assert_eq!(operands.to_string(), "undecoded operands, inst is 0x0002");
    }

    #[test]
    fn unknown_byte_is_a_literal() {
        assert_eq!(Operands::Byte(0xa5).to_string(), "0xa5");
        assert!(!Operands::Byte(0xa5).is_empty());
    }
}
