use std::fmt;

use crate::ops::Descriptor;
use crate::render::Operands;
use crate::table::TABLE;

/// Mnemonic printed for a byte that matches no table entry.
pub const UNKNOWN_MNEMONIC: &str = "byte";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("no bytes to decode")]
    Empty,
    #[error("truncated instruction: {mnemonic} (opcode {opcode:#04x}) needs {needed} bytes, {available} available")]
    Truncated {
        opcode: u8,
        mnemonic: &'static str,
        needed: usize,
        available: usize,
    },
}

/// One decoded instruction, borrowing its table entry and exactly the bytes
/// it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insn<'a> {
    descriptor: Option<&'a Descriptor>,
    bytes: &'a [u8],
}

impl<'a> Insn<'a> {
    /// The `byte` pseudo-instruction for the first byte of `bytes`.
    ///
    /// # Panics
    ///
    /// If `bytes` is empty.
    pub(crate) fn byte(bytes: &'a [u8]) -> Self {
        Self {
            descriptor: None,
            bytes: &bytes[..1],
        }
    }

    pub fn descriptor(&self) -> Option<&'a Descriptor> {
        self.descriptor
    }

    /// True for the `byte` fallback.
    pub fn is_unknown(&self) -> bool {
        self.descriptor.is_none()
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    pub fn mnemonic(&self) -> &'a str {
        self.descriptor.map_or(UNKNOWN_MNEMONIC, |d| d.mnemonic)
    }

    pub fn operands(&self) -> Operands<'a> {
        match self.descriptor {
            Some(descriptor) => Operands::Table {
                descriptor,
                bytes: self.bytes,
            },
            None => Operands::Byte(self.bytes[0]),
        }
    }

    /// Number of bytes consumed, opcode included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl fmt::Display for Insn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self.operands();
        if operands.is_empty() {
            f.write_str(self.mnemonic())
        } else {
            write!(f, "{}\t\t{}", self.mnemonic(), operands)
        }
    }
}

/// Select the descriptor for `op`. Every entry is checked and the last one
/// that matches is kept.
pub fn lookup(table: &[Descriptor], op: u8) -> Option<&Descriptor> {
    let mut found = None;
    for d in table {
        if d.matches(op) {
            found = Some(d);
        }
    }
    found
}

/// Decode the instruction at the start of `bytes` with the MCS-51 table.
pub fn decode(bytes: &[u8]) -> Result<Insn<'_>, DecodeError> {
    decode_with(TABLE, bytes)
}

/// Decode the instruction at the start of `bytes` with a caller-supplied
/// table.
///
/// Any first byte decodes; unmatched bytes become a one-byte `byte`
/// instruction. The only failures are an empty slice and an instruction
/// whose trailing bytes run past the end of `bytes`.
pub fn decode_with<'a>(table: &'a [Descriptor], bytes: &'a [u8]) -> Result<Insn<'a>, DecodeError> {
    let &op = bytes.first().ok_or(DecodeError::Empty)?;

    let Some(descriptor) = lookup(table, op) else {
        return Ok(Insn::byte(bytes));
    };

    // A hand-built descriptor may understate its size; never consume fewer
    // bytes than the opcode plus what its shape reads.
    let needed = (descriptor.size as usize).max(1 + descriptor.shape.operand_len());
    if bytes.len() < needed {
        return Err(DecodeError::Truncated {
            opcode: op,
            mnemonic: descriptor.mnemonic,
            needed,
            available: bytes.len(),
        });
    }

    Ok(Insn {
        descriptor: Some(descriptor),
        bytes: &bytes[..needed],
    })
}
