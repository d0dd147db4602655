//! Linear, left-to-right disassembly of a byte image.

use std::fmt;

use tracing::{trace, warn};

use crate::decode::{DecodeError, Insn, decode};

/// One listing line: an instruction and the address of its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub address: u64,
    pub insn: Insn<'a>,
}

impl fmt::Display for Line<'_> {
    /// `0x0000:\tmnemonic\t\toperands`. The alternate form (`{:#}`) adds a
    /// column of raw instruction bytes after the address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}:", self.address)?;
        if f.alternate() {
            let hex = self
                .insn
                .bytes()
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "\t{hex:<8}")?;
        }
        write!(f, "\t{}", self.insn)
    }
}

/// Iterator over the instructions of a byte slice.
///
/// Each step advances by the length of the instruction just decoded, so the
/// iterator ends exactly at the end of the slice. Once an instruction runs
/// past the end, every remaining byte is listed as `byte`.
pub struct Listing<'a> {
    bytes: &'a [u8],
    origin: u32,
    pos: usize,
    truncated: bool,
}

impl<'a> Listing<'a> {
    pub fn new(bytes: &'a [u8], origin: u32) -> Self {
        Self {
            bytes,
            origin,
            pos: 0,
            truncated: false,
        }
    }

    fn address(&self) -> u64 {
        u64::from(self.origin) + self.pos as u64
    }
}

impl<'a> Iterator for Listing<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.pos..).filter(|rest| !rest.is_empty())?;
        let address = self.address();

        let insn = if self.truncated {
            Insn::byte(rest)
        } else {
            match decode(rest) {
                Ok(insn) => insn,
                Err(DecodeError::Empty) => return None,
                Err(err @ DecodeError::Truncated { needed, available, .. }) => {
                    warn!(address, missing = needed - available, "{err}");
                    self.truncated = true;
                    Insn::byte(rest)
                }
            }
        };

        if insn.is_unknown() {
            trace!(address, byte = insn.opcode(), "undecoded byte");
        }

        self.pos += insn.len();
        Some(Line { address, insn })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len().saturating_sub(self.pos);
        (remaining.div_ceil(3), Some(remaining))
    }
}
