//! Decoder and linear disassembler for the MCS-51 (8051) instruction set.
//!
//! ```
//! let insn = mcs51::decode(&[0x02, 0x12, 0x34]).unwrap();
//! assert_eq!(insn.mnemonic(), "ljmp");
//! assert_eq!(insn.operands().to_string(), "0x1234");
//! assert_eq!(insn.len(), 3);
//! ```

mod decode;
mod image;
mod listing;
pub mod ops;
pub mod render;
pub mod table;

pub use decode::{DecodeError, Insn, UNKNOWN_MNEMONIC, decode, decode_with, lookup};
pub use image::{Image, LoadError};
pub use listing::{Line, Listing};
pub use ops::{Descriptor, Shape};
pub use table::TABLE;
