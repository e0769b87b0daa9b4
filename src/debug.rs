pub mod dasm;

pub use dasm::{Disassembler, disassemble_instruction};
