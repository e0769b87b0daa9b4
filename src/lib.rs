//! Bytecode chunks and a minimal virtual machine that executes them.
//!
//! A producer builds a [`Chunk`] by appending instructions and constants, and a
//! host runs it on a [`VirtualMachine`]. The [`asm`] module provides a small
//! textual producer, and [`debug`] renders chunks back into readable listings.

pub mod utils;

pub mod value;
pub mod memory;
pub mod chunk;
pub mod vm;

pub mod debug;
pub mod asm;


pub use value::Value;
pub use chunk::{Chunk, OpCode};
pub use vm::{VirtualMachine, InterpretResult, Output};

use asm::AsmError;


/// Assemble `source` and run it on `vm`, reporting any problem on stderr.
pub fn assemble_and_run(vm: &mut VirtualMachine, name: &str, source: &str, output: &mut dyn Output) -> InterpretResult {
    let chunk = match asm::assemble(source) {
        Ok(chunk) => chunk,
        Err(errors) => {
            print_asm_errors(name, &errors);
            return InterpretResult::CompileError;
        }
    };
    
    let result = vm.interpret(&chunk, output);
    if let Err(ref error) = result {
        eprintln!("{}", error);
    }
    
    InterpretResult::from(&result)
}

pub fn print_asm_errors(name: &str, errors: &[AsmError]) {
    eprintln!("Errors in {}:\n", name);
    for error in errors.iter() {
        eprintln!("{}", error);
    }
}
