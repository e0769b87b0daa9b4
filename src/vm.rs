//! The dispatch engine.
//!
//! A [`VirtualMachine`] executes one [`Chunk`] per call to
//! [`interpret()`](VirtualMachine::interpret), fetching a byte, looking up the
//! handler registered for it, and running the handler until one of them halts.
//! There is no operand stack yet, so `OP_CONSTANT` hands the loaded value to
//! the host through an [`Output`].

use crate::value::Value;
use crate::chunk::{Chunk, OpCode};
use crate::debug::dasm;

pub mod errors;
pub mod cursor;

mod tests;

pub use errors::{ExecResult, RuntimeError, ErrorKind, Location};
pub use cursor::Cursor;


/// Receives the values surfaced by `OP_CONSTANT`
pub trait Output {
    fn emit(&mut self, value: &Value);
}

impl Output for Vec<Value> {
    fn emit(&mut self, value: &Value) {
        self.push(*value)
    }
}

/// Prints each value on its own line
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintOutput;

impl Output for PrintOutput {
    fn emit(&mut self, value: &Value) {
        println!("{}", value)
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl Output for NullOutput {
    fn emit(&mut self, _value: &Value) { }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    HaltedOk,
    HaltedError,
}

/// Result code handed back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

impl InterpretResult {
    /// sysexits-style process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::CompileError => 65,
            Self::RuntimeError => 70,
        }
    }
}

impl<T> From<&ExecResult<T>> for InterpretResult {
    fn from(result: &ExecResult<T>) -> Self {
        match result {
            Ok(..) => Self::Ok,
            Err(..) => Self::RuntimeError,
        }
    }
}


// Helper
enum Control {
    Continue,
    Return,
}

/// the chunk being executed and the position within it
struct VMState<'c> {
    chunk: &'c Chunk,
    cursor: Cursor<'c>,
}

type Handler = fn(&mut VMState<'_>, &mut dyn Output) -> ExecResult<Control>;

/// Handlers indexed by opcode byte
struct DispatchTable {
    handlers: [Option<Handler>; 256],
}

impl DispatchTable {
    fn new() -> Self {
        let mut handlers: [Option<Handler>; 256] = [None; 256];
        
        for opcode in OpCode::ALL.iter() {
            let handler: Handler = match opcode {
                OpCode::Return => op_return,
                OpCode::Constant => op_constant,
            };
            handlers[usize::from(u8::from(*opcode))] = Some(handler);
        }
        
        Self { handlers }
    }
    
    #[inline(always)]
    fn get(&self, byte: u8) -> Option<Handler> {
        self.handlers[usize::from(byte)]
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.handlers.iter().filter(|handler| handler.is_some()).count();
        write!(fmt, "DispatchTable({} handlers)", count)
    }
}


fn op_return(_state: &mut VMState<'_>, _output: &mut dyn Output) -> ExecResult<Control> {
    Ok(Control::Return)
}

fn op_constant(state: &mut VMState<'_>, output: &mut dyn Output) -> ExecResult<Control> {
    let cid = usize::from(state.cursor.read_operand(OpCode::Constant)?);
    
    let value = state.chunk.lookup_const(cid)
        .ok_or_else(|| RuntimeError::new(ErrorKind::InvalidConstantIndex { 
            index: cid, 
            len: state.chunk.constants().len(),
        }))?;
    
    output.emit(value);
    Ok(Control::Continue)
}


/// Executes chunks one at a time.
///
/// A single VM can run any number of chunks, but only sequentially: `interpret()`
/// takes `&mut self`, and the chunk stays borrowed (and so cannot be modified)
/// until the call returns.
#[derive(Debug)]
pub struct VirtualMachine {
    dispatch: DispatchTable,
    status: Status,
}

impl Default for VirtualMachine {
    fn default() -> Self { Self::new() }
}

impl VirtualMachine {
    pub fn new() -> Self {
        Self {
            dispatch: DispatchTable::new(),
            status: Status::Idle,
        }
    }
    
    pub fn status(&self) -> Status { self.status }
    
    /// Run `chunk` from the beginning until it returns or fails.
    ///
    /// Values loaded by `OP_CONSTANT` are passed to `output`. Execution is
    /// synchronous with no timeout, so a chunk that never halts would block the
    /// caller; with the current instruction set the cursor only moves forward,
    /// and running past the end is an error.
    pub fn interpret(&mut self, chunk: &Chunk, output: &mut dyn Output) -> ExecResult<()> {
        log::debug!("interpret chunk: {} bytes, {} constants", chunk.len(), chunk.constants().len());
        
        self.status = Status::Running;
        
        let mut state = VMState {
            chunk,
            cursor: Cursor::new(chunk.bytes()),
        };
        let result = self.run(&mut state, output);
        
        match result {
            Ok(()) => {
                self.status = Status::HaltedOk;
                log::debug!("halted at offset {:04}", state.cursor.offset());
            }
            Err(ref error) => {
                self.status = Status::HaltedError;
                log::debug!("halted with error: {}", error);
            }
        }
        
        result
    }
    
    fn run(&self, state: &mut VMState<'_>, output: &mut dyn Output) -> ExecResult<()> {
        loop {
            let offset = state.cursor.offset();
            
            if log::log_enabled!(log::Level::Trace) {
                let (instr, _) = dasm::disassemble_instruction(state.chunk, offset);
                log::trace!("{}", instr);
            }
            
            match self.exec_instr(state, output) {
                Ok(Control::Continue) => { },
                Ok(Control::Return) => return Ok(()),
                Err(error) => return Err(
                    error.with_location(offset, state.chunk.line_for(offset))
                ),
            }
        }
    }
    
    #[inline]
    fn exec_instr(&self, state: &mut VMState<'_>, output: &mut dyn Output) -> ExecResult<Control> {
        let byte = state.cursor.read_byte()?;
        
        let handler = self.dispatch.get(byte)
            .ok_or_else(|| RuntimeError::new(ErrorKind::InvalidOpcode(byte)))?;
        
        handler(state, output)
    }
}
