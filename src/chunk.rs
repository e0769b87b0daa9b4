//! Chunks are the unit of bytecode: an instruction buffer, the constants that
//! its operands refer to, and a compressed table of source lines.
//!
//! A chunk is only ever appended to. Producers emit bytes with
//! [`Chunk::write_instruction`] and constants with [`Chunk::add_constant`]
//! (or both at once with [`Chunk::write_constant`]).

pub mod opcodes;
pub mod consts;
pub mod lines;
pub mod errors;


pub use opcodes::OpCode;
pub use consts::{ConstantPool, ConstID};
pub use lines::{LineTable, LineRun, LineNo};
pub use errors::{ChunkError, ChunkResult, ErrorKind};

use crate::value::Value;
use crate::memory::{GrowableArray, MemResult};


#[derive(Debug, Default, Clone)]
pub struct Chunk {
    code: GrowableArray<u8>,
    consts: ConstantPool,
    lines: LineTable,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            code: GrowableArray::new(),
            consts: ConstantPool::new(),
            lines: LineTable::new(),
        }
    }
    
    // Bytes
    
    pub fn len(&self) -> usize { self.code.len() }
    
    pub fn is_empty(&self) -> bool { self.code.is_empty() }
    
    pub fn capacity(&self) -> usize { self.code.capacity() }
    
    pub fn reallocations(&self) -> usize { self.code.reallocations() }
    
    pub fn bytes(&self) -> &[u8] { self.code.as_slice() }
    
    pub fn read_byte(&self, offset: usize) -> MemResult<u8> {
        self.code.get(offset).copied()
    }
    
    /// Append one byte of code that was generated from `line`.
    /// 
    /// Using Into<u8> so that OpCodes can be accepted without extra fuss.
    /// If either the code or the line table cannot grow, neither is modified.
    pub fn write_instruction(&mut self, byte: impl Into<u8>, line: LineNo) -> MemResult<()> {
        self.code.reserve(1)?;
        self.lines.push(line)?;
        self.code.push(byte.into())
    }
    
    // Constants
    
    pub fn constants(&self) -> &ConstantPool { &self.consts }
    
    pub fn lookup_const(&self, index: impl Into<usize>) -> Option<&Value> {
        self.consts.get(index)
    }
    
    pub fn add_constant(&mut self, value: Value) -> MemResult<usize> {
        self.consts.add(value)
    }
    
    /// Add `value` to the constant pool and emit an `OP_CONSTANT` that loads it.
    pub fn write_constant(&mut self, value: Value, line: LineNo) -> ChunkResult<ConstID> {
        let cid = ConstID::try_from(self.consts.len())
            .map_err(|_| ChunkError::from(ErrorKind::ConstPoolLimit))?;
        
        // both bytes share a line, so at most one new run is needed
        self.code.reserve(OpCode::Constant.instr_len())?;
        self.lines.reserve_run()?;
        
        self.consts.add(value)?;
        self.write_instruction(OpCode::Constant, line)?;
        self.write_instruction(cid, line)?;
        Ok(cid)
    }
    
    // Lines
    
    pub fn lines(&self) -> &LineTable { &self.lines }
    
    pub fn line_for(&self, offset: usize) -> Option<LineNo> {
        self.lines.line_for(offset)
    }
    
    /// Free all storage, leaving an empty chunk.
    pub fn release(&mut self) {
        self.code.release();
        self.consts.release();
        self.lines.release();
    }
}
