use crate::chunk::OpCode;
use crate::vm::errors::{ExecResult, RuntimeError, ErrorKind};


/// Bounds-checked read position into an instruction buffer
#[derive(Debug, Clone)]
pub struct Cursor<'c> {
    bytes: &'c [u8],
    offset: usize,
}

impl<'c> Cursor<'c> {
    pub fn new(bytes: &'c [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
    
    #[inline(always)]
    pub fn offset(&self) -> usize { self.offset }
    
    #[inline(always)]
    pub fn is_at_end(&self) -> bool { self.offset >= self.bytes.len() }
    
    /// Fetch the next opcode byte
    #[inline]
    pub fn read_byte(&mut self) -> ExecResult<u8> {
        let byte = *self.bytes.get(self.offset)
            .ok_or_else(|| RuntimeError::new(ErrorKind::UnexpectedEndOfChunk))?;
        
        self.offset += 1;
        Ok(byte)
    }
    
    /// Fetch an operand byte belonging to `opcode`
    #[inline]
    pub fn read_operand(&mut self, opcode: OpCode) -> ExecResult<u8> {
        let byte = *self.bytes.get(self.offset)
            .ok_or_else(|| RuntimeError::new(ErrorKind::TruncatedOperand(opcode)))?;
        
        self.offset += 1;
        Ok(byte)
    }
}
