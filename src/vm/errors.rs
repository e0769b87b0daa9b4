use std::fmt;
use std::error::Error;

use crate::utils;
use crate::chunk::{OpCode, LineNo};


pub type ExecResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidOpcode(u8),
    TruncatedOperand(OpCode),
    InvalidConstantIndex { index: usize, len: usize },
    UnexpectedEndOfChunk,  // ran past the last byte without returning
}

/// Where in the chunk an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: Option<LineNo>,
}

#[derive(Debug, Clone)]
pub struct RuntimeError {
    kind: ErrorKind,
    location: Option<Location>,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, location: None }
    }
    
    pub fn with_location(mut self, offset: usize, line: Option<LineNo>) -> Self {
        self.location.replace(Location { offset, line }); self
    }
    
    pub fn kind(&self) -> &ErrorKind { &self.kind }
    
    /// start of the instruction that failed
    pub fn location(&self) -> Option<&Location> { self.location.as_ref() }
}

impl From<ErrorKind> for RuntimeError {
    fn from(kind: ErrorKind) -> Self { Self::new(kind) }
}

impl Error for RuntimeError { }

impl fmt::Display for RuntimeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind() {
            ErrorKind::InvalidOpcode(byte) => 
                format!("invalid opcode {:#04x}", byte),
            ErrorKind::TruncatedOperand(opcode) => 
                format!("truncated operand for {}", opcode),
            ErrorKind::InvalidConstantIndex { index, len } => 
                format!("constant index {} out of range for pool of {}", index, len),
            ErrorKind::UnexpectedEndOfChunk => 
                "reached end of chunk without returning".to_string(),
        };
        
        if let Some(Location { offset, line }) = self.location {
            match line {
                Some(line) => write!(fmt, "[line {}] ", line)?,
                None => write!(fmt, "[offset {:04}] ", offset)?,
            }
        }
        
        utils::format_error(fmt, "runtime error", Some(&message), None)
    }
}
