use std::fmt;
use std::error::Error;

use crate::utils;
use crate::memory::MemoryError;


pub type ChunkResult<T> = Result<T, ChunkError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConstPoolLimit,  // index does not fit in an operand
    Memory,
}

#[derive(Debug)]
pub struct ChunkError {
    kind: ErrorKind,
    cause: Option<Box<dyn Error>>,
}

impl ChunkError {
    pub fn kind(&self) -> &ErrorKind { &self.kind }
}

impl From<ErrorKind> for ChunkError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, cause: None }
    }
}

impl From<MemoryError> for ChunkError {
    fn from(error: MemoryError) -> Self {
        Self { kind: ErrorKind::Memory, cause: Some(Box::new(error)) }
    }
}

impl Error for ChunkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for ChunkError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind() {
            ErrorKind::ConstPoolLimit => "constant pool limit reached",
            ErrorKind::Memory => "",
        };
        
        utils::format_error(fmt, "chunk error", Some(message), self.source())
    }
}
