//! A line-oriented assembler, so that chunks can be written by hand.
//!
//! Each non-empty line holds one instruction, and the line number is recorded
//! as that instruction's source line:
//!
//! ```text
//! ; comments run to the end of the line
//! OP_CONSTANT 3.14    ; adds 3.14 to the pool and loads it
//! OP_CONSTANT #0      ; loads an existing pool index, nothing is added
//! OP_RETURN
//! .byte 0xff          ; emits a raw byte
//! ```
//!
//! Mnemonics are case-insensitive and the `OP_` prefix is optional.
//! Constant literals are numbers, `true`, `false` or `nil`.

use std::fmt;
use std::error::Error;

use crate::utils;
use crate::value::Value;
use crate::chunk::{Chunk, OpCode, ConstID, LineNo, ChunkError};

mod tests;


pub type AsmResult<T> = Result<T, AsmError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownMnemonic(String),
    MissingOperand,
    UnexpectedOperand,
    InvalidLiteral(String),
    InvalidByte(String),
    ChunkWrite,
}

#[derive(Debug)]
pub struct AsmError {
    kind: ErrorKind,
    lineno: LineNo,
    cause: Option<Box<dyn Error>>,
}

impl AsmError {
    pub fn new(kind: ErrorKind, lineno: LineNo) -> Self {
        Self { kind, lineno, cause: None }
    }
    
    fn chunk_write(error: impl Into<ChunkError>, lineno: LineNo) -> Self {
        Self {
            kind: ErrorKind::ChunkWrite,
            lineno,
            cause: Some(Box::new(error.into())),
        }
    }
    
    pub fn kind(&self) -> &ErrorKind { &self.kind }
    
    pub fn lineno(&self) -> LineNo { self.lineno }
}

impl Error for AsmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind() {
            ErrorKind::UnknownMnemonic(name) => format!("unknown instruction \"{}\"", utils::trim_str(name, 24)),
            ErrorKind::MissingOperand => "missing operand".to_string(),
            ErrorKind::UnexpectedOperand => "unexpected operand".to_string(),
            ErrorKind::InvalidLiteral(literal) => format!("invalid constant \"{}\"", utils::trim_str(literal, 24)),
            ErrorKind::InvalidByte(literal) => format!("invalid byte \"{}\"", utils::trim_str(literal, 24)),
            ErrorKind::ChunkWrite => String::new(),
        };
        
        write!(fmt, "[line {}] ", self.lineno)?;
        utils::format_error(fmt, "assembly error", Some(&message), self.source())
    }
}


/// Assemble `source` into a new chunk, collecting every error found.
pub fn assemble(source: &str) -> Result<Chunk, Vec<AsmError>> {
    let mut chunk = Chunk::new();
    let mut errors = Vec::new();
    
    for (idx, raw_line) in source.lines().enumerate() {
        let lineno = LineNo::try_from(idx + 1).unwrap_or(LineNo::MAX);
        
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        
        if let Err(error) = assemble_line(&mut chunk, line, lineno) {
            errors.push(error);
        }
    }
    
    if errors.is_empty() {
        Ok(chunk)
    } else {
        Err(errors)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn assemble_line(chunk: &mut Chunk, line: &str, lineno: LineNo) -> AsmResult<()> {
    let mut parts = line.split_whitespace();
    let mnemonic = parts.next().unwrap_or_default();
    let operand = parts.next();
    
    if parts.next().is_some() {
        return Err(AsmError::new(ErrorKind::UnexpectedOperand, lineno));
    }
    
    if mnemonic.eq_ignore_ascii_case(".byte") {
        let operand = operand.ok_or_else(|| AsmError::new(ErrorKind::MissingOperand, lineno))?;
        let byte = parse_byte(operand)
            .ok_or_else(|| AsmError::new(ErrorKind::InvalidByte(operand.to_string()), lineno))?;
        
        return chunk.write_instruction(byte, lineno)
            .map_err(|error| AsmError::chunk_write(error, lineno));
    }
    
    let opcode = OpCode::from_mnemonic(mnemonic)
        .ok_or_else(|| AsmError::new(ErrorKind::UnknownMnemonic(mnemonic.to_string()), lineno))?;
    
    match opcode {
        OpCode::Return => {
            if operand.is_some() {
                return Err(AsmError::new(ErrorKind::UnexpectedOperand, lineno));
            }
            chunk.write_instruction(opcode, lineno)
                .map_err(|error| AsmError::chunk_write(error, lineno))
        }
        
        OpCode::Constant => {
            let operand = operand.ok_or_else(|| AsmError::new(ErrorKind::MissingOperand, lineno))?;
            
            // explicit pool index
            if let Some(index) = operand.strip_prefix('#') {
                let cid = index.parse::<ConstID>()
                    .map_err(|_| AsmError::new(ErrorKind::InvalidByte(operand.to_string()), lineno))?;
                
                return chunk.write_instruction(opcode, lineno)
                    .and_then(|_| chunk.write_instruction(cid, lineno))
                    .map_err(|error| AsmError::chunk_write(error, lineno));
            }
            
            let value = parse_literal(operand)
                .ok_or_else(|| AsmError::new(ErrorKind::InvalidLiteral(operand.to_string()), lineno))?;
            
            chunk.write_constant(value, lineno)
                .map(|_| ())
                .map_err(|error| AsmError::chunk_write(error, lineno))
        }
    }
}

fn parse_byte(literal: &str) -> Option<u8> {
    let lower = literal.to_ascii_lowercase();
    match lower.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => lower.parse::<u8>().ok(),
    }
}

fn parse_literal(literal: &str) -> Option<Value> {
    match literal {
        "nil" => Some(Value::Nil),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => literal.parse::<f64>().ok().map(Value::Number),
    }
}
