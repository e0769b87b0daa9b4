use std::fmt;
use std::fmt::{Write, Formatter};

use crate::utils;
use crate::chunk::{Chunk, OpCode};


pub struct Disassembler<'c> {
    chunk: &'c Chunk,
    name: Option<&'c str>,
}

impl<'c> Disassembler<'c> {
    pub fn new(chunk: &'c Chunk) -> Self {
        Self { chunk, name: None }
    }
    
    pub fn with_name(mut self, name: &'c str) -> Self {
        self.name.replace(name); self
    }
    
    fn decode_chunk(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name {
            writeln!(fmt, "== {} ==", name)?;
        }
        
        let mut line = String::new();
        let mut offset = 0;
        while offset < self.chunk.len() {
            line.clear();
            offset = decode_instr(&mut line, self.chunk, offset)?;
            writeln!(fmt, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for Disassembler<'_> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        self.decode_chunk(fmt)
    }
}


/// Render the instruction at `offset`, returning the text and the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut line = String::new();
    
    // writing into a String can't fail
    match decode_instr(&mut line, chunk, offset) {
        Ok(next) => (line, next),
        Err(fmt::Error) => (line, offset + 1),
    }
}

fn decode_instr(out: &mut impl Write, chunk: &Chunk, offset: usize) -> Result<usize, fmt::Error> {
    write!(out, "{:04} ", offset)?;
    
    let byte = match chunk.bytes().get(offset) {
        Some(byte) => *byte,
        None => {
            write!(out, "   | <end of chunk>")?;
            return Ok(offset + 1);
        }
    };
    
    let line = chunk.line_for(offset);
    if offset > 0 && line == chunk.line_for(offset - 1) {
        write!(out, "   | ")?;
    } else {
        match line {
            Some(line) => write!(out, "{:4} ", line)?,
            None => write!(out, "   ? ")?,
        }
    }
    
    let opcode = match OpCode::from_byte(byte) {
        Some(opcode) => opcode,
        None => {
            write!(out, "Unknown opcode {:#04x}", byte)?;
            return Ok(offset + 1);
        }
    };
    
    match opcode {
        OpCode::Constant => {
            let cid = match chunk.bytes().get(offset + 1) {
                Some(cid) => *cid,
                None => {
                    write!(out, "{:16} <truncated>", opcode)?;
                    return Ok(chunk.len());
                }
            };
            
            write!(out, "{:16} {: >4} ", opcode, cid)?;
            match chunk.lookup_const(cid) {
                Some(value) => write!(out, "'{}'", utils::trim_str(&value.to_string(), 24))?,
                None => write!(out, "<invalid constant>")?,
            }
        },
        
        OpCode::Return => write!(out, "{}", opcode)?,
    }
    
    Ok(offset + opcode.instr_len())
}
