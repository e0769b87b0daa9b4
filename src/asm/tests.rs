#![cfg(test)]

use crate::value::Value;
use crate::chunk::{OpCode, LineRun};
use crate::asm::{assemble, ErrorKind};


#[test]
fn assemble_constant_and_return() {
    let source = "
        ; load a constant
        OP_CONSTANT 3.14
        OP_RETURN   ; done
    ";
    
    let chunk = assemble(source).unwrap();
    
    assert_eq!(chunk.bytes(), &[ u8::from(OpCode::Constant), 0, u8::from(OpCode::Return) ]);
    assert_eq!(chunk.constants().as_slice(), &[ Value::Number(3.14) ]);
    assert_eq!(chunk.lines().runs(), &[
        LineRun { length: 2, line: 3 },
        LineRun { length: 1, line: 4 },
    ]);
}

#[test]
fn assemble_accepts_short_and_lowercase_mnemonics() {
    let chunk = assemble("constant true\nop_constant nil\nReturn").unwrap();
    
    assert_eq!(chunk.bytes(), &[ 0x01, 0x00, 0x01, 0x01, 0x00 ]);
    assert_eq!(chunk.constants().as_slice(), &[ Value::Bool(true), Value::Nil ]);
}

#[test]
fn assemble_raw_bytes_and_indices() {
    let chunk = assemble("OP_CONSTANT 1\nOP_CONSTANT #0\n.byte 0xFF\n.byte 7").unwrap();
    
    assert_eq!(chunk.bytes(), &[ 0x01, 0x00, 0x01, 0x00, 0xFF, 0x07 ]);
    assert_eq!(chunk.constants().len(), 1);
    assert_eq!(chunk.line_for(4), Some(3));
    assert_eq!(chunk.line_for(5), Some(4));
}

#[test]
fn assemble_collects_all_errors() {
    let source = "
        OP_NEGATE
        OP_CONSTANT
        OP_CONSTANT pi
        OP_RETURN 1
        .byte 256
        OP_CONSTANT 1 2
        OP_RETURN
    ";
    
    let errors = assemble(source).unwrap_err();
    let kinds: Vec<(u32, ErrorKind)> = errors.iter()
        .map(|error| (error.lineno(), error.kind().clone()))
        .collect();
    
    assert_eq!(kinds, vec![
        (2, ErrorKind::UnknownMnemonic("OP_NEGATE".to_string())),
        (3, ErrorKind::MissingOperand),
        (4, ErrorKind::InvalidLiteral("pi".to_string())),
        (5, ErrorKind::UnexpectedOperand),
        (6, ErrorKind::InvalidByte("256".to_string())),
        (7, ErrorKind::UnexpectedOperand),
    ]);
    
    assert_eq!(errors[0].to_string(), "[line 2] assembly error: unknown instruction \"OP_NEGATE\"");
}

#[test]
fn assemble_reports_constant_pool_limit() {
    let source: String = (0..257).map(|n| format!("OP_CONSTANT {}\n", n)).collect();
    
    let errors = assemble(&source).unwrap_err();
    
    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].kind(), ErrorKind::ChunkWrite);
    assert_eq!(errors[0].lineno(), 257);
    assert_eq!(errors[0].to_string(), "[line 257] assembly error: chunk error: constant pool limit reached");
}

#[test]
fn assemble_empty_source() {
    let chunk = assemble("\n   ; nothing here\n").unwrap();
    assert!(chunk.is_empty());
}
