#![cfg(test)]

use crate::value::Value;
use crate::chunk::{Chunk, OpCode};
use crate::vm::{VirtualMachine, Status, InterpretResult, ErrorKind, Location, NullOutput};


fn run(vm: &mut VirtualMachine, chunk: &Chunk) -> (InterpretResult, Vec<Value>) {
    let mut output: Vec<Value> = Vec::new();
    let result = vm.interpret(chunk, &mut output);
    (InterpretResult::from(&result), output)
}


#[test_log::test]
fn vm_constant_then_return() {
    let mut chunk = Chunk::new();
    let cid = chunk.add_constant(Value::from(3.14)).unwrap();
    chunk.write_instruction(OpCode::Constant, 123).unwrap();
    chunk.write_instruction(cid as u8, 123).unwrap();
    chunk.write_instruction(OpCode::Return, 123).unwrap();
    
    let mut vm = VirtualMachine::new();
    let (result, output) = run(&mut vm, &chunk);
    
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, vec![ Value::Number(3.14) ]);
    assert_eq!(vm.status(), Status::HaltedOk);
}

#[test]
fn vm_return_alone() {
    let mut chunk = Chunk::new();
    chunk.write_instruction(OpCode::Return, 1).unwrap();
    
    let mut vm = VirtualMachine::new();
    let (result, output) = run(&mut vm, &chunk);
    
    assert_eq!(result, InterpretResult::Ok);
    assert!(output.is_empty());
}

#[test]
fn vm_stops_at_first_return() {
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::from(1.0), 1).unwrap();
    chunk.write_instruction(OpCode::Return, 1).unwrap();
    chunk.write_constant(Value::from(2.0), 2).unwrap();
    chunk.write_instruction(OpCode::Return, 2).unwrap();
    
    let (result, output) = run(&mut VirtualMachine::new(), &chunk);
    
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, vec![ Value::Number(1.0) ]);
}

#[test]
fn vm_surfaces_constants_in_order() {
    let mut chunk = Chunk::new();
    let values = [ Value::Nil, Value::Bool(true), Value::Number(-0.5), Value::Bool(false) ];
    for (line, value) in values.iter().enumerate() {
        chunk.write_constant(*value, line as u32 + 1).unwrap();
    }
    chunk.write_instruction(OpCode::Return, 5).unwrap();
    
    let (result, output) = run(&mut VirtualMachine::new(), &chunk);
    
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output.as_slice(), &values);
}

#[test_log::test]
fn vm_unknown_opcode_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.write_instruction(0xFF, 3).unwrap();
    
    let mut vm = VirtualMachine::new();
    let error = vm.interpret(&chunk, &mut NullOutput).unwrap_err();
    
    assert_eq!(*error.kind(), ErrorKind::InvalidOpcode(0xFF));
    assert_eq!(error.location(), Some(&Location { offset: 0, line: Some(3) }));
    assert_eq!(error.to_string(), "[line 3] runtime error: invalid opcode 0xff");
    assert_eq!(vm.status(), Status::HaltedError);
}

#[test]
fn vm_truncated_operand_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.write_instruction(OpCode::Constant, 1).unwrap();
    
    let mut vm = VirtualMachine::new();
    let mut output: Vec<Value> = Vec::new();
    let error = vm.interpret(&chunk, &mut output).unwrap_err();
    
    assert_eq!(*error.kind(), ErrorKind::TruncatedOperand(OpCode::Constant));
    assert_eq!(error.location().map(|loc| loc.offset), Some(0));
    assert!(output.is_empty());
    assert_eq!(vm.status(), Status::HaltedError);
}

#[test]
fn vm_invalid_constant_index_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.add_constant(Value::Nil).unwrap();
    chunk.write_instruction(OpCode::Constant, 1).unwrap();
    chunk.write_instruction(0, 1).unwrap();
    chunk.write_instruction(OpCode::Constant, 2).unwrap();
    chunk.write_instruction(1, 2).unwrap();
    chunk.write_instruction(OpCode::Return, 3).unwrap();
    
    let mut output: Vec<Value> = Vec::new();
    let error = VirtualMachine::new().interpret(&chunk, &mut output).unwrap_err();
    
    assert_eq!(*error.kind(), ErrorKind::InvalidConstantIndex { index: 1, len: 1 });
    assert_eq!(error.location(), Some(&Location { offset: 2, line: Some(2) }));
    assert_eq!(output, vec![ Value::Nil ]);
}

#[test]
fn vm_running_off_the_end_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::from(1.5), 1).unwrap();
    
    let mut output: Vec<Value> = Vec::new();
    let error = VirtualMachine::new().interpret(&chunk, &mut output).unwrap_err();
    
    assert_eq!(*error.kind(), ErrorKind::UnexpectedEndOfChunk);
    assert_eq!(error.location(), Some(&Location { offset: 2, line: None }));
    assert_eq!(error.to_string(), "[offset 0002] runtime error: reached end of chunk without returning");
    assert_eq!(output, vec![ Value::Number(1.5) ]);
}

#[test]
fn vm_empty_chunk_is_runtime_error() {
    let chunk = Chunk::new();
    let error = VirtualMachine::new().interpret(&chunk, &mut NullOutput).unwrap_err();
    
    assert_eq!(*error.kind(), ErrorKind::UnexpectedEndOfChunk);
}

#[test]
fn vm_is_reusable_after_errors() {
    let mut bad = Chunk::new();
    bad.write_instruction(OpCode::Constant, 1).unwrap();
    bad.write_instruction(7, 1).unwrap();
    
    let mut good = Chunk::new();
    good.write_constant(Value::from(42.0), 1).unwrap();
    good.write_instruction(OpCode::Return, 1).unwrap();
    
    let mut vm = VirtualMachine::new();
    assert_eq!(vm.status(), Status::Idle);
    
    let (result, _) = run(&mut vm, &bad);
    assert_eq!(result, InterpretResult::RuntimeError);
    assert_eq!(vm.status(), Status::HaltedError);
    
    // the cursor starts over at zero for every call
    for _ in 0..3 {
        let (result, output) = run(&mut vm, &good);
        assert_eq!(result, InterpretResult::Ok);
        assert_eq!(output, vec![ Value::Number(42.0) ]);
        assert_eq!(vm.status(), Status::HaltedOk);
    }
}

#[test]
fn interpret_result_exit_codes() {
    assert_eq!(InterpretResult::Ok.exit_code(), 0);
    assert_eq!(InterpretResult::CompileError.exit_code(), 65);
    assert_eq!(InterpretResult::RuntimeError.exit_code(), 70);
}
