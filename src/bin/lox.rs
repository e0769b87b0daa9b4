use std::fs;
use std::process;
use clap::{Command, Arg};

use lox::asm;
use lox::debug::Disassembler;
use lox::vm::{VirtualMachine, InterpretResult, PrintOutput};

const EXIT_IO_ERROR: i32 = 74;

fn main() {
    env_logger::init();
    
    let app = Command::new("lox")
        .version(clap::crate_version!())
        .about("Runs hand-assembled Lox bytecode chunks")
        .arg(
            Arg::new("file")
            .index(1)
            .help("Path to an assembly listing")
            .value_name("FILE")
        )
        .arg(
            Arg::new("cmd")
            .short('c')
            .help("Execute a snippet then exit")
            .value_name("CMD")
        )
        .arg(
            Arg::new("disassemble")
            .short('d')
            .help("Print the disassembled chunk instead of executing")
        );
    
    let args = app.get_matches();
    
    let (name, source) = if let Some(s) = args.value_of("cmd") {
        // allow several instructions on the command line, separated by '|'
        ("<cmd>".to_string(), s.replace('|', "\n"))
    } else if let Some(path) = args.value_of("file") {
        match fs::read_to_string(path) {
            Ok(text) => (path.to_string(), text),
            Err(error) => {
                eprintln!("Error reading source: {}.", error);
                process::exit(EXIT_IO_ERROR);
            }
        }
    } else {
        println!("No input.");
        return;
    };
    
    let result = if args.is_present("disassemble") {
        disassemble(&name, &source)
    } else {
        let mut vm = VirtualMachine::new();
        lox::assemble_and_run(&mut vm, &name, &source, &mut PrintOutput)
    };
    
    log::debug!("{:?}", result);
    process::exit(result.exit_code());
}

fn disassemble(name: &str, source: &str) -> InterpretResult {
    match asm::assemble(source) {
        Ok(chunk) => {
            print!("{}", Disassembler::new(&chunk).with_name(name));
            InterpretResult::Ok
        }
        Err(errors) => {
            lox::print_asm_errors(name, &errors);
            InterpretResult::CompileError
        }
    }
}
