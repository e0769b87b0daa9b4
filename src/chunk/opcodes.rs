// Opcodes

// Rust enums are not like C enums! They're more like unions.
// So if we want to convert between them and integer constants easily, 
// we need to explictly define each value as a const

use static_assertions::const_assert_eq;

// 0x00         Control

                        // width set here so that the longest mnemonic is 16 chars
const OP_RETURN:        u8 = 0x00;  // halt the current chunk

// 0x01         Immediate Values

const OP_CONSTANT:      u8 = 0x01;  // load a constant from the chunk's const pool


#[repr(u8)]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum OpCode {
    Return = OP_RETURN,
    Constant = OP_CONSTANT,
}

const_assert_eq!(core::mem::size_of::<OpCode>(), 1);

impl OpCode {
    pub const ALL: [OpCode; 2] = [ Self::Return, Self::Constant ];
    
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        let opcode = match byte {
            OP_RETURN => Self::Return,
            OP_CONSTANT => Self::Constant,
            
            _ => return None,
        };
        Some(opcode)
    }
    
    /// length of the instruction including operands
    pub fn instr_len(&self) -> usize {
        match self {
            Self::Return => 1,
            Self::Constant => 2,
        }
    }
    
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Return => "OP_RETURN",
            Self::Constant => "OP_CONSTANT",
        }
    }
    
    /// Case-insensitive, the "OP_" prefix may be omitted
    pub fn from_mnemonic(name: &str) -> Option<OpCode> {
        let name = name.to_ascii_uppercase();
        let name = name.strip_prefix("OP_").unwrap_or(&name);
        
        Self::ALL.iter().copied()
            .find(|opcode| opcode.mnemonic()[3..] == *name)
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self { opcode as u8 }
}

impl PartialEq<u8> for OpCode {
    fn eq(&self, other: &u8) -> bool { *other == (*self).into() }
}

// For disassembly/debugging
impl std::fmt::Display for OpCode {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mnemonic = self.mnemonic();
        
        if let Some(width) = fmt.width() {
            write!(fmt, "{:1$}", mnemonic, width)
        } else {
            fmt.write_str(mnemonic)
        }
    }
}
