use std::fmt;
use static_assertions::const_assert_eq;


pub type FloatType = f64;

#[cfg(target_pointer_width = "64")]
const_assert_eq!(core::mem::size_of::<Value>(), 16);

// Fundamental data value type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(FloatType),
}

impl Default for Value {
    fn default() -> Self { Self::Nil }
}

impl From<FloatType> for Value {
    fn from(value: FloatType) -> Self { Self::Number(value) }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<()> for Value {
    fn from(_: ()) -> Self { Self::Nil }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(..) => "bool",
            Self::Number(..) => "number",
        }
    }
    
    pub fn as_number(&self) -> Option<FloatType> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
    
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

// numbers use the shortest representation that round-trips, so 1.0 prints as "1"
impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => fmt.write_str("nil"),
            Self::Bool(true) => fmt.write_str("true"),
            Self::Bool(false) => fmt.write_str("false"),
            Self::Number(value) => write!(fmt, "{}", value),
        }
    }
}
