/// The constant pool of a chunk

use crate::value::Value;
use crate::memory::{GrowableArray, MemResult};


/// Width of the `OP_CONSTANT` operand
pub type ConstID = u8;


#[derive(Debug, Default, Clone)]
pub struct ConstantPool {
    values: GrowableArray<Value>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self { values: GrowableArray::new() }
    }
    
    pub fn len(&self) -> usize { self.values.len() }
    
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    
    pub fn capacity(&self) -> usize { self.values.capacity() }
    
    pub fn as_slice(&self) -> &[Value] { self.values.as_slice() }
    
    pub fn iter(&self) -> impl Iterator<Item=&Value> { self.values.iter() }
    
    /// Append a value, returning its index. Indices are never reused or invalidated.
    pub fn add(&mut self, value: Value) -> MemResult<usize> {
        self.values.push(value)?;
        Ok(self.values.len() - 1)
    }
    
    pub fn get(&self, index: impl Into<usize>) -> Option<&Value> {
        self.values.as_slice().get(index.into())
    }
    
    pub fn release(&mut self) {
        self.values.release()
    }
}
