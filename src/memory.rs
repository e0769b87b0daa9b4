//! Growable arrays with an explicit growth policy.
//!
//! Every buffer owned by a [`Chunk`](crate::chunk::Chunk) is a [`GrowableArray`].
//! Capacity doubles whenever it runs out, starting from [`MIN_CAPACITY`], so `N`
//! appends cause `O(log N)` reallocations. Allocation failure is reported to the
//! caller as an [`ErrorKind::OutOfMemory`] error instead of aborting.

use std::fmt;
use std::mem;
use std::error::Error;
use std::collections::TryReserveError;

use crate::utils;



pub type MemResult<T> = Result<T, MemoryError>;

/// capacity of the first allocation
pub const MIN_CAPACITY: usize = 8;

#[inline]
pub fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY { MIN_CAPACITY }
    else { capacity.saturating_mul(2) }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfMemory { requested: usize },  // in bytes
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug)]
pub struct MemoryError {
    kind: ErrorKind,
    cause: Option<Box<dyn Error>>,
}

impl MemoryError {
    pub fn out_of_memory(requested: usize, cause: TryReserveError) -> Self {
        Self {
            kind: ErrorKind::OutOfMemory { requested },
            cause: Some(Box::new(cause)),
        }
    }
    
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::from(ErrorKind::IndexOutOfRange { index, len })
    }
    
    pub fn kind(&self) -> &ErrorKind { &self.kind }
}

impl From<ErrorKind> for MemoryError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, cause: None }
    }
}

impl Error for MemoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind() {
            ErrorKind::OutOfMemory { requested } => 
                format!("failed to allocate {} bytes", requested),
            ErrorKind::IndexOutOfRange { index, len } => 
                format!("index {} out of range for length {}", index, len),
        };
        
        utils::format_error(fmt, "memory error", Some(&message), self.source())
    }
}


/// An append-only array that grows its backing storage by doubling.
#[derive(Debug, Clone)]
pub struct GrowableArray<T> {
    items: Vec<T>,
    reallocs: usize,
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self { Self::new() }
}

impl<T> GrowableArray<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            reallocs: 0,
        }
    }
    
    #[inline]
    pub fn len(&self) -> usize { self.items.len() }
    
    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    
    #[inline]
    pub fn capacity(&self) -> usize { self.items.capacity() }
    
    /// number of times the backing storage has been (re)allocated
    pub fn reallocations(&self) -> usize { self.reallocs }
    
    pub fn as_slice(&self) -> &[T] { self.items.as_slice() }
    
    pub fn iter(&self) -> impl Iterator<Item=&T> { self.items.iter() }
    
    pub fn get(&self, index: usize) -> MemResult<&T> {
        self.items.get(index)
            .ok_or_else(|| MemoryError::index_out_of_range(index, self.len()))
    }
    
    pub fn last(&self) -> Option<&T> { self.items.last() }
    
    pub fn last_mut(&mut self) -> Option<&mut T> { self.items.last_mut() }
    
    /// Grow the backing storage until `additional` more items fit without reallocating.
    pub fn reserve(&mut self, additional: usize) -> MemResult<()> {
        let required = self.len().checked_add(additional)
            .ok_or_else(|| MemoryError::from(ErrorKind::OutOfMemory { requested: usize::MAX }))?;
        
        let old_capacity = self.capacity();
        if required <= old_capacity {
            return Ok(());
        }
        
        let mut new_capacity = grow_capacity(old_capacity);
        while new_capacity < required {
            new_capacity = grow_capacity(new_capacity);
        }
        
        self.items.try_reserve_exact(new_capacity - self.len())
            .map_err(|error| MemoryError::out_of_memory(
                new_capacity.saturating_mul(mem::size_of::<T>()), error
            ))?;
        
        self.reallocs += 1;
        log::trace!("grow array {} -> {} items ({} bytes each)", old_capacity, self.capacity(), mem::size_of::<T>());
        Ok(())
    }
    
    pub fn push(&mut self, value: T) -> MemResult<()> {
        self.reserve(1)?;
        self.items.push(value);
        Ok(())
    }
    
    /// Free the backing storage. Count and capacity both drop to zero.
    pub fn release(&mut self) {
        self.items = Vec::new();
        self.reallocs = 0;
    }
}
