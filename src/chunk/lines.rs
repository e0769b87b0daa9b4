/// Run-length encoded mapping from instruction offset to source line

use crate::memory::{GrowableArray, MemResult};


pub type LineNo = u32;

/// `length` consecutive bytes that all came from `line`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    pub length: usize,
    pub line: LineNo,
}

#[derive(Debug, Default, Clone)]
pub struct LineTable {
    runs: GrowableArray<LineRun>,
    covered: usize,  // sum of all run lengths
}

impl LineTable {
    pub fn new() -> Self {
        Self {
            runs: GrowableArray::new(),
            covered: 0,
        }
    }
    
    /// number of instruction bytes the table accounts for
    pub fn covered(&self) -> usize { self.covered }
    
    pub fn runs(&self) -> &[LineRun] { self.runs.as_slice() }
    
    pub fn capacity(&self) -> usize { self.runs.capacity() }
    
    /// make sure the next `push()` cannot fail
    pub fn reserve_run(&mut self) -> MemResult<()> {
        self.runs.reserve(1)
    }
    
    pub fn push(&mut self, line: LineNo) -> MemResult<()> {
        match self.runs.last_mut() {
            Some(run) if run.line == line => run.length += 1,
            _ => self.runs.push(LineRun { length: 1, line })?,
        }
        self.covered += 1;
        Ok(())
    }
    
    pub fn line_for(&self, offset: usize) -> Option<LineNo> {
        if offset >= self.covered {
            return None;
        }
        
        let mut end = 0;
        for run in self.runs.iter() {
            end += run.length;
            if offset < end {
                return Some(run.line);
            }
        }
        None
    }
    
    /// one line per covered byte
    pub fn iter(&self) -> impl Iterator<Item=LineNo> + '_ {
        self.runs.iter().flat_map(
            |run| std::iter::repeat(run.line).take(run.length)
        )
    }
    
    pub fn release(&mut self) {
        self.runs.release();
        self.covered = 0;
    }
}
