//! Two-tier machine memory
//!
//! Cells inside the loaded program live in a dense vector. Anything
//! outside it, including negative addresses, lives in a sparse map and
//! reads as zero until written.

use std::collections::HashMap;

/// Machine memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    /// Program-sized prefix
    cells: Vec<i64>,

    /// Cells written outside the program
    extended: HashMap<i64, i64>,
}

impl Memory {
    /// Create memory holding a copy of `program`
    pub fn new(program: &[i64]) -> Self {
        Self {
            cells: program.to_vec(),
            extended: HashMap::new(),
        }
    }

    #[inline]
    fn dense_index(&self, address: i64) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&idx| idx < self.cells.len())
    }

    /// Read a cell; unset cells are zero
    #[inline]
    pub fn read(&self, address: i64) -> i64 {
        match self.dense_index(address) {
            Some(idx) => self.cells[idx],
            None => self.extended.get(&address).copied().unwrap_or(0),
        }
    }

    /// Write a cell, extending storage as needed
    #[inline]
    pub fn write(&mut self, address: i64, value: i64) {
        match self.dense_index(address) {
            Some(idx) => self.cells[idx] = value,
            None => {
                self.extended.insert(address, value);
            }
        }
    }

    /// Length of the program-sized prefix
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Program-sized prefix
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Number of cells written outside the program
    pub fn extended_len(&self) -> usize {
        self.extended.len()
    }

    /// Cells written outside the program, in address order
    pub fn extended_cells(&self) -> Vec<(i64, i64)> {
        let mut cells: Vec<_> = self.extended.iter().map(|(&a, &v)| (a, v)).collect();
        cells.sort_unstable();
        cells
    }
}
