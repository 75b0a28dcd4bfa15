use std::sync::Arc;

use super::poly::Polynomial;

// Galois field
//------------------------------------------------------------------------------

// Finite field of characteristic 2 backed by log & antilog tables
#[derive(Debug, PartialEq, Eq)]
pub struct GaloisField {
    size: usize,
    base: usize,
    exp_table: Vec<usize>,
    log_table: Vec<usize>,
}

impl GaloisField {
    pub fn new(primitive: usize, size: usize, base: usize) -> Self {
        let mut exp_table = vec![0; size];
        let mut log_table = vec![0; size];

        let mut x = 1;
        for e in exp_table.iter_mut() {
            *e = x;
            x <<= 1;
            if x >= size {
                x ^= primitive;
                x &= size - 1;
            }
        }
        for (i, &e) in exp_table.iter().enumerate().take(size - 1) {
            log_table[e] = i;
        }

        Self { size, base, exp_table, log_table }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn exp(&self, power: usize) -> usize {
        self.exp_table[power]
    }

    pub fn log(&self, a: usize) -> usize {
        assert!(a != 0, "Log of zero is undefined");
        self.log_table[a]
    }

    pub fn add_or_sub(&self, a: usize, b: usize) -> usize {
        a ^ b
    }

    pub fn multiply(&self, a: usize, b: usize) -> usize {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp_table[(self.log_table[a] + self.log_table[b]) % (self.size - 1)]
    }

    pub fn inverse(&self, a: usize) -> usize {
        assert!(a != 0, "Zero has no multiplicative inverse");
        self.exp_table[self.size - 1 - self.log_table[a]]
    }

    pub fn zero(self: &Arc<Self>) -> Polynomial {
        Polynomial::new(Arc::clone(self), vec![0])
    }
}
