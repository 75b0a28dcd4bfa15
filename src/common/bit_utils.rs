use std::fmt::Display;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

// Append-only MSB-first bit writer used to assemble data codewords
#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    pub fn bit(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len, "Out of bitstream bounds: Len {}, Pos {}", self.len, pos);
        (self.data[pos >> 3] << (pos & 7)) & 0b10000000 != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push(&mut self, bit: bool) {
        assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }

    // Pushes the lowest `size` bits of `bits`, most significant first
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = std::mem::size_of::<T>() * 8;
        debug_assert!(
            size <= max_bits && size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn extend(&mut self, arr: &[u8]) {
        debug_assert!(
            (self.len & 7) == 0,
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );
        let pos = self.len >> 3;
        let arr_bits = arr.len() << 3;
        assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );
        self.data[pos..pos + arr.len()].copy_from_slice(arr);
        self.len += arr_bits;
    }
}


// Bit list
//------------------------------------------------------------------------------

// Fixed capacity bit array, 8 bits packed per byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitList {
    data: Vec<u8>,
    // Fixed bit length of list
    len: usize,
}

impl BitList {
    pub fn new(len: usize) -> Self {
        Self { data: vec![0; (len + 7) >> 3], len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get_bit(&self, pos: usize) -> bool {
        assert!(pos < self.len, "Out of bitlist bounds: Len {}, Pos {}", self.len, pos);

        let offset = pos & 7;
        let index = pos >> 3;
        self.data[index] & (0b10000000 >> offset) != 0
    }

    pub fn set_bit(&mut self, pos: usize, bit: bool) {
        assert!(pos < self.len, "Out of bitlist bounds: Len {}, Pos {}", self.len, pos);

        let offset = pos & 7;
        let index = pos >> 3;

        self.data[index] &= !(0b10000000 >> offset);
        if bit {
            self.data[index] |= 0b10000000 >> offset;
        }
    }

    // Bits past `len` are never set, so whole bytes can be counted
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}
