use tracing::debug;

use super::bit_utils::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

pub use writer::{pad_remaining_capacity, push_segment, push_terminator};

// Mode
//------------------------------------------------------------------------------

// Only byte mode is emitted, its 4 bit indicator is 0100
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Byte = 0b0100,
}

impl Mode {
    pub const BITS: usize = 4;

    pub fn encoded_len(&self, len: usize) -> usize {
        match self {
            Self::Byte => len * 8,
        }
    }
}

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub mode: Mode,
    pub len_bits: usize, // Bit len of char count
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, len_bits: usize, data: &'a [u8]) -> Self {
        Self { mode, len_bits, data }
    }

    pub fn bit_len(&self) -> usize {
        Mode::BITS + self.len_bits + self.mode.encoded_len(self.data.len())
    }
}


// Encoder
//------------------------------------------------------------------------------

// Encodes data into the smallest version that fits at the ec level
pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
    let ver = find_min_version(data, ecl)?;
    debug!("Selected version {} for {} bytes at {ecl:?}", *ver, data.len());
    let bs = encode_with_version(data, ver, ecl)?;
    Ok((bs, ver))
}

pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let bcap = ver.data_bit_capacity(ecl);
    let seg = Segment::new(Mode::Byte, ver.char_cnt_bits(), data);
    if seg.bit_len() > bcap {
        return Err(QRError::DataTooLong);
    }

    let mut bs = BitStream::new(bcap);
    push_segment(seg, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);
    Ok(bs)
}

fn find_min_version(data: &[u8], ecl: ECLevel) -> QRResult<Version> {
    (1..=40)
        .map(Version)
        .find(|&ver| {
            Segment::new(Mode::Byte, ver.char_cnt_bits(), data).bit_len()
                <= ver.data_bit_capacity(ecl)
        })
        .ok_or(QRError::DataTooLong)
}


// Writer
//------------------------------------------------------------------------------

mod writer {
    use super::{Mode, Segment, PADDING_CODEWORDS};
    use crate::common::bit_utils::BitStream;

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        for &b in seg.data {
            out.push_bits(b, 8);
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, Mode::BITS);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0u8, 8 - offset);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS
            .iter()
            .copied()
            .cycle()
            .take(remain_byte_capacity)
            .for_each(|pc| out.push_bits(pc, 8));
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_header, push_padding_bits, push_padding_codewords, push_segment,
            push_terminator,
        };
        use crate::common::bit_utils::BitStream;
        use crate::common::codec::{Mode, Segment};

        #[test]
        fn test_push_header() {
            let mut bs = BitStream::new(32);
            let data = vec![0; 255];
            push_header(&Segment::new(Mode::Byte, 8, &data), &mut bs);
            assert_eq!(bs.data(), [0b01001111, 0b11110000]);

            let mut bs = BitStream::new(32);
            push_header(&Segment::new(Mode::Byte, 16, &data[..3]), &mut bs);
            assert_eq!(bs.data(), [0b01000000, 0b00000000, 0b00110000]);
        }

        #[test]
        fn test_push_segment() {
            let mut bs = BitStream::new(32);
            push_segment(Segment::new(Mode::Byte, 8, b"hi"), &mut bs);
            assert_eq!(bs.len(), 28);
            assert_eq!(bs.data(), [0x40, 0x26, 0x86, 0x90]);
        }

        #[test]
        fn test_push_terminator() {
            let mut bs = BitStream::new(8);
            bs.push_bits(0b11u8, 2);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), 6);

            let mut bs = BitStream::new(8);
            bs.push_bits(0b111111u8, 6);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), 8);
            assert_eq!(bs.data(), [0b11111100]);

            let mut bs = BitStream::new(8);
            bs.push_bits(0xFFu8, 8);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), 8);
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bs = BitStream::new(16);
            bs.push_bits(0b101u8, 3);
            push_padding_bits(&mut bs);
            assert_eq!(bs.len(), 8);
            assert_eq!(bs.data(), [0b10100000]);
        }

        #[test]
        fn test_push_padding_codewords() {
            let mut bs = BitStream::new(48);
            bs.push_bits(0xAAu8, 8);
            push_padding_codewords(&mut bs);
            assert_eq!(bs.data(), [0xAA, 0xEC, 0x11, 0xEC, 0x11, 0xEC]);
        }
    }
}
