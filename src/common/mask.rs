use std::ops::Deref;

use tracing::{debug, trace};

use super::error::{QRError, QRResult};
use super::penalty::total_penalty;
use crate::builder::QRCode;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [MaskPattern; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// x is the column and y is the row
mod mask_functions {
    pub fn checkerboard(x: i32, y: i32) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: i32, y: i32) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: i32, _: i32) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: i32, y: i32) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: i32, y: i32) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: i32, y: i32) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: i32, y: i32) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: i32, y: i32) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i32, i32) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Scores every pattern on its own copy of the symbol and keeps the lowest;
// ties go to the lower pattern number
pub fn apply_best_mask(qr: &mut QRCode) -> MaskPattern {
    let (best_mask, best_penalty) = MaskPattern::ALL
        .into_iter()
        .map(|m| {
            let mut candidate = qr.clone();
            candidate.apply_mask(m);
            let penalty = total_penalty(&candidate);
            trace!("Mask {} penalty {penalty}", *m);
            (m, penalty)
        })
        .min_by_key(|&(_, penalty)| penalty)
        .unwrap_or((MaskPattern(0), 0));

    debug!("Selected mask {} with penalty {best_penalty}", *best_mask);
    qr.apply_mask(best_mask);
    best_mask
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{apply_best_mask, MaskPattern};
    use crate::builder::QRBuilder;
    use crate::common::error::QRError;
    use crate::common::metadata::ECLevel;
    use crate::common::penalty::total_penalty;

    #[test]
    fn test_new() {
        assert_eq!(MaskPattern::new(7).map(|m| *m), Ok(7));
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
    }

    #[test_case(0, 0, 0, true)]
    #[test_case(0, 1, 0, false)]
    #[test_case(1, 5, 2, true)]
    #[test_case(1, 2, 3, false)]
    #[test_case(2, 3, 1, true)]
    #[test_case(2, 1, 3, false)]
    #[test_case(3, 1, 2, true)]
    #[test_case(4, 2, 1, true)]
    #[test_case(4, 3, 0, false)]
    #[test_case(5, 6, 1, true)]
    #[test_case(5, 1, 1, false)]
    #[test_case(6, 1, 1, true)]
    #[test_case(6, 2, 2, false)]
    #[test_case(7, 1, 1, false)]
    #[test_case(7, 2, 0, true)]
    fn test_mask_functions(mask: u8, x: i32, y: i32, exp: bool) {
        let f = MaskPattern::new(mask).unwrap().mask_functions();
        assert_eq!(f(x, y), exp);
    }

    #[test]
    fn test_apply_best_mask() {
        let mut qr = QRBuilder::new(b"hello world").ec_level(ECLevel::H).build_unmasked().unwrap();
        let penalties = MaskPattern::ALL
            .map(|m| {
                let mut candidate = qr.clone();
                candidate.apply_mask(m);
                total_penalty(&candidate)
            })
            .to_vec();
        assert_eq!(penalties, [547, 638, 424, 608, 735, 564, 596, 532]);

        let best = apply_best_mask(&mut qr);
        assert_eq!(*best, 2);
        assert_eq!(qr.mask(), Some(best));
    }
}
