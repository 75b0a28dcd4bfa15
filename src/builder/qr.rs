use crate::common::bit_utils::{BitList, BitStream};
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::*;
use crate::render::ScaleTransform;

// Module matrix of a QR symbol. Bit `x * w + y` holds the module at column x,
// row y; a set bit is dark.
#[derive(Debug, Clone)]
pub struct QRCode {
    modules: BitList,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
    content: String,
    pub(crate) scale: Option<ScaleTransform>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QRCode {
    pub(crate) fn new(ver: Version, ecl: ECLevel, content: String) -> Self {
        let w = ver.width();
        Self { modules: BitList::new(w * w), w, ver, ecl, mask: None, content, scale: None }
    }

    // Light matrix of any width, for exercising the penalty rules
    #[cfg(test)]
    pub(crate) fn blank(w: usize) -> Self {
        Self {
            modules: BitList::new(w * w),
            w,
            ver: Version::MIN,
            ecl: ECLevel::M,
            mask: None,
            content: String::new(),
            scale: None,
        }
    }

    pub fn dimension(&self) -> usize {
        self.w
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    /// Source bytes the symbol was encoded from
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.count_ones()
    }

    /// One line per row, `+` for dark and `.` for light
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for y in 0..self.w {
            for x in 0..self.w {
                res.push(self.get(x, y).select('+', '.'));
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.w && y < self.w,
            "Module out of bounds: Width {}, x {x}, y {y}",
            self.w
        );
        x * self.w + y
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        Color::from(self.modules.get_bit(self.coord_to_index(x, y)))
    }

    pub fn set(&mut self, x: usize, y: usize, clr: Color) {
        let index = self.coord_to_index(x, y);
        self.modules.set_bit(index, clr == Color::Dark);
    }

    // Negative coordinates count back from the far edge
    fn put(&mut self, x: i32, y: i32, clr: Color) {
        let w = self.w as i32;
        debug_assert!(-w <= x && x < w, "x should be within -w..w: {x}");
        debug_assert!(-w <= y && y < w, "y should be within -w..w: {y}");

        let x = if x < 0 { x + w } else { x };
        let y = if y < 0 { y + w } else { y };
        self.set(x as usize, y as usize, clr);
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_finder_patterns(&mut self) {
        let far = self.w as i32 - 4;
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(far, 3);
        self.draw_finder_pattern_at(3, far);
    }

    // 7x7 finder plus its light separator, clipped at the symbol edge
    fn draw_finder_pattern_at(&mut self, cx: i32, cy: i32) {
        let w = self.w as i32;
        for dy in -4..=4 {
            for dx in -4..=4 {
                let (x, y) = (cx + dx, cy + dy);
                if !(0..w).contains(&x) || !(0..w).contains(&y) {
                    continue;
                }
                let dist = i32::max(dx.abs(), dy.abs());
                self.put(x, y, Color::from(dist != 2 && dist != 4));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_timing_patterns(&mut self) {
        let last = self.w as i32 - 9;
        self.draw_line(8, 6, last, 6);
        self.draw_line(6, 8, 6, last);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        debug_assert!(x1 == x2 || y1 == y2, "Line is neither vertical nor horizontal");

        if y1 == y2 {
            for x in x1..=x2 {
                self.put(x, y1, Color::from(x & 1 == 0));
            }
        } else {
            for y in y1..=y2 {
                self.put(x1, y, Color::from(y & 1 == 0));
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use crate::builder::QRCode;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = QRCode::new(Version(1), ECLevel::L, String::new());
        qr.draw_timing_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........+.+.+........\n\
             .....................\n\
             ......+..............\n\
             .....................\n\
             ......+..............\n\
             .....................\n\
             ......+..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        let (Some(&first), Some(&last)) = (poses.first(), poses.last()) else {
            return;
        };
        for &cx in poses {
            for &cy in poses {
                let overlaps_finder =
                    (cx == first && (cy == first || cy == last)) || (cx == last && cy == first);
                if !overlaps_finder {
                    self.draw_alignment_pattern_at(cx, cy);
                }
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, cx: i32, cy: i32) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let dist = i32::max(dx.abs(), dy.abs());
                self.put(cx + dx, cy + dy, Color::from(dist != 1));
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_SIDE);
        self.put(8, -8, Color::Dark);
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, &VERSION_INFO_COORDS_BL);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, &VERSION_INFO_COORDS_TR);
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i32, i32)]) {
        let mut mask = 1 << (bit_len - 1);
        for &(x, y) in coords {
            self.put(x, y, Color::from(number & mask != 0));
            mask >>= 1;
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QRCode {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_patterns();
        self.draw_alignment_patterns();
        self.draw_version_info();
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QRCode {
    // Remainder modules past the payload stay light
    pub(crate) fn draw_encoding_region(&mut self, payload: &BitStream) {
        debug_assert_eq!(
            payload.len(),
            self.ver.total_codewords() << 3,
            "Payload should fill every codeword"
        );

        for ((x, y), bit) in EncRegionIter::new(self.ver).zip(payload.iter()) {
            self.set(x, y, Color::from(bit));
        }
    }

    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_functions();
        for (x, y) in EncRegionIter::new(self.ver) {
            if mask_fn(x as i32, y as i32) {
                let clr = self.get(x, y);
                self.set(x, y, !clr);
            }
        }
        self.draw_format_info(format_info(self.ecl, pattern));
    }
}
