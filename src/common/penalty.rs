use super::metadata::Color;
use crate::builder::QRCode;

// Mask penalty rules
//------------------------------------------------------------------------------

pub fn total_penalty(qr: &QRCode) -> u32 {
    adjacent_penalty(qr) + block_penalty(qr) + finder_pattern_penalty(qr) + balance_penalty(qr)
}

// Rule 1: every run of 5 or more same colored modules in a row or column
// scores its length minus 2
pub fn adjacent_penalty(qr: &QRCode) -> u32 {
    let w = qr.dimension();
    let mut pen = 0;
    for i in 0..w {
        pen += run_penalty((0..w).map(|j| qr.get(j, i)));
        pen += run_penalty((0..w).map(|j| qr.get(i, j)));
    }
    pen
}

fn run_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = Color::Light;
    let mut run_len = 0;
    for clr in line {
        if clr == last {
            run_len += 1;
            continue;
        }
        if run_len >= 5 {
            pen += run_len - 2;
        }
        last = clr;
        run_len = 1;
    }
    if run_len >= 5 {
        pen += run_len - 2;
    }
    pen
}

// Rule 2: 3 for each 2x2 window of a single color, windows may overlap
pub fn block_penalty(qr: &QRCode) -> u32 {
    let w = qr.dimension();
    let mut pen = 0;
    for x in 0..w - 1 {
        for y in 0..w - 1 {
            let clr = qr.get(x, y);
            let uniform = clr == qr.get(x + 1, y)
                && clr == qr.get(x, y + 1)
                && clr == qr.get(x + 1, y + 1);
            if uniform {
                pen += 3;
            }
        }
    }
    pen
}

static FINDER_LIKE_PATTERNS: [[bool; 11]; 2] = [
    [true, false, true, true, true, false, true, false, false, false, false],
    [false, false, false, false, true, false, true, true, true, false, true],
];

// Rule 3: 40 for each 1:1:3:1:1 run with 4 light modules on one side, in
// either orientation
pub fn finder_pattern_penalty(qr: &QRCode) -> u32 {
    let w = qr.dimension();
    if w < 11 {
        return 0;
    }
    let mut pen = 0;
    for x in 0..=w - 11 {
        for y in 0..w {
            if is_finder_like(|i| qr.get(x + i, y)) {
                pen += 40;
            }
            if is_finder_like(|i| qr.get(y, x + i)) {
                pen += 40;
            }
        }
    }
    pen
}

fn is_finder_like(get: impl Fn(usize) -> Color) -> bool {
    FINDER_LIKE_PATTERNS
        .iter()
        .any(|pat| pat.iter().enumerate().all(|(i, &dark)| (get(i) == Color::Dark) == dark))
}

// Rule 4: 10 for every 5% the dark ratio strays from 50%, measured at the
// nearer of the floor and ceiling 5% steps
pub fn balance_penalty(qr: &QRCode) -> u32 {
    let w = qr.dimension();
    let total = w * w;
    let dark = qr.count_dark_modules();
    let floor = (dark * 20 / total) as i64;
    let ceil = ((dark * 20 + total - 1) / total) as i64;
    let deviation = (floor - 10).abs().min((ceil - 10).abs());
    (deviation * 10) as u32
}
