use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks two column wide strips from the bottom right corner, alternating
// upward and downward, skipping the vertical timing column. Yields (x, y) of
// every module that isn't reserved for a function pattern or metadata.
pub struct EncRegionIter {
    x: i16,
    y: i16,
    width: i16,
    version: Version,
}

static VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { x: w - 1, y: w - 1, width: w, version }
    }

    fn step(&mut self) {
        let adjusted_col = if self.x <= VERT_TIMING_COL { self.x + 1 } else { self.x };
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.y > 0 => {
                self.y -= 1;
                self.x += 1;
            }
            0 if self.y < self.width - 1 => {
                self.y += 1;
                self.x += 1;
            }
            0 | 2 if self.x == VERT_TIMING_COL + 1 => {
                self.x -= 2;
            }
            _ => {
                self.x -= 1;
            }
        }
    }
}

impl Iterator for EncRegionIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        while self.x >= 0 {
            let (x, y) = (self.x as usize, self.y as usize);
            self.step();
            if !is_reserved(self.version, x, y) {
                return Some((x, y));
            }
        }
        None
    }
}

// True for modules covered by finders, separators, format info, timing
// patterns, version info and alignment patterns
pub fn is_reserved(ver: Version, x: usize, y: usize) -> bool {
    let w = ver.width();
    if (x < 9 || x >= w - 8) && y < 9 || x < 9 && y >= w - 8 {
        return true;
    }
    if x == 6 || y == 6 {
        return true;
    }
    let version_info = w - 11..w - 8;
    if *ver >= 7 && (version_info.contains(&x) && y < 6 || x < 6 && version_info.contains(&y)) {
        return true;
    }

    let positions = ver.alignment_pattern();
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return false;
    };
    let (x, y) = (x as i32, y as i32);
    positions.iter().any(|&cx| {
        positions.iter().any(|&cy| {
            let overlaps_finder = (cx == first && (cy == first || cy == last))
                || (cx == last && cy == first);
            !overlaps_finder && (x - cx).abs() <= 2 && (y - cy).abs() <= 2
        })
    })
}
