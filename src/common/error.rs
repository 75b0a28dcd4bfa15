use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Builder
    DataTooLong,
    InvalidVersion,
    InvalidMaskingPattern,

    // Render
    InvalidScaleTarget { width: u32, height: u32 },
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::DataTooLong => f.write_str("Data too long for any version at this ec level"),
            Self::InvalidVersion => f.write_str("Invalid version"),
            Self::InvalidMaskingPattern => f.write_str("Invalid masking pattern"),
            Self::InvalidScaleTarget { width, height } => {
                write!(f, "Cannot scale QR to an image smaller than {width}x{height}")
            }
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
