mod galois;
mod poly;
mod rs;

use std::sync::Arc;

pub use galois::GaloisField;
pub use poly::Polynomial;
pub use rs::ReedSolomonEncoder;

// QR field: x^8 + x^4 + x^3 + x^2 + 1
pub static QR_PRIMITIVE: usize = 0x11D;

pub static QR_FIELD_SIZE: usize = 256;

pub static QR_GENERATOR_BASE: usize = 0;

// Error correction
//------------------------------------------------------------------------------

/// Byte level Reed-Solomon encoder over the QR field.
///
/// Holds a generator polynomial cache, so build one and share it by reference
/// across encodes. It is `Send + Sync`.
#[derive(Debug)]
pub struct ErrorCorrection {
    rs: ReedSolomonEncoder,
}

impl ErrorCorrection {
    pub fn new() -> Self {
        let field = GaloisField::new(QR_PRIMITIVE, QR_FIELD_SIZE, QR_GENERATOR_BASE);
        Self { rs: ReedSolomonEncoder::new(Arc::new(field)) }
    }

    /// Computes `ecc_count` error correction bytes for a data block
    pub fn calc_ecc(&self, data: &[u8], ecc_count: u8) -> Vec<u8> {
        let elements = data.iter().map(|&b| b as usize).collect::<Vec<_>>();
        self.rs.encode(&elements, ecc_count as usize).into_iter().map(|e| e as u8).collect()
    }
}

impl Default for ErrorCorrection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod error_correction_tests {
    use super::ErrorCorrection;

    #[test]
    fn test_calc_ecc() {
        let ec = ErrorCorrection::new();
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        assert_eq!(ec.calc_ecc(msg, 10), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
        assert_eq!(ec.calc_ecc(b"hello world", 5), b"\xd7\x01>\xbbs");
    }

    #[test]
    fn test_calc_ecc_len() {
        let ec = ErrorCorrection::default();
        for n in [1u8, 7, 13, 22, 30] {
            assert_eq!(ec.calc_ecc(b"otpauth://totp/x", n).len(), n as usize);
        }
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorCorrection>();
    }
}
