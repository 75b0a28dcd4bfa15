use std::sync::{Arc, Mutex};

use tracing::trace;

use super::galois::GaloisField;
use super::poly::Polynomial;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

// Systematic Reed-Solomon encoder. Generator polynomials are built lazily and
// cached by degree; the cache only ever grows.
#[derive(Debug)]
pub struct ReedSolomonEncoder {
    field: Arc<GaloisField>,
    generators: Mutex<Vec<Polynomial>>,
}

impl ReedSolomonEncoder {
    pub fn new(field: Arc<GaloisField>) -> Self {
        let seed = Polynomial::new(Arc::clone(&field), vec![1]);
        Self { field, generators: Mutex::new(vec![seed]) }
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    // G_0 = 1, G_d = G_(d-1) * (x + a^(d-1+base))
    pub fn generator(&self, degree: usize) -> Polynomial {
        let mut generators = self.generators.lock().unwrap_or_else(|e| e.into_inner());

        if degree >= generators.len() {
            trace!("Extending generator cache from degree {} to {degree}", generators.len() - 1);
            let gf = &self.field;
            for d in generators.len()..=degree {
                let root = gf.exp(d - 1 + gf.base());
                let factor = Polynomial::new(Arc::clone(gf), vec![1, root]);
                let next = generators[d - 1].multiply(&factor);
                generators.push(next);
            }
        }
        generators[degree].clone()
    }

    pub fn cached_degrees(&self) -> usize {
        self.generators.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    // Returns exactly `ecc_count` parity elements for `data`
    pub fn encode(&self, data: &[usize], ecc_count: usize) -> Vec<usize> {
        let generator = self.generator(ecc_count);
        let info = Polynomial::new(Arc::clone(&self.field), data.to_vec())
            .multiply_by_monomial(ecc_count, 1);
        let (_, remainder) = info.divide(&generator);

        let mut res = vec![0; ecc_count];
        if remainder.is_zero() {
            return res;
        }
        // Remainder degree is below ecc_count
        let coefficients = remainder.coefficients();
        res[ecc_count - coefficients.len()..].copy_from_slice(coefficients);
        res
    }
}

#[cfg(test)]
mod reed_solomon_tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use rayon::prelude::*;

    use super::ReedSolomonEncoder;
    use crate::common::ec::galois::GaloisField;

    fn encoder() -> ReedSolomonEncoder {
        ReedSolomonEncoder::new(Arc::new(GaloisField::new(285, 256, 0)))
    }

    fn to_elements(data: &[u8]) -> Vec<usize> {
        data.iter().map(|&b| b as usize).collect()
    }

    #[test]
    fn test_generator() {
        let rs = encoder();
        assert_eq!(rs.generator(0).coefficients(), [1]);
        assert_eq!(rs.generator(1).coefficients(), [1, 1]);
        assert_eq!(rs.generator(2).coefficients(), [1, 3, 2]);
        // Log form of the degree 7 generator is [0, 87, 229, 146, 149, 238, 102, 21]
        let gf = rs.field();
        let exp = [0, 87, 229, 146, 149, 238, 102, 21].map(|l| gf.exp(l));
        assert_eq!(rs.generator(7).coefficients(), exp);
        assert_eq!(rs.cached_degrees(), 8);
    }

    #[test]
    fn test_encode() {
        let rs = encoder();
        let data = to_elements(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11");
        let ecc = rs.encode(&data, 10);
        assert_eq!(ecc, to_elements(b"\xc4#'w\xeb\xd7\xe7\xe2]\x17"));
    }

    #[test]
    fn test_encode_pads_short_remainder() {
        let rs = encoder();
        let data = to_elements(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec");
        let ecc = rs.encode(&data, 13);
        assert_eq!(ecc, to_elements(b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10"));
        assert_eq!(rs.encode(&[0, 0, 0], 5), vec![0; 5]);
    }

    #[test]
    fn test_encode_degenerate_inputs() {
        let rs = encoder();
        assert_eq!(rs.encode(&[1, 2, 3], 0), Vec::<usize>::new());
        assert_eq!(rs.encode(&[], 5), vec![0; 5]);
        assert_eq!(rs.encode(&[], 0), Vec::<usize>::new());
    }

    #[test]
    fn test_encode_is_order_independent() {
        let data = to_elements(b"CUF\x86W&U\xc2w2\x06\x12\x06g&");
        let fresh = encoder().encode(&data, 18);

        let warm = encoder();
        warm.generator(30);
        assert_eq!(warm.encode(&data, 18), fresh);
        assert_eq!(fresh, to_elements(b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'"));
    }

    #[test]
    fn test_concurrent_cache_extension() {
        let rs = encoder();
        let data = to_elements(b"hello world");
        let results = (1..=30usize)
            .into_par_iter()
            .flat_map_iter(|n| [n, 31 - n])
            .map(|n| (n, rs.encode(&data, n)))
            .collect::<Vec<_>>();

        assert_eq!(rs.cached_degrees(), 31);
        let serial = encoder();
        for (n, ecc) in results {
            assert_eq!(ecc, serial.encode(&data, n), "Degree {n}");
        }
    }

    proptest! {
        #[test]
        fn proptest_ecc_len(
            data in prop::collection::vec(0usize..256, 0..64),
            ecc_count in 0usize..31,
        ) {
            let rs = encoder();
            let ecc = rs.encode(&data, ecc_count);
            prop_assert_eq!(ecc.len(), ecc_count);
            prop_assert_eq!(rs.encode(&data, ecc_count), ecc);
        }
    }
}
