mod qr;

pub use qr::QRCode;

use std::ops::Deref;

use tracing::debug;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode as encode_data, encode_with_version},
    ec::ErrorCorrection,
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Configures and builds a [`QRCode`].
///
/// Every setting is optional: the error correction level defaults to M, the
/// smallest fitting version is picked, the mask with the lowest penalty is
/// applied, and a private [`ErrorCorrection`] is used when none is shared.
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    ec: Option<&'a ErrorCorrection>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None, ec: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn error_correction(&mut self, ec: &'a ErrorCorrection) -> &mut Self {
        self.ec = Some(ec);
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {version}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QRCode> {
        let mut qr = self.build_unmasked()?;

        let mask = match self.mask {
            Some(m) => {
                debug!("Applying mask {}", *m);
                qr.apply_mask(m);
                m
            }
            None => {
                debug!("Finding & applying best mask");
                apply_best_mask(&mut qr)
            }
        };

        let total_modules = qr.dimension() * qr.dimension();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "QR generated: Version {}, Ec level {:?}, Mask {}, Dark modules {dark_modules}/{total_modules}",
            *qr.version(),
            qr.ec_level(),
            *mask
        );

        Ok(qr)
    }

    // Every stage up to, but excluding, masking
    pub(crate) fn build_unmasked(&self) -> QRResult<QRCode> {
        debug!("Generating QR {}", self.metadata());

        debug!("Encoding data");
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?, v),
            None => encode_data(self.data, self.ec_level)?,
        };

        let local_ec;
        let ec = match self.ec {
            Some(ec) => ec,
            None => {
                local_ec = ErrorCorrection::new();
                &local_ec
            }
        };

        debug!("Constructing payload with ecc & interleaving");
        let payload = Self::construct_payload(encoded_data.data(), version, self.ec_level, ec);

        // Invalid UTF-8 in raw builder data is echoed lossily
        let content = String::from_utf8_lossy(self.data).into_owned();
        let mut qr = QRCode::new(version, self.ec_level, content);

        debug!("Drawing function patterns");
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region");
        qr.draw_encoding_region(&payload);

        Ok(qr)
    }

    fn construct_payload(
        data: &[u8],
        version: Version,
        ec_level: ECLevel,
        ec: &ErrorCorrection,
    ) -> BitStream {
        let (data_blocks, ecc_blocks) = Self::compute_ecc(data, version, ec_level, ec);
        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        payload
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc<'d>(
        data: &'d [u8],
        version: Version,
        ec_level: ECLevel,
        ec: &ErrorCorrection,
    ) -> (Vec<&'d [u8]>, Vec<Vec<u8>>) {
        let data_blocks = Self::blockify(data, version, ec_level);

        let ecc_size_per_block = version.ecc_per_block(ec_level) as u8;
        let ecc_blocks =
            data_blocks.iter().map(|b| ec.calc_ecc(b, ecc_size_per_block)).collect::<Vec<_>>();

        (data_blocks, ecc_blocks)
    }

    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let (block1_size, block1_count, block2_size, block2_count) =
            version.data_codewords_per_block(ec_level);

        let total_blocks = block1_count + block2_count;
        let total_block1_size = block1_size * block1_count;
        let total_size = total_block1_size + block2_size * block2_count;

        debug_assert!(
            total_size == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            total_size
        );

        let mut data_blocks = Vec::with_capacity(total_blocks);
        data_blocks.extend(data[..total_block1_size].chunks(block1_size));
        if block2_size > 0 {
            data_blocks.extend(data[total_block1_size..].chunks(block2_size));
        }
        data_blocks
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

/// Encodes `content` byte for byte at `ecl`, sharing the caller's
/// [`ErrorCorrection`] so its generator cache is reused across calls.
pub fn encode(content: &str, ecl: ECLevel, ec: &ErrorCorrection) -> QRResult<QRCode> {
    QRBuilder::new(content.as_bytes()).ec_level(ecl).error_correction(ec).build()
}
