//! # otpqr
//!
//! A QR code encoder for `otpauth://` enrollment URLs, with its own GF(2^8)
//! arithmetic and Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Byte mode encoding**: Content is encoded byte for byte into the smallest version that fits
//! - **Reed-Solomon Error Correction**: Error correction levels L, M, Q and H, with a shareable generator cache
//! - **Automatic masking**: The mask with the lowest penalty score is elected unless one is given
//! - **Rendering**: Pixel queries, scaling to a target raster, and conversion to an `image::GrayImage`
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use otpqr::{encode, ECLevel, ErrorCorrection};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build the error correction once and share it between symbols
//! let ec = ErrorCorrection::new();
//! let url = "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example";
//! let mut qr = encode(url, ECLevel::M, &ec)?;
//!
//! qr.scale(256, 256)?;
//! let img = otpqr::to_image(&qr);
//! assert_eq!(img.dimensions(), (256, 256));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use otpqr::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"otpauth://hotp/alice?secret=JBSWY3DPEHPK3PXP&counter=0")
//!     .version(Version::new(5)?)      // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)           // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)     // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let img = qr.to_image(4); // 4 pixels per module, 4 module quiet zone
//! assert_eq!(img.dimensions(), (4 * (37 + 8), 4 * (37 + 8)));
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{encode, QRBuilder, QRCode};
pub use common::ec::{ErrorCorrection, GaloisField, Polynomial, ReedSolomonEncoder};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use render::{to_image, PixelSource, ScaleTransform};
