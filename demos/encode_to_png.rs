use std::error::Error;

use otpqr::{encode, to_image, ECLevel, ErrorCorrection};

fn main() -> Result<(), Box<dyn Error>> {
    let url = "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example";

    // One error correction instance can serve every symbol the application builds
    let ec = ErrorCorrection::new();
    let mut qr = encode(url, ECLevel::M, &ec)?;
    println!("Encoded {} bytes into version {}", qr.content().len(), *qr.version());

    // Fit the symbol into a 300x300 raster, centred
    qr.scale(300, 300)?;
    let img = to_image(&qr);
    img.save("otpauth_qr.png")?;

    println!("QR code saved to: otpauth_qr.png");
    println!("{}", qr.to_str(1));
    Ok(())
}
