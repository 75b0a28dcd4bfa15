use std::time::{Duration, Instant};

use rand::Rng;
use rayon::prelude::*;

use otpqr::{encode, ECLevel, ErrorCorrection, QRBuilder};

static BASE32: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn random_url(rng: &mut impl Rng, secret_len: usize) -> String {
    let secret = (0..secret_len)
        .map(|_| BASE32[rng.random_range(0..BASE32.len())] as char)
        .collect::<String>();
    format!("otpauth://totp/Example:alice@example.com?secret={secret}&issuer=Example")
}

fn bench_sequential(urls: &[String], ecl: ECLevel, ec: &ErrorCorrection) -> Duration {
    let start = Instant::now();
    for url in urls {
        encode(url, ecl, ec).unwrap();
    }
    start.elapsed()
}

fn bench_parallel(urls: &[String], ecl: ECLevel, ec: &ErrorCorrection) -> Duration {
    let start = Instant::now();
    urls.par_iter().for_each(|url| {
        encode(url, ecl, ec).unwrap();
    });
    start.elapsed()
}

fn bench_private_ec(urls: &[String], ecl: ECLevel) -> Duration {
    let start = Instant::now();
    for url in urls {
        QRBuilder::new(url.as_bytes()).ec_level(ecl).build().unwrap();
    }
    start.elapsed()
}

fn main() {
    println!("Running otpqr encoding benchmarks");
    println!("=================================\n");

    let mut rng = rand::rng();
    let ec = ErrorCorrection::new();
    let total_start = Instant::now();

    for secret_len in [16, 32, 64, 128] {
        let urls = (0..200).map(|_| random_url(&mut rng, secret_len)).collect::<Vec<_>>();
        println!("Secret length {secret_len} ({} byte urls)", urls[0].len());
        println!("---------------------------------");

        for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            let seq = bench_sequential(&urls, ecl, &ec);
            let par = bench_parallel(&urls, ecl, &ec);
            let private = bench_private_ec(&urls, ecl);
            let n = urls.len() as u32;
            println!(
                "  {ecl:?}: shared ec {:?}/qr, parallel {:?}/qr, private ec {:?}/qr",
                seq / n,
                par / n,
                private / n,
            );
        }
        println!();
    }

    println!("All benchmarks completed in: {:?}", total_start.elapsed());
}
