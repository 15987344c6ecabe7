//! Example demonstrating removal diagnostics through `tracing`.
//!
//! Run with: cargo run -p unseal-core --example removal_tracing [-- <image>]
//!
//! Without an argument a small JPEG with an APP11 segment is built in memory.

use tracing_subscriber::{fmt, EnvFilter};
use unseal_core::{inspect, RemovalConfig, Remover, TracingSink};

fn sample_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    // APP0 JFIF
    data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    data.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
    // APP11 with a JUMBF header naming a c2pa manifest store
    let mut jumbf = vec![0u8; 32];
    jumbf[..2].copy_from_slice(b"JP");
    jumbf[12..16].copy_from_slice(b"jumb");
    jumbf[20..24].copy_from_slice(b"jumd");
    jumbf[24..28].copy_from_slice(b"c2pa");
    data.extend_from_slice(&[0xFF, 0xEB]);
    data.extend_from_slice(&((jumbf.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(&jumbf);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::new("unseal_core=debug,info"))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    println!("=== Removal Tracing Demo ===\n");

    let input = match std::env::args().nth(1) {
        Some(path) => match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                return;
            }
        },
        None => sample_jpeg(),
    };

    let detection = inspect(&input);
    println!("Format:   {}", detection.format);
    match &detection.evidence {
        Some(evidence) => println!("Evidence: {}\n", evidence),
        None => println!("Evidence: none\n"),
    }

    let config = RemovalConfig::from_env();
    println!("Config: {:?}\n", config);

    let removal = Remover::new(config).with_sink(&TracingSink).remove(&input);

    println!("\nOutcome:  {}", removal.outcome);
    if let Some(strategy) = removal.strategy {
        println!("Strategy: {}", strategy);
    }
    println!("Bytes:    {} -> {}", input.len(), removal.bytes.len());
}
