use anyhow::Context;
use log::info;

use simd_delta::bench::{benchmark_big_size, benchmark_small_size, BIG_SIZE};
use simd_delta::simd::BACKEND;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the timing report.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    info!("vector backend: {BACKEND}");

    // One register add on 4-element vectors
    println!("Small");
    let small = benchmark_small_size();
    println!("{}", small.timing);

    // Strided register adds over 10M-element buffers
    println!("Big");
    let big = benchmark_big_size(BIG_SIZE).context("big size benchmark failed")?;
    println!("{}", big.timing);

    Ok(())
}
