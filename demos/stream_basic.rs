//! Basic streaming transform example.
//!
//! Run with:
//!     cargo run --example stream_basic

use cipherbuf::{ByteView, CipherEngine, EngineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data
    let data: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect(); // 1 MB

    // A toy single-block transform; a real caller injects its block cipher
    let xor = |input: &[u8], output: &mut [u8]| {
        for (o, i) in output.iter_mut().zip(input) {
            *o = i ^ 0x5A;
        }
    };

    // Padding mode, so the stream may end on any byte boundary
    let mut engine = CipherEngine::new(EngineConfig::new(16)?.with_padding(true), xor)?;

    println!("Transforming {} bytes of data...\n", data.len());

    let mut output = ByteView::alloc(data.len() + 16);
    let mut total_produced = 0;

    // Simulate streaming data in deliberately misaligned batches
    let batch_size = 8 * 1024 + 5;
    for (calls, batch) in data.chunks(batch_size).enumerate() {
        let mut input = ByteView::copy_from_slice(batch);
        let produced = engine.update(&mut input, &mut output)?;
        total_produced += produced;

        if calls < 3 {
            println!(
                "update: {} bytes in, {} bytes out, {} buffered",
                batch.len(),
                produced,
                engine.buffered_len()
            );
        }
    }

    // Finalize the stream; the buffered tail is padded to a full block
    let mut empty = ByteView::alloc(0);
    let produced = engine.finalize(&mut empty, &mut output)?;
    total_produced += produced;
    println!("finalize: {} bytes out\n", produced);

    output.flip();
    println!(
        "Total: {} bytes of ciphertext for {} bytes of plaintext",
        total_produced,
        data.len()
    );
    println!("First 16 bytes: {:02x?}", &output.to_vec()[..16]);

    Ok(())
}
