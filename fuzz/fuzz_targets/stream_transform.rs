#![no_main]

use cipherbuf::{ByteView, CipherEngine, EngineConfig};
use libfuzzer_sys::fuzz_target;

fn keyed(input: &[u8], output: &mut [u8]) {
    for (i, (o, b)) in output.iter_mut().zip(input).enumerate() {
        *o = b.wrapping_mul(2).wrapping_add(i as u8).rotate_left(1);
    }
}

fuzz_target!(|raw: (Vec<u8>, Vec<u8>)| {
    let (data, cut_bytes) = raw;

    for block_size in [1usize, 4, 16, 64] {
        // Single-shot reference: one finalize over the whole input
        let mut reference = CipherEngine::new(
            EngineConfig::new(block_size).unwrap().with_padding(true),
            keyed,
        )
        .unwrap();
        let mut input = ByteView::copy_from_slice(&data);
        let mut output = ByteView::alloc(data.len() + block_size);
        let n = reference.finalize(&mut input, &mut output).unwrap();

        // Full consumption and exact accounting
        assert_eq!(input.remaining(), 0);
        assert_eq!(output.position(), n);
        assert_eq!(n, (data.len() / block_size) * block_size + block_size);

        output.flip();
        let expected = output.to_vec();

        // Partition the same data at fuzzer-chosen points
        let mut cuts: Vec<usize> = cut_bytes
            .iter()
            .map(|&b| b as usize % (data.len() + 1))
            .collect();
        cuts.sort_unstable();

        let mut engine = CipherEngine::new(
            EngineConfig::new(block_size).unwrap().with_padding(true),
            keyed,
        )
        .unwrap();
        let mut output = ByteView::alloc(data.len() + block_size);

        let mut start = 0;
        for cut in cuts {
            let mut piece = ByteView::copy_from_slice(&data[start..cut]);
            engine.update(&mut piece, &mut output).unwrap();
            assert_eq!(piece.remaining(), 0);
            assert!(engine.buffered_len() < block_size);
            start = cut;
        }
        let mut rest = ByteView::copy_from_slice(&data[start..]);
        engine.finalize(&mut rest, &mut output).unwrap();
        assert_eq!(rest.remaining(), 0);

        // Determinism: any partition reproduces the single-shot ciphertext
        output.flip();
        assert_eq!(output.to_vec(), expected);
    }
});
