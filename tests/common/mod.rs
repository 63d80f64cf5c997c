// Shared test fixtures: a deterministic keyed block transform and a
// straight-line reference implementation to compare engine output against.

#![allow(dead_code)]

use cipherbuf::{BlockTransform, CipherEngine, EngineConfig};

/// A deterministic keyed single-block transform for tests.
///
/// Not a real cipher; a pure byte-wise keyed substitution. What matters is
/// that it is deterministic, key-dependent, and maps distinct inputs to
/// distinct outputs, so any mis-ordered, dropped, or duplicated block shows
/// up in comparisons.
#[derive(Debug, Clone)]
pub struct TestCipher {
    key: Vec<u8>,
}

impl TestCipher {
    pub fn new(key: &[u8]) -> Self {
        assert!(!key.is_empty());
        Self { key: key.to_vec() }
    }
}

impl BlockTransform for TestCipher {
    fn transform_block(&self, input: &[u8], output: &mut [u8]) {
        for (i, (o, b)) in output.iter_mut().zip(input).enumerate() {
            *o = b.wrapping_add(self.key[i % self.key.len()]).rotate_left(3);
        }
    }
}

/// Block-by-block reference transform of `data`, which must be a multiple
/// of `block_size` long.
pub fn reference_transform(key: &[u8], data: &[u8], block_size: usize) -> Vec<u8> {
    assert_eq!(data.len() % block_size, 0);
    let cipher = TestCipher::new(key);
    let mut out = vec![0u8; data.len()];
    for (src, dst) in data.chunks(block_size).zip(out.chunks_mut(block_size)) {
        cipher.transform_block(src, dst);
    }
    out
}

/// Fresh no-padding engine over [`TestCipher`].
pub fn test_engine(key: &[u8], block_size: usize) -> CipherEngine<TestCipher> {
    CipherEngine::new(EngineConfig::new(block_size).unwrap(), TestCipher::new(key)).unwrap()
}

/// Fresh padding-mode engine over [`TestCipher`].
pub fn test_engine_padded(key: &[u8], block_size: usize) -> CipherEngine<TestCipher> {
    CipherEngine::new(
        EngineConfig::new(block_size).unwrap().with_padding(true),
        TestCipher::new(key),
    )
    .unwrap()
}
