use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

pub type HmacSha256 = Hmac<Sha256>;

/// Source of uniform integers. `uniform_int(lo, hi)` is inclusive on both
/// ends; `lo > hi` yields `lo`.
pub trait RandomSource {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32;
}

/// Per-thread OS-seeded generator, used for live spins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        rand::rng().random_range(lo..=hi)
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Maps a 4-byte big-endian chunk to a float in [0,1).
fn chunk_to_unit(chunk: [u8; 4]) -> f64 {
    let v = u32::from_be_bytes(chunk);
    (v as f64) / (u32::MAX as f64 + 1.0)
}

/// Deterministic stream: server_seed keys an HMAC-SHA256 over
/// `client_seed:nonce:block`, each 32-byte block yields eight draws.
pub struct SeededRandom {
    server_seed: String,
    client_seed: String,
    nonce: u64,
    block: u64,
    buffer: [u8; 32],
    cursor: usize,
}

impl SeededRandom {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        let mut rng = Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
            block: 0,
            buffer: [0u8; 32],
            cursor: 0,
        };
        rng.buffer = rng.hmac_block(0);
        rng
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    fn hmac_block(&self, block: u64) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes()).expect("HMAC key");
        let msg = format!("{}:{}:{}", self.client_seed, self.nonce, block);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    pub fn next_unit(&mut self) -> f64 {
        if self.cursor + 4 > self.buffer.len() {
            self.block += 1;
            self.buffer = self.hmac_block(self.block);
            self.cursor = 0;
        }
        let c = &self.buffer[self.cursor..self.cursor + 4];
        self.cursor += 4;
        chunk_to_unit([c[0], c[1], c[2], c[3]])
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        let span = (hi - lo) as u64 + 1;
        let offset = ((self.next_unit() * span as f64).floor() as u64).min(span - 1);
        lo + offset as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SeededRandom::new("server", "client", 1);
        let mut rng2 = SeededRandom::new("server", "client", 1);
        assert_eq!(rng1.server_seed_hash_hex(), rng2.server_seed_hash_hex());
        let a: Vec<u32> = (0..40).map(|_| rng1.uniform_int(1, 100)).collect();
        let b: Vec<u32> = (0..40).map(|_| rng2.uniform_int(1, 100)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn nonce_changes_the_stream() {
        let mut rng1 = SeededRandom::new("server", "client", 1);
        let mut rng2 = SeededRandom::new("server", "client", 2);
        let a: Vec<u32> = (0..16).map(|_| rng1.uniform_int(0, u32::MAX - 1)).collect();
        let b: Vec<u32> = (0..16).map(|_| rng2.uniform_int(0, u32::MAX - 1)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn draws_stay_in_range() {
        let mut seeded = SeededRandom::new("s", "c", 9);
        let mut thread = ThreadRandom;
        for _ in 0..2_000 {
            let x = seeded.uniform_int(1, 10);
            assert!((1..=10).contains(&x));
            let y = thread.uniform_int(3, 7);
            assert!((3..=7).contains(&y));
        }
        assert_eq!(seeded.uniform_int(5, 5), 5);
        assert_eq!(thread.uniform_int(8, 2), 8);
    }

    #[test]
    fn seed_hash_is_sha256_hex() {
        let rng = SeededRandom::new("server", "client", 0);
        let hash = rng.server_seed_hash_hex();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, derive_hash_hex(b"server"));
    }
}
