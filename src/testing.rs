// Deterministic random source for unit tests

use rand::{Error, RngCore};

/// Replays a fixed list of `f64` draws in `[0, 1)`, cycling when exhausted.
///
/// `rng.gen::<f64>()` keeps the top 53 bits of `next_u64`, so each value is
/// encoded there and comes back unchanged.
pub struct ScriptedRng {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        ScriptedRng {
            values: values.to_vec(),
            next: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        ScriptedRng::new(&[value])
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        ((value * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
