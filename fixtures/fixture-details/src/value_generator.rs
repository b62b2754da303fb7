// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Deterministic source of values from proptest strategies.
///
/// The same seed always produces the same sequence of values.
#[derive(Debug)]
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    pub fn from_seed(seed: impl Hash) -> Self {
        let mut hasher = XxHash64::default();
        seed.hash(&mut hasher);
        let mut bytes = [0_u8; 32];
        bytes[..8].copy_from_slice(&hasher.finish().to_le_bytes());
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// A generator seeded from this one, advancing this one by a single step.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(self.runner.config().clone(), self.runner.new_rng()),
        }
    }

    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("strategies used by fixtures never reject")
            .current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_values() {
        let mut a = ValueGenerator::from_seed("fixtures");
        let mut b = ValueGenerator::from_seed("fixtures");
        for _ in 0..8 {
            let x = a.partial_clone().generate(any::<u64>());
            let y = b.partial_clone().generate(any::<u64>());
            assert_eq!(x, y);
        }
    }
}
