use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Cost values bcrypt accepts. Anything outside is a configuration error,
/// not a calibration result.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// One cost-parameterized hash operation, reported as elapsed wall-clock
/// time. The hash output itself is never inspected.
pub trait Hasher {
    fn hash(&self, cost: u32, input: &str) -> Result<Duration>;
}

/// Hasher backed by the `bcrypt` crate. Each call generates a fresh salt
/// and hashes the input once, matching the work of one real credential
/// verification.
pub struct BcryptHasher;

impl Hasher for BcryptHasher {
    fn hash(&self, cost: u32, input: &str) -> Result<Duration> {
        let start = Instant::now();
        bcrypt::hash(input, cost).with_context(|| format!("bcrypt failed at cost {}", cost))?;
        Ok(start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_hasher_measures_time() -> Result<()> {
        let elapsed = BcryptHasher.hash(MIN_COST, "hello")?;
        assert!(elapsed > Duration::ZERO);
        Ok(())
    }

    #[test]
    fn test_bcrypt_hasher_rejects_invalid_cost() {
        assert!(BcryptHasher.hash(MIN_COST - 1, "hello").is_err());
        assert!(BcryptHasher.hash(MAX_COST + 1, "hello").is_err());
    }
}
