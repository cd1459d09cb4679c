use zeroize::Zeroize;

/// A source of uniformly distributed `u32` values.
///
/// Production code uses [`OsEntropy`]; tests can plug in a deterministic
/// implementation.
pub trait EntropySource {
    /// Fill every element of `dest` with a fresh random value.
    fn fill_u32(&mut self, dest: &mut [u32]) -> Result<(), EntropyError>;
}

/// The operating system's cryptographically secure generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_u32(&mut self, dest: &mut [u32]) -> Result<(), EntropyError> {
        let mut bytes = vec![0u8; dest.len() * 4];
        getrandom::getrandom(&mut bytes)?;

        for (value, chunk) in dest.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        bytes.zeroize();
        Ok(())
    }
}

#[derive(Debug)]
pub struct EntropyError {
    error: String,
}

impl EntropyError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

impl std::fmt::Display for EntropyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.error.as_ref())
    }
}

impl std::error::Error for EntropyError {}

impl From<getrandom::Error> for EntropyError {
    fn from(value: getrandom::Error) -> Self {
        Self::new(value.to_string())
    }
}
