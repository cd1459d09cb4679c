use log::debug;
use zeroize::Zeroizing;

use crate::entropy::{EntropyError, EntropySource, OsEntropy};
use crate::pool::{pick, ALPHANUMERIC, SPECIAL};

pub const DEFAULT_LENGTH: usize = 12;
pub const DEFAULT_SPECIAL_COUNT: usize = 1;

/// Longest password `validate` accepts. Anything above is rejected before
/// any allocation or entropy draw.
pub const MAX_LENGTH: usize = 4096;

/// Request parameters for a single password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    /// Total number of characters.
    pub length: usize,
    /// How many of them come from the special pool.
    pub special_count: usize,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            special_count: DEFAULT_SPECIAL_COUNT,
        }
    }
}

impl PasswordOptions {
    pub fn new(length: usize, special_count: usize) -> Self {
        Self {
            length,
            special_count,
        }
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.length > MAX_LENGTH {
            return Err(GeneratorError::InvalidArgument(format!(
                "Password length cannot exceed {} characters.",
                MAX_LENGTH
            )));
        }

        if self.special_count > self.length {
            return Err(GeneratorError::InvalidArgument(String::from(
                "Special character count cannot exceed password length.",
            )));
        }

        Ok(())
    }

    pub fn generate(&self) -> Result<Zeroizing<String>, GeneratorError> {
        self.generate_with(&mut OsEntropy)
    }

    /// Builds the password from `source`.
    ///
    /// Specials are sampled first and regular characters second, then the
    /// whole buffer is shuffled so the exact special count is kept while
    /// positions stay uniform. A length of zero yields an empty string.
    pub fn generate_with<S>(&self, source: &mut S) -> Result<Zeroizing<String>, GeneratorError>
    where
        S: EntropySource + ?Sized,
    {
        self.validate()?;

        debug!(
            "generating password of length {} with {} special characters",
            self.length, self.special_count
        );

        let mut buffer = Zeroizing::new(Vec::<char>::with_capacity(self.length));

        push_from_pool(source, SPECIAL, self.special_count, &mut buffer)?;
        push_from_pool(
            source,
            ALPHANUMERIC,
            self.length - self.special_count,
            &mut buffer,
        )?;

        shuffle(source, buffer.as_mut_slice())?;

        Ok(Zeroizing::new(buffer.iter().collect()))
    }
}

pub fn generate(length: usize, special_count: usize) -> Result<Zeroizing<String>, GeneratorError> {
    PasswordOptions::new(length, special_count).generate()
}

pub fn generate_default() -> Result<Zeroizing<String>, GeneratorError> {
    PasswordOptions::default().generate()
}

pub fn generate_with<S>(
    source: &mut S,
    length: usize,
    special_count: usize,
) -> Result<Zeroizing<String>, GeneratorError>
where
    S: EntropySource + ?Sized,
{
    PasswordOptions::new(length, special_count).generate_with(source)
}

fn push_from_pool<S>(
    source: &mut S,
    pool: &[u8],
    count: usize,
    buffer: &mut Vec<char>,
) -> Result<(), GeneratorError>
where
    S: EntropySource + ?Sized,
{
    if count == 0 {
        return Ok(());
    }

    let mut values = Zeroizing::new(vec![0u32; count]);
    source.fill_u32(&mut values[..])?;

    buffer.extend(values.iter().map(|value| pick(pool, *value)));

    Ok(())
}

// Fisher-Yates, one fresh draw per swap.
fn shuffle<S, T>(source: &mut S, buffer: &mut [T]) -> Result<(), GeneratorError>
where
    S: EntropySource + ?Sized,
{
    let mut value = Zeroizing::new([0u32; 1]);

    for i in (1..buffer.len()).rev() {
        source.fill_u32(&mut value[..])?;
        let j = value[0] as usize % (i + 1);
        buffer.swap(i, j);
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum GeneratorError {
    InvalidArgument(String),
    Entropy(String),
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            Self::InvalidArgument(msg) => f.write_str(msg),
            Self::Entropy(msg) => {
                f.write_fmt(std::format_args!("Secure random source failed: {}", msg))
            }
        };
    }
}

impl std::error::Error for GeneratorError {}

impl From<EntropyError> for GeneratorError {
    fn from(value: EntropyError) -> Self {
        Self::Entropy(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::{
        generate, generate_default, generate_with, GeneratorError, PasswordOptions, MAX_LENGTH,
    };
    use crate::entropy::{EntropyError, EntropySource};
    use crate::pool::{is_alphanumeric, is_special};

    // Replays `values` in a loop and records the size of every request.
    struct SequenceEntropy {
        values: Vec<u32>,
        position: usize,
        requests: Vec<usize>,
    }

    impl SequenceEntropy {
        fn new(values: Vec<u32>) -> Self {
            Self {
                values,
                position: 0,
                requests: Vec::new(),
            }
        }
    }

    impl EntropySource for SequenceEntropy {
        fn fill_u32(&mut self, dest: &mut [u32]) -> Result<(), EntropyError> {
            self.requests.push(dest.len());
            for value in dest.iter_mut() {
                *value = self.values[self.position % self.values.len()];
                self.position += 1;
            }
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill_u32(&mut self, _dest: &mut [u32]) -> Result<(), EntropyError> {
            Err(EntropyError::new("no entropy available"))
        }
    }

    fn count_special(password: &str) -> usize {
        password.chars().filter(|c| is_special(*c)).count()
    }

    #[test]
    fn test_default() {
        let password = generate_default().unwrap();
        assert_eq!(password.chars().count(), 12);
        assert_eq!(count_special(&password), 1);

        assert_eq!(PasswordOptions::default(), PasswordOptions::new(12, 1));
    }

    #[test]
    fn test_exact_counts() {
        for length in 0..=24 {
            for special_count in 0..=length {
                let password = generate(length, special_count).unwrap();

                assert_eq!(password.chars().count(), length);
                assert_eq!(count_special(&password), special_count);
                assert!(password
                    .chars()
                    .all(|c| is_special(c) || is_alphanumeric(c)));
            }
        }
    }

    #[test]
    fn test_too_many_special() {
        let result = generate(4, 5);
        assert_eq!(
            result.unwrap_err(),
            GeneratorError::InvalidArgument(String::from(
                "Special character count cannot exceed password length."
            ))
        );

        let result = generate(0, 1);
        assert!(matches!(result, Err(GeneratorError::InvalidArgument(_))));
    }

    #[test]
    fn test_length_too_large() {
        let expected = GeneratorError::InvalidArgument(String::from(
            "Password length cannot exceed 4096 characters.",
        ));

        assert_eq!(generate(usize::MAX, 0).unwrap_err(), expected);
        assert_eq!(generate(MAX_LENGTH + 1, 1).unwrap_err(), expected);

        let mut source = SequenceEntropy::new(vec![0]);
        assert_eq!(
            generate_with(&mut source, usize::MAX, usize::MAX).unwrap_err(),
            expected
        );
        assert!(source.requests.is_empty());

        let password = generate(MAX_LENGTH, 7).unwrap();
        assert_eq!(password.chars().count(), MAX_LENGTH);
        assert_eq!(count_special(&password), 7);
    }

    #[test]
    fn test_invalid_draws_nothing() {
        let mut source = SequenceEntropy::new(vec![0]);
        let _ = generate_with(&mut source, 2, 3).unwrap_err();
        assert!(source.requests.is_empty());
    }

    #[test]
    fn test_all_special() {
        let password = generate(16, 16).unwrap();
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().all(is_special));
    }

    #[test]
    fn test_zero_length() {
        let mut source = SequenceEntropy::new(vec![0]);
        let password = generate_with(&mut source, 0, 0).unwrap();
        assert_eq!(password.as_str(), "");
        assert!(source.requests.is_empty());

        assert_eq!(generate(0, 0).unwrap().as_str(), "");
    }

    #[test]
    fn test_not_deterministic() {
        let a = generate(12, 1).unwrap();
        let b = generate(12, 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_known_sequence() {
        // specials 1, 12 -> '@', '#'; regulars 0, 27 -> 'A', 'b'
        // swaps: 5 % 4 = 1, 2 % 3 = 2, 7 % 2 = 1
        let mut source = SequenceEntropy::new(vec![1, 12, 0, 27, 5, 2, 7]);
        let password = generate_with(&mut source, 4, 2).unwrap();
        assert_eq!(password.as_str(), "@bA#");
    }

    #[test]
    fn test_zero_source_moves_special() {
        // Every swap targets index 0, so the leading special ends up last.
        let mut source = SequenceEntropy::new(vec![0]);
        let password = generate_with(&mut source, 3, 1).unwrap();
        assert_eq!(password.as_str(), "AA!");
    }

    #[test]
    fn test_draw_pattern() {
        let mut source = SequenceEntropy::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let _ = generate_with(&mut source, 12, 1).unwrap();

        let mut expected: Vec<usize> = vec![1, 11];
        expected.extend(std::iter::repeat(1).take(11));
        assert_eq!(source.requests, expected);

        let mut source = SequenceEntropy::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let _ = generate_with(&mut source, 5, 0).unwrap();
        assert_eq!(source.requests, vec![5, 1, 1, 1, 1]);

        let mut source = SequenceEntropy::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let _ = generate_with(&mut source, 3, 3).unwrap();
        assert_eq!(source.requests, vec![3, 1, 1]);
    }

    #[test]
    fn test_entropy_failure() {
        let result = generate_with(&mut BrokenEntropy, 12, 1);
        assert_eq!(
            result.unwrap_err(),
            GeneratorError::Entropy(String::from("no entropy available"))
        );
    }

    #[test]
    fn test_special_position_uniform() {
        let length = 12;
        let rounds = 12_000;
        let mut positions = vec![0usize; length];

        for _ in 0..rounds {
            let password = generate(length, 1).unwrap();
            let index = password.chars().position(|c| is_special(c)).unwrap();
            positions[index] += 1;
        }

        // expected 1000 per slot, standard deviation is about 30
        for (index, count) in positions.iter().enumerate() {
            assert!(
                (800..=1200).contains(count),
                "position {} was picked {} times",
                index,
                count
            );
        }
    }

    #[test]
    fn test_error_display() {
        let error = GeneratorError::InvalidArgument(String::from("bad"));
        assert_eq!(error.to_string(), "bad");

        let error: GeneratorError = EntropyError::new("closed").into();
        assert_eq!(error.to_string(), "Secure random source failed: closed");
    }
}
