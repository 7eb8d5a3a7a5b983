use rand::Rng;
use crate::error::GenerateError;

/// The canonical Lorem ipsum.
pub const PHRASE: &str = "
Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.
";

/// Upper bound (exclusive) on the number of characters in one payload.
pub const MAXIMUM_RANDOM_CHARACTERS: usize = 1_000_000;

/// Produces the payload for a single object.
pub trait Generator: Send + Sync {
    fn generate(&self) -> Result<Vec<u8>, GenerateError>;
}

impl<F> Generator for F
where
    F: Fn() -> Result<Vec<u8>, GenerateError> + Send + Sync,
{
    fn generate(&self) -> Result<Vec<u8>, GenerateError> {
        self()
    }
}

/// Random runs of characters sampled, with replacement, from [`PHRASE`].
#[derive(Clone, Debug)]
pub struct LoremIpsum {
    chars: Vec<char>,
    max_chars: usize,
}

impl LoremIpsum {
    pub fn new() -> Self {
        Self::with_max_chars(MAXIMUM_RANDOM_CHARACTERS)
    }

    /// Panics if `max_chars` is zero, since no length can be strictly below it.
    pub fn with_max_chars(max_chars: usize) -> Self {
        assert!(max_chars > 0, "max_chars must be positive");
        Self {
            chars: PHRASE.chars().collect(),
            max_chars,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl Default for LoremIpsum {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for LoremIpsum {
    fn generate(&self) -> Result<Vec<u8>, GenerateError> {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(0..self.max_chars);
        let text: String = (0..len)
            .map(|_| self.chars[rng.gen_range(0..self.chars.len())])
            .collect();
        Ok(text.into_bytes())
    }
}
