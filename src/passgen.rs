// src/passgen.rs
//! Random password generation for new entries
//!
//! Characters are drawn from `rand::rng()`, a CSPRNG seeded from the OS.

use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PASSWORD_LENGTH, MIN_GENERATED_PASSWORD_LENGTH};
use crate::enums::SymbolSet;
use crate::error::GeneratorError;

/// Characters that are easy to misread
pub const AMBIGUOUS: &str = "O0I1l|S5B8G6Z2";

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Smallest distinct-character pool we accept
const MIN_POOL_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub length: usize,
    pub symbols: SymbolSet,
    pub allow_ambiguous: bool,
    /// Include at least one character from every pool
    pub require_each_category: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            symbols: SymbolSet::Soft,
            allow_ambiguous: false,
            require_each_category: true,
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.length < MIN_GENERATED_PASSWORD_LENGTH {
            return Err(GeneratorError::TooShort {
                requested: self.length,
                min: MIN_GENERATED_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }
}

fn sanitize(characters: &str, allow_ambiguous: bool) -> Vec<char> {
    characters
        .chars()
        .filter(|c| allow_ambiguous || !AMBIGUOUS.contains(*c))
        .collect()
}

pub fn generate_password(options: &GeneratorOptions) -> Result<String, GeneratorError> {
    options.validate()?;

    let pools: Vec<Vec<char>> = [
        LOWERCASE,
        UPPERCASE,
        DIGITS,
        options.symbols.characters(),
    ]
    .into_iter()
    .map(|set| sanitize(set, options.allow_ambiguous))
    .filter(|pool| !pool.is_empty())
    .collect();

    let mut merged: Vec<char> = pools.concat();
    merged.sort_unstable();
    merged.dedup();
    if merged.len() < MIN_POOL_SIZE {
        return Err(GeneratorError::PoolTooSmall);
    }

    let mut rng = rand::rng();
    let mut chars: Vec<char> = Vec::with_capacity(options.length);
    if options.require_each_category {
        chars.extend(pools.iter().filter_map(|pool| pool.choose(&mut rng).copied()));
    }
    while chars.len() < options.length {
        if let Some(&c) = merged.choose(&mut rng) {
            chars.push(c);
        }
    }

    chars.shuffle(&mut rng);
    chars.truncate(options.length);
    Ok(chars.into_iter().collect())
}
