//! Validated observed sequences.

use crate::error::DecodeError;
use crate::model::Nucleotide;

/// A non-empty sequence of nucleotides, the immutable input of a decode call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedSequence {
    symbols: Vec<Nucleotide>,
}

impl ObservedSequence {
    /// Validate raw uppercase `A/C/G/T` bytes.
    ///
    /// Rejects an empty input and any other byte, lowercase included.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptySequence);
        }
        let symbols = bytes
            .iter()
            .enumerate()
            .map(|(position, &b)| {
                Nucleotide::from_byte(b).ok_or(DecodeError::InvalidSymbol {
                    position,
                    symbol: b as char,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { symbols })
    }

    pub fn from_symbols(symbols: Vec<Nucleotide>) -> Result<Self, DecodeError> {
        if symbols.is_empty() {
            return Err(DecodeError::EmptySequence);
        }
        Ok(Self { symbols })
    }

    #[inline]
    pub fn symbols(&self) -> &[Nucleotide] {
        &self.symbols
    }

    /// Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.symbols.iter().map(|s| s.as_byte()).collect()
    }
}
