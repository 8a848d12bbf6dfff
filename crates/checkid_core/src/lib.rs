//! Core algorithms for self-checking, self-correcting identifiers.
//!
//! This crate provides the identifier codec: the partition of an identifier's
//! positions into overall, parity and data slots, the checksum that ties them
//! together, and the encoder, verifier, diagnoser and corrector built on top.
//! The scheme is an extended Hamming layout over a 32-symbol alphabet with
//! additive parity. It detects transcription errors; it does not resist
//! deliberate tampering.
//!
//! Everything here is a pure function of its inputs. The crate is `no_std` and
//! only needs an allocator, so it can be embedded anywhere an identifier has
//! to be checked.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

/// Modular checksum over a set of symbol positions.
///
/// Reduces the values at the covered positions to a single symbol by summing
/// modulo 32 and reflecting the result. Shared by the encoder and every check
/// that recomputes a slot.
pub mod checksum;

/// Bounded exhaustive search for corrected identifiers.
///
/// Substitutes alphabet symbols at suspect positions, keeping every candidate
/// that verifies. Also classifies the outcome into the verdict a front end
/// shows to the person who typed the identifier.
pub mod corrector;

/// Syndrome-style localization of suspect positions.
///
/// Recomputes every checksum and collects the positions covered by each one
/// that disagrees with its stored slot.
pub mod diagnosis;

/// Assembly of complete identifiers from payload symbols.
///
/// Places payload symbols into data slots, then fills the parity slots and
/// finally the overall checksum. Also generates random payloads.
pub mod encoder;

/// Grouping identifiers for display and stripping the grouping again.
pub mod format;

/// The identifier and symbol types.
///
/// An identifier is an immutable, fixed-length sequence of alphabet symbols.
/// Substitutions produce new identifiers rather than mutating in place.
pub mod identifier;

/// Partition of identifier positions into overall, parity and data roles.
///
/// Provides the lazily generated index sequences that every other module
/// walks: parity indices, data indices, and the coverage pattern of each
/// parity level.
pub mod layout;

/// Bitset of positions flagged by the diagnoser.
pub mod suspects;

/// Recomputation of every checksum against an identifier.
pub mod verifier;

pub use checksum::checksum;
pub use corrector::{Assessment, assess, correct};
pub use diagnosis::diagnose;
pub use encoder::{encode, encode_str, random_payload};
pub use format::{format, unformat};
pub use identifier::{Identifier, Symbol};
pub use layout::{IndexRole, Layout, required_payload_len};
pub use suspects::SuspectSet;
pub use verifier::verify;

/// Error types returned by codec operations.
///
/// Payload errors are raised by the encoder before anything is assembled, so
/// an encode call either returns a complete identifier or nothing. Layout and
/// symbol errors are raised when an identifier is constructed or checked; a
/// well-formed identifier never makes `verify` or `diagnose` fail, however
/// many of its symbols are wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The payload does not have exactly one symbol per data slot.
    ///
    /// The expected count is fixed by the identifier length; see
    /// [`Layout::payload_len`].
    #[error("invalid payload: expected {expected} symbols, got {actual}")]
    PayloadLength {
        /// Number of data slots in the requested layout.
        expected: usize,
        /// Number of symbols supplied.
        actual: usize,
    },

    /// A payload character is not in the alphabet.
    #[error("invalid payload: {symbol:?} at position {position} is not in the alphabet")]
    PayloadSymbol {
        /// The offending character.
        symbol: char,
        /// Position of the character within the payload.
        position: usize,
    },

    /// The identifier length cannot be partitioned.
    ///
    /// Lengths below [`checkid_common::limits::MIN_LENGTH`] leave no room for
    /// parity slots. Checking such an identifier would silently misclassify
    /// its positions, so it is rejected instead.
    #[error("malformed identifier: length {len} cannot be partitioned into checksum slots")]
    MalformedIdentifier {
        /// The rejected length.
        len: usize,
    },

    /// Identifier text contains a character outside the alphabet.
    #[error("{symbol:?} at position {position} is not an identifier symbol")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Position of the character within the text.
        position: usize,
    },
}

impl CodecError {
    /// Returns true for errors raised while validating an encoder payload.
    pub fn is_invalid_payload(&self) -> bool {
        matches!(
            self,
            CodecError::PayloadLength { .. } | CodecError::PayloadSymbol { .. }
        )
    }
}
