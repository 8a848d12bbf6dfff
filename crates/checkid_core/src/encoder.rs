use crate::CodecError;
use crate::checksum::checksum_at;
use crate::identifier::{Identifier, Symbol};
use crate::layout::Layout;
use alloc::vec;
use alloc::vec::Vec;
use checkid_common::alphabet::RADIX;
use rand::Rng;

/// Encodes a payload into an identifier of length `len`.
///
/// The payload must hold exactly [`Layout::payload_len`] symbols. They are
/// placed into the data slots in increasing index order, each parity slot
/// `2^i` receives the checksum of pattern `i`, and the overall slot at index
/// 0 receives the checksum of the parity slots.
///
/// # Arguments
///
/// * `len` - Identifier length, at least [`checkid_common::limits::MIN_LENGTH`]
/// * `payload` - Data symbols in slot order
///
/// # Returns
///
/// The assembled identifier, or [`CodecError::PayloadLength`] if the payload
/// does not fill the data slots exactly. Nothing is assembled on failure.
pub fn encode(len: usize, payload: &[Symbol]) -> Result<Identifier, CodecError> {
    let layout = Layout::new(len)?;
    let expected = layout.payload_len();
    if payload.len() != expected {
        return Err(CodecError::PayloadLength {
            expected,
            actual: payload.len(),
        });
    }

    let mut symbols = vec![Symbol::MIN; len];
    for (index, &symbol) in layout.data_indices().zip(payload) {
        symbols[index] = symbol;
    }

    // Patterns never cover another parity slot, so level order is irrelevant.
    for level in layout.levels() {
        symbols[Layout::parity_slot(level)] = checksum_at(&symbols, layout.pattern(level));
    }
    symbols[0] = checksum_at(&symbols, layout.parity_indices());

    Ok(Identifier::new(symbols))
}

/// Encodes a payload given as alphabet text.
///
/// Every character is checked against the alphabet before the length is
/// checked, so a payload with a foreign character reports
/// [`CodecError::PayloadSymbol`] with its position.
pub fn encode_str(len: usize, payload: &str) -> Result<Identifier, CodecError> {
    let symbols = payload
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            Symbol::from_char(symbol).ok_or(CodecError::PayloadSymbol { symbol, position })
        })
        .collect::<Result<Vec<_>, _>>()?;
    encode(len, &symbols)
}

/// Draws a uniformly random payload for an identifier of length `len`.
pub fn random_payload<R>(len: usize, rng: &mut R) -> Result<Vec<Symbol>, CodecError>
where
    R: Rng + ?Sized,
{
    let layout = Layout::new(len)?;
    Ok((0..layout.payload_len())
        .map(|_| Symbol::wrapping(rng.gen_range(0..RADIX)))
        .collect())
}
