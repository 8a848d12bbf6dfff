use crate::CodecError;
use crate::identifier::{Identifier, Symbol};
use alloc::string::String;
use alloc::vec::Vec;
use checkid_common::display::{GROUP_SIZE, SEPARATOR};

/// Renders an identifier in groups of four separated by dashes.
///
/// A trailing partial group is kept as is: `ABCDFG` becomes `ABCD-FG`.
pub fn format(id: &Identifier) -> String {
    let mut out = String::with_capacity(id.len() + id.len() / GROUP_SIZE);
    for (i, symbol) in id.symbols().iter().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            out.push(SEPARATOR);
        }
        out.push(symbol.to_char());
    }
    out
}

/// Strips display separators and parses the remaining characters.
///
/// Separators may appear anywhere and in any number; they carry no meaning.
/// Any other non-alphabet character fails with
/// [`CodecError::UnknownSymbol`], positioned in the display text.
pub fn unformat(display: &str) -> Result<Identifier, CodecError> {
    display
        .chars()
        .enumerate()
        .filter(|&(_, c)| c != SEPARATOR)
        .map(|(position, symbol)| {
            Symbol::from_char(symbol).ok_or(CodecError::UnknownSymbol { symbol, position })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Identifier::new)
}
