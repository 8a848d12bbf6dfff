//! Parser for identifiers as typed by people.
//!
//! The grammar is small:
//!
//! ```text
//! typed     := sep? group (sep group)* sep?
//! group     := symbol+
//! symbol    := any alphabet character, either case
//! sep       := ('-' | ' ' | '\t')+
//! ```
//!
//! Case is folded to upper before the alphabet lookup, which is what a front
//! end does when it uppercases each key press.

use anyhow::{Result, bail};
use checkid_common::display::SEPARATOR;
use checkid_core::{Identifier, Symbol};
use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{anychar, char, one_of};
use nom::combinator::{all_consuming, map, map_opt, opt};
use nom::multi::{many1, separated_list1};
use nom::sequence::delimited;

fn symbol(input: &str) -> IResult<&str, Symbol> {
    map_opt(anychar, |c| Symbol::from_char(c.to_ascii_uppercase()))(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    map(many1(alt((char(SEPARATOR), one_of(" \t")))), |_| ())(input)
}

fn group(input: &str) -> IResult<&str, Vec<Symbol>> {
    many1(symbol)(input)
}

fn typed_identifier(input: &str) -> IResult<&str, Identifier> {
    map(
        all_consuming(delimited(
            opt(separator),
            separated_list1(separator, group),
            opt(separator),
        )),
        |groups| Identifier::new(groups.into_iter().flatten().collect()),
    )(input)
}

/// Parses an identifier as a person would type it.
///
/// # Arguments
///
/// * `input` - Raw or grouped identifier text, any case
///
/// # Returns
///
/// The identifier, or an error naming the first character that is neither a
/// symbol nor a separator. The length is not checked here; the codec reports
/// lengths it cannot partition.
pub fn parse_typed(input: &str) -> Result<Identifier> {
    match typed_identifier(input) {
        Ok((_, id)) => Ok(id),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            let column = input.len() - e.input.len() + 1;
            match e.input.chars().next() {
                Some(c) => bail!("unexpected {:?} at column {}", c, column),
                None => bail!("no identifier symbols in {:?}", input),
            }
        }
        Err(nom::Err::Incomplete(_)) => bail!("incomplete identifier {:?}", input),
    }
}

/// Parses one line of a batch file.
///
/// Text after `#` is a comment. Returns `Ok(None)` for lines that hold no
/// identifier.
pub fn parse_line(line: &str) -> Result<Option<Identifier>> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    parse_typed(content.trim()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: &str = "ZZW0Q123F456789A";

    #[test]
    fn test_raw_form() {
        assert_eq!(parse_typed(GOLDEN).unwrap().to_string(), GOLDEN);
    }

    #[test]
    fn test_grouped_and_lowercase() {
        for typed in [
            "ZZW0-Q123-F456-789A",
            "zzw0-q123-f456-789a",
            "  ZZW0 Q123 F456 789A  ",
            "zzw0 - q123 -f456- 789A",
            "-ZZW0Q123F456789A-",
        ] {
            assert_eq!(parse_typed(typed).unwrap().to_string(), GOLDEN, "{typed:?}");
        }
    }

    #[test]
    fn test_confusable_letters_rejected() {
        let err = parse_typed("ZZW0-Q1O3").unwrap_err();
        assert_eq!(err.to_string(), "unexpected 'O' at column 8");

        let err = parse_typed("zzw0e").unwrap_err();
        assert!(err.to_string().contains("'e'"), "{err}");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(parse_typed("").is_err());
        assert!(parse_typed(" - ").is_err());
    }

    #[test]
    fn test_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# issued 2024").unwrap(), None);
        assert_eq!(
            parse_line("ZZW0-Q123-F456-789A  # customer 12").unwrap(),
            Some(GOLDEN.parse().unwrap())
        );
        assert!(parse_line("not an id").is_err());
    }
}
