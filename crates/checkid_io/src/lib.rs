//! I/O utilities for reading and writing identifiers.
//!
//! Provides the lenient parser for identifiers as people actually type them
//! and the loader for identifier batch files used by the host tools. The codec
//! itself only accepts the strict raw form; everything forgiving lives here.

/// File loading and writing for identifier batch files.
///
/// A batch file holds one identifier per line, raw or grouped, with blank
/// lines and `#` comments allowed. Unreadable lines are kept as records so a
/// single bad line never hides the rest of the batch.
pub mod loader;

/// Parser for identifiers as typed by people.
///
/// Accepts lowercase, dashes or spaces between groups, and surrounding
/// whitespace, and produces the strict identifier the codec operates on.
pub mod parser;
