//! Fixed-width field parsers and line ingestion for Grove data tables.
//!
//! Legacy coefficient tables are column-exact text: every field lives at
//! a fixed offset with a fixed width and no delimiters. This crate turns
//! such files into typed, labelled [`Record`]s without per-file parsing
//! code. A table is described once as a [`LineParser`], an ordered list
//! of column segments plus line-level policies, and the same framework
//! reads every table in the system.
//!
//! # Architecture
//!
//! ```text
//! LineParser (declaration, immutable once built)
//! ├── Segment[]  value / optional / multi-value / space / rest
//! │   └── ValueParser  (&str -> Value, or ValueError with the raw text)
//! ├── line policies     stop_line, ignore_line       (&str)
//! ├── segment policies  stop_segments, ignore_segments (&[String])
//! └── entry policies    stop_entry, ignore_entry     (&Record)
//!
//! Records<R: BufRead>   lazy iterator, one Record per accepted line
//! LineParser::fold      drives Records into a caller accumulator
//! ```
//!
//! Policies are evaluated in that order for every line; a stop at any
//! level ends the stream without emitting the stopping line.
//!
//! Errors carry the 1-based line number. The framework never skips a
//! bad line on its own: the first error ends the parse.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod line;
pub mod record;
pub mod value;

pub use error::ParseError;
pub use line::{EndOfInput, LineOutcome, LineParser, Records};
pub use record::Record;
pub use value::{Value, ValueError, ValueParser};
