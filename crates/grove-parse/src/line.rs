//! Line-level declaration and the lazy record stream.

use std::fmt;
use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::record::Record;
use crate::value::{Value, ValueError, ValueParser};

type LinePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type SegmentPredicate = Arc<dyn Fn(&[String]) -> bool + Send + Sync>;
type EntryPredicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

#[derive(Clone, Debug)]
enum Segment {
    Space {
        width: usize,
    },
    Value {
        width: usize,
        name: String,
        parser: ValueParser,
        optional: bool,
    },
    Multi {
        count: usize,
        width: usize,
        name: String,
        parser: ValueParser,
    },
    Rest {
        name: String,
        parser: ValueParser,
    },
}

impl Segment {
    /// Characters this segment claims, `None` for "everything left".
    fn span(&self) -> Option<usize> {
        match self {
            Self::Space { width } | Self::Value { width, .. } => Some(*width),
            Self::Multi { count, width, .. } => Some(count * width),
            Self::Rest { .. } => None,
        }
    }
}

/// What a single line turned into.
#[derive(Clone, Debug, PartialEq)]
pub enum LineOutcome {
    /// The line produced a record.
    Record(Record),
    /// A policy skipped the line.
    Ignored,
    /// A policy ended the input at this line.
    Stop,
}

/// How a record stream ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndOfInput {
    /// The underlying stream ran out.
    Exhausted,
    /// A stop policy matched; the stopping line was not emitted.
    Stopped {
        /// 1-based number of the stopping line.
        line: usize,
    },
    /// An error was yielded and the stream was abandoned.
    Failed {
        /// 1-based number of the failing line.
        line: usize,
    },
}

/// Declaration of a fixed-width line layout plus its line policies.
///
/// Segments consume characters left to right at fixed widths; nothing
/// is scanned for delimiters. A line that ends before a required field
/// is complete is a [`ParseError::MalformedLine`]. Fields declared with
/// [`optional`](Self::optional) may be short or absent instead.
///
/// ```
/// use grove_parse::LineParser;
///
/// let parser = LineParser::new()
///     .integer(4, "part1")
///     .space(1)
///     .floating(5, "part2");
///
/// let records = parser.parse_all(" 4   0.5  \n42     1.0".as_bytes()).unwrap();
/// assert_eq!(records[0].int("part1").unwrap(), 4);
/// assert_eq!(records[1].float("part2").unwrap(), 1.0);
/// ```
#[derive(Clone, Default)]
pub struct LineParser {
    segments: Vec<Segment>,
    stop_line: Option<LinePredicate>,
    ignore_line: Option<LinePredicate>,
    stop_segments: Option<SegmentPredicate>,
    ignore_segments: Option<SegmentPredicate>,
    stop_entry: Option<EntryPredicate>,
    ignore_entry: Option<EntryPredicate>,
}

impl fmt::Debug for LineParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineParser")
            .field("segments", &self.segments)
            .field("stop_line", &self.stop_line.is_some())
            .field("ignore_line", &self.ignore_line.is_some())
            .field("stop_segments", &self.stop_segments.is_some())
            .field("ignore_segments", &self.ignore_segments.is_some())
            .field("stop_entry", &self.stop_entry.is_some())
            .field("ignore_entry", &self.ignore_entry.is_some())
            .finish()
    }
}

impl LineParser {
    /// An empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Segments ────────────────────────────────────────────────

    /// A required field of `width` characters.
    pub fn value(mut self, width: usize, name: impl Into<String>, parser: ValueParser) -> Self {
        self.segments.push(Segment::Value {
            width,
            name: name.into(),
            parser,
            optional: false,
        });
        self
    }

    /// A field that may be blank, short, or past the end of the line.
    ///
    /// Blank or absent text yields [`Value::Missing`]; anything else
    /// goes to `parser`.
    pub fn optional(mut self, width: usize, name: impl Into<String>, parser: ValueParser) -> Self {
        self.segments.push(Segment::Value {
            width,
            name: name.into(),
            parser: parser.optional(),
            optional: true,
        });
        self
    }

    /// A required integer field.
    pub fn integer(self, width: usize, name: impl Into<String>) -> Self {
        self.value(width, name, ValueParser::integer())
    }

    /// A required float field.
    pub fn floating(self, width: usize, name: impl Into<String>) -> Self {
        self.value(width, name, ValueParser::float())
    }

    /// A required raw string field.
    pub fn string(self, width: usize, name: impl Into<String>) -> Self {
        self.value(width, name, ValueParser::string())
    }

    /// A required string field with surrounding whitespace removed.
    pub fn stripped_string(self, width: usize, name: impl Into<String>) -> Self {
        self.value(width, name, ValueParser::stripped_string())
    }

    /// A required single-character field.
    pub fn character(self, name: impl Into<String>) -> Self {
        self.value(1, name, ValueParser::character())
    }

    /// Filler columns that are skipped.
    pub fn space(mut self, width: usize) -> Self {
        self.segments.push(Segment::Space { width });
        self
    }

    /// `count` contiguous fields of the same shape, stored under one
    /// name as a [`Value::Multi`].
    pub fn multi_value(
        mut self,
        count: usize,
        width: usize,
        name: impl Into<String>,
        parser: ValueParser,
    ) -> Self {
        self.segments.push(Segment::Multi {
            count,
            width,
            name: name.into(),
            parser,
        });
        self
    }

    /// Everything left on the line. Segments declared after this one
    /// always see empty text.
    pub fn rest(mut self, name: impl Into<String>, parser: ValueParser) -> Self {
        self.segments.push(Segment::Rest {
            name: name.into(),
            parser,
        });
        self
    }

    // ── Policies ────────────────────────────────────────────────

    /// End the input at the first raw line matching `f`.
    pub fn stop_line<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.stop_line = Some(Arc::new(f));
        self
    }

    /// Skip raw lines matching `f`.
    pub fn ignore_line<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.ignore_line = Some(Arc::new(f));
        self
    }

    /// End the input at the first line whose split segments match `f`.
    ///
    /// `f` sees one string per declared segment, spaces included, each
    /// possibly shorter than its width.
    pub fn stop_segments<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.stop_segments = Some(Arc::new(f));
        self
    }

    /// Skip lines whose split segments match `f`.
    pub fn ignore_segments<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.ignore_segments = Some(Arc::new(f));
        self
    }

    /// End the input at the first parsed record matching `f`.
    pub fn stop_entry<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.stop_entry = Some(Arc::new(f));
        self
    }

    /// Skip parsed records matching `f`.
    pub fn ignore_entry<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.ignore_entry = Some(Arc::new(f));
        self
    }

    // ── Parsing ─────────────────────────────────────────────────

    /// Split a line into one string per declared segment.
    ///
    /// Splitting never fails: a segment gets whatever characters are
    /// left, possibly none.
    pub fn split(&self, line: &str) -> Vec<String> {
        let chars: Vec<char> = line.chars().collect();
        let mut pos = 0;
        let mut pieces = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let end = match segment.span() {
                Some(span) => (pos + span).min(chars.len()),
                None => chars.len(),
            };
            pieces.push(chars[pos..end].iter().collect());
            pos = end;
        }
        pieces
    }

    /// Apply the declaration and every policy to one line.
    ///
    /// `line_no` is the 1-based number used in errors and on the record.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<LineOutcome, ParseError> {
        if self.stop_line.as_ref().is_some_and(|f| f(line)) {
            return Ok(LineOutcome::Stop);
        }
        if self.ignore_line.as_ref().is_some_and(|f| f(line)) {
            return Ok(LineOutcome::Ignored);
        }

        let pieces = self.split(line);
        if self.stop_segments.as_ref().is_some_and(|f| f(&pieces)) {
            return Ok(LineOutcome::Stop);
        }
        if self.ignore_segments.as_ref().is_some_and(|f| f(&pieces)) {
            return Ok(LineOutcome::Ignored);
        }

        let mut record = Record::new(line_no);
        for (segment, piece) in self.segments.iter().zip(&pieces) {
            match segment {
                Segment::Space { .. } => {}
                Segment::Value {
                    width,
                    name,
                    parser,
                    optional,
                } => {
                    let found = piece.chars().count();
                    if found < *width && !optional {
                        return Err(ParseError::MalformedLine {
                            line: line_no,
                            field: name.clone(),
                            expected: *width,
                            found,
                        });
                    }
                    let value = parser
                        .parse(piece)
                        .map_err(|e| lift(line_no, name.clone(), e))?;
                    record.insert(name.clone(), value);
                }
                Segment::Multi {
                    count,
                    width,
                    name,
                    parser,
                } => {
                    let chars: Vec<char> = piece.chars().collect();
                    if chars.len() < count * width {
                        return Err(ParseError::MalformedLine {
                            line: line_no,
                            field: name.clone(),
                            expected: count * width,
                            found: chars.len(),
                        });
                    }
                    let mut values = Vec::with_capacity(*count);
                    for (i, chunk) in chars.chunks(*width).take(*count).enumerate() {
                        let raw: String = chunk.iter().collect();
                        let value = parser
                            .parse(&raw)
                            .map_err(|e| lift(line_no, format!("{name}[{i}]"), e))?;
                        values.push(value);
                    }
                    record.insert(name.clone(), Value::Multi(values));
                }
                Segment::Rest { name, parser } => {
                    let value = parser
                        .parse(piece)
                        .map_err(|e| lift(line_no, name.clone(), e))?;
                    record.insert(name.clone(), value);
                }
            }
        }

        if self.stop_entry.as_ref().is_some_and(|f| f(&record)) {
            return Ok(LineOutcome::Stop);
        }
        if self.ignore_entry.as_ref().is_some_and(|f| f(&record)) {
            return Ok(LineOutcome::Ignored);
        }
        Ok(LineOutcome::Record(record))
    }

    /// Lazily parse `reader`, one record per accepted line.
    pub fn records<R: BufRead>(&self, reader: R) -> Records<'_, R> {
        Records {
            parser: self,
            reader,
            buf: String::new(),
            line: 0,
            end: None,
        }
    }

    /// Parse every accepted line of `reader`.
    pub fn parse_all<R: BufRead>(&self, reader: R) -> Result<Vec<Record>, ParseError> {
        self.records(reader).collect()
    }

    /// Fold every accepted record of `reader` into an accumulator.
    ///
    /// The first error from the stream or from `f` aborts the fold and
    /// the partially built accumulator is dropped.
    pub fn fold<R, T, F>(&self, reader: R, init: T, mut f: F) -> Result<T, ParseError>
    where
        R: BufRead,
        F: FnMut(T, Record) -> Result<T, ParseError>,
    {
        let mut records = self.records(reader);
        let mut acc = init;
        let mut accepted = 0usize;
        for record in records.by_ref() {
            acc = f(acc, record?)?;
            accepted += 1;
        }
        debug!(
            lines = records.line_number(),
            records = accepted,
            end = ?records.end_of_input(),
            "fixed-width fold complete"
        );
        Ok(acc)
    }
}

fn lift(line: usize, field: String, e: ValueError) -> ParseError {
    ParseError::ValueParse {
        line,
        field,
        value: e.value,
        reason: e.reason,
    }
}

/// Lazy stream of [`Record`]s over a buffered reader.
///
/// Yields `Err` at most once; after an error, a stop line, or the end
/// of the stream it yields nothing more. [`end_of_input`](Self::end_of_input)
/// tells the caller which of those happened.
pub struct Records<'p, R: BufRead> {
    parser: &'p LineParser,
    reader: R,
    buf: String,
    line: usize,
    end: Option<EndOfInput>,
}

impl<R: BufRead> Records<'_, R> {
    /// Number of lines read so far, including ignored ones.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// How the stream ended, or `None` while it is still open.
    pub fn end_of_input(&self) -> Option<EndOfInput> {
        self.end
    }

    /// Whether the stream ended normally, by running out or at a stop line.
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self.end,
            Some(EndOfInput::Exhausted) | Some(EndOfInput::Stopped { .. })
        )
    }
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }
        let parser = self.parser;
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.end = Some(EndOfInput::Exhausted);
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.end = Some(EndOfInput::Failed {
                        line: self.line + 1,
                    });
                    return Some(Err(e.into()));
                }
            }
            self.line += 1;

            let text = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
            let text = text.strip_suffix('\r').unwrap_or(text);

            match parser.parse_line(self.line, text) {
                Ok(LineOutcome::Record(record)) => return Some(Ok(record)),
                Ok(LineOutcome::Ignored) => continue,
                Ok(LineOutcome::Stop) => {
                    trace!(line = self.line, "stop policy matched");
                    self.end = Some(EndOfInput::Stopped { line: self.line });
                    return None;
                }
                Err(e) => {
                    self.end = Some(EndOfInput::Failed { line: self.line });
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> LineParser {
        LineParser::new()
            .integer(4, "part1")
            .space(1)
            .floating(5, "part2")
    }

    fn outcome_record(outcome: LineOutcome) -> Record {
        match outcome {
            LineOutcome::Record(r) => r,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn string_segments() {
        let parser = LineParser::new().string(3, "part1").space(1).string(4, "part2");
        let r = outcome_record(parser.parse_line(1, "042 Blah").unwrap());
        assert_eq!(r.str("part1").unwrap(), "042");
        assert_eq!(r.str("part2").unwrap(), "Blah");
    }

    #[test]
    fn numbers_are_trimmed() {
        let r = outcome_record(basic().parse_line(1, " 4   0.5  ").unwrap());
        assert_eq!(r.int("part1").unwrap(), 4);
        assert_eq!(r.float("part2").unwrap(), 0.5);
    }

    #[test]
    fn short_line_is_malformed() {
        let err = basic().parse_line(3, " 4   5.0").unwrap_err();
        match err {
            ParseError::MalformedLine {
                line,
                field,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(field, "part2");
                assert_eq!(expected, 5);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn optional_field_may_be_short_or_absent() {
        let parser = LineParser::new()
            .integer(4, "part1")
            .space(1)
            .optional(5, "part2", ValueParser::float());
        let r = outcome_record(parser.parse_line(1, " 4   5.0").unwrap());
        assert_eq!(r.float("part2").unwrap(), 5.0);
        let r = outcome_record(parser.parse_line(1, " 4  ").unwrap());
        assert_eq!(r.get("part2"), Some(&Value::Missing));
    }

    #[test]
    fn value_error_carries_raw_text() {
        let err = basic().parse_line(1, " X   0.5  ").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ValueParse { ref field, ref value, .. } if field == "part1" && value == "X"
        ));
        let err = basic().parse_line(1, " 4   0.x  ").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ValueParse { ref value, .. } if value == "0.x"
        ));
    }

    #[test]
    fn custom_parser_error_keeps_untrimmed_value() {
        let parser = LineParser::new()
            .value(
                4,
                "part1",
                ValueParser::new(|s| Err(ValueError::new(s, "Testing"))),
            )
            .space(1)
            .floating(4, "part2");
        let err = parser.parse_line(1, " X   0.5  ").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ValueParse { ref value, ref reason, .. } if value == " X  " && reason == "Testing"
        ));
    }

    #[test]
    fn multi_value_splits_fixed_chunks() {
        let parser = LineParser::new()
            .stripped_string(2, "key")
            .multi_value(3, 4, "coe", ValueParser::float());
        let r = outcome_record(parser.parse_line(1, "AB 1.0 2.5-3.0").unwrap());
        assert_eq!(r.floats("coe").unwrap(), vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn multi_value_error_names_position() {
        let parser = LineParser::new().multi_value(3, 4, "coe", ValueParser::float());
        let err = parser.parse_line(9, " 1.0 2.x 3.0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ValueParse { line: 9, ref field, .. } if field == "coe[1]"
        ));
        let err = parser.parse_line(9, " 1.0 2.0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedLine { expected: 12, found: 8, .. }
        ));
    }

    #[test]
    fn rest_takes_remainder() {
        let parser = LineParser::new()
            .integer(4, "part1")
            .space(1)
            .rest("part2", ValueParser::stripped_string());
        let r = outcome_record(parser.parse_line(1, "0042 Value and more  ").unwrap());
        assert_eq!(r.str("part2").unwrap(), "Value and more");
        let r = outcome_record(parser.parse_line(1, "0042").unwrap());
        assert_eq!(r.str("part2").unwrap(), "");
    }

    #[test]
    fn split_is_lenient() {
        let parser = LineParser::new().string(4, "a").space(1).string(4, "b");
        assert_eq!(parser.split("0000X"), vec!["0000", "X", ""]);
    }

    #[test]
    fn policy_order_line_then_segment_then_entry() {
        let parser = LineParser::new()
            .integer(4, "part1")
            .space(1)
            .rest("part2", ValueParser::string())
            .ignore_line(|l| l.starts_with('#'))
            .stop_segments(|s| s[1] == "X")
            .ignore_entry(|r| r.int("part1").is_ok_and(|v| v == 0));
        assert_eq!(parser.parse_line(1, "# note").unwrap(), LineOutcome::Ignored);
        assert_eq!(parser.parse_line(1, "0001Xabc").unwrap(), LineOutcome::Stop);
        assert_eq!(parser.parse_line(1, "0000 abc").unwrap(), LineOutcome::Ignored);
    }

    #[test]
    fn crlf_and_line_numbers() {
        let parser = LineParser::new()
            .integer(4, "part1")
            .space(1)
            .rest("part2", ValueParser::string());
        let records = parser
            .parse_all("0042 Value1\r\n0043 Value2\r\n".as_bytes())
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].str("part2").unwrap(), "Value1");
        assert_eq!(records[1].line(), 2);
    }

    #[test]
    fn stop_entry_excludes_stopping_line() {
        let parser = LineParser::new()
            .integer(4, "part1")
            .space(1)
            .rest("part2", ValueParser::string())
            .stop_entry(|r| r.int("part1").is_ok_and(|v| v == 0));
        let mut records = parser.records("0042 Value1\r\n0000\r\n0043 Value2".as_bytes());
        let first = records.next().unwrap().unwrap();
        assert_eq!(first.int("part1").unwrap(), 42);
        assert!(records.next().is_none());
        assert_eq!(records.end_of_input(), Some(EndOfInput::Stopped { line: 2 }));
        assert!(records.is_exhausted());
    }

    #[test]
    fn error_ends_stream() {
        let parser = LineParser::new().integer(4, "part1");
        let mut records = parser.records("0042\n004x\n0043\n".as_bytes());
        assert!(records.next().unwrap().is_ok());
        let err = records.next().unwrap().unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(records.next().is_none());
        assert_eq!(records.end_of_input(), Some(EndOfInput::Failed { line: 2 }));
        assert!(!records.is_exhausted());
    }

    #[test]
    fn fold_accumulates_in_order() {
        let parser = LineParser::new().integer(3, "n");
        let sum = parser
            .fold("  1\n  2\n  3\n".as_bytes(), Vec::new(), |mut acc, r| {
                acc.push(r.int("n")?);
                Ok(acc)
            })
            .unwrap();
        assert_eq!(sum, vec![1, 2, 3]);
    }

    #[test]
    fn fold_propagates_callback_error() {
        let parser = LineParser::new().integer(3, "n");
        let err = parser
            .fold("  1\n  2\n".as_bytes(), 0, |acc, r| {
                if r.int("n")? == 2 {
                    return Err(ParseError::validation(r.line(), "two is not allowed"));
                }
                Ok(acc + 1)
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "line 2: two is not allowed");
    }
}
