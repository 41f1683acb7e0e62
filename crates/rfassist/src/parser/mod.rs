//
// parser/mod.rs
//
// Robot Framework file parsing: text in, typed argument model out. Pure
// and total; malformed input degrades to best-effort structure instead of
// erroring.
//

pub mod argument;
pub mod line;
pub mod split;

pub use argument::{unescape, ArgumentType, ParsedString};
pub use line::{RobotLine, TableKind};

use line::{classify_line, header_table};
use split::{scan_cell, split_line, SplitLine};

/// A fully parsed suite file: one `RobotLine` per physical line, in order,
/// with `lines()[i].line_no() == i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotFile {
    lines: Vec<RobotLine>,
    /// Table context still open after the last line, for classifying
    /// positions past the end of the parsed text.
    trailing_table: TableKind,
}

impl RobotFile {
    /// Parse suite text into the line/argument model.
    ///
    /// Pure and uncached, so it is also the right entry point for "what if
    /// the text looked like this" parses of text that is not any document's
    /// current content. Line terminators may be LF or CRLF; offsets are
    /// char offsets into `text` and line terminators count toward them.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfassist::parser::{ArgumentType, RobotFile};
    ///
    /// let file = RobotFile::parse("*** Settings ***\nResource  common.robot\n");
    /// let line = &file.lines()[1];
    /// assert!(line.is_resource_import());
    /// assert_eq!(line.arguments()[1].arg_type(), ArgumentType::SettingFile);
    /// ```
    pub fn parse(text: &str) -> RobotFile {
        log::trace!("parsing suite text ({} chars)", text.chars().count());
        let mut lines = Vec::new();
        let mut table = TableKind::default();
        for (line_no, (char_offset, line_text)) in line_segments(text).into_iter().enumerate() {
            let SplitLine { indented, cells } = split_line(line_text);
            let mut args: Vec<ParsedString> = cells
                .into_iter()
                .map(|cell| ParsedString::new(cell.text, char_offset + cell.col))
                .collect();
            if !indented {
                if let Some(first) = args.first() {
                    if let Some(kind) = header_table(first.value()) {
                        table = kind;
                    }
                }
            }
            classify_line(table, indented, &mut args);
            lines.push(RobotLine::new(line_no, char_offset, table, args));
        }
        RobotFile {
            lines,
            trailing_table: table,
        }
    }

    /// Parsed lines, one per physical line of the text.
    pub fn lines(&self) -> &[RobotLine] {
        &self.lines
    }

    pub fn line(&self, line_no: usize) -> Option<&RobotLine> {
        self.lines.get(line_no)
    }

    /// Classify the argument that would begin at `offset` if a character
    /// were typed there.
    ///
    /// This answers the completion question for a cursor sitting in
    /// separator whitespace, at the end of a line, or on an empty line: no
    /// real argument covers the position, but typing would create one. The
    /// result is anchored at exactly `offset`; its value is the text a
    /// typed character would fuse with (empty in front of a hard separator
    /// or line end) and its type is what the line classifier assigns to a
    /// cell in that slot.
    ///
    /// `text` must be the same text `self` was parsed from. A `line_no`
    /// past the parsed lines behaves as an empty line in the table left
    /// open at the end of the file. The operation is pure: nothing is
    /// mutated or reparsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfassist::parser::{ArgumentType, RobotFile};
    ///
    /// let text = "*** Settings ***\nResource  \n";
    /// let file = RobotFile::parse(text);
    /// // Cursor at the end of the Resource line, after the separator.
    /// let phantom = file.phantom_argument(text, 1, 27);
    /// assert_eq!(phantom.offset(), 27);
    /// assert_eq!(phantom.arg_type(), ArgumentType::SettingFile);
    /// assert!(phantom.is_empty());
    /// ```
    pub fn phantom_argument(&self, text: &str, line_no: usize, offset: usize) -> ParsedString {
        let segments = line_segments(text);
        let (line_start, line_text, table) = match (segments.get(line_no), self.lines.get(line_no))
        {
            (Some(&(start, segment)), Some(robot_line)) => (start, segment, robot_line.table()),
            _ => (offset, "", self.trailing_table),
        };
        let col = offset.saturating_sub(line_start);
        let chars: Vec<char> = line_text.chars().collect();
        let value = if col < chars.len() {
            scan_cell(&chars, col).0
        } else {
            String::new()
        };

        // Re-run the line classifier with the phantom occupying its slot in
        // the cell sequence.
        let mut cells: Vec<ParsedString> = self
            .lines
            .get(line_no)
            .map(|robot_line| {
                robot_line
                    .arguments()
                    .iter()
                    .map(|a| ParsedString::new(a.value(), a.offset()))
                    .collect()
            })
            .unwrap_or_default();
        let slot = cells
            .iter()
            .position(|cell| cell.offset() > offset)
            .unwrap_or(cells.len());
        cells.insert(slot, ParsedString::new(value.clone(), offset));
        let indented = cells.first().is_some_and(|cell| cell.offset() > line_start);
        classify_line(table, indented, &mut cells);

        let mut phantom = ParsedString::new(value, offset);
        phantom.copy_type_from(&cells[slot]);
        log::trace!(
            "phantom argument at offset {} on line {}: {:?}",
            offset,
            line_no,
            phantom.arg_type()
        );
        phantom
    }
}

/// Physical lines of `text` as (starting char offset, content without
/// terminator) pairs. Mirrors how rope-backed documents count lines: a
/// trailing newline yields a final empty line.
fn line_segments(text: &str) -> Vec<(usize, &str)> {
    let mut segments = Vec::new();
    let mut char_offset = 0;
    for segment in text.split('\n') {
        let line = segment.strip_suffix('\r').unwrap_or(segment);
        segments.push((char_offset, line));
        char_offset += segment.chars().count() + 1;
    }
    segments
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// The probe technique the phantom query replaces: insert a character,
    /// reparse everything, find the argument it landed in, strip it back
    /// out, and keep the classification. Used here as the behavioral
    /// oracle.
    fn probe_synthesize(text: &str, offset: usize) -> ParsedString {
        let mut probed: String = text.chars().take(offset).collect();
        probed.push('x');
        probed.extend(text.chars().skip(offset));
        let file = RobotFile::parse(&probed);
        let line_no = text.chars().take(offset).filter(|&c| c == '\n').count();
        let argument = file.lines()[line_no]
            .argument_at(offset)
            .expect("the probe char always forms an argument");
        assert_eq!(
            argument.offset(),
            offset,
            "the probe argument must begin where the probe was inserted"
        );
        let stripped: String = argument.value().chars().skip(1).collect();
        let mut synthesized = ParsedString::new(stripped, offset);
        synthesized.copy_type_from(argument);
        synthesized
    }

    fn header_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("*** Settings ***"),
            Just("*** Variables ***"),
            Just("*** Test Cases ***"),
            Just("*** Keywords ***"),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Parsing never panics and produces structurally sound lines:
        /// line numbers sequential, arguments ascending and within bounds.
        #[test]
        fn parse_is_total_and_ordered(text in "[ \t\r\nA-Za-z0-9${}#*\\[\\]\\\\.-]{0,200}") {
            let file = RobotFile::parse(&text);
            prop_assert_eq!(file.lines().len(), text.split('\n').count());
            for (i, line) in file.lines().iter().enumerate() {
                prop_assert_eq!(line.line_no(), i);
                let mut previous_end: Option<usize> = None;
                for argument in line.arguments() {
                    prop_assert!(argument.offset() >= line.char_offset());
                    if let Some(end) = previous_end {
                        prop_assert!(argument.offset() > end);
                    }
                    previous_end = Some(argument.end_offset());
                }
            }
        }

        /// The phantom is always anchored at the requested offset, for any
        /// offset whatsoever, and asking twice gives the same answer.
        #[test]
        fn phantom_is_anchored_and_deterministic(
            text in "[ \t\nA-Za-z0-9${}#*-]{0,120}",
            offset in 0usize..140,
        ) {
            let file = RobotFile::parse(&text);
            let line_no = text.chars().take(offset).filter(|&c| c == '\n').count();
            let first = file.phantom_argument(&text, line_no, offset);
            prop_assert_eq!(first.offset(), offset);
            let second = file.phantom_argument(&text, line_no, offset);
            prop_assert_eq!(first, second);
        }

        /// At the end of a line that finishes with a hard separator, the
        /// phantom query and the probe-reparse oracle agree exactly.
        #[test]
        fn phantom_matches_probe_at_line_end(
            header in header_strategy(),
            cells in proptest::collection::vec("[A-Za-z][A-Za-z0-9]{0,6}", 1..4),
            indent in prop_oneof![Just(""), Just("    ")],
        ) {
            let text = format!("{}\n{}{}  ", header, indent, cells.join("  "));
            let offset = text.chars().count();
            let file = RobotFile::parse(&text);
            let phantom = file.phantom_argument(&text, 1, offset);
            let probed = probe_synthesize(&text, offset);
            prop_assert_eq!(phantom.offset(), probed.offset());
            prop_assert_eq!(phantom.arg_type(), probed.arg_type());
            prop_assert_eq!(phantom.value(), probed.value());
        }

        /// Same agreement in the middle of a wide separator run.
        #[test]
        fn phantom_matches_probe_inside_separators(
            header in header_strategy(),
            first in "[A-Za-z][A-Za-z0-9]{0,6}",
            second in "[A-Za-z][A-Za-z0-9]{0,6}",
            extra in 0usize..3,
        ) {
            let separator = " ".repeat(3 + extra);
            let text = format!("{}\n{}{}{}", header, first, separator, second);
            // Two separator chars in, so the left neighbour stays detached.
            let offset = header.chars().count() + 1 + first.chars().count() + 2;
            let file = RobotFile::parse(&text);
            prop_assert!(file.lines()[1].argument_at(offset).is_none());
            let phantom = file.phantom_argument(&text, 1, offset);
            let probed = probe_synthesize(&text, offset);
            prop_assert_eq!(phantom.offset(), probed.offset());
            prop_assert_eq!(phantom.arg_type(), probed.arg_type());
            prop_assert_eq!(phantom.value(), probed.value());
        }
    }
}
