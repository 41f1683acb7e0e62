//
// parser/split.rs
//
// Cell splitter for the space-separated Robot Framework format. Works on a
// single line of text and reports raw cell content with char columns;
// escape interpretation happens later, at the argument level.
//

/// A raw cell produced by the splitter: the text exactly as typed and the
/// char column of its first character within the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub text: String,
    pub col: usize,
}

/// Result of splitting one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    /// Whether the line starts with whitespace, putting its first cell in
    /// the continuation column rather than the name column.
    pub indented: bool,
    pub cells: Vec<RawCell>,
}

/// Split one line (without its terminator) into cells.
///
/// Cells are separated by a tab or by a run of two or more spaces; a single
/// space is cell content, because keyword names contain spaces. A backslash
/// escapes the following character, so an escaped space never terminates a
/// cell. A cell starting with an unescaped `#` swallows the rest of the
/// line as one comment cell. Empty and whitespace-only lines produce no
/// cells. Never fails.
pub fn split_line(line: &str) -> SplitLine {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut cells = Vec::new();

    let mut i = 0;
    while i < n && is_separator_char(chars[i]) {
        i += 1;
    }
    let indented = i > 0;

    while i < n {
        if chars[i] == '#' {
            cells.push(RawCell {
                text: chars[i..].iter().collect(),
                col: i,
            });
            break;
        }
        let start = i;
        let (text, next) = scan_cell(&chars, i);
        cells.push(RawCell { text, col: start });
        i = next;
        while i < n && is_separator_char(chars[i]) {
            i += 1;
        }
    }

    SplitLine { indented, cells }
}

/// Scan one cell starting at `start`, returning its raw text and the index
/// of the first char past the cell. The cell ends at an unescaped tab, at
/// an unescaped space followed by more whitespace or the end of the line,
/// or at the end of the line itself.
///
/// Also answers the phantom-argument question "what text would a character
/// typed at this column fuse with": started mid-whitespace, the scan stops
/// immediately at a hard separator but runs through a lone space into an
/// adjacent cell.
pub(crate) fn scan_cell(chars: &[char], start: usize) -> (String, usize) {
    let n = chars.len();
    let mut text = String::new();
    let mut i = start;
    while i < n {
        let c = chars[i];
        if c == '\\' {
            text.push(c);
            i += 1;
            if i < n {
                text.push(chars[i]);
                i += 1;
            }
            continue;
        }
        if c == '\t' {
            break;
        }
        if c == ' ' && (i + 1 >= n || is_separator_char(chars[i + 1])) {
            break;
        }
        text.push(c);
        i += 1;
    }
    (text, i)
}

fn is_separator_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(line: &str) -> Vec<(String, usize)> {
        split_line(line)
            .cells
            .into_iter()
            .map(|c| (c.text, c.col))
            .collect()
    }

    #[test]
    fn splits_on_two_or_more_spaces() {
        assert_eq!(
            cells("Resource  foo.robot"),
            vec![("Resource".into(), 0), ("foo.robot".into(), 10)]
        );
        assert_eq!(
            cells("a    b"),
            vec![("a".into(), 0), ("b".into(), 5)]
        );
    }

    #[test]
    fn single_space_is_cell_content() {
        assert_eq!(
            cells("Should Be Equal  ${a}  ${b}"),
            vec![
                ("Should Be Equal".into(), 0),
                ("${a}".into(), 17),
                ("${b}".into(), 23)
            ]
        );
    }

    #[test]
    fn tab_separates_even_alone() {
        assert_eq!(
            cells("a\tb\tc"),
            vec![("a".into(), 0), ("b".into(), 2), ("c".into(), 4)]
        );
        assert_eq!(cells("a \tb"), vec![("a".into(), 0), ("b".into(), 3)]);
    }

    #[test]
    fn leading_whitespace_marks_indentation() {
        let split = split_line("    Log  message");
        assert!(split.indented);
        assert_eq!(split.cells[0].text, "Log");
        assert_eq!(split.cells[0].col, 4);

        assert!(!split_line("Log  message").indented);
        assert!(split_line("\tLog").indented);
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        assert_eq!(cells("abc   "), vec![("abc".into(), 0)]);
        assert_eq!(cells("abc "), vec![("abc".into(), 0)]);
        assert_eq!(cells("abc\t"), vec![("abc".into(), 0)]);
    }

    #[test]
    fn empty_and_blank_lines_have_no_cells() {
        assert!(cells("").is_empty());
        assert!(cells("   ").is_empty());
        assert!(cells("\t\t").is_empty());
    }

    #[test]
    fn escaped_space_stays_in_cell() {
        assert_eq!(cells(r"a\  b"), vec![(r"a\  b".into(), 0)]);
        assert_eq!(
            cells(r"a\   b"),
            vec![(r"a\ ".into(), 0), ("b".into(), 5)]
        );
    }

    #[test]
    fn trailing_backslash_is_kept() {
        assert_eq!(cells(r"abc\"), vec![(r"abc\".into(), 0)]);
    }

    #[test]
    fn comment_swallows_rest_of_line() {
        assert_eq!(
            cells("Log  msg  # trailing  note"),
            vec![
                ("Log".into(), 0),
                ("msg".into(), 5),
                ("# trailing  note".into(), 10)
            ]
        );
        assert_eq!(cells("# whole line"), vec![("# whole line".into(), 0)]);
    }

    #[test]
    fn escaped_hash_is_not_a_comment() {
        assert_eq!(
            cells(r"\#literal  x"),
            vec![(r"\#literal".into(), 0), ("x".into(), 11)]
        );
    }

    #[test]
    fn hash_inside_a_cell_is_content() {
        assert_eq!(cells("ab#cd"), vec![("ab#cd".into(), 0)]);
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        assert_eq!(
            cells("äiti  ö"),
            vec![("äiti".into(), 0), ("ö".into(), 6)]
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Splitting never panics, and cells come out in ascending,
        /// non-overlapping column order with non-empty text.
        #[test]
        fn cells_are_ordered_and_non_empty(line in "[ \tA-Za-z0-9${}#\\\\*\\[\\].-]{0,60}") {
            let split = split_line(&line);
            let mut previous_end: Option<usize> = None;
            for cell in &split.cells {
                prop_assert!(!cell.text.is_empty());
                if let Some(end) = previous_end {
                    // At least one separator char between consecutive cells.
                    prop_assert!(cell.col > end);
                }
                previous_end = Some(cell.col + cell.text.chars().count());
            }
        }

        /// Every cell's text is literally present at its column.
        #[test]
        fn cell_text_matches_source(line in "[ \tA-Za-z0-9${}.-]{0,60}") {
            let chars: Vec<char> = line.chars().collect();
            for cell in split_line(&line).cells {
                let extracted: String = chars[cell.col..cell.col + cell.text.chars().count()]
                    .iter()
                    .collect();
                prop_assert_eq!(extracted, cell.text);
            }
        }
    }
}
