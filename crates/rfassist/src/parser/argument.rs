//
// parser/argument.rs
//
// Argument-level lexical model: a parsed cell of a Robot Framework line,
// its classification, and escape handling.
//

/// Classification of a single argument (cell) within a parsed line.
///
/// The variant determines which completion categories apply at the
/// argument's position and which lines the hyperlink rules consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArgumentType {
    /// Unclassified content: text outside any recognized table, extra cells
    /// with no role, and freshly split cells before classification.
    #[default]
    Ignored,
    /// A `#`-initiated comment running to the end of the line.
    Comment,
    /// A table header cell such as `*** Settings ***`.
    TableHeader,
    /// A setting name: the first cell of a Settings-table row, or a
    /// bracketed local setting like `[Setup]` inside a test or keyword.
    SettingKey,
    /// A plain setting value.
    SettingVal,
    /// A file-path-valued setting cell (the path of a `Resource`,
    /// `Variables`, or `Library` import).
    SettingFile,
    /// An additional argument following a file import path.
    SettingFileArg,
    /// The name cell of a Variables-table definition, e.g. `${GREETING}`.
    VariableKey,
    /// A value cell of a Variables-table definition.
    VariableVal,
    /// The name cell of a new test case.
    NewTestcase,
    /// The name cell of a new user keyword.
    NewKeyword,
    /// An assignment target preceding a keyword call, e.g. `${result} =`.
    KeywordLvalue,
    /// A keyword call by literal name.
    KeywordCall,
    /// A keyword call whose name contains a variable expression, so the
    /// actual keyword is only known at runtime.
    KeywordCallDynamic,
    /// An argument passed to a keyword call.
    KeywordArg,
}

/// Expand Robot Framework escape sequences.
///
/// A backslash escapes the following character literally; `\n`, `\r`, and
/// `\t` produce the corresponding control character. A trailing backslash
/// with nothing after it stays a literal backslash rather than being an
/// error.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
        }
    }
    out
}

/// One argument of a parsed line: the raw cell text exactly as typed, the
/// absolute char offset of its first character, and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedString {
    value: String,
    offset: usize,
    arg_type: ArgumentType,
}

impl ParsedString {
    /// A new, still unclassified argument.
    pub fn new(value: impl Into<String>, offset: usize) -> Self {
        Self {
            value: value.into(),
            offset,
            arg_type: ArgumentType::default(),
        }
    }

    /// The raw (escaped) cell text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The cell text with escape sequences expanded. Pure function of the
    /// raw value; never fails.
    pub fn unescaped_value(&self) -> String {
        unescape(&self.value)
    }

    /// Absolute char offset of the first character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the raw value in chars.
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Absolute char offset one past the last character.
    pub fn end_offset(&self) -> usize {
        self.offset + self.char_len()
    }

    pub fn arg_type(&self) -> ArgumentType {
        self.arg_type
    }

    pub(crate) fn set_type(&mut self, arg_type: ArgumentType) {
        self.arg_type = arg_type;
    }

    /// Adopt another argument's classification.
    pub fn copy_type_from(&mut self, other: &ParsedString) {
        self.arg_type = other.arg_type;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the argument covers the given char offset. End-inclusive: a
    /// cursor touching the right edge of the token being typed still
    /// addresses that token.
    pub fn covers(&self, offset: usize) -> bool {
        self.offset <= offset && offset <= self.end_offset()
    }

    /// Whether the raw value contains an unescaped `${...}` or `@{...}`
    /// variable expression start. An unterminated `${` counts: the user is
    /// mid-way through typing the expression.
    pub fn has_variable_reference(&self) -> bool {
        let mut chars = self.value.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '$' | '@' => {
                    if chars.peek() == Some(&'{') {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }
}
