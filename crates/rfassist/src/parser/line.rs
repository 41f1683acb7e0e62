//
// parser/line.rs
//
// One parsed line: its typed arguments, the table it belongs to, and the
// classification rules that assign argument types from table context and
// cell position.
//

use super::argument::{ArgumentType, ParsedString};

/// The table (section) a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableKind {
    /// Before any recognized header, or inside an unrecognized table.
    #[default]
    Unknown,
    Settings,
    Variables,
    TestCases,
    Keywords,
}

/// A parsed line: ordered, non-overlapping typed arguments plus position
/// and table context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotLine {
    line_no: usize,
    char_offset: usize,
    table: TableKind,
    arguments: Vec<ParsedString>,
}

impl RobotLine {
    pub(crate) fn new(
        line_no: usize,
        char_offset: usize,
        table: TableKind,
        arguments: Vec<ParsedString>,
    ) -> Self {
        Self {
            line_no,
            char_offset,
            table,
            arguments,
        }
    }

    /// 0-based physical line number.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Absolute char offset of the start of the line.
    pub fn char_offset(&self) -> usize {
        self.char_offset
    }

    pub fn table(&self) -> TableKind {
        self.table
    }

    /// Arguments in ascending offset order.
    pub fn arguments(&self) -> &[ParsedString] {
        &self.arguments
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// The argument covering the given char offset, if any. Coverage is
    /// end-inclusive, matching `ParsedString::covers`.
    pub fn argument_at(&self, offset: usize) -> Option<&ParsedString> {
        self.arguments.iter().find(|a| a.covers(offset))
    }

    fn first_setting_key(&self) -> Option<&str> {
        let first = self.arguments.first()?;
        (first.arg_type() == ArgumentType::SettingKey).then(|| first.value())
    }

    /// Is this a Settings-table `Resource` import line?
    pub fn is_resource_import(&self) -> bool {
        self.table == TableKind::Settings
            && self
                .first_setting_key()
                .is_some_and(|key| key.eq_ignore_ascii_case("resource"))
    }

    /// Is this a Settings-table `Variables` (variable file) import line?
    pub fn is_variable_import(&self) -> bool {
        self.table == TableKind::Settings
            && self
                .first_setting_key()
                .is_some_and(|key| key.eq_ignore_ascii_case("variables"))
    }

    /// Is this a Variables-table definition line?
    pub fn is_variable_definition(&self) -> bool {
        self.arguments
            .first()
            .is_some_and(|a| a.arg_type() == ArgumentType::VariableKey)
    }

    /// Is this a table header line?
    pub fn is_table_header(&self) -> bool {
        self.arguments
            .first()
            .is_some_and(|a| a.arg_type() == ArgumentType::TableHeader)
    }
}

/// Recognize a table header cell such as `*** Test Cases ***`. Returns the
/// table it opens, `TableKind::Unknown` for an unrecognized header name,
/// and `None` when the cell is not a header at all.
pub(crate) fn header_table(cell: &str) -> Option<TableKind> {
    if !cell.starts_with('*') {
        return None;
    }
    let name = cell.trim_matches('*').trim();
    let lowered = name.to_ascii_lowercase();
    Some(match lowered.as_str() {
        "setting" | "settings" | "metadata" => TableKind::Settings,
        "variable" | "variables" => TableKind::Variables,
        "test case" | "test cases" => TableKind::TestCases,
        "keyword" | "keywords" | "user keyword" | "user keywords" => TableKind::Keywords,
        _ => TableKind::Unknown,
    })
}

/// Assign argument types in place, given the table context and whether the
/// line's first cell sits in the continuation column. Freshly split cells
/// default to `Ignored`, so rules only need to mark what they recognize.
pub(crate) fn classify_line(table: TableKind, indented: bool, args: &mut [ParsedString]) {
    if args.is_empty() {
        return;
    }

    // A trailing comment cell is classified the same way in every table.
    let content_len = if args[args.len() - 1].value().starts_with('#') {
        let last = args.len() - 1;
        args[last].set_type(ArgumentType::Comment);
        last
    } else {
        args.len()
    };
    let args = &mut args[..content_len];
    let Some(first) = args.first() else {
        return;
    };

    if !indented && header_table(first.value()).is_some() {
        args[0].set_type(ArgumentType::TableHeader);
        return;
    }

    match table {
        TableKind::Unknown => {}
        TableKind::Settings => {
            if indented {
                return;
            }
            args[0].set_type(ArgumentType::SettingKey);
            let key = args[0].value().to_ascii_lowercase();
            match key.as_str() {
                "resource" => {
                    if let Some(path) = args.get_mut(1) {
                        path.set_type(ArgumentType::SettingFile);
                    }
                }
                "variables" | "library" => {
                    if let Some(path) = args.get_mut(1) {
                        path.set_type(ArgumentType::SettingFile);
                    }
                    for arg in args.iter_mut().skip(2) {
                        arg.set_type(ArgumentType::SettingFileArg);
                    }
                }
                _ => {
                    for arg in args.iter_mut().skip(1) {
                        arg.set_type(ArgumentType::SettingVal);
                    }
                }
            }
        }
        TableKind::Variables => {
            let rest = if indented {
                &mut args[..]
            } else {
                args[0].set_type(ArgumentType::VariableKey);
                &mut args[1..]
            };
            for arg in rest {
                arg.set_type(ArgumentType::VariableVal);
            }
        }
        TableKind::TestCases => {
            if indented {
                classify_step(args);
            } else {
                args[0].set_type(ArgumentType::NewTestcase);
                classify_step(&mut args[1..]);
            }
        }
        TableKind::Keywords => {
            if indented {
                classify_step(args);
            } else {
                args[0].set_type(ArgumentType::NewKeyword);
                classify_step(&mut args[1..]);
            }
        }
    }
}

/// Classify the step portion of a test or keyword line: optional bracket
/// setting, optional assignment targets, the keyword call, its arguments.
fn classify_step(args: &mut [ParsedString]) {
    let Some(first) = args.first() else {
        return;
    };

    let first_value = first.value();
    if first_value.starts_with('[') && first_value.ends_with(']') {
        let keyword_valued = matches!(
            first_value.to_ascii_lowercase().as_str(),
            "[setup]" | "[teardown]" | "[template]"
        );
        args[0].set_type(ArgumentType::SettingKey);
        if keyword_valued {
            classify_call(&mut args[1..]);
        } else {
            for arg in args.iter_mut().skip(1) {
                arg.set_type(ArgumentType::SettingVal);
            }
        }
        return;
    }

    let mut call_at = 0;
    while call_at < args.len() && is_assign_target(args[call_at].value()) {
        call_at += 1;
    }
    if call_at == args.len() && call_at > 0 {
        // Nothing follows the variable-shaped cells, so the last one is not
        // an assignment target but a dynamic keyword call.
        call_at -= 1;
    }
    for arg in &mut args[..call_at] {
        arg.set_type(ArgumentType::KeywordLvalue);
    }
    classify_call(&mut args[call_at..]);
}

fn classify_call(args: &mut [ParsedString]) {
    if let Some((head, rest)) = args.split_first_mut() {
        let call_type = if head.has_variable_reference() {
            ArgumentType::KeywordCallDynamic
        } else {
            ArgumentType::KeywordCall
        };
        head.set_type(call_type);
        for arg in rest {
            arg.set_type(ArgumentType::KeywordArg);
        }
    }
}

/// `${name}`, `@{name}`, `${name}=`, or `${name} =`: an assignment target
/// preceding a keyword call.
fn is_assign_target(text: &str) -> bool {
    let trimmed = text.trim_end();
    let trimmed = trimmed
        .strip_suffix('=')
        .map(str::trim_end)
        .unwrap_or(trimmed);
    (trimmed.starts_with("${") || trimmed.starts_with("@{")) && trimmed.ends_with('}')
}
