//
// completion.rs
//
// Context-aware completion: classify the argument under (or about to be
// born at) the cursor, then ask the pluggable generator for candidates.
//

use url::Url;

use crate::document::TextDocument;
use crate::parse_cache::ParseCache;
use crate::parser::{ArgumentType, ParsedString};
use crate::resolve::ResourceResolver;

/// Characters whose typing should trigger completion without an explicit
/// request: the variable sigils.
pub const AUTO_ACTIVATION_CHARS: [char; 2] = ['$', '@'];

/// One completion candidate, ready for a client to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// Text shown in the completion list.
    pub label: String,
    /// Text inserted when the proposal is accepted.
    pub replacement: String,
    /// Optional qualifier, such as the file a keyword comes from.
    pub detail: Option<String>,
}

/// Source of completion candidates.
///
/// The engine decides *which* categories apply at the cursor; the
/// generator decides *what* the candidates in each category are. `file`
/// is the document's backing file when it has one, for generators that
/// scope their suggestions.
pub trait ProposalGenerator {
    fn add_keyword_proposals(
        &self,
        file: Option<&Url>,
        argument: &ParsedString,
        offset: usize,
        proposals: &mut Vec<Proposal>,
    );

    fn add_variable_proposals(
        &self,
        file: Option<&Url>,
        argument: &ParsedString,
        offset: usize,
        proposals: &mut Vec<Proposal>,
    );
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Categories {
    keywords: bool,
    variables: bool,
}

/// Which proposal categories an argument role is eligible for.
fn proposal_categories(arg_type: ArgumentType) -> Categories {
    match arg_type {
        ArgumentType::KeywordCall => Categories {
            keywords: true,
            variables: false,
        },
        ArgumentType::KeywordCallDynamic => Categories {
            keywords: true,
            variables: true,
        },
        // TODO: narrow VariableVal to variables defined earlier in the
        // same file; today every value slot gets the full variable set.
        ArgumentType::KeywordArg
        | ArgumentType::SettingVal
        | ArgumentType::SettingFile
        | ArgumentType::SettingFileArg
        | ArgumentType::VariableVal => Categories {
            keywords: false,
            variables: true,
        },
        _ => Categories::default(),
    }
}

/// Compute completion proposals for a cursor position.
///
/// The argument under the cursor decides everything. When the cursor sits
/// in separator whitespace or at a line end where no argument exists yet,
/// the parser's phantom classification stands in for the argument the
/// next keystroke would create, so completion works in empty space too.
///
/// Returns `None` for out-of-range offsets, for argument roles with no
/// eligible categories, and when the generator produces nothing; an empty
/// proposal list is never returned.
pub fn compute_proposals(
    document: &TextDocument,
    cache: &ParseCache,
    resolver: &dyn ResourceResolver,
    generator: &dyn ProposalGenerator,
    offset: usize,
) -> Option<Vec<Proposal>> {
    let line_no = match document.line_of_offset(offset) {
        Ok(line_no) => line_no,
        Err(bad) => {
            log::trace!("no proposals: {bad}");
            return None;
        }
    };

    let file = cache.get(document);
    let argument = match file.line(line_no).and_then(|line| line.argument_at(offset)) {
        Some(argument) => argument.clone(),
        None => file.phantom_argument(&document.text(), line_no, offset),
    };
    log::trace!(
        "completion context at offset {}: {:?} {:?}",
        offset,
        argument.arg_type(),
        argument.value()
    );

    let categories = proposal_categories(argument.arg_type());
    if !categories.keywords && !categories.variables {
        return None;
    }

    let backing_file = resolver.file_for(document.uri());
    let mut proposals = Vec::new();
    if categories.keywords {
        generator.add_keyword_proposals(backing_file.as_ref(), &argument, offset, &mut proposals);
    }
    if categories.variables {
        generator.add_variable_proposals(backing_file.as_ref(), &argument, offset, &mut proposals);
    }

    if proposals.is_empty() {
        None
    } else {
        log::debug!("{} proposals at offset {}", proposals.len(), offset);
        Some(proposals)
    }
}
