//
// hyperlink.rs
//
// Hyperlink detection: find the argument under the cursor, then let each
// registered link rule decide whether it points somewhere.
//

use url::Url;

use crate::config::AssistConfig;
use crate::document::TextDocument;
use crate::parse_cache::ParseCache;
use crate::parser::{ParsedString, RobotLine};
use crate::resolve::ResourceResolver;

/// What a link target is, for labeling the navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A whole resource file of keywords and variables.
    ResourceFile,
    /// A variable file.
    VariableFile,
}

/// A navigable region of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Char offset where the link region starts.
    pub offset: usize,
    /// Char length of the region: the raw argument text, escapes and all.
    pub length: usize,
    pub target: Url,
    pub kind: LinkKind,
}

/// Everything a link rule may consult for one cursor position.
pub struct LinkContext<'a> {
    pub document: &'a TextDocument,
    pub resolver: &'a dyn ResourceResolver,
    pub line: &'a RobotLine,
    pub argument: &'a ParsedString,
    pub offset: usize,
}

/// One kind of link. Rules are consulted independently by the shared
/// traversal; each contributes zero or more links for the position.
pub trait LinkRule {
    fn links(&self, ctx: &LinkContext<'_>) -> Vec<Hyperlink>;
}

/// Runs the registered link rules over the argument under the cursor.
pub struct LinkDetector {
    rules: Vec<Box<dyn LinkRule>>,
}

impl LinkDetector {
    /// A detector with no rules. Useful as a base for custom rule sets.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn push_rule(&mut self, rule: Box<dyn LinkRule>) {
        self.rules.push(rule);
    }

    /// The built-in rule set, honoring the configured toggles.
    pub fn from_config(config: &AssistConfig) -> Self {
        let mut detector = Self::new();
        if config.resource_links {
            detector.push_rule(Box::new(ResourceImportRule));
        }
        if config.variable_file_links {
            detector.push_rule(Box::new(VariableImportRule));
        }
        detector
    }

    /// All links for the given cursor position.
    ///
    /// Links attach only to real arguments: a cursor in whitespace, out
    /// of bounds, or on an empty line yields nothing. Resolution failures
    /// and missing targets also yield nothing; none of these are errors.
    pub fn detect(
        &self,
        document: &TextDocument,
        cache: &ParseCache,
        resolver: &dyn ResourceResolver,
        offset: usize,
    ) -> Vec<Hyperlink> {
        let Ok(line_no) = document.line_of_offset(offset) else {
            return Vec::new();
        };
        let file = cache.get(document);
        let Some(line) = file.line(line_no) else {
            return Vec::new();
        };
        let Some(argument) = line.argument_at(offset) else {
            return Vec::new();
        };
        let ctx = LinkContext {
            document,
            resolver,
            line,
            argument,
            offset,
        };
        let mut links = Vec::new();
        for rule in &self.rules {
            links.extend(rule.links(&ctx));
        }
        if !links.is_empty() {
            log::debug!("{} links at offset {}", links.len(), offset);
        }
        links
    }
}

impl Default for LinkDetector {
    fn default() -> Self {
        Self::from_config(&AssistConfig::default())
    }
}

/// Links on `Resource` import paths.
pub struct ResourceImportRule;

impl LinkRule for ResourceImportRule {
    fn links(&self, ctx: &LinkContext<'_>) -> Vec<Hyperlink> {
        if !ctx.line.is_resource_import() {
            return Vec::new();
        }
        import_target_link(ctx, LinkKind::ResourceFile)
            .into_iter()
            .collect()
    }
}

/// Links on `Variables` import paths.
pub struct VariableImportRule;

impl LinkRule for VariableImportRule {
    fn links(&self, ctx: &LinkContext<'_>) -> Vec<Hyperlink> {
        if !ctx.line.is_variable_import() {
            return Vec::new();
        }
        import_target_link(ctx, LinkKind::VariableFile)
            .into_iter()
            .collect()
    }
}

/// The link an import line offers: the second cell only, its unescaped
/// value resolved beside the document's backing file, and only when the
/// target exists. The emitted region spans the raw argument text.
fn import_target_link(ctx: &LinkContext<'_>, kind: LinkKind) -> Option<Hyperlink> {
    let target_argument = ctx.line.arguments().get(1)?;
    if target_argument.offset() != ctx.argument.offset() {
        return None;
    }
    let base = ctx.resolver.file_for(ctx.document.uri())?;
    let target = ctx
        .resolver
        .resolve_relative(&base, &target_argument.unescaped_value())?;
    if !ctx.resolver.exists(&target) {
        log::trace!("import target {target} does not exist, not linking");
        return None;
    }
    Some(Hyperlink {
        offset: target_argument.offset(),
        length: target_argument.char_len(),
        target,
        kind,
    })
}
