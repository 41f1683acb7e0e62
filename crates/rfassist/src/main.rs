//
// main.rs
//
// Inspection CLI: parse a suite file and print its argument structure, or
// resolve its import links against the filesystem.
//

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use url::Url;

use rfassist::document::TextDocument;
use rfassist::hyperlink::LinkDetector;
use rfassist::parse_cache::ParseCache;
use rfassist::parser::RobotFile;
use rfassist::resolve::FsResourceResolver;

fn print_usage() {
    println!(
        "rfassist {}, parsing and linking for Robot Framework suites.",
        env!("CARGO_PKG_VERSION")
    );
    print!(
        r#"
Usage: rfassist [OPTIONS] <SUITE-FILE>

Available options:

--links                      Resolve resource and variable-file imports
--version                    Print the version
--help                       Print this help message

Without options, prints the parsed argument structure of the suite.

"#
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut argv = env::args();
    argv.next(); // skip executable name

    let mut show_links = false;
    let mut suite: Option<PathBuf> = None;

    for arg in argv {
        match arg.as_str() {
            "--links" => show_links = true,
            "--version" => {
                println!("rfassist {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with('-') => {
                return Err(anyhow::anyhow!("Unknown argument: '{other}'"));
            }
            path => {
                if suite.replace(PathBuf::from(path)).is_some() {
                    return Err(anyhow::anyhow!("Expected exactly one suite file"));
                }
            }
        }
    }

    let Some(path) = suite else {
        print_usage();
        return Ok(());
    };

    let text =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;

    if show_links {
        print_links(&path, &text)
    } else {
        print_parse(&text);
        Ok(())
    }
}

/// Dump the parsed line/argument structure, one argument per row.
fn print_parse(text: &str) {
    let file = RobotFile::parse(text);
    for line in file.lines() {
        if line.is_empty() {
            continue;
        }
        println!("line {} [{:?}]", line.line_no(), line.table());
        for argument in line.arguments() {
            println!(
                "  {:>5}  {:<20}  {:?}",
                argument.offset(),
                format!("{:?}", argument.arg_type()),
                argument.value()
            );
        }
    }
}

/// Resolve every import line's target against the filesystem and report
/// which ones link.
fn print_links(path: &Path, text: &str) -> anyhow::Result<()> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("resolving {}", path.display()))?;
    let uri = Url::from_file_path(&absolute)
        .map_err(|_| anyhow::anyhow!("cannot express {} as a file URL", absolute.display()))?;

    let document = TextDocument::new(uri, text, None);
    let cache = ParseCache::new();
    let detector = LinkDetector::default();
    let file = cache.get(&document);

    for line in file.lines() {
        if !line.is_resource_import() && !line.is_variable_import() {
            continue;
        }
        let Some(target_argument) = line.arguments().get(1) else {
            println!("line {}: import with no path", line.line_no());
            continue;
        };
        let links = detector.detect(
            &document,
            &cache,
            &FsResourceResolver,
            target_argument.offset(),
        );
        if links.is_empty() {
            println!(
                "line {}: {:?} does not resolve",
                line.line_no(),
                target_argument.value()
            );
        } else {
            for link in links {
                println!(
                    "line {}: {:?} -> {} ({:?})",
                    line.line_no(),
                    target_argument.value(),
                    link.target,
                    link.kind
                );
            }
        }
    }
    Ok(())
}
