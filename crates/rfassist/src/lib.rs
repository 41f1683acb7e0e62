// lib.rs: the assistance engines and their parsing substrate.
//
// The rfassist binary in main.rs is a thin inspection CLI over this
// library; editor integrations consume the library surface directly.

pub mod completion;
pub mod config;
pub mod document;
pub mod hyperlink;
pub mod parse_cache;
pub mod parser;
pub mod resolve;
