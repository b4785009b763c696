// Core domain types for refscan: languages, source files, references and the dependency graph.

pub mod graph;
pub mod language;
pub mod reference;
pub mod source_file;
