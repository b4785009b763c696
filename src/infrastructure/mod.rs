// Infrastructure implementations for refscan: filesystem walk, line counting,
// file scanning, worker pools and JSON output.

pub mod concurrency;
pub mod file_scanner;
pub mod json_exporter;
pub mod line_counter;
pub mod path_collector;

pub use file_scanner::FileScanner;
pub use json_exporter::JsonExporter;
