/// Language Domain Module
///
/// Defines the languages refscan can scan and the call pattern injected for each.

use std::path::Path;
use std::str::FromStr;

/// Call-expression pattern for Python: `identifier . identifier (`, whitespace-tolerant.
pub const PYTHON_PATTERN: &str = r"(?-u)\b\w+\s*\.\s*\w+\s*\(";

/// Call-expression pattern for PL/SQL package bodies: `identifier.identifier(`.
pub const PLSQL_PATTERN: &str =
    r"(?-u)\b([a-zA-Z_][a-zA-Z0-9_]*)\.([a-zA-Z_][a-zA-Z0-9_]*)\s*\(";

/// Supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Plsql,
}

/// Pattern configuration for one language: which files to scan and what a call looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePattern {
    pub extension: &'static str,
    pub pattern: &'static str,
}

impl Language {
    /// Get the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Plsql => "PL/SQL",
        }
    }

    /// File extension (without the dot) of files scanned for this language.
    pub fn extension(&self) -> &'static str {
        self.pattern().extension
    }

    pub fn pattern(&self) -> ReferencePattern {
        match self {
            Language::Python => ReferencePattern {
                extension: "py",
                pattern: PYTHON_PATTERN,
            },
            Language::Plsql => ReferencePattern {
                extension: "pkb",
                pattern: PLSQL_PATTERN,
            },
        }
    }

    /// True when `path` carries exactly this language's extension.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == self.extension())
            .unwrap_or(false)
    }
}

impl FromStr for Language {
    type Err = String;

    /// Parse the CLI language selector. Only the exact names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "plsql" => Ok(Language::Plsql),
            other => Err(format!(
                "unsupported language '{}' (expected 'python' or 'plsql')",
                other
            )),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
