//! Path exclusion rules consulted by `add`
//!
//! A fixed default rule set is built fresh for every invocation and extended
//! with the lines of `.dotgitignore` at the working-tree root. Matching follows
//! gitignore semantics: a path is excluded when it or any of its parent
//! directories matches a rule.

pub mod ignore_rules;

/// Name of the user-supplied rules file at the working-tree root
pub const IGNORE_FILE_NAME: &str = ".dotgitignore";

pub const DEFAULT_IGNORE_RULES: [&str; 11] = [
    ".dotgit/",
    ".dotgitignore",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "node_modules/",
    "npm-debug.log",
    "*.swp",
    "*~",
    ".idea/",
    ".vscode/",
];
