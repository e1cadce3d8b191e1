use crate::artifacts::ignore::{DEFAULT_IGNORE_RULES, IGNORE_FILE_NAME};
use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, warn};

/// Effective ignore rules for one invocation
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    rules: Vec<String>,
    matcher: Gitignore,
}

impl IgnoreRules {
    /// The fixed defaults, with no user rules
    pub fn with_defaults(root: &Path) -> anyhow::Result<Self> {
        Self::build(
            root,
            DEFAULT_IGNORE_RULES.iter().map(|rule| rule.to_string()).collect(),
        )
    }

    /// The defaults extended with `<root>/.dotgitignore`
    ///
    /// Blank lines and `#` comments are skipped. A missing file is not an
    /// error; any other read failure is logged and the defaults are kept.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let mut rules = DEFAULT_IGNORE_RULES
            .iter()
            .map(|rule| rule.to_string())
            .collect::<Vec<_>>();

        let ignore_file = root.join(IGNORE_FILE_NAME);
        match std::fs::read_to_string(&ignore_file) {
            Ok(content) => {
                let user_rules = Self::parse_rules(&content);
                debug!(count = user_rules.len(), path = %ignore_file.display(), "loaded user ignore rules");
                rules.extend(user_rules);
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                warn!(path = %ignore_file.display(), %error, "failed to load ignore file");
            }
        }

        Self::build(root, rules)
    }

    fn parse_rules(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    /// Invalid glob lines are logged and dropped; the remaining rules apply.
    fn build(root: &Path, rules: Vec<String>) -> anyhow::Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut accepted = Vec::with_capacity(rules.len());
        for rule in rules {
            match builder.add_line(None, &rule) {
                Ok(_) => accepted.push(rule),
                Err(error) => warn!(%rule, %error, "skipping invalid ignore rule"),
            }
        }
        let matcher = builder.build().context("Unable to build ignore rules")?;

        Ok(IgnoreRules {
            rules: accepted,
            matcher,
        })
    }

    /// Whether `relative_path` (relative to the working-tree root) is excluded
    pub fn is_ignored(&self, relative_path: &Path, is_dir: bool) -> bool {
        if relative_path.as_os_str().is_empty() || relative_path.has_root() {
            return false;
        }

        self.matcher
            .matched_path_or_any_parents(relative_path, is_dir)
            .is_ignore()
    }

    /// Rule lines in the order they were added
    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}
