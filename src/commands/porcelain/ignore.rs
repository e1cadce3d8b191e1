use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the effective ignore rules: defaults first, then `.dotgitignore`
    pub fn show_ignore_rules(&self) -> anyhow::Result<()> {
        let rules = self.ignore_rules()?;

        writeln!(self.writer(), "Current ignore rules:")?;
        for rule in rules.rules() {
            writeln!(self.writer(), "- {}", rule)?;
        }

        Ok(())
    }
}
