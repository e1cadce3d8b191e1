use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;

impl Repository {
    /// Pretty-print one stored commit, by full or abbreviated id
    pub fn cat_file(&self, revision: &str) -> anyhow::Result<()> {
        let id = self.database().resolve(revision)?;
        let commit = self.database().read(&id)?;

        writeln!(self.writer(), "{}", commit.display())?;

        Ok(())
    }
}
