use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print every branch, marking the one HEAD points at with `*`
    pub fn list_branches(&self) -> anyhow::Result<()> {
        let branches = self.refs().list_branches()?;

        if branches.is_empty() {
            writeln!(self.writer(), "no branches")?;
            return Ok(());
        }

        let current = self.refs().current_branch()?;
        for branch in branches {
            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(())
    }

    pub fn create_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let _lock = self.lock()?;
        self.refs().create_branch(&branch_name)?;

        writeln!(self.writer(), "Created branch {}", branch_name)?;

        Ok(())
    }

    pub fn delete_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let _lock = self.lock()?;
        let target = self.refs().delete_branch(&branch_name)?;

        writeln!(self.writer(), "Deleted branch {} (was {})", branch_name, target)?;

        Ok(())
    }
}
