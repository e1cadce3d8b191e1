use std::fmt;

/// The `[core]` block written to `.dotgit/config` on init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub repository_format_version: u32,
    pub file_mode: bool,
    pub bare: bool,
    pub log_all_ref_updates: bool,
    pub symlinks: bool,
    pub ignore_case: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            repository_format_version: 0,
            file_mode: false,
            bare: false,
            log_all_ref_updates: true,
            symlinks: false,
            ignore_case: true,
        }
    }
}

impl fmt::Display for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[core]")?;
        writeln!(
            f,
            "\trepositoryformatversion = {}",
            self.repository_format_version
        )?;
        writeln!(f, "\tfilemode = {}", self.file_mode)?;
        writeln!(f, "\tbare = {}", self.bare)?;
        writeln!(f, "\tlogallrefupdates = {}", self.log_all_ref_updates)?;
        writeln!(f, "\tsymlinks = {}", self.symlinks)?;
        writeln!(f, "\tignorecase = {}", self.ignore_case)
    }
}
