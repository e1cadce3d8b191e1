//! Shared utilities
//!
//! - `config`: the default `[core]` configuration block
//! - `errors`: the repository error taxonomy
//! - `PagerWriter`: `Write` adapter over the `minus` pager used by `log`
//! - `write_atomically`: temp-file + rename writes for index, objects and refs

pub mod config;
pub mod errors;

use anyhow::Context;
use derive_new::new;
use minus::Pager;
use std::io::{self, Write};
use std::path::Path;

/// Wrapper that implements `Write` for the minus pager
///
/// `log` output can be long, so when stdout is interactive the repository
/// writer is swapped for this adapter and the pager is run once the command
/// has finished writing.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replace `target` with `content` in a single rename.
///
/// The content is first written to a sibling temp file, so readers see either
/// the old or the new file, never a partial one.
pub fn write_atomically(target: &Path, content: &[u8]) -> anyhow::Result<()> {
    let parent = target
        .parent()
        .with_context(|| format!("Invalid target path {}", target.display()))?;
    let temp_path = parent.join(generate_temp_name());

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("Unable to open temp file {}", temp_path.display()))?;

    let written = file
        .write_all(content)
        .and_then(|_| file.sync_all())
        .with_context(|| format!("Unable to write temp file {}", temp_path.display()));
    drop(file);

    if let Err(error) = written {
        let _ = std::fs::remove_file(&temp_path);
        return Err(error);
    }

    if let Err(error) = std::fs::rename(&temp_path, target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(error)
            .with_context(|| format!("Unable to rename temp file to {}", target.display()));
    }

    Ok(())
}

/// Prefix shared by every temp file, so directory scans can skip them.
pub const TEMP_FILE_PREFIX: &str = "tmp-";

fn generate_temp_name() -> String {
    format!("{TEMP_FILE_PREFIX}{}", rand::random::<u32>())
}
