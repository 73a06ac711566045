//! Directory-backed trace sink.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use metagraph_common::utils::error::Result;
use metagraph_engine::{PairTraceDump, TraceSink};

/// Writes each pair's meta-paths to `<dir>/<dump file name>`.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates the directory if needed.
    pub fn create(dir: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }
}

impl TraceSink for DirectorySink {
    fn write_pair(&self, dump: &PairTraceDump<'_>) -> Result<()> {
        let file = File::create(self.dir.join(dump.file_name()))?;
        let mut writer = BufWriter::new(file);
        dump.write_lines(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
