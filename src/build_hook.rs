//! Writes resolved version data into build outputs.
//!
//! Packaging steps call into this module after a successful resolution so
//! that built distributions carry a static version file and no longer need
//! git. The resolver itself never writes anything.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::VersionData;
use crate::error::Result;
use crate::get_data;
use crate::sources::StaticVersionFile;

/// Packaging steps that embed a static version file
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BuildStep {
    /// Building the package into a build tree, where `src/` layouts are flattened
    Build,
    /// Assembling a source distribution, which keeps the source layout
    Sdist,
}

impl BuildStep {
    pub fn name(&self) -> &'static str {
        match self {
            BuildStep::Build => "build",
            BuildStep::Sdist => "sdist",
        }
    }

    /// Where the static file goes for a package at `package_path`
    /// (relative to the project) inside `output_dir`.
    pub fn target_path(
        &self,
        output_dir: &Path,
        package_path: &Path,
        static_file: &Path,
    ) -> PathBuf {
        let package_path = match self {
            BuildStep::Build => strip_src_prefix(package_path),
            BuildStep::Sdist => package_path,
        };
        output_dir.join(package_path).join(static_file)
    }
}

/// Map `src/<pkg>` to `<pkg>`; other paths are returned unchanged
pub fn strip_src_prefix(package_path: &Path) -> &Path {
    package_path.strip_prefix("src").unwrap_or(package_path)
}

/// Replace the file at `path` with the rendered version data.
///
/// Parent directories are created as needed.
pub fn write_static_file(path: &Path, data: &VersionData) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = StaticVersionFile::from(data).render()?;
    fs::write(path, contents)?;
    Ok(())
}

/// Resolve the version for `config` and write it for a packaging step.
///
/// # Returns
/// * `Ok((path, data))` - The written file and the data it contains
/// * `Err` - If the file cannot be written
pub fn run(
    step: BuildStep,
    output_dir: &Path,
    package_path: &Path,
    config: &Config,
) -> Result<(PathBuf, VersionData)> {
    let data = get_data(config);
    let path = step.target_path(output_dir, package_path, &config.static_file);
    write_static_file(&path, &data)?;
    Ok((path, data))
}
