//! Self-hosted OSRM dataset preparation.
//!
//! Downloads a Geofabrik extract and runs the `osrm/osrm-backend` docker
//! image (extract, partition, customize) so `osrm-routed --algorithm mld`
//! can serve it. Used to replace the public demo server in production and
//! by the docker-backed integration test.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

const OSRM_IMAGE: &str = "osrm/osrm-backend";

/// A Geofabrik extract, e.g. `europe/slovakia`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeofabrikExtract {
    pub path: String,
}

impl GeofabrikExtract {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn slovakia() -> Self {
        Self::new("europe/slovakia")
    }

    pub fn czech_republic() -> Self {
        Self::new("europe/czech-republic")
    }

    /// Last path component, used for directory and file names.
    pub fn name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("region")
    }

    pub fn download_url(&self) -> String {
        format!(
            "https://download.geofabrik.de/{}-latest.osm.pbf",
            self.path.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct OsrmDatasetConfig {
    pub extract: GeofabrikExtract,
    pub data_root: PathBuf,
    /// Lua profile inside the image, e.g. `/opt/car.lua`.
    pub profile: String,
}

impl OsrmDatasetConfig {
    pub fn new(extract: GeofabrikExtract, data_root: impl Into<PathBuf>) -> Self {
        Self {
            extract,
            data_root: data_root.into(),
            profile: "/opt/car.lua".to_string(),
        }
    }
}

/// Files of a prepared dataset.
#[derive(Debug, Clone)]
pub struct OsrmDataset {
    pub data_dir: PathBuf,
    pub pbf_path: PathBuf,
    pub osrm_base: PathBuf,
}

impl OsrmDataset {
    pub fn layout(config: &OsrmDatasetConfig, data_root: &Path) -> Self {
        let name = config.extract.name();
        let data_dir = data_root.join(name);
        Self {
            pbf_path: data_dir.join(format!("{}-latest.osm.pbf", name)),
            osrm_base: data_dir.join(format!("{}-latest.osrm", name)),
            data_dir,
        }
    }

    /// Container path of the `.osrm` base, for `osrm-routed`.
    pub fn container_osrm_path(&self) -> String {
        format!("/data/{}", file_name(&self.osrm_base))
    }

    /// True when every file the MLD pipeline produces is present.
    pub fn is_ready(&self) -> bool {
        ["osrm.partition", "osrm.mldgr", "osrm.cells"]
            .iter()
            .all(|extension| self.osrm_base.with_extension(extension).exists())
            && self.osrm_base.exists()
    }

    /// Downloads and preprocesses the extract unless already prepared.
    pub fn ensure(config: &OsrmDatasetConfig) -> Result<Self, OsrmDataError> {
        let data_root = if config.data_root.is_absolute() {
            config.data_root.clone()
        } else {
            std::env::current_dir()?.join(&config.data_root)
        };
        let dataset = Self::layout(config, &data_root);
        fs::create_dir_all(&dataset.data_dir)?;

        if dataset.is_ready() {
            return Ok(dataset);
        }

        if !dataset.pbf_path.exists() {
            info!(url = %config.extract.download_url(), "downloading OSM extract");
            download(&config.extract.download_url(), &dataset.pbf_path)?;
        }

        if !dataset.osrm_base.exists() {
            let pbf = format!("/data/{}", file_name(&dataset.pbf_path));
            run_osrm_tool(&dataset.data_dir, &["osrm-extract", "-p", &config.profile, &pbf])?;
        }

        let base = dataset.container_osrm_path();
        run_osrm_tool(&dataset.data_dir, &["osrm-partition", &base])?;
        run_osrm_tool(&dataset.data_dir, &["osrm-customize", &base])?;

        Ok(dataset)
    }
}

#[derive(Debug)]
pub enum OsrmDataError {
    Io(io::Error),
    Http(reqwest::Error),
    ToolFailed { tool: String, status: String },
}

impl fmt::Display for OsrmDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "dataset I/O failed: {}", err),
            Self::Http(err) => write!(f, "extract download failed: {}", err),
            Self::ToolFailed { tool, status } => write!(f, "{} exited with {}", tool, status),
        }
    }
}

impl std::error::Error for OsrmDataError {}

impl From<io::Error> for OsrmDataError {
    fn from(err: io::Error) -> Self {
        OsrmDataError::Io(err)
    }
}

impl From<reqwest::Error> for OsrmDataError {
    fn from(err: reqwest::Error) -> Self {
        OsrmDataError::Http(err)
    }
}

fn download(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    let partial = dest.with_extension("part");
    let mut writer = BufWriter::new(File::create(&partial)?);
    response.copy_to(&mut writer)?;
    writer.flush()?;
    fs::rename(partial, dest)?;
    Ok(())
}

fn run_osrm_tool(data_dir: &Path, args: &[&str]) -> Result<(), OsrmDataError> {
    let tool = args.first().copied().unwrap_or("osrm");
    info!(tool, dir = %data_dir.display(), "running OSRM preprocessing step");

    let status = Command::new("docker")
        .args(["run", "--rm", "-t", "-v"])
        .arg(format!("{}:/data", data_dir.display()))
        .arg(OSRM_IMAGE)
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmDataError::ToolFailed {
            tool: tool.to_string(),
            status: status.to_string(),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
