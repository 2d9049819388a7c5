//! Flat-file artifact store
//!
//! One run writes into a fresh directory:
//!
//! ```text
//! output_<site>_<YYYYmmdd_HHMMSS>/
//!     scraped_content/<name>.txt
//!     scraped_content/manifest.json
//!     summaries/<name>_summary.txt
//!     <site>_FULL_SUMMARY.txt
//!     metadata.json
//! ```

use crate::output::CrawlMetadata;
use crate::storage::traits::{ArtifactStore, RawArtifact, StoreError, StoreResult};
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

const RAW_DIR: &str = "scraped_content";
const SUMMARY_DIR: &str = "summaries";
const MANIFEST_FILE: &str = "manifest.json";
const METADATA_FILE: &str = "metadata.json";

/// Derives the artifact name from a URL path
///
/// Leading and trailing slashes are dropped and inner slashes become `_`;
/// the site root is named `index`. Query strings are ignored.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_digest::storage::artifact_name;
///
/// let url = Url::parse("https://a.test/docs/intro/").unwrap();
/// assert_eq!(artifact_name(&url), "docs_intro");
/// assert_eq!(artifact_name(&Url::parse("https://a.test/").unwrap()), "index");
/// ```
pub fn artifact_name(url: &Url) -> String {
    let trimmed = url.path().trim_matches('/');
    if trimmed.is_empty() {
        "index".to_string()
    } else {
        trimmed.replace('/', "_")
    }
}

/// File name of the site meta-summary, e.g. `example.com_FULL_SUMMARY.txt`
pub fn meta_summary_file_name(site: &str) -> String {
    format!("{}_FULL_SUMMARY.txt", file_safe(site))
}

/// Artifact store backed by a directory tree
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    /// host[:port] of the crawled site
    site: String,
    /// name → source URL for every saved page
    manifest: BTreeMap<String, String>,
}

impl FileStore {
    /// Creates a fresh timestamped output directory under `base_dir`
    pub fn create(base_dir: &Path, seed: &Url) -> StoreResult<Self> {
        let site = crate::url::site_label(seed).ok_or_else(|| StoreError::InvalidUrl {
            name: seed.to_string(),
            reason: "URL has no host".to_string(),
        })?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let root = base_dir.join(format!("output_{}_{}", file_safe(&site), timestamp));

        for dir in [root.join(RAW_DIR), root.join(SUMMARY_DIR)] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }
        debug!("Created output directory {}", root.display());

        Ok(Self {
            root,
            site,
            manifest: BTreeMap::new(),
        })
    }

    /// Reopens an existing output directory
    ///
    /// `site` is the host (with optional port) the directory was created for.
    pub fn open(dir: &Path, site: &str) -> StoreResult<Self> {
        if !dir.is_dir() {
            return Err(StoreError::MissingDirectory(dir.to_path_buf()));
        }

        let manifest_path = dir.join(RAW_DIR).join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            let content = fs::read_to_string(&manifest_path)
                .map_err(|e| StoreError::io(&manifest_path, e))?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            root: dir.to_path_buf(),
            site: site.to_string(),
            manifest,
        })
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    fn meta_summary_path(&self) -> PathBuf {
        self.root.join(meta_summary_file_name(&self.site))
    }

    fn write_manifest(&self) -> StoreResult<()> {
        let path = self.root.join(RAW_DIR).join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&self.manifest)?;
        write_file(&path, &json)
    }

    fn fallback_url(&self, name: &str) -> StoreResult<Url> {
        let raw = format!("https://{}/{}", self.site, name);
        Url::parse(&raw).map_err(|e| StoreError::InvalidUrl {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl ArtifactStore for FileStore {
    fn location(&self) -> &Path {
        &self.root
    }

    fn save_raw(&mut self, url: &Url, content: &str) -> StoreResult<PathBuf> {
        let name = artifact_name(url);
        let path = self.root.join(RAW_DIR).join(format!("{name}.txt"));

        if let Some(previous) = self.manifest.get(&name) {
            if previous != url.as_str() {
                warn!("{} overwrites artifact '{}' from {}", url, name, previous);
            }
        }

        write_file(&path, content)?;
        self.manifest.insert(name, url.to_string());
        self.write_manifest()?;
        Ok(path)
    }

    fn read_raw(&self, artifact: &RawArtifact) -> StoreResult<String> {
        fs::read_to_string(&artifact.path).map_err(|e| StoreError::io(&artifact.path, e))
    }

    fn list_raw_artifacts(&self) -> StoreResult<Vec<RawArtifact>> {
        let dir = self.root.join(RAW_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut artifacts = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))? {
            let path = entry.map_err(|e| StoreError::io(&dir, e))?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            let url = match self.manifest.get(&name).map(|u| Url::parse(u)) {
                Some(Ok(url)) => url,
                _ => self.fallback_url(&name)?,
            };
            artifacts.push(RawArtifact { name, url, path });
        }

        artifacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(artifacts)
    }

    fn save_summary(&mut self, url: &Url, summary: &str) -> StoreResult<PathBuf> {
        let path = self
            .root
            .join(SUMMARY_DIR)
            .join(format!("{}_summary.txt", artifact_name(url)));
        write_file(&path, summary)?;
        Ok(path)
    }

    fn save_meta_summary(&mut self, meta_summary: &str) -> StoreResult<PathBuf> {
        let path = self.meta_summary_path();
        write_file(&path, meta_summary)?;
        Ok(path)
    }

    fn meta_summary_exists(&self) -> bool {
        self.meta_summary_path().is_file()
    }

    fn save_metadata(&mut self, metadata: &CrawlMetadata) -> StoreResult<PathBuf> {
        let path = self.root.join(METADATA_FILE);
        let json = serde_json::to_string_pretty(metadata)?;
        write_file(&path, &json)?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| StoreError::io(path, e))
}

// Ports are written with ':' in URLs, which some filesystems reject
fn file_safe(site: &str) -> String {
    site.replace(':', "_")
}
