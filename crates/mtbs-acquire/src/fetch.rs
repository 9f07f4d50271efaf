//! HTTP fetcher for dataset archives.
//!
//! The whole response body is buffered in memory before it is written, which
//! is fine for the archive sizes involved (tens of megabytes) but would need
//! streaming for anything much larger.

use crate::{AcquireError, Result};
use reqwest::StatusCode;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::{debug, info};

/// Something that can retrieve a remote resource into a local file.
pub trait Fetch {
    /// Download `url` into `destination`, creating parent directories as needed.
    ///
    /// Returns the number of bytes written. On failure no file is left at
    /// `destination`.
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64>;
}

/// Download statistics for the fetcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Number of files downloaded this session.
    pub files_downloaded: usize,
    /// Total bytes downloaded this session.
    pub bytes_downloaded: u64,
}

/// Blocking HTTP(S) fetcher backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    files_downloaded: AtomicUsize,
    bytes_downloaded: AtomicU64,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("stats", &self.download_stats())
            .finish()
    }
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mtbs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            files_downloaded: AtomicUsize::new(0),
            bytes_downloaded: AtomicU64::new(0),
        }
    }

    /// Get download statistics for this session.
    pub fn download_stats(&self) -> DownloadStats {
        DownloadStats {
            files_downloaded: self.files_downloaded.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        info!("Downloading {} to {}", url, destination.display());
        let response = self.client.get(url).send()?;

        if response.status() != StatusCode::OK {
            return Err(AcquireError::Transport {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes()?;

        let part = part_path(destination);
        let written = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&part)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(&part, destination)
        })();
        if let Err(e) = written {
            let _ = fs::remove_file(&part);
            return Err(e.into());
        }

        self.files_downloaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_downloaded
            .fetch_add(bytes.len() as u64, Ordering::Relaxed);
        debug!("Wrote {} bytes to {}", bytes.len(), destination.display());

        Ok(bytes.len() as u64)
    }
}

/// Sibling path the body is staged in before being renamed into place.
fn part_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
