//! File references and local upload handles.

use crate::errors::{ValidationError, WebexError, WebexResult};
use crate::transport::FileUpload;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::trace;
use url::Url;

/// Where the file attached to a message comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReference {
    /// Publicly reachable URL; the service fetches it
    WebUrl(Url),
    /// Existing local file; uploaded as multipart
    LocalFile(PathBuf),
}

impl FileReference {
    /// Classify a `files` entry
    ///
    /// Fails with [`ValidationError::InvalidFileReference`] when the entry is
    /// neither a web URL nor an existing local file.
    pub fn classify(value: &str) -> WebexResult<Self> {
        if let Some(url) = parse_web_url(value) {
            return Ok(Self::WebUrl(url));
        }
        if is_local_file(value) {
            return Ok(Self::LocalFile(PathBuf::from(value)));
        }
        Err(WebexError::Validation(ValidationError::InvalidFileReference {
            value: value.to_string(),
        }))
    }
}

fn parse_web_url(value: &str) -> Option<Url> {
    let url = Url::parse(value).ok()?;
    let scheme_ok = matches!(url.scheme(), "http" | "https");
    let has_host = url.host_str().map(|h| !h.is_empty()).unwrap_or(false);
    (scheme_ok && has_host).then_some(url)
}

/// True for an `http`/`https` URL with a host
pub fn is_web_url(value: &str) -> bool {
    parse_web_url(value).is_some()
}

/// True for a path naming an existing regular file
pub fn is_local_file(value: &str) -> bool {
    Path::new(value).is_file()
}

/// Open local file used for one multipart upload
///
/// The descriptor is closed when the handle is dropped, which covers
/// success, error returns and cancellation of the awaiting task.
#[derive(Debug)]
pub struct LocalFile {
    file: tokio::fs::File,
    file_name: String,
    path: PathBuf,
}

impl LocalFile {
    /// Open a local file
    pub async fn open(path: impl AsRef<Path>) -> WebexResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                WebexError::invalid_argument(
                    "files",
                    format!("{} has no file name", path.display()),
                )
            })?;
        let file = tokio::fs::File::open(&path).await?;
        trace!(path = %path.display(), "Opened local file");
        Ok(Self {
            file,
            file_name,
            path,
        })
    }

    /// Original file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file content into an upload part
    pub async fn read_upload(&mut self, field_name: &str) -> WebexResult<FileUpload> {
        let mut content = Vec::new();
        self.file.read_to_end(&mut content).await?;
        Ok(FileUpload::new(field_name, self.file_name.clone(), content))
    }
}

impl Drop for LocalFile {
    fn drop(&mut self) {
        trace!(path = %self.path.display(), "Closing local file");
    }
}
