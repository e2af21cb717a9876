use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::ImportError;

/// Load a schedule's raw text. `.txt` files are taken as already-extracted
/// text; anything else is decoded as PDF on the blocking pool, bounded by
/// `timeout`.
pub async fn load_text(path: &Path, timeout: Duration) -> Result<String, ImportError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = if is_plain_text(path) {
        String::from_utf8_lossy(&bytes).into_owned()
    } else {
        decode_pdf(path.to_path_buf(), bytes, timeout).await?
    };

    if text.trim().is_empty() {
        return Err(ImportError::NoText(path.to_path_buf()));
    }
    info!(path = %path.display(), chars = text.chars().count(), "loaded schedule text");
    Ok(text)
}

fn is_plain_text(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

async fn decode_pdf(path: PathBuf, bytes: Vec<u8>, timeout: Duration) -> Result<String, ImportError> {
    debug!(path = %path.display(), bytes = bytes.len(), "decoding PDF");
    let task = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes));

    match tokio::time::timeout(timeout, task).await {
        Err(_) => Err(ImportError::Timeout {
            path,
            secs: timeout.as_secs(),
        }),
        // The decoder panics on some malformed files.
        Ok(Err(join)) => Err(ImportError::Decode {
            path,
            message: join.to_string(),
        }),
        Ok(Ok(Err(e))) => Err(ImportError::Decode {
            path,
            message: e.to_string(),
        }),
        Ok(Ok(Ok(text))) => Ok(text),
    }
}
