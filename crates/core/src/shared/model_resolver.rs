use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("model {name} not found (searched: {})", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve a model file by name.
///
/// Resolution order:
/// 1. `search_dirs`, in the order given (explicit user directories first)
/// 2. User cache directory (platform-specific)
/// 3. Download from `url` into the cache, when a URL is known
///
/// Models without a download source yield [`ModelResolveError::NotFound`].
pub fn resolve(
    name: &str,
    url: Option<&str>,
    search_dirs: &[&Path],
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let mut searched = Vec::with_capacity(search_dirs.len() + 1);
    for dir in search_dirs {
        let candidate = dir.join(name);
        if candidate.exists() {
            log::debug!("Model {name} found at {}", candidate.display());
            return Ok(candidate);
        }
        searched.push(candidate);
    }

    let cache_dir = model_cache_dir()?;
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        log::debug!("Model {name} found in cache");
        return Ok(cached_path);
    }
    searched.push(cached_path.clone());

    let Some(url) = url else {
        return Err(ModelResolveError::NotFound {
            name: name.to_string(),
            searched,
        });
    };

    log::info!("Downloading {name} from {url}");
    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/Passport Crop/models/`
/// - Linux: `$XDG_CACHE_HOME/Passport Crop/models/` or `~/.cache/Passport Crop/models/`
/// - Windows: `%LOCALAPPDATA%/Passport Crop/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("Passport Crop").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("Passport Crop").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    // Write to a temp file first, then rename so a failed download never
    // leaves a truncated model in the cache.
    let temp_path = dest.with_extension("part");
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ModelResolveError::Write { path, source }
    };
    let mut file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;

    let mut downloaded: u64 = 0;
    for chunk in bytes.chunks(1024 * 1024) {
        file.write_all(chunk).map_err(write_err(&temp_path))?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush().map_err(write_err(&temp_path))?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(write_err(dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MISSING: &str = "passport-crop-test-missing-model.onnx";

    #[test]
    fn test_resolve_prefers_first_search_dir() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("m.onnx"), b"a").unwrap();
        fs::write(second.join("m.onnx"), b"b").unwrap();

        let path = resolve("m.onnx", None, &[&first, &second], None).unwrap();
        assert_eq!(path, first.join("m.onnx"));
    }

    #[test]
    fn test_resolve_skips_dirs_without_model() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        let bundled = tmp.path().join("bundled");
        fs::create_dir_all(&empty).unwrap();
        fs::create_dir_all(&bundled).unwrap();
        fs::write(bundled.join("m.onnx"), b"bundled model").unwrap();

        let path = resolve("m.onnx", None, &[&empty, &bundled], None).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"bundled model");
    }

    #[test]
    fn test_resolve_without_url_reports_searched_paths() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(MISSING, None, &[tmp.path()], None).unwrap_err();
        match err {
            ModelResolveError::NotFound { name, searched } => {
                assert_eq!(name, MISSING);
                assert_eq!(searched[0], tmp.path().join(MISSING));
                assert_eq!(searched.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_found_message_lists_paths() {
        let err = ModelResolveError::NotFound {
            name: "m.onnx".into(),
            searched: vec![PathBuf::from("/a/m.onnx"), PathBuf::from("/b/m.onnx")],
        };
        assert_eq!(
            err.to_string(),
            "model m.onnx not found (searched: /a/m.onnx, /b/m.onnx)"
        );
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("Passport Crop"));
        assert!(path.ends_with("models"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(matches!(result, Err(ModelResolveError::Download { .. })));
    }

    #[test]
    fn test_download_atomic_no_partial_on_failure() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let _ = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
