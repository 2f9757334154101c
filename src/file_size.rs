//! File size lookup and formatting for the `{file_size}` placeholder.
use crate::config::{FileSizeConfig, FileSizeStandard};
use crate::debug;
use crate::state::{Document, EditorState};

const IEC_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
const JEDEC_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const SI_UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// Source of document sizes.
///
/// Lookups never fail: anything that cannot be measured is `None`.
#[allow(async_fn_in_trait)]
pub trait FileSizeProvider {
    async fn file_size(&self, document: &Document) -> Option<u64>;
}

/// Measures documents on disk, or their unsaved buffer when dirty
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileSize;

impl FileSizeProvider for FsFileSize {
    async fn file_size(&self, document: &Document) -> Option<u64> {
        if let Some(size) = document.unsaved_size {
            return Some(size);
        }
        match smol::fs::metadata(&document.path).await {
            Ok(metadata) => Some(metadata.len()),
            Err(e) => {
                debug!(
                    "Unable to read size of {}: {}",
                    document.path.to_string_lossy(),
                    e
                );
                None
            }
        }
    }
}

/// Looks up and formats the size of the active document.
///
/// # Returns
/// `None` when the feature is disabled, there is no active editor or the size is unknown.
pub async fn lookup_file_size<F: FileSizeProvider>(
    sizes: &F,
    config: &FileSizeConfig,
    state: &EditorState,
) -> Option<String> {
    if !config.enabled {
        return None;
    }
    let document = state.document()?;
    let bytes = sizes.file_size(document).await?;
    Some(format_file_size(bytes, config))
}

/// Formats a byte count according to the file size settings.
///
/// # Arguments
///
/// * `bytes` - The number of bytes to format
/// * `config` - Standard, rounding and spacer to use
///
/// # Examples
///
/// ```
/// use editor_presence::config::FileSizeConfig;
/// use editor_presence::file_size::format_file_size;
///
/// let config = FileSizeConfig::default();
/// assert_eq!(format_file_size(512, &config), "512 B");
/// assert_eq!(format_file_size(1536, &config), "1.5 KiB");
/// assert_eq!(format_file_size(1024 * 1024, &config), "1 MiB");
/// ```
pub fn format_file_size(bytes: u64, config: &FileSizeConfig) -> String {
    if !config.human_readable {
        return bytes.to_string();
    }

    let (base, units) = match config.standard {
        FileSizeStandard::Iec => (1024_f64, &IEC_UNITS),
        FileSizeStandard::Jedec => (1024_f64, &JEDEC_UNITS),
        FileSizeStandard::Si => (1000_f64, &SI_UNITS),
    };

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= base && unit < units.len() - 1 {
        value /= base;
        unit += 1;
    }

    let factor = 10_f64.powi(config.round as i32);
    let mut rounded = (value * factor).round() / factor;
    // Rounding may reach the next unit (e.g. 1023.999 KiB)
    if rounded >= base && unit < units.len() - 1 {
        rounded /= base;
        unit += 1;
    }

    let number = format!("{:.*}", config.round as usize, rounded);
    let number = if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number
    };

    format!("{}{}{}", number, config.spacer, units[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn config(standard: FileSizeStandard, round: u8, spacer: &str) -> FileSizeConfig {
        FileSizeConfig {
            enabled: true,
            human_readable: true,
            standard,
            round,
            spacer: spacer.to_string(),
        }
    }

    fn document(path: PathBuf, unsaved_size: Option<u64>) -> Document {
        Document {
            path,
            language_id: "plaintext".to_string(),
            line_count: 1,
            unsaved_size,
        }
    }

    #[test]
    fn test_format_iec() {
        let iec = config(FileSizeStandard::Iec, 2, " ");
        assert_eq!(format_file_size(0, &iec), "0 B");
        assert_eq!(format_file_size(1023, &iec), "1023 B");
        assert_eq!(format_file_size(1024, &iec), "1 KiB");
        assert_eq!(format_file_size(1536, &iec), "1.5 KiB");
        assert_eq!(format_file_size(1024 * 1024 * 3 / 2, &iec), "1.5 MiB");
        assert_eq!(format_file_size(1024 * 1024 * 1024, &iec), "1 GiB");
        // Just under 1 MiB rounds up to the next unit
        assert_eq!(format_file_size(1024 * 1024 - 1, &iec), "1 MiB");
    }

    #[test]
    fn test_format_jedec_and_si() {
        assert_eq!(
            format_file_size(2048, &config(FileSizeStandard::Jedec, 2, " ")),
            "2 KB"
        );
        assert_eq!(
            format_file_size(1500, &config(FileSizeStandard::Si, 2, " ")),
            "1.5 kB"
        );
        assert_eq!(
            format_file_size(1_250_000, &config(FileSizeStandard::Si, 1, "")),
            "1.3MB"
        );
    }

    #[test]
    fn test_format_round_and_raw() {
        assert_eq!(
            format_file_size(1587, &config(FileSizeStandard::Iec, 0, " ")),
            "2 KiB"
        );
        assert_eq!(
            format_file_size(1587, &config(FileSizeStandard::Iec, 3, " ")),
            "1.55 KiB"
        );

        let raw = FileSizeConfig {
            human_readable: false,
            ..FileSizeConfig::default()
        };
        assert_eq!(format_file_size(123456, &raw), "123456");
    }

    #[test]
    fn test_fs_size_reads_metadata() -> std::io::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&[b'x'; 2048])?;
        file.flush()?;

        let doc = document(file.path().to_path_buf(), None);
        assert_eq!(smol::block_on(FsFileSize.file_size(&doc)), Some(2048));
        Ok(())
    }

    #[test]
    fn test_fs_size_prefers_unsaved_buffer() {
        let doc = document(PathBuf::from("/does/not/exist.txt"), Some(10));
        assert_eq!(smol::block_on(FsFileSize.file_size(&doc)), Some(10));
    }

    #[test]
    fn test_fs_size_missing_file_is_unavailable() {
        let doc = document(PathBuf::from("/does/not/exist.txt"), None);
        assert_eq!(smol::block_on(FsFileSize.file_size(&doc)), None);
    }

    #[test]
    fn test_lookup_respects_enabled_flag_and_editor() {
        let doc = document(PathBuf::from("/x.txt"), Some(2048));
        let state = EditorState {
            editor: Some(crate::state::ActiveEditor {
                document: doc,
                selection: None,
            }),
            ..Default::default()
        };

        let enabled = FileSizeConfig::default();
        assert_eq!(
            smol::block_on(lookup_file_size(&FsFileSize, &enabled, &state)).as_deref(),
            Some("2 KiB")
        );

        let disabled = FileSizeConfig {
            enabled: false,
            ..FileSizeConfig::default()
        };
        assert_eq!(
            smol::block_on(lookup_file_size(&FsFileSize, &disabled, &state)),
            None
        );

        assert_eq!(
            smol::block_on(lookup_file_size(&FsFileSize, &enabled, &EditorState::default())),
            None
        );
    }
}
