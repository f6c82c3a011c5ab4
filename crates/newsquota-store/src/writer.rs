use std::fs::Permissions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::dataset::{Record, LABEL_COLUMN, SOURCE_COLUMN, TEXT_COLUMN, URL_COLUMN};
use crate::error::StoreError;

/// Destination of dataset checkpoints.
///
/// Every write goes to a temporary file next to the destination which is then
/// renamed over it, so an interrupted process leaves either the previous or the
/// new content, never a truncated file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    bom: bool,
}

impl CsvStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            bom: true,
        }
    }

    /// Whether a UTF-8 byte order mark is written first (the default), which
    /// spreadsheet tools rely on to detect the encoding.
    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn persist<'a, I>(&self, records: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".newsquota-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        if let Some(permissions) = self.target_permissions()? {
            tmp.as_file().set_permissions(permissions)?;
        }

        if self.bom {
            tmp.write_all("\u{feff}".as_bytes())?;
        }

        let mut written = 0;
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            wtr.write_record([TEXT_COLUMN, LABEL_COLUMN, SOURCE_COLUMN, URL_COLUMN])?;
            for record in records {
                wtr.serialize(record)?;
                written += 1;
            }
            wtr.flush()?;
        }
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path).map_err(|e| e.error)?;
        log::debug!("Persisted {written} rows to {}", self.path.display());

        Ok(written)
    }

    /// Mode the renamed file must end up with: the current one when the
    /// destination exists, a world readable one otherwise.
    fn target_permissions(&self) -> Result<Option<Permissions>, StoreError> {
        match fs_err::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.permissions())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
