//! Input stream selection.
//!
//! A file is opened once and closed when the [`Input`] is dropped, on every
//! exit path. Standard input is borrowed and never closed.

use std::fs::{self, File};
use std::io::{self, Read, Stdin};
use std::path::{Path, PathBuf};

/// Where input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` or no argument selects standard input.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(PathBuf::from(path)),
        }
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Errors raised while opening the input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}: unrecognized file type")]
    FileType { path: String },
}

/// An open input stream.
#[derive(Debug)]
pub enum Input {
    Stdin(Stdin),
    File(File),
}

impl Input {
    /// Open `source`, accepting regular files and FIFOs (symlinks are followed).
    pub fn open(source: &InputSource) -> Result<Self, InputError> {
        match source {
            InputSource::Stdin => Ok(Input::Stdin(io::stdin())),
            InputSource::File(path) => open_file(path).map(Input::File),
        }
    }
}

fn open_file(path: &Path) -> Result<File, InputError> {
    let name = || path.display().to_string();
    let metadata = fs::metadata(path).map_err(|source| InputError::Open {
        path: name(),
        source,
    })?;
    if !is_readable_type(&metadata.file_type()) {
        return Err(InputError::FileType { path: name() });
    }
    let file = File::open(path).map_err(|source| InputError::Open {
        path: name(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Opened input file");
    Ok(file)
}

#[cfg(unix)]
fn is_readable_type(file_type: &fs::FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_file() || file_type.is_fifo()
}

#[cfg(not(unix))]
fn is_readable_type(file_type: &fs::FileType) -> bool {
    file_type.is_file()
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Stdin(stdin) => stdin.read(buf),
            Input::File(file) => file.read(buf),
        }
    }
}
