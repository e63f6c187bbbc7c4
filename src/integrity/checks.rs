//! Format checks for each file category.
//!
//! Each check reads the file and answers one question: does the structure
//! parse? A parse failure is a [`CheckError::Decode`]; failing to read the
//! file at all is a [`CheckError::Io`], which callers must not mistake for
//! corruption.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::panic;
use std::path::Path;

use image::{ImageError, ImageReader};
use pdf_extract::{Document, Object};
use thiserror::Error;

/// Outcome of a failed check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The content does not parse as its format.
    #[error("{0}")]
    Decode(String),

    /// The file could not be read.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Parse the document structure and resolve every page object.
///
/// Page content is not interpreted, so fonts or encodings a text extractor
/// cannot handle do not count against a well-formed file.
///
/// # Errors
///
/// [`CheckError::Decode`] on a malformed document or one without pages,
/// [`CheckError::Io`] if the file cannot be read.
pub fn check_pdf(path: &Path) -> Result<(), CheckError> {
    let bytes = fs::read(path)?;

    // lopdf still panics on some malformed input
    let document = match panic::catch_unwind(|| Document::load_mem(&bytes)) {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => return Err(CheckError::Decode(format!("PDF parse failed: {e}"))),
        Err(_) => {
            log::debug!("PDF parser panicked on {}", path.display());
            return Err(CheckError::Decode("PDF parser panicked".to_string()));
        }
    };

    let pages = document.get_pages();
    if pages.is_empty() {
        return Err(CheckError::Decode("PDF has no pages".to_string()));
    }
    for (number, id) in pages {
        document
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|e| CheckError::Decode(format!("PDF page {number} unreadable: {e}")))?;
    }
    Ok(())
}

/// Guess the format from magic bytes and decode the image header.
///
/// Pixel data is not decoded.
///
/// # Errors
///
/// [`CheckError::Decode`] if the format is unknown or the header is
/// malformed or truncated, [`CheckError::Io`] if the file cannot be read.
pub fn check_image(path: &Path) -> Result<(), CheckError> {
    let file = File::open(path)?;
    let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;

    match reader.into_dimensions() {
        Ok(_) => Ok(()),
        Err(ImageError::IoError(e)) if e.kind() != io::ErrorKind::UnexpectedEof => {
            Err(CheckError::Io(e))
        }
        Err(e) => Err(CheckError::Decode(format!("image decode failed: {e}"))),
    }
}

/// Read the whole file and decode it as UTF-8.
///
/// # Errors
///
/// [`CheckError::Decode`] on invalid UTF-8, [`CheckError::Io`] if the file
/// cannot be read.
pub fn check_text(path: &Path) -> Result<(), CheckError> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes)
        .map(|_| ())
        .map_err(|e| CheckError::Decode(format!("invalid UTF-8: {}", e.utf8_error())))
}
