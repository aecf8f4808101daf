//! Utility functions for error handling
//!
//! File helpers that attach the path and the purpose of the access to
//! any failure, so load and write errors read well at the CLI.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{EdFlowError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(EdFlowError::file(
            path,
            format!("File not found (needed for {purpose})"),
        ));
    }

    if !path.is_file() {
        return Err(EdFlowError::file(
            path,
            format!("Path is not a file (expected a file for {purpose})"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for {purpose}"),
        };
        EdFlowError::file_with_source(path, context, e)
    })
}

/// Create (or truncate) a file for writing, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                EdFlowError::file_with_source(
                    parent,
                    format!("Failed to create output directory for {purpose}"),
                    e,
                )
            })?;
        }
    }

    fs::File::create(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check directory permissions".to_string()
            }
            _ => format!("Failed to create file for {purpose}"),
        };
        EdFlowError::file_with_source(path, context, e)
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::InvalidData => {
                "File contains invalid UTF-8 data - cannot read as text".to_string()
            }
            _ => format!("Failed to read file content for {purpose}"),
        };
        EdFlowError::file_with_source(path, context, e)
    })?;

    Ok(content)
}
