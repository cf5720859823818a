//! Output file writing
//!
//! Generated files are replaced wholesale. Shared files (the locals file) only
//! have the region between a BEGIN/END marker pair rewritten; everything
//! around it is kept byte for byte.

use crate::error::{ExportError, ExportResult};
use crate::traits::FileSystem;
use std::path::Path;

/// Comment lines delimiting a generated region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub begin: &'static str,
    pub end: &'static str,
}

/// Region holding the merged `zone_records` local
pub const RECORDS_MARKERS: Markers = Markers {
    begin: "# BEGIN GENERATED ROUTE53 RECORDS",
    end: "# END GENERATED ROUTE53 RECORDS",
};

/// Region holding the `zone` local in single-zone mode
pub const PRIMARY_ZONE_MARKERS: Markers = Markers {
    begin: "# BEGIN GENERATED PRIMARY ZONE",
    end: "# END GENERATED PRIMARY ZONE",
};

/// Marker lines wrapped around `body`, newline terminated
pub fn marked_region(markers: &Markers, body: &str) -> String {
    format!("{}\n{}\n{}\n", markers.begin, body.trim_end_matches('\n'), markers.end)
}

/// Split `existing` into the text before the begin marker and the text after
/// the end marker (minus the newline ending the marker line). `None` unless
/// both markers are present in order.
fn split_around_markers<'a>(existing: &'a str, markers: &Markers) -> Option<(&'a str, &'a str)> {
    let begin = existing.find(markers.begin)?;
    let end_offset = existing[begin..].find(markers.end)?;
    let end = begin + end_offset + markers.end.len();

    let suffix = &existing[end..];
    let suffix = suffix
        .strip_prefix("\r\n")
        .or_else(|| suffix.strip_prefix('\n'))
        .unwrap_or(suffix);

    Some((&existing[..begin], suffix))
}

/// Replace the marked region of `existing` with `body`, or append a new
/// region after the existing content when there is none
pub fn replace_marked_region(existing: &str, markers: &Markers, body: &str) -> String {
    let region = marked_region(markers, body);

    if let Some((prefix, suffix)) = split_around_markers(existing, markers) {
        return format!("{}{}{}", prefix, region, suffix);
    }

    let trimmed = existing.trim_end();
    if trimmed.is_empty() {
        region
    } else {
        format!("{}\n\n{}", trimmed, region)
    }
}

/// Replace `path` with `contents`
pub fn write_file(fs: &dyn FileSystem, path: &Path, contents: &str) -> ExportResult<()> {
    fs.write_atomic(path, contents)
        .map_err(|err| ExportError::write(path, err))
}

/// Rewrite only the marked region of `path`, creating the file if needed
pub fn update_marked_file(
    fs: &dyn FileSystem,
    path: &Path,
    markers: &Markers,
    body: &str,
) -> ExportResult<()> {
    let existing = if fs.exists(path) {
        fs.read_to_string(path)
            .map_err(|err| ExportError::write(path, err))?
    } else {
        String::new()
    };

    write_file(fs, path, &replace_marked_region(&existing, markers, body))
}

/// Create the output directory before any zone is processed
pub fn ensure_dir(fs: &dyn FileSystem, dir: &Path) -> ExportResult<()> {
    fs.create_dir_all(dir)
        .map_err(|err| ExportError::write(dir, err))
}
