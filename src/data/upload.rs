use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Upload kind detection
// ---------------------------------------------------------------------------

/// What kind of file the user picked, decided from the filename suffix
/// alone. The loader may still fail on malformed content; this type only
/// drives the status line and the load dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadKind {
    Csv,
    Spreadsheet,
    /// A file was picked but its suffix is neither csv nor Excel.
    Unrecognized,
    /// No file picked yet.
    #[default]
    NoneYet,
}

impl UploadKind {
    /// Detect the upload kind from an optional filename.
    pub fn detect(file_name: Option<&str>) -> Self {
        let Some(name) = file_name else {
            return UploadKind::NoneYet;
        };
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => UploadKind::Csv,
            "xls" | "xlsx" => UploadKind::Spreadsheet,
            _ => UploadKind::Unrecognized,
        }
    }

    /// Whether a loader exists for this kind.
    pub fn is_loadable(&self) -> bool {
        matches!(self, UploadKind::Csv | UploadKind::Spreadsheet)
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadKind::Csv => write!(f, "csv"),
            UploadKind::Spreadsheet => write!(f, "Excel"),
            UploadKind::Unrecognized => write!(f, "Other, please upload csv or Excel"),
            UploadKind::NoneYet => write!(f, "None, waiting for file..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_suffix() {
        assert_eq!(UploadKind::detect(Some("data.csv")), UploadKind::Csv);
        assert_eq!(UploadKind::detect(Some("DATA.CSV")), UploadKind::Csv);
        assert_eq!(UploadKind::detect(Some("book.xlsx")), UploadKind::Spreadsheet);
        assert_eq!(UploadKind::detect(Some("old.xls")), UploadKind::Spreadsheet);
        assert_eq!(
            UploadKind::detect(Some("report.pdf")),
            UploadKind::Unrecognized
        );
        assert_eq!(UploadKind::detect(Some("noext")), UploadKind::Unrecognized);
        assert_eq!(UploadKind::detect(None), UploadKind::NoneYet);
    }

    #[test]
    fn status_lines() {
        assert_eq!(UploadKind::Csv.to_string(), "csv");
        assert_eq!(UploadKind::Spreadsheet.to_string(), "Excel");
        assert_eq!(
            UploadKind::Unrecognized.to_string(),
            "Other, please upload csv or Excel"
        );
        assert_eq!(UploadKind::NoneYet.to_string(), "None, waiting for file...");
    }

    #[test]
    fn loadable_kinds() {
        assert!(UploadKind::Csv.is_loadable());
        assert!(UploadKind::Spreadsheet.is_loadable());
        assert!(!UploadKind::Unrecognized.is_loadable());
        assert!(!UploadKind::NoneYet.is_loadable());
    }
}
