//! Output directory handling for rendered reports.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::error::ReportError;

/// Built-in stylesheet written next to every report.
pub const DEFAULT_STYLESHEET: &str = include_str!("../assets/styles.css");

const STYLESHEET_NAME: &str = "styles.css";
const MAX_NAME_ATTEMPTS: u32 = 100;

/// `persona_<identifier>_<YYYYMMDD_HHMMSS>.html`, with characters outside
/// `[A-Za-z0-9_-]` in the identifier replaced by `_`.
#[must_use]
pub fn report_file_name<Tz>(identifier: &str, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let safe: String = identifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "persona_{safe}_{}.html",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Writes `html` and the stylesheet into `output_dir`, creating the
/// directory if needed. Returns the report's path.
///
/// The report is created with create-new semantics and is never
/// overwritten: when [`report_file_name`] is already taken, a `_2`, `_3`,
/// ... suffix is appended. The stylesheet is written only after the report
/// exists, and is replaced on every run.
///
/// # Errors
///
/// Returns [`ReportError::Output`] if the directory cannot be created,
/// no free report name is found, or either file cannot be written.
pub fn write_report<Tz>(
    output_dir: &Path,
    identifier: &str,
    generated_at: &DateTime<Tz>,
    html: &str,
    stylesheet: &str,
) -> Result<PathBuf, ReportError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(output_dir).map_err(|source| ReportError::Output {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let base_name = report_file_name(identifier, generated_at);
    let (path, mut file) = create_unique(output_dir, &base_name)?;
    file.write_all(html.as_bytes())
        .map_err(|source| ReportError::Output {
            path: path.clone(),
            source,
        })?;

    let css_path = output_dir.join(STYLESHEET_NAME);
    fs::write(&css_path, stylesheet).map_err(|source| ReportError::Output {
        path: css_path.clone(),
        source,
    })?;
    tracing::debug!(path = %css_path.display(), "stylesheet written");

    tracing::info!(path = %path.display(), bytes = html.len(), "persona report written");
    Ok(path)
}

/// Opens the first free name among `base_name`, `<stem>_2.html`, ...
fn create_unique(output_dir: &Path, base_name: &str) -> Result<(PathBuf, File), ReportError> {
    let stem = base_name.strip_suffix(".html").unwrap_or(base_name);
    let mut path = output_dir.join(base_name);

    for attempt in 1..=MAX_NAME_ATTEMPTS {
        if attempt > 1 {
            path = output_dir.join(format!("{stem}_{attempt}.html"));
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "report name taken");
            }
            Err(source) => return Err(ReportError::Output { path, source }),
        }
    }

    Err(ReportError::Output {
        path,
        source: io::Error::new(ErrorKind::AlreadyExists, "no free report file name"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 5, 7).unwrap()
    }

    #[test]
    fn file_name_embeds_identifier_and_timestamp() {
        assert_eq!(
            report_file_name("alice", &at()),
            "persona_alice_20261018_090507.html"
        );
    }

    #[test]
    fn file_name_neutralizes_path_characters() {
        assert_eq!(
            report_file_name("../evil\\name", &at()),
            "persona____evil_name_20261018_090507.html"
        );
    }

    #[test]
    fn writes_report_and_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");

        let path = write_report(&out, "alice", &at(), "<html>alice</html>", "body {}").unwrap();

        assert_eq!(path, out.join("persona_alice_20261018_090507.html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>alice</html>");
        assert_eq!(
            fs::read_to_string(out.join("styles.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn existing_report_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_report(dir.path(), "alice", &at(), "first", "a {}").unwrap();

        let second = write_report(dir.path(), "alice", &at(), "second", "b {}").unwrap();
        let third = write_report(dir.path(), "alice", &at(), "third", "c {}").unwrap();

        assert_eq!(
            second,
            dir.path().join("persona_alice_20261018_090507_2.html")
        );
        assert_eq!(third, dir.path().join("persona_alice_20261018_090507_3.html"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
        assert_eq!(fs::read_to_string(&third).unwrap(), "third");
        assert_eq!(
            fs::read_to_string(dir.path().join("styles.css")).unwrap(),
            "c {}"
        );
    }

    #[test]
    fn failed_report_leaves_stylesheet_untouched() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), "alice", &at(), "first", "original {}").unwrap();
        // A directory squatting on every candidate name blocks the report.
        let base = report_file_name("bob", &at());
        let stem = base.strip_suffix(".html").unwrap();
        fs::create_dir(dir.path().join(&base)).unwrap();
        for n in 2..=MAX_NAME_ATTEMPTS {
            fs::create_dir(dir.path().join(format!("{stem}_{n}.html"))).unwrap();
        }

        let err = write_report(dir.path(), "bob", &at(), "x", "replaced {}").unwrap_err();

        assert!(matches!(err, ReportError::Output { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("styles.css")).unwrap(),
            "original {}"
        );
    }

    #[test]
    fn unwritable_directory_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_report(&blocker, "alice", &at(), "x", "").unwrap_err();
        assert!(matches!(err, ReportError::Output { .. }));
    }
}
