//! App Engine descriptor validation
//!
//! Java App Engine applications declare whether they can serve concurrent
//! requests via a `<threadsafe>` element in their deployment descriptor
//! (`web.xml` or `appengine-web.xml`). The controller refuses to deploy an
//! app whose declaration is missing or malformed, so the gate runs before
//! any upload work starts.
//!
//! The packaging step stages uploaded apps under `/tmp/<app_dir>/`, which is
//! where the descriptor is read from.

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::files::FileReader;

/// Directory the packaging step untars uploaded apps into
const STAGING_DIR: &str = "/tmp";

/// Compute the staged path of an application descriptor
pub fn descriptor_path(app_dir: &str, descriptor_file: &str) -> PathBuf {
    Path::new(STAGING_DIR).join(app_dir).join(descriptor_file)
}

/// Extract the app's thread-safety declaration
///
/// Reads the staged descriptor and returns the value of its `<threadsafe>`
/// element. The declaration is valid only when the element's text is
/// exactly `true` or `false` - case-sensitive, with no surrounding
/// content. Anything else, including a missing element, is a
/// [`CoreError::AppEngineConfig`].
pub fn threadsafe_value(
    reader: &dyn FileReader,
    app_dir: &str,
    descriptor_file: &str,
) -> Result<bool> {
    let path = descriptor_path(app_dir, descriptor_file);
    let content = reader.read_to_string(&path)?;

    let element = Regex::new(r"<threadsafe>(.*?)</threadsafe>").expect("valid regex");
    let declared = element
        .captures(&content)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| {
            CoreError::app_engine(format!(
                "{descriptor_file} has no <threadsafe> element - add one and set it to true or false"
            ))
        })?;

    match declared.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CoreError::app_engine(format!(
            "<threadsafe> in {descriptor_file} must be exactly 'true' or 'false', found '{other}'"
        ))),
    }
}

/// Validation gate: ensure the app declares thread safety
///
/// Succeeds without effect when the declaration is exactly `true` or
/// `false`; the deployment pipeline aborts on any error.
pub fn ensure_app_has_threadsafe(
    reader: &dyn FileReader,
    app_dir: &str,
    descriptor_file: &str,
) -> Result<()> {
    let value = threadsafe_value(reader, app_dir, descriptor_file)?;
    tracing::debug!("{} declares threadsafe={}", descriptor_file, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::MockFileReader;

    fn reader_with_descriptor(app_dir: &str, file: &str, content: &str) -> MockFileReader {
        MockFileReader::new().with_file(descriptor_path(app_dir, file), content)
    }

    #[test]
    fn test_missing_threadsafe_element_rejected() {
        let reader = reader_with_descriptor("boo", "file1.xml", "");

        let err = ensure_app_has_threadsafe(&reader, "boo", "file1.xml").unwrap_err();
        assert!(matches!(err, CoreError::AppEngineConfig { .. }));
    }

    #[test]
    fn test_bad_threadsafe_value_rejected() {
        let reader = reader_with_descriptor("boo", "file2.xml", "<threadsafe>boo</threadsafe>");

        let err = ensure_app_has_threadsafe(&reader, "boo", "file2.xml").unwrap_err();
        assert!(matches!(err, CoreError::AppEngineConfig { .. }));
    }

    #[test]
    fn test_true_and_false_accepted() {
        let reader = reader_with_descriptor("boo", "file3.xml", "<threadsafe>true</threadsafe>");
        ensure_app_has_threadsafe(&reader, "boo", "file3.xml").unwrap();

        let reader = reader_with_descriptor("boo", "file4.xml", "<threadsafe>false</threadsafe>");
        ensure_app_has_threadsafe(&reader, "boo", "file4.xml").unwrap();
    }

    #[test]
    fn test_declaration_is_case_sensitive() {
        let reader = reader_with_descriptor("boo", "web.xml", "<threadsafe>True</threadsafe>");

        assert!(ensure_app_has_threadsafe(&reader, "boo", "web.xml").is_err());
    }

    #[test]
    fn test_surrounding_content_rejected() {
        let reader =
            reader_with_descriptor("boo", "web.xml", "<threadsafe> true </threadsafe>");

        assert!(ensure_app_has_threadsafe(&reader, "boo", "web.xml").is_err());
    }

    #[test]
    fn test_value_extracted_from_full_descriptor() {
        let descriptor = r#"<?xml version="1.0" encoding="utf-8"?>
<appengine-web-app xmlns="http://appengine.google.com/ns/1.0">
  <application>guestbook</application>
  <version>1</version>
  <threadsafe>true</threadsafe>
</appengine-web-app>"#;
        let reader = reader_with_descriptor("guestbook", "appengine-web.xml", descriptor);

        assert!(threadsafe_value(&reader, "guestbook", "appengine-web.xml").unwrap());
    }

    #[test]
    fn test_unreadable_descriptor_is_io_error() {
        let reader = MockFileReader::new();

        let err = ensure_app_has_threadsafe(&reader, "boo", "missing.xml").unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn test_descriptor_path_layout() {
        let path = descriptor_path("guestbook", "web.xml");
        assert_eq!(path, Path::new("/tmp/guestbook/web.xml"));
    }
}
