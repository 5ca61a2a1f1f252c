// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reading requests, images and configuration from disk, and writing the
// finished certificate back.

use std::path::{Path, PathBuf};

use certwerk_core::error::{CertwerkError, Result};
use certwerk_core::{CertificateConfig, CertificateRequest, ImageField};
use tracing::{debug, info};

/// Load a certificate request from a JSON file.
///
/// The library assumes required fields are present; this is the place that
/// checks them.
pub fn load_request(path: &Path) -> Result<CertificateRequest> {
    let data = std::fs::read_to_string(path)?;
    let request: CertificateRequest = serde_json::from_str(&data).map_err(|err| {
        CertwerkError::InvalidRequest(format!("{}: {err}", path.display()))
    })?;

    let required = [
        ("studentName", &request.student_name),
        ("courseName", &request.course_name),
        ("institutionName", &request.institution_name),
        ("visitDate", &request.visit_date),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(CertwerkError::InvalidRequest(format!(
            "{field} must not be empty"
        )));
    }

    debug!(path = %path.display(), student = %request.student_name, "Request loaded");
    Ok(request)
}

/// Read an image file into the given slot of `request`. Its format is
/// checked later, by content.
pub fn attach_image(
    request: &mut CertificateRequest,
    field: ImageField,
    path: &Path,
) -> Result<()> {
    let bytes = std::fs::read(path)?;
    debug!(%field, path = %path.display(), len = bytes.len(), "Image attached");
    match field {
        ImageField::Logo => request.logo_image = Some(bytes),
        ImageField::Signature => request.signature_image = Some(bytes),
    }
    Ok(())
}

/// Load engine settings from `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CertificateConfig> {
    let Some(path) = path else {
        return Ok(CertificateConfig::default());
    };
    let data = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&data)?;
    info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Write `bytes` to `out_dir/file_name`, creating the directory if needed.
pub fn write_certificate(out_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use certwerk_core::Year;

    const REQUEST_JSON: &str = r#"{
        "studentName": "Asha Raman",
        "year": "III",
        "courseName": "B.Tech CSE",
        "institutionName": "PONDICHERRY ENGINEERING COLLEGE",
        "visitDate": "2024-03-10",
        "technologies": "Rust"
    }"#;

    #[test]
    fn request_is_read_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, REQUEST_JSON).unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.year, Year::III);
        assert_eq!(request.technologies.as_deref(), Some("Rust"));
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, REQUEST_JSON.replace("Asha Raman", "  ")).unwrap();

        let err = load_request(&path).unwrap_err();
        assert!(matches!(err, CertwerkError::InvalidRequest(msg) if msg.contains("studentName")));
    }

    #[test]
    fn malformed_json_is_an_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{ "studentName": "Asha", "year": "V" }"#).unwrap();

        assert!(matches!(
            load_request(&path),
            Err(CertwerkError::InvalidRequest(_))
        ));
    }

    #[test]
    fn images_land_in_their_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sig.png");
        std::fs::write(&path, b"bytes").unwrap();

        let mut request =
            CertificateRequest::new("Asha", Year::I, "ECE", "PEC", "2024-03-10");
        attach_image(&mut request, ImageField::Signature, &path).unwrap();
        assert_eq!(request.signature_image.as_deref(), Some(&b"bytes"[..]));
        assert!(request.logo_image.is_none());
    }

    #[test]
    fn missing_config_flag_means_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.outer_margin, 40.0);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, CertwerkError::Io(_)));
    }

    #[test]
    fn certificate_is_written_into_a_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let path = write_certificate(&out, "Asha_Certificate.pdf", b"%PDF").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
    }
}
