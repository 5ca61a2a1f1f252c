// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Certwerk certificate engine.

use serde::{Deserialize, Serialize};

/// Title used when the request leaves `certificate_title` blank.
pub const DEFAULT_CERTIFICATE_TITLE: &str = "Certificate of Participation";

/// Year of study of the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Year {
    I,
    II,
    III,
    IV,
}

impl Year {
    /// Roman numeral as printed on the certificate.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which image slot of a request an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageField {
    Logo,
    Signature,
}

impl std::fmt::Display for ImageField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logo => f.write_str("logo"),
            Self::Signature => f.write_str("signature"),
        }
    }
}

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// A4 in landscape orientation.
    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: 842.0,
        height: 595.0,
    };
}

/// Everything needed to produce one certificate.
///
/// Optional text fields are either present with content or `None`; the
/// normalizer turns whitespace-only values into `None`. Dates are kept as the
/// caller supplied them (`YYYY-MM-DD`) and reformatted for display later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub student_name: String,
    pub year: Year,
    pub course_name: String,
    pub institution_name: String,
    pub visit_date: String,
    #[serde(default = "default_title")]
    pub certificate_title: String,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub internship_start_date: Option<String>,
    #[serde(default)]
    pub internship_end_date: Option<String>,
    #[serde(default)]
    pub internship_course: Option<String>,
    /// Raw PNG bytes of the institution logo.
    #[serde(skip)]
    pub logo_image: Option<Vec<u8>>,
    /// Raw PNG bytes of the authorised signature.
    #[serde(skip)]
    pub signature_image: Option<Vec<u8>>,
}

fn default_title() -> String {
    DEFAULT_CERTIFICATE_TITLE.to_owned()
}

impl CertificateRequest {
    /// Create a request carrying only the mandatory fields.
    pub fn new(
        student_name: impl Into<String>,
        year: Year,
        course_name: impl Into<String>,
        institution_name: impl Into<String>,
        visit_date: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            year,
            course_name: course_name.into(),
            institution_name: institution_name.into(),
            visit_date: visit_date.into(),
            certificate_title: default_title(),
            project_title: None,
            technologies: None,
            duration: None,
            internship_start_date: None,
            internship_end_date: None,
            internship_course: None,
            logo_image: None,
            signature_image: None,
        }
    }

    /// The image carried in the given slot, if any.
    pub fn image(&self, field: ImageField) -> Option<&[u8]> {
        match field {
            ImageField::Logo => self.logo_image.as_deref(),
            ImageField::Signature => self.signature_image.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_serializes_as_roman_numeral() {
        assert_eq!(serde_json::to_string(&Year::III).unwrap(), "\"III\"");
        assert_eq!(Year::IV.to_string(), "IV");
    }

    #[test]
    fn request_json_uses_camel_case_and_defaults_title() {
        let json = r#"{
            "studentName": "Asha",
            "year": "II",
            "courseName": "B.Tech IT",
            "institutionName": "PONDICHERRY ENGINEERING COLLEGE",
            "visitDate": "2024-03-10",
            "projectTitle": "Campus Navigator"
        }"#;
        let request: CertificateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.student_name, "Asha");
        assert_eq!(request.year, Year::II);
        assert_eq!(request.certificate_title, DEFAULT_CERTIFICATE_TITLE);
        assert_eq!(request.project_title.as_deref(), Some("Campus Navigator"));
        assert!(request.logo_image.is_none());
    }

    #[test]
    fn accent_colour_from_bytes() {
        let accent = Rgb::from_u8(255, 0, 51);
        assert_eq!(accent.r, 1.0);
        assert_eq!(accent.g, 0.0);
        assert!((accent.b - 0.2).abs() < 1e-6);
    }
}
