// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input normalizer: cleans free text and reformats dates before layout.
//
// This stage never fails. Upstream validation is expected to have rejected
// malformed dates already, so an unparsable date simply displays as empty.

use certwerk_core::{CertificateRequest, DEFAULT_CERTIFICATE_TITLE, Year};
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

/// Display format for every date printed on the certificate.
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A request whose text is safe to draw and whose dates are display-ready.
///
/// Optional fields are `Some` only when they carry visible content. The
/// internship dates are `Some` whenever the caller supplied them, even if the
/// display string ended up empty, because their presence (not their
/// parseability) decides whether the duration line is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub student_name: String,
    pub year: Year,
    pub course_name: String,
    pub institution_name: String,
    /// `DD/MM/YYYY`, or empty when the input could not be parsed.
    pub visit_date: String,
    pub certificate_title: String,
    pub project_title: Option<String>,
    pub technologies: Option<String>,
    pub duration: Option<String>,
    pub internship_start_date: Option<String>,
    pub internship_end_date: Option<String>,
    pub internship_course: Option<String>,
    pub logo_image: Option<Vec<u8>>,
    pub signature_image: Option<Vec<u8>>,
}

impl NormalizedRequest {
    /// Start and end date when both were supplied, together with a duration.
    pub fn internship_period(&self) -> Option<(&str, &str, &str)> {
        match (
            self.duration.as_deref(),
            self.internship_start_date.as_deref(),
            self.internship_end_date.as_deref(),
        ) {
            (Some(duration), Some(start), Some(end)) => Some((duration, start, end)),
            _ => None,
        }
    }

    /// Whether the request says anything about the internship itself.
    pub fn has_internship_details(&self) -> bool {
        self.internship_course.is_some()
            || self.project_title.is_some()
            || self.technologies.is_some()
            || self.internship_period().is_some()
    }
}

/// Normalize a raw request. Images and the year pass through untouched.
#[instrument(skip_all, fields(student = %request.student_name))]
pub fn normalize(request: &CertificateRequest) -> NormalizedRequest {
    let certificate_title = match clean_text(&request.certificate_title) {
        title if title.is_empty() => DEFAULT_CERTIFICATE_TITLE.to_owned(),
        title => title,
    };

    let visit_date = format_display_date(&request.visit_date).unwrap_or_else(|| {
        warn!(raw = %request.visit_date, "visit date is not YYYY-MM-DD; printing it empty");
        String::new()
    });

    let normalized = NormalizedRequest {
        student_name: clean_text(&request.student_name),
        year: request.year,
        course_name: clean_text(&request.course_name),
        institution_name: clean_text(&request.institution_name),
        visit_date,
        certificate_title,
        project_title: clean_optional(request.project_title.as_deref()),
        technologies: clean_optional(request.technologies.as_deref()),
        duration: clean_optional(request.duration.as_deref()),
        internship_start_date: optional_date(request.internship_start_date.as_deref()),
        internship_end_date: optional_date(request.internship_end_date.as_deref()),
        internship_course: clean_optional(request.internship_course.as_deref()),
        logo_image: request.logo_image.clone(),
        signature_image: request.signature_image.clone(),
    };

    debug!(
        has_project = normalized.project_title.is_some(),
        has_period = normalized.internship_period().is_some(),
        "Request normalized"
    );
    normalized
}

/// Replace tabs and C0/C1 control characters with a space, then trim.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if is_control(c) { ' ' } else { c })
        .collect();
    replaced.trim().to_owned()
}

fn is_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1F | 0x7F..=0x9F)
}

fn clean_optional(text: Option<&str>) -> Option<String> {
    text.map(clean_text).filter(|cleaned| !cleaned.is_empty())
}

fn optional_date(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    Some(format_display_date(raw).unwrap_or_else(|| {
        warn!(raw, "internship date is not YYYY-MM-DD; printing it empty");
        String::new()
    }))
}

/// Reformat an ISO `YYYY-MM-DD` date (optionally followed by a time part) as
/// `DD/MM/YYYY`. Returns `None` when the input is empty or unparsable.
pub fn format_display_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        let (day, rest) = raw.split_at_checked(10)?;
        if rest.starts_with('T') || rest.starts_with(' ') {
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        } else {
            None
        }
    })?;

    Some(date.format(DISPLAY_DATE_FORMAT).to_string())
}
