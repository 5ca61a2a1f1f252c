// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The certificate body as an ordered list of blocks.
//
// Each block pairs a predicate over the normalized request with a render
// function. The engine walks `BLOCKS` top to bottom; a block whose predicate
// is false is omitted and the cursor does not move for it. Flow blocks draw at
// the cursor, fixed blocks at absolute positions.

use certwerk_core::error::Result;
use certwerk_core::{CertificateConfig, PageSize, Rgb};
use tracing::warn;

use super::geometry::{CONTENT_MARGIN, Segment, center_x, composite_line, content_width};
use crate::backend::{DocumentBackend, DrawOp, FontHandle, ImageHandle, ImagePlacement, TextRun};
use crate::fonts::{FontRole, ResolvedFontSet};
use crate::normalize::NormalizedRequest;

/// Green used for the title and the issuer name.
pub const ACCENT: Rgb = Rgb::new(118.0 / 255.0, 166.0 / 255.0, 68.0 / 255.0);

const TITLE_SIZE: f32 = 40.0;
const TITLE_OFFSET: f32 = 110.0;
const SENTENCE_SIZE: f32 = 20.0;
const INSTITUTION_SIZE: f32 = 17.0;
const DETAIL_SIZE: f32 = 16.0;
const ISSUER_NAME_SIZE: f32 = 24.0;
const ISSUER_DETAIL_SIZE: f32 = 14.0;
const FOOTER_SIZE: f32 = 14.0;

/// Longest duration line, in characters, that is still centered on one line.
pub const DURATION_SINGLE_LINE_CHARS: usize = 70;

const CERTIFY_PREFIX: &str = "This is to certify that Mr/Ms ";
const INTERNSHIP_LEAD: &str = "as she/he has successfully completed the Internship in ";
const WISHES: &str = "We wish him/her success and betterment in future.";
const SIGNATORY: &str = "Authorized Signatory";

/// Where an image goes and how opaque it is.
#[derive(Debug, Clone, Copy)]
struct ImageSlot {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    opacity: f32,
}

/// How a rendered block moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// Absolutely positioned; the cursor stays put.
    Fixed,
    /// Drawn at the cursor, which then moves down this many line spacings.
    Lines(f32),
}

/// Result of rendering one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Drawn,
    /// The block applied but an optional asset could not be embedded.
    Skipped(String),
}

/// Everything a block may read or draw with.
pub struct BlockContext<'a> {
    pub backend: &'a mut dyn DocumentBackend,
    pub fonts: &'a ResolvedFontSet,
    pub request: &'a NormalizedRequest,
    pub config: &'a CertificateConfig,
    pub page: PageSize,
    /// Current cursor position.
    pub y: f32,
    pub ops: &'a mut Vec<DrawOp>,
}

impl BlockContext<'_> {
    fn font(&self, role: FontRole) -> FontHandle {
        self.fonts.handle(role)
    }

    fn push_text(&mut self, run: TextRun) {
        self.ops.push(DrawOp::Text(run));
    }

    /// A run of `text` centered at `y`, not yet drawn.
    fn centered_run(&self, text: &str, role: FontRole, size: f32, y: f32) -> TextRun {
        let font = self.font(role);
        let width = self.backend.measure_text_width(text, font, size);
        TextRun::new(text, center_x(self.page.width, width), y, size, font)
    }

    /// Draw `text` centered at `y`.
    fn centered(&mut self, text: &str, role: FontRole, size: f32, y: f32, color: Rgb) {
        let run = self.centered_run(text, role, size, y).with_color(color);
        self.push_text(run);
    }

    /// Draw several segments as one centered line at the cursor.
    fn composite(&mut self, segments: &[Segment<'_>], size: f32) {
        let line = composite_line(&*self.backend, segments, size, self.page.width, self.y);
        self.ops.extend(line.runs.into_iter().map(DrawOp::Text));
    }

    fn embed_image(&mut self, bytes: &[u8]) -> Result<ImageHandle> {
        self.backend.embed_image(bytes)
    }
}

/// One independently skippable unit of the certificate.
pub struct BlockSpec {
    pub name: &'static str,
    pub advance: Advance,
    pub applies: fn(&NormalizedRequest) -> bool,
    pub render: fn(&mut BlockContext<'_>) -> BlockOutcome,
}

/// The certificate, top to bottom.
pub const BLOCKS: &[BlockSpec] = &[
    BlockSpec {
        name: "title",
        advance: Advance::Fixed,
        applies: always,
        render: title,
    },
    BlockSpec {
        name: "logo",
        advance: Advance::Fixed,
        applies: has_logo,
        render: logo,
    },
    BlockSpec {
        name: "watermark",
        advance: Advance::Fixed,
        applies: has_logo,
        render: watermark,
    },
    BlockSpec {
        name: "certify",
        advance: Advance::Lines(1.0),
        applies: always,
        render: certify,
    },
    BlockSpec {
        name: "institution",
        advance: Advance::Lines(1.0),
        applies: always,
        render: institution,
    },
    BlockSpec {
        name: "internship",
        advance: Advance::Lines(0.8),
        applies: NormalizedRequest::has_internship_details,
        render: internship,
    },
    BlockSpec {
        name: "technologies",
        advance: Advance::Lines(0.7),
        applies: has_technologies,
        render: technologies,
    },
    BlockSpec {
        name: "duration",
        advance: Advance::Lines(1.0),
        applies: has_period,
        render: duration,
    },
    BlockSpec {
        name: "at",
        advance: Advance::Lines(1.0),
        applies: always,
        render: at,
    },
    BlockSpec {
        name: "issuer-name",
        advance: Advance::Lines(1.0),
        applies: always,
        render: issuer_name,
    },
    BlockSpec {
        name: "issuer-description",
        advance: Advance::Lines(1.0),
        applies: always,
        render: issuer_description,
    },
    BlockSpec {
        name: "issuer-address",
        advance: Advance::Lines(1.0),
        applies: always,
        render: issuer_address,
    },
    BlockSpec {
        name: "wishes",
        advance: Advance::Lines(1.0),
        applies: always,
        render: wishes,
    },
    BlockSpec {
        name: "date",
        advance: Advance::Fixed,
        applies: always,
        render: date,
    },
    BlockSpec {
        name: "signatory",
        advance: Advance::Fixed,
        applies: always,
        render: signatory,
    },
    BlockSpec {
        name: "signature",
        advance: Advance::Fixed,
        applies: has_signature,
        render: signature,
    },
];

// -- Predicates ---------------------------------------------------------------

fn always(_: &NormalizedRequest) -> bool {
    true
}

fn has_logo(request: &NormalizedRequest) -> bool {
    request.logo_image.is_some()
}

fn has_signature(request: &NormalizedRequest) -> bool {
    request.signature_image.is_some()
}

fn has_technologies(request: &NormalizedRequest) -> bool {
    request.technologies.is_some()
}

fn has_period(request: &NormalizedRequest) -> bool {
    request.internship_period().is_some()
}

// -- Header -------------------------------------------------------------------

fn title(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let y = ctx.page.height - TITLE_OFFSET;
    ctx.centered(&request.certificate_title, FontRole::Title, TITLE_SIZE, y, ACCENT);
    BlockOutcome::Drawn
}

fn logo(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let slot = ImageSlot {
        x: 60.0,
        y: ctx.page.height - 120.0,
        width: 140.0,
        height: 70.0,
        opacity: 1.0,
    };
    let request = ctx.request;
    place_image(ctx, request.logo_image.as_deref(), "logo", slot)
}

/// The logo again, large and faint in the middle of the page. Embedded
/// separately so its failure leaves the logo alone.
fn watermark(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let (width, height) = (530.0, 357.0);
    let slot = ImageSlot {
        x: (ctx.page.width - width) / 2.0,
        y: (ctx.page.height - height) / 2.0,
        width,
        height,
        opacity: 0.15,
    };
    let request = ctx.request;
    place_image(ctx, request.logo_image.as_deref(), "watermark", slot)
}

// -- Flow ---------------------------------------------------------------------

fn certify(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let suffix = format!(", {} Year {} from ", request.year, request.course_name);
    let segments = [
        Segment::new(CERTIFY_PREFIX, ctx.font(FontRole::Body)),
        Segment::new(&request.student_name, ctx.font(FontRole::Emphasis)),
        Segment::new(&suffix, ctx.font(FontRole::Body)),
    ];
    ctx.composite(&segments, SENTENCE_SIZE);
    BlockOutcome::Drawn
}

/// Smaller than the surrounding lines so long all-caps names fit; anything
/// still too wide wraps inside the content width.
fn institution(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let mut run = ctx
        .centered_run(
            &request.institution_name,
            FontRole::InstitutionName,
            INSTITUTION_SIZE,
            ctx.y,
        )
        .wrapped(content_width(ctx.page), INSTITUTION_SIZE * 1.2);
    run.x = run.x.max(CONTENT_MARGIN);
    ctx.push_text(run);
    BlockOutcome::Drawn
}

fn internship(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let mut lead = String::from(INTERNSHIP_LEAD);
    if let Some(course) = &request.internship_course {
        lead.push_str(course);
        lead.push(' ');
    }

    match &request.project_title {
        Some(project) => {
            let before = format!("{lead}a project titled \"");
            let segments = [
                Segment::new(&before, ctx.font(FontRole::Body)),
                Segment::new(project, ctx.font(FontRole::Emphasis)),
                Segment::new("\"", ctx.font(FontRole::Body)),
            ];
            ctx.composite(&segments, DETAIL_SIZE);
        }
        None => {
            let run = TextRun::new(
                lead.trim_end(),
                CONTENT_MARGIN,
                ctx.y,
                DETAIL_SIZE,
                ctx.font(FontRole::Body),
            )
            .wrapped(content_width(ctx.page), DETAIL_SIZE * 1.4);
            ctx.push_text(run);
        }
    }
    BlockOutcome::Drawn
}

fn technologies(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let Some(technologies) = &request.technologies else {
        return BlockOutcome::Skipped("no technologies".into());
    };
    let text = format!("(using {technologies})");
    let y = ctx.y;
    ctx.centered(&text, FontRole::Body, DETAIL_SIZE, y, Rgb::BLACK);
    BlockOutcome::Drawn
}

/// Short lines are centered; longer ones are left-aligned and wrapped. The
/// character count is a proxy for "fits on one line", not a measurement.
fn duration(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let Some((duration, start, end)) = request.internship_period() else {
        return BlockOutcome::Skipped("no internship period".into());
    };
    let text = duration_line(duration, start, end);
    let y = ctx.y;

    if text.chars().count() <= DURATION_SINGLE_LINE_CHARS {
        ctx.centered(&text, FontRole::Body, DETAIL_SIZE, y, Rgb::BLACK);
    } else {
        let run = TextRun::new(text, CONTENT_MARGIN, y, DETAIL_SIZE, ctx.font(FontRole::Body))
            .wrapped(content_width(ctx.page), DETAIL_SIZE * 1.4);
        ctx.push_text(run);
    }
    BlockOutcome::Drawn
}

/// `in 15 days during the period 05/01/2024 to 20/01/2024`
pub fn duration_line(duration: &str, start: &str, end: &str) -> String {
    format!("in {duration} during the period {start} to {end}")
}

fn at(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let y = ctx.y;
    ctx.centered("at", FontRole::Body, SENTENCE_SIZE, y, Rgb::BLACK);
    BlockOutcome::Drawn
}

fn issuer_name(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let config = ctx.config;
    let y = ctx.y;
    ctx.centered(
        &config.issuer.name,
        FontRole::InstitutionName,
        ISSUER_NAME_SIZE,
        y,
        ACCENT,
    );
    BlockOutcome::Drawn
}

fn issuer_description(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let config = ctx.config;
    let y = ctx.y;
    ctx.centered(
        &config.issuer.description,
        FontRole::Body,
        ISSUER_DETAIL_SIZE,
        y,
        Rgb::BLACK,
    );
    BlockOutcome::Drawn
}

fn issuer_address(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let config = ctx.config;
    let y = ctx.y;
    ctx.centered(
        &config.issuer.address,
        FontRole::Body,
        ISSUER_DETAIL_SIZE,
        y,
        Rgb::BLACK,
    );
    BlockOutcome::Drawn
}

fn wishes(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let y = ctx.y;
    ctx.centered(WISHES, FontRole::Body, SENTENCE_SIZE, y, Rgb::BLACK);
    BlockOutcome::Drawn
}

// -- Footer -------------------------------------------------------------------

fn date(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let request = ctx.request;
    let text = format!("Date: {}", request.visit_date);
    let run = TextRun::new(text, 60.0, 60.0, FOOTER_SIZE, ctx.font(FontRole::Emphasis));
    ctx.push_text(run);
    BlockOutcome::Drawn
}

fn signatory(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let run = TextRun::new(
        SIGNATORY,
        ctx.page.width - 200.0,
        70.0,
        FOOTER_SIZE,
        ctx.font(FontRole::Emphasis),
    );
    ctx.push_text(run);
    BlockOutcome::Drawn
}

fn signature(ctx: &mut BlockContext<'_>) -> BlockOutcome {
    let slot = ImageSlot {
        x: ctx.page.width - 180.0,
        y: 40.0,
        width: 120.0,
        height: 90.0,
        opacity: 1.0,
    };
    let request = ctx.request;
    place_image(ctx, request.signature_image.as_deref(), "signature", slot)
}

// -- Images -------------------------------------------------------------------

/// Embed `bytes` and place them in `slot`. An embedding failure skips the
/// block and is logged; it never aborts the certificate.
fn place_image(
    ctx: &mut BlockContext<'_>,
    bytes: Option<&[u8]>,
    what: &str,
    slot: ImageSlot,
) -> BlockOutcome {
    let Some(bytes) = bytes else {
        return BlockOutcome::Skipped(format!("no {what} supplied"));
    };

    match ctx.embed_image(bytes) {
        Ok(image) => {
            ctx.ops.push(DrawOp::Image(ImagePlacement {
                image,
                x: slot.x,
                y: slot.y,
                width: slot.width,
                height: slot.height,
                opacity: slot.opacity,
            }));
            BlockOutcome::Drawn
        }
        Err(err) => {
            warn!(block = what, error = %err, "Image could not be embedded; skipping");
            BlockOutcome::Skipped(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_line_wording() {
        assert_eq!(
            duration_line("15 days", "05/01/2024", "20/01/2024"),
            "in 15 days during the period 05/01/2024 to 20/01/2024"
        );
    }

    #[test]
    fn only_two_flow_blocks_use_reduced_spacing() {
        let reduced: Vec<(&str, Advance)> = BLOCKS
            .iter()
            .filter(|block| matches!(block.advance, Advance::Lines(f) if f < 1.0))
            .map(|block| (block.name, block.advance))
            .collect();
        assert_eq!(
            reduced,
            vec![
                ("internship", Advance::Lines(0.8)),
                ("technologies", Advance::Lines(0.7)),
            ]
        );
    }

    #[test]
    fn block_names_are_unique() {
        let mut names: Vec<&str> = BLOCKS.iter().map(|block| block.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BLOCKS.len());
    }
}
