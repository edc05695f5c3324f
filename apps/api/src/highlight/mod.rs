//! Highlight overlay. Locates flagged clause excerpts inside the extracted contract
//! text and wraps each one in a severity-styled, clickable span.
//!
//! The engine is a pure function over in-memory strings: no I/O, no shared state.
//! Callers always receive the annotated document together with the detail records
//! and the per-clause match outcomes.
//!
//! Matching runs against the HTML-escaped document. Text already wrapped by an
//! earlier (longer) clause is never searched again, so a shorter clause that only
//! occurs inside a longer highlighted clause is reported as unmatched rather than
//! nested inside it.

pub mod palette;
pub mod render;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::analysis::models::{validate_clauses, RiskClause, Severity};
use crate::highlight::palette::{style_for, ColorToken};

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("malformed risk clause at index {index}: {reason}")]
    MalformedClause { index: usize, reason: String },
}

/// Expanded payload for one highlighted clause. Every text field is already escaped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    /// Correlates the span in the annotated document with this record.
    pub id: String,
    pub toggle_id: String,
    pub clause_id: String,
    pub severity: Severity,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: ColorToken,
    pub summary: String,
    pub original: String,
    pub explanation: String,
    pub legal_reference: String,
    pub legal_text: String,
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseMatch {
    pub clause_id: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub annotated: String,
    pub details: Vec<DetailRecord>,
    /// One entry per input clause, in processing order.
    pub outcomes: Vec<ClauseMatch>,
}

impl Overlay {
    pub fn highlighted_count(&self) -> usize {
        self.details.len()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.matched)
            .map(|o| o.clause_id.as_str())
    }
}

/// Working copy of the document: escaped plain text interleaved with finished spans.
enum Segment {
    Text(String),
    Span(String),
}

/// Escapes `&`, `<`, `>`, `"` and `'` for HTML text and attribute positions.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds the annotated document and the parallel detail records.
///
/// Clauses are processed longest `original_text` first (stable for equal lengths);
/// each one replaces only the first occurrence of its escaped text. Clauses whose
/// text is empty or cannot be located are skipped and reported in `outcomes`.
pub fn overlay(document: &str, clauses: &[RiskClause]) -> Result<Overlay, OverlayError> {
    validate_clauses(clauses)?;

    let mut ordered: Vec<&RiskClause> = clauses.iter().collect();
    ordered.sort_by_key(|c| std::cmp::Reverse(c.original_text.chars().count()));

    let mut segments = vec![Segment::Text(escape_html(document))];
    let mut details = Vec::new();
    let mut outcomes = Vec::with_capacity(ordered.len());

    for (idx, clause) in ordered.into_iter().enumerate() {
        let needle = escape_html(&clause.original_text);
        let located = !needle.is_empty() && wrap_first(&mut segments, &needle, idx + 1, clause);

        if located {
            details.push(detail_record(idx + 1, clause, needle));
        } else {
            debug!(clause_id = %clause.clause_id, "clause text not found in document");
        }
        outcomes.push(ClauseMatch {
            clause_id: clause.clause_id.clone(),
            matched: located,
        });
    }

    let annotated = segments
        .into_iter()
        .map(|s| match s {
            Segment::Text(t) | Segment::Span(t) => t,
        })
        .collect();

    Ok(Overlay {
        annotated,
        details,
        outcomes,
    })
}

/// Replaces the first plain-text occurrence of `needle` with a decorated span.
/// Returns false when no segment contains it.
fn wrap_first(segments: &mut Vec<Segment>, needle: &str, seq: usize, clause: &RiskClause) -> bool {
    let hit = segments.iter().enumerate().find_map(|(i, seg)| match seg {
        Segment::Text(text) => find_aligned(text, needle).map(|pos| (i, pos)),
        Segment::Span(_) => None,
    });

    let Some((i, pos)) = hit else {
        return false;
    };

    let Segment::Text(text) = &segments[i] else {
        return false;
    };
    let before = text[..pos].to_string();
    let after = text[pos + needle.len()..].to_string();

    let mut replacement = Vec::with_capacity(3);
    if !before.is_empty() {
        replacement.push(Segment::Text(before));
    }
    replacement.push(Segment::Span(decorated_span(seq, clause, needle)));
    if !after.is_empty() {
        replacement.push(Segment::Text(after));
    }
    segments.splice(i..=i, replacement);
    true
}

/// First occurrence of `needle` in escaped `haystack` whose start and end do not
/// fall inside a character reference such as `&amp;`.
fn find_aligned(haystack: &str, needle: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let start = from + rel;
        let end = start + needle.len();
        if !inside_entity(haystack, start) && !inside_entity(haystack, end) {
            return Some(start);
        }
        from = start
            + haystack[start..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }
    None
}

fn inside_entity(text: &str, pos: usize) -> bool {
    match text[..pos].rfind('&') {
        Some(amp) => !text[amp..pos].contains(';'),
        None => false,
    }
}

fn decorated_span(seq: usize, clause: &RiskClause, escaped_text: &str) -> String {
    let style = style_for(clause.risk_level);
    format!(
        concat!(
            r#"<span class="risk-highlight-wrapper" data-clause-id="{clause_id}" data-detail-id="risk-modal-{seq}">"#,
            r#"<label for="modal-toggle-{seq}" class="risk-mark-label">"#,
            r#"<mark class="risk-mark risk-{severity}" style="background: {bg}; border-bottom: 2px solid {border}; padding: 1px 2px; border-radius: 3px; cursor: pointer;">{text}</mark>"#,
            r#"</label>"#,
            r#"<span class="risk-tooltip"><span class="tooltip-header">"#,
            r#"<span style="display:inline-block;width:8px;height:8px;background:{border};border-radius:50%;margin-right:6px;"></span>{label}</span>"#,
            r#"<span class="tooltip-content">{summary}</span>"#,
            r#"<span class="tooltip-hint">클릭하여 상세 정보 확인</span></span></span>"#,
        ),
        clause_id = escape_html(&clause.clause_id),
        seq = seq,
        severity = clause.risk_level,
        bg = style.color.background,
        border = style.color.border,
        text = escaped_text,
        label = style.label,
        summary = escape_html(&clause.issue_summary),
    )
}

fn detail_record(seq: usize, clause: &RiskClause, escaped_text: String) -> DetailRecord {
    let style = style_for(clause.risk_level);
    DetailRecord {
        id: format!("risk-modal-{seq}"),
        toggle_id: format!("modal-toggle-{seq}"),
        clause_id: clause.clause_id.clone(),
        severity: clause.risk_level,
        label: style.label,
        emoji: style.emoji,
        color: style.color,
        summary: escape_html(&clause.issue_summary),
        original: escaped_text,
        explanation: escape_html(&clause.simple_explanation),
        legal_reference: escape_html(&clause.legal_reference),
        legal_text: escape_html(&clause.legal_article),
        script: escape_html(&clause.negotiation_script),
    }
}
