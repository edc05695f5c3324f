//! HTML fragments a thin front end can drop next to the annotated document.
//!
//! Modals use the checkbox toggle pattern so they work without JavaScript:
//! each highlighted `<label for="modal-toggle-N">` flips the matching input.

use crate::analysis::models::RiskClause;
use crate::highlight::palette::style_for;
use crate::highlight::{escape_html, DetailRecord};

/// One pure-CSS modal per detail record.
pub fn render_modals(details: &[DetailRecord]) -> String {
    let mut html = String::new();
    for d in details {
        html.push_str(&format!(
            r#"
<input type="checkbox" id="{toggle}" class="modal-toggle" />
<div class="css-modal-overlay" id="{id}">
    <label for="{toggle}" class="modal-overlay-bg"></label>
    <div class="modal-content">
        <div class="modal-header">
            <div class="modal-title">
                <span class="risk-badge {severity}">{emoji} {label}</span>
                {summary}
            </div>
            <label for="{toggle}" class="modal-close">&times;</label>
        </div>
        <div class="modal-body">
            <div class="modal-section">
                <div class="modal-section-title">해당 조항</div>
                <div class="modal-section-content modal-original-text">"{original}"</div>
            </div>
            <div class="modal-section">
                <div class="modal-section-title">🔎 이 조항, 이런 의미예요!</div>
                <div class="modal-section-content modal-issue-section">{explanation}</div>
            </div>
            <div class="modal-section modal-script-section">
                <div class="modal-section-title">✅ 이렇게 쓰셔야 안전해요</div>
                <div class="modal-section-content modal-script">"{script}"</div>
            </div>
            <div class="modal-section">
                <div class="modal-section-title">법적 근거</div>
                <div class="modal-section-content modal-legal-ref">
                    <strong>{legal_ref}</strong><br>
                    {legal_text}
                </div>
            </div>
        </div>
    </div>
</div>"#,
            toggle = d.toggle_id,
            id = d.id,
            severity = d.severity,
            emoji = d.emoji,
            label = d.label,
            summary = d.summary,
            original = d.original,
            explanation = d.explanation,
            script = d.script,
            legal_ref = d.legal_reference,
            legal_text = d.legal_text,
        ));
    }
    html
}

/// Expandable cards for every clause, located or not, numbered in input order.
pub fn render_annotation_cards(clauses: &[RiskClause]) -> String {
    if clauses.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<div class="annotation-cards">"#);
    for (idx, clause) in clauses.iter().enumerate() {
        let style = style_for(clause.risk_level);
        html.push_str(&format!(
            r#"
<details class="annotation-card" style="border-left: 4px solid {border};">
<summary class="annotation-summary" style="background: {bg};">
<span class="annotation-number" style="background: {border};">{n}</span>
<span class="annotation-title">{emoji} {summary}</span>
</summary>
<div class="annotation-detail">
<div class="annotation-quote">
<strong>📍 해당 문구:</strong><br>
"{original}"
</div>
<div class="annotation-section">
<div class="annotation-label">🔎 이 조항, 이런 의미예요!</div>
<div class="annotation-content">{explanation}</div>
</div>
<div class="annotation-section">
<div class="annotation-label">📚 법적 근거</div>
<div class="annotation-legal">
<strong>{legal_ref}</strong><br>
{legal_text}
</div>
</div>
<div class="annotation-section">
<div class="annotation-label">✅ 이렇게 쓰셔야 안전해요</div>
<div class="annotation-script">"{script}"</div>
</div>
</div>
</details>"#,
            border = style.color.border,
            bg = style.color.background,
            n = idx + 1,
            emoji = style.emoji,
            summary = escape_html(&clause.issue_summary),
            original = escape_html(&clause.original_text),
            explanation = escape_html(&clause.simple_explanation),
            legal_ref = escape_html(&clause.legal_reference),
            legal_text = escape_html(&clause.legal_article),
            script = escape_html(&clause.negotiation_script),
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_missing_clauses(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let list: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();
    format!(r#"<div class="missing-clauses"><strong>📋 누락된 조항</strong><ul>{list}</ul></div>"#)
}
