// src/report.rs
//! Server-side rendering of the grader page and the evaluation report.
//!
//! Everything here is a pure function of a [`GraderSnapshot`]; interactivity
//! (drag and drop, the evaluate click) lives in `static/app.js`.

use chrono::Datelike;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::grader::{FileSlot, GraderSnapshot, GraderState};
use crate::models::{CriterionEvaluation, EvaluationRun, EvaluationStatus};

const CHECK_ICON: &str = r#"<svg class="icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M4.5 12.75l6 6 9-13.5"/></svg>"#;
const WARNING_ICON: &str = r#"<svg class="icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M12 9v3.75m0 3.75h.008M10.29 3.86L1.82 18a2 2 0 001.71 3h16.94a2 2 0 001.71-3L13.71 3.86a2 2 0 00-3.42 0z"/></svg>"#;
const X_CIRCLE_ICON: &str = r#"<svg class="icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M9.75 9.75l4.5 4.5m0-4.5l-4.5 4.5M21 12a9 9 0 11-18 0 9 9 0 0118 0z"/></svg>"#;
const UPLOAD_ICON: &str = r#"<svg class="icon icon-upload" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M3 16.5v2.25A2.25 2.25 0 005.25 21h13.5A2.25 2.25 0 0021 18.75V16.5m-13.5-9L12 3m0 0l4.5 4.5M12 3v13.5"/></svg>"#;
const DOCUMENT_ICON: &str = r#"<svg class="icon icon-document" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M19.5 14.25v-2.63a3.38 3.38 0 00-3.38-3.37h-1.5A1.13 1.13 0 0113.5 7.13v-1.5A3.38 3.38 0 0010.13 2.25H8.25m0 12.75h7.5m-7.5 3H12M10.5 2.25H5.63c-.62 0-1.13.5-1.13 1.13v17.25c0 .62.5 1.12 1.13 1.12h12.75c.62 0 1.12-.5 1.12-1.12V11.25a9 9 0 00-9-9z"/></svg>"#;

/// Colour band of a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score < 50.0 {
            ScoreBand::Low
        } else if score < 75.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Low => "score-low",
            ScoreBand::Medium => "score-medium",
            ScoreBand::High => "score-high",
        }
    }
}

/// Label, icon and colour for one status.
#[derive(Debug, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub tone: &'static str,
}

const FULFILLED_STYLE: StatusStyle = StatusStyle {
    label: "Fulfilled",
    icon: CHECK_ICON,
    tone: "tone-green",
};

const PARTIALLY_FULFILLED_STYLE: StatusStyle = StatusStyle {
    label: "Partially Fulfilled",
    icon: WARNING_ICON,
    tone: "tone-yellow",
};

const NOT_FULFILLED_STYLE: StatusStyle = StatusStyle {
    label: "Not Fulfilled",
    icon: X_CIRCLE_ICON,
    tone: "tone-red",
};

impl StatusStyle {
    pub fn for_status(status: EvaluationStatus) -> &'static StatusStyle {
        match status {
            EvaluationStatus::Fulfilled => &FULFILLED_STYLE,
            EvaluationStatus::PartiallyFulfilled => &PARTIALLY_FULFILLED_STYLE,
            EvaluationStatus::NotFulfilled => &NOT_FULFILLED_STYLE,
        }
    }
}

fn render_criterion(item: &CriterionEvaluation) -> String {
    let style = StatusStyle::for_status(item.status);
    format!(
        r#"<article class="criterion-card {tone}">
  <div class="criterion-header">
    <div class="status-icon {tone}">{icon}</div>
    <div class="criterion-title">
      <div class="criterion-line">
        <h4>{criterion}</h4>
        <span class="criterion-score {band}">{score}/100</span>
      </div>
      <p class="status-label {tone}">{label}</p>
    </div>
  </div>
  <div class="criterion-body">
    <h5>Justification</h5>
    <blockquote>{justification}</blockquote>
    <h5>Suggestion for Improvement</h5>
    <p>{suggestion}</p>
  </div>
</article>
"#,
        tone = style.tone,
        icon = style.icon,
        criterion = encode_text(&item.criterion),
        band = ScoreBand::for_score(item.score).css_class(),
        score = item.score,
        label = style.label,
        justification = encode_text(&item.justification),
        suggestion = encode_text(&item.suggestion),
    )
}

/// The report for one successful run: overall card, feedback, then one card per criterion.
pub fn render_report(run: &EvaluationRun) -> String {
    let result = &run.result;
    let cards: String = result.evaluation.iter().map(render_criterion).collect();

    format!(
        r#"<section class="panel report" data-run-id="{id}">
<h2>Evaluation Report</h2>
<div class="report-summary">
  <div class="overall-card">
    <h3>Overall Score</h3>
    <div class="overall-score {band}">{overall}%</div>
    <p class="hint">Based on rubric average</p>
  </div>
  <div class="overall-feedback">
    <h3>Overall Feedback</h3>
    <p>{feedback}</p>
  </div>
</div>
<h3>Criteria Breakdown</h3>
<div class="criteria">
{cards}</div>
</section>
"#,
        id = run.id,
        band = ScoreBand::for_score(result.overall_score).css_class(),
        overall = result.overall_score.round(),
        feedback = encode_text(&result.overall_feedback),
        cards = cards,
    )
}

/// Drop zone for an empty slot, or the chosen file with a remove control.
pub fn render_uploader(slot: FileSlot, file_name: Option<&str>) -> String {
    let id = slot.as_str();
    let url = format!("/api/v1/files/{}", id);

    match file_name {
        Some(name) => {
            format!(
                r#"<div class="uploader selected" data-slot="{id}">
  <div class="selected-file">{icon}<span class="file-name" title="{title}">{name}</span></div>
  <button type="button" class="remove-file" data-remove-url="{url}" aria-label="Remove file">{remove}</button>
</div>
"#,
                id = id,
                icon = DOCUMENT_ICON,
                title = encode_double_quoted_attribute(name),
                name = encode_text(name),
                url = url,
                remove = X_CIRCLE_ICON,
            )
        }
        None => format!(
            r#"<div class="uploader" data-slot="{id}">
  <label for="{id}-input" class="uploader-label">{label}</label>
  <label for="{id}-input" class="drop-zone" data-upload-url="{url}">
    {icon}
    <p><span class="accent">Click to upload</span> or drag and drop</p>
    <p class="hint">PDF file only</p>
    <input id="{id}-input" type="file" accept=".pdf" class="hidden">
  </label>
</div>
"#,
            id = id,
            label = slot.label(),
            url = url,
            icon = UPLOAD_ICON,
        ),
    }
}

fn render_button(snapshot: &GraderSnapshot) -> String {
    let disabled = if snapshot.can_evaluate() { "" } else { " disabled" };
    let content = if snapshot.state.is_loading() {
        r#"<span class="spinner" aria-hidden="true"></span>Analyzing..."#
    } else {
        "Evaluate Documents"
    };
    format!(
        r#"<button id="evaluate-button" type="button" data-endpoint="/api/v1/evaluate"{}>{}</button>"#,
        disabled, content
    )
}

/// The whole page for the current state.
pub fn render_page(snapshot: &GraderSnapshot) -> String {
    let uploaders: String = FileSlot::ALL
        .iter()
        .map(|slot| render_uploader(*slot, snapshot.file_name(*slot)))
        .collect();

    let (refresh, outcome) = match &snapshot.state {
        GraderState::Idle => ("", String::new()),
        // Another tab may have started the run; poll until it settles.
        GraderState::Loading => (r#"<meta http-equiv="refresh" content="2">"#, String::new()),
        GraderState::Success(run) => ("", render_report(run)),
        GraderState::Failed(message) => ("", render_error(message)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}<title>AI-Powered PDF Grader</title>
<link rel="stylesheet" href="/assets/styles.css">
</head>
<body>
<div class="container">
<header>
  <h1>AI-Powered PDF Grader</h1>
  <p class="subtitle">Upload a student's work and a rubric to receive an instant, detailed evaluation.</p>
</header>
<main>
<section class="panel">
  <h2>{doc_icon}Upload Documents</h2>
  <div class="uploaders">
{uploaders}  </div>
  <div class="actions">{button}</div>
</section>
<div id="client-error"></div>
{outcome}</main>
<footer><p>&copy; {year} AI Grader. Powered by Google Gemini.</p></footer>
</div>
<script src="/assets/app.js"></script>
</body>
</html>
"#,
        refresh = refresh,
        doc_icon = DOCUMENT_ICON,
        uploaders = uploaders,
        button = render_button(snapshot),
        outcome = outcome,
        year = chrono::Utc::now().year(),
    )
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="alert" role="alert"><strong>Error: </strong><span>{}</span></div>
"#,
        encode_text(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvaluationResult;
    use std::sync::Arc;
    use uuid::Uuid;

    fn criterion(name: &str, status: EvaluationStatus, score: f64) -> CriterionEvaluation {
        CriterionEvaluation {
            criterion: name.to_string(),
            status,
            score,
            justification: format!("quote for {}", name),
            suggestion: format!("improve {}", name),
        }
    }

    fn run(overall: f64, items: Vec<CriterionEvaluation>) -> EvaluationRun {
        EvaluationRun {
            id: Uuid::new_v4(),
            evaluated_at: chrono::Utc::now(),
            latency_ms: 10,
            submission_name: "essay.pdf".to_string(),
            rubric_name: "rubric.pdf".to_string(),
            result: EvaluationResult {
                evaluation: items,
                overall_score: overall,
                overall_feedback: "Well done overall.".to_string(),
            },
        }
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::for_score(0.0), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(49.0), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(49.99), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(50.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(74.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(75.0), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(100.0), ScoreBand::High);
    }

    #[test]
    fn test_status_table() {
        assert_eq!(StatusStyle::for_status(EvaluationStatus::Fulfilled).label, "Fulfilled");
        assert_eq!(
            StatusStyle::for_status(EvaluationStatus::PartiallyFulfilled).tone,
            "tone-yellow"
        );
        assert_eq!(StatusStyle::for_status(EvaluationStatus::NotFulfilled).icon, X_CIRCLE_ICON);
    }

    #[test]
    fn test_report_renders_cards_in_order() {
        let report = render_report(&run(
            82.4,
            vec![
                criterion("Thesis", EvaluationStatus::Fulfilled, 95.0),
                criterion("Evidence", EvaluationStatus::PartiallyFulfilled, 70.5),
                criterion("Style", EvaluationStatus::NotFulfilled, 40.0),
            ],
        ));

        assert!(report.contains(r#"<div class="overall-score score-high">82%</div>"#));
        assert_eq!(report.matches("class=\"criterion-card").count(), 3);

        let thesis = report.find("<h4>Thesis</h4>").unwrap();
        let evidence = report.find("<h4>Evidence</h4>").unwrap();
        let style = report.find("<h4>Style</h4>").unwrap();
        assert!(thesis < evidence && evidence < style);

        assert!(report.contains(r#"<span class="criterion-score score-medium">70.5/100</span>"#));
        assert!(report.contains(r#"<span class="criterion-score score-low">40/100</span>"#));
        assert!(report.contains("Partially Fulfilled"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let report = render_report(&run(
            10.0,
            vec![criterion("<script>alert(1)</script>", EvaluationStatus::NotFulfilled, 10.0)],
        ));
        assert!(!report.contains("<script>"));
        assert!(report.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_uploader_views() {
        let empty = render_uploader(FileSlot::Submission, None);
        assert!(empty.contains("Student Activity PDF"));
        assert!(empty.contains(r#"accept=".pdf""#));
        assert!(empty.contains(r#"data-upload-url="/api/v1/files/submission""#));

        let selected = render_uploader(FileSlot::Rubric, Some("rubric & notes.pdf"));
        assert!(selected.contains(r#"title="rubric &amp; notes.pdf">rubric &amp; notes.pdf</span>"#));

        let quoted = render_uploader(FileSlot::Submission, Some(r#"my "final" essay.pdf"#));
        assert!(quoted.contains(r#"title="my &quot;final&quot; essay.pdf""#));
        assert!(selected.contains(r#"data-remove-url="/api/v1/files/rubric""#));
        assert!(!selected.contains("drop-zone"));
    }

    #[test]
    fn test_page_button_and_outcome() {
        let idle = GraderSnapshot {
            submission: Some("essay.pdf".to_string()),
            rubric: None,
            state: GraderState::Idle,
        };
        let page = render_page(&idle);
        assert!(page.contains(r#"data-endpoint="/api/v1/evaluate" disabled>Evaluate Documents"#));
        assert!(!page.contains("role=\"alert\""));

        let failed = GraderSnapshot {
            submission: Some("essay.pdf".to_string()),
            rubric: Some("rubric.pdf".to_string()),
            state: GraderState::Failed("Evaluation failed: <boom>".to_string()),
        };
        let page = render_page(&failed);
        assert!(page.contains(r#"data-endpoint="/api/v1/evaluate">Evaluate Documents"#));
        assert!(page.contains("Evaluation failed: &lt;boom&gt;"));

        let loading = GraderSnapshot {
            state: GraderState::Loading,
            ..failed.clone()
        };
        let page = render_page(&loading);
        assert!(page.contains("Analyzing..."));
        assert!(page.contains(" disabled>"));

        let success = GraderSnapshot {
            state: GraderState::Success(Arc::new(run(90.0, vec![]))),
            ..failed
        };
        assert!(render_page(&success).contains("Evaluation Report"));
    }
}
