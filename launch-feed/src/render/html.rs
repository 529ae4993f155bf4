use anyhow::{Context, Result};
use launch_common::LaunchStatus;
use std::fmt::Write;
use std::path::Path;

use super::{CardView, DetailView, FeedView, END_OF_LIST_TEXT};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Launches</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body>
<div class="container py-4">
"#;

const PAGE_TAIL: &str = "</div>\n</body>\n</html>\n";

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn badge_class(status: LaunchStatus) -> &'static str {
    match status {
        LaunchStatus::Success => "bg-success",
        LaunchStatus::Upcoming => "bg-info",
        LaunchStatus::Failed => "bg-danger",
    }
}

/// Render the view as a standalone Bootstrap page
pub fn render_html(view: &FeedView) -> String {
    let mut out = String::from(PAGE_HEAD);

    let _ = writeln!(
        out,
        r#"<div class="mb-3"><input type="text" class="form-control search py-2" placeholder="Search by mission name..." value="{}"></div>"#,
        escape_html(&view.search_term)
    );

    for card in &view.cards {
        write_card(&mut out, card);
    }

    if view.loading {
        out.push_str(
            r#"<div class="d-flex justify-content-center mt-4"><div class="spinner-border text-primary" role="status"></div></div>"#,
        );
        out.push('\n');
    }

    if view.end_of_list {
        let _ = writeln!(out, r#"<p class="text-center mt-4">{}</p>"#, END_OF_LIST_TEXT);
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, r#"<p class="text-danger text-center">{}</p>"#, escape_html(error));
    }

    out.push_str(PAGE_TAIL);
    out
}

fn write_card(out: &mut String, card: &CardView) {
    let _ = writeln!(
        out,
        r#"<div class="card mb-3 shadow" id="launch-{}-{}">"#,
        card.key.flight_number, card.key.index
    );
    out.push_str("<div class=\"card-body d-flex align-items-start\"><div>\n");

    let _ = writeln!(
        out,
        r#"<div class="d-flex gap-1 align-items-start"><h5 class="card-title fw-bold">{}</h5><span class="badge {} text-lowercase">{}</span></div>"#,
        escape_html(&card.mission_name),
        badge_class(card.status),
        card.status
    );

    if let Some(detail) = &card.detail {
        write_detail(out, detail);
    }

    let _ = writeln!(
        out,
        r#"<button class="btn btn-primary me-2 text-uppercase fw-medium">{}</button>"#,
        card.toggle_label
    );
    out.push_str("</div></div></div>\n");
}

fn write_detail(out: &mut String, detail: &DetailView) {
    out.push_str("<div class=\"mb-2 d-flex gap-1\">");
    let _ = write!(
        out,
        r#"<p class="text-muted mb-2">{}</p>"#,
        escape_html(&detail.relative_time)
    );
    for (label, link) in [("Article", &detail.article_link), ("Video", &detail.video_link)] {
        if let Some(url) = link {
            let _ = write!(
                out,
                r#"<div class="text-muted">|</div><a href="{}" target="_blank" rel="noopener noreferrer" class="text-primary fw-medium">{}</a>"#,
                escape_html(url),
                label
            );
        }
    }
    out.push_str("</div>\n");

    let _ = writeln!(
        out,
        r#"<div class="d-flex gap-2 mb-3"><img src="{}" alt="{}" class="me-3" style="width: 100px; height: 100px; object-fit: contain;"><p class="card-text">{}</p></div>"#,
        escape_html(&detail.patch_url),
        escape_html(&detail.patch_alt),
        escape_html(&detail.details)
    );
}

/// Write the rendered page to `path`
pub async fn export_html(view: &FeedView, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .context(format!("Failed to create directory {:?}", parent))?;
    }

    tokio::fs::write(path, render_html(view))
        .await
        .context(format!("Failed to write {:?}", path))?;

    tracing::info!("Exported {} cards to {:?}", view.cards.len(), path);
    Ok(())
}
