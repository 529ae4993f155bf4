use std::fmt::Write;

use super::{FeedView, END_OF_LIST_TEXT};

/// Plain-text layout for the terminal. Cards are numbered from 1 so they can
/// be addressed by `/toggle`.
pub fn render_text(view: &FeedView) -> String {
    let mut out = String::new();

    if view.search_term.is_empty() {
        out.push_str("Search: (all missions)\n");
    } else {
        let _ = writeln!(out, "Search: {:?}", view.search_term);
    }
    out.push('\n');

    for (number, card) in view.cards.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {}  <{}>  [{}]",
            number + 1,
            card.mission_name,
            card.status.as_str().to_lowercase(),
            card.toggle_label.to_uppercase()
        );

        if let Some(detail) = &card.detail {
            let mut meta = vec![detail.relative_time.clone()];
            if let Some(url) = &detail.article_link {
                meta.push(format!("Article: {}", url));
            }
            if let Some(url) = &detail.video_link {
                meta.push(format!("Video: {}", url));
            }
            let _ = writeln!(out, "    {}", meta.join(" | "));
            let _ = writeln!(out, "    Patch: {}", detail.patch_url);
            for line in detail.details.lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
    }

    if view.loading {
        out.push_str("\n    ... loading ...\n");
    }
    if view.end_of_list {
        let _ = writeln!(out, "\n{}", END_OF_LIST_TEXT);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "\n! {}", error);
    }

    out
}
