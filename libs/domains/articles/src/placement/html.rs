use scraper::node::Comment;
use scraper::{ElementRef, Html, Node, Selector, StrTendril};

use crate::models::{ImagePlacement, ImageRef, Subheading};

/// Every non-empty `<h2>` in document order, inner markup stripped.
pub fn extract_subheadings(html: &str) -> Vec<Subheading> {
    let document = Html::parse_fragment(html);

    headings(&document)
        .into_iter()
        .enumerate()
        .map(|(index, (_, text))| Subheading { index, text })
        .collect()
}

/// Non-empty `<h2>` elements of a parsed fragment with their plain text.
///
/// Comments and raw-text elements never yield headings, and an unclosed
/// `<h2>` ends where the parser closes it.
fn headings(document: &Html) -> Vec<(ElementRef<'_>, String)> {
    let Ok(selector) = Selector::parse("h2") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| {
            let text = normalize_whitespace(&element.text().collect::<String>());
            (element, text)
        })
        .filter(|(_, text)| !text.is_empty())
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn figure_markup(image: &ImageRef) -> String {
    format!(
        r#"<figure class="article-image"><img src="{}" alt="{}" width="{}" height="{}" loading="lazy"></figure>"#,
        escape_attr(&image.url),
        escape_attr(&image.alt),
        image.width,
        image.height,
    )
}

/// Insert each placement's `<figure>` right after the first unused `<h2>`
/// whose text equals the placement's subheading.
///
/// Headings are the elements [`extract_subheadings`] reports. When at least
/// one placement applies, the returned HTML is serialized from the parsed
/// fragment, so tag case and unclosed elements come back normalized.
/// Placements without a matching heading are left out of the result; when
/// none applies the input is returned as is.
pub fn insert_images(
    html: &str,
    placements: Vec<ImagePlacement>,
) -> (String, Vec<ImagePlacement>) {
    let mut document = Html::parse_fragment(html);
    let targets: Vec<_> = headings(&document)
        .into_iter()
        .map(|(element, text)| (element.id(), text))
        .collect();
    let mut used = vec![false; targets.len()];

    let mut slots = Vec::new();
    let mut applied = Vec::new();

    for placement in placements {
        let target = targets
            .iter()
            .enumerate()
            .position(|(i, (_, text))| !used[i] && *text == placement.subheading);

        match target {
            Some(i) => {
                used[i] = true;
                slots.push((targets[i].0, figure_markup(&placement.image)));
                applied.push(placement);
            }
            None => {
                tracing::debug!(subheading = %placement.subheading, "No heading matches placement, skipping");
            }
        }
    }

    if slots.is_empty() {
        return (html.to_string(), applied);
    }

    // Figures go in as comment markers and are swapped for markup after
    // serialization; the nonce keeps markers distinct from author comments.
    let nonce = rand::random::<u64>();
    let marker = |slot: usize| format!("image-slot-{:016x}-{}", nonce, slot);

    for (slot, (id, _)) in slots.iter().enumerate() {
        if let Some(mut heading) = document.tree.get_mut(*id) {
            heading.insert_after(Node::Comment(Comment {
                comment: StrTendril::from(marker(slot)),
            }));
        }
    }

    let mut out = document.root_element().inner_html();
    for (slot, (_, markup)) in slots.iter().enumerate() {
        out = out.replacen(&format!("<!--{}-->", marker(slot)), markup, 1);
    }

    (out, applied)
}
