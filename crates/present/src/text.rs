//! Plain-text rendering of a section for terminals.
//!
//! Widths are measured in terminal columns, so wide glyphs such as the result-card emoji
//! count as two.

use crate::layout::{cards, split_by_parity, Card};
use casebook_core::constants::SCORE_SCALE;
use casebook_core::{CardLayout, ContentBlock, RenderedView, Tone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest width the renderer will lay out for.
pub const MIN_WIDTH: usize = 48;

/// Gap between the two card columns.
const COLUMN_GAP: usize = 3;

/// Render a section as wrapped plain text no wider than `width` columns.
///
/// `width` is clamped to at least [`MIN_WIDTH`].
pub fn render_view(view: &RenderedView, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let mut out: Vec<String> = Vec::new();

    out.push(view.title.clone());
    out.push(format!("== {} ==", view.section));
    out.push(String::new());

    let mut stage_number = 0;
    let mut cards_done = false;
    for block in &view.blocks {
        match block {
            ContentBlock::Paragraph { text } => {
                out.extend(wrap(text.as_str(), width));
                out.push(String::new());
            }
            ContentBlock::Heading { text } => {
                out.push(text.as_str().to_owned());
                out.push("-".repeat(text.as_str().width().min(width)));
            }
            ContentBlock::Metric {
                label,
                value,
                delta,
            } => {
                out.push(format!("{label}: {value} ({delta})"));
            }
            ContentBlock::Feature { title, caption } => {
                out.push(format!("* {title}"));
                out.extend(indent(wrap(caption.as_str(), width - 2), 2));
            }
            ContentBlock::Bullet { text } => {
                let mut lines = wrap(text.as_str(), width - 2).into_iter();
                if let Some(first) = lines.next() {
                    out.push(format!("- {first}"));
                }
                out.extend(indent(lines.collect(), 2));
            }
            ContentBlock::Callout { tone, text } => {
                let tag = match tone {
                    Tone::Info => "[info] ",
                    Tone::Success => "[success] ",
                };
                out.push(String::new());
                out.extend(hanging(tag, text.as_str(), width));
                out.push(String::new());
            }
            ContentBlock::PriorityItem { label, score } => {
                out.push(label.as_str().to_owned());
                out.push(format!("  {} {}/{}", bar(score.get(), 20), score, SCORE_SCALE));
            }
            ContentBlock::ChallengeAxis { label, complexity } => {
                let label = pad(label.as_str(), 28);
                out.push(format!("{label}{} {complexity}", bar(complexity.get(), 10)));
            }
            ContentBlock::Stage { name, description } => {
                stage_number += 1;
                out.push(format!("{stage_number}. {name}"));
                out.extend(indent(wrap(description.as_str(), width - 4), 4));
            }
            ContentBlock::ResultCard { .. } => {
                // All cards of a section are laid out together at the first one.
                if cards_done {
                    continue;
                }
                cards_done = true;
                let all = cards(&view.blocks);
                match view.layout {
                    CardLayout::Stacked => {
                        for card in &all {
                            out.extend(card_lines(card, width));
                            out.push(String::new());
                        }
                    }
                    CardLayout::Columns => out.extend(columns(all, width)),
                }
            }
            ContentBlock::Image { asset, caption } => {
                out.push(format!("[image: {}]", asset.alt_text()));
                if let Some(caption) = caption {
                    out.extend(wrap(caption.as_str(), width));
                }
            }
        }
    }

    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn bar(value: u8, cells: usize) -> String {
    let filled = usize::from(value) * cells / usize::from(SCORE_SCALE);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(cells - filled))
}

fn card_lines(card: &Card<'_>, width: usize) -> Vec<String> {
    let mut lines = vec![truncate(&format!("{} {}", card.icon, card.title), width)];
    lines.extend(indent(wrap(card.description, width.saturating_sub(3).max(1)), 3));
    lines
}

fn columns(all: Vec<Card<'_>>, width: usize) -> Vec<String> {
    let column_width = (width - COLUMN_GAP) / 2;
    let (left, right) = split_by_parity(all);
    let left = column_lines(&left, column_width);
    let right = column_lines(&right, column_width);

    (0..left.len().max(right.len()))
        .map(|row| {
            let l = left.get(row).map(String::as_str).unwrap_or("");
            match right.get(row) {
                Some(r) if !r.is_empty() => {
                    format!("{}{}{r}", pad(l, column_width), " ".repeat(COLUMN_GAP))
                }
                _ => l.to_owned(),
            }
        })
        .collect()
}

fn column_lines(cards: &[Card<'_>], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for card in cards {
        lines.extend(card_lines(card, width));
        lines.push(String::new());
    }
    lines
}

/// Greedy word wrap by display width. Words wider than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if line_width > 0 && line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
            continue;
        }
        if line_width > 0 {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width + ch_width > width && line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(ch);
            line_width += ch_width;
        }
    }
    if line_width > 0 {
        lines.push(line);
    }
    lines
}

fn hanging(tag: &str, text: &str, width: usize) -> Vec<String> {
    let tag_width = tag.width();
    let body = wrap(text, width.saturating_sub(tag_width));
    body.into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{tag}{line}")
            } else {
                format!("{}{line}", " ".repeat(tag_width))
            }
        })
        .collect()
}

fn indent(lines: Vec<String>, by: usize) -> Vec<String> {
    let prefix = " ".repeat(by);
    lines
        .into_iter()
        .map(|line| format!("{prefix}{line}"))
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_owned();
    }
    format!("{text}{}", " ".repeat(width - used))
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        // Leave one column for the ellipsis.
        if out.width() + 1 > width {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}
