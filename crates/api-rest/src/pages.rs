//! HTML dashboard rendered with Askama.
//!
//! The page shows a section menu on the left and the selected section on the right. Block
//! lists are flattened into [`Item`]s first so the template only has to lay them out:
//! consecutive metrics share a row, consecutive bullets share a list, and all challenge axes or
//! result cards of a section are drawn together where the first one appears.

use askama::Template;
use axum::{
    extract::State,
    response::Html,
};
use casebook_core::constants::SCORE_SCALE;
use casebook_core::{AssetCatalog, AssetId, CardLayout, ContentBlock, RenderedView, Tone};
use casebook_present::layout::{cards, Card};
use casebook_present::{priority_fraction, split_by_parity, RadarChart};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::AppState;

/// Pixel width of the radar chart embedded in the page.
const INLINE_RADAR_SIZE: u32 = 420;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub section: Option<String>,
    pub variant: Option<String>,
}

pub(crate) struct NavLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

pub(crate) struct MetricView {
    pub label: String,
    pub value: String,
    pub delta: String,
}

pub(crate) struct PriorityView {
    pub label: String,
    pub score: u8,
    pub percent: String,
}

pub(crate) struct StageView {
    pub number: usize,
    pub name: String,
    pub description: String,
}

pub(crate) struct CardView {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl From<Card<'_>> for CardView {
    fn from(card: Card<'_>) -> Self {
        Self {
            icon: card.icon.to_owned(),
            title: card.title.to_owned(),
            description: card.description.to_owned(),
        }
    }
}

pub(crate) struct ImageView {
    pub src: Option<String>,
    pub alt: &'static str,
    pub caption: Option<String>,
}

pub(crate) enum Item {
    Paragraph(String),
    Heading(String),
    Metrics(Vec<MetricView>),
    Feature(String, String),
    Bullets(Vec<String>),
    /// CSS class suffix and text.
    Callout(&'static str, String),
    Priority(PriorityView),
    /// Inline SVG markup.
    Radar(String),
    Stages(Vec<StageView>),
    Cards(Vec<CardView>),
    CardColumns(Vec<CardView>, Vec<CardView>),
    Image(ImageView),
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    title: String,
    logo_src: Option<String>,
    logo_alt: &'static str,
    variants: Vec<NavLink>,
    sections: Vec<NavLink>,
    section: String,
    notices: Vec<String>,
    items: Vec<Item>,
}

fn href(variant: &str, section: &str) -> String {
    format!(
        "/?variant={}&section={}",
        urlencoding::encode(variant),
        urlencoding::encode(section)
    )
}

fn asset_src(assets: &AssetCatalog, asset: AssetId) -> Option<String> {
    assets
        .found_name(asset)
        .map(|name| format!("/assets/{}", urlencoding::encode(name)))
}

/// Flatten a rendered view into template items.
pub(crate) fn items(view: &RenderedView, assets: &AssetCatalog) -> Vec<Item> {
    let mut out: Vec<Item> = Vec::new();
    let mut radar_done = false;
    let mut cards_done = false;

    for block in &view.blocks {
        match block {
            ContentBlock::Paragraph { text } => out.push(Item::Paragraph(text.to_string())),
            ContentBlock::Heading { text } => out.push(Item::Heading(text.to_string())),
            ContentBlock::Metric {
                label,
                value,
                delta,
            } => {
                let metric = MetricView {
                    label: label.to_string(),
                    value: value.to_string(),
                    delta: delta.to_string(),
                };
                match out.last_mut() {
                    Some(Item::Metrics(row)) => row.push(metric),
                    _ => out.push(Item::Metrics(vec![metric])),
                }
            }
            ContentBlock::Feature { title, caption } => {
                out.push(Item::Feature(title.to_string(), caption.to_string()))
            }
            ContentBlock::Bullet { text } => match out.last_mut() {
                Some(Item::Bullets(list)) => list.push(text.to_string()),
                _ => out.push(Item::Bullets(vec![text.to_string()])),
            },
            ContentBlock::Callout { tone, text } => {
                let class = match tone {
                    Tone::Info => "info",
                    Tone::Success => "success",
                };
                out.push(Item::Callout(class, text.to_string()));
            }
            ContentBlock::PriorityItem { label, score } => {
                out.push(Item::Priority(PriorityView {
                    label: label.to_string(),
                    score: score.get(),
                    percent: format!("{:.0}", priority_fraction(*score) * 100.0),
                }))
            }
            ContentBlock::ChallengeAxis { .. } => {
                if radar_done {
                    continue;
                }
                radar_done = true;
                match RadarChart::from_blocks(None, &view.blocks) {
                    Some(chart) => out.push(Item::Radar(chart.to_svg(INLINE_RADAR_SIZE))),
                    // Too few axes for a contour: list them instead.
                    None => out.push(Item::Bullets(
                        view.blocks
                            .iter()
                            .filter_map(|b| match b {
                                ContentBlock::ChallengeAxis { label, complexity } => {
                                    Some(format!("{label}: {complexity}/{SCORE_SCALE}"))
                                }
                                _ => None,
                            })
                            .collect(),
                    )),
                }
            }
            ContentBlock::Stage { name, description } => {
                let number = match out.last() {
                    Some(Item::Stages(list)) => list.len() + 1,
                    _ => 1,
                };
                let stage = StageView {
                    number,
                    name: name.to_string(),
                    description: description.to_string(),
                };
                match out.last_mut() {
                    Some(Item::Stages(list)) => list.push(stage),
                    _ => out.push(Item::Stages(vec![stage])),
                }
            }
            ContentBlock::ResultCard { .. } => {
                if cards_done {
                    continue;
                }
                cards_done = true;
                let all = cards(&view.blocks).into_iter().map(CardView::from);
                match view.layout {
                    CardLayout::Stacked => out.push(Item::Cards(all.collect())),
                    CardLayout::Columns => {
                        let (left, right) = split_by_parity(all);
                        out.push(Item::CardColumns(left, right));
                    }
                }
            }
            ContentBlock::Image { asset, caption } => out.push(Item::Image(ImageView {
                src: asset_src(assets, *asset),
                alt: asset.alt_text(),
                caption: caption.as_ref().map(ToString::to_string),
            })),
        }
    }
    out
}

/// HTML dashboard
///
/// `?section=` and `?variant=` pick what to show. Unknown values fall back to the defaults and
/// the page explains what happened.
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let mut notices = Vec::new();
    let registry = &state.registry;

    let requested_variant = query.variant.as_deref().filter(|v| !v.is_empty());
    let navigator = match requested_variant.map(|id| registry.get(id)) {
        Some(Ok(navigator)) => navigator,
        Some(Err(e)) => {
            tracing::warn!("{}; showing the default variant", e);
            let fallback = registry.default_navigator();
            notices.push(format!(
                "Unknown variant {:?}; showing {}.",
                requested_variant.unwrap_or_default(),
                fallback.variant_id()
            ));
            fallback
        }
        None => registry.default_navigator(),
    };

    let outcome =
        navigator.select_or_default(query.section.as_deref().filter(|s| !s.is_empty()));
    if let Some(rejected) = &outcome.rejected {
        notices.push(format!(
            "Unknown section {:?}; showing {}.",
            rejected,
            outcome.selection.section()
        ));
    }
    let view = navigator.render_selection(&outcome.selection);

    let variants = registry
        .navigators()
        .map(|nav| NavLink {
            label: nav.variant_id().to_owned(),
            href: format!("/?variant={}", urlencoding::encode(nav.variant_id())),
            active: nav.variant_id() == navigator.variant_id(),
        })
        .collect();
    let sections = navigator
        .section_names()
        .into_iter()
        .map(|name| NavLink {
            label: name.to_owned(),
            href: href(navigator.variant_id(), name),
            active: name == view.section,
        })
        .collect();

    let template = DashboardTemplate {
        title: view.title.clone(),
        logo_src: asset_src(&state.assets, AssetId::Logo),
        logo_alt: AssetId::Logo.alt_text(),
        variants,
        sections,
        section: view.section.clone(),
        notices,
        items: items(&view, &state.assets),
    };

    template.render().map(Html).map_err(|e| {
        tracing::error!("Dashboard template error: {:?}", e);
        ApiError::Internal("Internal error".into())
    })
}
