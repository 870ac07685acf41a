//! Domain model for case-study content.
//!
//! These types are only built by the validation pass in `content`, so every instance already
//! satisfies the content invariants: unique section names, non-empty text, and scores in
//! `0..=10`.

use crate::assets::AssetId;
use casebook_types::{NonEmptyText, Score};
use serde::Serialize;
use utoipa::ToSchema;

/// Visual weight of a [`ContentBlock::Callout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
}

/// How a section arranges its result cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CardLayout {
    /// One card under another.
    #[default]
    Stacked,
    /// Two columns, alternating by index parity: even indices left, odd indices right.
    Columns,
}

/// One unit of displayable content within a section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        #[schema(value_type = String)]
        text: NonEmptyText,
    },
    Heading {
        #[schema(value_type = String)]
        text: NonEmptyText,
    },
    Metric {
        #[schema(value_type = String)]
        label: NonEmptyText,
        #[schema(value_type = String)]
        value: NonEmptyText,
        #[schema(value_type = String)]
        delta: NonEmptyText,
    },
    /// Bold title with a caption underneath.
    Feature {
        #[schema(value_type = String)]
        title: NonEmptyText,
        #[schema(value_type = String)]
        caption: NonEmptyText,
    },
    Bullet {
        #[schema(value_type = String)]
        text: NonEmptyText,
    },
    Callout {
        tone: Tone,
        #[schema(value_type = String)]
        text: NonEmptyText,
    },
    /// A goal rated for importance, shown as a proportional bar.
    PriorityItem {
        #[schema(value_type = String)]
        label: NonEmptyText,
        #[schema(value_type = u8)]
        score: Score,
    },
    /// One spoke of the challenge radar chart.
    ChallengeAxis {
        #[schema(value_type = String)]
        label: NonEmptyText,
        #[schema(value_type = u8)]
        complexity: Score,
    },
    /// One step of the solution pipeline, shown as a collapsible item.
    Stage {
        #[schema(value_type = String)]
        name: NonEmptyText,
        #[schema(value_type = String)]
        description: NonEmptyText,
    },
    ResultCard {
        #[schema(value_type = String)]
        icon: NonEmptyText,
        #[schema(value_type = String)]
        title: NonEmptyText,
        #[schema(value_type = String)]
        description: NonEmptyText,
    },
    Image {
        asset: AssetId,
        #[schema(value_type = Option<String>)]
        caption: Option<NonEmptyText>,
    },
}

impl ContentBlock {
    /// The wire name of this block's variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Metric { .. } => "metric",
            ContentBlock::Feature { .. } => "feature",
            ContentBlock::Bullet { .. } => "bullet",
            ContentBlock::Callout { .. } => "callout",
            ContentBlock::PriorityItem { .. } => "priority_item",
            ContentBlock::ChallengeAxis { .. } => "challenge_axis",
            ContentBlock::Stage { .. } => "stage",
            ContentBlock::ResultCard { .. } => "result_card",
            ContentBlock::Image { .. } => "image",
        }
    }
}

/// One named page of the case study.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub(crate) name: NonEmptyText,
    pub(crate) layout: CardLayout,
    pub(crate) blocks: Vec<ContentBlock>,
}

impl Section {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn layout(&self) -> CardLayout {
        self.layout
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }
}

/// One configuration of the case-study copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentVariant {
    pub(crate) id: NonEmptyText,
    pub(crate) title: NonEmptyText,
    pub(crate) sections: Vec<Section>,
}

impl ContentVariant {
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// The content of one section, ready to hand to a presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct RenderedView {
    /// Variant the view was rendered from.
    pub variant: String,
    /// Document title of the variant.
    pub title: String,
    /// Name of the rendered section.
    pub section: String,
    /// Zero-based position of the section in menu order.
    pub position: usize,
    pub layout: CardLayout,
    pub blocks: Vec<ContentBlock>,
}

impl RenderedView {
    /// Blocks of one kind, in order.
    pub fn blocks_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ContentBlock> {
        self.blocks.iter().filter(move |block| block.kind() == kind)
    }
}
