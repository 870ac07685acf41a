//! On-disk YAML representation of a content variant.
//!
//! This is a wire model: values are raw strings and integers. Range and uniqueness checks
//! happen when it is translated into the domain model.

use crate::assets::AssetId;
use crate::model::{CardLayout, Tone};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct VariantWire {
    pub id: String,
    pub title: String,
    pub sections: Vec<SectionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SectionWire {
    pub name: String,
    #[serde(default)]
    pub layout: CardLayout,
    pub blocks: Vec<BlockWire>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum BlockWire {
    Paragraph {
        text: String,
    },
    Heading {
        text: String,
    },
    Metric {
        label: String,
        value: String,
        delta: String,
    },
    Feature {
        title: String,
        caption: String,
    },
    Bullet {
        text: String,
    },
    Callout {
        tone: Tone,
        text: String,
    },
    PriorityItem {
        label: String,
        score: i64,
    },
    ChallengeAxis {
        label: String,
        complexity: i64,
    },
    Stage {
        name: String,
        description: String,
    },
    ResultCard {
        icon: String,
        title: String,
        description: String,
    },
    Image {
        asset: AssetId,
        #[serde(default)]
        caption: Option<String>,
    },
}
