//! Start-up validation of content variants.
//!
//! Translates the YAML wire model into the domain model. Every check that can fail is run
//! here, once, so that rendering never meets malformed content.

use crate::content::wire::{BlockWire, SectionWire, VariantWire};
use crate::model::{ContentBlock, ContentVariant, Section};
use crate::{ContentError, ContentResult};
use casebook_types::{NonEmptyText, Score};
use std::collections::HashSet;

/// Validate a parsed variant and convert it into the domain model.
///
/// # Errors
///
/// Returns a [`ContentError`] if:
/// - the variant id, title, a section name or any block text is empty,
/// - the variant has no sections or a section has no blocks,
/// - two sections share a name,
/// - a priority score or challenge complexity is outside `0..=10`.
pub(crate) fn variant_from_wire(wire: VariantWire) -> ContentResult<ContentVariant> {
    let id = NonEmptyText::new(&wire.id).map_err(|_| ContentError::EmptyText {
        variant: "<unnamed>".into(),
        location: "variant id".into(),
    })?;
    let variant = id.as_str();
    let title = text(variant, "variant title", &wire.title)?;

    if wire.sections.is_empty() {
        return Err(ContentError::EmptyVariant(variant.to_owned()));
    }

    let mut seen = HashSet::new();
    let mut sections = Vec::with_capacity(wire.sections.len());
    for (position, section) in wire.sections.into_iter().enumerate() {
        let section = section_from_wire(variant, position, section)?;
        if !seen.insert(section.name.as_str().to_owned()) {
            return Err(ContentError::DuplicateSection {
                variant: variant.to_owned(),
                name: section.name.as_str().to_owned(),
            });
        }
        sections.push(section);
    }

    Ok(ContentVariant {
        id: id.clone(),
        title,
        sections,
    })
}

fn section_from_wire(variant: &str, position: usize, wire: SectionWire) -> ContentResult<Section> {
    let name = text(variant, &format!("sections[{position}].name"), &wire.name)?;
    if wire.blocks.is_empty() {
        return Err(ContentError::EmptySection {
            variant: variant.to_owned(),
            section: name.as_str().to_owned(),
        });
    }

    let blocks = wire
        .blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let scope = BlockScope {
                variant,
                section: name.as_str(),
                index,
            };
            block_from_wire(&scope, block)
        })
        .collect::<ContentResult<Vec<_>>>()?;

    Ok(Section {
        name,
        layout: wire.layout,
        blocks,
    })
}

struct BlockScope<'a> {
    variant: &'a str,
    section: &'a str,
    index: usize,
}

impl BlockScope<'_> {
    fn text(&self, field: &str, value: &str) -> ContentResult<NonEmptyText> {
        text(
            self.variant,
            &format!("section {:?} block {} {field}", self.section, self.index),
            value,
        )
    }

    fn score(&self, field: &'static str, label: &NonEmptyText, value: i64) -> ContentResult<Score> {
        Score::new(value).map_err(|_| ContentError::ScoreOutOfRange {
            variant: self.variant.to_owned(),
            section: self.section.to_owned(),
            label: label.as_str().to_owned(),
            field,
            value,
        })
    }
}

fn block_from_wire(scope: &BlockScope<'_>, wire: BlockWire) -> ContentResult<ContentBlock> {
    let block = match wire {
        BlockWire::Paragraph { text } => ContentBlock::Paragraph {
            text: scope.text("text", &text)?,
        },
        BlockWire::Heading { text } => ContentBlock::Heading {
            text: scope.text("text", &text)?,
        },
        BlockWire::Metric {
            label,
            value,
            delta,
        } => ContentBlock::Metric {
            label: scope.text("label", &label)?,
            value: scope.text("value", &value)?,
            delta: scope.text("delta", &delta)?,
        },
        BlockWire::Feature { title, caption } => ContentBlock::Feature {
            title: scope.text("title", &title)?,
            caption: scope.text("caption", &caption)?,
        },
        BlockWire::Bullet { text } => ContentBlock::Bullet {
            text: scope.text("text", &text)?,
        },
        BlockWire::Callout { tone, text } => ContentBlock::Callout {
            tone,
            text: scope.text("text", &text)?,
        },
        BlockWire::PriorityItem { label, score } => {
            let label = scope.text("label", &label)?;
            let score = scope.score("priority", &label, score)?;
            ContentBlock::PriorityItem { label, score }
        }
        BlockWire::ChallengeAxis { label, complexity } => {
            let label = scope.text("label", &label)?;
            let complexity = scope.score("complexity", &label, complexity)?;
            ContentBlock::ChallengeAxis { label, complexity }
        }
        BlockWire::Stage { name, description } => ContentBlock::Stage {
            name: scope.text("name", &name)?,
            description: scope.text("description", &description)?,
        },
        BlockWire::ResultCard {
            icon,
            title,
            description,
        } => ContentBlock::ResultCard {
            icon: scope.text("icon", &icon)?,
            title: scope.text("title", &title)?,
            description: scope.text("description", &description)?,
        },
        BlockWire::Image { asset, caption } => ContentBlock::Image {
            asset,
            // A blank caption is treated as no caption.
            caption: caption.and_then(|c| NonEmptyText::new(c).ok()),
        },
    };
    Ok(block)
}

fn text(variant: &str, location: &str, value: &str) -> ContentResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|_| ContentError::EmptyText {
        variant: variant.to_owned(),
        location: location.to_owned(),
    })
}
