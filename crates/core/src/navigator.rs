//! The content navigator.
//!
//! A navigator owns one validated [`ContentVariant`] and maps a section name to the ordered
//! content blocks of that section. It holds no mutable state: the current selection lives with
//! the caller (see [`crate::session`]) and is passed in on every render.
//!
//! Selection policy:
//! - [`Navigator::render`] and [`Navigator::select`] are strict and return
//!   [`NavigatorError::InvalidSelection`] for names outside the closed section set.
//! - Interactive surfaces use [`Navigator::select_or_default`], which falls back to the first
//!   section and records the rejected name in the [`SelectOutcome`].

use crate::model::{ContentVariant, RenderedView, Section};
use crate::{NavigatorError, NavigatorResult};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// A section name proven valid for the navigator that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Selection {
    variant: String,
    section: String,
}

impl Selection {
    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

/// Result of resolving a requested section name with the fallback policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectOutcome {
    pub selection: Selection,
    /// The requested name, when it was not a valid section and the default was used instead.
    pub rejected: Option<String>,
}

impl SelectOutcome {
    pub fn fell_back(&self) -> bool {
        self.rejected.is_some()
    }
}

#[derive(Debug)]
pub struct Navigator {
    variant: ContentVariant,
    index: HashMap<String, usize>,
}

impl Navigator {
    /// Build a navigator over a validated variant.
    ///
    /// Section names are unique in a [`ContentVariant`], so the lookup table is complete.
    pub fn new(variant: ContentVariant) -> Self {
        let index = variant
            .sections()
            .iter()
            .enumerate()
            .map(|(position, section)| (section.name().to_owned(), position))
            .collect();
        Self { variant, index }
    }

    pub fn variant_id(&self) -> &str {
        self.variant.id()
    }

    pub fn title(&self) -> &str {
        self.variant.title()
    }

    pub fn sections(&self) -> &[Section] {
        self.variant.sections()
    }

    /// Section names in menu order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections().iter().map(Section::name).collect()
    }

    /// The first section in menu order.
    pub fn default_section(&self) -> &Section {
        // A validated variant has at least one section.
        &self.variant.sections()[0]
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&position| &self.sections()[position])
    }

    /// The selection a new viewer starts on.
    pub fn default_selection(&self) -> Selection {
        self.selection_for(self.default_section())
    }

    /// Strictly resolve a section name.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidSelection`] if `name` is not one of this variant's
    /// sections.
    pub fn select(&self, name: &str) -> NavigatorResult<Selection> {
        self.section(name)
            .map(|section| self.selection_for(section))
            .ok_or_else(|| NavigatorError::InvalidSelection {
                name: name.to_owned(),
            })
    }

    /// Resolve a section name, falling back to the default section.
    ///
    /// `None` means no selection has been made yet and resolves to the default silently. An
    /// unknown name is logged and reported in [`SelectOutcome::rejected`].
    pub fn select_or_default(&self, name: Option<&str>) -> SelectOutcome {
        let Some(name) = name else {
            return SelectOutcome {
                selection: self.default_selection(),
                rejected: None,
            };
        };

        match self.select(name) {
            Ok(selection) => SelectOutcome {
                selection,
                rejected: None,
            },
            Err(e) => {
                tracing::warn!(
                    "{}; falling back to {:?} in variant {}",
                    e,
                    self.default_section().name(),
                    self.variant_id()
                );
                SelectOutcome {
                    selection: self.default_selection(),
                    rejected: Some(name.to_owned()),
                }
            }
        }
    }

    /// Render the section called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidSelection`] if `name` is not one of this variant's
    /// sections.
    pub fn render(&self, name: &str) -> NavigatorResult<RenderedView> {
        let position =
            self.index
                .get(name)
                .copied()
                .ok_or_else(|| NavigatorError::InvalidSelection {
                    name: name.to_owned(),
                })?;
        Ok(self.view_at(position))
    }

    /// Render a selection produced by [`Navigator::select`] or
    /// [`Navigator::select_or_default`].
    ///
    /// A selection made by a different navigator that names an unknown section renders the
    /// default section.
    pub fn render_selection(&self, selection: &Selection) -> RenderedView {
        if selection.variant != self.variant_id() {
            tracing::warn!(
                "selection from variant {} rendered by variant {}",
                selection.variant,
                self.variant_id()
            );
        }
        let position = self.index.get(&selection.section).copied().unwrap_or(0);
        self.view_at(position)
    }

    fn view_at(&self, position: usize) -> RenderedView {
        let section = &self.sections()[position];
        RenderedView {
            variant: self.variant_id().to_owned(),
            title: self.title().to_owned(),
            section: section.name().to_owned(),
            position,
            layout: section.layout(),
            blocks: section.blocks().to_vec(),
        }
    }

    fn selection_for(&self, section: &Section) -> Selection {
        Selection {
            variant: self.variant_id().to_owned(),
            section: section.name().to_owned(),
        }
    }
}
