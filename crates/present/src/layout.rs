//! Layout rules for section content.

use casebook_core::{ContentBlock, Score};

/// Width of a priority bar relative to its full scale, in `[0.0, 1.0]`.
pub fn priority_fraction(score: Score) -> f64 {
    score.fraction()
}

/// Split items into two columns by index parity.
///
/// Even indices go to the left column, odd indices to the right, preserving order within each.
pub fn split_by_parity<T>(items: impl IntoIterator<Item = T>) -> (Vec<T>, Vec<T>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if index % 2 == 0 {
            left.push(item);
        } else {
            right.push(item);
        }
    }
    (left, right)
}

/// A result card flattened for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card<'a> {
    pub icon: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

/// The result cards of a section arranged in two columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardColumns<'a> {
    pub left: Vec<Card<'a>>,
    pub right: Vec<Card<'a>>,
}

impl<'a> CardColumns<'a> {
    /// Collect every [`ContentBlock::ResultCard`] in `blocks` and split them by parity.
    pub fn from_blocks(blocks: &'a [ContentBlock]) -> Self {
        let (left, right) = split_by_parity(cards(blocks));
        Self { left, right }
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every result card in `blocks`, in order.
pub fn cards(blocks: &[ContentBlock]) -> Vec<Card<'_>> {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ResultCard {
                icon,
                title,
                description,
            } => Some(Card {
                icon: icon.as_str(),
                title: title.as_str(),
                description: description.as_str(),
            }),
            _ => None,
        })
        .collect()
}
