// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color to label lookup for hit testing.

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;
use peniko::Color;

use crate::color_key::ColorKey;
use crate::model::ChartData;

/// Maps segment colors back to their labels.
///
/// Built once from validated [`ChartData`] and never mutated; a data change builds a new index.
#[derive(Clone, Debug, Default)]
pub struct ColorLabelIndex {
    labels: HashMap<ColorKey, String>,
}

impl ColorLabelIndex {
    /// Builds the index for `data`.
    pub fn new(data: &ChartData) -> Self {
        let labels = data
            .items()
            .iter()
            .map(|d| (d.color, d.label.clone()))
            .collect();
        Self { labels }
    }

    /// Looks up the label for a key.
    pub fn label_for_key(&self, key: ColorKey) -> Option<&str> {
        self.labels.get(&key).map(String::as_str)
    }

    /// Looks up the label for a sampled color; translucent samples never match.
    pub fn label_for(&self, color: Color) -> Option<&str> {
        self.label_for_key(ColorKey::from_color(color)?)
    }

    /// Looks up the label for a color string, compared case-insensitively.
    pub fn label_for_hex(&self, hex: &str) -> Option<&str> {
        self.label_for_key(ColorKey::parse(hex).ok()?)
    }

    /// Number of indexed colors.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no colors are indexed.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
