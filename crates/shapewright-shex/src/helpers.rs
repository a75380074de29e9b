//! Helper class shapes
//!
//! `IRI AND @<Helper>` references need a shape asserting the class. The
//! registry collects one helper per distinct class during a single
//! formatting call and renders them after the primary shapes.

use std::collections::{BTreeMap, BTreeSet};

use crate::curie::{helper_label, shape_stem, with_shape_suffix};

#[derive(Debug, Default)]
pub struct HelperShapeRegistry {
    /// Labels already taken by primary shapes
    reserved: BTreeSet<String>,
    /// class CURIE → helper label
    helpers: BTreeMap<String, String>,
    /// helper labels handed out so far
    taken: BTreeSet<String>,
}

impl HelperShapeRegistry {
    pub fn new<I>(reserved: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            reserved: reserved.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Returns the helper label for `class_curie`, registering it on first use
    pub fn register(&mut self, class_curie: &str) -> String {
        if let Some(label) = self.helpers.get(class_curie) {
            return label.clone();
        }

        let mut label = helper_label(class_curie);
        if self.reserved.contains(&label) {
            let stem = shape_stem(&label).to_string();
            label = with_shape_suffix(format!("{}Class", stem));
        }
        if self.is_taken(&label) {
            let stem = shape_stem(&label).to_string();
            let mut n = 2;
            while self.is_taken(&format!("{}{}Shape", stem, n)) {
                n += 1;
            }
            label = format!("{}{}Shape", stem, n);
        }

        self.taken.insert(label.clone());
        self.helpers.insert(class_curie.to_string(), label.clone());
        label
    }

    fn is_taken(&self, label: &str) -> bool {
        self.taken.contains(label) || self.reserved.contains(label)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// `(label, class)` pairs ordered by label
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .helpers
            .iter()
            .map(|(class, label)| (label.as_str(), class.as_str()))
            .collect();
        entries.sort();
        entries
    }

    /// Renders every helper shape, ordered by label
    pub fn render(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(label, class)| class_shape(class, label))
            .collect()
    }
}

/// `<label> { rdf:type [<class>] + }` followed by a blank line
pub fn class_shape(class_curie: &str, label: &str) -> String {
    format!("{} {{ rdf:type [{}] + }}\n\n", label, class_curie)
}
