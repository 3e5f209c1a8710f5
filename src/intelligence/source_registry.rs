// ABOUTME: Per-request snapshot of the nutrient source registry
// ABOUTME: Priority-ordered source list with source_id lookup for observation weighting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrifuse_core::models::SourceProfile;
use std::collections::HashMap;

/// Source registry loaded once per fusion request
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    ordered: Vec<SourceProfile>,
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Build a registry ordered by priority (then id); duplicate ids keep the first entry
    #[must_use]
    pub fn new(mut profiles: Vec<SourceProfile>) -> Self {
        profiles.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.source_id.cmp(&b.source_id))
        });

        let mut ordered = Vec::with_capacity(profiles.len());
        let mut index = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            if index.contains_key(&profile.source_id) {
                continue;
            }
            index.insert(profile.source_id.clone(), ordered.len());
            ordered.push(profile);
        }

        Self { ordered, index }
    }

    /// Look up a source by id
    #[must_use]
    pub fn get(&self, source_id: &str) -> Option<&SourceProfile> {
        self.index.get(source_id).map(|&i| &self.ordered[i])
    }

    /// All sources in priority order
    #[must_use]
    pub fn profiles(&self) -> &[SourceProfile] {
        &self.ordered
    }

    /// Number of registered sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the registry has no sources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_priority_and_indexes() {
        let registry = SourceRegistry::new(vec![
            SourceProfile::new("llm", "LLM estimate", 0.5, 5).unwrap(),
            SourceProfile::new("usda", "USDA", 0.95, 1).unwrap(),
        ]);

        assert_eq!(registry.profiles()[0].source_id, "usda");
        assert_eq!(registry.get("llm").unwrap().display_name, "LLM estimate");
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_highest_priority() {
        let registry = SourceRegistry::new(vec![
            SourceProfile::new("usda", "Second", 0.5, 2).unwrap(),
            SourceProfile::new("usda", "First", 0.9, 1).unwrap(),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("usda").unwrap().display_name, "First");
    }
}
