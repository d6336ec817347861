//! Property tests for search.

use proptest::prelude::*;

use crate::core::catalog::ModelDescriptor;

use super::{Palette, highlight, normalize, rank, score, tokenize};

fn descriptor() -> impl Strategy<Value = ModelDescriptor> {
    (
        "[A-Za-z0-9 .-]{0,16}",
        "[A-Za-z ]{0,10}",
        "[a-z0-9/-]{1,16}",
        proptest::option::of("[A-Za-z ,]{0,24}"),
        proptest::option::of("[A-Za-z ]{0,8}"),
        0u64..2_000_000,
    )
        .prop_map(|(name, org, id, description, cost, context_length)| {
            let mut m = ModelDescriptor::new(name, org, id, context_length);
            m.description = description;
            m.cost = cost;
            m
        })
}

/// Catalog with unique identifiers (suffixing the index keeps them distinct).
fn catalog() -> impl Strategy<Value = Vec<ModelDescriptor>> {
    proptest::collection::vec(descriptor(), 0..12).prop_map(|models| {
        models
            .into_iter()
            .enumerate()
            .map(|(i, mut m)| {
                m.model_string_for_api = format!("{}-{}", m.model_string_for_api, i);
                m
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,40}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn rank_excludes_zero_priority_and_sorts(models in catalog(), query in "[a-z0-9 ]{1,12}") {
        prop_assume!(!tokenize(&query).is_empty());
        let tokens = tokenize(&query);
        let out = rank(&models, &query);

        prop_assert!(out.iter().all(|s| !s.priority.is_zero()));
        prop_assert!(out.windows(2).all(|w| w[0].priority >= w[1].priority));

        for m in &models {
            let returned = out.iter().any(|s| s.model.model_string_for_api == m.model_string_for_api);
            let (priority, _) = score(m, &tokens);
            prop_assert_eq!(returned, !priority.is_zero());
        }
    }

    #[test]
    fn highlight_is_lossless(text in "\\PC{0,60}", query in "\\PC{0,20}") {
        let spans = highlight(Some(&text), &query, &Palette::default());
        let rebuilt: String = spans.iter().map(|s| s.text).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn highlight_without_query_is_single_span(text in "\\PC{0,60}") {
        let spans = highlight(Some(&text), "", &Palette::default());
        prop_assert_eq!(spans.len(), 1);
        prop_assert_eq!(spans[0].text, text.as_str());
        prop_assert!(spans[0].color.is_none());
    }
}
