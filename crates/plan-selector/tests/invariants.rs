//! Property-based checks of the reconciliation invariants.

use plan_model::{DisplayConfig, ResourceId, ResourceModel};
use plan_selector::ResourceSelector;
use proptest::prelude::*;
use std::collections::HashSet;

/// One reconciliation round: incoming `(id, name)` records plus a
/// requested selection, both deliberately unsorted and duplicated.
fn round() -> impl Strategy<Value = (Vec<(u32, String)>, Vec<u32>)> {
    (
        prop::collection::vec((0u32..16, "[a-z]{1,6}"), 0..12),
        prop::collection::vec(0u32..16, 0..12),
    )
}

fn apply(selector: &ResourceSelector, incoming: &[(u32, String)], selected: &[u32]) {
    let models: Vec<ResourceModel> = incoming
        .iter()
        .map(|(id, name)| ResourceModel::new(ResourceId(*id), name.clone()))
        .collect();
    let selected: HashSet<ResourceId> = selected.iter().copied().map(ResourceId).collect();
    selector.set_targets(&models, &selected).unwrap();
}

proptest! {
    #[test]
    fn targets_match_distinct_incoming_ids(rounds in prop::collection::vec(round(), 1..5)) {
        let selector = ResourceSelector::new(&DisplayConfig::new());

        for (incoming, selected) in &rounds {
            apply(&selector, incoming, selected);

            let expected: HashSet<ResourceId> =
                incoming.iter().map(|(id, _)| ResourceId(*id)).collect();
            let actual: HashSet<ResourceId> =
                selector.target_items().iter().map(|item| item.id()).collect();

            prop_assert_eq!(&actual, &expected);
            prop_assert_eq!(selector.target_items().len(), expected.len());
        }
    }

    #[test]
    fn selection_is_requested_ids_restricted_to_targets(rounds in prop::collection::vec(round(), 1..5)) {
        let selector = ResourceSelector::new(&DisplayConfig::new());

        for (incoming, selected) in &rounds {
            apply(&selector, incoming, selected);

            let target_ids: HashSet<ResourceId> =
                incoming.iter().map(|(id, _)| ResourceId(*id)).collect();
            let expected: HashSet<ResourceId> = selected
                .iter()
                .copied()
                .map(ResourceId)
                .filter(|id| target_ids.contains(id))
                .collect();
            let actual: HashSet<ResourceId> = selector.selected_ids().into_iter().collect();

            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn targets_stay_sorted_ascending(rounds in prop::collection::vec(round(), 1..5)) {
        let selector = ResourceSelector::new(&DisplayConfig::new());

        for (incoming, selected) in &rounds {
            apply(&selector, incoming, selected);

            let order: Vec<ResourceId> =
                selector.target_items().iter().map(|item| item.id()).collect();
            let mut sorted = order.clone();
            sorted.sort_unstable();

            prop_assert_eq!(order, sorted);
        }
    }

    #[test]
    fn removed_items_release_survivors_do_not(first in round(), second in round()) {
        let selector = ResourceSelector::new(&DisplayConfig::new());

        apply(&selector, &first.0, &first.1);
        let held = selector.target_items();

        apply(&selector, &second.0, &second.1);
        let surviving: HashSet<ResourceId> =
            second.0.iter().map(|(id, _)| ResourceId(*id)).collect();

        for item in &held {
            if surviving.contains(&item.id()) {
                prop_assert!(!item.is_released());
            } else {
                prop_assert!(item.is_released());
            }
        }
    }
}
