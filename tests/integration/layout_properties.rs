//! Universal properties of the column layout engine

use conduit_grid::{compute_layout, compute_metrics, GridLayoutConfig};
use proptest::prelude::*;

use super::common::fixtures::{keys, Key};

fn config_strategy() -> impl Strategy<Value = GridLayoutConfig> {
    (1u16..80, 1u16..120, 1usize..8)
        .prop_map(|(min, preferred, max)| GridLayoutConfig::new(min, preferred, max))
}

fn flatten_by_index(items: &[Key], width: u16, config: &GridLayoutConfig) -> Vec<String> {
    let layout = compute_layout(items, width, config);
    let mut placed: Vec<(usize, String)> = Vec::new();
    for (column, group) in layout.column_groups.iter().enumerate() {
        for (row, item) in group.iter().enumerate() {
            placed.push((layout.original_index(column, row), item.0.clone()));
        }
    }
    placed.sort();
    placed.into_iter().map(|(_, key)| key).collect()
}

proptest! {
    #[test]
    fn test_partition_is_complete_and_ordered(
        n in 0usize..40,
        width in 0u16..400,
        config in config_strategy(),
    ) {
        let items = keys(n);
        let layout = compute_layout(&items, width, &config);

        prop_assert_eq!(layout.column_groups.len(), layout.columns);
        prop_assert_eq!(layout.item_count(), n);

        let expected: Vec<String> = items.iter().map(|k| k.0.clone()).collect();
        prop_assert_eq!(flatten_by_index(&items, width, &config), expected);

        // Relative order inside each column follows the input order
        for group in &layout.column_groups {
            let positions: Vec<usize> = group
                .iter()
                .map(|item| items.iter().position(|k| k == *item).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_column_groups_differ_by_at_most_one(
        n in 0usize..40,
        width in 0u16..400,
        config in config_strategy(),
    ) {
        let items = keys(n);
        let layout = compute_layout(&items, width, &config);

        let lengths: Vec<usize> = layout.column_groups.iter().map(Vec::len).collect();
        let longest = lengths.iter().copied().max().unwrap_or(0);
        let shortest = lengths.iter().copied().min().unwrap_or(0);
        prop_assert!(longest - shortest <= 1, "group lengths {:?}", lengths);

        // Earlier columns take the remainder
        prop_assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_layout_is_deterministic(
        n in 0usize..40,
        width in 0u16..400,
        config in config_strategy(),
    ) {
        let items = keys(n);
        let first = compute_layout(&items, width, &config);
        let second = compute_layout(&items, width, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_column_width_never_below_floor(
        n in 0usize..40,
        width in 0u16..400,
        config in config_strategy(),
    ) {
        let metrics = compute_metrics(n, width, &config);
        prop_assert!(metrics.columns >= 1);
        prop_assert!(metrics.columns <= config.max_columns);
        prop_assert!(metrics.column_width >= config.min_column_width);
    }

    #[test]
    fn test_single_item_is_single_column(
        width in 0u16..400,
        config in config_strategy(),
    ) {
        let items = keys(1);
        let layout = compute_layout(&items, width, &config);
        prop_assert_eq!(layout.columns, 1);
        prop_assert_eq!(layout.column_groups.len(), 1);
        prop_assert_eq!(layout.column_groups[0].len(), 1);
    }

    #[test]
    fn test_columns_grow_monotonically_with_width(
        n in 1usize..40,
        width in 1u16..399,
        extra in 1u16..100,
        config in config_strategy(),
    ) {
        let narrow = compute_metrics(n, width, &config);
        let wide = compute_metrics(n, width.saturating_add(extra), &config);
        prop_assert!(wide.columns >= narrow.columns);
    }

    #[test]
    fn test_single_column_until_two_floors_fit(
        n in 2usize..40,
        min in 1u16..80,
        offset in 0u16..80,
    ) {
        let config = GridLayoutConfig::new(min, min, 4);
        let width = min + offset % min;
        prop_assert_eq!(compute_metrics(n, width, &config).columns, 1);
        prop_assert_eq!(compute_metrics(n, 2 * min, &config).columns, 2);
    }
}

#[test]
fn test_worked_example_five_items() {
    let items = keys(5);
    let config = GridLayoutConfig::new(20, 30, 5);
    let layout = compute_layout(&items, 100, &config);

    assert_eq!(layout.columns, 5);
    assert_eq!(layout.column_width, 20);
    for (i, group) in layout.column_groups.iter().enumerate() {
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].0, format!("item-{}", i));
    }
    assert!(layout.is_compact());
}

#[test]
fn test_single_column_group_is_the_input() {
    let items = keys(3);
    let layout = compute_layout(&items, 30, &GridLayoutConfig::default());
    assert_eq!(layout.columns, 1);
    let group: Vec<&Key> = items.iter().collect();
    assert_eq!(layout.column_groups, vec![group]);
}
