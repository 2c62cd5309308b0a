use chart_bind::core::{ChartKind, DataPoint, DataSource, Dataset, normalize_datasets};
use proptest::prelude::*;

fn series_strategy() -> impl Strategy<Value = Vec<Vec<DataPoint>>> {
    prop::collection::vec(
        prop::collection::vec((-1_000.0f64..1_000.0).prop_map(DataPoint::value), 0..6),
        1..6,
    )
}

fn kind_strategy() -> impl Strategy<Value = ChartKind> {
    prop_oneof![
        Just(ChartKind::Line),
        Just(ChartKind::Bar),
        Just(ChartKind::Pie),
        Just(ChartKind::PolarArea),
        Just(ChartKind::Radar),
    ]
}

fn existing_strategy() -> impl Strategy<Value = Vec<Dataset>> {
    prop::collection::vec(
        "[a-z]{1,5}".prop_map(|label| Dataset::new(Vec::new()).with_label(label)),
        0..6,
    )
}

proptest! {
    #[test]
    fn multi_series_count_always_matches_input(
        kind in kind_strategy(),
        input in series_strategy(),
        existing in existing_strategy(),
    ) {
        let datasets = normalize_datasets(
            kind,
            Some(DataSource::MultiSeries(&input)),
            existing,
            &[],
            None,
        ).expect("non-empty input normalizes");

        prop_assert_eq!(datasets.len(), input.len());
        for (dataset, points) in datasets.iter().zip(&input) {
            prop_assert_eq!(&dataset.data, points);
            prop_assert!(dataset.label_text().is_some());
            prop_assert!(!dataset.style.is_empty());
        }
    }

    #[test]
    fn single_series_never_resizes_a_populated_list(
        kind in kind_strategy(),
        input in prop::collection::vec((-10.0f64..10.0).prop_map(DataPoint::value), 0..8),
        existing in existing_strategy().prop_filter("non-empty", |list| !list.is_empty()),
    ) {
        let before = existing.len();
        let datasets = normalize_datasets(
            kind,
            Some(DataSource::Single(&input)),
            existing,
            &[],
            None,
        ).expect("normalize");

        prop_assert_eq!(datasets.len(), before);
        prop_assert_eq!(&datasets[0].data, &input);
    }
}
