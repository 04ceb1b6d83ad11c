use crate::error::DashboardError;

use super::model::{FilteredTable, Method, TrackTable, Value};

// ---------------------------------------------------------------------------
// Cluster selection: one method's labelled rows
// ---------------------------------------------------------------------------

/// Build the per-method view of the table.
///
/// Rows without a usable label for the method's column are dropped (noise
/// points under density-based methods, unassigned rows under hierarchical
/// runs on a subsample); surviving labels are coerced to integers so the
/// label column is uniformly typed downstream.
///
/// Fails with a configuration error when the label column does not exist at
/// all — the dashboard cannot render that method without it.
pub fn select_method(table: &TrackTable, method: Method) -> Result<FilteredTable, DashboardError> {
    let column = method.label_column();
    if !table.has_column(column) {
        return Err(DashboardError::MissingColumn {
            column: column.to_string(),
        });
    }

    let mut tracks = Vec::with_capacity(table.len());
    let mut labels = Vec::with_capacity(table.len());
    let mut dropped = 0usize;

    for track in &table.tracks {
        match track.fields.get(column).and_then(Value::as_label) {
            Some(label) => {
                let mut track = track.clone();
                track
                    .fields
                    .insert(column.to_string(), Value::Integer(label));
                tracks.push(track);
                labels.push(label);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::info!("{method}: dropped {dropped} rows without a '{column}' label");
    }

    Ok(FilteredTable {
        method,
        columns: table.columns.clone(),
        tracks,
        labels,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::data::model::Track;

    use super::*;

    fn track(pairs: &[(&str, Value)]) -> Track {
        Track {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn table() -> TrackTable {
        TrackTable::new(
            vec![
                "genres".into(),
                "cluster".into(),
                "cluster_dbscan".into(),
                "cluster_hc".into(),
            ],
            vec![
                track(&[
                    ("genres", Value::String("rock".into())),
                    ("cluster", Value::Integer(0)),
                    ("cluster_dbscan", Value::Integer(1)),
                    ("cluster_hc", Value::Float(2.0)),
                ]),
                track(&[
                    ("genres", Value::String("jazz".into())),
                    ("cluster", Value::Integer(1)),
                    ("cluster_dbscan", Value::Null),
                    ("cluster_hc", Value::Null),
                ]),
                track(&[
                    ("genres", Value::String("pop".into())),
                    ("cluster", Value::Integer(0)),
                    ("cluster_dbscan", Value::Integer(0)),
                    ("cluster_hc", Value::Float(1.0)),
                ]),
            ],
        )
    }

    #[test]
    fn every_method_yields_integer_labels_without_nulls() {
        let table = table();
        for method in Method::ALL {
            let filtered = select_method(&table, method).unwrap();
            let column = method.label_column();
            for track in &filtered.tracks {
                assert!(matches!(track.fields[column], Value::Integer(_)));
            }
            assert_eq!(filtered.labels.len(), filtered.len());
        }
    }

    #[test]
    fn unlabelled_rows_are_dropped_and_counted() {
        let filtered = select_method(&table(), Method::Dbscan).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.dropped, 1);
        assert_eq!(filtered.labels, vec![1, 0]);
    }

    #[test]
    fn float_labels_are_coerced_to_integers() {
        let filtered = select_method(&table(), Method::Hierarchical).unwrap();
        assert_eq!(filtered.labels, vec![2, 1]);
        assert_eq!(
            filtered.tracks[0].fields["cluster_hc"],
            Value::Integer(2)
        );
    }

    #[test]
    fn missing_label_column_is_a_configuration_error() {
        let table = TrackTable::new(
            vec!["genres".into(), "cluster".into()],
            vec![track(&[
                ("genres", Value::String("rock".into())),
                ("cluster", Value::Integer(0)),
            ])],
        );
        let err = select_method(&table, Method::Dbscan).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::MissingColumn { ref column } if column == "cluster_dbscan"
        ));
    }

    #[test]
    fn fully_unlabelled_table_filters_to_empty_without_error() {
        let table = TrackTable::new(
            vec!["genres".into(), "cluster".into()],
            vec![track(&[
                ("genres", Value::String("rock".into())),
                ("cluster", Value::Null),
            ])],
        );
        let filtered = select_method(&table, Method::KMeans).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.dropped, 1);
    }
}
