use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analysis::aggregate::{
    ClusterProfiles, GenreClusterCount, TOP_GENRE_PAIRS, cluster_counts, cluster_profiles,
    genre_cluster_counts,
};
use crate::analysis::project::{Projection, project_2d};
use crate::color::ClusterColors;
use crate::data::model::{FEATURE_COLUMNS, FilteredTable, Method, TrackTable};
use crate::data::select::select_method;

// ---------------------------------------------------------------------------
// Derived views for one method selection
// ---------------------------------------------------------------------------

/// Everything the renderer needs for the currently selected method.
/// Recomputed wholesale on every method switch; holds no cross-interaction
/// state.
pub struct MethodViews {
    pub filtered: FilteredTable,
    /// label → row count, ascending by label.
    pub cluster_counts: BTreeMap<i64, usize>,
    pub profiles: ClusterProfiles,
    /// Top (genre, cluster) pairs by count.
    pub genre_counts: Vec<GenreClusterCount>,
    /// None when the projection is undefined for this input; the scatter
    /// section shows the error instead.
    pub projection: Option<Projection>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is opened). Immutable once loaded;
    /// all derived views copy out of it.
    pub dataset: Option<Arc<TrackTable>>,

    /// Currently selected clustering method.
    pub method: Method,

    /// Derived views for `method` (None when nothing is loaded or the label
    /// column is missing).
    pub views: Option<MethodViews>,

    /// Colours for the current method's cluster labels.
    pub cluster_colors: Option<ClusterColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            method: Method::KMeans,
            views: None,
            cluster_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and build views for the current method.
    pub fn set_dataset(&mut self, table: TrackTable) {
        self.dataset = Some(Arc::new(table));
        self.rebuild_views();
    }

    /// Switch clustering method and recompute everything downstream.
    pub fn set_method(&mut self, method: Method) {
        if self.method != method {
            self.method = method;
            self.rebuild_views();
        }
    }

    /// Re-run selector, aggregator and projector for the current method.
    pub fn rebuild_views(&mut self) {
        self.status_message = None;
        self.views = None;
        self.cluster_colors = None;

        let Some(dataset) = &self.dataset else {
            return;
        };

        let filtered = match select_method(dataset, self.method) {
            Ok(filtered) => filtered,
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(e.to_string());
                return;
            }
        };

        let features: Vec<&str> = FEATURE_COLUMNS.to_vec();
        let projection = match project_2d(&filtered, &features) {
            Ok(projection) => Some(projection),
            Err(e) => {
                // Recoverable: the rest of the dashboard still renders.
                log::warn!("{e}");
                self.status_message = Some(e.to_string());
                None
            }
        };

        self.cluster_colors = Some(ClusterColors::new(&filtered.cluster_labels()));
        self.views = Some(MethodViews {
            cluster_counts: cluster_counts(&filtered),
            profiles: cluster_profiles(&filtered, &features),
            genre_counts: genre_cluster_counts(&filtered, TOP_GENRE_PAIRS),
            projection,
            filtered,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::data::model::{Track, Value};

    use super::*;

    fn dataset() -> TrackTable {
        let tracks = (0..6)
            .map(|i| {
                let mut fields = BTreeMap::new();
                fields.insert("genres".to_string(), Value::String("rock".into()));
                fields.insert("danceability".to_string(), Value::Float(0.1 * i as f64));
                fields.insert("energy".to_string(), Value::Float(0.9 - 0.1 * i as f64));
                fields.insert("valence".to_string(), Value::Float(0.5));
                fields.insert("tempo".to_string(), Value::Float(100.0 + i as f64));
                fields.insert("cluster".to_string(), Value::Integer(i % 2));
                // only one DBSCAN-labelled row: projection is degenerate there
                let dbscan = if i == 0 { Value::Integer(0) } else { Value::Null };
                fields.insert("cluster_dbscan".to_string(), dbscan);
                fields.insert("cluster_hc".to_string(), Value::Integer(i % 3));
                Track { fields }
            })
            .collect();
        TrackTable::new(
            vec![
                "genres".into(),
                "danceability".into(),
                "energy".into(),
                "valence".into(),
                "tempo".into(),
                "cluster".into(),
                "cluster_dbscan".into(),
                "cluster_hc".into(),
            ],
            tracks,
        )
    }

    #[test]
    fn set_dataset_builds_views_for_the_default_method() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        let views = state.views.as_ref().unwrap();
        assert_eq!(views.filtered.len(), 6);
        assert!(views.projection.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn degenerate_projection_keeps_aggregates_and_recovers_on_switch() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_method(Method::Dbscan);
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.filtered.len(), 1);
        assert!(views.projection.is_none());
        assert_eq!(views.cluster_counts[&0], 1);
        assert!(state.status_message.is_some());

        // next valid interaction recovers
        state.set_method(Method::Hierarchical);
        let views = state.views.as_ref().unwrap();
        assert!(views.projection.is_some());
        assert!(state.status_message.is_none());
    }
}
