use std::collections::BTreeMap;

use crate::data::model::FilteredTable;

// ---------------------------------------------------------------------------
// Cluster profiles: per-cluster mean feature vectors
// ---------------------------------------------------------------------------

/// How many (genre, cluster) pairs the genre chart keeps.
pub const TOP_GENRE_PAIRS: usize = 15;

/// Per-cluster arithmetic means of a fixed feature list, keyed by cluster
/// label in ascending order.
#[derive(Debug, Clone)]
pub struct ClusterProfiles {
    /// Feature names, in the order of each mean vector.
    pub features: Vec<String>,
    /// label → one mean per feature. NaN when no row in the cluster carries
    /// a numeric value for that feature.
    pub means: BTreeMap<i64, Vec<f64>>,
}

impl ClusterProfiles {
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

/// Group rows by cluster label and average each listed feature.
///
/// Non-numeric cells are skipped per feature, matching how the upstream
/// frame treats missing values. A single-member cluster is just a mean over
/// one row; an empty filtered table produces an empty mapping.
pub fn cluster_profiles(filtered: &FilteredTable, features: &[&str]) -> ClusterProfiles {
    // label → (per-feature sum, per-feature count)
    let mut acc: BTreeMap<i64, (Vec<f64>, Vec<usize>)> = BTreeMap::new();

    for (track, &label) in filtered.tracks.iter().zip(&filtered.labels) {
        let (sums, counts) = acc
            .entry(label)
            .or_insert_with(|| (vec![0.0; features.len()], vec![0; features.len()]));
        for (i, feature) in features.iter().enumerate() {
            if let Some(v) = track.numeric(feature) {
                sums[i] += v;
                counts[i] += 1;
            }
        }
    }

    let means = acc
        .into_iter()
        .map(|(label, (sums, counts))| {
            let row = sums
                .iter()
                .zip(&counts)
                .map(|(&sum, &n)| if n > 0 { sum / n as f64 } else { f64::NAN })
                .collect();
            (label, row)
        })
        .collect();

    ClusterProfiles {
        features: features.iter().map(|f| f.to_string()).collect(),
        means,
    }
}

// ---------------------------------------------------------------------------
// Cluster sizes
// ---------------------------------------------------------------------------

/// Row count per cluster label, ascending by label.
pub fn cluster_counts(filtered: &FilteredTable) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for &label in &filtered.labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Genre × cluster counts
// ---------------------------------------------------------------------------

/// Row count for one (genre, cluster) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreClusterCount {
    pub genre: String,
    pub cluster: i64,
    pub count: usize,
}

/// Count rows per (genre, cluster) pair, sort descending by count and keep
/// the `top_n` largest. Ties keep the ascending (genre, label) key order the
/// grouping produced, so the ranking is deterministic. Rows without a genre
/// value are skipped.
pub fn genre_cluster_counts(filtered: &FilteredTable, top_n: usize) -> Vec<GenreClusterCount> {
    let mut counts: BTreeMap<(String, i64), usize> = BTreeMap::new();
    for (track, &label) in filtered.tracks.iter().zip(&filtered.labels) {
        if let Some(genre) = track.genre() {
            *counts.entry((genre.to_string(), label)).or_insert(0) += 1;
        }
    }

    let mut pairs: Vec<GenreClusterCount> = counts
        .into_iter()
        .map(|((genre, cluster), count)| GenreClusterCount {
            genre,
            cluster,
            count,
        })
        .collect();

    pairs.sort_by(|a, b| b.count.cmp(&a.count));
    pairs.truncate(top_n);
    pairs
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_relative_eq;

    use crate::data::model::{Method, Track, TrackTable, Value};
    use crate::data::select::select_method;

    use super::*;

    fn track(genre: &str, cluster: i64, danceability: f64, energy: f64) -> Track {
        let mut fields = BTreeMap::new();
        fields.insert("genres".to_string(), Value::String(genre.to_string()));
        fields.insert("cluster".to_string(), Value::Integer(cluster));
        fields.insert("danceability".to_string(), Value::Float(danceability));
        fields.insert("energy".to_string(), Value::Float(energy));
        Track { fields }
    }

    fn filtered(tracks: Vec<Track>) -> FilteredTable {
        let table = TrackTable::new(
            vec![
                "genres".into(),
                "cluster".into(),
                "danceability".into(),
                "energy".into(),
            ],
            tracks,
        );
        select_method(&table, Method::KMeans).unwrap()
    }

    #[test]
    fn profile_means_match_hand_computed_example() {
        let filtered = filtered(vec![
            track("rock", 0, 0.2, 0.5),
            track("rock", 0, 0.4, 0.7),
            track("jazz", 0, 0.6, 0.9),
            track("pop", 1, 1.0, 0.0),
        ]);
        let profiles = cluster_profiles(&filtered, &["danceability", "energy"]);

        assert_eq!(profiles.means.len(), 2);
        assert_relative_eq!(profiles.means[&0][0], 0.4);
        assert_relative_eq!(profiles.means[&0][1], 0.7);
        // single-member cluster needs no special case
        assert_relative_eq!(profiles.means[&1][0], 1.0);
    }

    #[test]
    fn profile_skips_non_numeric_cells() {
        let mut sparse = track("rock", 0, 0.2, 0.5);
        sparse.fields.insert("energy".to_string(), Value::Null);
        let filtered = filtered(vec![sparse, track("rock", 0, 0.4, 0.3)]);

        let profiles = cluster_profiles(&filtered, &["danceability", "energy"]);
        assert_relative_eq!(profiles.means[&0][0], 0.3);
        // only one numeric energy value contributes
        assert_relative_eq!(profiles.means[&0][1], 0.3);
    }

    #[test]
    fn cluster_counts_are_keyed_ascending() {
        let filtered = filtered(vec![
            track("rock", 2, 0.1, 0.1),
            track("rock", 0, 0.1, 0.1),
            track("rock", 2, 0.1, 0.1),
        ]);
        let counts = cluster_counts(&filtered);
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(counts[&2], 2);
    }

    #[test]
    fn genre_counts_sum_to_row_count_before_truncation() {
        let tracks: Vec<Track> = (0..40)
            .map(|i| track(&format!("genre{}", i % 8), (i % 3) as i64, 0.5, 0.5))
            .collect();
        let filtered = filtered(tracks);

        let pairs = genre_cluster_counts(&filtered, usize::MAX);
        let total: usize = pairs.iter().map(|p| p.count).sum();
        assert_eq!(total, filtered.len());
    }

    #[test]
    fn top_n_truncation_is_descending_with_stable_ties() {
        // 18 distinct (genre, cluster) pairs, all count 1 except two heavy ones.
        let mut tracks: Vec<Track> = (0..18)
            .map(|i| track(&format!("g{i:02}"), 0, 0.5, 0.5))
            .collect();
        tracks.push(track("g00", 0, 0.5, 0.5));
        tracks.push(track("g00", 0, 0.5, 0.5));
        tracks.push(track("g01", 0, 0.5, 0.5));
        let filtered = filtered(tracks);

        let pairs = genre_cluster_counts(&filtered, TOP_GENRE_PAIRS);
        assert_eq!(pairs.len(), TOP_GENRE_PAIRS);
        assert_eq!(pairs[0].genre, "g00");
        assert_eq!(pairs[0].count, 3);
        assert_eq!(pairs[1].genre, "g01");
        assert_eq!(pairs[1].count, 2);
        // ties (count 1) keep ascending genre order from the grouping
        let tied: Vec<&str> = pairs[2..].iter().map(|p| p.genre.as_str()).collect();
        let mut sorted = tied.clone();
        sorted.sort();
        assert_eq!(tied, sorted);
        // counts never increase down the ranking
        assert!(pairs.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn empty_filtered_table_yields_empty_views() {
        let filtered = filtered(Vec::new());
        assert!(cluster_profiles(&filtered, &["danceability"]).is_empty());
        assert!(cluster_counts(&filtered).is_empty());
        assert!(genre_cluster_counts(&filtered, TOP_GENRE_PAIRS).is_empty());
    }
}
