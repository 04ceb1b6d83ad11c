use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the track table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.3}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to interpret the value as an integer cluster label.
    /// Finite floats are truncated (pandas `astype(int)` behaviour);
    /// everything else counts as unlabelled.
    pub fn as_label(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Serialize the value for CSV export. Floats keep their full
    /// round-trippable representation; nulls become empty fields.
    pub fn csv_field(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed column names of the clustered-tracks schema
// ---------------------------------------------------------------------------

/// Numeric audio features used for profiles and the 2D projection.
pub const FEATURE_COLUMNS: [&str; 4] = ["danceability", "energy", "valence", "tempo"];

/// Genre column name.
pub const GENRE_COLUMN: &str = "genres";

// ---------------------------------------------------------------------------
// Method – which precomputed clustering to display
// ---------------------------------------------------------------------------

/// Supported clustering methods. The assignments are computed upstream; each
/// variant only names the label column carrying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    KMeans,
    Dbscan,
    Hierarchical,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::KMeans, Method::Dbscan, Method::Hierarchical];

    /// Column holding this method's precomputed cluster labels.
    pub fn label_column(self) -> &'static str {
        match self {
            Method::KMeans => "cluster",
            Method::Dbscan => "cluster_dbscan",
            Method::Hierarchical => "cluster_hc",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Method::KMeans => "K-Means",
            Method::Dbscan => "DBSCAN",
            Method::Hierarchical => "Hierarchical",
        }
    }

    /// Lower-cased name used in the export file name.
    pub fn slug(self) -> String {
        self.display_name().to_lowercase()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Track – one row of the source table
// ---------------------------------------------------------------------------

/// A single track (one row of the source table).
#[derive(Debug, Clone)]
pub struct Track {
    /// Dynamic columns: column_name → value.
    pub fields: BTreeMap<String, Value>,
}

impl Track {
    /// Numeric view of a column, if present and numeric.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.fields.get(column).and_then(Value::as_f64)
    }

    /// The track's genre string, if present.
    pub fn genre(&self) -> Option<&str> {
        match self.fields.get(GENRE_COLUMN) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TrackTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Loaded once per process and never mutated;
/// every derived view is a copy.
#[derive(Debug, Clone)]
pub struct TrackTable {
    /// All tracks (rows).
    pub tracks: Vec<Track>,
    /// Column names in source order, preserved through to the export.
    pub columns: Vec<String>,
}

impl TrackTable {
    pub fn new(columns: Vec<String>, tracks: Vec<Track>) -> Self {
        TrackTable { tracks, columns }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredTable – rows labelled under one clustering method
// ---------------------------------------------------------------------------

/// The per-method view: rows that carry a label for the selected method,
/// with that label coerced to an integer.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    pub method: Method,
    /// Column names in source order (same set as the source table).
    pub columns: Vec<String>,
    /// Surviving rows; the method's label column holds `Value::Integer`.
    pub tracks: Vec<Track>,
    /// Cluster label per surviving row, parallel to `tracks`.
    pub labels: Vec<i64>,
    /// Rows dropped because they had no usable label (noise points).
    pub dropped: usize,
}

impl FilteredTable {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Distinct cluster labels, ascending.
    pub fn cluster_labels(&self) -> std::collections::BTreeSet<i64> {
        self.labels.iter().copied().collect()
    }

    /// Number of distinct genres among surviving rows.
    pub fn genre_count(&self) -> usize {
        self.tracks
            .iter()
            .filter_map(|t| t.genre())
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    }
}
