use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::analysis::project::Projection;
use crate::data::model::{FilteredTable, Method};

// ---------------------------------------------------------------------------
// CSV export of the filtered table
// ---------------------------------------------------------------------------

/// Default download name for a method's export: `music_clusters_<method>.csv`
/// with the method name lower-cased.
pub fn export_file_name(method: Method) -> String {
    format!("music_clusters_{}.csv", method.slug())
}

/// Serialize the filtered table as CSV: one header row, then one record per
/// surviving track, columns in source order. When a projection is supplied
/// its coordinates are appended as `pca1` / `pca2` columns; it must then be
/// parallel to the table.
pub fn write_csv<W: Write>(
    filtered: &FilteredTable,
    projection: Option<&Projection>,
    writer: W,
) -> Result<()> {
    if let Some(p) = projection {
        if p.coords.len() != filtered.len() {
            bail!(
                "projection has {} coordinates for {} rows",
                p.coords.len(),
                filtered.len()
            );
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = filtered.columns.iter().map(String::as_str).collect();
    if projection.is_some() {
        header.push("pca1");
        header.push("pca2");
    }
    csv_writer.write_record(&header).context("writing CSV header")?;

    for (row_no, track) in filtered.tracks.iter().enumerate() {
        let mut record: Vec<String> = filtered
            .columns
            .iter()
            .map(|col| {
                track
                    .fields
                    .get(col)
                    .map(|v| v.csv_field())
                    .unwrap_or_default()
            })
            .collect();
        if let Some(p) = projection {
            let [pc1, pc2] = p.coords[row_no];
            record.push(pc1.to_string());
            record.push(pc2.to_string());
        }
        csv_writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the export to a file path.
pub fn export_to_path(
    path: &Path,
    filtered: &FilteredTable,
    projection: Option<&Projection>,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating '{}'", path.display()))?;
    write_csv(filtered, projection, file)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::data::model::{Track, TrackTable, Value};
    use crate::data::select::select_method;

    use super::*;

    fn filtered() -> FilteredTable {
        let tracks = (0..3)
            .map(|i| {
                let mut fields = BTreeMap::new();
                fields.insert("name_song".to_string(), Value::String(format!("song {i}")));
                fields.insert("genres".to_string(), Value::String("rock".into()));
                fields.insert("tempo".to_string(), Value::Float(100.0 + i as f64));
                fields.insert("cluster".to_string(), Value::Integer(i % 2));
                Track { fields }
            })
            .collect();
        let table = TrackTable::new(
            vec![
                "name_song".into(),
                "genres".into(),
                "tempo".into(),
                "cluster".into(),
            ],
            tracks,
        );
        select_method(&table, Method::KMeans).unwrap()
    }

    fn parse(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_reader(bytes);
        let header = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn export_has_header_plus_one_row_per_track() {
        let filtered = filtered();
        let mut out = Vec::new();
        write_csv(&filtered, None, &mut out).unwrap();

        let (header, rows) = parse(&out);
        assert_eq!(header, vec!["name_song", "genres", "tempo", "cluster"]);
        assert_eq!(rows.len(), filtered.len());
        assert_eq!(rows[0], vec!["song 0", "rock", "100", "0"]);
    }

    #[test]
    fn projection_columns_are_appended() {
        let filtered = filtered();
        let projection = Projection {
            coords: vec![[0.25, -0.5], [1.0, 0.0], [-1.25, 0.5]],
            explained: [0.8, 0.2],
        };
        let mut out = Vec::new();
        write_csv(&filtered, Some(&projection), &mut out).unwrap();

        let (header, rows) = parse(&out);
        assert_eq!(header.last().map(String::as_str), Some("pca2"));
        assert_eq!(header[header.len() - 2], "pca1");
        assert_eq!(rows[0][4], "0.25");
        assert_eq!(rows[2][5], "0.5");
    }

    #[test]
    fn mismatched_projection_is_rejected() {
        let filtered = filtered();
        let projection = Projection {
            coords: vec![[0.0, 0.0]],
            explained: [1.0, 0.0],
        };
        let mut out = Vec::new();
        assert!(write_csv(&filtered, Some(&projection), &mut out).is_err());
    }

    #[test]
    fn export_round_trips_through_a_file() {
        let filtered = filtered();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name(Method::KMeans));
        export_to_path(&path, &filtered, None).unwrap();

        assert!(path.ends_with("music_clusters_k-means.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), filtered.len() + 1);
    }
}
