use std::collections::BTreeMap;

use eframe::egui::{RichText, ScrollArea, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::analysis::aggregate::ClusterProfiles;
use crate::color::{ClusterColors, heat_color, heat_text_color};
use crate::state::{AppState, MethodViews};
use crate::ui::table;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the dashboard sections for the current method selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a clustered-tracks file to explore  (File → Open…)");
        });
        return;
    }

    let Some(views) = &state.views else {
        // Selection failed (missing label column); the top bar shows why.
        return;
    };
    let Some(colors) = &state.cluster_colors else {
        return;
    };

    let method = state.method;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Dataset overview");
            table::preview_table(ui, &views.filtered);
            ui.add_space(12.0);

            ui.heading(format!("{method} cluster distribution"));
            cluster_bar_chart(ui, views, colors);
            ui.add_space(12.0);

            ui.heading("Average feature values per cluster");
            profile_heatmap(ui, &views.profiles);
            ui.add_space(12.0);

            ui.heading("PCA projection (2D)");
            projection_scatter(ui, state, views, colors);
            ui.add_space(12.0);

            ui.heading(format!("Top genres across {method} clusters"));
            genre_bar_chart(ui, views, colors);
            ui.add_space(12.0);
        });
}

// ---------------------------------------------------------------------------
// Cluster size distribution
// ---------------------------------------------------------------------------

fn cluster_bar_chart(ui: &mut Ui, views: &MethodViews, colors: &ClusterColors) {
    let bars: Vec<Bar> = views
        .cluster_counts
        .iter()
        .map(|(&label, &count)| {
            Bar::new(label as f64, count as f64)
                .width(0.7)
                .fill(colors.color_for(label))
                .name(format!("cluster {label}"))
        })
        .collect();

    Plot::new("cluster_distribution")
        .height(220.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Cluster ID")
        .y_axis_label("Number of songs")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Cluster × feature heatmap
// ---------------------------------------------------------------------------

/// Cluster profile heatmap: one row per cluster, one column per feature,
/// colour normalized per feature so tempo does not drown the unit-scaled
/// features.
fn profile_heatmap(ui: &mut Ui, profiles: &ClusterProfiles) {
    if profiles.is_empty() {
        ui.label("No clusters to profile.");
        return;
    }

    let labels: Vec<i64> = profiles.means.keys().copied().collect();
    let n_rows = labels.len();
    let n_cols = profiles.features.len();

    // Per-feature value range across clusters, for the colour ramp.
    let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); n_cols];
    for row in profiles.means.values() {
        for (j, &v) in row.iter().enumerate() {
            if v.is_finite() {
                ranges[j].0 = ranges[j].0.min(v);
                ranges[j].1 = ranges[j].1.max(v);
            }
        }
    }

    let height = (n_rows as f32 * 36.0 + 60.0).clamp(140.0, 420.0);

    Plot::new("cluster_profile_heatmap")
        .height(height)
        .show_axes([false, false])
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(n_cols as f64 + 0.2)
        .include_y(-0.9)
        .include_y(n_rows as f64 + 0.2)
        .show(ui, |plot_ui| {
            for (i, &label) in labels.iter().enumerate() {
                // first cluster on top
                let y0 = (n_rows - 1 - i) as f64;
                let row = &profiles.means[&label];

                for (j, &value) in row.iter().enumerate() {
                    let (min, max) = ranges[j];
                    let span = max - min;
                    let t = if span.abs() < f64::EPSILON {
                        0.5
                    } else {
                        (value - min) / span
                    };

                    let x0 = j as f64;
                    let cell = Polygon::new(PlotPoints::from(vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ]))
                    .fill_color(heat_color(t))
                    .stroke(Stroke::NONE);
                    plot_ui.polygon(cell);

                    let annotation = if value.is_finite() {
                        format!("{value:.2}")
                    } else {
                        "–".to_string()
                    };
                    plot_ui.text(Text::new(
                        PlotPoint::new(x0 + 0.5, y0 + 0.5),
                        RichText::new(annotation)
                            .color(heat_text_color(t))
                            .size(11.0),
                    ));
                }

                plot_ui.text(Text::new(
                    PlotPoint::new(-0.6, y0 + 0.5),
                    RichText::new(format!("cluster {label}")).size(11.0),
                ));
            }

            for (j, feature) in profiles.features.iter().enumerate() {
                plot_ui.text(Text::new(
                    PlotPoint::new(j as f64 + 0.5, -0.45),
                    RichText::new(feature.clone()).size(11.0),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// 2D projection scatter
// ---------------------------------------------------------------------------

fn projection_scatter(ui: &mut Ui, state: &AppState, views: &MethodViews, colors: &ClusterColors) {
    let Some(projection) = &views.projection else {
        let reason = state
            .status_message
            .clone()
            .unwrap_or_else(|| "projection unavailable for this selection".to_string());
        ui.label(RichText::new(reason).weak());
        return;
    };

    // Group points by cluster so each label gets one legend entry.
    let mut grouped: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for (coord, &label) in projection.coords.iter().zip(&views.filtered.labels) {
        grouped.entry(label).or_default().push(*coord);
    }

    Plot::new("pca_scatter")
        .height(360.0)
        .legend(Legend::default())
        .x_axis_label("pca1")
        .y_axis_label("pca2")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (label, coords) in grouped {
                let points = Points::new(PlotPoints::from(coords))
                    .name(format!("cluster {label}"))
                    .color(colors.color_for(label))
                    .radius(2.5);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Genre × cluster bar chart
// ---------------------------------------------------------------------------

fn genre_bar_chart(ui: &mut Ui, views: &MethodViews, colors: &ClusterColors) {
    if views.genre_counts.is_empty() {
        ui.label("No genre data for this selection.");
        return;
    }

    let bars: Vec<Bar> = views
        .genre_counts
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            Bar::new(i as f64, pair.count as f64)
                .width(0.7)
                .fill(colors.color_for(pair.cluster))
                .name(format!("{} – cluster {}", pair.genre, pair.cluster))
        })
        .collect();

    let genre_labels: Vec<String> = views
        .genre_counts
        .iter()
        .map(|pair| pair.genre.clone())
        .collect();

    Plot::new("genre_clusters")
        .height(260.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 0.05 || idx < 0.0 {
                return String::new();
            }
            genre_labels
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
