use nalgebra::{DMatrix, DVector};

use crate::data::model::FilteredTable;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// 2D PCA projection for the scatter plot
// ---------------------------------------------------------------------------

/// 2D coordinates per filtered row, plus the fraction of total variance each
/// component carries.
#[derive(Debug, Clone)]
pub struct Projection {
    /// `[pc1, pc2]` per row, parallel to the filtered table.
    pub coords: Vec<[f64; 2]>,
    /// Explained-variance ratio of the two components.
    pub explained: [f64; 2],
}

/// Project every row onto the two directions of maximum variance of the
/// feature matrix (principal component analysis via eigendecomposition of
/// the sample covariance).
///
/// The sign of each principal axis is arbitrary: eigensolvers are free to
/// flip either eigenvector, so only the relative arrangement of points is
/// stable across equivalent runs, not the orientation.
///
/// Fails with a computation error when the reduction is undefined: fewer
/// than 2 feature columns, fewer than 2 rows, or a row missing a numeric
/// value for one of the features.
pub fn project_2d(
    filtered: &FilteredTable,
    features: &[&str],
) -> Result<Projection, DashboardError> {
    let n = filtered.len();
    let d = features.len();
    if d < 2 {
        return Err(DashboardError::Computation(format!(
            "projection needs at least 2 feature columns, got {d}"
        )));
    }
    if n < 2 {
        return Err(DashboardError::Computation(format!(
            "projection needs at least 2 rows, got {n}"
        )));
    }

    let mut data = DMatrix::<f64>::zeros(n, d);
    for (i, track) in filtered.tracks.iter().enumerate() {
        for (j, feature) in features.iter().enumerate() {
            let value = track.numeric(feature).ok_or_else(|| {
                DashboardError::Computation(format!(
                    "row {i} has no numeric '{feature}' value"
                ))
            })?;
            data[(i, j)] = value;
        }
    }

    // Column-center before computing the covariance.
    for j in 0..d {
        let mean = data.column(j).mean();
        for i in 0..n {
            data[(i, j)] -= mean;
        }
    }

    let covariance = (data.transpose() * &data) / (n as f64 - 1.0);
    let eigen = covariance.symmetric_eigen();

    // nalgebra returns eigenpairs unordered; rank by eigenvalue descending.
    let mut order: Vec<usize> = (0..d).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let (first, second) = (order[0], order[1]);

    let axis1: DVector<f64> = eigen.eigenvectors.column(first).into_owned();
    let axis2: DVector<f64> = eigen.eigenvectors.column(second).into_owned();

    let pc1 = &data * &axis1;
    let pc2 = &data * &axis2;
    let coords = pc1
        .iter()
        .zip(pc2.iter())
        .map(|(&a, &b)| [a, b])
        .collect();

    // Tiny negative eigenvalues are numerical noise.
    let total: f64 = eigen.eigenvalues.iter().map(|&l| l.max(0.0)).sum();
    let explained = if total > 0.0 {
        [
            eigen.eigenvalues[first].max(0.0) / total,
            eigen.eigenvalues[second].max(0.0) / total,
        ]
    } else {
        [0.0, 0.0]
    };

    Ok(Projection { coords, explained })
}
