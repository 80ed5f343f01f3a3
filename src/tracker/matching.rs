//! Hand to object association.

use ndarray::Array2;
use nalgebra::Point2;

use crate::detection::HandPose;
use crate::tracker::rect::Rect;

/// Points that stand for a hand when measuring how close it is to an object.
///
/// Uses the configured landmark indices that exist on this hand, or the
/// centroid when none of them do.
pub fn representative_points(hand: &HandPose, indices: &[usize]) -> Vec<Point2<f32>> {
    let picked: Vec<Point2<f32>> = indices
        .iter()
        .filter_map(|&i| hand.landmarks.get(i).copied())
        .collect();
    if !picked.is_empty() {
        return picked;
    }
    hand.centroid().into_iter().collect()
}

/// Closest distance between any representative point of `hand` and `rect`.
pub fn hand_distance(hand: &HandPose, rect: &Rect, indices: &[usize]) -> f32 {
    representative_points(hand, indices)
        .iter()
        .map(|p| rect.distance_to(p))
        .fold(f32::INFINITY, f32::min)
}

/// Distance matrix of shape (hands, objects).
pub fn proximity_cost(hands: &[HandPose], boxes: &[Rect], indices: &[usize]) -> Array2<f32> {
    let mut dists = Array2::zeros((hands.len(), boxes.len()));
    for (i, hand) in hands.iter().enumerate() {
        for (j, rect) in boxes.iter().enumerate() {
            dists[[i, j]] = hand_distance(hand, rect, indices);
        }
    }
    dists
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

/// One-to-one assignment minimizing total cost; pairs above `thresh` are rejected.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_rows: (0..num_rows).collect(),
            unmatched_cols: (0..num_cols).collect(),
        };
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_rows {
        for j in 0..num_cols {
            let cost = cost_matrix[[i, j]];
            padded[[i, j]] = if cost.is_finite() { cost as f64 } else { 1e6 };
        }
    }

    let mut matches = vec![];
    let mut unmatched_rows = vec![];
    let mut unmatched_cols_mask: Vec<bool> = vec![true; num_cols];

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] <= thresh {
                    matches.push((row_idx, col_idx));
                    unmatched_cols_mask[col_idx] = false;
                } else {
                    unmatched_rows.push(row_idx);
                }
            }
        }
        Err(_) => {
            unmatched_rows = (0..num_rows).collect();
        }
    }

    let unmatched_cols = unmatched_cols_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_rows,
        unmatched_cols,
    }
}
