use std::cmp::Ordering;

use crate::config::LayoutConfig;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Closes anomalously large empty bands along each axis.
///
/// Only runs above the configured node count. Axes are independent, so
/// the processing order between them does not matter. Coordinates shift;
/// the slice order (and therefore node identity) never changes.
pub(super) fn contract_gaps(positions: &mut [(f32, f32)], config: &LayoutConfig) {
    if positions.len() <= config.gap_min_nodes {
        return;
    }
    contract_axis(positions, Axis::X, config);
    contract_axis(positions, Axis::Y, config);
}

fn contract_axis(positions: &mut [(f32, f32)], axis: Axis, config: &LayoutConfig) {
    let n = positions.len();
    if n < 2 {
        return;
    }
    let get = |positions: &[(f32, f32)], i: usize| match axis {
        Axis::X => positions[i].0,
        Axis::Y => positions[i].1,
    };

    // Work through a rank permutation so the original row order survives.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        get(positions, a)
            .partial_cmp(&get(positions, b))
            .unwrap_or(Ordering::Equal)
    });

    let diffs: Vec<(f32, usize)> = (0..n - 1)
        .map(|rank| {
            (
                get(positions, order[rank + 1]) - get(positions, order[rank]),
                rank,
            )
        })
        .collect();

    let mean = diffs.iter().map(|(d, _)| *d).sum::<f32>() / diffs.len() as f32;
    let variance =
        diffs.iter().map(|(d, _)| (*d - mean) * (*d - mean)).sum::<f32>() / diffs.len() as f32;
    let bound = mean + config.gap_deviation_factor * variance.sqrt();

    // Largest gap first. Translating everything beyond a gap by a
    // constant leaves every other consecutive difference unchanged, so a
    // bound computed once stays valid for the whole sweep.
    let mut ranked = diffs;
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    for (diff, rank) in ranked {
        if diff <= bound {
            break;
        }
        let shift = diff * config.gap_translation_factor;
        for &idx in &order[rank + 1..] {
            match axis {
                Axis::X => positions[idx].0 -= shift,
                Axis::Y => positions[idx].1 -= shift,
            }
        }
    }
}
