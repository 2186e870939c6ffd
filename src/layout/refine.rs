use super::GraphIndex;
use crate::config::LayoutConfig;

/// Fruchterman-Reingold relaxation seeded from the coarse positions.
///
/// Full pairwise repulsion, no spatial grid: node counts are capped by
/// the builder, so the quadratic inner loop stays tractable.
pub(super) fn fruchterman_reingold(
    index: &GraphIndex,
    positions: &mut [(f32, f32)],
    config: &LayoutConfig,
) {
    let n = positions.len();
    if n < 2 {
        return;
    }

    let (width, height) = extent(positions);
    let k = ((width * height) / n as f32).sqrt().max(config.min_distance);
    let mut temperature = width.max(height) / 10.0;
    let mut displacement = vec![(0.0f32, 0.0f32); n];

    for _ in 0..config.refine_iterations {
        for d in &mut displacement {
            *d = (0.0, 0.0);
        }

        // Repulsion between every node pair: k^2 / d.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[i].0 - positions[j].0;
                let dy = positions[i].1 - positions[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(config.min_distance);
                let force = (k * k) / dist;
                let fx = (dx / dist) * force;
                let fy = (dy / dist) * force;
                displacement[i].0 += fx;
                displacement[i].1 += fy;
                displacement[j].0 -= fx;
                displacement[j].1 -= fy;
            }
        }

        // Attraction along edges: d^2 / k.
        for &(a, b) in index.edges() {
            if a == b {
                continue;
            }
            let dx = positions[b].0 - positions[a].0;
            let dy = positions[b].1 - positions[a].1;
            let dist = (dx * dx + dy * dy).sqrt().max(config.min_distance);
            let force = (dist * dist) / k;
            let fx = (dx / dist) * force;
            let fy = (dy / dist) * force;
            displacement[a].0 += fx;
            displacement[a].1 += fy;
            displacement[b].0 -= fx;
            displacement[b].1 -= fy;
        }

        // Move each node along its net force, capped by the temperature.
        for (pos, disp) in positions.iter_mut().zip(&displacement) {
            let mag = (disp.0 * disp.0 + disp.1 * disp.1)
                .sqrt()
                .max(config.min_distance);
            let capped = mag.min(temperature);
            pos.0 += (disp.0 / mag) * capped;
            pos.1 += (disp.1 / mag) * capped;
        }

        temperature *= config.cooling;
    }
}

fn extent(positions: &[(f32, f32)]) -> (f32, f32) {
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for &(x, y) in positions {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0))
}
