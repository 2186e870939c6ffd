use super::GraphIndex;
use crate::config::LayoutConfig;

/// Coarse global placement in the style of Kamada-Kawai: positions are
/// pushed toward making euclidean distances proportional to graph
/// distances, under a fixed gradient-descent budget. This is a seed for
/// the refinement pass, not a final answer.
pub(super) fn kamada_kawai(index: &GraphIndex, config: &LayoutConfig) -> Vec<(f32, f32)> {
    let n = index.node_count();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![(0.0, 0.0)];
    }

    let distances = graph_distances(index);
    let mut positions = circle_seed(n);

    for _ in 0..config.coarse_iterations {
        for i in 0..n {
            let (xi, yi) = positions[i];
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let ideal = distances[i * n + j] as f32;
                let weight = 1.0 / (ideal * ideal);
                let dx = xi - positions[j].0;
                let dy = yi - positions[j].1;
                let len = (dx * dx + dy * dy).sqrt().max(1e-6);
                let coeff = weight * (len - ideal) / len;
                gx += coeff * dx;
                gy += coeff * dy;
            }
            positions[i].0 = xi - config.coarse_step * gx;
            positions[i].1 = yi - config.coarse_step * gy;
        }
    }

    positions
}

/// Deterministic seed: nodes spread on a circle in table order, so the
/// whole pipeline is reproducible for a given input.
fn circle_seed(n: usize) -> Vec<(f32, f32)> {
    let radius = (n as f32 / std::f32::consts::TAU).max(1.0);
    (0..n)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / n as f32;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// All-pairs BFS distances over the undirected view. Pairs in different
/// components get diameter + 1, which keeps isolated nodes at a finite
/// ideal distance from everything instead of breaking the descent.
fn graph_distances(index: &GraphIndex) -> Vec<u32> {
    let n = index.node_count();
    let adjacency = index.adjacency();
    let mut distances = vec![u32::MAX; n * n];

    let mut queue = std::collections::VecDeque::new();
    for start in 0..n {
        distances[start * n + start] = 0;
        queue.clear();
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            let next = distances[start * n + current] + 1;
            for &neighbor in &adjacency[current] {
                if distances[start * n + neighbor] == u32::MAX {
                    distances[start * n + neighbor] = next;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    let diameter = distances
        .iter()
        .copied()
        .filter(|&d| d != u32::MAX)
        .max()
        .unwrap_or(0);
    let fallback = (diameter + 1).max(1);
    for d in &mut distances {
        if *d == u32::MAX {
            *d = fallback;
        }
    }
    distances
}
