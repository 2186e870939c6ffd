#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Centers and scales the positions into the caller's envelope.
///
/// Each axis is centered on its mean and scaled so its largest absolute
/// coordinate equals the axis target: `scale` on y, `scale * scale_ratio`
/// on x. A zero-extent axis is already centered and stays at 0.
pub(super) fn rescale(positions: &mut [(f32, f32)], scale: f32, scale_ratio: f32) {
    if positions.is_empty() {
        return;
    }
    rescale_axis(positions, Axis::X, scale * scale_ratio);
    rescale_axis(positions, Axis::Y, scale);
}

fn rescale_axis(positions: &mut [(f32, f32)], axis: Axis, target: f32) {
    let n = positions.len() as f32;
    let value = |p: &(f32, f32)| match axis {
        Axis::X => p.0,
        Axis::Y => p.1,
    };

    let mean = positions.iter().map(value).sum::<f32>() / n;
    let max_abs = positions
        .iter()
        .map(|p| (value(p) - mean).abs())
        .fold(0.0f32, f32::max);
    let factor = if max_abs > 0.0 { target / max_abs } else { 0.0 };

    for p in positions.iter_mut() {
        match axis {
            Axis::X => p.0 = (p.0 - mean) * factor,
            Axis::Y => p.1 = (p.1 - mean) * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_hit_the_axis_targets() {
        let mut positions = vec![(0.0, 10.0), (4.0, 20.0), (8.0, 60.0)];
        rescale(&mut positions, 100.0, 2.0);

        let max_x = positions.iter().map(|p| p.0.abs()).fold(0.0f32, f32::max);
        let max_y = positions.iter().map(|p| p.1.abs()).fold(0.0f32, f32::max);
        assert!((max_x - 200.0).abs() < 1e-3);
        assert!((max_y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn rescale_is_idempotent() {
        let mut positions = vec![(1.0, -3.0), (5.0, 2.0), (-2.0, 8.0), (0.5, 0.5)];
        rescale(&mut positions, 500.0, 1.5);
        let once = positions.clone();
        rescale(&mut positions, 500.0, 1.5);
        for (a, b) in once.iter().zip(&positions) {
            assert!((a.0 - b.0).abs() < 1e-2);
            assert!((a.1 - b.1).abs() < 1e-2);
        }
    }

    #[test]
    fn degenerate_axis_collapses_to_zero() {
        let mut positions = vec![(7.0, 1.0), (7.0, 2.0), (7.0, 3.0)];
        rescale(&mut positions, 100.0, 1.0);
        for p in &positions {
            assert_eq!(p.0, 0.0);
        }
    }

    #[test]
    fn single_point_maps_to_the_origin() {
        let mut positions = vec![(42.0, -17.0)];
        rescale(&mut positions, 500.0, 1.5);
        assert_eq!(positions, vec![(0.0, 0.0)]);
    }
}
