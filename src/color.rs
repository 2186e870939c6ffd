use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::model::{GraphModel, GroupColor};

/// Group key for nodes that carry no group value.
pub const NO_GROUP_KEY: &str = "no_group";
/// Fixed color for the no-group sentinel.
pub const NO_GROUP_COLOR: &str = "#97C2FC";

const GROUP_PALETTE: [&str; 69] = [
    "#90EE90", "#708090", "#9370DB", "#AFEEEE", "#D3D3D3", "#B8860B", "#4B0082", "#CD853F",
    "#663399", "#9932CC", "#20B2AA", "#DCDCDC", "#8B4513", "#A9A9A9", "#808000", "#8B008B",
    "#B0C4DE", "#48D1CC", "#87CEEB", "#D2B48C", "#D8BFD8", "#E6E6FA", "#778899", "#8A2BE2",
    "#2F4F4F", "#800080", "#DB7093", "#BDB76B", "#A0522D", "#E0FFFF", "#7FFFD4", "#4169E1",
    "#f9bd38", "#EEE8AA", "#6A5ACD", "#A52A2A", "#FFFF00", "#FF0000", "#008000", "#28a9dd",
    "#e7ba52", "#9c9ede", "#ad494a", "#b5cf6b", "#ce6dbd", "#6b6ecf", "#8c6d31", "#e7969c",
    "#393b79", "#637939", "#9edae5", "#17becf", "#dbdb8d", "#bcbd22", "#7f7f7f", "#f7b6d2",
    "#e377c2", "#c49c94", "#aec7e8", "#8c564b", "#c5b0d5", "#9467bd", "#ff9896", "#2ca02c",
    "#d62728", "#98df8a", "#ffbb78", "#ff7f0e", "#1f77b4",
];

/// Resolves a color for every distinct group value on the node table.
///
/// The sentinel entry is always present. Numeric mode interpolates a
/// single channel between the gradient extremes; categorical mode walks
/// the fixed palette with a cursor and falls back to random colors once
/// the palette is exhausted.
pub fn resolve_group_colors(model: &GraphModel, numeric: bool) -> BTreeMap<String, GroupColor> {
    let mut groups: BTreeMap<String, GroupColor> = BTreeMap::new();
    groups.insert(
        NO_GROUP_KEY.to_string(),
        GroupColor {
            color: NO_GROUP_COLOR.to_string(),
        },
    );

    // Distinct groups in first-seen node order, so palette assignment is
    // stable for a given input.
    let mut order: Vec<(String, Option<f64>)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for node in model.nodes() {
        let Some(group) = &node.group else {
            continue;
        };
        let key = group.to_string();
        if seen.insert(key.clone()) {
            order.push((key, group.as_f64()));
        }
    }

    if numeric {
        let observed: Vec<f64> = order.iter().filter_map(|(_, v)| *v).collect();
        let min = observed.iter().copied().fold(f64::INFINITY, f64::min);
        let max = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for (key, value) in order {
            let channel = match value {
                Some(v) if max > min => (255.0 * (max - v) / (max - min)).round() as u8,
                _ => 0,
            };
            groups.insert(
                key,
                GroupColor {
                    color: format!("rgba(0,{channel},255,1)"),
                },
            );
        }
    } else {
        let mut rng = rand::thread_rng();
        for (cursor, (key, _)) in order.into_iter().enumerate() {
            let color = match GROUP_PALETTE.get(cursor) {
                Some(named) => (*named).to_string(),
                None => random_color(&mut rng),
            };
            groups.insert(key, GroupColor { color });
        }
    }

    groups
}

fn random_color(rng: &mut impl Rng) -> String {
    // Channels stay in a mid band so the result is readable on both
    // light and dark backgrounds.
    let r: u8 = rng.gen_range(50..=200);
    let g: u8 = rng.gen_range(50..=200);
    let b: u8 = rng.gen_range(50..=200);
    format!("rgb({r},{g},{b})")
}
