use crate::config::{GroupOrder, GroupSizing, LayoutConfig, SortSubgroups};
use log::debug;
use mixchord_matrix::{IngredientMatrix, WeightMatrix};
use mixchord_traits::{Category, IngredientIndex};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Arc of one ingredient. Angles are in radians, 0 at 12 o'clock, growing
/// clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub index: IngredientIndex,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Sum of the ingredient's matrix row.
    pub value: u64,
    pub category: Category,
}

impl Group {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// One end of a ribbon: a sub-span of the group arc of `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordEndpoint {
    pub index: IngredientIndex,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: u32,
}

impl ChordEndpoint {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Ribbon between two ingredients. The source is the lower index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub source: ChordEndpoint,
    pub target: ChordEndpoint,
}

impl Chord {
    pub fn weight(&self) -> u32 {
        self.source.value.max(self.target.value)
    }

    pub fn touches(&self, index: IngredientIndex) -> bool {
        self.source.index == index || self.target.index == index
    }

    /// The endpoint facing `index`, if the chord touches it.
    pub fn other(&self, index: IngredientIndex) -> Option<IngredientIndex> {
        if self.source.index == index {
            Some(self.target.index)
        } else if self.target.index == index {
            Some(self.source.index)
        } else {
            None
        }
    }
}

/// A run of neighbouring groups sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryArc {
    pub category: Category,
    pub start_angle: f64,
    pub end_angle: f64,
    pub groups: Vec<IngredientIndex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordLayout {
    /// Indexed by ingredient.
    pub groups: Vec<Group>,
    /// Ingredients in circular order.
    pub order: Vec<IngredientIndex>,
    /// One per connected pair, pairs in ingredient order.
    pub chords: Vec<Chord>,
    pub category_arcs: Vec<CategoryArc>,
    /// Padding actually used after every group.
    pub pad_angle: f64,
}

impl ChordLayout {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, index: IngredientIndex) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn category_of(&self, index: IngredientIndex) -> Option<Category> {
        self.groups.get(index).map(|g| g.category)
    }

    pub fn max_chord_weight(&self) -> u32 {
        self.chords.iter().map(Chord::weight).max().unwrap_or(0)
    }

    pub fn max_group_value(&self) -> u64 {
        self.groups.iter().map(|g| g.value).max().unwrap_or(0)
    }

    /// Sum of every group span plus every pad, 2π for a non empty layout.
    pub fn angular_coverage(&self) -> f64 {
        self.groups.iter().map(Group::span).sum::<f64>() + self.pad_angle * self.groups.len() as f64
    }
}

/// Computes a [`ChordLayout`] from an [`IngredientMatrix`].
///
/// The output is a pure function of the matrix and the configuration: every
/// loop runs in ingredient order and sorts are stable.
#[derive(Debug, Clone, Default)]
pub struct ChordLayoutEngine {
    config: LayoutConfig,
}

impl ChordLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self, matrix: &IngredientMatrix) -> ChordLayout {
        let n = matrix.len();
        if n == 0 {
            return ChordLayout::default();
        }
        let weights = matrix.weights();
        let pad = self.effective_pad(n);
        let allocatable = (TAU - pad * n as f64).max(0.0);
        let sums: Vec<u64> = (0..n).map(|i| weights.row_sum(i)).collect();
        let spans = self.group_spans(&sums, allocatable);
        let order = self.group_order(matrix);

        // subgroups[i * n + j]: the part of group i's arc facing j
        let mut subgroups: Vec<Option<(f64, f64)>> = vec![None; n * n];
        let mut groups: Vec<Option<Group>> = vec![None; n];
        let mut x = 0.0;
        for &i in &order {
            let x0 = x;
            if sums[i] > 0 {
                let k = spans[i] / sums[i] as f64;
                for j in self.partner_order(weights, i) {
                    let w = weights.get(i, j);
                    if w == 0 {
                        continue;
                    }
                    let a0 = x;
                    x += w as f64 * k;
                    subgroups[i * n + j] = Some((a0, x));
                }
            }
            x = x0 + spans[i];
            groups[i] = Some(Group {
                index: i,
                start_angle: x0,
                end_angle: x,
                value: sums[i],
                category: matrix.category(i),
            });
            x += pad;
        }
        let groups: Vec<Group> = groups.into_iter().flatten().collect();

        let mut chords = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let w = weights.get(i, j);
                if w == 0 {
                    continue;
                }
                if let (Some((s0, s1)), Some((t0, t1))) = (subgroups[i * n + j], subgroups[j * n + i]) {
                    chords.push(Chord {
                        source: ChordEndpoint {
                            index: i,
                            start_angle: s0,
                            end_angle: s1,
                            value: w,
                        },
                        target: ChordEndpoint {
                            index: j,
                            start_angle: t0,
                            end_angle: t1,
                            value: w,
                        },
                    });
                }
            }
        }

        let category_arcs = category_arcs(&groups, &order);
        debug!(
            "Laid out {} groups, {} chords, {} category arcs",
            groups.len(),
            chords.len(),
            category_arcs.len()
        );
        ChordLayout {
            groups,
            order,
            chords,
            category_arcs,
            pad_angle: pad,
        }
    }

    fn effective_pad(&self, n: usize) -> f64 {
        // f64::max drops a NaN pad
        self.config.pad_angle.max(0.0).min(TAU / n as f64)
    }

    fn group_spans(&self, sums: &[u64], allocatable: f64) -> Vec<f64> {
        let n = sums.len();
        let even = allocatable / n as f64;
        let total: u64 = sums.iter().sum();
        if self.config.sizing == GroupSizing::Uniform || total == 0 {
            return vec![even; n];
        }
        let min_angle = self.config.min_group_angle.max(0.0).min(even);
        let empty = sums.iter().filter(|&&s| s == 0).count();
        let k = (allocatable - min_angle * empty as f64) / total as f64;
        sums.iter()
            .map(|&s| if s == 0 { min_angle } else { s as f64 * k })
            .collect()
    }

    fn group_order(&self, matrix: &IngredientMatrix) -> Vec<IngredientIndex> {
        let mut order: Vec<IngredientIndex> = (0..matrix.len()).collect();
        if self.config.group_order == GroupOrder::Category {
            order.sort_by_key(|&i| matrix.category(i).rank());
        }
        order
    }

    fn partner_order(&self, weights: &WeightMatrix, i: IngredientIndex) -> Vec<IngredientIndex> {
        let mut partners: Vec<IngredientIndex> = (0..weights.size()).collect();
        if self.config.sort_subgroups == SortSubgroups::Descending {
            partners.sort_by(|&a, &b| weights.get(i, b).cmp(&weights.get(i, a)));
        }
        partners
    }
}

/// Lays out `matrix` with `config`.
pub fn layout(matrix: &IngredientMatrix, config: &LayoutConfig) -> ChordLayout {
    ChordLayoutEngine::new(config.clone()).layout(matrix)
}

fn category_arcs(groups: &[Group], order: &[IngredientIndex]) -> Vec<CategoryArc> {
    let mut arcs: Vec<CategoryArc> = Vec::new();
    for &i in order {
        let group = &groups[i];
        match arcs.last_mut() {
            Some(arc) if arc.category == group.category => {
                arc.end_angle = group.end_angle;
                arc.groups.push(i);
            }
            _ => arcs.push(CategoryArc {
                category: group.category,
                start_angle: group.start_angle,
                end_angle: group.end_angle,
                groups: vec![i],
            }),
        }
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MIN_GROUP_ANGLE;

    const EPS: f64 = 1e-9;

    fn sample() -> IngredientMatrix {
        IngredientMatrix::from_rows(
            &["Vodka", "Juice", "Mint"],
            &[vec![0, 5, 1], vec![5, 0, 3], vec![1, 3, 0]],
        )
        .unwrap()
    }

    fn declaration() -> LayoutConfig {
        LayoutConfig {
            group_order: GroupOrder::Declaration,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn groups_follow_row_sums() {
        let layout = layout(&sample(), &declaration());
        assert_eq!(layout.order, vec![0, 1, 2]);
        let values: Vec<u64> = layout.groups.iter().map(|g| g.value).collect();
        assert_eq!(values, vec![6, 8, 4]);
        let g = &layout.groups;
        assert!((g[0].span() / g[1].span() - 6.0 / 8.0).abs() < EPS);
        assert!((g[2].span() / g[1].span() - 4.0 / 8.0).abs() < EPS);
        assert!((layout.angular_coverage() - TAU).abs() < EPS);
        // padding between neighbours
        assert!((g[1].start_angle - g[0].end_angle - 0.05).abs() < EPS);
        assert_eq!(g[0].start_angle, 0.0);
    }

    #[test]
    fn one_chord_per_connected_pair() {
        let layout = layout(&sample(), &LayoutConfig::default());
        let pairs: Vec<(usize, usize, u32)> = layout
            .chords
            .iter()
            .map(|c| (c.source.index, c.target.index, c.weight()))
            .collect();
        assert_eq!(pairs, vec![(0, 1, 5), (0, 2, 1), (1, 2, 3)]);
    }

    #[test]
    fn subgroups_nest_inside_groups() {
        let layout = layout(&sample(), &LayoutConfig::default());
        for chord in &layout.chords {
            for end in [chord.source, chord.target] {
                let g = layout.group(end.index).unwrap();
                assert!(end.start_angle >= g.start_angle - EPS);
                assert!(end.end_angle <= g.end_angle + EPS);
                let expected = g.span() * end.value as f64 / g.value as f64;
                assert!((end.end_angle - end.start_angle - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn descending_subgroups_put_heaviest_partner_first() {
        let layout = layout(&sample(), &declaration());
        // Juice: Vodka (5) then Mint (3)
        let juice = layout.groups[1];
        let to_vodka = layout.chords[0].target;
        let to_mint = layout.chords[2].source;
        assert_eq!(to_vodka.index, 1);
        assert!((to_vodka.start_angle - juice.start_angle).abs() < EPS);
        assert!((to_mint.start_angle - to_vodka.end_angle).abs() < EPS);
    }

    #[test]
    fn unsorted_subgroups_follow_declaration() {
        let config = LayoutConfig {
            sort_subgroups: SortSubgroups::None,
            ..declaration()
        };
        let layout = layout(&sample(), &config);
        // Mint: Vodka (1) then Juice (3)
        let mint = layout.groups[2];
        let to_vodka = layout.chords[1].target;
        assert_eq!(to_vodka.index, 2);
        assert!((to_vodka.start_angle - mint.start_angle).abs() < EPS);
    }

    #[test]
    fn category_order_buckets_groups() {
        let m = IngredientMatrix::from_rows(
            &["Lime", "Gin", "Mint", "Tonic water", "Rum"],
            &[
                vec![0, 2, 1, 0, 1],
                vec![2, 0, 0, 3, 0],
                vec![1, 0, 0, 0, 2],
                vec![0, 3, 0, 0, 0],
                vec![1, 0, 2, 0, 0],
            ],
        )
        .unwrap();
        let layout = layout(&m, &LayoutConfig::default());
        // alcoholic, nonalcoholic, spices, fruits
        assert_eq!(layout.order, vec![1, 4, 3, 2, 0]);
        let cats: Vec<Category> = layout.category_arcs.iter().map(|a| a.category).collect();
        assert_eq!(
            cats,
            vec![Category::Alcoholic, Category::Nonalcoholic, Category::Spices, Category::Fruits]
        );
        let alcoholic = &layout.category_arcs[0];
        assert_eq!(alcoholic.groups, vec![1, 4]);
        assert_eq!(alcoholic.start_angle, layout.groups[1].start_angle);
        assert_eq!(alcoholic.end_angle, layout.groups[4].end_angle);
        // groups are contiguous around the circle
        for pair in layout.order.windows(2) {
            let (a, b) = (&layout.groups[pair[0]], &layout.groups[pair[1]]);
            assert!((b.start_angle - a.end_angle - layout.pad_angle).abs() < EPS);
        }
    }

    #[test]
    fn isolated_ingredient_gets_min_angle() {
        let m = IngredientMatrix::from_rows(
            &["Gin", "Tonic water", "Egg"],
            &[vec![0, 4, 0], vec![4, 0, 0], vec![0, 0, 0]],
        )
        .unwrap();
        let layout = layout(&m, &declaration());
        let g = &layout.groups;
        assert!((g[2].span() - DEFAULT_MIN_GROUP_ANGLE).abs() < EPS);
        assert!((g[0].span() - g[1].span()).abs() < EPS);
        assert!((layout.angular_coverage() - TAU).abs() < EPS);
        assert_eq!(layout.chords.len(), 1);
    }

    #[test]
    fn all_zero_rows_share_the_circle() {
        let m = IngredientMatrix::from_rows(&["A", "B"], &[vec![0, 0], vec![0, 0]]).unwrap();
        let layout = layout(&m, &declaration());
        assert!(layout.chords.is_empty());
        assert!((layout.groups[0].span() - layout.groups[1].span()).abs() < EPS);
        assert!((layout.angular_coverage() - TAU).abs() < EPS);
    }

    #[test]
    fn uniform_sizing() {
        let config = LayoutConfig {
            sizing: GroupSizing::Uniform,
            ..declaration()
        };
        let layout = layout(&sample(), &config);
        let span = (TAU - 3.0 * 0.05) / 3.0;
        for g in &layout.groups {
            assert!((g.span() - span).abs() < EPS);
        }
        // ribbons still split a group by weight
        let vodka_to_juice = layout.chords[0].source;
        assert!((vodka_to_juice.end_angle - vodka_to_juice.start_angle - span * 5.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn oversized_padding_is_clamped() {
        let config = LayoutConfig {
            pad_angle: 10.0,
            ..declaration()
        };
        let layout = layout(&sample(), &config);
        assert!((layout.pad_angle - TAU / 3.0).abs() < EPS);
        assert!(layout.groups.iter().all(|g| g.span().abs() < EPS));
        assert!((layout.angular_coverage() - TAU).abs() < EPS);
    }

    #[test]
    fn empty_matrix_gives_empty_layout() {
        let m = IngredientMatrix::empty(Default::default());
        let layout = layout(&m, &LayoutConfig::default());
        assert!(layout.is_empty());
        assert!(layout.chords.is_empty());
        assert!(layout.category_arcs.is_empty());
        assert_eq!(layout.max_chord_weight(), 0);
    }
}
