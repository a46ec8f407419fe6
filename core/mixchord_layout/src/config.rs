use serde::{Deserialize, Serialize};

/// Gap left after every group, in radians.
pub const DEFAULT_PAD_ANGLE: f64 = 0.05;

/// Span given to an ingredient without any connection, in radians.
pub const DEFAULT_MIN_GROUP_ANGLE: f64 = 1e-3;

/// Order of the ribbons inside a group arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortSubgroups {
    /// Heaviest partner first, ties in declaration order.
    Descending,
    /// Declaration order.
    None,
}

/// Order of the groups around the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupOrder {
    /// Bucketed by category priority, declaration order inside a bucket.
    Category,
    Declaration,
}

/// How the circle is shared between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupSizing {
    /// Proportional to the total connection weight of the ingredient.
    RowSum,
    /// Same span for every ingredient.
    Uniform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub pad_angle: f64,
    pub sort_subgroups: SortSubgroups,
    pub group_order: GroupOrder,
    pub sizing: GroupSizing,
    pub min_group_angle: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pad_angle: DEFAULT_PAD_ANGLE,
            sort_subgroups: SortSubgroups::Descending,
            group_order: GroupOrder::Category,
            sizing: GroupSizing::RowSum,
            min_group_angle: DEFAULT_MIN_GROUP_ANGLE,
        }
    }
}
