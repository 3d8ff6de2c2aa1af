//! Traditional Chinese type-size names (字号)
//!
//! A fixed table of sixteen named sizes from 初号 (42pt) down to 八号 (5pt).
//! Lookup by point value is fuzzy: the numerically closest entry wins if it
//! lies strictly within 0.5pt.

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;

/// Maximum distance (exclusive) for a fuzzy size-name match
pub const NAME_TOLERANCE_PT: f64 = 0.5;

/// A named traditional size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedSize {
    pub name: &'static str,
    pub pt: f64,
}

/// The size-name table, largest first
pub static NAMED_SIZES: [NamedSize; 16] = [
    NamedSize { name: "初号", pt: 42.0 },
    NamedSize { name: "小初", pt: 36.0 },
    NamedSize { name: "一号", pt: 26.0 },
    NamedSize { name: "小一", pt: 24.0 },
    NamedSize { name: "二号", pt: 22.0 },
    NamedSize { name: "小二", pt: 18.0 },
    NamedSize { name: "三号", pt: 16.0 },
    NamedSize { name: "小三", pt: 15.0 },
    NamedSize { name: "四号", pt: 14.0 },
    NamedSize { name: "小四", pt: 12.0 },
    NamedSize { name: "五号", pt: 10.5 },
    NamedSize { name: "小五", pt: 9.0 },
    NamedSize { name: "六号", pt: 7.5 },
    NamedSize { name: "小六", pt: 6.5 },
    NamedSize { name: "七号", pt: 5.5 },
    NamedSize { name: "八号", pt: 5.0 },
];

/// Sizes offered first by font-size pickers, in points
pub const COMMON_FONT_SIZES: [f64; 18] = [
    8.0, 9.0, 10.0, 10.5, 11.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 36.0, 42.0,
    48.0, 72.0,
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static NamedSize>> =
    LazyLock::new(|| NAMED_SIZES.iter().map(|s| (s.name, s)).collect());

/// Find the named size closest to `pt`, if one lies within tolerance.
///
/// Candidates are ranked by absolute difference, then by smaller point value,
/// so the result never depends on table order.
pub fn nearest(sizes: &'static [NamedSize], pt: f64) -> Option<&'static NamedSize> {
    if !pt.is_finite() {
        return None;
    }
    sizes
        .iter()
        .map(|s| ((s.pt - pt).abs(), s))
        .filter(|(diff, _)| *diff < NAME_TOLERANCE_PT)
        .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.pt.total_cmp(&b.pt)))
        .map(|(_, s)| s)
}

/// Exact lookup by name (e.g. "小四" -> 12.0)
pub fn by_name(name: &str) -> Option<&'static NamedSize> {
    BY_NAME.get(name.trim()).copied()
}
