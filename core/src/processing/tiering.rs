use crate::prelude::DisplayRange;
use crate::store::{DeviceRole, Record};
use serde::Serialize;
use std::collections::HashMap;

/// Grouping key for presentation tiers.
///
/// Bandwidth stays in kHz as read from the dataset while the centre is in MHz;
/// the key compares both by exact bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TierKey {
    role: DeviceRole,
    center_bits: u64,
    bandwidth_bits: u64,
}

impl TierKey {
    fn of(record: &Record) -> Self {
        Self {
            role: record.device_role(),
            center_bits: canonical_bits(record.center_frequency_mhz()),
            bandwidth_bits: canonical_bits(record.bandwidth_khz()),
        }
    }
}

// Folds -0.0 onto 0.0 so both land in the same tier.
fn canonical_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// A surviving record together with its tier and distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TieredEntry {
    pub tier_index: usize,
    pub distance_km: f64,
    #[serde(flatten)]
    pub record: Record,
}

/// Records of one device role, in result order.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGroup<'a> {
    pub role: DeviceRole,
    pub label: &'static str,
    pub entries: Vec<&'a TieredEntry>,
}

/// Ordered query result. Empty is a valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TieredResult {
    entries: Vec<TieredEntry>,
    tier_count: usize,
}

impl TieredResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TieredEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tier_count(&self) -> usize {
        self.tier_count
    }

    /// Frequency axis bounds padded by `padding_mhz`, clamped at 0 MHz.
    /// `None` when there is nothing to show.
    pub fn display_range(&self, padding_mhz: f64) -> Option<DisplayRange> {
        let mut records = self.entries.iter().map(|entry| &entry.record);
        let first = records.next()?;
        let (min, max) = records.fold(
            (first.min_frequency_mhz(), first.max_frequency_mhz()),
            |(min, max), record| {
                (
                    min.min(record.min_frequency_mhz()),
                    max.max(record.max_frequency_mhz()),
                )
            },
        );
        Some(DisplayRange {
            min_mhz: (min - padding_mhz).max(0.0),
            max_mhz: max + padding_mhz,
        })
    }

    /// Splits entries by device role, roles ordered by first appearance.
    pub fn by_role(&self) -> Vec<RoleGroup<'_>> {
        let mut groups: Vec<RoleGroup<'_>> = Vec::new();
        for entry in &self.entries {
            let role = entry.record.device_role();
            match groups.iter_mut().find(|group| group.role == role) {
                Some(group) => group.entries.push(entry),
                None => groups.push(RoleGroup {
                    role,
                    label: role.label(),
                    entries: vec![entry],
                }),
            }
        }
        groups
    }
}

/// Numbers tiers in order of first appearance and keeps input order.
///
/// Records sharing `(role, centre MHz, bandwidth kHz)` get the same index no
/// matter where they sit or which licence/site they belong to.
pub fn assign_tiers<'a, I>(survivors: I) -> TieredResult
where
    I: IntoIterator<Item = (&'a Record, f64)>,
{
    let mut tiers: HashMap<TierKey, usize> = HashMap::new();
    let entries: Vec<TieredEntry> = survivors
        .into_iter()
        .map(|(record, distance_km)| {
            let next = tiers.len();
            let tier_index = *tiers.entry(TierKey::of(record)).or_insert(next);
            TieredEntry {
                tier_index,
                distance_km,
                record: record.clone(),
            }
        })
        .collect();

    TieredResult {
        tier_count: tiers.len(),
        entries,
    }
}
