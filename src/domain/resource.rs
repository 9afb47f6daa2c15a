use serde::{Deserialize, Serialize};

use crate::domain::ResourceSnapshot;

/// Utilization of one metered resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub used: u64,
    pub limit: u64,
    /// Never negative: a node reporting `used > limit` reads as 0 available.
    pub available: u64,
    /// Whole percent in `0..=100`.
    pub percent_used: u8,
}

impl ResourceUsage {
    pub fn from_counts(used: u64, limit: u64) -> Self {
        let available = limit.saturating_sub(used);
        let percent_used = if limit == 0 {
            0
        } else {
            // round(used / limit * 100) in integer arithmetic
            let percent = (used as u128 * 200 + limit as u128) / (limit as u128 * 2);
            percent.min(100) as u8
        };

        Self {
            used,
            limit,
            available,
            percent_used,
        }
    }
}

/// Normalized energy and bandwidth metrics for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceView {
    pub energy: ResourceUsage,
    pub bandwidth: ResourceUsage,
}

pub fn compute_resource_view(snapshot: &ResourceSnapshot) -> ResourceView {
    ResourceView {
        energy: ResourceUsage::from_counts(snapshot.energy_used, snapshot.energy_limit),
        bandwidth: ResourceUsage::from_counts(snapshot.bandwidth_used, snapshot.bandwidth_limit),
    }
}
