use serde::Serialize;
use spectrumcore::prelude::DisplayRange;
use spectrumcore::processing::{QueryOutcome, TieredEntry};
use spectrumcore::store::DeviceRole;

/// Per-role headline used by renderers to draw one series per device type.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub role: DeviceRole,
    pub label: &'static str,
    pub count: usize,
}

/// Body of a successful `/getData` response.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumResponse<'a> {
    pub status: &'static str,
    /// Set when nothing matched, so a client can show an empty state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub count: usize,
    pub tier_count: usize,
    pub display_range: Option<DisplayRange>,
    pub roles: Vec<RoleSummary>,
    pub entries: &'a [TieredEntry],
}

impl<'a> From<&'a QueryOutcome> for SpectrumResponse<'a> {
    fn from(outcome: &'a QueryOutcome) -> Self {
        let roles = outcome
            .result
            .by_role()
            .into_iter()
            .map(|group| RoleSummary {
                role: group.role,
                label: group.label,
                count: group.entries.len(),
            })
            .collect();
        Self {
            status: "ok",
            message: outcome
                .is_empty()
                .then_some("No data found for selected range"),
            count: outcome.result.len(),
            tier_count: outcome.result.tier_count(),
            display_range: outcome.display_range,
            roles,
            entries: outcome.result.entries(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl ToString) -> Self {
        Self {
            status: "error",
            message: message.to_string(),
        }
    }
}
