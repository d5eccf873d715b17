use serde::{Deserialize, Serialize};

/// Privacy level applied to the server at the end of setup.
///
/// 隐私级别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    /// No outbound requests at all.
    Maximum,
    /// Metadata lookups only, no telemetry.
    Private,
    /// Metadata lookups and anonymous crash reports.
    Balanced,
    /// Everything enabled.
    Open,
}

impl PrivacyLevel {
    pub const ALL: [PrivacyLevel; 4] = [
        PrivacyLevel::Maximum,
        PrivacyLevel::Private,
        PrivacyLevel::Balanced,
        PrivacyLevel::Open,
    ];

    pub const RECOMMENDED: PrivacyLevel = PrivacyLevel::Private;

    pub fn is_recommended(self) -> bool {
        self == Self::RECOMMENDED
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrivacyLevel::Maximum => "maximum",
            PrivacyLevel::Private => "private",
            PrivacyLevel::Balanced => "balanced",
            PrivacyLevel::Open => "open",
        }
    }
}

impl Default for PrivacyLevel {
    fn default() -> Self {
        Self::RECOMMENDED
    }
}

impl std::fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
