/// Setup progress as reported by the server.
///
/// 服务端报告的设置状态。This is the authoritative source; the locally
/// persisted [`WizardState`](super::WizardState) is only a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    pub is_complete: bool,
    pub has_owner: bool,
}
