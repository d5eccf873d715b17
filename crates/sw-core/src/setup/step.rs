use serde::{Deserialize, Serialize};

/// Wizard step.
///
/// 设置向导步骤。
///
/// The declaration order is the display order. It is *not* the transition
/// rule: only [`WizardStep::next`] and [`WizardStep::prev`] plus the
/// explicit submit/skip paths in the controller move between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Welcome screen.
    ///
    /// 欢迎页。
    Welcome,
    /// Administrator account creation.
    ///
    /// 管理员账户创建。
    Account,
    /// Content library configuration.
    ///
    /// 媒体库配置。
    Library,
    /// Privacy level selection.
    ///
    /// 隐私级别选择。
    Privacy,
    /// Setup ready to finish.
    ///
    /// 设置完成。
    Ready,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Welcome,
        WizardStep::Account,
        WizardStep::Library,
        WizardStep::Privacy,
        WizardStep::Ready,
    ];

    /// Zero-based display position.
    pub fn index(self) -> usize {
        match self {
            WizardStep::Welcome => 0,
            WizardStep::Account => 1,
            WizardStep::Library => 2,
            WizardStep::Privacy => 3,
            WizardStep::Ready => 4,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Steps that may only be shown once an administrator account exists.
    pub fn requires_owner(self) -> bool {
        matches!(
            self,
            WizardStep::Library | WizardStep::Privacy | WizardStep::Ready
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Welcome => "welcome",
            WizardStep::Account => "account",
            WizardStep::Library => "library",
            WizardStep::Privacy => "privacy",
            WizardStep::Ready => "ready",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Welcome
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
