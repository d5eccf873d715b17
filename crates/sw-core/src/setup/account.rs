/// Administrator account form.
///
/// 管理员账户表单。Password fields live only in memory; they are never part
/// of the persisted [`WizardState`](super::WizardState).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub display_name: String,
}

impl AccountForm {
    /// Display name sent to the server, falling back to the email's local part.
    pub fn effective_display_name(&self) -> String {
        let name = self.display_name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        let email = self.email.trim();
        email.split('@').next().unwrap_or(email).to_string()
    }
}

impl std::fmt::Debug for AccountForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .finish()
    }
}
