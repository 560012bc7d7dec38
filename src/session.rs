//! Signed-in user and edit rights

use crate::api::SessionApi;
use crate::error::AppResult;
use crate::models::CurrentUser;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub display_name: String,
    pub roles: Vec<String>,
    pub is_admin: bool,
}

impl Session {
    pub fn from_user(user: &CurrentUser) -> Self {
        Self {
            display_name: user.display_name(),
            roles: user.role_names(),
            is_admin: user.is_admin(),
        }
    }

    /// Only admins may change the checklist
    pub fn can_edit(&self) -> bool {
        self.is_admin
    }

    pub fn roles_label(&self) -> String {
        self.roles.join(", ")
    }

    /// Up to two initials for the avatar
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect();
        initials.to_uppercase()
    }
}

/// Look up the signed-in user
pub async fn establish(api: &impl SessionApi) -> AppResult<Session> {
    let user = api.me().await?;
    let session = Session::from_user(&user);
    log::info!(target: "session", "signed in as {} ({})", session.display_name, session.roles_label());
    Ok(session)
}
