use crate::model::user::UserRecord;

use super::roles::{RoleGroup, RoleTable};

/// Caller-supplied narrowing applied before any aggregation. Set filters
/// compose as a conjunction; the default value matches everyone. A filter
/// that matches no user is a valid scope and yields empty results, not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub organization_id: Option<u64>,
    /// Raw role strings, already resolved from a tier where needed so stores
    /// never have to know about the role table.
    pub raw_roles: Option<Vec<String>>,
    pub team_leader_id: Option<u64>,
    pub user_id: Option<u64>,
}

impl Scope {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn organization(mut self, organization_id: u64) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn roles(mut self, raw_roles: Vec<String>) -> Self {
        self.raw_roles = Some(raw_roles);
        self
    }

    /// Restricts to the raw roles of one tier. An empty tier matches nobody.
    pub fn role_group(self, table: &RoleTable, group: RoleGroup) -> Self {
        self.roles(table.raw_roles_in(group))
    }

    pub fn reports_of(mut self, team_leader_id: u64) -> Self {
        self.team_leader_id = Some(team_leader_id);
        self
    }

    pub fn user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a user falls inside this scope.
    pub fn permits(&self, user: &UserRecord) -> bool {
        if let Some(organization_id) = self.organization_id {
            if user.organization_id != Some(organization_id) {
                return false;
            }
        }
        if let Some(raw_roles) = &self.raw_roles {
            if !raw_roles.iter().any(|role| role == &user.role) {
                return false;
            }
        }
        if let Some(team_leader_id) = self.team_leader_id {
            if user.team_leader_id != Some(team_leader_id) {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if user.id != user_id {
                return false;
            }
        }
        true
    }
}
