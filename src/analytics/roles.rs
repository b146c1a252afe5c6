use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use utoipa::ToSchema;

/// Raw roles the viewer-scope rules single out. Matching is against the
/// normalized (trimmed, lowercased) role string.
pub const ROLE_TEAM_LEADER: &str = "team-leader";
pub const ROLE_BACK_OFFICE_HEAD: &str = "back-office-head";
pub const ROLE_MANAGER: &str = "manager";

/// Performance tier a raw role string maps into.
///
/// The derived ordering is the tier order, admin tier first; grouped results
/// and rankings are emitted in it. `Other` is a real bucket, not an error:
/// unmapped roles still count toward every aggregate, they are just never
/// ranked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    ToSchema,
)]
pub enum RoleGroup {
    #[serde(rename = "Admin Management")]
    #[strum(serialize = "Admin Management")]
    AdminManagement,
    #[serde(rename = "Operations Management")]
    #[strum(serialize = "Operations Management")]
    OperationsManagement,
    Operations,
    Other,
}

static BUILTIN_GROUPS: Lazy<HashMap<String, RoleGroup>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for role in [
        "admin",
        "compliance",
        "compliance-head",
        "admin-hr-head",
        "human-resources",
        "operations-manager",
    ] {
        map.insert(role.to_string(), RoleGroup::AdminManagement);
    }
    for role in [
        "manager",
        "back-office-head",
        "operations-associate",
        "trainer-quality-assurance",
        "quality-assurance",
        "team-leader",
    ] {
        map.insert(role.to_string(), RoleGroup::OperationsManagement);
    }
    map.insert("agent".to_string(), RoleGroup::Operations);
    map
});

/// Immutable raw-role to tier mapping, loaded once at startup and handed to
/// the engine. Aggregation code never hard-codes membership, so a deployment
/// can re-map roles with a config file instead of a rebuild.
#[derive(Debug, Clone)]
pub struct RoleTable {
    map: HashMap<String, RoleGroup>,
}

impl RoleTable {
    /// The mapping shipped with the crate, used when no file is configured.
    pub fn builtin() -> Self {
        Self {
            map: BUILTIN_GROUPS.clone(),
        }
    }

    /// Loads a mapping from a JSON object of raw role to tier display name,
    /// e.g. `{"agent": "Operations"}`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read role map {}", path.display()))?;
        Self::from_json(&bytes).with_context(|| format!("invalid role map {}", path.display()))
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: HashMap<String, RoleGroup> = serde_json::from_slice(bytes)?;
        Ok(Self {
            map: raw
                .into_iter()
                .map(|(role, group)| (role.trim().to_lowercase(), group))
                .collect(),
        })
    }

    /// Classifies a raw role string. Unknown roles land in `Other` so they
    /// stay countable instead of vanishing from the totals.
    pub fn classify(&self, raw_role: &str) -> RoleGroup {
        self.map
            .get(raw_role.trim().to_lowercase().as_str())
            .copied()
            .unwrap_or(RoleGroup::Other)
    }

    /// Raw roles mapped into `group`, sorted so generated SQL stays stable.
    pub fn raw_roles_in(&self, group: RoleGroup) -> Vec<String> {
        let mut roles: Vec<String> = self
            .map
            .iter()
            .filter(|(_, g)| **g == group)
            .map(|(role, _)| role.clone())
            .collect();
        roles.sort();
        roles
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Display form of a raw role: "admin-hr-head" becomes "Admin Hr Head".
/// Purely cosmetic, never fed back into classification.
pub fn title_case(raw_role: &str) -> String {
    raw_role
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
