use crate::model::auth::{has_permission, Role};

/// Minimum access level a route demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    AuthenticatedAny,
    Role(Role),
}

/// Static rule table: route prefix to requirement.
///
/// Resolution picks the longest matching prefix, so `/admin/settings`
/// overrides the looser `/admin` rule. Order here is cosmetic.
const RULES: &[(&str, Requirement)] = &[
    ("/admin/settings", Requirement::Role(Role::SuperAdmin)),
    ("/admin/users", Requirement::Role(Role::SuperAdmin)),
    ("/admin", Requirement::Role(Role::Admin)),
    ("/voting", Requirement::AuthenticatedAny),
    ("/summary", Requirement::AuthenticatedAny),
    ("/success", Requirement::AuthenticatedAny),
    ("/profile", Requirement::AuthenticatedAny),
    ("/login", Requirement::Public),
    ("/", Requirement::Public),
];

/// Does `path` fall under `prefix`, respecting path-segment boundaries?
/// `/admin/settings/election` matches `/admin/settings`; `/loginx` does
/// not match `/login`. The root prefix matches the root path only, or it
/// would shadow every rule.
pub(crate) fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Minimum requirement for a pathname, by most-specific prefix match.
/// Unmatched paths require authentication rather than defaulting open.
pub fn required_for(path: &str) -> Requirement {
    RULES
        .iter()
        .filter(|(prefix, _)| matches_prefix(path, prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, requirement)| *requirement)
        .unwrap_or(Requirement::AuthenticatedAny)
}

/// Can a user with this (possibly absent) role access the route?
pub fn can_access(user_role: Option<Role>, path: &str) -> bool {
    match required_for(path) {
        Requirement::Public => true,
        Requirement::AuthenticatedAny => user_role.is_some(),
        Requirement::Role(required) => has_permission(user_role, required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert_eq!(Requirement::Public, required_for("/"));
        assert_eq!(Requirement::Public, required_for("/login"));
    }

    #[test]
    fn most_specific_prefix_wins() {
        assert_eq!(Requirement::Role(Role::Admin), required_for("/admin"));
        assert_eq!(
            Requirement::Role(Role::Admin),
            required_for("/admin/dashboard")
        );
        assert_eq!(
            Requirement::Role(Role::SuperAdmin),
            required_for("/admin/settings/election")
        );
        assert_eq!(
            Requirement::Role(Role::SuperAdmin),
            required_for("/admin/users/import")
        );
    }

    #[test]
    fn prefix_match_respects_segment_boundaries() {
        assert!(!matches_prefix("/loginx", "/login"));
        assert!(!matches_prefix("/administrator", "/admin"));
        assert!(matches_prefix("/admin/settings", "/admin"));
        assert!(matches_prefix("/admin", "/admin"));
    }

    #[test]
    fn root_rule_does_not_shadow_everything() {
        assert_eq!(Requirement::AuthenticatedAny, required_for("/profile"));
        assert_eq!(Requirement::AuthenticatedAny, required_for("/voting"));
    }

    #[test]
    fn unknown_routes_require_authentication() {
        assert_eq!(
            Requirement::AuthenticatedAny,
            required_for("/some/new/page")
        );
    }

    #[test]
    fn access_checks() {
        assert!(can_access(None, "/login"));
        assert!(!can_access(None, "/profile"));
        assert!(can_access(Some(Role::Member), "/profile"));
        assert!(!can_access(Some(Role::Member), "/admin/dashboard"));
        assert!(can_access(Some(Role::Admin), "/admin/dashboard"));
        assert!(!can_access(Some(Role::Admin), "/admin/settings/election"));
        assert!(can_access(Some(Role::SuperAdmin), "/admin/settings/election"));
    }
}
