use chrono::{DateTime, Utc};

use crate::model::auth::{has_permission, Claims, Role};

use super::matrix::{matches_prefix, required_for, Requirement};

pub const LOGIN: &str = "/login";
pub const HOME: &str = "/";
pub const VOTING: &str = "/voting";
pub const SUMMARY: &str = "/summary";
pub const SUCCESS: &str = "/success";
pub const DASHBOARD: &str = "/admin/dashboard";

/// Verdict for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect {
        to: &'static str,
        /// The stored credential is void and must be dropped alongside
        /// the redirect.
        clear_credential: bool,
    },
}

impl Decision {
    fn redirect(to: &'static str) -> Self {
        Self::Redirect {
            to,
            clear_credential: false,
        }
    }
}

/// Landing page for a freshly authenticated user.
pub fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Member => VOTING,
        Role::Admin | Role::SuperAdmin => DASHBOARD,
    }
}

/// Decide one navigation.
///
/// This is the single rule set behind both protection layers: the
/// authoritative pre-render gate and the advisory client-side re-check.
/// Neither layer may assume the other already ran; a bookmarked deep
/// link reaches the re-check without any prior evaluation.
pub fn evaluate(token: Option<&str>, path: &str, now: DateTime<Utc>) -> Decision {
    let claims = match token {
        Some(raw) => match raw.parse::<Claims>() {
            Ok(claims) if !claims.is_expired(now) => Some(claims),
            // Unparseable or expired: void the credential and start over.
            _ => {
                return Decision::Redirect {
                    to: LOGIN,
                    clear_credential: true,
                }
            }
        },
        None => None,
    };

    if let Some(claims) = &claims {
        // A completed voter cannot re-enter the ballot flow. The success
        // page itself stays reachable.
        if claims.has_voted && (matches_prefix(path, VOTING) || matches_prefix(path, SUMMARY)) {
            return Decision::redirect(SUCCESS);
        }

        // Already logged in: the login page bounces to the role landing.
        if path == LOGIN {
            return Decision::redirect(landing_page(claims.role));
        }
    }

    let role = claims.as_ref().map(|claims| claims.role);
    match required_for(path) {
        Requirement::Public => Decision::Allow,
        Requirement::AuthenticatedAny if role.is_some() => Decision::Allow,
        Requirement::AuthenticatedAny => Decision::redirect(LOGIN),
        Requirement::Role(required) if has_permission(role, required) => Decision::Allow,
        Requirement::Role(_) => Decision::redirect(insufficient_role_landing(role)),
    }
}

/// Where to send a user whose role does not meet the route's requirement.
fn insufficient_role_landing(role: Option<Role>) -> &'static str {
    match role {
        None => LOGIN,
        Some(Role::Member) => HOME,
        // An admin short of super admin lands back on the dashboard.
        Some(Role::Admin) | Some(Role::SuperAdmin) => DASHBOARD,
    }
}
