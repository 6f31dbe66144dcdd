//! Role-gated navigation model.
//!
//! One declarative route tree and one guard function replace the scattered
//! per-template role conditionals of the old UI. A route is reachable only
//! if every ancestor's access rule is satisfied by the current session;
//! the sidebar menu is resolved from the same rules so the two can never
//! disagree.

use crate::session::{Role, Session};

// ═══════════════════════════════════════════════════════════
// Route descriptors
// ═══════════════════════════════════════════════════════════

/// Access rule attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable with no session (landing page only).
    Public,
    /// Any established session; no extra role required.
    Authenticated,
    /// Established session holding at least one of these roles.
    AnyOf(&'static [Role]),
}

/// One node of the static route tree. Child paths are single segments
/// relative to their parent; an empty segment is the parent's index view.
#[derive(Debug)]
pub struct RouteDescriptor {
    pub segment: &'static str,
    pub access: RouteAccess,
    pub children: &'static [RouteDescriptor],
}

const DOCTOR_OR_ADMIN: &[Role] = &[Role::Doctor, Role::Admin];
const DOCTOR_ONLY: &[Role] = &[Role::Doctor];

/// The application's route surface. A tree, not a graph: every path has
/// exactly one ancestry and inherits every ancestor's access rule.
const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        segment: "",
        access: RouteAccess::Public,
        children: &[],
    },
    RouteDescriptor {
        segment: "dashboard",
        access: RouteAccess::Authenticated,
        children: &[
            RouteDescriptor {
                segment: "patients",
                access: RouteAccess::AnyOf(DOCTOR_OR_ADMIN),
                children: &[],
            },
            RouteDescriptor {
                segment: "appointments",
                access: RouteAccess::Authenticated,
                children: &[],
            },
            RouteDescriptor {
                segment: "reports",
                access: RouteAccess::Authenticated,
                children: &[],
            },
            RouteDescriptor {
                segment: "diagnosis",
                access: RouteAccess::AnyOf(DOCTOR_ONLY),
                children: &[],
            },
        ],
    },
];

/// The static route tree, for hosts that want to walk it directly.
pub fn route_tree() -> &'static [RouteDescriptor] {
    ROUTES
}

/// Neutral destination the router redirects to when entry is denied.
pub fn fallback_path() -> &'static str {
    "/"
}

// ═══════════════════════════════════════════════════════════
// Route guard
// ═══════════════════════════════════════════════════════════

fn satisfies(session: Option<&Session>, access: RouteAccess) -> bool {
    match access {
        RouteAccess::Public => true,
        RouteAccess::Authenticated => session.is_some(),
        RouteAccess::AnyOf(roles) => session.is_some_and(|s| s.is_in_any(roles)),
    }
}

/// Routing guard: can the current session enter `path`?
///
/// Every ancestor rule along the path must pass. Unknown paths and gated
/// paths without an established session are denied; the caller redirects
/// to [`fallback_path`] instead of rendering a blank page.
pub fn can_enter(session: Option<&Session>, path: &str) -> bool {
    let mut segments = path.trim_matches('/').split('/').filter(|s| !s.is_empty());

    let Some(first) = segments.next() else {
        // "/" — the public landing route.
        return true;
    };

    let mut node = match ROUTES.iter().find(|r| r.segment == first) {
        Some(node) => node,
        None => {
            tracing::debug!(path, "Route guard: unknown path");
            return false;
        }
    };
    if !satisfies(session, node.access) {
        tracing::debug!(path, "Route guard: access denied");
        return false;
    }

    for segment in segments {
        node = match node.children.iter().find(|r| r.segment == segment) {
            Some(child) => child,
            None => {
                tracing::debug!(path, "Route guard: unknown path");
                return false;
            }
        };
        if !satisfies(session, node.access) {
            tracing::debug!(path, "Route guard: access denied");
            return false;
        }
    }
    true
}

// ═══════════════════════════════════════════════════════════
// Sidebar menu
// ═══════════════════════════════════════════════════════════

/// One sidebar link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// A group of links under one sidebar header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub header: &'static str,
    pub entries: Vec<MenuEntry>,
}

struct MenuItemDef {
    path: &'static str,
    label: &'static str,
    icon: &'static str,
}

struct MenuSectionDef {
    header: &'static str,
    items: &'static [MenuItemDef],
}

/// Sidebar layout in declared order. Visibility comes from the route
/// tree's access rules, never from per-item conditions.
const MENU: &[MenuSectionDef] = &[
    MenuSectionDef {
        header: "MAIN",
        items: &[
            MenuItemDef {
                path: "/dashboard",
                label: "Dashboard",
                icon: "dashboard",
            },
            MenuItemDef {
                path: "/dashboard/diagnosis",
                label: "AI Diagnosis",
                icon: "medical_services",
            },
        ],
    },
    MenuSectionDef {
        header: "MANAGEMENT",
        items: &[
            MenuItemDef {
                path: "/dashboard/patients",
                label: "Patients",
                icon: "people",
            },
            MenuItemDef {
                path: "/dashboard/appointments",
                label: "Appointments",
                icon: "calendar_today",
            },
        ],
    },
    MenuSectionDef {
        header: "ANALYTICS",
        items: &[MenuItemDef {
            path: "/dashboard/reports",
            label: "Reports",
            icon: "assessment",
        }],
    },
];

/// Resolve the visible sidebar for a session.
///
/// Declared order is preserved; a section header is emitted only when at
/// least one entry under it is visible to this session.
pub fn resolve_menu(session: Option<&Session>) -> Vec<MenuSection> {
    MENU.iter()
        .filter_map(|section| {
            let entries: Vec<MenuEntry> = section
                .items
                .iter()
                .filter(|item| can_enter(session, item.path))
                .map(|item| MenuEntry {
                    path: item.path,
                    label: item.label,
                    icon: item.icon,
                })
                .collect();
            if entries.is_empty() {
                None
            } else {
                Some(MenuSection {
                    header: section.header,
                    entries,
                })
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn session_with(labels: &[&str]) -> Session {
        Session::new(
            "Test User",
            labels.iter().map(|l| l.to_string()).collect::<BTreeSet<_>>(),
        )
    }

    fn labels(menu: &[MenuSection]) -> Vec<&'static str> {
        menu.iter()
            .flat_map(|s| s.entries.iter().map(|e| e.label))
            .collect()
    }

    // ── Guard ────────────────────────────────────────────

    #[test]
    fn landing_is_public() {
        assert!(can_enter(None, "/"));
        assert!(can_enter(None, ""));
    }

    #[test]
    fn every_gated_path_is_denied_without_a_session() {
        for path in [
            "/dashboard",
            "/dashboard/patients",
            "/dashboard/appointments",
            "/dashboard/reports",
            "/dashboard/diagnosis",
        ] {
            assert!(!can_enter(None, path), "{path} must fail closed");
        }
    }

    #[test]
    fn plain_session_enters_dashboard_but_not_role_gated_children() {
        let session = session_with(&[]);
        assert!(can_enter(Some(&session), "/dashboard"));
        assert!(can_enter(Some(&session), "/dashboard/appointments"));
        assert!(can_enter(Some(&session), "/dashboard/reports"));
        assert!(!can_enter(Some(&session), "/dashboard/patients"));
        assert!(!can_enter(Some(&session), "/dashboard/diagnosis"));
    }

    #[test]
    fn doctor_enters_patients_and_diagnosis() {
        let session = session_with(&["MEDECIN"]);
        assert!(can_enter(Some(&session), "/dashboard/patients"));
        assert!(can_enter(Some(&session), "/dashboard/diagnosis"));
    }

    #[test]
    fn admin_enters_patients_but_not_diagnosis() {
        let session = session_with(&["ADMIN"]);
        assert!(can_enter(Some(&session), "/dashboard/patients"));
        assert!(!can_enter(Some(&session), "/dashboard/diagnosis"));
    }

    #[test]
    fn unknown_paths_are_denied() {
        let session = session_with(&["ADMIN"]);
        assert!(!can_enter(Some(&session), "/dashboard/admin"));
        assert!(!can_enter(Some(&session), "/nowhere"));
    }

    #[test]
    fn trailing_slashes_do_not_change_the_answer() {
        let session = session_with(&["MEDECIN"]);
        assert!(can_enter(Some(&session), "/dashboard/patients/"));
        assert!(can_enter(Some(&session), "dashboard/patients"));
    }

    #[test]
    fn fallback_is_the_public_landing() {
        assert!(can_enter(None, fallback_path()));
    }

    // ── Menu resolution ──────────────────────────────────

    #[test]
    fn plain_session_menu_excludes_role_gated_entries() {
        let session = session_with(&[]);
        let menu = resolve_menu(Some(&session));
        let visible = labels(&menu);
        assert_eq!(visible, vec!["Dashboard", "Appointments", "Reports"]);
    }

    #[test]
    fn doctor_menu_shows_everything() {
        let session = session_with(&["MEDECIN"]);
        let visible = labels(&resolve_menu(Some(&session)));
        assert_eq!(
            visible,
            vec![
                "Dashboard",
                "AI Diagnosis",
                "Patients",
                "Appointments",
                "Reports"
            ]
        );
    }

    #[test]
    fn declared_section_order_is_preserved() {
        let session = session_with(&["MEDECIN", "ADMIN"]);
        let headers: Vec<_> = resolve_menu(Some(&session))
            .iter()
            .map(|s| s.header)
            .collect();
        assert_eq!(headers, vec!["MAIN", "MANAGEMENT", "ANALYTICS"]);
    }

    #[test]
    fn no_session_resolves_an_empty_menu() {
        assert!(resolve_menu(None).is_empty());
    }

    #[test]
    fn headers_with_no_visible_children_are_dropped() {
        // Every section currently has an ungated entry except none; verify
        // the rule via the unauthenticated case where all sections vanish.
        let menu = resolve_menu(None);
        assert!(menu.iter().all(|s| !s.entries.is_empty()));
    }

    #[test]
    fn menu_agrees_with_the_guard() {
        let session = session_with(&["ADMIN"]);
        for section in resolve_menu(Some(&session)) {
            for entry in section.entries {
                assert!(
                    can_enter(Some(&session), entry.path),
                    "{} listed but not enterable",
                    entry.path
                );
            }
        }
    }
}
