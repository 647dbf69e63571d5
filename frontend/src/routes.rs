//! Static route tree of the console and its access resolution.
//!
//! The tree is declared once ([`console_routes`]) and evaluated per navigation
//! against the live capability set. Resolution is a pure function of
//! `(tree, principal)`.

use std::collections::BTreeSet;
use thiserror::Error;

pub const CAN_ADMIN: &str = "canAdmin";

/// Bound on redirect hops followed by [`navigate`].
const MAX_REDIRECT_HOPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Login,
    Dashboard,
    PaySettings,
    MonitorSettings,
    ApiSettings,
    Orders,
    NotFound,
}

/// Capability check supplied by the auth collaborator.
pub trait Principal {
    fn has_capability(&self, tag: &str) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<String>);

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: impl Into<String>) -> Self {
        self.0.insert(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Capabilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Principal for Capabilities {
    fn has_capability(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub path: String,
    pub name: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub access: Option<&'static str>,
    /// `false` renders the page without the console chrome.
    pub layout: bool,
}

impl RouteMeta {
    fn new(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            name: None,
            icon: None,
            access: None,
            layout: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteNode {
    Page { meta: RouteMeta, page: PageId },
    Redirect { meta: RouteMeta, to: String },
    Group { meta: RouteMeta, children: Vec<RouteNode> },
    Wildcard { meta: RouteMeta, page: PageId },
}

impl RouteNode {
    pub fn page(path: &str, page: PageId) -> Self {
        Self::Page {
            meta: RouteMeta::new(path),
            page,
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self::Redirect {
            meta: RouteMeta::new(path),
            to: normalize_path(to),
        }
    }

    pub fn group(path: &str, children: Vec<RouteNode>) -> Self {
        Self::Group {
            meta: RouteMeta::new(path),
            children,
        }
    }

    pub fn wildcard(page: PageId) -> Self {
        Self::Wildcard {
            meta: RouteMeta {
                path: "*".into(),
                ..RouteMeta::new("/")
            },
            page,
        }
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.meta_mut().name = Some(name);
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.meta_mut().icon = Some(icon);
        self
    }

    pub fn access(mut self, rule: &'static str) -> Self {
        self.meta_mut().access = Some(rule);
        self
    }

    pub fn layoutless(mut self) -> Self {
        self.meta_mut().layout = false;
        self
    }

    pub fn meta(&self) -> &RouteMeta {
        match self {
            Self::Page { meta, .. }
            | Self::Redirect { meta, .. }
            | Self::Group { meta, .. }
            | Self::Wildcard { meta, .. } => meta,
        }
    }

    fn meta_mut(&mut self) -> &mut RouteMeta {
        match self {
            Self::Page { meta, .. }
            | Self::Redirect { meta, .. }
            | Self::Group { meta, .. }
            | Self::Wildcard { meta, .. } => meta,
        }
    }

    pub fn path(&self) -> &str {
        &self.meta().path
    }

    fn is_allowed(&self, principal: &dyn Principal) -> bool {
        self.meta()
            .access
            .map(|rule| principal.has_capability(rule))
            .unwrap_or(true)
    }
}

/// The console's route table.
pub fn console_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::group(
            "/user",
            vec![RouteNode::page("/user/login", PageId::Login).named("登录")],
        )
        .layoutless(),
        RouteNode::page("/dashboard", PageId::Dashboard)
            .named("仪表盘")
            .icon("smile"),
        RouteNode::group(
            "/admin",
            vec![
                RouteNode::redirect("/admin", "/admin/pay-settings"),
                RouteNode::page("/admin/pay-settings", PageId::PaySettings).named("支付设置"),
                RouteNode::page("/admin/monitor-settings", PageId::MonitorSettings)
                    .named("监控设置"),
                RouteNode::page("/admin/api-settings", PageId::ApiSettings).named("API设置"),
            ],
        )
        .named("设置")
        .icon("crown")
        .access(CAN_ADMIN),
        RouteNode::page("/list", PageId::Orders)
            .named("订单列表")
            .icon("table"),
        RouteNode::redirect("/", "/dashboard"),
        RouteNode::wildcard(PageId::NotFound).layoutless(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTreeError {
    #[error("route tree must end with a wildcard node")]
    MissingWildcard,
    #[error("wildcard node must be the last top-level entry")]
    MisplacedWildcard,
    #[error("group {0} has no children")]
    EmptyGroup(String),
}

/// Checks the structural invariants of a route tree.
pub fn validate_tree(tree: &[RouteNode]) -> Result<(), RouteTreeError> {
    match tree.last() {
        Some(RouteNode::Wildcard { .. }) => {}
        _ => return Err(RouteTreeError::MissingWildcard),
    }
    fn check(nodes: &[RouteNode], top_level: bool) -> Result<(), RouteTreeError> {
        for (index, node) in nodes.iter().enumerate() {
            match node {
                RouteNode::Wildcard { .. } if !top_level || index + 1 != nodes.len() => {
                    return Err(RouteTreeError::MisplacedWildcard)
                }
                RouteNode::Group { meta, children } => {
                    if children.is_empty() {
                        return Err(RouteTreeError::EmptyGroup(meta.path.clone()));
                    }
                    check(children, false)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
    check(tree, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardFailureAction {
    /// Hide the entry and send direct visits to the nearest allowed index.
    RedirectToParentIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoutes {
    pub navigable: Vec<RouteNode>,
    pub guard_failure_action: GuardFailureAction,
}

impl ResolvedRoutes {
    /// Depth-first paths of the navigable nodes, in declaration order.
    pub fn paths(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [RouteNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                out.push(node.path());
                if let RouteNode::Group { children, .. } = node {
                    walk(children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.navigable, &mut out);
        out
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        nav_items(&self.navigable)
    }
}

/// Prunes every node whose access rule fails against `principal`.
pub fn resolve(tree: &[RouteNode], principal: &dyn Principal) -> ResolvedRoutes {
    fn prune(nodes: &[RouteNode], principal: &dyn Principal) -> Vec<RouteNode> {
        nodes
            .iter()
            .filter(|node| node.is_allowed(principal))
            .filter_map(|node| match node {
                RouteNode::Group { meta, children } => {
                    let children = prune(children, principal);
                    if children.is_empty() {
                        None
                    } else {
                        Some(RouteNode::Group {
                            meta: meta.clone(),
                            children,
                        })
                    }
                }
                other => Some(other.clone()),
            })
            .collect()
    }
    ResolvedRoutes {
        navigable: prune(tree, principal),
        guard_failure_action: GuardFailureAction::RedirectToParentIndex,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub path: String,
    pub name: &'static str,
    pub icon: Option<&'static str>,
    pub children: Vec<NavItem>,
}

fn nav_items(nodes: &[RouteNode]) -> Vec<NavItem> {
    nodes
        .iter()
        .filter(|node| node.meta().layout)
        .filter_map(|node| match node {
            RouteNode::Page { meta, .. } => meta.name.map(|name| NavItem {
                path: meta.path.clone(),
                name,
                icon: meta.icon,
                children: Vec::new(),
            }),
            RouteNode::Group { meta, children } => meta.name.map(|name| NavItem {
                path: meta.path.clone(),
                name,
                icon: meta.icon,
                children: nav_items(children),
            }),
            RouteNode::Redirect { .. } | RouteNode::Wildcard { .. } => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Page {
        page: PageId,
        path: String,
        layout: bool,
    },
    Redirect {
        to: String,
    },
    Denied {
        path: String,
        redirect_to: String,
    },
    NotFound {
        page: PageId,
    },
}

/// Matches one concrete path without following redirects.
pub fn match_path(tree: &[RouteNode], principal: &dyn Principal, path: &str) -> RouteMatch {
    let path = normalize_path(path);
    let root_index = index_target(tree, "/").unwrap_or_else(|| "/".to_string());
    match_in(tree, principal, &path, &root_index, true).unwrap_or_else(|| {
        let page = tree
            .iter()
            .find_map(|node| match node {
                RouteNode::Wildcard { page, .. } => Some(*page),
                _ => None,
            })
            .unwrap_or(PageId::NotFound);
        RouteMatch::NotFound { page }
    })
}

fn match_in(
    nodes: &[RouteNode],
    principal: &dyn Principal,
    path: &str,
    parent_index: &str,
    parent_layout: bool,
) -> Option<RouteMatch> {
    for node in nodes {
        let meta = node.meta();
        match node {
            RouteNode::Group { children, .. } => {
                if !within(path, &meta.path) {
                    continue;
                }
                if !node.is_allowed(principal) {
                    return Some(RouteMatch::Denied {
                        path: path.to_string(),
                        redirect_to: parent_index.to_string(),
                    });
                }
                let group_index = index_target(children, &meta.path)
                    .unwrap_or_else(|| parent_index.to_string());
                if let Some(found) = match_in(
                    children,
                    principal,
                    path,
                    &group_index,
                    parent_layout && meta.layout,
                ) {
                    return Some(found);
                }
            }
            RouteNode::Page { page, .. } if meta.path == path => {
                if !node.is_allowed(principal) {
                    return Some(RouteMatch::Denied {
                        path: path.to_string(),
                        redirect_to: parent_index.to_string(),
                    });
                }
                return Some(RouteMatch::Page {
                    page: *page,
                    path: path.to_string(),
                    layout: parent_layout && meta.layout,
                });
            }
            RouteNode::Redirect { to, .. } if meta.path == path => {
                if !node.is_allowed(principal) {
                    return Some(RouteMatch::Denied {
                        path: path.to_string(),
                        redirect_to: parent_index.to_string(),
                    });
                }
                return Some(RouteMatch::Redirect { to: to.clone() });
            }
            _ => {}
        }
    }
    None
}

/// Resolves `path` to a terminal outcome, following redirects and
/// access-denied redirects up to a fixed number of hops.
pub fn navigate(tree: &[RouteNode], principal: &dyn Principal, path: &str) -> RouteMatch {
    let mut current = normalize_path(path);
    let mut visited = vec![current.clone()];
    for _ in 0..MAX_REDIRECT_HOPS {
        let outcome = match_path(tree, principal, &current);
        let next = match &outcome {
            RouteMatch::Redirect { to } => to.clone(),
            RouteMatch::Denied { redirect_to, .. } => redirect_to.clone(),
            _ => return outcome,
        };
        if visited.contains(&next) {
            log::warn!("redirect loop at {}", next);
            return outcome;
        }
        visited.push(next.clone());
        current = next;
    }
    match_path(tree, principal, &current)
}

/// Target of the redirect declared at `index_path` among `nodes`, falling
/// back to the first page declared there.
fn index_target(nodes: &[RouteNode], index_path: &str) -> Option<String> {
    nodes
        .iter()
        .find_map(|node| match node {
            RouteNode::Redirect { meta, to } if meta.path == index_path => Some(to.clone()),
            _ => None,
        })
        .or_else(|| {
            nodes.iter().find_map(|node| match node {
                RouteNode::Page { meta, .. } if meta.path != index_path => {
                    Some(meta.path.clone())
                }
                _ => None,
            })
        })
}

fn within(path: &str, prefix: &str) -> bool {
    path == prefix
        || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
        || prefix == "/"
}

pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let trimmed = trimmed
        .split(&['?', '#'][..])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Capabilities {
        Capabilities::none().with(CAN_ADMIN)
    }

    #[test]
    fn console_tree_is_valid() {
        assert_eq!(validate_tree(&console_routes()), Ok(()));
    }

    #[test]
    fn validate_tree_rejects_missing_or_misplaced_wildcard() {
        let no_wildcard = vec![RouteNode::page("/dashboard", PageId::Dashboard)];
        assert_eq!(
            validate_tree(&no_wildcard),
            Err(RouteTreeError::MissingWildcard)
        );
        let nested = vec![
            RouteNode::group("/a", vec![RouteNode::wildcard(PageId::NotFound)]),
            RouteNode::wildcard(PageId::NotFound),
        ];
        assert_eq!(
            validate_tree(&nested),
            Err(RouteTreeError::MisplacedWildcard)
        );
        let empty = vec![
            RouteNode::group("/a", Vec::new()),
            RouteNode::wildcard(PageId::NotFound),
        ];
        assert_eq!(
            validate_tree(&empty),
            Err(RouteTreeError::EmptyGroup("/a".into()))
        );
    }

    #[test]
    fn admin_sees_every_node_in_declaration_order() {
        let resolved = resolve(&console_routes(), &admin());
        assert_eq!(
            resolved.paths(),
            vec![
                "/user",
                "/user/login",
                "/dashboard",
                "/admin",
                "/admin",
                "/admin/pay-settings",
                "/admin/monitor-settings",
                "/admin/api-settings",
                "/list",
                "/",
                "*",
            ]
        );
        assert_eq!(
            resolved.guard_failure_action,
            GuardFailureAction::RedirectToParentIndex
        );
    }

    #[test]
    fn principal_without_capabilities_keeps_only_rule_free_nodes_and_wildcard() {
        let trees = vec![
            console_routes(),
            vec![
                RouteNode::page("/a", PageId::Dashboard).access("x"),
                RouteNode::group(
                    "/b",
                    vec![
                        RouteNode::page("/b/one", PageId::Orders),
                        RouteNode::page("/b/two", PageId::Orders).access("y"),
                    ],
                ),
                RouteNode::wildcard(PageId::NotFound),
            ],
        ];
        for tree in trees {
            let resolved = resolve(&tree, &Capabilities::none());
            fn assert_rule_free(nodes: &[RouteNode]) {
                for node in nodes {
                    assert!(node.meta().access.is_none(), "{} kept", node.path());
                    if let RouteNode::Group { children, .. } = node {
                        assert_rule_free(children);
                    }
                }
            }
            assert_rule_free(&resolved.navigable);
            assert!(matches!(
                resolved.navigable.last(),
                Some(RouteNode::Wildcard { .. })
            ));
        }
    }

    #[test]
    fn nav_items_skip_redirects_layoutless_and_wildcard() {
        let items = resolve(&console_routes(), &admin()).nav_items();
        let names: Vec<&str> = items.iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["仪表盘", "设置", "订单列表"]);
        let settings: Vec<&str> = items[1].children.iter().map(|c| c.name).collect();
        assert_eq!(settings, vec!["支付设置", "监控设置", "API设置"]);
        assert_eq!(items[1].icon, Some("crown"));

        let guest_items = resolve(&console_routes(), &Capabilities::none()).nav_items();
        let names: Vec<&str> = guest_items.iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["仪表盘", "订单列表"]);
    }

    #[test]
    fn denied_path_stays_matchable_and_redirects_to_root_index() {
        let tree = console_routes();
        assert_eq!(
            match_path(&tree, &Capabilities::none(), "/admin/pay-settings"),
            RouteMatch::Denied {
                path: "/admin/pay-settings".into(),
                redirect_to: "/dashboard".into(),
            }
        );
        assert_eq!(
            navigate(&tree, &Capabilities::none(), "/admin/pay-settings"),
            RouteMatch::Page {
                page: PageId::Dashboard,
                path: "/dashboard".into(),
                layout: true,
            }
        );
    }

    #[test]
    fn denied_page_inside_allowed_group_redirects_to_group_index() {
        let tree = vec![
            RouteNode::group(
                "/admin",
                vec![
                    RouteNode::redirect("/admin", "/admin/pay-settings"),
                    RouteNode::page("/admin/pay-settings", PageId::PaySettings),
                    RouteNode::page("/admin/api-settings", PageId::ApiSettings).access("canKeys"),
                ],
            ),
            RouteNode::wildcard(PageId::NotFound),
        ];
        assert_eq!(
            match_path(&tree, &Capabilities::none(), "/admin/api-settings"),
            RouteMatch::Denied {
                path: "/admin/api-settings".into(),
                redirect_to: "/admin/pay-settings".into(),
            }
        );
    }

    #[test]
    fn redirects_are_followed_to_a_page() {
        let tree = console_routes();
        assert_eq!(
            match_path(&tree, &admin(), "/"),
            RouteMatch::Redirect {
                to: "/dashboard".into()
            }
        );
        assert_eq!(
            navigate(&tree, &admin(), "/admin/"),
            RouteMatch::Page {
                page: PageId::PaySettings,
                path: "/admin/pay-settings".into(),
                layout: true,
            }
        );
        assert_eq!(
            navigate(&tree, &admin(), "/user/login?next=/list"),
            RouteMatch::Page {
                page: PageId::Login,
                path: "/user/login".into(),
                layout: false,
            }
        );
    }

    #[test]
    fn guarded_redirect_is_denied_not_followed() {
        let tree = vec![
            RouteNode::redirect("/secret", "/dashboard").access(CAN_ADMIN),
            RouteNode::page("/dashboard", PageId::Dashboard),
            RouteNode::redirect("/", "/dashboard"),
            RouteNode::wildcard(PageId::NotFound),
        ];
        let nobody = Capabilities::none();
        assert!(!resolve(&tree, &nobody).paths().contains(&"/secret"));
        assert_eq!(
            match_path(&tree, &nobody, "/secret"),
            RouteMatch::Denied {
                path: "/secret".into(),
                redirect_to: "/dashboard".into(),
            }
        );
        assert_eq!(
            match_path(&tree, &admin(), "/secret"),
            RouteMatch::Redirect {
                to: "/dashboard".into()
            }
        );
    }

    #[test]
    fn unmatched_paths_fall_through_to_the_wildcard() {
        let tree = console_routes();
        for path in ["/nope", "/admin/unknown", "/listing", "/user/register"] {
            assert_eq!(
                navigate(&tree, &admin(), path),
                RouteMatch::NotFound {
                    page: PageId::NotFound
                },
                "{}",
                path
            );
        }
    }

    #[test]
    fn redirect_loops_stop() {
        let tree = vec![
            RouteNode::redirect("/a", "/b"),
            RouteNode::redirect("/b", "/a"),
            RouteNode::wildcard(PageId::NotFound),
        ];
        assert!(matches!(
            navigate(&tree, &Capabilities::none(), "/a"),
            RouteMatch::Redirect { .. }
        ));
    }

    #[test]
    fn normalize_path_handles_relative_and_trailing_forms() {
        assert_eq!(normalize_path("dashboard"), "/dashboard");
        assert_eq!(normalize_path("/admin/"), "/admin");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/list#top"), "/list");
    }
}
