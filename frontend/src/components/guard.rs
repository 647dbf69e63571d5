use crate::{
    api::LOGIN_PATH,
    components::layout::{Layout, LoadingSpinner},
    pages::{self, not_found::NotFoundPage},
    routes::{console_routes, match_path, navigate, PageId, RouteMatch, RouteNode},
    state::auth::{use_auth, AuthState},
};
use leptos::*;
use leptos_router::{use_location, Redirect};

/// What the outlet does for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session check is still running.
    Wait,
    Render { page: PageId, layout: bool },
    Redirect(String),
    NotFound(PageId),
}

/// Pages inside the console chrome need a session; layoutless pages (login,
/// 404) are public. Access tags are checked by the route table.
pub fn guard_decision(tree: &[RouteNode], auth: &AuthState, path: &str) -> GuardDecision {
    if auth.loading {
        return GuardDecision::Wait;
    }
    match match_path(tree, auth, path) {
        RouteMatch::Page { layout: true, .. } if !auth.is_authenticated => {
            GuardDecision::Redirect(LOGIN_PATH.to_string())
        }
        RouteMatch::Page { page, layout, .. } => GuardDecision::Render { page, layout },
        RouteMatch::Redirect { to } => GuardDecision::Redirect(to),
        RouteMatch::Denied { path, redirect_to } => {
            log::warn!("access to {} denied, redirecting to {}", path, redirect_to);
            denied_target(tree, auth, &path, &redirect_to)
        }
        RouteMatch::NotFound { page } => GuardDecision::NotFound(page),
    }
}

/// First reachable page for a denied `path`: its parent index, then the
/// root index. Never `path` itself.
fn denied_target(
    tree: &[RouteNode],
    auth: &AuthState,
    path: &str,
    redirect_to: &str,
) -> GuardDecision {
    for candidate in [redirect_to, "/"] {
        if let RouteMatch::Page { path: target, .. } = navigate(tree, auth, candidate) {
            if target != path {
                return GuardDecision::Redirect(target);
            }
        }
    }
    GuardDecision::NotFound(PageId::NotFound)
}

/// Catch-all outlet: every location is resolved against the console route
/// table for the signed-in admin.
#[component]
pub fn ConsoleOutlet() -> impl IntoView {
    let location = use_location();
    let (auth, _) = use_auth();
    let tree = store_value(console_routes());
    let decision = create_memo(move |_| {
        let path = location.pathname.get();
        tree.with_value(|tree| auth.with(|auth| guard_decision(tree, auth, &path)))
    });

    move || match decision.get() {
        GuardDecision::Wait => view! { <LoadingSpinner /> }.into_view(),
        GuardDecision::Redirect(to) => view! { <Redirect path=to /> }.into_view(),
        GuardDecision::NotFound(_) => view! { <NotFoundPage /> }.into_view(),
        GuardDecision::Render { page, layout: true } => {
            view! { <Layout>{pages::render(page)}</Layout> }.into_view()
        }
        GuardDecision::Render { page, layout: false } => pages::render(page),
    }
}
