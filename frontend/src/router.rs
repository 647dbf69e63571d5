use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Route, Router, Routes};
use std::rc::Rc;

use crate::{
    api::{ApiClient, RemoteDataGateway},
    components::guard::ConsoleOutlet,
    routes::{console_routes, validate_tree},
    state::auth::AuthProvider,
};

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

/// Shared client and gateway for every page under the root.
pub fn provide_services(client: ApiClient) {
    provide_context(client.clone());
    provide_context::<Rc<dyn RemoteDataGateway>>(Rc::new(client));
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_services(ApiClient::new());
    if let Err(err) = validate_tree(&console_routes()) {
        log::error!("route table rejected: {}", err);
    }
    view! {
        <Title text="MiDo" />
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/*any" view=ConsoleOutlet />
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{auth::use_api_client, list_view::use_gateway};
    use crate::test_support::helpers::with_runtime;

    #[test]
    fn console_route_table_is_valid() {
        assert_eq!(validate_tree(&console_routes()), Ok(()));
    }

    #[test]
    fn services_share_one_client() {
        with_runtime(|| {
            let client = ApiClient::new_with_base_url("http://console.test/api");
            provide_services(client);
            let resolved = use_api_client();
            let _gateway = use_gateway();
            assert!(resolved.access_token().is_none());
            assert!(use_context::<Rc<dyn RemoteDataGateway>>().is_some());
        });
    }
}
