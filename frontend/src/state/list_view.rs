//! Reactive wrapper that exposes a [`ResourceListController`] to views.
//!
//! The controller stays plain Rust; views read [`ListViewModel::snapshot`],
//! which re-evaluates whenever `version` is bumped after a controller call.

use leptos::*;
use std::rc::Rc;

use super::{
    auth::use_api_client,
    modal_form::{FormValues, SubmitOutcome},
    resource_list::{ListSnapshot, Record, ResourceListController, RowAction},
};
use crate::api::{ApiError, RemoteDataGateway};

/// Gateway provided by the app root, or the HTTP client when none is.
pub fn use_gateway() -> Rc<dyn RemoteDataGateway> {
    use_context::<Rc<dyn RemoteDataGateway>>().unwrap_or_else(|| Rc::new(use_api_client()))
}

pub struct ListViewModel<R: Record> {
    controller: StoredValue<Rc<ResourceListController<R>>>,
    pub version: RwSignal<u32>,
    pub reload: RwSignal<u32>,
    pub load_resource: Resource<u32, ()>,
    pub tab_action: Action<String, Result<bool, ApiError>>,
    pub search_action: Action<String, ()>,
    pub page_action: Action<u32, ()>,
    pub row_action: Action<(RowAction, R), Result<(), ApiError>>,
    pub submit_action: Action<FormValues, SubmitOutcome>,
    /// Record awaiting delete confirmation.
    pub pending_delete: RwSignal<Option<R>>,
}

impl<R: Record> Clone for ListViewModel<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for ListViewModel<R> {}

fn bump(signal: RwSignal<u32>) {
    signal.update(|value| *value = value.wrapping_add(1));
}

pub fn use_list_view_model<R: Record>(controller: ResourceListController<R>) -> ListViewModel<R> {
    let controller = store_value(Rc::new(controller));
    let version = create_rw_signal(0u32);
    let reload = create_rw_signal(0u32);

    let load_resource = create_resource(
        move || reload.get(),
        move |_| {
            let list = controller.get_value();
            async move {
                let _ = list.reload().await;
                bump(version);
            }
        },
    );

    let tab_action = create_action(move |key: &String| {
        let list = controller.get_value();
        let key = key.clone();
        async move {
            let result = list.select_tab(&key).await;
            bump(version);
            result
        }
    });

    let search_action = create_action(move |keyword: &String| {
        let list = controller.get_value();
        let keyword = keyword.clone();
        async move {
            list.search(keyword).await;
            bump(version);
        }
    });

    let page_action = create_action(move |page: &u32| {
        let list = controller.get_value();
        let page = *page;
        async move {
            list.go_to_page(page).await;
            bump(version);
        }
    });

    let row_action = create_action(move |(action, record): &(RowAction, R)| {
        let list = controller.get_value();
        let action = *action;
        let record = record.clone();
        async move {
            let result = list.apply_row_action(action, &record).await;
            bump(version);
            result
        }
    });

    let submit_action = create_action(move |values: &FormValues| {
        let list = controller.get_value();
        let values = values.clone();
        async move {
            let outcome = list.submit(values).await;
            bump(version);
            outcome
        }
    });

    ListViewModel {
        controller,
        version,
        reload,
        load_resource,
        tab_action,
        search_action,
        page_action,
        row_action,
        submit_action,
        pending_delete: create_rw_signal(None),
    }
}

impl<R: Record> ListViewModel<R> {
    pub fn snapshot(&self) -> Signal<ListSnapshot<R>> {
        let controller = self.controller;
        let version = self.version;
        Signal::derive(move || {
            version.get();
            controller.with_value(|list| list.snapshot())
        })
    }

    pub fn refresh(&self) {
        bump(self.reload);
    }

    pub fn open_create(&self) {
        self.controller.with_value(|list| list.open_create());
        bump(self.version);
    }

    pub fn close_form(&self) {
        self.controller.with_value(|list| list.close_form());
        bump(self.version);
    }

    pub fn set_field(&self, name: &str, value: String) {
        self.controller
            .with_value(|list| list.form().set_field(name, value));
        bump(self.version);
    }

    pub fn clear_message(&self) {
        self.controller.with_value(|list| list.clear_message());
        bump(self.version);
    }

    pub fn select_tab(&self, key: String) {
        self.tab_action.dispatch(key);
    }

    pub fn search(&self, keyword: String) {
        self.search_action.dispatch(keyword);
    }

    pub fn go_to_page(&self, page: u32) {
        self.page_action.dispatch(page);
    }

    pub fn row(&self, action: RowAction, record: R) {
        self.row_action.dispatch((action, record));
    }

    /// Row action from a button; deletes wait for [`confirm_delete`](Self::confirm_delete).
    pub fn request(&self, action: RowAction, record: R) {
        match action {
            RowAction::Delete => self.pending_delete.set(Some(record)),
            _ => self.row(action, record),
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(record) = self.pending_delete.get_untracked() {
            self.row(RowAction::Delete, record);
        }
        self.pending_delete.set(None);
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    /// Submits the values currently held by the open form session.
    pub fn submit(&self) {
        let values = self
            .controller
            .with_value(|list| list.form().snapshot().values);
        self.submit_action.dispatch(values);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::ResourceEndpoints,
        state::{
            modal_form::{FieldRule, FormPhase, FormSchema, ModalFormController},
            resource_list::ResourceSpec,
        },
        test_support::{gateway::ScriptedGateway, ssr::with_runtime},
    };
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Key {
        id: i64,
        name: String,
    }

    impl Record for Key {
        fn id(&self) -> i64 {
            self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn is_enabled(&self) -> bool {
            true
        }
        fn seed(&self) -> FormValues {
            FormValues::new().with("name", self.name.clone())
        }
    }

    #[test]
    fn form_changes_are_visible_through_snapshot() {
        with_runtime(|| {
            leptos_reactive::suppress_resource_load(true);
            let controller = ResourceListController::<Key>::new(
                Rc::new(ScriptedGateway::new()),
                ResourceSpec::new(ResourceEndpoints::new("/api-key")),
                ModalFormController::new(
                    FormSchema::new(vec![FieldRule::new("name", "名称").required()]),
                    Duration::from_millis(2000),
                ),
            );
            let vm = use_list_view_model(controller);
            let snapshot = vm.snapshot();
            assert_eq!(snapshot.get_untracked().form.phase, FormPhase::Closed);

            vm.open_create();
            vm.set_field("name", "key-1".into());
            let form = snapshot.get_untracked().form;
            assert_eq!(form.phase, FormPhase::Open);
            assert_eq!(form.values.get("name"), "key-1");

            vm.close_form();
            assert_eq!(snapshot.get_untracked().form.phase, FormPhase::Closed);

            let key = Key {
                id: 3,
                name: "key-3".into(),
            };
            vm.request(RowAction::Delete, key.clone());
            assert_eq!(vm.pending_delete.get_untracked(), Some(key));
            vm.cancel_delete();
            assert_eq!(vm.pending_delete.get_untracked(), None);
            leptos_reactive::suppress_resource_load(false);
        });
    }
}
