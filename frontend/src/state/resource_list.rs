use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::{
    message::MessageState,
    modal_form::{FormMode, FormSnapshot, FormValues, ModalFormController, SubmitOutcome},
    tabs::TabSegmentController,
};
use crate::{
    api::{fetch, ApiError, Envelope, GatewayRequest, ListData, RemoteDataGateway, ResourceEndpoints},
    config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
};

/// A row managed by [`ResourceListController`].
pub trait Record: Clone + DeserializeOwned + 'static {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn is_enabled(&self) -> bool;
    /// Values an edit session starts from.
    fn seed(&self) -> FormValues;

    /// Request body for a create/edit submit. `tab` is the active tab key.
    fn form_payload(values: &FormValues, _tab: Option<&str>) -> Value {
        values.to_json()
    }
}

/// Static description of one remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    pub endpoints: ResourceEndpoints,
    /// Query parameter carrying the active tab key, if the list is segmented.
    pub tab_param: Option<&'static str>,
    pub keyword_param: &'static str,
}

impl ResourceSpec {
    pub const fn new(endpoints: ResourceEndpoints) -> Self {
        Self {
            endpoints,
            tab_param: None,
            keyword_param: "name",
        }
    }

    pub const fn tab_param(mut self, param: &'static str) -> Self {
        self.tab_param = Some(param);
        self
    }

    pub const fn keyword_param(mut self, param: &'static str) -> Self {
        self.keyword_param = param;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScope {
    pub tab: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub keyword: Option<String>,
}

impl Default for ListScope {
    fn default() -> Self {
        Self {
            tab: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            keyword: None,
        }
    }
}

impl ListScope {
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    fn into_request(self, spec: &ResourceSpec) -> GatewayRequest {
        let mut request = spec.endpoints.list();
        if let (Some(param), Some(tab)) = (spec.tab_param, self.tab) {
            request = request.with_query(param, tab);
        }
        request = request
            .with_query("page", self.page.max(1))
            .with_query("page_size", self.page_size.clamp(1, MAX_PAGE_SIZE));
        if let Some(keyword) = self.keyword.filter(|k| !k.trim().is_empty()) {
            request = request.with_query(spec.keyword_param, keyword.trim());
        }
        request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Disable,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::Edit, RowAction::Disable, RowAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "编辑",
            RowAction::Disable => "禁用",
            RowAction::Delete => "删除",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<R> {
    pub records: Vec<R>,
    pub total: u64,
    pub loading: bool,
    pub message: MessageState,
    pub tabs: Option<TabSegmentController>,
    pub scope: ListScope,
    pub form: FormSnapshot,
}

struct ListState<R> {
    records: Vec<R>,
    total: u64,
    loading: bool,
    message: MessageState,
    tabs: Option<TabSegmentController>,
    page: u32,
    page_size: u32,
    keyword: Option<String>,
}

/// Remote record collection with tabs, row actions and one modal form.
///
/// Loads may overlap: each takes a request token at issue time and only the
/// most recently issued one may write the collection.
pub struct ResourceListController<R: Record> {
    gateway: Rc<dyn RemoteDataGateway>,
    spec: ResourceSpec,
    form: ModalFormController,
    state: RefCell<ListState<R>>,
    latest_request: Cell<u64>,
}

impl<R: Record> ResourceListController<R> {
    pub fn new(
        gateway: Rc<dyn RemoteDataGateway>,
        spec: ResourceSpec,
        form: ModalFormController,
    ) -> Self {
        Self {
            gateway,
            spec,
            form,
            state: RefCell::new(ListState {
                records: Vec::new(),
                total: 0,
                loading: false,
                message: MessageState::default(),
                tabs: None,
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
                keyword: None,
            }),
            latest_request: Cell::new(0),
        }
    }

    pub fn with_tabs(self, tabs: TabSegmentController) -> Self {
        self.state.borrow_mut().tabs = Some(tabs);
        self
    }

    pub fn with_page_size(self, page_size: u32) -> Self {
        self.state.borrow_mut().page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn form(&self) -> &ModalFormController {
        &self.form
    }

    /// Scope of the next [`reload`](Self::reload).
    pub fn scope(&self) -> ListScope {
        let state = self.state.borrow();
        ListScope {
            tab: state.tabs.as_ref().map(|tabs| tabs.active_key().to_string()),
            page: state.page,
            page_size: state.page_size,
            keyword: state.keyword.clone(),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        let scope = self.scope();
        let state = self.state.borrow();
        ListSnapshot {
            records: state.records.clone(),
            total: state.total,
            loading: state.loading,
            message: state.message.clone(),
            tabs: state.tabs.clone(),
            scope,
            form: self.form.snapshot(),
        }
    }

    /// Fetches one page for `scope`. The result is written back only when no
    /// newer load was issued meanwhile; a business failure keeps the
    /// previous records.
    pub async fn load(&self, scope: ListScope) -> Result<Envelope<ListData<R>>, ApiError> {
        let token = self.latest_request.get().wrapping_add(1);
        self.latest_request.set(token);
        self.state.borrow_mut().loading = true;

        let request = scope.into_request(&self.spec);
        let result = fetch::<ListData<R>>(self.gateway.as_ref(), request).await;

        if token != self.latest_request.get() {
            log::debug!("discarding stale list response (token {})", token);
            return result;
        }

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match &result {
            Ok(envelope) if envelope.success => {
                let page = envelope.data.clone().unwrap_or_default();
                state.records = page.list;
                state.total = page.total;
                state.message.error = None;
            }
            Ok(envelope) => {
                if let Some(err) = envelope.failure_error() {
                    log::warn!("list load rejected: {}", err);
                    state.message.set_error(err);
                }
            }
            Err(err) => {
                log::error!("list load failed: {}", err);
                state.message.set_error(err.clone());
            }
        }
        result
    }

    pub async fn reload(&self) -> Result<Envelope<ListData<R>>, ApiError> {
        self.load(self.scope()).await
    }

    /// Switches the active tab and reloads page one of the new scope.
    /// Returns `Ok(false)` without loading when `key` is already active.
    pub async fn select_tab(&self, key: &str) -> Result<bool, ApiError> {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = match state.tabs.as_mut() {
                Some(tabs) => tabs.set_active(key)?,
                None => return Err(ApiError::field("tab", "list has no tabs")),
            };
            if changed {
                state.page = 1;
            }
            changed
        };
        if changed {
            let _ = self.reload().await;
        }
        Ok(changed)
    }

    pub async fn go_to_page(&self, page: u32) {
        self.state.borrow_mut().page = page.max(1);
        let _ = self.reload().await;
    }

    pub async fn search(&self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        {
            let mut state = self.state.borrow_mut();
            state.keyword = Some(keyword).filter(|k| !k.trim().is_empty());
            state.page = 1;
        }
        let _ = self.reload().await;
    }

    pub fn set_badge(&self, key: &str, count: u32) -> Result<(), ApiError> {
        match self.state.borrow_mut().tabs.as_mut() {
            Some(tabs) => tabs.set_badge(key, count),
            None => Err(ApiError::field("tab", "list has no tabs")),
        }
    }

    pub fn clear_message(&self) {
        self.state.borrow_mut().message.clear();
    }

    pub async fn apply_row_action(&self, action: RowAction, record: &R) -> Result<(), ApiError> {
        match action {
            RowAction::Edit => {
                self.form.open(FormMode::Edit(record.id()), record.seed());
                Ok(())
            }
            RowAction::Disable => {
                let notice = if record.is_enabled() {
                    "已禁用"
                } else {
                    "已启用"
                };
                self.mutate(self.spec.endpoints.toggle_enabled(record.id()), notice)
                    .await
            }
            RowAction::Delete => {
                self.mutate(self.spec.endpoints.delete(record.id()), "删除成功")
                    .await
            }
        }
    }

    async fn mutate(&self, request: GatewayRequest, notice: &str) -> Result<(), ApiError> {
        let label = request.to_string();
        let outcome = match self.gateway.request(request).await {
            Ok(envelope) => envelope.into_result().map(|_| ()),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(()) => {
                log::info!("{} succeeded", label);
                self.state.borrow_mut().message.set_success(notice);
                let _ = self.reload().await;
                Ok(())
            }
            Err(err) => {
                if err.is_business_like() {
                    log::warn!("{} rejected: {}", label, err);
                } else {
                    log::error!("{} failed: {}", label, err);
                }
                self.state.borrow_mut().message.set_error(err.clone());
                Err(err)
            }
        }
    }

    pub fn open_create(&self) {
        self.form.open_create();
    }

    pub fn close_form(&self) {
        self.form.close();
    }

    /// Submits the open form. On success the form closes, a notice is set
    /// and the list reloads.
    pub async fn submit(&self, values: FormValues) -> SubmitOutcome {
        let tab = self.scope().tab;
        let gateway = self.gateway.clone();
        let endpoints = self.spec.endpoints;
        let outcome = self
            .form
            .submit(values, move |mode, values| {
                let body = R::form_payload(&values, tab.as_deref());
                let request = match mode {
                    FormMode::Create => endpoints.create(body),
                    FormMode::Edit(id) => endpoints.update(id, body),
                };
                async move { gateway.request(request).await }
            })
            .await;
        if let SubmitOutcome::Saved(_) = outcome {
            log::info!("{} saved", endpoints.base());
            self.state.borrow_mut().message.set_success("提交成功");
            let _ = self.reload().await;
        }
        outcome
    }
}
