use async_trait::async_trait;
use serde_json::Value;
use std::{cell::RefCell, collections::VecDeque, time::Duration};

use crate::{
    api::{ApiError, Envelope, GatewayRequest, Method, RemoteDataGateway},
    utils::timer::sleep,
};

#[derive(Debug, Clone)]
pub struct Reply {
    result: Result<Envelope<Value>, ApiError>,
    delay: Duration,
}

impl Reply {
    pub fn ok(data: Value) -> Self {
        Self {
            result: Ok(Envelope::ok(data)),
            delay: Duration::ZERO,
        }
    }

    pub fn failure(code: &str, message: &str) -> Self {
        Self {
            result: Ok(Envelope::failure(code, message)),
            delay: Duration::ZERO,
        }
    }

    pub fn transport(message: &str) -> Self {
        Self {
            result: Err(ApiError::transport(message)),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Route {
    method: Method,
    path: String,
    query: Option<(String, String)>,
    replies: VecDeque<Reply>,
}

impl Route {
    fn matches(&self, request: &GatewayRequest) -> bool {
        self.method == request.method
            && self.path == request.path
            && self
                .query
                .as_ref()
                .map(|(k, v)| request.query_value(k) == Some(v.as_str()))
                .unwrap_or(true)
    }

    /// Replies are consumed in order; the last one repeats.
    fn next_reply(&mut self) -> Option<Reply> {
        if self.replies.len() > 1 {
            self.replies.pop_front()
        } else {
            self.replies.front().cloned()
        }
    }
}

/// In-memory [`RemoteDataGateway`] answering from scripted replies and
/// recording every request it receives.
#[derive(Default)]
pub struct ScriptedGateway {
    routes: RefCell<Vec<Route>>,
    calls: RefCell<Vec<GatewayRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, reply: Reply) {
        self.push(method, path, None, reply);
    }

    /// Like [`respond`](Self::respond) but only for requests carrying the
    /// given query pair.
    pub fn respond_when(&self, method: Method, path: &str, query: (&str, &str), reply: Reply) {
        self.push(
            method,
            path,
            Some((query.0.to_string(), query.1.to_string())),
            reply,
        );
    }

    fn push(&self, method: Method, path: &str, query: Option<(String, String)>, reply: Reply) {
        let mut routes = self.routes.borrow_mut();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path && r.query == query)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                query,
                replies: VecDeque::from([reply]),
            }),
        }
    }

    pub fn calls(&self) -> Vec<GatewayRequest> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }
}

#[async_trait(?Send)]
impl RemoteDataGateway for ScriptedGateway {
    async fn request(&self, request: GatewayRequest) -> Result<Envelope<Value>, ApiError> {
        self.calls.borrow_mut().push(request.clone());
        let reply = self
            .routes
            .borrow_mut()
            .iter_mut()
            .find(|route| route.matches(&request))
            .and_then(Route::next_reply);
        let Some(reply) = reply else {
            return Err(ApiError::transport(format!("no scripted reply for {}", request)));
        };
        if !reply.delay.is_zero() {
            sleep(reply.delay).await;
        }
        reply.result
    }
}
