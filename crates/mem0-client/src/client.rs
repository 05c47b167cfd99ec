// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The operation façade.
//!
//! Every public method follows one template: collect candidate parameters,
//! normalize them against the client identity, build the request, dispatch
//! it through the transport (racing the cancellation token) and decode the
//! 2xx body into the declared result type.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use mem0_config::ApiConfig;
use mem0_config::model::DEFAULT_BASE_URL;
use mem0_core::{
    AddMemoryResponse, BatchMemoryDelete, BatchMemoryUpdate, EntitiesResponse, Feedback,
    HttpMethod, HttpRequest, HttpResponse, IdentityScope, Mem0Error, Memory, MemoryList, Message,
    MessageResponse, Metadata, PingResponse, SearchRequest, SearchResult, Transport,
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::identity::ClientIdentity;
use crate::options::{AddOptions, ListOptions, SearchOptions};
use crate::params::{NormalizedParams, Normalizer, ParamSet};
use crate::request::{self, ApiVersion};
use crate::transport::ReqwestTransport;

/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const ENTITY_DELETED: &str = "Entity deleted successfully.";
const ALL_ENTITIES_DELETED: &str = "All users, agents, apps and runs deleted.";
const ALL_MEMORIES_RESET: &str = "All memories reset";

/// Async client for the Mem0 memory API.
///
/// Cheap to clone; clones share the transport and identity. Each clone made
/// through [`Mem0Client::with_cancellation`] carries its own token.
#[derive(Clone)]
pub struct Mem0Client {
    transport: Arc<dyn Transport>,
    identity: Arc<ClientIdentity>,
    cancel: CancellationToken,
}

impl fmt::Debug for Mem0Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mem0Client")
            .field("identity", &self.identity)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Mem0Client`].
pub struct Mem0ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    org_id: Option<String>,
    project_id: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for Mem0ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            org_id: None,
            project_id: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            transport: None,
        }
    }
}

impl Mem0ClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Explicit API key. Without one, `MEM0_API_KEY` is read at build time.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the HTTP transport (tests, custom stacks).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<Mem0Client, Mem0Error> {
        let identity = ClientIdentity::resolve(self.api_key)?
            .with_org_id(self.org_id)
            .with_project_id(self.project_id);

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                &self.base_url,
                &identity,
                self.timeout,
                self.user_agent.as_deref(),
            )?),
        };

        Ok(Mem0Client::with_transport(identity, transport))
    }
}

impl Mem0Client {
    pub fn builder() -> Mem0ClientBuilder {
        Mem0ClientBuilder::default()
    }

    /// Build a client from the `[api]` section of a loaded config.
    pub fn from_config(api: &ApiConfig) -> Result<Self, Mem0Error> {
        let mut builder = Self::builder()
            .base_url(api.base_url.as_str())
            .timeout(api.timeout());
        builder.api_key = api.api_key.clone();
        builder.org_id = api.org_id.clone();
        builder.project_id = api.project_id.clone();
        builder.user_agent = api.user_agent.clone();
        builder.build()
    }

    pub fn with_transport(identity: ClientIdentity, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            identity: Arc::new(identity),
            cancel: CancellationToken::new(),
        }
    }

    /// A handle whose calls abort with [`Mem0Error::Cancelled`] once `token`
    /// is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            identity: Arc::clone(&self.identity),
            cancel: token,
        }
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    fn normalize(&self, candidates: ParamSet) -> Result<NormalizedParams, Mem0Error> {
        Normalizer::new(&self.identity).normalize(candidates)
    }

    /// Identity-only params (org/project when set) for routes that take no
    /// other arguments.
    fn identity_params(&self) -> Result<NormalizedParams, Mem0Error> {
        self.normalize(ParamSet::new())
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, Mem0Error> {
        if self.cancel.is_cancelled() {
            return Err(Mem0Error::Cancelled);
        }

        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, "dispatching request");

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!(%method, %path, "request cancelled");
                return Err(Mem0Error::Cancelled);
            }
            result = self.transport.send(request) => result?,
        };

        if !response.is_success() {
            warn!(
                %method,
                %path,
                status = response.status,
                reason = %response.reason,
                "API request failed"
            );
            return Err(Mem0Error::Api {
                status: response.status,
                reason: response.reason,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn call<T: DeserializeOwned + Default>(
        &self,
        request: HttpRequest,
    ) -> Result<T, Mem0Error> {
        let response = self.dispatch(request).await?;
        decode(&response.body)
    }

    /// Record conversation messages as memories.
    pub async fn add(
        &self,
        messages: &[Message],
        options: &AddOptions,
    ) -> Result<AddMemoryResponse, Mem0Error> {
        let params = self.normalize(options.params().json("messages", messages)?)?;
        let request = request::body_request(HttpMethod::Post, "memories/", &params)?;
        self.call(request).await
    }

    pub async fn get(&self, memory_id: &str) -> Result<Memory, Mem0Error> {
        let params = self.identity_params()?;
        let request =
            request::query_request(HttpMethod::Get, request::memory_path(memory_id)?, &params)?;
        self.call(request).await
    }

    /// List memories through the v1 (`""`) or v2 (`"v2"`) route.
    pub async fn get_all(&self, options: &ListOptions) -> Result<MemoryList, Mem0Error> {
        let version: ApiVersion = options.version.parse()?;
        let params = self.normalize(options.params())?;
        let request = request::list_memories(version, &params, options.pagination())?;
        self.call(request).await
    }

    /// Free-text search. Accepts both the bare-array and `{results}` answers.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Memory>, Mem0Error> {
        let version: ApiVersion = options.version.parse()?;
        let params = self.normalize(options.params())?;
        let request = request::search(version, query, &params)?;
        let list: MemoryList = self.call(request).await?;
        Ok(list.results)
    }

    /// Structured search with threshold and limit.
    pub async fn search_memories(
        &self,
        search: &SearchRequest,
    ) -> Result<SearchResult, Mem0Error> {
        let params = self.normalize(ParamSet::from_serializable(search)?)?;
        let request = request::body_request(HttpMethod::Post, "search", &params)?;
        self.call(request).await
    }

    /// Replace a memory's text and/or metadata. At least one must be given.
    pub async fn update(
        &self,
        memory_id: &str,
        text: Option<&str>,
        metadata: Option<&Metadata>,
    ) -> Result<Memory, Mem0Error> {
        if text.is_none() && metadata.is_none() {
            return Err(Mem0Error::Validation(
                "either text or metadata must be provided for update".to_string(),
            ));
        }

        let path = request::memory_path(memory_id)?;
        let params = self.identity_params()?;
        let payload = ParamSet::new()
            .set("text", text)
            .set("metadata", metadata.cloned())
            .drop_absent();
        let request = request::query_request(HttpMethod::Put, path, &params)?
            .with_body(request::json_body(&payload)?);
        self.call(request).await
    }

    pub async fn delete(&self, memory_id: &str) -> Result<MessageResponse, Mem0Error> {
        let params = self.identity_params()?;
        let request =
            request::query_request(HttpMethod::Delete, request::memory_path(memory_id)?, &params)?;
        self.call(request).await
    }

    /// Delete every memory matching `scope`.
    pub async fn delete_all(&self, scope: &IdentityScope) -> Result<MessageResponse, Mem0Error> {
        let params = self.normalize(ParamSet::new().scope(scope))?;
        let request = request::query_request(HttpMethod::Delete, "memories/", &params)?;
        self.call(request).await
    }

    pub async fn history(&self, memory_id: &str) -> Result<Vec<Memory>, Mem0Error> {
        let params = self.identity_params()?;
        let request = request::query_request(
            HttpMethod::Get,
            request::memory_history_path(memory_id)?,
            &params,
        )?;
        self.call(request).await
    }

    /// All users, agents, apps and runs known to the server.
    pub async fn users(&self) -> Result<EntitiesResponse, Mem0Error> {
        let params = self.identity_params()?;
        let request = request::query_request(HttpMethod::Get, "entities/", &params)?;
        self.call(request).await
    }

    /// Delete the entity named by `scope`, or every entity when `scope` is
    /// empty.
    ///
    /// With a non-empty scope only the first field in user > agent > app >
    /// run order is used. Deletes run one at a time in listing order and
    /// stop at the first failure; earlier deletes are not rolled back.
    pub async fn delete_entities(
        &self,
        scope: &IdentityScope,
    ) -> Result<MessageResponse, Mem0Error> {
        let params = self.identity_params()?;

        let (targets, message) = match scope.entity_target() {
            Some(entity) => (vec![entity], ENTITY_DELETED),
            None => (self.users().await?.results, ALL_ENTITIES_DELETED),
        };
        if targets.is_empty() {
            return Err(Mem0Error::NoEntitiesToDelete);
        }

        let requests = targets
            .iter()
            .map(|entity| {
                request::query_request(HttpMethod::Delete, request::entity_path(entity)?, &params)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = targets.len(), "deleting entities");
        for (entity, request) in targets.iter().zip(requests) {
            self.dispatch(request).await?;
            debug!(entity_type = %entity.entity_type, name = %entity.name, "entity deleted");
        }
        Ok(MessageResponse::new(message))
    }

    /// Wipe every memory in the account (or org/project).
    pub async fn reset(&self) -> Result<MessageResponse, Mem0Error> {
        let params = self.identity_params()?;
        let request = request::query_request(HttpMethod::Post, "reset/", &params)?;
        self.dispatch(request).await?;
        info!("all memories reset");
        Ok(MessageResponse::new(ALL_MEMORIES_RESET))
    }

    pub async fn batch_update(
        &self,
        memories: &[BatchMemoryUpdate],
    ) -> Result<MessageResponse, Mem0Error> {
        let params = self.normalize(ParamSet::new().json("memories", memories)?)?;
        let request = request::body_request(HttpMethod::Put, "batch/", &params)?;
        self.call(request).await
    }

    /// `DELETE batch/` with a JSON body.
    pub async fn batch_delete(
        &self,
        memories: &[BatchMemoryDelete],
    ) -> Result<MessageResponse, Mem0Error> {
        let params = self.normalize(ParamSet::new().json("memories", memories)?)?;
        let request = request::body_request(HttpMethod::Delete, "batch/", &params)?;
        self.call(request).await
    }

    pub async fn feedback(
        &self,
        memory_id: &str,
        feedback: Option<Feedback>,
        reason: Option<&str>,
    ) -> Result<MessageResponse, Mem0Error> {
        let candidates = ParamSet::new()
            .present("memory_id", memory_id)
            .json("feedback", &feedback)?
            .set("feedback_reason", reason);
        let params = self.normalize(candidates)?;
        let request = request::body_request(HttpMethod::Post, "feedback/", &params)?;
        self.call(request).await
    }

    /// [`Mem0Client::feedback`] with the feedback value given as text.
    ///
    /// Text outside POSITIVE / NEGATIVE / VERY_NEGATIVE fails with
    /// [`Mem0Error::Validation`] and nothing is sent.
    pub async fn feedback_str(
        &self,
        memory_id: &str,
        feedback: Option<&str>,
        reason: Option<&str>,
    ) -> Result<MessageResponse, Mem0Error> {
        let feedback = feedback.map(str::parse::<Feedback>).transpose()?;
        self.feedback(memory_id, feedback, reason).await
    }

    /// Check credentials and report the account the key belongs to.
    pub async fn ping(&self) -> Result<PingResponse, Mem0Error> {
        let params = self.identity_params()?;
        let request = request::query_request(HttpMethod::Get, "ping/", &params)?;
        self.call(request).await
    }

    /// Send a project configuration document as-is.
    pub async fn configure(
        &self,
        config: &serde_json::Value,
    ) -> Result<MessageResponse, Mem0Error> {
        let request =
            HttpRequest::new(HttpMethod::Post, "configure").with_body(serde_json::to_string(config)?);
        self.call(request).await
    }
}

/// Decode a 2xx body. Empty bodies and JSON `null` yield the default value.
fn decode<T: DeserializeOwned + Default>(body: &str) -> Result<T, Mem0Error> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| Mem0Error::Decode {
            message: format!("unexpected response body: {e}"),
            source: Some(Box::new(e)),
        })
}
