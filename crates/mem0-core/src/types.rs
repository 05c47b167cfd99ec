// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by the Mem0 client: messages, memories, entities and
//! the request/response shapes of the memory API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::error::Mem0Error;

/// Free-form metadata attached to memories and queries.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A single conversational message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Speaker role, e.g. "user" or "assistant". Not validated client-side.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// The optional `{user, agent, app, run}` tuple that tags memories and
/// filters queries. Not a key: any subset may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityScope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl IdentityScope {
    /// Scope to a single end user.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Scope to a single agent.
    pub fn agent(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: Some(agent_id.into()),
            ..Self::default()
        }
    }

    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_app(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_run(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.agent_id.is_none()
            && self.app_id.is_none()
            && self.run_id.is_none()
    }

    /// The single entity this scope names, first match in the order
    /// user > agent > app > run. Lower-priority fields are ignored.
    pub fn entity_target(&self) -> Option<Entity> {
        let candidates = [
            (EntityType::User, &self.user_id),
            (EntityType::Agent, &self.agent_id),
            (EntityType::App, &self.app_id),
            (EntityType::Run, &self.run_id),
        ];
        candidates.into_iter().find_map(|(entity_type, name)| {
            name.as_ref().map(|name| Entity {
                entity_type,
                name: name.clone(),
            })
        })
    }
}

/// A server-stored memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default)]
    pub id: String,
    /// Extracted memory text (`memory` on the wire).
    #[serde(default, rename = "memory")]
    pub content: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Relevance score, present on search results.
    #[serde(default)]
    pub score: Option<f64>,
}

/// Accepts RFC 3339 timestamps and naive ISO timestamps (read as UTC).
/// Anything else decodes to `None` rather than failing the whole memory.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| naive.and_utc())
                    .ok()
            })
    }))
}

/// A page of memories.
///
/// Decodes from either `{"results": [...], "next_token": ...}` or a bare
/// array, since older servers answer list and search calls with the latter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MemoryListWire")]
pub struct MemoryList {
    pub results: Vec<Memory>,
    pub next_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MemoryListWire {
    Bare(Vec<Memory>),
    Paged {
        #[serde(default)]
        results: Vec<Memory>,
        #[serde(default)]
        next_token: Option<String>,
    },
}

impl From<MemoryListWire> for MemoryList {
    fn from(wire: MemoryListWire) -> Self {
        match wire {
            MemoryListWire::Bare(results) => Self {
                results,
                next_token: None,
            },
            MemoryListWire::Paged {
                results,
                next_token,
            } => Self {
                results,
                next_token,
            },
        }
    }
}

/// One memory event produced by an add call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMemoryResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub memory: String,
    /// "ADD", "UPDATE", "DELETE" or "NOOP".
    #[serde(default)]
    pub event: String,
}

/// Response of an add call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AddMemoryWire")]
pub struct AddMemoryResponse {
    pub results: Vec<AddMemoryResult>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AddMemoryWire {
    Bare(Vec<AddMemoryResult>),
    Wrapped {
        #[serde(default)]
        results: Vec<AddMemoryResult>,
    },
}

impl From<AddMemoryWire> for AddMemoryResponse {
    fn from(wire: AddMemoryWire) -> Self {
        match wire {
            AddMemoryWire::Bare(results) | AddMemoryWire::Wrapped { results } => Self { results },
        }
    }
}

/// Kind of entity a memory can be scoped to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Agent,
    App,
    Run,
}

/// A named, typed reference used for bulk and cascading operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
}

impl Entity {
    pub fn new(entity_type: EntityType, name: impl Into<String>) -> Self {
        Self {
            entity_type,
            name: name.into(),
        }
    }
}

/// Response of the entity listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitiesResponse {
    #[serde(default)]
    pub results: Vec<Entity>,
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One entry of a batch update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMemoryUpdate {
    pub memory_id: String,
    pub text: String,
}

/// One entry of a batch delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMemoryDelete {
    pub memory_id: String,
}

/// Feedback on the quality of a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feedback {
    Positive,
    Negative,
    VeryNegative,
}

impl std::str::FromStr for Feedback {
    type Err = Mem0Error;

    /// Case-insensitive; underscores and dashes are ignored, so
    /// `VeryNegative`, `very_negative` and `VERY-NEGATIVE` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();
        match folded.as_str() {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "VERYNEGATIVE" => Ok(Self::VeryNegative),
            _ => Err(Mem0Error::Validation(format!(
                "feedback must be one of POSITIVE, NEGATIVE, VERY_NEGATIVE, got `{s}`"
            ))),
        }
    }
}

/// Structured search against the self-hosted `search` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Metadata>,
    /// Similarity threshold in `[0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Maximum number of results.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            user_id: None,
            run_id: None,
            agent_id: None,
            filters: None,
            threshold: default_threshold(),
            limit: default_limit(),
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_limit() -> u32 {
    10
}

/// Response of the structured search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub results: Vec<Memory>,
    #[serde(default)]
    pub relations: Vec<serde_json::Value>,
}

/// Account information returned by the ping endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_target_prefers_user_over_everything() {
        let scope = IdentityScope::user("alex").with_agent("bot").with_run("r1");
        assert_eq!(
            scope.entity_target(),
            Some(Entity::new(EntityType::User, "alex"))
        );
    }

    #[test]
    fn entity_target_walks_priority_order() {
        let scope = IdentityScope::default().with_app("shop").with_run("r1");
        assert_eq!(
            scope.entity_target(),
            Some(Entity::new(EntityType::App, "shop"))
        );

        let scope = IdentityScope::default().with_run("r1");
        assert_eq!(
            scope.entity_target(),
            Some(Entity::new(EntityType::Run, "r1"))
        );

        assert!(IdentityScope::default().entity_target().is_none());
        assert!(IdentityScope::default().is_empty());
    }

    #[test]
    fn memory_decodes_wire_names_and_timestamps() {
        let json = serde_json::json!({
            "id": "m1",
            "memory": "Is vegetarian",
            "user_id": "alex",
            "metadata": {"food": true},
            "created_at": "2024-07-20T01:30:09.546127-07:00",
            "updated_at": "2024-07-20T08:30:09.546127",
            "score": 0.91,
            "hash": "ignored"
        });
        let memory: Memory = serde_json::from_value(json).unwrap();
        assert_eq!(memory.id, "m1");
        assert_eq!(memory.content, "Is vegetarian");
        assert_eq!(memory.user_id.as_deref(), Some("alex"));
        assert_eq!(memory.score, Some(0.91));
        assert_eq!(memory.created_at, memory.updated_at);
        assert!(memory.text.is_empty());
    }

    #[test]
    fn unparseable_timestamp_is_dropped_not_fatal() {
        let memory: Memory =
            serde_json::from_str(r#"{"id":"m1","created_at":"yesterday"}"#).unwrap();
        assert!(memory.created_at.is_none());
    }

    #[test]
    fn memory_list_accepts_bare_array_and_paged_object() {
        let bare: MemoryList = serde_json::from_str(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(bare.results.len(), 2);
        assert!(bare.next_token.is_none());

        let paged: MemoryList =
            serde_json::from_str(r#"{"results":[{"id":"a"}],"next_token":"t2"}"#).unwrap();
        assert_eq!(paged.results[0].id, "a");
        assert_eq!(paged.next_token.as_deref(), Some("t2"));

        let empty: MemoryList = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }

    #[test]
    fn feedback_wire_form_and_parsing() {
        assert_eq!(
            serde_json::to_string(&Feedback::VeryNegative).unwrap(),
            "\"VERY_NEGATIVE\""
        );
        assert_eq!(Feedback::VeryNegative.to_string(), "VERY_NEGATIVE");
        assert_eq!("VeryNegative".parse::<Feedback>().unwrap(), Feedback::VeryNegative);
        assert_eq!("positive".parse::<Feedback>().unwrap(), Feedback::Positive);

        let err = "meh".parse::<Feedback>().unwrap_err();
        assert!(err.is_validation(), "got: {err}");
    }

    #[test]
    fn entity_type_round_trips_lowercase() {
        let entity: Entity = serde_json::from_str(r#"{"type":"agent","name":"bot"}"#).unwrap();
        assert_eq!(entity.entity_type, EntityType::Agent);
        assert_eq!(entity.entity_type.to_string(), "agent");
    }

    #[test]
    fn search_request_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"query":"dinner"}"#).unwrap();
        assert_eq!(req.threshold, 0.3);
        assert_eq!(req.limit, 10);

        let body = serde_json::to_value(SearchRequest::new("dinner").for_user("alex")).unwrap();
        assert_eq!(body["user_id"], "alex");
        assert!(body.get("agent_id").is_none());
    }
}
