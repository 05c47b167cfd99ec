// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request parameter sets and the normalizer.
//!
//! A [`ParamSet`] is what an operation *might* send: every candidate key with
//! an explicit absent state. The [`Normalizer`] turns it into
//! [`NormalizedParams`], the null-free mapping (plus org/project when the
//! client has them) that both the query-string and the JSON-body renderers
//! consume.

use std::collections::BTreeMap;

use mem0_core::{IdentityScope, Mem0Error};
use serde::Serialize;
use serde_json::Value;

use crate::identity::ClientIdentity;

/// Candidate parameters for one request, in insertion order.
///
/// `None` means "not provided". A present JSON `null` is treated the same
/// way; every other value, including `0`, `false` and `""`, is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<(String, Option<Value>)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate that may be absent.
    pub fn set<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.entries.push((key.into(), value.map(Into::into)));
        self
    }

    /// Add a candidate that is always present.
    pub fn present(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, Some(value))
    }

    /// Add a serializable value (messages, batch items, ...).
    pub fn json<T: Serialize + ?Sized>(
        self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, Mem0Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.present(key, value))
    }

    /// Add the four identity-scope fields.
    pub fn scope(self, scope: &IdentityScope) -> Self {
        self.set("user_id", scope.user_id.clone())
            .set("agent_id", scope.agent_id.clone())
            .set("app_id", scope.app_id.clone())
            .set("run_id", scope.run_id.clone())
    }

    /// Every top-level field of a serializable struct becomes a candidate.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, Mem0Error> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self {
                entries: fields.into_iter().map(|(k, v)| (k, Some(v))).collect(),
            }),
            other => Err(Mem0Error::Validation(format!(
                "expected an object of parameters, got {other}"
            ))),
        }
    }

    /// Drop absent and null entries without touching client identity.
    ///
    /// Used directly only for values that never carry tenancy (pagination
    /// fields, update payloads); everything else goes through [`Normalizer`].
    pub fn drop_absent(self) -> NormalizedParams {
        let mut map = BTreeMap::new();
        for (key, value) in self.entries {
            match value {
                None | Some(Value::Null) => {}
                Some(value) => {
                    map.insert(key, value);
                }
            }
        }
        NormalizedParams(map)
    }
}

/// A null-free parameter mapping, ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedParams(BTreeMap<String, Value>);

impl NormalizedParams {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The mapping as a JSON object, with `primary` inserted last so it wins
    /// over any normalized key of the same name.
    pub fn to_object_with(&self, primary: Option<(&str, Value)>) -> serde_json::Map<String, Value> {
        let mut object: serde_json::Map<String, Value> =
            self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        if let Some((key, value)) = primary {
            object.insert(key.to_string(), value);
        }
        object
    }
}

/// Applies the null-drop rule and injects org/project from the client identity.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    identity: &'a ClientIdentity,
}

impl<'a> Normalizer<'a> {
    pub fn new(identity: &'a ClientIdentity) -> Self {
        Self { identity }
    }

    /// Normalize one call's candidates.
    ///
    /// Fails with [`Mem0Error::Config`] when exactly one of org/project is
    /// set on the client; this happens before any request is built.
    pub fn normalize(&self, candidates: ParamSet) -> Result<NormalizedParams, Mem0Error> {
        let tenancy = self.identity.org_project()?;
        let mut params = candidates.drop_absent();
        if let Some((org_id, project_id)) = tenancy {
            params.0.insert("org_id".to_string(), Value::from(org_id));
            params.0.insert("project_id".to_string(), Value::from(project_id));
        }
        Ok(params)
    }
}
