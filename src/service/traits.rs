//! Trait abstraction for the member service to enable mocking in tests

use crate::error::ServiceError;
use crate::schema::FormSchema;
use crate::state::FieldValue;
use crate::submission::Payload;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Schema and optional profile values for one form session
#[derive(Debug, Clone, Default)]
pub struct FetchedSchema {
    pub schema: FormSchema,
    /// Present in profile-edit flows
    pub prefill: BTreeMap<String, FieldValue>,
}

/// Operations the form engine needs from the member service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormService: Send + Sync {
    /// Fetch the form schema; called once per form session
    async fn fetch_schema(&self) -> Result<FetchedSchema, ServiceError>;

    /// Send a fully serialized payload in a single attempt
    async fn submit(&self, payload: Payload) -> Result<(), ServiceError>;
}
