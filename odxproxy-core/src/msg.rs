use crate::error::ServerError;
use crate::ids::RequestId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Coordinates of the Odoo database the gateway should talk to.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub url: String,
    pub user_id: i64,
    pub db: String,
    pub api_key: String,
}

impl InstanceInfo {
    pub fn new(
        url: impl Into<String>,
        user_id: i64,
        db: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        InstanceInfo {
            url: url.into(),
            user_id,
            db: db.into(),
            api_key: api_key.into(),
        }
    }
}

// Keeps the backend key out of logs.
impl fmt::Debug for InstanceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceInfo")
            .field("url", &self.url)
            .field("user_id", &self.user_id)
            .field("db", &self.db)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Odoo evaluation context forwarded with `keyword.context`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_company_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_company_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Query modifiers sent as the `keyword` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RequestContext>,
}

impl KeywordRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Drop field selection and paging, keeping only the context.
    ///
    /// Actions that address records by id or return a scalar reject these
    /// modifiers on the backend side.
    pub fn reset_pagination(self) -> Self {
        KeywordRequest {
            fields: None,
            order: None,
            limit: None,
            offset: None,
            context: self.context,
        }
    }
}

/// Gateway action names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Search,
    SearchRead,
    Read,
    SearchCount,
    Create,
    Write,
    Unlink,
    FieldsGet,
    CallMethod,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::SearchRead => "search_read",
            Action::Read => "read",
            Action::SearchCount => "search_count",
            Action::Create => "create",
            Action::Write => "write",
            Action::Unlink => "unlink",
            Action::FieldsGet => "fields_get",
            Action::CallMethod => "call_method",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request envelope posted to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub action: Action,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<KeywordRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fn_name: Option<String>,
    #[serde(default = "empty_params")]
    pub params: Value,
    pub odoo_instance: InstanceInfo,
}

fn empty_params() -> Value {
    Value::Array(Vec::new())
}

impl Request {
    /// Start a request with a generated id and empty positional params.
    pub fn new(action: Action, model_id: impl Into<String>, instance: InstanceInfo) -> Self {
        Request {
            id: RequestId::generate(),
            action,
            model_id: model_id.into(),
            keyword: None,
            fn_name: None,
            params: empty_params(),
            odoo_instance: instance,
        }
    }

    /// Replace the generated id when the caller supplied one.
    pub fn with_id(mut self, id: Option<RequestId>) -> Self {
        if let Some(id) = id {
            self.id = id;
        }
        self
    }

    pub fn with_keyword(mut self, keyword: KeywordRequest) -> Self {
        self.keyword = Some(keyword);
        self
    }

    pub fn with_fn_name(mut self, fn_name: impl Into<String>) -> Self {
        self.fn_name = Some(fn_name.into());
        self
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

/// Response envelope returned by the gateway.
///
/// On success `result` is populated and `error` is absent, on failure the
/// reverse. Both may be absent for actions without a return value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServerError>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> Response<T> {
    pub fn success(id: Option<RequestId>, result: T) -> Self {
        Response {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<RequestId>, error: ServerError) -> Self {
        Response {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Collapse the envelope into the backend's verdict.
    pub fn into_result(self) -> Result<Option<T>, ServerError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}
