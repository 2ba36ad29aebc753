//! Request validation
//!
//! Each write operation has an explicit [`RequestSchema`] listing the fields
//! it accepts, whether they are required, and their expected type. A payload
//! is checked against the whole schema before anything touches the database,
//! and fields the schema does not name never reach the persistence layer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use forum_persist::{CommentChanges, NewComment, NewThread, ThreadChanges};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, required: true, kind }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, required: false, kind }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestSchema {
    pub rules: &'static [FieldRule],
}

pub const THREAD_STORE: RequestSchema = RequestSchema {
    rules: &[
        FieldRule::required("title", FieldKind::String),
        FieldRule::required("body", FieldKind::String),
    ],
};

pub const THREAD_UPDATE: RequestSchema = RequestSchema {
    rules: &[
        FieldRule::optional("title", FieldKind::String),
        FieldRule::optional("body", FieldKind::String),
    ],
};

pub const COMMENT_STORE: RequestSchema = RequestSchema {
    rules: &[FieldRule::required("body", FieldKind::String)],
};

pub const COMMENT_UPDATE: RequestSchema = RequestSchema {
    rules: &[FieldRule::optional("body", FieldKind::String)],
};

/// Failing fields mapped to their messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Fields that passed a schema, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ValidatedFields(Map<String, Value>);

impl ValidatedFields {
    pub fn string(&self, name: &str) -> Option<String> {
        self.0.get(name).and_then(Value::as_str).map(str::to_owned)
    }
}

impl RequestSchema {
    /// Check `payload` against every rule, collecting all failures
    ///
    /// A non-object payload is treated as an empty object. `null` counts as
    /// absent.
    pub fn validate(&self, payload: &Value) -> Result<ValidatedFields, ValidationErrors> {
        let empty = Map::new();
        let object = payload.as_object().unwrap_or(&empty);

        let mut errors = ValidationErrors::new();
        let mut fields = Map::new();

        for rule in self.rules {
            match object.get(rule.name).filter(|v| !v.is_null()) {
                None if rule.required => {
                    errors.add(rule.name, format!("The {} field is required.", rule.name));
                }
                None => {}
                Some(value) if !rule.kind.accepts(value) => {
                    errors.add(
                        rule.name,
                        format!("The {} field must be {}.", rule.name, rule.kind.describe()),
                    );
                }
                Some(value) => {
                    fields.insert(rule.name.to_string(), value.clone());
                }
            }
        }

        if errors.is_empty() {
            Ok(ValidatedFields(fields))
        } else {
            Err(errors)
        }
    }
}

/// Conversion of a raw payload into a persistence input through its schema
pub trait FromPayload: Sized {
    const SCHEMA: RequestSchema;

    fn from_fields(fields: ValidatedFields) -> Option<Self>;

    fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let fields = Self::SCHEMA.validate(payload)?;
        // Required fields are guaranteed present once the schema passed.
        Self::from_fields(fields)
            .ok_or_else(|| ValidationErrors::single("payload", "The payload is invalid."))
    }
}

impl FromPayload for NewThread {
    const SCHEMA: RequestSchema = THREAD_STORE;

    fn from_fields(fields: ValidatedFields) -> Option<Self> {
        Some(NewThread {
            title: fields.string("title")?,
            body: fields.string("body")?,
        })
    }
}

impl FromPayload for ThreadChanges {
    const SCHEMA: RequestSchema = THREAD_UPDATE;

    fn from_fields(fields: ValidatedFields) -> Option<Self> {
        Some(ThreadChanges {
            title: fields.string("title"),
            body: fields.string("body"),
        })
    }
}

impl FromPayload for NewComment {
    const SCHEMA: RequestSchema = COMMENT_STORE;

    fn from_fields(fields: ValidatedFields) -> Option<Self> {
        Some(NewComment {
            body: fields.string("body")?,
        })
    }
}

impl FromPayload for CommentChanges {
    const SCHEMA: RequestSchema = COMMENT_UPDATE;

    fn from_fields(fields: ValidatedFields) -> Option<Self> {
        Some(CommentChanges {
            body: fields.string("body"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thread_store_accepts_complete_payload() {
        let thread = NewThread::from_payload(&json!({"title": "T1", "body": "B1"})).unwrap();
        assert_eq!(thread.title, "T1");
        assert_eq!(thread.body, "B1");
    }

    #[test]
    fn test_thread_store_reports_every_missing_field() {
        let errors = NewThread::from_payload(&json!({})).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["body", "title"]);
        assert_eq!(errors.messages("title"), ["The title field is required."]);
    }

    #[test]
    fn test_thread_store_missing_body() {
        let errors = NewThread::from_payload(&json!({"title": "X"})).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["body"]);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let errors = NewThread::from_payload(&json!({"title": 5, "body": "ok"})).unwrap_err();
        assert_eq!(errors.messages("title"), ["The title field must be a string."]);
        assert!(errors.messages("body").is_empty());
    }

    #[test]
    fn test_null_required_field_counts_as_missing() {
        let errors = NewComment::from_payload(&json!({"body": null})).unwrap_err();
        assert_eq!(errors.messages("body"), ["The body field is required."]);
    }

    #[test]
    fn test_update_fields_are_optional() {
        let changes = ThreadChanges::from_payload(&json!({})).unwrap();
        assert!(changes.is_empty());

        let changes = ThreadChanges::from_payload(&json!({"body": "new"})).unwrap();
        assert_eq!(changes.title, None);
        assert_eq!(changes.body.as_deref(), Some("new"));
    }

    #[test]
    fn test_update_rejects_wrong_type() {
        let errors = CommentChanges::from_payload(&json!({"body": ["list"]})).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["body"]);
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let fields = COMMENT_STORE
            .validate(&json!({"body": "hi", "thread_id": 9, "threadId": 9}))
            .unwrap();
        assert_eq!(fields.string("body").as_deref(), Some("hi"));
        assert!(fields.string("thread_id").is_none());
        assert!(fields.0.get("threadId").is_none());
    }

    #[test]
    fn test_non_object_payload_is_empty() {
        assert!(CommentChanges::from_payload(&json!([1, 2, 3])).unwrap().is_empty());
        assert!(NewComment::from_payload(&json!("body")).is_err());
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let errors = ValidationErrors::single("body", "The body field is required.");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"body": ["The body field is required."]})
        );
    }
}
