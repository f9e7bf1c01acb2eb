//! Extraction of typed inputs from loosely-typed request payloads.

use serde_json::{Map, Value};

use crate::store::SqlValue;

use super::errors::{NewsError, NewsResult};
use super::query::BAD_REQUEST;

pub const KEY_MISSING: &str = "expected body key missing";

pub const INVALID_DATA_TYPE: &str = "Bad request - invalid data type";

pub const INC_VOTES_MISSING: &str = "no inc_votes property found";

/// Request body fields
pub type Fields = Map<String, Value>;

/// Read a required text field. Numbers are accepted in their decimal form.
pub fn required_text(fields: &Fields, key: &str) -> NewsResult<String> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(NewsError::bad_request(KEY_MISSING)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(NewsError::bad_request(INVALID_DATA_TYPE)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub article_img_url: String,
}

impl NewArticle {
    pub fn from_fields(fields: &Fields) -> NewsResult<Self> {
        Ok(Self {
            author: required_text(fields, "author")?,
            title: required_text(fields, "title")?,
            body: required_text(fields, "body")?,
            topic: required_text(fields, "topic")?,
            article_img_url: required_text(fields, "article_img_url")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

impl NewComment {
    pub fn from_fields(fields: &Fields) -> NewsResult<Self> {
        Ok(Self {
            username: required_text(fields, "username")?,
            body: required_text(fields, "body")?,
        })
    }
}

/// A signed vote adjustment, bound as the store parameter it came in as.
///
/// Integers bind as integers. Anything else binds as text and the store
/// decides whether it is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDelta(pub SqlValue);

impl VoteDelta {
    /// `inc_votes` for an article: absent or falsy values are rejected
    pub fn for_article(fields: &Fields) -> NewsResult<Self> {
        match fields.get("inc_votes") {
            Some(value) if !is_falsy(value) => Ok(Self::from_value(value)),
            _ => Err(NewsError::bad_request(BAD_REQUEST)),
        }
    }

    /// `inc_votes` for a comment: only absence is rejected
    pub fn for_comment(fields: &Fields) -> NewsResult<Self> {
        match fields.get("inc_votes") {
            None | Some(Value::Null) => Err(NewsError::bad_request(INC_VOTES_MISSING)),
            Some(value) => Ok(Self::from_value(value)),
        }
    }

    fn from_value(value: &Value) -> Self {
        let param = match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Int(i),
                None => SqlValue::Text(n.to_string()),
            },
            Value::String(s) => SqlValue::Text(s.clone()),
            other => SqlValue::Text(other.to_string()),
        };
        Self(param)
    }

    pub fn into_param(self) -> SqlValue {
        self.0
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_new_article_requires_every_key() {
        let complete = fields(json!({
            "author": "butter_bridge",
            "title": "t",
            "body": "b",
            "topic": "cats",
            "article_img_url": "https://example.com/a.jpg"
        }));
        assert!(NewArticle::from_fields(&complete).is_ok());

        for key in ["author", "title", "body", "topic", "article_img_url"] {
            let mut partial = complete.clone();
            partial.remove(key);
            let err = NewArticle::from_fields(&partial).unwrap_err();
            assert!(matches!(err, NewsError::BadRequest(ref m) if m == KEY_MISSING), "{key}");
        }
    }

    #[test]
    fn test_numeric_username_is_stringified() {
        let comment = NewComment::from_fields(&fields(json!({ "username": 42, "body": "hi" })))
            .unwrap();
        assert_eq!(comment.username, "42");
    }

    #[test]
    fn test_non_text_field_is_invalid_type() {
        let err = NewComment::from_fields(&fields(json!({ "username": ["a"], "body": "hi" })))
            .unwrap_err();
        assert!(matches!(err, NewsError::BadRequest(ref m) if m == INVALID_DATA_TYPE));
    }

    #[test]
    fn test_article_delta_rejects_falsy() {
        for value in [json!(0), json!(false), json!(""), json!(null)] {
            let err = VoteDelta::for_article(&fields(json!({ "inc_votes": value }))).unwrap_err();
            assert!(matches!(err, NewsError::BadRequest(ref m) if m == BAD_REQUEST));
        }
        assert!(VoteDelta::for_article(&Fields::new()).is_err());
    }

    #[test]
    fn test_article_delta_binding() {
        let delta = VoteDelta::for_article(&fields(json!({ "inc_votes": -20 }))).unwrap();
        assert_eq!(delta.into_param(), SqlValue::Int(-20));

        let delta = VoteDelta::for_article(&fields(json!({ "inc_votes": "cat" }))).unwrap();
        assert_eq!(delta.into_param(), SqlValue::Text("cat".to_string()));

        let delta = VoteDelta::for_article(&fields(json!({ "inc_votes": 1.5 }))).unwrap();
        assert_eq!(delta.into_param(), SqlValue::Text("1.5".to_string()));
    }

    #[test]
    fn test_comment_delta_accepts_zero_but_not_absence() {
        let delta = VoteDelta::for_comment(&fields(json!({ "inc_votes": 0 }))).unwrap();
        assert_eq!(delta.into_param(), SqlValue::Int(0));

        let err = VoteDelta::for_comment(&fields(json!({ "votes": 1 }))).unwrap_err();
        assert!(matches!(err, NewsError::BadRequest(ref m) if m == INC_VOTES_MISSING));
    }
}
