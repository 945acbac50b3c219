//! Declarative frontmatter schemas and the `posts` record type.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::content::date::coerce_date;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Boolean,
    /// Accepts anything `coerce_date` understands and normalises it to RFC 3339 UTC text
    Date,
    Array(Box<FieldKind>),
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Array(inner) => write!(f, "array of {}", inner),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    Default(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl Field {
    pub fn required(name: &'static str, kind: FieldKind) -> Field {
        Field { name, kind, presence: Presence::Required }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Field {
        Field { name, kind, presence: Presence::Optional }
    }

    pub fn with_default(name: &'static str, kind: FieldKind, default: Value) -> Field {
        Field { name, kind, presence: Presence::Default(default) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    Required,
    InvalidType { expected: String, received: &'static str },
    InvalidDate,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Field name, with `[n]` appended for array elements
    pub path: String,
    pub kind: IssueKind,
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::Required => write!(f, "{}: Required", self.path),
            IssueKind::InvalidType { expected, received } => {
                write!(f, "{}: Expected {}, received {}", self.path, expected, received)
            }
            IssueKind::InvalidDate => write!(f, "{}: Invalid date", self.path),
            IssueKind::Custom(msg) => write!(f, "{}: {}", self.path, msg),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Schema {
        Schema { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks every field and reports all problems at once.
    /// On success the returned object has defaults filled in, dates normalised and unknown keys removed.
    pub fn validate(&self, data: &Map<String, Value>) -> Result<Map<String, Value>, Vec<Issue>> {
        let mut validated = Map::new();
        let mut issues = vec![];

        for field in &self.fields {
            // An explicit null is the same as leaving the key out
            let value = data.get(field.name).filter(|v| !v.is_null());

            match (value, &field.presence) {
                (None, Presence::Required) => issues.push(Issue {
                    path: field.name.to_string(),
                    kind: IssueKind::Required,
                }),
                (None, Presence::Optional) => {}
                (None, Presence::Default(default)) => {
                    validated.insert(field.name.to_string(), default.clone());
                }
                (Some(value), _) => {
                    if let Some(value) = check_value(&field.kind, value, field.name.to_string(), &mut issues) {
                        validated.insert(field.name.to_string(), value);
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(validated)
        } else {
            Err(issues)
        }
    }
}

fn check_value(kind: &FieldKind, value: &Value, path: String, issues: &mut Vec<Issue>) -> Option<Value> {
    let invalid_type = |path: String| Issue {
        path,
        kind: IssueKind::InvalidType { expected: kind.to_string(), received: type_name(value) },
    };

    match kind {
        FieldKind::String => match value {
            Value::String(_) => Some(value.clone()),
            _ => {
                issues.push(invalid_type(path));
                None
            }
        },
        FieldKind::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            _ => {
                issues.push(invalid_type(path));
                None
            }
        },
        FieldKind::Date => match coerce_date(value) {
            Some(date) => Some(Value::String(date.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
            None => {
                issues.push(Issue { path, kind: IssueKind::InvalidDate });
                None
            }
        },
        FieldKind::Array(inner) => {
            let Value::Array(items) = value else {
                issues.push(invalid_type(path));
                return None;
            };

            let mut checked = Vec::with_capacity(items.len());
            let mut valid = true;
            for (i, item) in items.iter().enumerate() {
                match check_value(inner, item, format!("{}[{}]", path, i), issues) {
                    Some(item) => checked.push(item),
                    None => valid = false,
                }
            }
            valid.then(|| Value::Array(checked))
        }
    }
}

lazy_static! {
    pub static ref POST_SCHEMA: Schema = Schema::new(vec![
        Field::required("title", FieldKind::String),
        Field::required("description", FieldKind::String),
        Field::required("pubDate", FieldKind::Date),
        Field::optional("updatedDate", FieldKind::Date),
        Field::with_default("tags", FieldKind::Array(Box::new(FieldKind::String)), json!([])),
        Field::with_default("draft", FieldKind::Boolean, json!(false)),
        Field::optional("heroImage", FieldKind::String),
    ]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

impl Post {
    pub fn from_frontmatter(data: &Map<String, Value>) -> Result<Post, Vec<Issue>> {
        Self::from_validated(&POST_SCHEMA, data)
    }

    /// Validates with `schema` and reads the result into a `Post`.
    pub fn from_validated(schema: &Schema, data: &Map<String, Value>) -> Result<Post, Vec<Issue>> {
        let validated = schema.validate(data)?;
        serde_json::from_value(Value::Object(validated)).map_err(|e| {
            vec![Issue { path: String::new(), kind: IssueKind::Custom(e.to_string()) }]
        })
    }

    /// Date shown as "last modified": the update date when there is one.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_date.unwrap_or(self.pub_date)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    fn issue_paths(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn test_valid_post() {
        let post = Post::from_frontmatter(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": "2024-01-14",
            "updatedDate": "2024-01-15T08:30:00Z",
            "tags": ["rust", "blog"],
            "draft": true,
            "heroImage": "/hero.png",
        }))).unwrap();

        assert_eq!(post.title, "Hello");
        assert_eq!(post.pub_date, Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap());
        assert_eq!(post.updated_date, Some(Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap()));
        assert_eq!(post.tags, ["rust", "blog"]);
        assert!(post.draft);
        assert_eq!(post.hero_image.as_deref(), Some("/hero.png"));
        assert_eq!(post.last_modified(), post.updated_date.unwrap());
    }

    #[test]
    fn test_missing_title_fails() {
        let issues = Post::from_frontmatter(&data(json!({
            "description": "First post",
            "pubDate": "2024-01-14",
        }))).err().unwrap();
        assert_eq!(issues, vec![Issue { path: "title".to_string(), kind: IssueKind::Required }]);
    }

    #[test]
    fn test_missing_description_fails() {
        let issues = Post::from_frontmatter(&data(json!({
            "title": "Hello",
            "pubDate": "2024-01-14",
        }))).err().unwrap();
        assert_eq!(issue_paths(&issues), ["description"]);
    }

    #[test]
    fn test_non_date_pub_date_fails() {
        let issues = Post::from_frontmatter(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": "sometime last week",
        }))).err().unwrap();
        assert_eq!(issues, vec![Issue { path: "pubDate".to_string(), kind: IssueKind::InvalidDate }]);
    }

    #[test]
    fn test_defaults_applied() {
        let post = Post::from_frontmatter(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": "2024-01-14",
        }))).unwrap();
        assert!(post.tags.is_empty());
        assert!(!post.draft);
        assert!(post.updated_date.is_none());
        assert!(post.hero_image.is_none());
        assert_eq!(post.last_modified(), post.pub_date);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let post = Post::from_frontmatter(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": "2024-01-14",
            "updatedDate": null,
            "tags": null,
        }))).unwrap();
        assert!(post.updated_date.is_none());
        assert!(post.tags.is_empty());

        let issues = Post::from_frontmatter(&data(json!({
            "title": null,
            "description": "First post",
            "pubDate": "2024-01-14",
        }))).err().unwrap();
        assert_eq!(issues[0].kind, IssueKind::Required);
    }

    #[test]
    fn test_all_issues_reported() {
        let issues = POST_SCHEMA.validate(&data(json!({
            "title": 42,
            "pubDate": true,
            "tags": ["ok", 3, false],
            "draft": "yes",
        }))).err().unwrap();

        assert_eq!(issue_paths(&issues), ["title", "description", "pubDate", "tags[1]", "tags[2]", "draft"]);
        assert_eq!(issues[0].to_string(), "title: Expected string, received number");
        assert_eq!(issues[3].to_string(), "tags[1]: Expected string, received number");
        assert_eq!(issues[5].to_string(), "draft: Expected boolean, received string");
    }

    #[test]
    fn test_tags_must_be_array() {
        let issues = POST_SCHEMA.validate(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": "2024-01-14",
            "tags": "rust",
        }))).err().unwrap();
        assert_eq!(issues[0].to_string(), "tags: Expected array of string, received string");
    }

    #[test]
    fn test_unknown_keys_stripped() {
        let validated = POST_SCHEMA.validate(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": "2024-01-14",
            "author": "thiago",
        }))).unwrap();
        assert!(validated.get("author").is_none());
        assert_eq!(validated["pubDate"], json!("2024-01-14T00:00:00Z"));
        assert_eq!(validated["draft"], json!(false));
    }

    #[test]
    fn test_epoch_millis_date() {
        let post = Post::from_frontmatter(&data(json!({
            "title": "Hello",
            "description": "First post",
            "pubDate": 1_705_190_400_000i64,
        }))).unwrap();
        assert_eq!(post.pub_date, Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_schema_declaration() {
        let tags = POST_SCHEMA.field("tags").unwrap();
        assert_eq!(tags.presence, Presence::Default(json!([])));
        assert_eq!(POST_SCHEMA.field("heroImage").unwrap().presence, Presence::Optional);
        assert!(POST_SCHEMA.field("author").is_none());
        assert_eq!(POST_SCHEMA.fields.len(), 7);
    }
}
