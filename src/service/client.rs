//! HTTP client for the member service
//!
//! Talks to the member module's JSON endpoints. Edit flows log in first and
//! re-confirm the password before the modify page will return the profile.

use super::traits::{FetchedSchema, FormService};
use crate::config::FormConfig;
use crate::error::ServiceError;
use crate::schema::{FieldDescriptor, FormMode, FormSchema, OptionLookup, OptionSetList};
use crate::state::FieldValue;
use crate::submission::{PartValue, Payload};
use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Profile keys copied into the form when editing
pub const PREFILL_KEYS: [&str; 7] = [
    "user_id",
    "email_address",
    "user_name",
    "nick_name",
    "phone",
    "allow_message",
    "allow_mailing",
];

const ENDPOINT: &str = "modules/json/index.php";

/// Member service client over HTTP with a session cookie jar
pub struct HttpFormService {
    client: reqwest::Client,
    base_url: String,
    referer: String,
    credentials: Option<(String, String)>,
    mode: FormMode,
    lookup: OptionLookup,
}

impl HttpFormService {
    /// Create a new client from configuration
    pub fn new(config: &FormConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            referer: config.referer().to_string(),
            credentials: config
                .credentials()
                .map(|(id, pw)| (id.to_string(), pw.to_string())),
            mode: config.mode,
            lookup: config.option_lookup,
        })
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url, ENDPOINT)
    }

    async fn get_act(&self, act: &str) -> Result<reqwest::Response, ServiceError> {
        let response = self
            .client
            .get(self.url())
            .query(&[("act", act)])
            .send()
            .await?;
        check_status(response).await
    }

    async fn post_form(&self, fields: &[(&str, &str)]) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.url())
            .header(REFERER, &self.referer)
            .form(fields)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Log in and confirm the password so the modify page is readable
    async fn open_profile_session(&self) -> Result<(), ServiceError> {
        let (user_id, password) = self
            .credentials
            .as_ref()
            .ok_or(ServiceError::MissingCredentials)?;

        self.get_act("dispMemberLogout").await?;
        self.post_form(&[
            ("act", "procMemberLogin"),
            ("user_id", user_id.as_str()),
            ("password", password.as_str()),
        ])
        .await?;
        self.get_act("dispMemberModifyInfo").await?;
        self.post_form(&[
            ("act", "procMemberModifyInfoBefore"),
            ("password", password.as_str()),
        ])
        .await?;
        tracing::debug!(user_id = %user_id, "Profile session opened");
        Ok(())
    }

    fn submit_act(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "procMemberInsert",
            FormMode::Edit => "procMemberModifyInfo",
        }
    }
}

#[async_trait]
impl FormService for HttpFormService {
    async fn fetch_schema(&self) -> Result<FetchedSchema, ServiceError> {
        let act = match self.mode {
            FormMode::Edit => {
                self.open_profile_session().await?;
                "dispMemberModifyInfo"
            }
            FormMode::Create => "dispMemberSignUpForm",
        };

        let body: Value = self
            .get_act(act)
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::Parse(format!("Failed to parse form page: {e}")))?;

        let fetched = parse_form_page(body, self.mode, self.lookup)?;
        tracing::info!(
            fields = fetched.schema.fields().len(),
            option_sets = fetched.schema.option_sets().count(),
            "Fetched form schema"
        );
        Ok(fetched)
    }

    async fn submit(&self, payload: Payload) -> Result<(), ServiceError> {
        let mut form = Form::new();
        for part in payload.into_parts() {
            form = match part.value {
                PartValue::Text(text) => form.text(part.key, text),
                PartValue::File(file) => {
                    let body = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime)?;
                    form.part(part.key, body)
                }
            };
        }

        let response = self
            .client
            .post(self.url())
            .query(&[("act", self.submit_act())])
            .header(REFERER, &self.referer)
            .multipart(form)
            .send()
            .await?;
        check_status(response).await?;
        tracing::info!("Form submitted");
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

#[derive(Debug, Deserialize)]
struct FormPage {
    member_config: MemberConfig,
    #[serde(default, deserialize_with = "nullable_sets")]
    extend_form_list: OptionSetList,
    #[serde(default)]
    member_info: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct MemberConfig {
    #[serde(rename = "signupForm", default)]
    signup_form: Vec<FieldDescriptor>,
}

/// Null or an unexpected shape means no option sets
fn nullable_sets<'de, D>(deserializer: D) -> Result<OptionSetList, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => OptionSetList::default(),
        other => serde_json::from_value(other).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Ignoring unreadable option set list");
            OptionSetList::default()
        }),
    })
}

/// Turn a form page response into a validated schema plus prefill
pub fn parse_form_page(
    body: Value,
    mode: FormMode,
    lookup: OptionLookup,
) -> Result<FetchedSchema, ServiceError> {
    let page: FormPage = serde_json::from_value(body)
        .map_err(|e| ServiceError::Parse(format!("Unexpected form page: {e}")))?;

    let schema = FormSchema::with_option_slots(
        page.member_config.signup_form,
        page.extend_form_list.into_slots(),
        mode,
        lookup,
    )?;

    let prefill = match (mode, page.member_info) {
        (FormMode::Edit, Some(info)) => prefill_from(&info),
        _ => BTreeMap::new(),
    };

    Ok(FetchedSchema { schema, prefill })
}

fn prefill_from(info: &BTreeMap<String, Value>) -> BTreeMap<String, FieldValue> {
    PREFILL_KEYS
        .iter()
        .filter_map(|key| {
            let value = match info.get(*key)? {
                Value::String(s) => FieldValue::Scalar(s.clone()),
                Value::Number(n) => FieldValue::Scalar(n.to_string()),
                Value::Array(items) => FieldValue::Sequence(
                    items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                ),
                _ => return None,
            };
            Some((key.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::resolver::{resolve, Variant};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page() -> Value {
        json!({
            "member_config": {
                "signupForm": [
                    {"name": "user_id", "title": "ID", "isUse": true, "required": true},
                    {"name": "password", "title": "Password", "isUse": true},
                    {"name": "phone", "title": "Phone", "type": "tel", "isUse": true},
                    {"name": "homepage", "title": "Homepage", "type": "homepage", "isUse": false},
                    {"name": "hobby", "title": "Hobby", "type": "checkbox", "isUse": true,
                     "member_join_form_srl": 42}
                ]
            },
            "extend_form_list": {
                "42": {"member_join_form_srl": 42, "default_value": ["go", "chess"]}
            },
            "member_info": {
                "user_id": "formtest",
                "nick_name": "neo",
                "phone": ["010", "1234", "5678"],
                "homepage": "http://old",
                "regdate": "20200101"
            }
        })
    }

    #[test]
    fn test_parse_edit_page() {
        let fetched = parse_form_page(page(), FormMode::Edit, OptionLookup::ByOwner).unwrap();
        let names: Vec<_> = fetched
            .schema
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["user_id", "phone", "hobby"]);

        let hobby = fetched.schema.field("hobby").unwrap();
        assert_eq!(
            fetched.schema.options_for(hobby).unwrap().options,
            vec!["go", "chess"]
        );

        assert_eq!(
            fetched.prefill,
            BTreeMap::from([
                ("nick_name".to_string(), FieldValue::from("neo")),
                (
                    "phone".to_string(),
                    FieldValue::Sequence(vec!["010".into(), "1234".into(), "5678".into()])
                ),
                ("user_id".to_string(), FieldValue::from("formtest")),
            ])
        );
    }

    #[test]
    fn test_parse_create_page_has_no_prefill() {
        let fetched = parse_form_page(page(), FormMode::Create, OptionLookup::ByOwner).unwrap();
        assert!(fetched.prefill.is_empty());
        assert!(fetched.schema.field("password").is_some());
    }

    #[test]
    fn test_parse_tolerates_null_option_sets() {
        let body = json!({
            "member_config": {"signupForm": []},
            "extend_form_list": null
        });
        let fetched = parse_form_page(body, FormMode::Create, OptionLookup::ByOwner).unwrap();
        assert_eq!(fetched.schema.option_sets().count(), 0);
    }

    #[test]
    fn test_malformed_option_set_only_affects_its_field() {
        let body = json!({
            "member_config": {"signupForm": [
                {"name": "region", "type": "select", "isUse": true, "member_join_form_srl": 1},
                {"name": "hobby", "type": "checkbox", "isUse": true, "member_join_form_srl": "2"},
                {"name": "color", "type": "radio", "isUse": true, "member_join_form_srl": 3}
            ]},
            "extend_form_list": {
                "1": {"member_join_form_srl": 1, "default_value": null},
                "2": {"member_join_form_srl": "2", "default_value": ["go", "chess"]},
                "3": {"member_join_form_srl": [3], "default_value": ["red"]}
            }
        });
        let fetched = parse_form_page(body, FormMode::Create, OptionLookup::ByOwner).unwrap();
        let schema = &fetched.schema;
        assert_eq!(schema.fields().len(), 3);

        let field = |name| schema.field(name).unwrap();
        assert!(schema.options_for(field("region")).unwrap().options.is_empty());
        assert_eq!(schema.options_for(field("hobby")).unwrap().options, vec!["go", "chess"]);
        assert!(matches!(
            resolve(field("color"), schema),
            Variant::Unresolved(SchemaError::OptionSetNotFound { index: 3, .. })
        ));
    }

    #[test]
    fn test_unreadable_option_set_list_is_empty() {
        let body = json!({
            "member_config": {"signupForm": [{"name": "a", "isUse": true}]},
            "extend_form_list": "none"
        });
        let fetched = parse_form_page(body, FormMode::Create, OptionLookup::ByOwner).unwrap();
        assert_eq!(fetched.schema.option_sets().count(), 0);
    }

    #[test]
    fn test_parse_rejects_missing_config() {
        let err = parse_form_page(json!({}), FormMode::Edit, OptionLookup::ByOwner).unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_duplicate_fields() {
        let body = json!({
            "member_config": {"signupForm": [
                {"name": "a", "isUse": true},
                {"name": "a", "isUse": true}
            ]}
        });
        let err = parse_form_page(body, FormMode::Edit, OptionLookup::ByOwner).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Schema(SchemaError::DuplicateField(ref name)) if name == "a"
        ));
    }

    #[test]
    fn test_new_client_from_config() {
        let config = FormConfig {
            base_url: Some("http://localhost:9/".to_string()),
            mode: FormMode::Create,
            ..Default::default()
        };
        let service = HttpFormService::new(&config).unwrap();
        assert_eq!(service.url(), "http://localhost:9/modules/json/index.php");
        assert_eq!(service.submit_act(), "procMemberInsert");
        assert!(service.credentials.is_none());
    }

    #[tokio::test]
    async fn test_edit_fetch_without_credentials_fails_before_network() {
        let service = HttpFormService::new(&FormConfig::default()).unwrap();
        let err = service.fetch_schema().await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingCredentials));
    }
}
