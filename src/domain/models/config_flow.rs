use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::connection::ConfigEntry;
use crate::domain::value_objects::{DEFAULT_REGION, SUPPORTED_REGIONS};

pub const FIELD_REGION: &str = "region_name";
pub const FIELD_ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const FIELD_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const FIELD_ENDPOINT_URL: &str = "endpoint_url";

/// Input kinds a setup form can ask for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Password,
    Url,
    Select { options: Vec<String> },
}

/// One field of a setup form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_value: Option<String>,
}

impl FormField {
    fn region() -> Self {
        Self {
            name: FIELD_REGION,
            kind: FieldKind::Select {
                options: SUPPORTED_REGIONS.iter().map(|r| r.to_string()).collect(),
            },
            required: false,
            default: Some(DEFAULT_REGION.to_string()),
            suggested_value: None,
        }
    }

    fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            suggested_value: None,
        }
    }

    fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn with_suggested_value(mut self, value: Option<String>) -> Self {
        self.suggested_value = value;
        self
    }
}

/// Fields collected when a connection is first created
pub fn create_schema() -> Vec<FormField> {
    vec![
        FormField::region(),
        FormField::required(FIELD_ACCESS_KEY_ID, FieldKind::String),
        FormField::required(FIELD_SECRET_ACCESS_KEY, FieldKind::Password),
        FormField::optional(FIELD_ENDPOINT_URL, FieldKind::Url),
    ]
}

/// Fields editable afterwards; the access key id is the entry's identity
pub fn update_schema() -> Vec<FormField> {
    vec![
        FormField::region(),
        FormField::required(FIELD_SECRET_ACCESS_KEY, FieldKind::Password),
        FormField::optional(FIELD_ENDPOINT_URL, FieldKind::Url),
    ]
}

/// Submitted values of the create form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Submitted values of the options form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsInput {
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Outcome of one config flow step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResult {
    /// Show (or re-show) a form; `errors` maps field name to error code
    Form {
        step_id: &'static str,
        data_schema: Vec<FormField>,
        errors: BTreeMap<&'static str, &'static str>,
    },
    CreateEntry {
        title: String,
        entry: ConfigEntry,
    },
    UpdateEntry {
        entry: ConfigEntry,
    },
    Abort {
        reason: &'static str,
    },
}

impl FlowResult {
    pub fn form(step_id: &'static str, data_schema: Vec<FormField>) -> Self {
        FlowResult::Form {
            step_id,
            data_schema,
            errors: BTreeMap::new(),
        }
    }

    /// Same result with any entry's secret masked, for display
    pub fn redacted(self) -> Self {
        match self {
            FlowResult::CreateEntry { title, mut entry } => {
                entry.data = entry.data.redacted();
                FlowResult::CreateEntry { title, entry }
            }
            FlowResult::UpdateEntry { mut entry } => {
                entry.data = entry.data.redacted();
                FlowResult::UpdateEntry { entry }
            }
            other => other,
        }
    }
}
