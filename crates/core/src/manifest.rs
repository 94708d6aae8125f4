//! Tool manifests and argument validation.
//!
//! Every dispatchable tool pairs an executable artifact with a declaration
//! file describing its input fields. A declaration is a minimum contract,
//! not an exhaustive schema: declared fields must be present with matching
//! kinds, undeclared extras pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The one field name that is injected with an empty-string default when
/// absent from proposed arguments.
pub const SUBFOLDER_FIELD: &str = "subfolder";

/// File name of the argument side-channel. The dispatcher writes resolved
/// arguments here, next to the tool artifact, and the tool process reads
/// the same file at startup. Both sides of the process boundary honor
/// this name.
pub const ARGUMENT_FILE: &str = "input.json";

/// The kind of a declared input field.
///
/// Declarations write `"type": "string"`, `"int"`, or `"bool"`; the aliases
/// cover the longer spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "string", alias = "text")]
    Text,
    #[serde(rename = "int", alias = "integer")]
    Integer,
    #[serde(rename = "bool", alias = "boolean")]
    Boolean,
}

impl FieldKind {
    /// Whether a JSON value matches this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for FieldKind {
    /// Displays as the canonical wire name, the same spelling a
    /// declaration file writes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "int",
            FieldKind::Boolean => "bool",
        };
        f.write_str(label)
    }
}

/// One declared input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, as the tool expects it in the argument file
    pub name: String,

    /// Declared kind; absent means presence-only checking
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
}

/// Declared schema and metadata for one invocable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManifest {
    /// Tool name; matches the executable artifact's file name. The
    /// registry stamps this from the artifact, so a declaration may omit it.
    #[serde(default)]
    pub name: String,

    /// Human description, surfaced verbatim to the model's context
    #[serde(default)]
    pub description: String,

    /// Declared input fields, in declaration order
    #[serde(default)]
    pub inputs: Vec<FieldSpec>,
}

impl ToolManifest {
    /// Check `args` against the declared fields.
    ///
    /// A declared field absent from `args` fails the check, except a field
    /// named "subfolder", which is injected as an empty string instead. A
    /// present field with a declared kind must match it. Fields not named
    /// in the declaration are tolerated.
    pub fn check_args(&self, args: &mut serde_json::Map<String, Value>) -> bool {
        for field in &self.inputs {
            match args.get(&field.name) {
                None => {
                    if field.name == SUBFOLDER_FIELD {
                        args.insert(field.name.clone(), Value::String(String::new()));
                    } else {
                        return false;
                    }
                }
                Some(value) => {
                    if let Some(kind) = field.kind {
                        if !kind.matches(value) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

/// Validate a proposed invocation against the loaded manifests.
///
/// Returns false for an unknown tool name or failed field checks; never
/// fails any other way. The caller uses the boolean to suppress dispatch,
/// so a tool never receives unvalidated arguments.
pub fn validate_args(
    tool: &str,
    args: &mut serde_json::Map<String, Value>,
    manifests: &BTreeMap<String, ToolManifest>,
) -> bool {
    match manifests.get(tool) {
        Some(manifest) => manifest.check_args(args),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn create_file_manifest() -> ToolManifest {
        serde_json::from_value(json!({
            "name": "create_file",
            "description": "Create a file in the workspace",
            "inputs": [
                { "name": "base", "type": "string" },
                { "name": "filename", "type": "string" },
                { "name": "content", "type": "string" },
                { "name": "subfolder", "type": "string" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn missing_subfolder_gets_empty_default() {
        let manifest = create_file_manifest();
        let mut args = args(json!({
            "base": "memory",
            "filename": "x.md",
            "content": "hi"
        }));
        assert!(manifest.check_args(&mut args));
        assert_eq!(args.get("subfolder"), Some(&json!("")));
    }

    #[test]
    fn missing_required_field_fails() {
        let manifest = create_file_manifest();
        let mut args = args(json!({ "base": "memory", "filename": "x.md" }));
        assert!(!manifest.check_args(&mut args));
    }

    #[test]
    fn type_mismatch_fails() {
        let manifest = create_file_manifest();
        let mut args = args(json!({
            "base": 7,
            "filename": "x.md",
            "content": "hi",
            "subfolder": ""
        }));
        assert!(!manifest.check_args(&mut args));
    }

    #[test]
    fn undeclared_extra_fields_tolerated() {
        let manifest = create_file_manifest();
        let mut args = args(json!({
            "base": "memory",
            "filename": "x.md",
            "content": "hi",
            "subfolder": "notes",
            "mode": "append"
        }));
        assert!(manifest.check_args(&mut args));
        assert_eq!(args.get("mode"), Some(&json!("append")));
    }

    #[test]
    fn integer_kind_accepts_whole_numbers_only() {
        assert!(FieldKind::Integer.matches(&json!(42)));
        assert!(FieldKind::Integer.matches(&json!(-3)));
        assert!(!FieldKind::Integer.matches(&json!(1.5)));
        assert!(!FieldKind::Integer.matches(&json!("42")));
    }

    #[test]
    fn boolean_kind_rejects_other_values() {
        assert!(FieldKind::Boolean.matches(&json!(true)));
        assert!(!FieldKind::Boolean.matches(&json!("true")));
        assert!(!FieldKind::Boolean.matches(&json!(1)));
    }

    #[test]
    fn field_without_kind_checks_presence_only() {
        let manifest: ToolManifest = serde_json::from_value(json!({
            "name": "probe",
            "inputs": [{ "name": "target" }]
        }))
        .unwrap();
        let mut ok = args(json!({ "target": 123 }));
        assert!(manifest.check_args(&mut ok));
        let mut missing = args(json!({}));
        assert!(!manifest.check_args(&mut missing));
    }

    #[test]
    fn kind_displays_as_wire_name() {
        assert_eq!(FieldKind::Text.to_string(), "string");
        assert_eq!(FieldKind::Integer.to_string(), "int");
        assert_eq!(FieldKind::Boolean.to_string(), "bool");
    }

    #[test]
    fn kind_aliases_parse() {
        let manifest: ToolManifest = serde_json::from_value(json!({
            "name": "probe",
            "inputs": [
                { "name": "a", "type": "text" },
                { "name": "b", "type": "integer" },
                { "name": "c", "type": "boolean" }
            ]
        }))
        .unwrap();
        assert_eq!(manifest.inputs[0].kind, Some(FieldKind::Text));
        assert_eq!(manifest.inputs[1].kind, Some(FieldKind::Integer));
        assert_eq!(manifest.inputs[2].kind, Some(FieldKind::Boolean));
    }

    #[test]
    fn unknown_tool_fails_validation() {
        let manifests = BTreeMap::new();
        let mut args = args(json!({ "path": "a.txt" }));
        assert!(!validate_args("read_file", &mut args, &manifests));
    }

    #[test]
    fn validate_args_applies_manifest_checks() {
        let mut manifests = BTreeMap::new();
        manifests.insert("create_file".to_string(), create_file_manifest());
        let mut args = args(json!({
            "base": "memory",
            "filename": "x.md",
            "content": "hi"
        }));
        assert!(validate_args("create_file", &mut args, &manifests));
        assert_eq!(args.get("subfolder"), Some(&json!("")));
    }
}
