//! JSON snapshot document.
//!
//! A front-end writes one document per revision: classes with their
//! methods and fields nested inside, so owner references can't dangle.

use super::{ClassDecl, FieldDecl, MethodDecl, Modifiers, Parameter, Snapshot, SourceRange};
use crate::error::{LoadErrorKind, RefMinerError, Result};
use serde::{Deserialize, Serialize};

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

const fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// Serialized form of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Free-form revision label (commit id, tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

/// A class with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    #[serde(flatten)]
    pub class: ClassDecl,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub body_tokens: Vec<String>,
    #[serde(default)]
    pub source_range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub type_signature: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub initializer_tokens: Vec<String>,
}

impl SnapshotDocument {
    /// Parse a document from JSON text, checking the format version.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        if document.version != DOCUMENT_VERSION {
            return Err(RefMinerError::load(
                "snapshot document",
                LoadErrorKind::UnsupportedVersion {
                    version: document.version,
                    supported: DOCUMENT_VERSION,
                },
            ));
        }
        Ok(document)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RefMinerError::from)
    }

    /// Convert into a validated [`Snapshot`].
    pub fn into_snapshot(self) -> Result<Snapshot> {
        let mut builder = Snapshot::builder();
        for entry in self.classes {
            let owner = entry.class.qualified_name();
            for method in entry.methods {
                builder.add_method(MethodDecl {
                    name: method.name,
                    owner_class: owner.clone(),
                    parameters: method.parameters,
                    return_type: method.return_type,
                    modifiers: method.modifiers,
                    body_tokens: method.body_tokens,
                    source_range: method.source_range,
                });
            }
            for field in entry.fields {
                builder.add_field(FieldDecl {
                    name: field.name,
                    owner_class: owner.clone(),
                    type_signature: field.type_signature,
                    modifiers: field.modifiers,
                    initializer_tokens: field.initializer_tokens,
                });
            }
            builder.add_class(entry.class);
        }
        builder.build()
    }

    /// Nest a snapshot's members under their owners.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let classes = snapshot
            .classes
            .iter()
            .map(|(key, class)| ClassEntry {
                class: class.clone(),
                methods: snapshot
                    .methods
                    .values()
                    .filter(|m| m.owner_class == *key)
                    .map(|m| MethodEntry {
                        name: m.name.clone(),
                        parameters: m.parameters.clone(),
                        return_type: m.return_type.clone(),
                        modifiers: m.modifiers.clone(),
                        body_tokens: m.body_tokens.clone(),
                        source_range: m.source_range,
                    })
                    .collect(),
                fields: snapshot
                    .fields
                    .values()
                    .filter(|f| f.owner_class == *key)
                    .map(|f| FieldEntry {
                        name: f.name.clone(),
                        type_signature: f.type_signature.clone(),
                        modifiers: f.modifiers.clone(),
                        initializer_tokens: f.initializer_tokens.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: DOCUMENT_VERSION,
            revision: None,
            classes,
        }
    }
}
