//! Declaration records: classes, methods, fields and their modifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Object,
    Enum,
    DataClass,
}

impl ClassKind {
    /// Human-readable keyword used in descriptions.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::DataClass => "data class",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Declared visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Private => "private",
        };
        f.write_str(name)
    }
}

/// Member modifiers.
///
/// `is_static` covers both Java-style statics and members of a companion object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_open: bool,
    pub is_override: bool,
    pub is_static: bool,
}

impl Modifiers {
    /// Modifiers of a plain public member.
    #[must_use]
    pub fn public() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[must_use]
    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }
}

/// Line range of a declaration in its source file (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start_line: u32,
    pub end_line: u32,
}

impl SourceRange {
    #[must_use]
    pub const fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }
}

/// A class, interface, object or enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    /// Simple name
    pub name: String,
    /// Dotted package path, empty for the default package
    #[serde(default)]
    pub package_path: String,
    #[serde(default)]
    pub kind: ClassKind,
    /// Declared super types in declaration order, qualified or simple names
    #[serde(default)]
    pub super_types: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub source_file: String,
}

impl ClassDecl {
    pub fn new(package_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_path: package_path.into(),
            kind: ClassKind::Class,
            super_types: Vec::new(),
            is_abstract: false,
            visibility: Visibility::Public,
            source_file: String::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_super_type(mut self, super_type: impl Into<String>) -> Self {
        self.super_types.push(super_type.into());
        self
    }

    #[must_use]
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    /// `package.Name`, or just `Name` in the default package.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(&self.package_path, &self.name)
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub type_signature: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_signature: type_signature.into(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_signature)
    }
}

/// A method (function member) declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    /// Qualified name of the owning class
    pub owner_class: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Opaque statement tokens produced by the front-end
    #[serde(default)]
    pub body_tokens: Vec<String>,
    #[serde(default)]
    pub source_range: SourceRange,
}

impl MethodDecl {
    pub fn new(owner_class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_class: owner_class.into(),
            parameters: Vec::new(),
            return_type: None,
            modifiers: Modifiers::default(),
            body_tokens: Vec::new(),
            source_range: SourceRange::default(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_signature: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_signature));
        self
    }

    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_body<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_source_range(mut self, start_line: u32, end_line: u32) -> Self {
        self.source_range = SourceRange::new(start_line, end_line);
        self
    }

    /// Owner-relative signature: `name(T1, T2)`. Parameter names are ignored.
    #[must_use]
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self
            .parameters
            .iter()
            .map(|p| p.type_signature.as_str())
            .collect();
        format!("{}({})", self.name, types.join(", "))
    }

    /// Unique key within a snapshot: `owner.name(T1, T2)`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner_class, self.signature())
    }

    /// Parameter type signatures in declaration order.
    #[must_use]
    pub fn parameter_types(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|p| p.type_signature.as_str())
            .collect()
    }

    /// Readable rendering used in refactoring descriptions.
    #[must_use]
    pub fn display_signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
        match &self.return_type {
            Some(ret) => format!("{} {}({}) : {}", self.modifiers.visibility, self.name, params.join(", "), ret),
            None => format!("{} {}({})", self.modifiers.visibility, self.name, params.join(", ")),
        }
    }
}

/// A field (property) declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    /// Qualified name of the owning class
    pub owner_class: String,
    #[serde(default)]
    pub type_signature: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub initializer_tokens: Vec<String>,
}

impl FieldDecl {
    pub fn new(
        owner_class: impl Into<String>,
        name: impl Into<String>,
        type_signature: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner_class: owner_class.into(),
            type_signature: type_signature.into(),
            modifiers: Modifiers::default(),
            initializer_tokens: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_initializer<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initializer_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Unique key within a snapshot: `owner.name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner_class, self.name)
    }

    #[must_use]
    pub fn display_signature(&self) -> String {
        format!("{} {} : {}", self.modifiers.visibility, self.name, self.type_signature)
    }
}

/// Join a package path and a simple name.
#[must_use]
pub fn qualify(package_path: &str, name: &str) -> String {
    if package_path.is_empty() {
        name.to_string()
    } else {
        format!("{package_path}.{name}")
    }
}

/// Last dotted segment of a qualified name, ignoring generic arguments.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    let base = qualified.split('<').next().unwrap_or(qualified);
    base.rsplit('.').next().unwrap_or(base)
}
