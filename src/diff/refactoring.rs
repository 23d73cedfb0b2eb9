//! Refactoring records produced by the detectors.

use crate::error::RefMinerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of refactoring kinds, in detector precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RefactoringType {
    #[serde(rename = "Extract Interface")]
    ExtractInterface,
    #[serde(rename = "Extract Superclass")]
    ExtractSuperclass,
    #[serde(rename = "Extract Class")]
    ExtractClass,
    #[serde(rename = "Rename Class")]
    RenameClass,
    #[serde(rename = "Move Class")]
    MoveClass,
    #[serde(rename = "Move And Rename Class")]
    MoveAndRenameClass,
    #[serde(rename = "Rename Package")]
    RenamePackage,
    #[serde(rename = "Move Source Folder")]
    MoveSourceFolder,
    #[serde(rename = "Pull Up Method")]
    PullUpMethod,
    #[serde(rename = "Push Down Method")]
    PushDownMethod,
    #[serde(rename = "Move Method")]
    MoveMethod,
    #[serde(rename = "Move And Rename Method")]
    MoveAndRenameMethod,
    #[serde(rename = "Rename Method")]
    RenameMethod,
    #[serde(rename = "Pull Up Field")]
    PullUpField,
    #[serde(rename = "Push Down Field")]
    PushDownField,
    #[serde(rename = "Move Field")]
    MoveField,
    #[serde(rename = "Move And Rename Field")]
    MoveAndRenameField,
    #[serde(rename = "Rename Field")]
    RenameField,
    #[serde(rename = "Extract Method")]
    ExtractMethod,
    #[serde(rename = "Extract And Move Method")]
    ExtractAndMoveMethod,
    #[serde(rename = "Inline Method")]
    InlineMethod,
    #[serde(rename = "Change Return Type")]
    ChangeReturnType,
    #[serde(rename = "Change Parameter Type")]
    ChangeParameterType,
    #[serde(rename = "Add Parameter")]
    AddParameter,
    #[serde(rename = "Remove Parameter")]
    RemoveParameter,
    #[serde(rename = "Rename Parameter")]
    RenameParameter,
    #[serde(rename = "Reorder Parameter")]
    ReorderParameter,
    #[serde(rename = "Change Field Type")]
    ChangeFieldType,
    #[serde(rename = "Change Method Modifier")]
    ChangeMethodModifier,
    #[serde(rename = "Change Class Modifier")]
    ChangeClassModifier,
}

impl RefactoringType {
    /// Every kind, in precedence order.
    pub const ALL: [Self; 30] = [
        Self::ExtractInterface,
        Self::ExtractSuperclass,
        Self::ExtractClass,
        Self::RenameClass,
        Self::MoveClass,
        Self::MoveAndRenameClass,
        Self::RenamePackage,
        Self::MoveSourceFolder,
        Self::PullUpMethod,
        Self::PushDownMethod,
        Self::MoveMethod,
        Self::MoveAndRenameMethod,
        Self::RenameMethod,
        Self::PullUpField,
        Self::PushDownField,
        Self::MoveField,
        Self::MoveAndRenameField,
        Self::RenameField,
        Self::ExtractMethod,
        Self::ExtractAndMoveMethod,
        Self::InlineMethod,
        Self::ChangeReturnType,
        Self::ChangeParameterType,
        Self::AddParameter,
        Self::RemoveParameter,
        Self::RenameParameter,
        Self::ReorderParameter,
        Self::ChangeFieldType,
        Self::ChangeMethodModifier,
        Self::ChangeClassModifier,
    ];

    /// Human-readable name, as used in reports.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::ExtractInterface => "Extract Interface",
            Self::ExtractSuperclass => "Extract Superclass",
            Self::ExtractClass => "Extract Class",
            Self::RenameClass => "Rename Class",
            Self::MoveClass => "Move Class",
            Self::MoveAndRenameClass => "Move And Rename Class",
            Self::RenamePackage => "Rename Package",
            Self::MoveSourceFolder => "Move Source Folder",
            Self::PullUpMethod => "Pull Up Method",
            Self::PushDownMethod => "Push Down Method",
            Self::MoveMethod => "Move Method",
            Self::MoveAndRenameMethod => "Move And Rename Method",
            Self::RenameMethod => "Rename Method",
            Self::PullUpField => "Pull Up Field",
            Self::PushDownField => "Push Down Field",
            Self::MoveField => "Move Field",
            Self::MoveAndRenameField => "Move And Rename Field",
            Self::RenameField => "Rename Field",
            Self::ExtractMethod => "Extract Method",
            Self::ExtractAndMoveMethod => "Extract And Move Method",
            Self::InlineMethod => "Inline Method",
            Self::ChangeReturnType => "Change Return Type",
            Self::ChangeParameterType => "Change Parameter Type",
            Self::AddParameter => "Add Parameter",
            Self::RemoveParameter => "Remove Parameter",
            Self::RenameParameter => "Rename Parameter",
            Self::ReorderParameter => "Reorder Parameter",
            Self::ChangeFieldType => "Change Field Type",
            Self::ChangeMethodModifier => "Change Method Modifier",
            Self::ChangeClassModifier => "Change Class Modifier",
        }
    }
}

impl fmt::Display for RefactoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RefactoringType {
    type Err = RefMinerError;

    /// Accepts `Rename Class`, `rename-class`, `rename_class` and `RenameClass`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_type_name(s);
        Self::ALL
            .into_iter()
            .find(|t| normalize_type_name(t.display_name()) == wanted)
            .ok_or_else(|| RefMinerError::validation(format!("unknown refactoring type '{s}'")))
    }
}

fn normalize_type_name(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// What kind of element an [`EntityRef`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    SourceFolder,
    Package,
    Class,
    Method,
    Field,
    Parameter,
    ReturnType,
    Modifier,
}

/// Identifies the element a refactoring speaks about on one side.
///
/// Two records with equal `(before, after)` refs are competing
/// explanations of the same change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub name: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn source_folder(path: impl Into<String>) -> Self {
        Self::new(EntityKind::SourceFolder, path)
    }

    pub fn package(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Package, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Class, name)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Method, name)
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Field, name)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.name)
    }
}

/// Source location of one side of a refactoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Role of the element, e.g. "original method declaration"
    pub element: String,
}

impl CodeLocation {
    pub fn new(file_path: impl Into<String>, start_line: u32, end_line: u32, element: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            start_line,
            end_line,
            element: element.into(),
        }
    }
}

/// One detected refactoring. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refactoring {
    #[serde(rename = "type")]
    pub refactoring_type: RefactoringType,
    pub before: EntityRef,
    pub after: EntityRef,
    pub description: String,
    /// Derived from the similarity score(s) behind the detection
    pub confidence: f64,
    #[serde(rename = "leftSideLocations")]
    pub left_locations: Vec<CodeLocation>,
    #[serde(rename = "rightSideLocations")]
    pub right_locations: Vec<CodeLocation>,
}

impl Refactoring {
    pub fn new(
        refactoring_type: RefactoringType,
        before: EntityRef,
        after: EntityRef,
        description: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            refactoring_type,
            before,
            after,
            description: description.into(),
            confidence: confidence.clamp(0.0, 1.0),
            left_locations: Vec::new(),
            right_locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_left(mut self, location: CodeLocation) -> Self {
        self.left_locations.push(location);
        self
    }

    #[must_use]
    pub fn with_right(mut self, location: CodeLocation) -> Self {
        self.right_locations.push(location);
        self
    }

    /// Key used to detect competing explanations.
    #[must_use]
    pub fn entity_key(&self) -> (&EntityRef, &EntityRef) {
        (&self.before, &self.after)
    }
}

impl fmt::Display for Refactoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
