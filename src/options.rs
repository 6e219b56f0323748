use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::OptionsError;

/// A metadata field of a [`crate::File`] that takes part in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileField {
    Name,
    Type,
    Size,
    LastModified,
}

impl FileField {
    /// Comparison order. The first mismatching field is the one reported.
    pub const ORDERED: [FileField; 4] = [
        FileField::Name,
        FileField::Type,
        FileField::Size,
        FileField::LastModified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileField::Name => "name",
            FileField::Type => "type",
            FileField::Size => "size",
            FileField::LastModified => "lastModified",
        }
    }
}

impl fmt::Display for FileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileField {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(FileField::Name),
            "type" => Ok(FileField::Type),
            "size" => Ok(FileField::Size),
            "lastModified" | "last_modified" => Ok(FileField::LastModified),
            other => Err(OptionsError::UnknownField(other.to_string())),
        }
    }
}

/// How a payload is decoded before contents are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    ArrayBuffer,
    BinaryString,
    DataUrl,
    #[default]
    Text,
}

impl ReadStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadStrategy::ArrayBuffer => "readAsArrayBuffer",
            ReadStrategy::BinaryString => "readAsBinaryString",
            ReadStrategy::DataUrl => "readAsDataURL",
            ReadStrategy::Text => "readAsText",
        }
    }
}

impl fmt::Display for ReadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Disabled,
    Read(ReadStrategy),
}

impl Default for ContentMode {
    fn default() -> Self {
        ContentMode::Read(ReadStrategy::default())
    }
}

impl From<ReadStrategy> for ContentMode {
    fn from(strategy: ReadStrategy) -> Self {
        ContentMode::Read(strategy)
    }
}

impl FromStr for ContentMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let strategy = match s.trim() {
            "false" | "none" => return Ok(ContentMode::Disabled),
            "readAsArrayBuffer" | "array-buffer" => ReadStrategy::ArrayBuffer,
            "readAsBinaryString" | "binary-string" => ReadStrategy::BinaryString,
            "readAsDataURL" | "data-url" => ReadStrategy::DataUrl,
            "readAsText" | "text" => ReadStrategy::Text,
            other => return Err(OptionsError::UnknownContentMode(other.to_string())),
        };
        Ok(ContentMode::Read(strategy))
    }
}

/// Which parts of two files must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonOptions {
    pub omit: BTreeSet<FileField>,
    pub content: ContentMode,
}

impl ComparisonOptions {
    pub fn omit(mut self, field: FileField) -> Self {
        self.omit.insert(field);
        self
    }

    pub fn omit_all(mut self, fields: impl IntoIterator<Item = FileField>) -> Self {
        self.omit.extend(fields);
        self
    }

    pub fn content(mut self, mode: impl Into<ContentMode>) -> Self {
        self.content = mode.into();
        self
    }

    pub fn without_content(self) -> Self {
        self.content(ContentMode::Disabled)
    }

    /// Fields still compared, in comparison order.
    pub fn compared_fields(&self) -> impl Iterator<Item = FileField> + '_ {
        FileField::ORDERED
            .into_iter()
            .filter(|field| !self.omit.contains(field))
    }
}
