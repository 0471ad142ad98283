//! Names used by declarations and symbol lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration name: a plain identifier or a compiler-generated special name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Name {
    Identifier(String),
    /// Special names are wrapped in angle brackets, e.g. `<set-test>`
    Special(String),
}

impl Name {
    pub fn identifier(name: impl Into<String>) -> Self {
        Name::Identifier(name.into())
    }

    pub fn special(name: impl Into<String>) -> Self {
        Name::Special(name.into())
    }

    /// Name of the getter generated for a property
    pub fn getter_of(property: &Name) -> Self {
        Name::Special(format!("<get-{}>", property.as_str()))
    }

    /// Name of the setter generated for a property
    pub fn setter_of(property: &Name) -> Self {
        Name::Special(format!("<set-{}>", property.as_str()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Name::Identifier(s) | Name::Special(s) => s,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Name::Special(_))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully-qualified, dot-separated name (e.g. `std.io.println`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FqName(String);

impl FqName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Qualified name of `name` inside this package
    pub fn child(&self, name: &Name) -> Self {
        if self.0.is_empty() {
            Self(name.as_str().to_string())
        } else {
            Self(format!("{}.{}", self.0, name.as_str()))
        }
    }

    /// Last segment of the name
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FqName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_names() {
        let prop = Name::identifier("test");
        assert_eq!(Name::getter_of(&prop), Name::special("<get-test>"));
        assert_eq!(Name::setter_of(&prop).to_string(), "<set-test>");
        assert!(Name::setter_of(&prop).is_special());
    }

    #[test]
    fn test_fq_name() {
        let pkg = FqName::new("std.io");
        let fq = pkg.child(&Name::identifier("println"));
        assert_eq!(fq.as_str(), "std.io.println");
        assert_eq!(fq.short_name(), "println");
        assert_eq!(FqName::new("").child(&Name::identifier("main")).as_str(), "main");
    }
}
