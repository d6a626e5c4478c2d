use std::fmt;

use convert_case::{Case, Casing};

/// Fallback when a name has no usable characters.
const UNNAMED: &str = "control";

/// Identification name of a control: snake case, lowercase ASCII letters,
/// digits and underscores. Names show up in logs and have no effect on layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    /// Normalise arbitrary text into a name. Characters that survive snake
    /// casing but are not allowed are dropped.
    pub fn convert(name: &str) -> Self {
        let name: String = name
            .to_case(Case::Snake)
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        if name.is_empty() {
            Self(UNNAMED.into())
        } else {
            Self(name)
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_normalises() {
        assert_eq!(NodeName::convert("StackPanel"), "stack_panel");
        assert_eq!(NodeName::convert("Main Menu!"), "main_menu");
        assert_eq!(NodeName::convert("!!").as_str(), UNNAMED);
        assert_eq!(NodeName::convert("toolbar").to_string(), "toolbar");
    }
}
