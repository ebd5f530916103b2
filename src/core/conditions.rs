//! Caller-supplied condition table.
//!
//! A condition names a `\newif` toggle and a polarity: `suppress_if_branch`
//! true deletes the `\if` branch and keeps the `\else` branch, false does the
//! inverse. Lookup is first-match in caller order, so duplicate names are
//! legal and the earlier entry wins.

use std::str::FromStr;

/// One named condition with its suppression polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub name: String,
    /// True: delete the `\if` branch, keep the `\else` branch.
    /// False: keep the `\if` branch, delete the `\else` branch.
    pub suppress_if_branch: bool,
}

impl Condition {
    pub fn new(name: impl Into<String>, suppress_if_branch: bool) -> Self {
        Self {
            name: name.into(),
            suppress_if_branch,
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    /// Parse the CLI value syntax `name[=true|false]`.
    ///
    /// A bare `name` means `name=true` (suppress the if-branch).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, polarity) = match s.split_once('=') {
            Some((name, value)) => {
                let polarity = match value {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(format!(
                            "invalid polarity '{}': expected 'true' or 'false'",
                            other
                        ))
                    }
                };
                (name, polarity)
            }
            None => (s, true),
        };
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(format!(
                "invalid condition name '{}': expected word characters only",
                name
            ));
        }
        Ok(Condition::new(name, polarity))
    }
}

/// Ordered set of conditions. Lookup returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// First condition with the given name, in insertion order.
    pub fn lookup(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}
