//! Field constraints for todo lists and items.
//!
//! # Design
//! Validators are pure: they never touch storage. Uniqueness of a list name
//! is looked up by the caller and passed in as `name_taken`, and the store
//! enforces it again at write time. All violations are collected before
//! returning so a response can report every broken field at once.

use std::fmt;

use crate::types::{ItemFields, ListFields};

pub const DESCRIPTION_MAX_LENGTH: usize = 200;
pub const DEFAULT_ITEM_NAME_MAX_LENGTH: usize = 40;

/// A validated attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Description => "Description",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Blank,
    TooLong { maximum: usize },
    Taken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match self.rule {
            Rule::Blank => write!(f, "{label} can't be blank"),
            Rule::TooLong { maximum } => {
                write!(f, "{label} is too long (maximum is {maximum} characters)")
            }
            Rule::Taken => write!(f, "{label} has already been taken"),
        }
    }
}

/// Ordered collection of violations for one candidate record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, rule: Rule) -> Self {
        Self(vec![Violation { field, rule }])
    }

    pub fn push(&mut self, field: Field, rule: Rule) {
        self.0.push(Violation { field, rule });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Full messages for one field, in the order they were found.
    pub fn messages_for(&self, field: Field) -> Vec<String> {
        self.0
            .iter()
            .filter(|v| v.field == field)
            .map(ToString::to_string)
            .collect()
    }

    /// Join every message into one sentence: `a`, `a and b`, `a, b, and c`.
    pub fn to_sentence(&self) -> String {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        match messages.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{first} and {second}"),
            [init @ .., last] => format!("{}, and {last}", init.join(", ")),
        }
    }

    fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sentence())
    }
}

/// Limits applied to item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRules {
    pub name_max_length: usize,
    pub description_max_length: usize,
}

impl ItemRules {
    pub fn with_name_max_length(name_max_length: usize) -> Self {
        Self {
            name_max_length,
            ..Self::default()
        }
    }
}

impl Default for ItemRules {
    fn default() -> Self {
        Self {
            name_max_length: DEFAULT_ITEM_NAME_MAX_LENGTH,
            description_max_length: DESCRIPTION_MAX_LENGTH,
        }
    }
}

/// Empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Presence first; a blank value never also reports its length.
fn check_required(violations: &mut Violations, field: Field, value: &str, maximum: Option<usize>) {
    if is_blank(value) {
        violations.push(field, Rule::Blank);
        return;
    }
    if let Some(maximum) = maximum {
        if value.chars().count() > maximum {
            violations.push(field, Rule::TooLong { maximum });
        }
    }
}

pub fn validate_list(fields: &ListFields, name_taken: bool) -> Result<(), Violations> {
    let mut violations = Violations::new();
    check_required(&mut violations, Field::Name, &fields.name, None);
    if name_taken && !is_blank(&fields.name) {
        violations.push(Field::Name, Rule::Taken);
    }
    violations.into_result()
}

pub fn validate_item(fields: &ItemFields, rules: &ItemRules) -> Result<(), Violations> {
    let mut violations = Violations::new();
    check_required(
        &mut violations,
        Field::Name,
        &fields.name,
        Some(rules.name_max_length),
    );
    check_required(
        &mut violations,
        Field::Description,
        &fields.description,
        Some(rules.description_max_length),
    );
    violations.into_result()
}
