//! Declarative field constraints shared by every entity.
//!
//! Each entity declares its bounds (required-ness, max length, URL shape,
//! UUID shape) through the check helpers here and reports violations as
//! plain values. Validation is stateless and side-effect free; there is no
//! process-global validator instance. The split between fatal and
//! recoverable violations is the policy the rest of the pipeline depends
//! on: a `Required` violation aborts, everything else self-heals.

use std::fmt;

use url::Url;
use uuid::Uuid;

/// A single constraint kind a field can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field must be present and non-empty.
    Required,

    /// Field must not exceed the bound, measured in characters.
    MaxLen(usize),

    /// Field must parse as an absolute URL when non-empty.
    Url,

    /// Field must have UUID shape when non-empty.
    Uuid,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::MaxLen(max) => write!(f, "max={max}"),
            Rule::Url => write!(f, "url"),
            Rule::Uuid => write!(f, "uuid"),
        }
    }
}

/// A violated rule on a specific field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path, e.g. `article.source_url`.
    pub field: &'static str,

    /// The rule the field failed.
    pub rule: Rule,
}

impl Violation {
    pub fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }

    /// Only required-field violations abort processing.
    pub fn is_fatal(&self) -> bool {
        matches!(self.rule, Rule::Required)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// A batch of violations carried inside error values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn has_fatal(&self) -> bool {
        self.0.iter().any(Violation::is_fatal)
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

/// Behavior every validated entity shares.
///
/// This trait is the seam through which the generic [`Collection`](crate::Collection)
/// validates, normalizes and identifies its items. Implementations keep
/// `violations` pure; all mutation happens in `normalize`.
pub trait Entity {
    /// Entity kind used as the prefix of violation field paths.
    const KIND: &'static str;

    /// Stable identifier within the owning collection.
    fn id(&self) -> &str;

    /// Generate an identifier if the entity has none.
    fn ensure_id(&mut self);

    /// Trim and truncate every bounded string field.
    fn trim(&mut self);

    /// Check the entity against its schema.
    fn violations(&self) -> Vec<Violation>;

    /// Reset the entity to its empty value.
    fn clear(&mut self);

    /// Trim, then validate; a violating entity is logged and destructively
    /// reset to empty. A blank identifier is generated before validation,
    /// so a fresh entity never fails on its ID alone.
    fn normalize(&mut self) {
        self.ensure_id();
        self.trim();

        let violations = self.violations();
        if !violations.is_empty() {
            for violation in &violations {
                tracing::debug!(field = violation.field, rule = %violation.rule, "validation error");
            }
            self.clear();
        }
    }

    fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

/// Trim leading/trailing whitespace, then truncate to `max` characters.
pub fn trim_to_max(s: &str, max: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() > max {
        trimmed.chars().take(max).collect()
    } else {
        trimmed.to_string()
    }
}

/// Record a violation when a string field is empty.
pub fn required(field: &'static str, value: &str, out: &mut Vec<Violation>) {
    if value.is_empty() {
        out.push(Violation::new(field, Rule::Required));
    }
}

/// Record a violation when an optional value is absent.
pub fn required_some<T>(field: &'static str, value: &Option<T>, out: &mut Vec<Violation>) {
    if value.is_none() {
        out.push(Violation::new(field, Rule::Required));
    }
}

/// Record a violation when a string exceeds `max` characters.
pub fn max_len(field: &'static str, value: &str, max: usize, out: &mut Vec<Violation>) {
    if value.chars().count() > max {
        out.push(Violation::new(field, Rule::MaxLen(max)));
    }
}

/// Record a violation when a non-empty string is not an absolute URL.
pub fn valid_url(field: &'static str, value: &str, out: &mut Vec<Violation>) {
    if !value.is_empty() && Url::parse(value).is_err() {
        out.push(Violation::new(field, Rule::Url));
    }
}

/// Record a violation when a non-empty string has no UUID shape.
pub fn valid_uuid(field: &'static str, value: &str, out: &mut Vec<Violation>) {
    if !value.is_empty() && Uuid::parse_str(value).is_err() {
        out.push(Violation::new(field, Rule::Uuid));
    }
}
