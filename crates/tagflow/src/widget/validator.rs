//! Tag text validation.
//!
//! A tag is either valid or it is not: validation here is a pure predicate
//! over the tag text. Predicates compose with a logical AND, so a field can
//! require, for example, a non-empty email address of at most 64 characters.
//!
//! # Built-in Validators
//!
//! - [`Validation::non_empty`]: rejects the empty string
//! - [`Validation::email_address`]: accepts `local@domain.tld` shaped text
//! - [`Validation::max_length`]: caps the length in characters
//! - [`Validation::pattern`]: full-match against a regular expression
//!
//! # Example
//!
//! ```
//! use tagflow::widget::validator::Validation;
//!
//! let rule = Validation::non_empty() & Validation::email_address() & Validation::max_length(64);
//!
//! assert!(rule.is_valid("a@b.com"));
//! assert!(!rule.is_valid("not an email"));
//! assert!(!rule.is_valid(""));
//! ```

use std::fmt;
use std::ops::BitAnd;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::error::{TagError, TagResult};

/// Email grammar: a local part of word characters and `+ . - '`, an `@`, a
/// domain label, optional dotted labels, and an alphabetic TLD of 2+ letters.
const EMAIL_PATTERN: &str = r"^[+\w.\-']+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*(\.[a-zA-Z]{2,})+$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Trait for tag validators.
///
/// Validators must be `Send + Sync` so a [`Validation`] can be shared freely
/// between a controller and its configuration.
pub trait Validator: Send + Sync {
    /// Returns `true` if `text` is acceptable as a finished tag.
    fn is_valid(&self, text: &str) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, text: &str) -> bool {
        self(text)
    }
}

/// A shared, composable validation predicate.
///
/// Cloning a `Validation` is cheap: clones share the same predicate.
#[derive(Clone, Deserialize)]
#[serde(try_from = "ValidationRule")]
pub struct Validation {
    inner: Arc<dyn Validator>,
    label: Arc<str>,
}

impl Validation {
    /// Wrap any validator.
    pub fn new(validator: impl Validator + 'static, label: impl Into<Arc<str>>) -> Self {
        Self {
            inner: Arc::new(validator),
            label: label.into(),
        }
    }

    /// Build a validation from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(f, "custom")
    }

    /// Rejects the empty string.
    pub fn non_empty() -> Self {
        Self::new(|text: &str| !text.is_empty(), "non_empty")
    }

    /// Accepts text shaped like an email address.
    pub fn email_address() -> Self {
        Self::new(|text: &str| EMAIL_REGEX.is_match(text), "email_address")
    }

    /// Accepts text of at most `max` characters.
    pub fn max_length(max: usize) -> Self {
        Self::new(
            move |text: &str| text.chars().count() <= max,
            format!("max_length({max})"),
        )
    }

    /// Accepts text matching `pattern` in full.
    ///
    /// The pattern is anchored on both ends, so `[a-z]+` rejects `"abc1"`.
    pub fn pattern(pattern: &str) -> TagResult<Self> {
        let anchored = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self::new(
            move |text: &str| anchored.is_match(text),
            format!("pattern({pattern})"),
        ))
    }

    /// Chain another predicate: the result succeeds iff both succeed.
    ///
    /// Evaluation short-circuits on the first failure.
    pub fn combined_with(self, other: Validation) -> Self {
        let label = format!("{} & {}", self.label, other.label);
        let (first, second) = (self.inner, other.inner);
        Self::new(
            move |text: &str| first.is_valid(text) && second.is_valid(text),
            label,
        )
    }

    /// Evaluate the predicate.
    #[inline]
    pub fn is_valid(&self, text: &str) -> bool {
        self.inner.is_valid(text)
    }

    /// Human-readable description of the chain, for logs.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl BitAnd for Validation {
    type Output = Validation;

    fn bitand(self, rhs: Validation) -> Validation {
        self.combined_with(rhs)
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("label", &self.label)
            .finish()
    }
}

/// Evaluate `text` against an optional validation.
///
/// With no validation configured everything is valid.
#[inline]
pub fn evaluate(text: &str, validation: Option<&Validation>) -> bool {
    validation.is_none_or(|v| v.is_valid(text))
}

/// Declarative form of a [`Validation`], as written in configuration files.
///
/// ```toml
/// [validation]
/// kind = "all"
/// rules = [
///     { kind = "email_address" },
///     { kind = "max_length", max = 64 },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationRule {
    /// See [`Validation::non_empty`].
    NonEmpty,
    /// See [`Validation::email_address`].
    EmailAddress,
    /// See [`Validation::max_length`].
    MaxLength { max: usize },
    /// See [`Validation::pattern`].
    Pattern { pattern: String },
    /// Every nested rule must pass.
    All { rules: Vec<ValidationRule> },
}

impl ValidationRule {
    /// Compile the rule into a predicate.
    pub fn build(&self) -> TagResult<Validation> {
        match self {
            Self::NonEmpty => Ok(Validation::non_empty()),
            Self::EmailAddress => Ok(Validation::email_address()),
            Self::MaxLength { max } => Ok(Validation::max_length(*max)),
            Self::Pattern { pattern } => Validation::pattern(pattern),
            Self::All { rules } => {
                // An empty chain accepts everything.
                let mut chain: Option<Validation> = None;
                for rule in rules {
                    let next = rule.build()?;
                    chain = Some(match chain {
                        Some(current) => current & next,
                        None => next,
                    });
                }
                Ok(chain.unwrap_or_else(|| Validation::new(|_: &str| true, "all()")))
            }
        }
    }
}

impl TryFrom<ValidationRule> for Validation {
    type Error = TagError;

    fn try_from(rule: ValidationRule) -> Result<Self, Self::Error> {
        rule.build()
    }
}
