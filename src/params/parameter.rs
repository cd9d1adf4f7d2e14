//! Typed, named parameter fields.
//!
//! A [`Param`] keeps a default and an optional explicit value. Only explicit
//! values that differ from the default are persisted, so defaults can keep
//! tracking the environment (canvas size, for example) until the user
//! overrides them.

use crate::core::data::fractal_kind::FractalKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("invalid value '{value}' for parameter '{name}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Extra validity rule a field enforces on top of its type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Constraint {
    None,
    Positive,
}

pub trait ParamValue: Clone + PartialEq + std::fmt::Debug {
    fn encode(&self) -> String;
    fn decode(raw: &str) -> Result<Self, String>;
    fn satisfies(&self, constraint: Constraint) -> bool;
}

impl ParamValue for f64 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| e.to_string())
    }

    fn satisfies(&self, constraint: Constraint) -> bool {
        self.is_finite()
            && match constraint {
                Constraint::None => true,
                Constraint::Positive => *self > 0.0,
            }
    }
}

impl ParamValue for u32 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse::<u32>()
            .map_err(|e| e.to_string())
    }

    fn satisfies(&self, constraint: Constraint) -> bool {
        match constraint {
            Constraint::None => true,
            Constraint::Positive => *self > 0,
        }
    }
}

impl ParamValue for FractalKind {
    fn encode(&self) -> String {
        self.query_value().to_string()
    }

    fn decode(raw: &str) -> Result<Self, String> {
        raw.parse::<FractalKind>().map_err(|e| e.to_string())
    }

    fn satisfies(&self, _constraint: Constraint) -> bool {
        true
    }
}

impl ParamValue for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    fn satisfies(&self, _constraint: Constraint) -> bool {
        true
    }
}

/// Uniform, type-erased view of a parameter field.
///
/// Used wherever every field is visited the same way: query
/// serialization, parsing, resetting.
pub trait ParamField {
    fn name(&self) -> &'static str;
    fn is_explicit(&self) -> bool;
    fn is_default(&self) -> bool;
    fn encode(&self) -> String;
    fn decode(&mut self, raw: &str) -> Result<(), ParamError>;
    fn reset(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param<T: ParamValue> {
    name: &'static str,
    default: T,
    value: Option<T>,
    constraint: Constraint,
}

impl<T: ParamValue> Param<T> {
    #[must_use]
    pub fn new(name: &'static str, default: T) -> Self {
        Self {
            name,
            default,
            value: None,
            constraint: Constraint::None,
        }
    }

    #[must_use]
    pub fn positive(name: &'static str, default: T) -> Self {
        Self {
            constraint: Constraint::Positive,
            ..Self::new(name, default)
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.value.clone().unwrap_or_else(|| self.default.clone())
    }

    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Stores an explicit value. Returns whether the effective value changed.
    pub fn set(&mut self, value: T) -> Result<bool, ParamError> {
        self.check(&value)?;

        let changed = self.get() != value;
        self.value = Some(value);

        Ok(changed)
    }

    /// Replaces the default. Returns whether the effective value changed,
    /// which only happens while no explicit value is set.
    pub fn set_default(&mut self, default: T) -> Result<bool, ParamError> {
        self.check(&default)?;

        let before = self.get();
        self.default = default;

        Ok(self.get() != before)
    }

    fn check(&self, value: &T) -> Result<(), ParamError> {
        if value.satisfies(self.constraint) {
            return Ok(());
        }

        let reason = match self.constraint {
            Constraint::Positive => "must be positive and finite",
            Constraint::None => "must be finite",
        };

        Err(ParamError::InvalidValue {
            name: self.name,
            value: value.encode(),
            reason: reason.to_string(),
        })
    }
}

impl<T: ParamValue> ParamField for Param<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_explicit(&self) -> bool {
        self.value.is_some()
    }

    fn is_default(&self) -> bool {
        self.get() == self.default
    }

    fn encode(&self) -> String {
        self.get().encode()
    }

    fn decode(&mut self, raw: &str) -> Result<(), ParamError> {
        let value = T::decode(raw).map_err(|reason| ParamError::InvalidValue {
            name: self.name,
            value: raw.to_string(),
            reason,
        })?;

        self.set(value).map(|_| ())
    }

    fn reset(&mut self) {
        self.value = None;
    }
}
