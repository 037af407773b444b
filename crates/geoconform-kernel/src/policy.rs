//! Validator policies and mandatory/forbidden enforcement.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::Validation;
use crate::report::Warning;

/// Default relative tolerance for floating-point cross-checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Flags owned by one category validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Missing mandatory attributes are failures (otherwise warnings).
    pub require_mandatory: bool,
    /// Present forbidden attributes are failures (otherwise warnings).
    pub enforce_forbidden: bool,
    /// Relative tolerance for floating-point comparisons.
    pub tolerance: f64,
}

impl Policy {
    pub const fn strict() -> Self {
        Self {
            require_mandatory: true,
            enforce_forbidden: true,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Downgrades every mandatory/forbidden rule to a warning.
    pub const fn lenient() -> Self {
        Self {
            require_mandatory: false,
            enforce_forbidden: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::strict()
    }
}

/// Whether an attribute value counts as present. Absent means `None` or an
/// empty collection.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence + ?Sized> Presence for Arc<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl Validation<'_> {
    /// Requires `value` to be present. Returns whether it is.
    pub fn mandatory<P: Presence + ?Sized>(&mut self, message: &str, value: &P) -> bool {
        let present = value.is_present();
        if !present {
            if self.policy().require_mandatory {
                self.fail(message);
            } else {
                self.downgrade(message);
            }
        }
        present
    }

    /// Requires `value` to be absent. Returns whether it is.
    pub fn forbidden<P: Presence + ?Sized>(&mut self, message: &str, value: &P) -> bool {
        let present = value.is_present();
        if present {
            if self.policy().enforce_forbidden {
                self.fail(message);
            } else {
                self.downgrade(message);
            }
        }
        !present
    }

    /// [`Validation::mandatory`] when `required`, [`Validation::forbidden`]
    /// otherwise.
    pub fn conditional<P: Presence + ?Sized>(
        &mut self,
        message: &str,
        value: &P,
        required: bool,
    ) -> bool {
        if required {
            self.mandatory(message, value)
        } else {
            self.forbidden(message, value)
        }
    }

    fn downgrade(&mut self, message: &str) {
        let path = self.path();
        let category = self.category();
        tracing::warn!(category = %category, path = %path, "{message}");
        self.record_warning(Warning {
            category,
            message: message.to_string(),
            path,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_false_flag_is_present() {
        assert!(Some(false).is_present());
        assert!(!None::<bool>.is_present());
        assert!(!Vec::<bool>::new().is_present());
        assert!(Arc::new(vec![false]).is_present());
    }
}
