//! Accumulated diagnostics of a design pass.

use crate::{DesignError, DesignErrors};

/// Ordered collection of the diagnostics reported during a pass.
///
/// Operations report into it and keep going; the caller inspects the
/// collection once the whole design has been declared.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<DesignError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn report(&mut self, error: DesignError) {
        tracing::warn!(%error, "design error");
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DesignError> {
        self.errors.iter()
    }

    /// Marker for [`Diagnostics::since`].
    pub fn checkpoint(&self) -> usize {
        self.errors.len()
    }

    /// Diagnostics reported after `checkpoint` was taken.
    pub fn since(&self, checkpoint: usize) -> &[DesignError] {
        self.errors.get(checkpoint..).unwrap_or_default()
    }

    pub fn has_errors_since(&self, checkpoint: usize) -> bool {
        !self.since(checkpoint).is_empty()
    }

    pub fn into_vec(self) -> Vec<DesignError> {
        self.errors
    }

    /// `Ok(value)` when nothing was reported, all diagnostics otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, DesignErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(DesignErrors(self.errors))
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DesignError;
    type IntoIter = std::slice::Iter<'a, DesignError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_tracks_new_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(DesignError::invalid_argument("first"));

        let checkpoint = diagnostics.checkpoint();
        assert!(!diagnostics.has_errors_since(checkpoint));

        diagnostics.report(DesignError::unknown_view("tiny", "Bottle"));
        assert!(diagnostics.has_errors_since(checkpoint));
        assert_eq!(diagnostics.since(checkpoint).len(), 1);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Diagnostics::new().into_result(7), Ok(7));

        let mut diagnostics = Diagnostics::new();
        diagnostics.report(DesignError::invalid_argument("bad"));
        let err = diagnostics.into_result(()).unwrap_err();
        assert_eq!(err.0.len(), 1);
    }
}
