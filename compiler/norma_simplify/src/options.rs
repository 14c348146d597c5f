//! Pass configuration.

/// Knobs for one simplification pass.
///
/// # Defaults
///
/// - `normalize_operands`: `false`. Assignments, declarations and returns
///   pass through untouched.
/// - `validate`: on in debug builds, off in release builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Also normalize the operands of assignments, `var` declarations and
    /// `return` statements, hoisting their calls ahead of the statement.
    ///
    /// Left-hand targets are normalized before values and keep their
    /// storage-location shape. A lone value may stay a bare call; with
    /// several values each call is hoisted.
    pub normalize_operands: bool,

    /// Check the output with [`crate::validate`] before returning it.
    pub validate: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        SimplifyOptions {
            normalize_operands: false,
            validate: cfg!(debug_assertions),
        }
    }
}

impl SimplifyOptions {
    #[must_use]
    pub fn with_normalize_operands(mut self, enabled: bool) -> Self {
        self.normalize_operands = enabled;
        self
    }

    #[must_use]
    pub fn with_validate(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }
}
