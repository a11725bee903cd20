use jval_schema::Keys;
use serde::Serialize;

use crate::validates::{Violation, ViolationKind};

/// Append-only sink the walker pushes violations into.
///
/// Violations are never deduplicated; logically distinct checks at the
/// same path each keep their own record.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    violations: Vec<Violation>,
    depth_exceeded: bool,
}

impl Collector {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Records the depth guard trip once per collector, no matter how
    /// many branches run into it.
    pub(crate) fn report_depth_exceeded(&mut self, keys: &Keys) {
        if !self.depth_exceeded {
            self.depth_exceeded = true;
            self.violations.push(Violation::new(keys, ViolationKind::MaxDepth));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub(crate) fn into_report(self) -> ValidationReport {
        ValidationReport {
            valid: self.violations.is_empty(),
            violations: self.violations,
        }
    }
}

/// The outcome of one validation run.
///
/// `valid` holds exactly when `violations` is empty; the violations are
/// ordered by the depth-first, left-to-right traversal of the instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<Violation>,
}
