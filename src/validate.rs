//! Comparison of a fresh conversion against a previously written output file

use anyhow::Context;
use inkmap_engine::ViewComponent;
use std::fmt;
use std::path::Path;

/// Positions closer than this are considered equal
pub const POSITION_TOLERANCE: f64 = 0.001;

/// Mismatches printed before the report is truncated
pub const REPORTED_MISMATCHES: usize = 5;

/// Differences found at one index
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    /// `(new, old)` positions when they differ
    pub position: Option<((f64, f64), (f64, f64))>,
    /// `(new, old)` names when they differ
    pub name: Option<(String, String)>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element {}:", self.index)?;
        if let Some(((nx, ny), (ox, oy))) = self.position {
            write!(f, " position new ({}, {}) vs old ({}, {})", nx, ny, ox, oy)?;
        }
        if let Some((new, old)) = &self.name {
            write!(f, " name new '{}' vs old '{}'", new, old)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub new_count: usize,
    pub old_count: usize,
    pub compared: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ValidationReport {
    pub fn is_match(&self) -> bool {
        self.new_count == self.old_count && self.mismatches.is_empty()
    }

    /// Log the outcome, listing at most [`REPORTED_MISMATCHES`] differences
    pub fn log(&self) {
        if self.new_count != self.old_count {
            tracing::warn!(
                "Element count mismatch. New: {}, Existing: {}",
                self.new_count,
                self.old_count
            );
        }
        for mismatch in self.mismatches.iter().take(REPORTED_MISMATCHES) {
            tracing::warn!("Mismatch at {}", mismatch);
        }
        if self.mismatches.is_empty() {
            tracing::info!("Validation successful, {} elements match", self.compared);
        } else {
            tracing::warn!(
                "Validation found {} mismatches out of {} elements",
                self.mismatches.len(),
                self.compared
            );
        }
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < POSITION_TOLERANCE
}

/// Compare components index by index
pub fn compare(new: &[ViewComponent], old: &[ViewComponent]) -> ValidationReport {
    let mismatches = new
        .iter()
        .zip(old)
        .enumerate()
        .filter_map(|(index, (n, o))| {
            let position = (!close(n.position.x, o.position.x)
                || !close(n.position.y, o.position.y))
            .then_some(((n.position.x, n.position.y), (o.position.x, o.position.y)));
            let name = (n.meta.name != o.meta.name)
                .then(|| (n.meta.name.clone(), o.meta.name.clone()));
            (position.is_some() || name.is_some()).then_some(Mismatch {
                index,
                position,
                name,
            })
        })
        .collect();

    ValidationReport {
        new_count: new.len(),
        old_count: old.len(),
        compared: new.len().min(old.len()),
        mismatches,
    }
}

/// Compare components against the JSON array stored at `path`
pub fn compare_with_file(new: &[ViewComponent], path: &Path) -> anyhow::Result<ValidationReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let old: Vec<ViewComponent> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a component list", path.display()))?;
    Ok(compare(new, &old))
}
