//! Rule resolution, rotation, and naming
//!
//! ## Rule priority
//!
//! For an element of type `T` with derived prefix `P`:
//! 1. the first rule of type `T` whose prefix equals `P`;
//! 2. otherwise the first rule of type `T` with an empty prefix;
//! 3. otherwise nothing, and the element is dropped.
//!
//! ## Rotation priority
//!
//! 1. a rotation suffix on the label (`_r` 0, `_d` 90, `_l` 180, `_u` 270);
//! 2. the angle written in the element's own `rotate(...)`;
//! 3. the angle recovered from the composed matrix;
//! 4. 0.

use inkmap_core::{rotation_from_matrix, AffineMatrix, MappingRule, RuleTable, SvgElementType};
use std::collections::HashMap;

/// Rules of one element type, in table order
#[derive(Debug, Default)]
struct TypeRules<'a> {
    by_prefix: HashMap<&'a str, &'a MappingRule>,
    wildcard: Option<&'a MappingRule>,
}

/// Lookup structure built once per conversion from a [`RuleTable`]
#[derive(Debug, Default)]
pub struct RuleIndex<'a> {
    by_type: HashMap<SvgElementType, TypeRules<'a>>,
}

/// The rule chosen for an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch<'a> {
    pub rule: &'a MappingRule,
    /// `true` when the rule's prefix equals the element's prefix, `false` for the default rule
    pub exact: bool,
}

impl<'a> RuleIndex<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        let mut by_type: HashMap<SvgElementType, TypeRules<'a>> = HashMap::new();
        for rule in table.iter() {
            let entry = by_type.entry(rule.svg_type).or_default();
            if rule.is_wildcard() {
                entry.wildcard.get_or_insert(rule);
            } else {
                // first occurrence wins
                entry.by_prefix.entry(rule.label_prefix.as_str()).or_insert(rule);
            }
        }
        Self { by_type }
    }

    pub fn lookup(&self, svg_type: SvgElementType, prefix: Option<&str>) -> Option<RuleMatch<'a>> {
        let rules = self.by_type.get(&svg_type)?;
        if let Some(rule) = prefix.and_then(|p| rules.by_prefix.get(p).copied()) {
            return Some(RuleMatch { rule, exact: true });
        }
        rules.wildcard.map(|rule| RuleMatch { rule, exact: false })
    }
}

/// Rotation forced by a label suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSuffix {
    Right,
    Down,
    Left,
    Up,
}

impl RotationSuffix {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'r' => Some(Self::Right),
            'd' => Some(Self::Down),
            'l' => Some(Self::Left),
            'u' => Some(Self::Up),
            _ => None,
        }
    }

    pub fn degrees(&self) -> f64 {
        match self {
            Self::Right => 0.0,
            Self::Down => 90.0,
            Self::Left => 180.0,
            Self::Up => 270.0,
        }
    }
}

/// Split a trailing `_<letter>` rotation token off `name`.
///
/// Returns the remaining base and the suffix. The base must be non-empty.
pub fn split_rotation_suffix(name: &str) -> Option<(&str, RotationSuffix)> {
    let (base, token) = name.rsplit_once('_')?;
    if base.is_empty() {
        return None;
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => RotationSuffix::from_letter(letter).map(|s| (base, s)),
        _ => None,
    }
}

/// Label with its own prefix token (and the following underscore) removed.
///
/// A label that is nothing but the prefix strips to `""`.
pub fn strip_label_prefix<'l>(label: &'l str, own_prefix: Option<&str>) -> &'l str {
    match own_prefix.and_then(|prefix| label.strip_prefix(prefix)) {
        Some("") => "",
        Some(rest) => rest.strip_prefix('_').unwrap_or(label),
        None => label,
    }
}

/// Which strategy produced an element's rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationSource {
    Suffix(RotationSuffix),
    Direct,
    Matrix,
    Default,
}

/// Pick the rotation for an element by priority.
pub fn determine_rotation(
    suffix: Option<RotationSuffix>,
    direct: Option<f64>,
    matrix: &AffineMatrix,
) -> (f64, RotationSource) {
    if let Some(suffix) = suffix {
        return (suffix.degrees(), RotationSource::Suffix(suffix));
    }
    if let Some(angle) = direct {
        return (angle, RotationSource::Direct);
    }
    match rotation_from_matrix(matrix) {
        Some(angle) => (angle, RotationSource::Matrix),
        None => (0.0, RotationSource::Default),
    }
}

/// Output name and the decorations that went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalName {
    pub name: String,
    pub applied_prefix: Option<String>,
    pub applied_suffix: Option<String>,
}

/// Prefix `base` and append the rule's final suffix, inserting single `_` separators.
pub fn decorate_name(base: &str, rule: &MappingRule) -> FinalName {
    let mut name = String::with_capacity(
        base.len() + rule.final_prefix.len() + rule.final_suffix.len() + 2,
    );

    let applied_prefix = (!rule.final_prefix.is_empty()).then(|| rule.final_prefix.clone());
    if let Some(prefix) = &applied_prefix {
        name.push_str(prefix);
        if !prefix.ends_with('_') {
            name.push('_');
        }
    }

    name.push_str(base);

    let applied_suffix = (!rule.final_suffix.is_empty()).then(|| rule.final_suffix.clone());
    if let Some(suffix) = &applied_suffix {
        if !suffix.starts_with('_') {
            name.push('_');
        }
        name.push_str(suffix);
    }

    FinalName {
        name,
        applied_prefix,
        applied_suffix,
    }
}
