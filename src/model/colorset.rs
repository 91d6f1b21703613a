//! Color set (type) declarations.
//!
//! Each constructor returns a fresh [`ColorSet`] that is attached nowhere;
//! the caller appends it to the declarations box. The layout text mirrors
//! the structural declaration, e.g. `colset INT0_3 = with 0..3;`.

use serde::Serialize;

use crate::error::DefinitionError;
use crate::ids::{Id, IdGenerator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorSetKind {
    Unit,
    Bool,
    /// Bounds are opaque literals in the target tool's syntax.
    Int { lower: String, upper: String },
    Enum { items: Vec<String> },
    Product { components: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSet {
    pub id: Id,
    pub name: String,
    pub kind: ColorSetKind,
}

impl ColorSet {
    pub fn layout(&self) -> String {
        let body = match &self.kind {
            ColorSetKind::Unit => "unit".to_string(),
            ColorSetKind::Bool => "bool".to_string(),
            ColorSetKind::Int { lower, upper } => format!("with {}..{}", lower, upper),
            ColorSetKind::Enum { items } => format!("with {}", items.join(" | ")),
            ColorSetKind::Product { components } => {
                format!("product with {}", components.join(" * "))
            }
        };
        format!("colset {} = {};", self.name, body)
    }
}

pub fn unit(ids: &mut IdGenerator, name: &str) -> ColorSet {
    declare(ids, name, ColorSetKind::Unit)
}

pub fn boolean(ids: &mut IdGenerator, name: &str) -> ColorSet {
    declare(ids, name, ColorSetKind::Bool)
}

pub fn int(ids: &mut IdGenerator, name: &str, lower: &str, upper: &str) -> ColorSet {
    declare(
        ids,
        name,
        ColorSetKind::Int {
            lower: lower.to_string(),
            upper: upper.to_string(),
        },
    )
}

/// The modelling tool rejects empty enumerations.
pub fn enumeration<I, S>(
    ids: &mut IdGenerator,
    name: &str,
    items: I,
) -> Result<ColorSet, DefinitionError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: Vec<String> = items.into_iter().map(Into::into).collect();
    if items.is_empty() {
        return Err(DefinitionError::EmptyEnum {
            name: name.to_string(),
        });
    }
    Ok(declare(ids, name, ColorSetKind::Enum { items }))
}

/// Cartesian product of previously declared sets; arity must be at least two.
pub fn product<I, S>(
    ids: &mut IdGenerator,
    name: &str,
    components: I,
) -> Result<ColorSet, DefinitionError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let components: Vec<String> = components.into_iter().map(Into::into).collect();
    if components.len() < 2 {
        return Err(DefinitionError::ProductArity {
            name: name.to_string(),
            count: components.len(),
        });
    }
    Ok(declare(ids, name, ColorSetKind::Product { components }))
}

pub fn pair(ids: &mut IdGenerator, name: &str, first: &str, second: &str) -> ColorSet {
    declare(
        ids,
        name,
        ColorSetKind::Product {
            components: vec![first.to_string(), second.to_string()],
        },
    )
}

/// Canonical name for the bounded integer type `[lower, upper]`.
pub fn bounded_int_name(lower: i64, upper: i64) -> String {
    format!("INT{}_{}", lower, upper)
}

// Ids are only drawn once validation has passed.
fn declare(ids: &mut IdGenerator, name: &str, kind: ColorSetKind) -> ColorSet {
    ColorSet {
        id: ids.next_id(),
        name: name.to_string(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn layout_text_per_kind() {
        let mut ids = IdGenerator::new();
        assert_eq!(unit(&mut ids, "UNIT").layout(), "colset UNIT = unit;");
        assert_eq!(boolean(&mut ids, "BOOL").layout(), "colset BOOL = bool;");
        assert_eq!(
            int(&mut ids, "INT0_3", "0", "3").layout(),
            "colset INT0_3 = with 0..3;"
        );
        assert_eq!(
            enumeration(&mut ids, "LOCK", ["free", "held"]).unwrap().layout(),
            "colset LOCK = with free | held;"
        );
    }

    #[test]
    fn empty_enum_is_rejected() {
        let mut ids = IdGenerator::new();
        let err = enumeration(&mut ids, "E", Vec::<String>::new()).unwrap_err();
        assert_eq!(err, DefinitionError::EmptyEnum { name: "E".into() });
        // no id was consumed by the failed call
        assert_eq!(ids.last_issued(), IdGenerator::RESERVED);
    }

    #[test]
    fn product_needs_two_components() {
        let mut ids = IdGenerator::new();
        let err = product(&mut ids, "P", ["A"]).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::ProductArity {
                name: "P".into(),
                count: 1
            }
        );

        let ok = product(&mut ids, "P", ["A", "B"]).unwrap();
        assert_eq!(ok.layout(), "colset P = product with A * B;");
    }

    #[test]
    fn pair_is_a_binary_product() {
        let mut ids = IdGenerator::new();
        let p = pair(&mut ids, "AxB", "A", "B");
        assert_eq!(
            p.kind,
            ColorSetKind::Product {
                components: vec!["A".into(), "B".into()]
            }
        );
    }

    #[test]
    fn bounded_int_names() {
        assert_eq!(bounded_int_name(0, 3), "INT0_3");
        assert_eq!(bounded_int_name(-2, 2), "INT-2_2");
    }
}
