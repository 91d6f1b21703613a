//! Entries of the global declarations box and inscription helpers.

use serde::Serialize;

use crate::error::DefinitionError;
use crate::ids::{Id, IdGenerator};
use crate::model::colorset::ColorSet;

/// One entry of the globbox, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Declaration {
    ColorSet(ColorSet),
    Var(VarDecl),
}

impl Declaration {
    pub fn id(&self) -> &Id {
        match self {
            Declaration::ColorSet(c) => &c.id,
            Declaration::Var(v) => &v.id,
        }
    }

    pub fn layout(&self) -> String {
        match self {
            Declaration::ColorSet(c) => c.layout(),
            Declaration::Var(v) => v.layout(),
        }
    }
}

impl From<ColorSet> for Declaration {
    fn from(colset: ColorSet) -> Self {
        Declaration::ColorSet(colset)
    }
}

impl From<VarDecl> for Declaration {
    fn from(var: VarDecl) -> Self {
        Declaration::Var(var)
    }
}

/// `var a, b: T;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDecl {
    pub id: Id,
    pub type_name: String,
    pub names: Vec<String>,
}

impl VarDecl {
    pub fn layout(&self) -> String {
        format!("var {}: {};", self.names.join(", "), self.type_name)
    }
}

pub fn var_decl(ids: &mut IdGenerator, name: &str, type_name: &str) -> VarDecl {
    VarDecl {
        id: ids.next_id(),
        type_name: type_name.to_string(),
        names: vec![name.to_string()],
    }
}

pub fn var_decl_list<I, S>(
    ids: &mut IdGenerator,
    names: I,
    type_name: &str,
) -> Result<VarDecl, DefinitionError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    if names.is_empty() {
        return Err(DefinitionError::EmptyVarList {
            type_name: type_name.to_string(),
        });
    }
    Ok(VarDecl {
        id: ids.next_id(),
        type_name: type_name.to_string(),
        names,
    })
}

/// Multiset text such as ``2`a++1`b``.
///
/// Entries with a non-positive amount are left out; nothing left means `""`.
pub fn marking_text<I, S>(marking: I) -> String
where
    I: IntoIterator<Item = (S, i64)>,
    S: AsRef<str>,
{
    marking
        .into_iter()
        .filter(|(_, amount)| *amount > 0)
        .map(|(colour, amount)| format!("{}`{}", amount, colour.as_ref()))
        .collect::<Vec<_>>()
        .join("++")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn var_layout_lists_all_names() {
        let mut ids = IdGenerator::new();
        let v = var_decl_list(&mut ids, ["a", "b"], "INT").unwrap();
        assert_eq!(v.layout(), "var a, b: INT;");
        assert_eq!(var_decl(&mut ids, "x", "UNIT").layout(), "var x: UNIT;");
    }

    #[test]
    fn empty_var_list_is_rejected() {
        let mut ids = IdGenerator::new();
        let err = var_decl_list(&mut ids, Vec::<&str>::new(), "INT").unwrap_err();
        assert_eq!(
            err,
            DefinitionError::EmptyVarList {
                type_name: "INT".into()
            }
        );
    }

    #[test]
    fn marking_text_skips_non_positive_amounts() {
        assert_eq!(marking_text([("a", 2), ("b", 0), ("c", 1)]), "2`a++1`c");
        assert_eq!(marking_text([("a", -1), ("b", 3)]), "3`b");
        assert_eq!(marking_text(Vec::<(&str, i64)>::new()), "");
    }
}
