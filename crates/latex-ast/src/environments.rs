//! Recognized `\begin{...}`/`\end{...}` environment names.
//!
//! Grounded on `math-core/src/environments.rs`'s `Env` enum and its
//! `phf::phf_map!`-backed name table, narrowed to the environment kinds
//! this crate builds a dedicated AST node for.

use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Matrix,
    PMatrix,
    BMatrix,
    BraceMatrix,
    VMatrix,
    DoubleVMatrix,
    SmallMatrix,
    Array,
    Cases,
    Align,
    Aligned,
    Gather,
    Gathered,
    Split,
    Multline,
    Eqnarray,
    Subequations,
}

static ENVIRONMENTS: phf::Map<&'static str, Env> = phf_map! {
    "matrix" => Env::Matrix,
    "pmatrix" => Env::PMatrix,
    "bmatrix" => Env::BMatrix,
    "Bmatrix" => Env::BraceMatrix,
    "vmatrix" => Env::VMatrix,
    "Vmatrix" => Env::DoubleVMatrix,
    "smallmatrix" => Env::SmallMatrix,
    "array" => Env::Array,
    "cases" => Env::Cases,
    "align" => Env::Align,
    "align*" => Env::Align,
    "aligned" => Env::Aligned,
    "gather" => Env::Gather,
    "gather*" => Env::Gather,
    "gathered" => Env::Gathered,
    "split" => Env::Split,
    "multline" => Env::Multline,
    "multline*" => Env::Multline,
    "eqnarray" => Env::Eqnarray,
    "eqnarray*" => Env::Eqnarray,
    "subequations" => Env::Subequations,
};

impl Env {
    pub fn from_name(name: &str) -> Option<Env> {
        ENVIRONMENTS.get(name).copied()
    }

    pub fn is_matrix_like(self) -> bool {
        matches!(
            self,
            Env::Matrix
                | Env::PMatrix
                | Env::BMatrix
                | Env::BraceMatrix
                | Env::VMatrix
                | Env::DoubleVMatrix
                | Env::SmallMatrix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_matrix_family() {
        assert_eq!(Env::from_name("pmatrix"), Some(Env::PMatrix));
        assert!(Env::from_name("pmatrix").unwrap().is_matrix_like());
    }

    #[test]
    fn unknown_environment_is_none() {
        assert_eq!(Env::from_name("xmatrix"), None);
    }
}
