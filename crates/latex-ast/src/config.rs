//! Parser configuration.
//!
//! Grounded on `math-core/src/lib.rs`'s `MathCoreConfig` (a plain,
//! `Default`-deriving struct carrying predefined macros and a couple of
//! scalar knobs), with `serde::Deserialize` gated behind a `serde`
//! feature exactly as the teacher gates its own config's serde support.

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// `(name, body)` pairs seeded into the macro table before parsing
    /// begins, in the same `(String, String)` shape `MathCoreConfig`
    /// accepts its custom commands in.
    pub predefined_macros: Vec<(String, String)>,
    /// Hard cap on nested macro expansion, per the specification's §4.4.
    pub max_macro_recursion_depth: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            predefined_macros: Vec::new(),
            max_macro_recursion_depth: 64,
        }
    }
}
