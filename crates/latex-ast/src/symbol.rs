//! Static command-name -> Unicode glyph table.
//!
//! Built the way `math-core/src/environments.rs` builds its environment
//! table: a `phf::phf_map!` looked up at parse time, with no runtime
//! construction cost.

use phf::phf_map;

static SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Lowercase Greek
    "alpha" => "\u{03B1}", "beta" => "\u{03B2}", "gamma" => "\u{03B3}",
    "delta" => "\u{03B4}", "epsilon" => "\u{03F5}", "zeta" => "\u{03B6}",
    "eta" => "\u{03B7}", "theta" => "\u{03B8}", "iota" => "\u{03B9}",
    "kappa" => "\u{03BA}", "lambda" => "\u{03BB}", "mu" => "\u{03BC}",
    "nu" => "\u{03BD}", "xi" => "\u{03BE}", "pi" => "\u{03C0}",
    "rho" => "\u{03C1}", "sigma" => "\u{03C3}", "tau" => "\u{03C4}",
    "upsilon" => "\u{03C5}", "phi" => "\u{03D5}", "chi" => "\u{03C7}",
    "psi" => "\u{03C8}", "omega" => "\u{03C9}",
    "varepsilon" => "\u{03B5}", "vartheta" => "\u{03D1}", "varpi" => "\u{03D6}",
    "varrho" => "\u{03F1}", "varsigma" => "\u{03C2}", "varphi" => "\u{03C6}",
    // Uppercase Greek
    "Gamma" => "\u{0393}", "Delta" => "\u{0394}", "Theta" => "\u{0398}",
    "Lambda" => "\u{039B}", "Xi" => "\u{039E}", "Pi" => "\u{03A0}",
    "Sigma" => "\u{03A3}", "Upsilon" => "\u{03A5}", "Phi" => "\u{03A6}",
    "Psi" => "\u{03A8}", "Omega" => "\u{03A9}",
    // Arithmetic / relational operators
    "pm" => "\u{00B1}", "mp" => "\u{2213}", "times" => "\u{00D7}",
    "div" => "\u{00F7}", "cdot" => "\u{22C5}", "ast" => "\u{2217}",
    "star" => "\u{22C6}", "circ" => "\u{2218}", "bullet" => "\u{2022}",
    "leq" => "\u{2264}", "geq" => "\u{2265}", "neq" => "\u{2260}",
    "ll" => "\u{226A}", "gg" => "\u{226B}", "equiv" => "\u{2261}",
    "sim" => "\u{223C}", "simeq" => "\u{2243}", "approx" => "\u{2248}",
    "cong" => "\u{2245}", "propto" => "\u{221D}", "parallel" => "\u{2225}",
    "perp" => "\u{27C2}",
    // Set / logic
    "in" => "\u{2208}", "notin" => "\u{2209}", "ni" => "\u{220B}",
    "subset" => "\u{2282}", "supset" => "\u{2283}", "subseteq" => "\u{2286}",
    "supseteq" => "\u{2287}", "cup" => "\u{222A}", "cap" => "\u{2229}",
    "setminus" => "\u{2216}", "emptyset" => "\u{2205}", "varnothing" => "\u{2205}",
    "forall" => "\u{2200}", "exists" => "\u{2203}", "nexists" => "\u{2204}",
    "neg" => "\u{00AC}", "land" => "\u{2227}", "lor" => "\u{2228}",
    "wedge" => "\u{2227}", "vee" => "\u{2228}",
    // Arrows
    "to" => "\u{2192}", "rightarrow" => "\u{2192}", "leftarrow" => "\u{2190}",
    "leftrightarrow" => "\u{2194}", "Rightarrow" => "\u{21D2}",
    "Leftarrow" => "\u{21D0}", "Leftrightarrow" => "\u{21D4}",
    "mapsto" => "\u{21A6}", "longrightarrow" => "\u{27F6}",
    "longleftarrow" => "\u{27F5}", "longleftrightarrow" => "\u{27F7}",
    "Longrightarrow" => "\u{27F9}", "Longleftarrow" => "\u{27F8}",
    "Longleftrightarrow" => "\u{27FA}", "uparrow" => "\u{2191}",
    "downarrow" => "\u{2193}", "updownarrow" => "\u{2195}",
    // Calculus / big operators (glyph only; `\sum` etc. are also
    // special-cased structurally in the parser for limit binding)
    "partial" => "\u{2202}", "nabla" => "\u{2207}", "infty" => "\u{221E}",
    "sum" => "\u{2211}", "prod" => "\u{220F}", "coprod" => "\u{2210}",
    "int" => "\u{222B}", "oint" => "\u{222E}", "iint" => "\u{222C}",
    "iiint" => "\u{222D}",
    // Dots, misc constants
    "ldots" => "\u{2026}", "cdots" => "\u{22EF}", "vdots" => "\u{22EE}",
    "ddots" => "\u{22F1}", "dots" => "\u{2026}",
    "hbar" => "\u{210F}", "ell" => "\u{2113}", "aleph" => "\u{2135}",
    "imath" => "\u{0131}", "jmath" => "\u{0237}", "wp" => "\u{2118}",
    "Re" => "\u{211C}", "Im" => "\u{2111}", "top" => "\u{22A4}",
    "bot" => "\u{22A5}", "angle" => "\u{2220}", "triangle" => "\u{25B3}",
    "prime" => "\u{2032}", "backslash" => "\u{2216}",
    // Paired delimiters
    "langle" => "\u{27E8}", "rangle" => "\u{27E9}",
    "lfloor" => "\u{230A}", "rfloor" => "\u{230B}",
    "lceil" => "\u{2308}", "rceil" => "\u{2309}",
    "lbrace" => "{", "rbrace" => "}",
    "lvert" => "|", "rvert" => "|", "lVert" => "\u{2016}", "rVert" => "\u{2016}",
    // Binary operators spelled as words
    "pmod" => "mod",
};

/// Looks up a LaTeX command name (without the leading backslash) and
/// returns its Unicode glyph, if one is statically known.
pub fn resolve(name: &str) -> Option<&'static str> {
    SYMBOLS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_symbols() {
        assert_eq!(resolve("alpha"), Some("\u{03B1}"));
        assert_eq!(resolve("leq"), Some("\u{2264}"));
        assert_eq!(resolve("rightarrow"), Some("\u{2192}"));
    }

    #[test]
    fn unknown_command_resolves_to_none() {
        assert_eq!(resolve("notarealcommand"), None);
    }
}
