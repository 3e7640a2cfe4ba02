// src/model/elements.rs

/// Color used for symbols missing from the palette.
pub const DEFAULT_COLOR: &str = "#cccccc";

/// Strips everything that is not an ASCII letter: "Fe2+" -> "Fe", "O2-" -> "O".
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// CPK-style display color for an element symbol as `#rrggbb`.
/// Unknown or empty symbols get [`DEFAULT_COLOR`].
pub fn color_for(symbol: &str) -> &'static str {
    match normalize_symbol(symbol).as_str() {
        // --- Period 1 ---
        "H"  => "#ffffff", // White
        "He" => "#d9ffff", // Cyan-White

        // --- Period 2 ---
        "Li" => "#cc80ff", // Violet
        "Be" => "#c2ff00", // Yellow-Green
        "B"  => "#ffb5b5", // Pink-Salmon
        "C"  => "#909090", // Grey
        "N"  => "#3050f8", // Blue
        "O"  => "#ff0d0d", // Red
        "F"  => "#90e050", // Green
        "Ne" => "#b3e3f5", // Light Cyan

        // --- Period 3 ---
        "Na" => "#ab5cf2",
        "Mg" => "#8aff00",
        "Al" => "#bfa6a6",
        "Si" => "#f0c8a0", // Tan
        "P"  => "#ff8000",
        "S"  => "#ffff30",
        "Cl" => "#1ff01f",
        "Ar" => "#80d1e3",

        // --- Period 4 ---
        "K"  => "#8f40d4",
        "Ca" => "#3dff00",
        "Sc" => "#e6e6e6",
        "Ti" => "#bfc2c7",
        "V"  => "#a6a6ab",
        "Cr" => "#8a99c7",
        "Mn" => "#9c7ac7",
        "Fe" => "#e06633", // Rust
        "Co" => "#f090a0",
        "Ni" => "#50d050",
        "Cu" => "#c88033", // Copper
        "Zn" => "#7d80b0",
        "Ga" => "#c28f8f",
        "Ge" => "#668f8f",
        "As" => "#bd80e3",
        "Se" => "#ffa100",
        "Br" => "#a62929",
        "Kr" => "#5cb8d1",

        // --- Period 5 (Selected) ---
        "Rb" => "#702eb0",
        "Sr" => "#00ff00",
        "Y"  => "#94ffff",
        "Zr" => "#94e0e0",
        "Nb" => "#73c2c9",
        "Mo" => "#54b5b5",
        "Ru" => "#248f8f",
        "Rh" => "#0a7d8c",
        "Pd" => "#006985",
        "Ag" => "#c0c0c0", // Silver
        "Cd" => "#ffd98f",
        "In" => "#a67573",
        "Sn" => "#668080",
        "Sb" => "#9e63b5",
        "Te" => "#d47a00",
        "I"  => "#940094",
        "Xe" => "#429eb0",

        // --- Period 6 (Selected) ---
        "Cs" => "#57178f",
        "Ba" => "#00c900",
        "La" => "#70d4ff",
        "Hf" => "#4dc2ff",
        "Ta" => "#4da6ff",
        "W"  => "#2194d6",
        "Pt" => "#d0d0e0",
        "Au" => "#ffd123", // Gold
        "Hg" => "#b8b8d0",
        "Pb" => "#575961",
        "Bi" => "#9e4fb5",

        _ => DEFAULT_COLOR,
    }
}

/// Covalent radius in Angstroms (Cordero 2008, single bond). 0.0 if unknown.
pub fn covalent_radius(symbol: &str) -> f64 {
    match normalize_symbol(symbol).as_str() {
        "H" => 0.31, "He" => 0.28,
        "Li" => 1.28, "Be" => 0.96, "B" => 0.84, "C" => 0.76, "N" => 0.71, "O" => 0.66,
        "F" => 0.57, "Ne" => 0.58,
        "Na" => 1.66, "Mg" => 1.41, "Al" => 1.21, "Si" => 1.11, "P" => 1.07, "S" => 1.05,
        "Cl" => 1.02, "Ar" => 1.06,
        "K" => 2.03, "Ca" => 1.76, "Sc" => 1.70, "Ti" => 1.60, "V" => 1.53, "Cr" => 1.39,
        "Mn" => 1.39, "Fe" => 1.32, "Co" => 1.26, "Ni" => 1.24, "Cu" => 1.32, "Zn" => 1.22,
        "Ga" => 1.22, "Ge" => 1.20, "As" => 1.19, "Se" => 1.20, "Br" => 1.20, "Kr" => 1.16,
        "Rb" => 2.20, "Sr" => 1.95, "Y" => 1.90, "Zr" => 1.75, "Nb" => 1.64, "Mo" => 1.54,
        "Ru" => 1.46, "Rh" => 1.42, "Pd" => 1.39, "Ag" => 1.45, "Cd" => 1.44, "In" => 1.42,
        "Sn" => 1.39, "Sb" => 1.39, "Te" => 1.38, "I" => 1.39, "Xe" => 1.40,
        "Cs" => 2.44, "Ba" => 2.15, "La" => 2.07, "Hf" => 1.75, "Ta" => 1.70, "W" => 1.62,
        "Pt" => 1.36, "Au" => 1.36, "Hg" => 1.32, "Pb" => 1.46, "Bi" => 1.48,
        _ => 0.0,
    }
}

/// Van der Waals radius in Angstroms (Bondi / Alvarez). 0.0 if unknown.
pub fn vdw_radius(symbol: &str) -> f64 {
    match normalize_symbol(symbol).as_str() {
        "H" => 1.20, "He" => 1.40,
        "Li" => 1.82, "Be" => 1.53, "B" => 1.92, "C" => 1.70, "N" => 1.55, "O" => 1.52,
        "F" => 1.47, "Ne" => 1.54,
        "Na" => 2.27, "Mg" => 1.73, "Al" => 1.84, "Si" => 2.10, "P" => 1.80, "S" => 1.80,
        "Cl" => 1.75, "Ar" => 1.88,
        "K" => 2.75, "Ca" => 2.31, "Ti" => 2.11, "Fe" => 2.04, "Co" => 2.00, "Ni" => 1.63,
        "Cu" => 1.40, "Zn" => 1.39, "Ga" => 1.87, "Ge" => 2.11, "As" => 1.85, "Se" => 1.90,
        "Br" => 1.85, "Kr" => 2.02,
        "Rb" => 3.03, "Sr" => 2.49, "Pd" => 1.63, "Ag" => 1.72, "Cd" => 1.58, "In" => 1.93,
        "Sn" => 2.17, "Sb" => 2.06, "Te" => 2.06, "I" => 1.98, "Xe" => 2.16,
        "Cs" => 3.43, "Ba" => 2.68, "Pt" => 1.75, "Au" => 1.66, "Hg" => 1.55, "Pb" => 2.02,
        "Bi" => 2.07,
        _ => 0.0,
    }
}

/// Shannon ionic radius in Angstroms for the most common oxidation state, CN=6.
/// 0.0 if unknown.
pub fn ionic_radius(symbol: &str) -> f64 {
    match normalize_symbol(symbol).as_str() {
        "Li" => 0.76, "Be" => 0.45, "B" => 0.27, "C" => 0.16, "N" => 1.46, "O" => 1.40,
        "F" => 1.33,
        "Na" => 1.02, "Mg" => 0.72, "Al" => 0.54, "Si" => 0.40, "P" => 0.38, "S" => 1.84,
        "Cl" => 1.81,
        "K" => 1.38, "Ca" => 1.00, "Sc" => 0.745, "Ti" => 0.605, "V" => 0.54, "Cr" => 0.615,
        "Mn" => 0.83, "Fe" => 0.645, "Co" => 0.745, "Ni" => 0.69, "Cu" => 0.73, "Zn" => 0.74,
        "Ga" => 0.62, "Ge" => 0.53, "As" => 0.46, "Se" => 1.98, "Br" => 1.96,
        "Rb" => 1.52, "Sr" => 1.18, "Y" => 0.90, "Zr" => 0.72, "Nb" => 0.64, "Mo" => 0.59,
        "Ag" => 1.15, "Cd" => 0.95, "In" => 0.80, "Sn" => 0.69, "Sb" => 0.76, "Te" => 2.21,
        "I" => 2.20,
        "Cs" => 1.67, "Ba" => 1.35, "La" => 1.032, "Hf" => 0.71, "Ta" => 0.64, "W" => 0.60,
        "Pt" => 0.625, "Au" => 1.37, "Hg" => 1.02, "Pb" => 1.19, "Bi" => 1.03,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oxidation_suffix_stripped() {
        assert_eq!(normalize_symbol("Fe2+"), "Fe");
        assert_eq!(color_for("Fe2+"), color_for("Fe"));
        assert_eq!(color_for("O2-"), "#ff0d0d");
    }

    #[test]
    fn test_unknown_is_gray() {
        assert_eq!(color_for("Xx"), DEFAULT_COLOR);
        assert_eq!(color_for("123+"), DEFAULT_COLOR);
        assert_eq!(color_for(""), DEFAULT_COLOR);
        assert_eq!(DEFAULT_COLOR, "#cccccc");
    }

    #[test]
    fn test_light_elements() {
        assert_eq!(color_for("C"), "#909090");
        assert_eq!(color_for("N"), "#3050f8");
        assert_eq!(color_for("Cl-"), "#1ff01f");
    }

    #[test]
    fn test_palette_is_hex() {
        for sym in ["H", "C", "Si", "Fe", "Au", "Bi"] {
            let c = color_for(sym);
            assert_eq!(c.len(), 7);
            assert!(c.starts_with('#'));
            assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_radii_tables() {
        assert!((covalent_radius("Si") - 1.11).abs() < 1e-12);
        assert!(vdw_radius("O") > covalent_radius("O"));
        assert_eq!(ionic_radius("Xx"), 0.0);
    }
}
