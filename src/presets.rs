//! Literal preset images for the pattern lab.
//!
//! Each preset is authored as rows of `'0'`/`'1'` text and validated once
//! when the library is built: every row must be `side` characters of the
//! bit alphabet and there must be exactly `side` rows. A validated preset
//! is immutable; selecting it copies its grid into the workspace.

use serde::{Deserialize, Serialize};

use crate::{BitGrid, PixelError, Result};

/// Authored preset text, before validation.
struct PresetDef {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    side: usize,
    rows: &'static [&'static str],
}

const BUILTIN: &[PresetDef] = &[
    PresetDef {
        key: "minimal-square",
        name: "极简方块",
        description: "只有 4 个格子，只能勉强表示黑白相间。",
        side: 2,
        rows: &["10", "01"],
    },
    PresetDef {
        key: "small-cross",
        name: "小十字",
        description: "9 个格子，可以画一个简单的符号。",
        side: 3,
        rows: &["010", "111", "010"],
    },
    PresetDef {
        key: "smiley",
        name: "笑脸",
        description: "64 个格子，足够画一个表情包了！",
        side: 8,
        rows: &[
            "00111100",
            "01000010",
            "10100101",
            "10000001",
            "10100101",
            "10011001",
            "01000010",
            "00111100",
        ],
    },
    PresetDef {
        key: "panda",
        name: "像素小熊猫",
        description: "用 0 和 1 画出的可爱国宝！",
        side: 16,
        rows: &[
            "0011000000011000",
            "0111100000111100",
            "0111111111111100",
            "1111000000011110",
            "1000000000000010",
            "1000000000000010",
            "1000000000000010",
            "1001110001110010",
            "1011110001111010",
            "1011100000111010",
            "1011000100011010",
            "1000000000000010",
            "1000000000000010",
            "1111111111111110",
            "0000000000000000",
            "0000000000000000",
        ],
    },
    PresetDef {
        key: "info-tech",
        name: "信息科技",
        description: "1024 个格子，刚好可以写下这四个汉字。",
        side: 32,
        rows: &[
            "00001000100000000000001000000000",
            "00001000010000000000010000000000",
            "00010111111111000001111111110000",
            "00010000000000000001000000010000",
            "00110011111110000001111111110000",
            "01010000000000000001000000010000",
            "00010011111110000001111111110000",
            "00010000000000000001000000010000",
            "00010011111110000001111111110000",
            "00010010000010000000000100000000",
            "00010010000010000000100010001000",
            "00010010000010000010100010000100",
            "00010011111110000010100000100100",
            "00010010000010000100011111100000",
            "00000000000000000000000000000000",
            "00000000000000000000000000000000",
            "00000000000000000000000000000000",
            "00000110010010000001000001000000",
            "00111000001010000001000001000000",
            "00001000001010000001000001000000",
            "00001000100010000111101111111000",
            "01111110010010000001000001000000",
            "00001000010010000001000001000000",
            "00011000000010000001001111110000",
            "00011100111111100001100100010000",
            "00101010000010000111000100010000",
            "01001000000010000001000010100000",
            "00001000000010000001000001000000",
            "00001000000010000001000010100000",
            "00001000000010000001000100010000",
            "00001000000010000111011000001100",
            "00000000000000000000000000000000",
        ],
    },
];

/// An immutable, validated preset image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Stable lookup key, e.g. `"smiley"`
    pub key: String,
    /// Display name
    pub name: String,
    /// One-line description shown under the name
    pub description: String,
    /// The image
    pub grid: BitGrid,
}

impl Preset {
    /// Build a preset from literal rows, validating shape and alphabet.
    pub fn from_rows(key: &str, name: &str, description: &str, side: usize, rows: &[&str]) -> Result<Self> {
        if rows.len() != side {
            return Err(PixelError::InvalidPreset(format!(
                "{key}: expected {side} rows, got {}",
                rows.len()
            )));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != side) {
            return Err(PixelError::InvalidPreset(format!(
                "{key}: row {r} has {} cells, expected {side}",
                row.len()
            )));
        }
        let grid = BitGrid::from_stream(side, &rows.concat())
            .map_err(|e| PixelError::InvalidPreset(format!("{key}: {e}")))?;
        Ok(Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            grid,
        })
    }

    /// Side length of the preset image.
    pub fn side(&self) -> usize {
        self.grid.side()
    }

    /// Number of bits needed to store the preset.
    pub fn total_bits(&self) -> usize {
        self.grid.num_bits()
    }
}

/// Ordered collection of presets, as listed in the pattern lab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

impl PresetLibrary {
    /// The built-in presets, smallest first.
    pub fn builtin() -> Result<Self> {
        let presets = BUILTIN
            .iter()
            .map(|def| Preset::from_rows(def.key, def.name, def.description, def.side, def.rows))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("loaded {} builtin presets", presets.len());
        Ok(Self { presets })
    }

    /// Add a preset; keys must be unique.
    pub fn insert(&mut self, preset: Preset) -> Result<()> {
        if self.get(&preset.key).is_some() {
            return Err(PixelError::InvalidPreset(format!(
                "duplicate preset key {}",
                preset.key
            )));
        }
        self.presets.push(preset);
        Ok(())
    }

    /// Look up a preset by key.
    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.key == key)
    }

    /// Look up a preset by key, failing with `UnknownPreset`.
    pub fn require(&self, key: &str) -> Result<&Preset> {
        self.get(key)
            .ok_or_else(|| PixelError::UnknownPreset(key.to_string()))
    }

    /// All presets in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the library holds no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let lib = PresetLibrary::builtin().unwrap();
        let sides: Vec<usize> = lib.iter().map(|p| p.side()).collect();
        assert_eq!(sides, vec![2, 3, 8, 16, 32]);
        for preset in lib.iter() {
            assert_eq!(preset.total_bits(), preset.side() * preset.side());
        }
    }

    #[test]
    fn test_smiley_literal() {
        let lib = PresetLibrary::builtin().unwrap();
        let smiley = lib.require("smiley").unwrap();
        assert_eq!(smiley.grid.row(0).unwrap(), vec![0, 0, 1, 1, 1, 1, 0, 0]);
        assert_eq!(smiley.grid.get(0).unwrap(), 0);
        assert_eq!(smiley.grid.num_set(), 26);
    }

    #[test]
    fn test_unknown_preset() {
        let lib = PresetLibrary::builtin().unwrap();
        assert!(matches!(
            lib.require("dragon"),
            Err(PixelError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        assert!(Preset::from_rows("a", "a", "", 2, &["10"]).is_err());
        assert!(Preset::from_rows("b", "b", "", 2, &["10", "011"]).is_err());
        assert!(Preset::from_rows("c", "c", "", 2, &["10", "0x"]).is_err());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut lib = PresetLibrary::builtin().unwrap();
        let dup = Preset::from_rows("smiley", "again", "", 2, &["11", "11"]).unwrap();
        assert!(lib.insert(dup).is_err());
        let fresh = Preset::from_rows("block", "block", "", 2, &["11", "11"]).unwrap();
        lib.insert(fresh).unwrap();
        assert_eq!(lib.len(), 6);
    }
}
