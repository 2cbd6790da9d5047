//! Fish species catalog
//!
//! Species are immutable records; a fish instance copies the base speeds into
//! its own velocity and never writes back to the catalog.

use rand::Rng;

/// Convert a 0xRRGGBB literal to RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

/// All catchable species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Mackerel,
    Sardine,
    SpanishMackerel,
    BlackBean,
}

/// Immutable per-species parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesDef {
    pub name: &'static str,
    pub color: [f32; 4],
    pub width: f32,
    pub height: f32,
    /// Initial horizontal velocity (logical px per step)
    pub speed_x: f32,
    /// Initial vertical velocity (logical px per step)
    pub speed_y: f32,
    /// Time before the fish swims off and a new one spawns (ms)
    pub lifetime_ms: f64,
    /// Shown instead of the default catch line
    pub message: Option<&'static str>,
}

const MACKEREL: SpeciesDef = SpeciesDef {
    name: "Mackerel",
    color: rgb(0x00CED1),
    width: 70.0,
    height: 30.0,
    speed_x: 20.0,
    speed_y: 20.0,
    lifetime_ms: 50_000.0,
    message: None,
};

const SARDINE: SpeciesDef = SpeciesDef {
    name: "Sardine",
    color: rgb(0xFFD700),
    width: 30.0,
    height: 20.0,
    speed_x: 1.5,
    speed_y: 2.0,
    lifetime_ms: 30_000.0,
    message: None,
};

const SPANISH_MACKEREL: SpeciesDef = SpeciesDef {
    name: "Spanish Mackerel",
    color: rgb(0xFA2034),
    width: 30.0,
    height: 20.0,
    speed_x: 1.5,
    speed_y: 2.0,
    lifetime_ms: 30_000.0,
    message: None,
};

const BLACK_BEAN: SpeciesDef = SpeciesDef {
    name: "Black Bean",
    color: rgb(0x000000),
    width: 30.0,
    height: 20.0,
    speed_x: 1.5,
    speed_y: 2.0,
    lifetime_ms: 30_000.0,
    message: Some("Wait... what!?"),
};

impl Species {
    /// Every species, in catalog order
    pub const ALL: [Species; 4] = [
        Species::Mackerel,
        Species::Sardine,
        Species::SpanishMackerel,
        Species::BlackBean,
    ];

    pub const fn def(self) -> &'static SpeciesDef {
        match self {
            Species::Mackerel => &MACKEREL,
            Species::Sardine => &SARDINE,
            Species::SpanishMackerel => &SPANISH_MACKEREL,
            Species::BlackBean => &BLACK_BEAN,
        }
    }

    /// Uniformly random species
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Text shown after catching this species
    pub fn catch_message(self) -> String {
        let def = self.def();
        match def.message {
            Some(msg) => msg.to_string(),
            None => format!("Caught a {}!", def.name),
        }
    }
}
