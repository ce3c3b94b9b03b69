//! Static formation catalog: named slot layouts per squad size, starting
//! position templates, and position-category grouping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquadFormat {
    FiveASide,
    SevenASide,
    ElevenASide,
}

impl SquadFormat {
    pub const ALL: [SquadFormat; 3] = [
        SquadFormat::FiveASide,
        SquadFormat::SevenASide,
        SquadFormat::ElevenASide,
    ];

    pub fn squad_size(self) -> usize {
        match self {
            SquadFormat::FiveASide => 5,
            SquadFormat::SevenASide => 7,
            SquadFormat::ElevenASide => 11,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SquadFormat::FiveASide => "5v5",
            SquadFormat::SevenASide => "7v7",
            SquadFormat::ElevenASide => "11v11",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "5v5" => Some(SquadFormat::FiveASide),
            "7v7" => Some(SquadFormat::SevenASide),
            "11v11" => Some(SquadFormat::ElevenASide),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            SquadFormat::FiveASide => SquadFormat::SevenASide,
            SquadFormat::SevenASide => SquadFormat::ElevenASide,
            SquadFormat::ElevenASide => SquadFormat::FiveASide,
        }
    }
}

/// One lineup slot: normalized pitch coordinates (0-100, y grows toward the
/// own goal) and a position label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub x: f32,
    pub y: f32,
    pub label: &'static str,
}

const fn slot(x: f32, y: f32, label: &'static str) -> FormationSlot {
    FormationSlot { x, y, label }
}

pub type FormationEntry = (&'static str, &'static [FormationSlot]);

const FIVE_A_SIDE: &[FormationEntry] = &[
    (
        "2-2",
        &[
            slot(25.0, 75.0, "DF"),
            slot(75.0, 75.0, "DF"),
            slot(25.0, 30.0, "FW"),
            slot(75.0, 30.0, "FW"),
            slot(50.0, 52.0, "MF"),
        ],
    ),
    (
        "1-2-1",
        &[
            slot(50.0, 80.0, "DF"),
            slot(25.0, 50.0, "MF"),
            slot(75.0, 50.0, "MF"),
            slot(50.0, 50.0, "MF"),
            slot(50.0, 20.0, "FW"),
        ],
    ),
    (
        "2-1-1",
        &[
            slot(25.0, 75.0, "DF"),
            slot(75.0, 75.0, "DF"),
            slot(50.0, 50.0, "MF"),
            slot(50.0, 25.0, "FW"),
            slot(50.0, 90.0, "DF"),
        ],
    ),
    (
        "3-1",
        &[
            slot(20.0, 70.0, "DF"),
            slot(50.0, 75.0, "DF"),
            slot(80.0, 70.0, "DF"),
            slot(50.0, 45.0, "MF"),
            slot(50.0, 20.0, "FW"),
        ],
    ),
];

const SEVEN_A_SIDE: &[FormationEntry] = &[
    (
        "2-3-1",
        &[
            slot(50.0, 85.0, "GK"),
            slot(30.0, 70.0, "CB"),
            slot(70.0, 70.0, "CB"),
            slot(20.0, 45.0, "LM"),
            slot(50.0, 45.0, "CM"),
            slot(80.0, 45.0, "RM"),
            slot(50.0, 15.0, "ST"),
        ],
    ),
    (
        "3-2-1",
        &[
            slot(50.0, 85.0, "GK"),
            slot(20.0, 65.0, "CB"),
            slot(50.0, 65.0, "CB"),
            slot(80.0, 65.0, "CB"),
            slot(35.0, 40.0, "CM"),
            slot(65.0, 40.0, "CM"),
            slot(50.0, 15.0, "ST"),
        ],
    ),
    (
        "3-3",
        &[
            slot(50.0, 85.0, "GK"),
            slot(20.0, 65.0, "CB"),
            slot(50.0, 65.0, "CB"),
            slot(80.0, 65.0, "CB"),
            slot(20.0, 25.0, "LW"),
            slot(50.0, 25.0, "ST"),
            slot(80.0, 25.0, "RW"),
        ],
    ),
];

const ELEVEN_A_SIDE: &[FormationEntry] = &[
    (
        "4-4-2",
        &[
            slot(50.0, 90.0, "GK"),
            slot(15.0, 72.0, "LB"),
            slot(38.0, 72.0, "CB"),
            slot(62.0, 72.0, "CB"),
            slot(85.0, 72.0, "RB"),
            slot(15.0, 45.0, "LM"),
            slot(38.0, 45.0, "CM"),
            slot(62.0, 45.0, "CM"),
            slot(85.0, 45.0, "RM"),
            slot(35.0, 18.0, "ST"),
            slot(65.0, 18.0, "ST"),
        ],
    ),
    (
        "4-3-3",
        &[
            slot(50.0, 90.0, "GK"),
            slot(15.0, 72.0, "LB"),
            slot(38.0, 72.0, "CB"),
            slot(62.0, 72.0, "CB"),
            slot(85.0, 72.0, "RB"),
            slot(25.0, 45.0, "CM"),
            slot(50.0, 45.0, "CM"),
            slot(75.0, 45.0, "CM"),
            slot(20.0, 18.0, "LW"),
            slot(50.0, 18.0, "ST"),
            slot(80.0, 18.0, "RW"),
        ],
    ),
    (
        "3-5-2",
        &[
            slot(50.0, 90.0, "GK"),
            slot(25.0, 72.0, "CB"),
            slot(50.0, 72.0, "CB"),
            slot(75.0, 72.0, "CB"),
            slot(10.0, 50.0, "LWB"),
            slot(35.0, 50.0, "CM"),
            slot(50.0, 42.0, "CAM"),
            slot(65.0, 50.0, "CM"),
            slot(90.0, 50.0, "RWB"),
            slot(35.0, 18.0, "ST"),
            slot(65.0, 18.0, "ST"),
        ],
    ),
    (
        "4-2-3-1",
        &[
            slot(50.0, 90.0, "GK"),
            slot(15.0, 72.0, "LB"),
            slot(38.0, 72.0, "CB"),
            slot(62.0, 72.0, "CB"),
            slot(85.0, 72.0, "RB"),
            slot(35.0, 55.0, "CDM"),
            slot(65.0, 55.0, "CDM"),
            slot(20.0, 35.0, "LW"),
            slot(50.0, 35.0, "CAM"),
            slot(80.0, 35.0, "RW"),
            slot(50.0, 15.0, "ST"),
        ],
    ),
];

pub fn catalog(format: SquadFormat) -> &'static [FormationEntry] {
    match format {
        SquadFormat::FiveASide => FIVE_A_SIDE,
        SquadFormat::SevenASide => SEVEN_A_SIDE,
        SquadFormat::ElevenASide => ELEVEN_A_SIDE,
    }
}

pub fn formation_names(format: SquadFormat) -> Vec<&'static str> {
    catalog(format).iter().map(|(name, _)| *name).collect()
}

pub fn formation_slots(format: SquadFormat, name: &str) -> Option<&'static [FormationSlot]> {
    catalog(format)
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, slots)| *slots)
}

pub fn default_formation(format: SquadFormat) -> &'static str {
    catalog(format)[0].0
}

const TEMPLATE_5V5: &[&str] = &["DF", "DF", "MF", "FW", "FW"];
const TEMPLATE_7V7: &[&str] = &["GK", "DF", "DF", "MF", "MF", "MF", "FW"];
const TEMPLATE_11V11: &[&str] = &[
    "GK", "DF", "DF", "DF", "DF", "MF", "MF", "MF", "FW", "FW", "FW",
];

const OVERFLOW_CYCLE: [&str; 3] = ["DF", "MF", "FW"];

pub fn starting_template(format: SquadFormat) -> &'static [&'static str] {
    match format {
        SquadFormat::FiveASide => TEMPLATE_5V5,
        SquadFormat::SevenASide => TEMPLATE_7V7,
        SquadFormat::ElevenASide => TEMPLATE_11V11,
    }
}

/// Default positions for `count` sign-ups: the format's starting template
/// first, then DF/MF/FW cycling for everyone past it.
pub fn assign_positions(count: usize, format: SquadFormat) -> Vec<&'static str> {
    let template = starting_template(format);
    (0..count)
        .map(|i| {
            if i < template.len() {
                template[i]
            } else {
                OVERFLOW_CYCLE[(i - template.len()) % OVERFLOW_CYCLE.len()]
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionCategory {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PositionCategory {
    pub fn code(self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "GK",
            PositionCategory::Defender => "DF",
            PositionCategory::Midfielder => "MF",
            PositionCategory::Forward => "FW",
        }
    }

    /// Number of distinct avatar sprites per category.
    pub fn avatar_count(self) -> usize {
        match self {
            PositionCategory::Goalkeeper => 2,
            PositionCategory::Defender => 7,
            PositionCategory::Midfielder => 8,
            PositionCategory::Forward => 6,
        }
    }
}

/// Unknown labels fall into midfield.
pub fn position_category(pos: &str) -> PositionCategory {
    match pos {
        "GK" => PositionCategory::Goalkeeper,
        "CB" | "LB" | "RB" | "LWB" | "RWB" | "DF" => PositionCategory::Defender,
        "CDM" | "CM" | "CAM" | "LM" | "RM" | "LW" | "RW" | "MF" => PositionCategory::Midfielder,
        "ST" | "CF" | "FW" => PositionCategory::Forward,
        _ => PositionCategory::Midfielder,
    }
}
