use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKey {
    Pacific,
    Atlantic,
    Indian,
    Southern,
    Arctic,
}

impl RegionKey {
    pub const ALL: [RegionKey; 5] = [
        RegionKey::Pacific,
        RegionKey::Atlantic,
        RegionKey::Indian,
        RegionKey::Southern,
        RegionKey::Arctic,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pacific" | "pacific ocean" => Some(Self::Pacific),
            "atlantic" | "atlantic ocean" => Some(Self::Atlantic),
            "indian" | "indian ocean" => Some(Self::Indian),
            "southern" | "southern ocean" | "antarctic" => Some(Self::Southern),
            "arctic" | "arctic ocean" => Some(Self::Arctic),
            _ => None,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Pacific => "pacific",
            Self::Atlantic => "atlantic",
            Self::Indian => "indian",
            Self::Southern => "southern",
            Self::Arctic => "arctic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Temperature,
    Salinity,
    Oxygen,
    Depth,
    Ph,
    Currents,
    Location,
    Area,
    Volume,
    Facts,
    Source,
}

impl Field {
    pub const COMPARABLE: [Field; 4] = [
        Field::Temperature,
        Field::Salinity,
        Field::Oxygen,
        Field::Depth,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "temperature" | "temp" => Some(Self::Temperature),
            "salinity" => Some(Self::Salinity),
            "oxygen" | "o2" => Some(Self::Oxygen),
            "depth" => Some(Self::Depth),
            "ph" | "ph_level" | "ph level" => Some(Self::Ph),
            "currents" | "current" => Some(Self::Currents),
            "location" | "coordinates" => Some(Self::Location),
            "area" | "size" => Some(Self::Area),
            "volume" => Some(Self::Volume),
            "facts" | "fact" => Some(Self::Facts),
            "source" | "data_source" => Some(Self::Source),
            _ => None,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::Oxygen => "oxygen",
            Self::Depth => "depth",
            Self::Ph => "ph",
            Self::Currents => "currents",
            Self::Location => "location",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Facts => "facts",
            Self::Source => "source",
        }
    }

    pub fn is_comparable(self) -> bool {
        Self::COMPARABLE.contains(&self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionRecord {
    pub key: RegionKey,
    pub name: &'static str,
    pub temperature: &'static str,
    pub salinity: &'static str,
    pub oxygen: &'static str,
    pub oxygen_min: f32,
    pub oxygen_max: f32,
    pub ph_level: &'static str,
    pub currents: &'static str,
    pub depth: &'static str,
    pub coordinates: &'static str,
    pub area: &'static str,
    pub volume: &'static str,
    pub facts: &'static str,
    pub data_source: &'static str,
    pub countries: &'static [&'static str],
    pub size_rank: &'static str,
}

impl RegionRecord {
    pub fn field(&self, field: Field) -> &'static str {
        match field {
            Field::Temperature => self.temperature,
            Field::Salinity => self.salinity,
            Field::Oxygen => self.oxygen,
            Field::Depth => self.depth,
            Field::Ph => self.ph_level,
            Field::Currents => self.currents,
            Field::Location => self.coordinates,
            Field::Area => self.area,
            Field::Volume => self.volume,
            Field::Facts => self.facts,
            Field::Source => self.data_source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesRecord {
    pub name: &'static str,
    pub scientific_name: &'static str,
    pub habitat: &'static str,
    pub conservation_status: &'static str,
}

impl SpeciesRecord {
    pub fn is_threatened(&self) -> bool {
        matches!(
            self.conservation_status,
            "Endangered" | "Vulnerable" | "Near Threatened"
        )
    }
}

// Coarse topic label. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Greeting,
    Farewell,
    Measurement,
    MarineLife,
    Conservation,
    HumanImpact,
    Climate,
    Scientific,
    OceanInfo,
    General,
}

impl IntentCategory {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::Measurement => "measurement",
            Self::MarineLife => "marine_life",
            Self::Conservation => "conservation",
            Self::HumanImpact => "human_impact",
            Self::Climate => "climate",
            Self::Scientific => "scientific",
            Self::OceanInfo => "ocean_info",
            Self::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub at: DateTime<Utc>,
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub intent: IntentCategory,
    pub region: Option<RegionKey>,
    pub sentiment: Sentiment,
}
