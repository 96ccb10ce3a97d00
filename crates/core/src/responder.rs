use crate::error::{CoreError, CoreResult};
use crate::intent::{
    contains_any, correct_spelling, detect_region, detect_sentiment, normalize_text,
    score_intents, IntentScores,
};
use crate::models::{Field, IntentCategory, RegionKey, Reply, Sentiment};
use crate::reference::{
    self, TopicFact, ACIDIFICATION_ANSWER, ARGO_ANSWER, CIRCULATION_ANSWER, CLIMATE_FACTS,
    HUMAN_IMPACT_FACTS, MARINE_LIFE_ANSWERS, OVERFISHING_ANSWER, PLASTIC_ANSWER,
    PROTECT_ANSWER, REEF_ANSWER, SALINITY_ANSWER, WARMING_ANSWER,
};

pub const GREETINGS: &[&str] = &[
    "Hello! I'm FloatChat, your AI assistant for exploring ARGO ocean data. How can I help you today?",
    "Hi there! I'm here to answer your questions about the world's oceans.",
    "Greetings! I'm an AI specialized in oceanography and marine science.",
];

pub const FAREWELLS: &[&str] = &[
    "Goodbye! Thank you for using FloatChat. Feel free to return with more questions about ocean data!",
    "Farewell! Remember that every action counts in protecting our marine environments.",
    "See you later! Feel free to return with more questions about ocean science.",
];

const POSITIVE_CLOSINGS: &[&str] = &[
    "I share your enthusiasm for ocean conservation!",
    "It's wonderful to see your interest in marine science!",
    "Your curiosity about the ocean is inspiring!",
];

const NEGATIVE_CLOSINGS: &[&str] = &[
    "I understand your concerns about ocean health. There are many ways to help!",
    "It's normal to feel worried about ocean challenges, but there's hope through collective action.",
    "Many people share your concerns, which is why ocean conservation efforts are growing worldwide.",
];

pub const HELP_MESSAGE: &str = "I'm not sure I understand. I can help you with information about ocean temperature, salinity, oxygen levels, depth, currents, fish species, and more. Try asking about a specific ocean or parameter.";

const WHICH_OCEAN: &str = "I can tell you about the Pacific, Atlantic, Indian, Southern, or Arctic Ocean. Which one interests you?";

const WHICH_OCEAN_SPECIES: &str = "Which ocean are you interested in? I can tell you about fish species in the Pacific, Atlantic, Indian, Southern, or Arctic Ocean.";

const FIELD_KEYWORDS: &[(Field, &[&str])] = &[
    (Field::Temperature, &["temperature"]),
    (Field::Salinity, &["salinity"]),
    (Field::Oxygen, &["oxygen"]),
    (Field::Depth, &["depth"]),
    (Field::Ph, &["ph"]),
    (Field::Currents, &["current"]),
    (Field::Location, &["location", "where", "coordinates"]),
    (Field::Area, &["area", "size"]),
    (Field::Volume, &["volume"]),
    (Field::Facts, &["fact", "interesting"]),
];

const SPECIES_WORDS: &[&str] = &["fish", "fishes", "species", "animals", "wildlife", "marine life"];

pub trait VariantPicker {
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstVariant;

impl VariantPicker for FirstVariant {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

#[derive(Debug, Clone)]
pub struct QueryContext {
    pub text: String,
    pub intent: IntentCategory,
    pub scores: IntentScores,
    pub region: Option<RegionKey>,
    pub sentiment: Sentiment,
    pub previous_user_text: Option<String>,
    words: Vec<String>,
}

impl QueryContext {
    pub fn analyze(raw: &str, previous_user_text: Option<&str>) -> Self {
        let text = correct_spelling(&normalize_text(raw));
        let scores = score_intents(&text);
        let words = text
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            intent: scores.best(),
            region: detect_region(&text),
            sentiment: detect_sentiment(raw),
            previous_user_text: previous_user_text.map(|text| text.to_lowercase()),
            scores,
            words,
            text,
        }
    }

    // Multi-word keywords match as substrings. Single words must match a
    // whole word, or a word prefix when the keyword is longer than three
    // characters ("seal" matches "seals", "ph" does not match "phytoplankton").
    pub fn mentions(&self, keyword: &str) -> bool {
        if keyword.contains(' ') {
            return self.text.contains(keyword);
        }
        self.words
            .iter()
            .any(|word| word == keyword || (keyword.len() > 3 && word.starts_with(keyword)))
    }

    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.mentions(keyword))
    }

    pub fn detect_field(&self) -> Option<Field> {
        FIELD_KEYWORDS
            .iter()
            .find(|(_, keywords)| self.mentions_any(keywords))
            .map(|(field, _)| *field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Text(String),
    OneOf(&'static [&'static str]),
}

impl Draft {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn render(self, picker: &mut dyn VariantPicker) -> String {
        match self {
            Self::Text(text) => text,
            Self::OneOf(options) => pick(options, picker).to_string(),
        }
    }
}

pub type Predicate = fn(&QueryContext) -> bool;
pub type Handler = fn(&QueryContext) -> CoreResult<Draft>;

pub struct Rule {
    pub name: &'static str,
    pub applies: Predicate,
    pub handle: Handler,
}

// Evaluated top to bottom; the first rule that applies answers.
pub static RULES: &[Rule] = &[
    Rule {
        name: "greeting",
        applies: |ctx| ctx.intent == IntentCategory::Greeting,
        handle: |_| Ok(Draft::OneOf(GREETINGS)),
    },
    Rule {
        name: "farewell",
        applies: |ctx| ctx.intent == IntentCategory::Farewell,
        handle: |_| Ok(Draft::OneOf(FAREWELLS)),
    },
    Rule {
        name: "measurement",
        applies: |ctx| ctx.intent == IntentCategory::Measurement,
        handle: measurement_reply,
    },
    Rule {
        name: "marine_life",
        applies: |ctx| ctx.intent == IntentCategory::MarineLife,
        handle: marine_life_reply,
    },
    Rule {
        name: "conservation",
        applies: |ctx| ctx.intent == IntentCategory::Conservation,
        handle: conservation_reply,
    },
    Rule {
        name: "human_impact",
        applies: |ctx| ctx.intent == IntentCategory::HumanImpact,
        handle: |ctx| Ok(Draft::Text(topic_reply(ctx, &HUMAN_IMPACT_FACTS, "Human impacts on the ocean:"))),
    },
    Rule {
        name: "climate",
        applies: |ctx| ctx.intent == IntentCategory::Climate,
        handle: |ctx| Ok(Draft::Text(topic_reply(ctx, &CLIMATE_FACTS, "How climate change is affecting the ocean:"))),
    },
    Rule {
        name: "scientific",
        applies: |ctx| ctx.intent == IntentCategory::Scientific,
        handle: scientific_reply,
    },
    Rule {
        name: "ocean_overview",
        applies: |ctx| ctx.intent == IntentCategory::OceanInfo && ctx.region.is_some(),
        handle: |ctx| region_of(ctx).map(|key| Draft::Text(ocean_facts(key))),
    },
    Rule {
        name: "region_summary",
        applies: |ctx| ctx.region.is_some(),
        handle: |ctx| region_of(ctx).map(|key| Draft::Text(general_info(key))),
    },
    Rule {
        name: "ocean_prompt",
        applies: |ctx| ctx.intent == IntentCategory::OceanInfo,
        handle: |_| Ok(Draft::text(WHICH_OCEAN)),
    },
    // Keyed on the previous user turn, not the bot's last reply.
    Rule {
        name: "follow_up",
        applies: |ctx| {
            ctx.previous_user_text
                .as_deref()
                .is_some_and(|previous| contains_any(previous, &["ocean", "marine"]))
        },
        handle: follow_up_reply,
    },
    Rule {
        name: "rephrase",
        applies: |ctx| ctx.previous_user_text.is_some(),
        handle: |_| {
            Ok(Draft::text(
                "I'm not sure I understand. Could you rephrase your question about the ocean?",
            ))
        },
    },
    Rule {
        name: "help",
        applies: |_| true,
        handle: |_| Ok(Draft::text(HELP_MESSAGE)),
    },
];

pub fn route(ctx: &QueryContext) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .unwrap_or(&RULES[RULES.len() - 1])
}

pub fn respond(ctx: &QueryContext, picker: &mut dyn VariantPicker) -> CoreResult<Reply> {
    let rule = route(ctx);
    let mut text = (rule.handle)(ctx)?.render(picker);

    let closings = match ctx.sentiment {
        Sentiment::Positive => Some(POSITIVE_CLOSINGS),
        Sentiment::Negative => Some(NEGATIVE_CLOSINGS),
        Sentiment::Neutral => None,
    };
    if let Some(options) = closings {
        text.push(' ');
        text.push_str(pick(options, picker));
    }

    Ok(Reply {
        text,
        intent: ctx.intent,
        region: ctx.region,
        sentiment: ctx.sentiment,
    })
}

pub fn answer(query: &str) -> CoreResult<Reply> {
    respond(&QueryContext::analyze(query, None), &mut FirstVariant)
}

pub fn try_field_lookup(region_token: &str, field_token: &str) -> CoreResult<&'static str> {
    let key = RegionKey::parse(region_token)
        .ok_or_else(|| CoreError::UnknownRegion(region_token.to_string()))?;
    let field = Field::parse(field_token).ok_or_else(|| CoreError::UnknownField {
        region: key,
        field: field_token.trim().to_string(),
    })?;
    Ok(reference::region(key).field(field))
}

pub fn field_lookup(region_token: &str, field_token: &str) -> String {
    match try_field_lookup(region_token, field_token) {
        Ok(value) => value.to_string(),
        Err(err) => err.apology(),
    }
}

pub fn region_info(region_token: &str) -> String {
    match RegionKey::parse(region_token) {
        Some(key) => general_info(key),
        None => CoreError::UnknownRegion(region_token.to_string()).apology(),
    }
}

pub fn general_info(key: RegionKey) -> String {
    let data = reference::region(key);
    [
        format!("Information about the {}:", data.name),
        format!("- Location: {}", data.coordinates),
        format!("- Area: {}", data.area),
        format!("- Volume: {}", data.volume),
        format!("- Average Depth: {}", data.depth),
        format!("- Temperature: {}", data.temperature),
        format!("- Salinity: {}", data.salinity),
        format!("- Oxygen Levels: {}", data.oxygen),
        format!("- pH Level: {}", data.ph_level),
        format!("- Interesting Fact: {}", data.facts),
        format!("- Data Source: {}", data.data_source),
    ]
    .join("\n")
}

pub fn field_sentence(key: RegionKey, field: Field) -> String {
    let data = reference::region(key);
    let name = data.name;
    let value = data.field(field);
    match field {
        Field::Temperature => format!("The temperature in the {name} is {value}."),
        Field::Salinity => format!("The salinity in the {name} is {value}."),
        Field::Oxygen => format!("The oxygen levels in the {name} are {value}."),
        Field::Depth => format!("The depth of the {name} is {value}."),
        Field::Ph => format!("The pH level in the {name} is {value}."),
        Field::Currents => format!("The major currents in the {name} are: {value}."),
        Field::Location => format!("The {name} is located at approximately {value}."),
        Field::Area => format!("The {name} has an area of {value}."),
        Field::Volume => format!("The {name} has a volume of {value}."),
        Field::Facts => format!("Interesting fact about the {name}: {value}"),
        Field::Source => format!("Data for the {name} comes from {value}."),
    }
}

pub fn try_compare_regions(field: Field) -> CoreResult<String> {
    if !field.is_comparable() {
        return Err(CoreError::NotComparable(field));
    }
    Ok(listing(
        &format!("Comparison of {} across oceans:", field.as_key()),
        field,
    ))
}

pub fn compare_regions(field_token: &str) -> String {
    let result = Field::parse(field_token)
        .ok_or(CoreError::NotComparable(Field::Facts))
        .and_then(try_compare_regions);
    match result {
        Ok(text) => text,
        Err(err) => err.apology(),
    }
}

pub fn list_field(field: Field) -> String {
    if field.is_comparable() {
        return listing(
            &format!("Comparison of {} across oceans:", field.as_key()),
            field,
        );
    }
    let header = match field {
        Field::Ph => "pH levels across oceans:",
        Field::Currents => "Major ocean currents:",
        Field::Location => "Ocean locations:",
        Field::Area => "Ocean areas:",
        Field::Volume => "Ocean volumes:",
        Field::Facts => "Interesting facts about oceans:",
        _ => "Data sources:",
    };
    listing(header, field)
}

fn listing(header: &str, field: Field) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(
        reference::regions()
            .iter()
            .map(|data| format!("- {}: {}", data.name, data.field(field))),
    );
    lines.join("\n")
}

pub fn species_info(key: RegionKey) -> String {
    let mut lines = vec![format!(
        "Common fish species in the {}:",
        reference::region(key).name
    )];
    lines.extend(reference::species_for(key).iter().map(|fish| {
        format!(
            "- {} ({}): {}, Conservation Status: {}",
            fish.name, fish.scientific_name, fish.habitat, fish.conservation_status
        )
    }));
    lines.join("\n")
}

pub fn threatened_species(region: Option<RegionKey>) -> String {
    let keys = match region {
        Some(key) => vec![key],
        None => RegionKey::ALL.to_vec(),
    };
    let header = match region {
        Some(key) => format!("Threatened species in the {}:", reference::region(key).name),
        None => "Threatened species across the oceans:".to_string(),
    };

    let mut lines = vec![header];
    for key in keys {
        let name = reference::region(key).name;
        for fish in reference::species_for(key).iter().filter(|fish| fish.is_threatened()) {
            if region.is_some() {
                lines.push(format!("- {}: {}", fish.name, fish.conservation_status));
            } else {
                lines.push(format!(
                    "- {} ({}): {}",
                    fish.name, name, fish.conservation_status
                ));
            }
        }
    }
    lines.join("\n")
}

pub fn ocean_facts(key: RegionKey) -> String {
    let data = reference::region(key);
    [
        format!("The {} is the world's {} ocean.", data.name, data.size_rank),
        format!("{}.", data.depth),
        format!("Surface waters average {}.", data.temperature),
        format!(
            "Dissolved oxygen ranges from {:.1} to {:.1} mg/L.",
            data.oxygen_min, data.oxygen_max
        ),
        format!("{}.", data.currents),
        format!("Bordering countries: {}.", data.countries.join(", ")),
        data.facts.to_string(),
    ]
    .join(" ")
}

fn region_of(ctx: &QueryContext) -> CoreResult<RegionKey> {
    ctx.region
        .ok_or_else(|| CoreError::UnknownRegion(ctx.text.clone()))
}

fn measurement_reply(ctx: &QueryContext) -> CoreResult<Draft> {
    let field = ctx
        .detect_field()
        .ok_or_else(|| CoreError::NoFieldDetected(ctx.text.clone()))?;

    let text = match ctx.region {
        Some(key) => field_sentence(key, field),
        None => list_field(field),
    };
    Ok(Draft::Text(text))
}

fn marine_life_reply(ctx: &QueryContext) -> CoreResult<Draft> {
    let asks_species = ctx.mentions_any(SPECIES_WORDS);

    if let (Some(key), true) = (ctx.region, asks_species) {
        return Ok(Draft::Text(species_info(key)));
    }
    if let Some(answer) = first_topic(ctx, &MARINE_LIFE_ANSWERS) {
        return Ok(Draft::text(answer));
    }
    if let Some(key) = ctx.region {
        return Ok(Draft::Text(species_info(key)));
    }
    if asks_species {
        return Ok(Draft::text(WHICH_OCEAN_SPECIES));
    }
    Ok(Draft::text(
        "I need more specific details to answer your question about marine life.",
    ))
}

fn conservation_reply(ctx: &QueryContext) -> CoreResult<Draft> {
    let text = if ctx.mentions_any(&["plastic", "pollution"]) {
        PLASTIC_ANSWER.to_string()
    } else if ctx.mentions_any(&["overfish", "overfishing", "fishing"]) {
        OVERFISHING_ANSWER.to_string()
    } else if ctx.mentions_any(&["coral", "reef"]) {
        REEF_ANSWER.to_string()
    } else if ctx.mentions_any(&["endangered", "threat", "threatened"]) {
        threatened_species(ctx.region)
    } else if ctx.mentions_any(&["protect", "conservation", "save", "sustainable", "preserve"]) {
        PROTECT_ANSWER.to_string()
    } else {
        "I need more specific details to answer your conservation question about the ocean."
            .to_string()
    };
    Ok(Draft::Text(text))
}

fn scientific_reply(ctx: &QueryContext) -> CoreResult<Draft> {
    let text = if ctx.mentions_any(&["acid", "acidification", "ph"]) {
        ACIDIFICATION_ANSWER
    } else if ctx.mentions_any(&["currents", "circulation", "gyre"]) {
        CIRCULATION_ANSWER
    } else if ctx.mentions_any(&["temperature", "warming", "heat"]) {
        WARMING_ANSWER
    } else if ctx.mentions_any(&["salinity"]) {
        SALINITY_ANSWER
    } else if ctx.mentions_any(&["argo", "float", "floats"]) {
        ARGO_ANSWER
    } else {
        "I need more specific details to answer your scientific question about the ocean."
    };
    Ok(Draft::text(text))
}

fn follow_up_reply(ctx: &QueryContext) -> CoreResult<Draft> {
    let text = if ctx.mentions_any(&["why", "how"]) {
        "That's an excellent follow-up question. The mechanisms behind ocean phenomena are fascinating and often involve complex interactions between physical, chemical, and biological processes."
    } else {
        "Would you like me to elaborate on any specific aspect of ocean science or conservation?"
    };
    Ok(Draft::text(text))
}

fn topic_reply(ctx: &QueryContext, facts: &[TopicFact], header: &str) -> String {
    let matched = facts
        .iter()
        .filter(|(keywords, _)| ctx.mentions_any(keywords))
        .map(|(_, fact)| format!("{fact}."))
        .collect::<Vec<_>>();

    if !matched.is_empty() {
        return matched.join(" ");
    }

    let mut lines = vec![header.to_string()];
    lines.extend(facts.iter().map(|(_, fact)| format!("- {fact}")));
    lines.join("\n")
}

fn first_topic(ctx: &QueryContext, facts: &[TopicFact]) -> Option<&'static str> {
    facts
        .iter()
        .find(|(keywords, _)| ctx.mentions_any(keywords))
        .map(|(_, answer)| *answer)
}

fn pick(options: &'static [&'static str], picker: &mut dyn VariantPicker) -> &'static str {
    let idx = picker.pick(options.len()).min(options.len().saturating_sub(1));
    options.get(idx).copied().unwrap_or_default()
}
