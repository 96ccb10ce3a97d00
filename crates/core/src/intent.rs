use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{IntentCategory, RegionKey, Sentiment};

// Category → patterns, in tie-break order. A category scores one point per
// pattern found in the query.
const INTENT_PATTERNS: &[(IntentCategory, &[&str])] = &[
    (
        IntentCategory::Greeting,
        &[r"\bhello\b", r"\bhi\b", r"\bhey\b", r"\bgreetings\b", r"\bhowdy\b"],
    ),
    (
        IntentCategory::Farewell,
        &[r"\bbye\b", r"\bgoodbye\b", r"\bsee you\b", r"\bfarewell\b", r"\bquit\b", r"\bexit\b"],
    ),
    (
        IntentCategory::Measurement,
        &[
            r"\btemperature",
            r"\bsalinity",
            r"\boxygen",
            r"\bph\b",
            r"\bdepth",
            r"\bcurrents?\b",
            r"\blocation",
            r"\bwhere\b",
            r"\bcoordinates",
            r"\barea\b",
            r"\bsize\b",
            r"\bvolume",
            r"\bfacts?\b",
            r"\binteresting",
        ],
    ),
    (
        IntentCategory::MarineLife,
        &[
            r"\bfish(es)?\b",
            r"\bspecies",
            r"\bmarine\b",
            r"\bcoral",
            r"\bwhale",
            r"\bdolphin",
            r"\bshark",
            r"\bplankton",
            r"\bkrill",
            r"\bseals?\b",
            r"\bpenguin",
        ],
    ),
    (
        IntentCategory::Conservation,
        &[
            r"\bconservation",
            r"\bprotect",
            r"\bendangered",
            r"\bthreat",
            r"\bpollution",
            r"\bplastic",
            r"\boverfishing",
            r"\bsustainab",
            r"\bpreserv",
        ],
    ),
    (
        IntentCategory::HumanImpact,
        &[
            r"\bhumans?\b",
            r"\bimpact",
            r"\bfishing\b",
            r"\btourism",
            r"\bshipping",
            r"\bmining",
            r"\boffshore",
            r"\bdrilling",
        ],
    ),
    (
        IntentCategory::Climate,
        &[
            r"\bclimate",
            r"\bwarming",
            r"\bchang(e|es|ing)\b",
            r"\bel nino\b",
            r"\bla nina\b",
            r"\bweather",
            r"\bco2\b",
            r"\bcarbon",
            r"\bsea level",
        ],
    ),
    (
        IntentCategory::Scientific,
        &[
            r"\bdata\b",
            r"\bresearch",
            r"\bstudy\b",
            r"\bscience",
            r"\bscientific",
            r"\bargo\b",
            r"\bfloats?\b",
            r"\bmeasurements?\b",
            r"\bexperiment",
            r"\bacidification",
            r"\bcirculation",
        ],
    ),
    (
        IntentCategory::OceanInfo,
        &[
            r"\boceans?\b",
            r"\bsea\b",
            r"\boverview",
            r"\btell me about\b",
            r"\binformation\b",
        ],
    ),
];

static COMPILED_PATTERNS: Lazy<Vec<(IntentCategory, Vec<Regex>)>> = Lazy::new(|| {
    INTENT_PATTERNS
        .iter()
        .map(|(category, patterns)| {
            let compiled = patterns
                .iter()
                .map(|pattern| Regex::new(pattern).expect("valid intent pattern"))
                .collect();
            (*category, compiled)
        })
        .collect()
});

const REGION_KEYWORDS: &[(RegionKey, &[&str])] = &[
    (RegionKey::Pacific, &["pacific"]),
    (RegionKey::Atlantic, &["atlantic"]),
    (RegionKey::Indian, &["indian"]),
    (RegionKey::Southern, &["southern", "antarctic", "antarctica"]),
    (RegionKey::Arctic, &["arctic"]),
];

const SPELLING_CORRECTIONS: &[(&str, &str)] = &[
    ("pasific", "pacific"),
    ("atlantik", "atlantic"),
    ("artic", "arctic"),
    ("antartic", "southern"),
    ("temp", "temperature"),
    ("sal", "salinity"),
    ("salt", "salinity"),
    ("current", "currents"),
    ("flow", "currents"),
    ("deep", "depth"),
    ("warm", "temperature"),
    ("cold", "temperature"),
    ("hot", "temperature"),
    ("oxy", "oxygen"),
    ("o2", "oxygen"),
    ("acidity", "ph"),
];

const POSITIVE_WORDS: &[&str] = &["love", "great", "awesome", "amazing", "beautiful", "wonderful"];
const NEGATIVE_WORDS: &[&str] = &["hate", "terrible", "awful", "disgusting", "sad", "worried"];

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_lowercase()
}

pub fn correct_spelling(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            let lower = token.to_lowercase();
            let bare = lower.trim_matches(|ch: char| !ch.is_alphanumeric());
            SPELLING_CORRECTIONS
                .iter()
                .find(|(wrong, _)| *wrong == bare)
                .map(|(_, right)| (*right).to_string())
                .unwrap_or(lower)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn detect_region(text: &str) -> Option<RegionKey> {
    let lower = text.to_lowercase();
    REGION_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(key, _)| *key)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentScores {
    scores: Vec<(IntentCategory, usize)>,
}

impl IntentScores {
    pub fn score(&self, category: IntentCategory) -> usize {
        self.scores
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }

    pub fn best(&self) -> IntentCategory {
        let mut best: Option<(IntentCategory, usize)> = None;
        for (category, score) in &self.scores {
            if *score == 0 {
                continue;
            }
            match best {
                Some((_, top)) if *score <= top => {}
                _ => best = Some((*category, *score)),
            }
        }
        best.map(|(category, _)| category)
            .unwrap_or(IntentCategory::General)
    }
}

pub fn score_intents(text: &str) -> IntentScores {
    let lower = text.to_lowercase();
    let scores = COMPILED_PATTERNS
        .iter()
        .map(|(category, patterns)| {
            let hits = patterns
                .iter()
                .filter(|pattern| pattern.is_match(&lower))
                .count();
            (*category, hits)
        })
        .collect();

    IntentScores { scores }
}

pub fn classify_intent(text: &str) -> IntentCategory {
    score_intents(text).best()
}

pub fn detect_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive = count_hits(&lower, POSITIVE_WORDS);
    let negative = count_hits(&lower, NEGATIVE_WORDS);

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub(crate) fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

fn count_hits(input: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|needle| input.contains(*needle)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_is_a_greeting() {
        assert_eq!(classify_intent("hello"), IntentCategory::Greeting);
    }

    #[test]
    fn greeting_wins_ties_by_table_order() {
        // one greeting hit, one ocean_info hit
        assert_eq!(classify_intent("hello ocean"), IntentCategory::Greeting);
    }

    #[test]
    fn short_greetings_need_word_boundaries() {
        assert_ne!(classify_intent("which one is this"), IntentCategory::Greeting);
    }

    #[test]
    fn measurement_beats_ocean_info_on_tie() {
        assert_eq!(
            classify_intent("what is the temperature of the pacific ocean"),
            IntentCategory::Measurement
        );
    }

    #[test]
    fn highest_count_wins() {
        assert_eq!(
            classify_intent("is climate change and warming affecting temperature"),
            IntentCategory::Climate
        );
    }

    #[test]
    fn no_hits_is_general() {
        assert_eq!(classify_intent("pacific"), IntentCategory::General);
        assert_eq!(score_intents("pacific").score(IntentCategory::OceanInfo), 0);
    }

    #[test]
    fn corrects_known_misspellings() {
        assert_eq!(
            correct_spelling("Temp in the pasific?"),
            "temperature in the pacific"
        );
        assert_eq!(correct_spelling("salty water"), "salty water");
    }

    #[test]
    fn antarctic_maps_to_southern_before_arctic() {
        assert_eq!(detect_region("antarctic waters"), Some(RegionKey::Southern));
        assert_eq!(detect_region("the arctic"), Some(RegionKey::Arctic));
        assert_eq!(detect_region("the moon"), None);
    }

    #[test]
    fn sentiment_counts_words() {
        assert_eq!(detect_sentiment("I love this amazing ocean"), Sentiment::Positive);
        assert_eq!(detect_sentiment("I am worried and sad"), Sentiment::Negative);
        assert_eq!(detect_sentiment("love and hate"), Sentiment::Neutral);
    }

    #[test]
    fn normalizes_whitespace_and_case() {
        assert_eq!(normalize_text("  Hello   Pacific \n"), "hello pacific");
    }
}
