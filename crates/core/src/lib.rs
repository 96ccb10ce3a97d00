pub mod error;
pub mod history;
pub mod intent;
pub mod models;
pub mod reference;
pub mod responder;

pub use error::{CoreError, CoreResult, RUNTIME_FALLBACK};
pub use history::{ConversationHistory, HISTORY_CAPACITY};
pub use intent::{classify_intent, detect_region, detect_sentiment, normalize_text};
pub use models::*;
pub use responder::{
    answer, compare_regions, field_lookup, general_info, ocean_facts, region_info, respond,
    species_info, FirstVariant, QueryContext, VariantPicker,
};
