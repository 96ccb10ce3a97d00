use chrono::Utc;
use floatchat_agents::ChatAgent;
use floatchat_core::{
    compare_regions, field_lookup, general_info, IntentCategory, RegionKey, HISTORY_CAPACITY,
};
use floatchat_dataset::{mock_region, ArgoDataset};
use floatchat_observability::AppMetrics;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn agent() -> ChatAgent {
    ChatAgent::with_seed(77, AppMetrics::shared())
}

#[test]
fn conversation_covers_the_main_branches() {
    let mut agent = agent();

    let reply = agent.reply("Hello");
    assert_eq!(reply.intent, IntentCategory::Greeting);

    let reply = agent.reply("what is the salinity of the atlantic?");
    assert_eq!(reply.intent, IntentCategory::Measurement);
    assert_eq!(reply.region, Some(RegionKey::Atlantic));
    assert_eq!(
        reply.text,
        "The salinity in the Atlantic Ocean is 35.4 PSU average salinity."
    );

    let reply = agent.reply("compare the oxygen");
    assert!(reply.text.starts_with("Comparison of oxygen across oceans:"));

    let reply = agent.reply("antarctic");
    assert_eq!(reply.region, Some(RegionKey::Southern));
    assert_eq!(reply.text, general_info(RegionKey::Southern));

    let reply = agent.reply("how does plastic pollution hurt sea life");
    assert_eq!(reply.intent, IntentCategory::Conservation);
    assert!(reply.text.starts_with("Plastic pollution is a major threat"));
}

#[test]
fn history_stays_bounded_over_long_sessions() {
    let mut agent = agent();
    for idx in 0..40 {
        agent.reply(&format!("question number {idx} about the ocean"));
        assert!(agent.history().len() <= HISTORY_CAPACITY);
    }
}

#[test]
fn same_seed_same_phrasing() {
    let mut first = agent();
    let mut second = agent();
    for text in ["hi", "I love whales", "goodbye"] {
        assert_eq!(first.reply(text).text, second.reply(text).text);
    }
}

#[test]
fn lookups_never_panic_on_bad_tokens() {
    for region in ["", "mars", "PACIFIC", "  arctic "] {
        for field in ["", "temperature", "tides", "PH"] {
            let text = field_lookup(region, field);
            assert!(!text.is_empty());
        }
    }
    assert_eq!(field_lookup("mars", "depth"), "I don't have information about that ocean.");
}

#[test]
fn comparisons_list_five_oceans_in_order() {
    let names = ["Pacific", "Atlantic", "Indian", "Southern", "Arctic"];
    for field in ["temperature", "salinity", "oxygen", "depth"] {
        let text = compare_regions(field);
        let lines = text
            .lines()
            .filter(|line| line.starts_with("- "))
            .collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        for (line, name) in lines.iter().zip(names) {
            assert!(line.starts_with(&format!("- {name} Ocean:")), "{line}");
        }
    }
}

#[test]
fn mock_rows_respect_region_bounds() {
    let dataset = ArgoDataset::generate_with(&mut StdRng::seed_from_u64(123), Utc::now());
    assert_eq!(dataset.len(), 61 * 7 * 5);
    for row in dataset.rows() {
        let region = mock_region(&row.region).unwrap();
        assert!(region.contains(row));
    }
}
