use crate::models::{RegionKey, RegionRecord, SpeciesRecord};

static REGIONS: [RegionRecord; 5] = [
    RegionRecord {
        key: RegionKey::Pacific,
        name: "Pacific Ocean",
        temperature: "22.5°C (72.5°F) average surface temperature",
        salinity: "34.7 PSU average salinity",
        oxygen: "4.5-6.2 mg/L (varies by depth and location)",
        oxygen_min: 4.5,
        oxygen_max: 6.2,
        ph_level: "7.8-8.3 (slightly alkaline)",
        currents: "Major currents: Kuroshio, California, Humboldt, East Australian",
        depth: "Average depth: 4,280m (14,040ft), Maximum: 10,911m (Mariana Trench)",
        coordinates: "0°N 160°W (approximate center)",
        area: "165,250,000 km² (63,800,000 sq mi)",
        volume: "710,000,000 km³ (170,000,000 cu mi)",
        facts: "The Pacific Ocean is the largest and deepest ocean, covering about 30% of Earth's surface.",
        data_source: "ARGO Float WMO 4901254, 2023-09-15",
        countries: &[
            "United States",
            "Canada",
            "Mexico",
            "Japan",
            "Australia",
            "China",
            "Chile",
            "Peru",
        ],
        size_rank: "largest",
    },
    RegionRecord {
        key: RegionKey::Atlantic,
        name: "Atlantic Ocean",
        temperature: "18.9°C (66.0°F) average surface temperature",
        salinity: "35.4 PSU average salinity",
        oxygen: "5.0-6.5 mg/L (higher in northern regions)",
        oxygen_min: 5.0,
        oxygen_max: 6.5,
        ph_level: "7.9-8.4 (slightly alkaline)",
        currents: "Major currents: Gulf Stream, North Atlantic Drift, Canary, Benguela",
        depth: "Average depth: 3,646m (11,962ft), Maximum: 8,376m (Puerto Rico Trench)",
        coordinates: "0°N 30°W (approximate center)",
        area: "106,460,000 km² (41,100,000 sq mi)",
        volume: "310,410,900 km³ (74,471,500 cu mi)",
        facts: "The Atlantic Ocean is the second largest and saltiest ocean, crucial for global thermohaline circulation.",
        data_source: "ARGO Float WMO 3901402, 2023-09-10",
        countries: &[
            "United States",
            "Brazil",
            "United Kingdom",
            "France",
            "Spain",
            "South Africa",
            "Nigeria",
        ],
        size_rank: "second largest",
    },
    RegionRecord {
        key: RegionKey::Indian,
        name: "Indian Ocean",
        temperature: "26.0°C (78.8°F) average surface temperature",
        salinity: "34.8 PSU average salinity",
        oxygen: "4.2-5.8 mg/L (lower in northern regions)",
        oxygen_min: 4.2,
        oxygen_max: 5.8,
        ph_level: "7.8-8.3 (slightly alkaline)",
        currents: "Major currents: Agulhas, West Australian, Monsoon Drift",
        depth: "Average depth: 3,741m (12,274ft), Maximum: 7,258m (Java Trench)",
        coordinates: "20°S 80°E (approximate center)",
        area: "70,560,000 km² (27,240,000 sq mi)",
        volume: "264,000,000 km³ (63,000,000 cu mi)",
        facts: "The Indian Ocean is the warmest ocean, significantly influencing monsoon patterns in Asia.",
        data_source: "ARGO Float WMO 2902267, 2023-09-12",
        countries: &[
            "India",
            "Indonesia",
            "Australia",
            "South Africa",
            "Maldives",
            "Sri Lanka",
            "Thailand",
        ],
        size_rank: "third largest",
    },
    RegionRecord {
        key: RegionKey::Southern,
        name: "Southern Ocean",
        temperature: "2.0°C (35.6°F) average surface temperature",
        salinity: "34.2 PSU average salinity",
        oxygen: "6.0-8.0 mg/L (higher due to cold water)",
        oxygen_min: 6.0,
        oxygen_max: 8.0,
        ph_level: "7.9-8.2 (slightly alkaline)",
        currents: "Major current: Antarctic Circumpolar Current",
        depth: "Average depth: 4,500m (14,800ft), Maximum: 7,235m (South Sandwich Trench)",
        coordinates: "65°S 90°E (approximate center)",
        area: "21,960,000 km² (8,480,000 sq mi)",
        volume: "71,800,000 km³ (17,200,000 cu mi)",
        facts: "The Southern Ocean connects the Atlantic, Pacific, and Indian Oceans and plays a key role in global climate regulation.",
        data_source: "ARGO Float WMO 5904463, 2023-09-05",
        countries: &["No sovereign nations, surrounds Antarctica"],
        size_rank: "fourth largest",
    },
    RegionRecord {
        key: RegionKey::Arctic,
        name: "Arctic Ocean",
        temperature: "-1.5°C (29.3°F) average surface temperature",
        salinity: "30.5 PSU average salinity",
        oxygen: "7.0-9.0 mg/L (highest due to very cold water)",
        oxygen_min: 7.0,
        oxygen_max: 9.0,
        ph_level: "7.8-8.1 (slightly alkaline)",
        currents: "Major currents: Beaufort Gyre, Transpolar Drift",
        depth: "Average depth: 1,205m (3,953ft), Maximum: 5,550m (Eurasia Basin)",
        coordinates: "90°N 0°E (North Pole)",
        area: "15,558,000 km² (6,006,000 sq mi)",
        volume: "18,750,000 km³ (4,500,000 cu mi)",
        facts: "The Arctic Ocean is the smallest and shallowest ocean, experiencing significant sea ice loss due to climate change.",
        data_source: "ARGO Float WMO 7900542, 2023-09-18",
        countries: &[
            "United States (Alaska)",
            "Canada",
            "Russia",
            "Norway",
            "Greenland (Denmark)",
            "Iceland",
        ],
        size_rank: "smallest",
    },
];

const fn species(
    name: &'static str,
    scientific_name: &'static str,
    habitat: &'static str,
    conservation_status: &'static str,
) -> SpeciesRecord {
    SpeciesRecord {
        name,
        scientific_name,
        habitat,
        conservation_status,
    }
}

static PACIFIC_SPECIES: [SpeciesRecord; 4] = [
    species("Pacific Salmon", "Oncorhynchus spp.", "Coastal and open ocean", "Varies by species"),
    species("Bluefin Tuna", "Thunnus orientalis", "Open ocean", "Endangered"),
    species("Clownfish", "Amphiprioninae", "Coral reefs", "Least Concern"),
    species("Manta Ray", "Mobula birostris", "Open ocean", "Vulnerable"),
];

static ATLANTIC_SPECIES: [SpeciesRecord; 4] = [
    species("Atlantic Cod", "Gadus morhua", "Coastal and deep water", "Vulnerable"),
    species("Blue Marlin", "Makaira nigricans", "Open ocean", "Vulnerable"),
    species("Humpback Whale", "Megaptera novaeangliae", "Open ocean", "Least Concern"),
    species("American Lobster", "Homarus americanus", "Coastal seabed", "Least Concern"),
];

static INDIAN_SPECIES: [SpeciesRecord; 4] = [
    species("Manta Ray", "Mobula alfredi", "Coral reefs", "Vulnerable"),
    species("Coral Trout", "Plectropomus leopardus", "Coral reefs", "Least Concern"),
    species("Whale Shark", "Rhincodon typus", "Open ocean", "Endangered"),
    species("Clownfish", "Amphiprion ocellaris", "Coral reefs", "Least Concern"),
];

static SOUTHERN_SPECIES: [SpeciesRecord; 4] = [
    species("Antarctic Krill", "Euphausia superba", "Open ocean", "Least Concern"),
    species("Patagonian Toothfish", "Dissostichus eleginoides", "Deep water", "Vulnerable"),
    species("Emperor Penguin", "Aptenodytes forsteri", "Coastal and ice", "Near Threatened"),
    species("Weddell Seal", "Leptonychotes weddellii", "Coastal and ice", "Least Concern"),
];

static ARCTIC_SPECIES: [SpeciesRecord; 4] = [
    species("Arctic Cod", "Boreogadus saida", "Coastal and open ocean", "Least Concern"),
    species("Greenland Shark", "Somniosus microcephalus", "Deep water", "Vulnerable"),
    species("Narwhal", "Monodon monoceros", "Open ocean", "Near Threatened"),
    species("Beluga Whale", "Delphinapterus leucas", "Coastal and open ocean", "Least Concern"),
];

pub fn regions() -> &'static [RegionRecord] {
    &REGIONS
}

pub fn region(key: RegionKey) -> &'static RegionRecord {
    match key {
        RegionKey::Pacific => &REGIONS[0],
        RegionKey::Atlantic => &REGIONS[1],
        RegionKey::Indian => &REGIONS[2],
        RegionKey::Southern => &REGIONS[3],
        RegionKey::Arctic => &REGIONS[4],
    }
}

pub fn species_for(key: RegionKey) -> &'static [SpeciesRecord] {
    match key {
        RegionKey::Pacific => &PACIFIC_SPECIES,
        RegionKey::Atlantic => &ATLANTIC_SPECIES,
        RegionKey::Indian => &INDIAN_SPECIES,
        RegionKey::Southern => &SOUTHERN_SPECIES,
        RegionKey::Arctic => &ARCTIC_SPECIES,
    }
}

pub type TopicFact = (&'static [&'static str], &'static str);

pub static CLIMATE_FACTS: [TopicFact; 5] = [
    (
        &["temperature", "warming", "heat"],
        "Global ocean surface temperature increased by 0.88°C since 1900",
    ),
    (
        &["sea level", "sea-level"],
        "Global mean sea level has risen about 20cm since 1900",
    ),
    (
        &["acidification", "ph", "co2", "carbon"],
        "Ocean pH has decreased by 0.1 units (30% increase in acidity)",
    ),
    (
        &["current", "circulation"],
        "Major ocean currents are slowing due to meltwater input",
    ),
    (
        &["extreme", "heatwave", "weather", "el nino", "la nina"],
        "Increased frequency of marine heatwaves and harmful algal blooms",
    ),
];

pub static HUMAN_IMPACT_FACTS: [TopicFact; 5] = [
    (&["fishing", "catch"], "Global fish catch peaked at 86 million tons in 1996"),
    (&["shipping", "trade"], "90% of world trade is carried by sea"),
    (&["tourism", "tourist"], "Coastal tourism generates billions of dollars annually"),
    (&["mining"], "Deep-sea mining threatens unique ecosystems"),
    (
        &["offshore", "drilling", "oil", "wind"],
        "Offshore wind and oil extraction impact marine environments",
    ),
];

pub const ACIDIFICATION_ANSWER: &str = "Ocean acidification is the ongoing decrease in the pH of the Earth's oceans, caused by the uptake of carbon dioxide (CO₂) from the atmosphere. Since the Industrial Revolution, the pH of surface ocean waters has fallen by 0.1 pH units, representing a 30% increase in acidity. This affects marine organisms, particularly those with calcium carbonate shells or skeletons like corals and shellfish.";

pub const CIRCULATION_ANSWER: &str = "Ocean currents are driven by wind, water density differences, and tides. Major surface currents form large circular patterns called gyres. The thermohaline circulation is a deep-ocean current driven by differences in water density caused by temperature (thermo) and salinity (haline). This 'global conveyor belt' plays a crucial role in regulating Earth's climate.";

pub const WARMING_ANSWER: &str = "The ocean has absorbed more than 90% of the excess heat trapped by greenhouse gases. Sea surface temperatures have increased by approximately 0.88°C since 1900. Marine heatwaves have become more frequent and intense, causing coral bleaching and disrupting marine ecosystems.";

pub const SALINITY_ANSWER: &str = "Ocean salinity varies by region, with higher salinity in subtropical regions where evaporation exceeds precipitation, and lower salinity near the equator and poles where rainfall and meltwater dilute seawater. The average ocean salinity is about 35 parts per thousand. Changes in salinity patterns can indicate shifts in the global water cycle.";

pub const ARGO_ANSWER: &str = "The ARGO program is an international collaboration that collects high-quality temperature and salinity profiles from the upper 2000m of the ice-free global ocean. Autonomous floats drift at depth, surface roughly every ten days, and transmit their measurements by satellite.";

pub const PLASTIC_ANSWER: &str = "Plastic pollution is a major threat to marine environments. An estimated 8 million metric tons of plastic enter the ocean each year. Plastic debris harms marine life through entanglement and ingestion. Microplastics have been found throughout the water column and in marine organisms, with unknown long-term effects on ecosystems and human health.";

pub const OVERFISHING_ANSWER: &str = "Overfishing occurs when fish are caught faster than they can reproduce. According to the UN FAO, about 90% of global fish stocks are either overfished or fully exploited. Sustainable fishing practices, marine protected areas, and consumer awareness are important solutions to this problem.";

pub const REEF_ANSWER: &str = "Coral reefs are among the most biodiverse ecosystems on Earth, but they are severely threatened. About 50% of the world's coral reefs have been lost in the last 30 years due to climate change, pollution, overfishing, and disease. Coral bleaching events have become more frequent and severe as ocean temperatures rise.";

pub const PROTECT_ANSWER: &str = "There are many ways to help protect the ocean: reduce plastic use, choose sustainable seafood, support marine protected areas, reduce carbon footprint, avoid products that harm marine life, and support organizations working on ocean conservation. Individual actions combined with policy changes can make a significant difference.";

pub static MARINE_LIFE_ANSWERS: [TopicFact; 8] = [
    (
        &["whale"],
        "Whales are magnificent marine mammals that play crucial roles in ocean ecosystems. Baleen whales like blue whales filter-feed on krill, while toothed whales like orcas hunt fish and marine mammals. Many whale species were brought to near extinction by commercial whaling but some populations are recovering thanks to international protection efforts.",
    ),
    (
        &["shark"],
        "Sharks are ancient predators that have existed for over 400 million years. Contrary to popular belief, most shark species are not dangerous to humans. Sharks play vital roles as apex predators in maintaining healthy ocean ecosystems. Many shark populations are declining due to overfishing, particularly for the shark fin trade.",
    ),
    (
        &["coral"],
        "Corals are marine invertebrates that form colonies. Each coral polyp is a tiny animal that secretes a hard exoskeleton of calcium carbonate. Coral reefs are built by many such polyps over thousands of years. Corals have a symbiotic relationship with photosynthetic algae called zooxanthellae, which provide them with energy.",
    ),
    (
        &["plankton"],
        "Plankton are small organisms that drift in ocean currents. Phytoplankton are microscopic plants that perform photosynthesis, producing about 50% of the world's oxygen. Zooplankton are tiny animals that feed on phytoplankton. Together, they form the base of most marine food webs.",
    ),
    (
        &["krill"],
        "Antarctic krill are small crustaceans that swarm in enormous numbers in the Southern Ocean. They are a keystone species, feeding whales, seals, penguins, and fish.",
    ),
    (
        &["penguin"],
        "Emperor penguins breed on Antarctic sea ice and dive to hunt fish and krill. Loss of sea ice puts their colonies at risk, and the species is listed as Near Threatened.",
    ),
    (
        &["seal"],
        "Seals such as the Weddell seal live along the Antarctic coast and under the sea ice, holding their breath for over an hour while hunting fish and squid.",
    ),
    (
        &["dolphin"],
        "Dolphins are highly intelligent toothed whales that live in social groups called pods. They use echolocation to hunt and communicate with a rich repertoire of clicks and whistles.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_table_follows_key_order() {
        let keys = regions().iter().map(|record| record.key).collect::<Vec<_>>();
        assert_eq!(keys, RegionKey::ALL.to_vec());
        for key in RegionKey::ALL {
            assert_eq!(region(key).key, key);
        }
    }

    #[test]
    fn every_region_has_species() {
        for key in RegionKey::ALL {
            assert_eq!(species_for(key).len(), 4);
        }
    }

    #[test]
    fn oxygen_bounds_are_ordered() {
        for record in regions() {
            assert!(record.oxygen_min < record.oxygen_max, "{}", record.name);
        }
    }
}
