//! The key characters of Ancient Bharat and their knowledge tables.

use std::collections::BTreeMap;

use horizon_domain::{KnowledgeTopic, NpcDefinition, NpcId, Personality, Region, ResponseSet};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|line| line.to_string()).collect()
}

pub(super) fn npc_table() -> BTreeMap<NpcId, NpcDefinition> {
    let mut npcs = BTreeMap::new();
    for npc in [arunima(), devraj(), rukmini(), chandran()] {
        npcs.insert(npc.id.clone(), npc);
    }
    npcs
}

/// Veda Scholar Arunima - cryptic knowledge keeper in Indrapura City.
fn arunima() -> NpcDefinition {
    NpcDefinition {
        id: NpcId::new("arunima"),
        name: "Veda Scholar Arunima".to_string(),
        personality: Personality::Wise,
        home_region: Region::IndrapuraCity,
        topics: vec![
            KnowledgeTopic::new(
                "sarasvati_map",
                vec!["sarasvati", "map", "fragment"],
                ResponseSet {
                    stranger: lines(&[
                        "The Sarasvati Map... its fragments are scattered like thoughts in a sleeping mind.",
                        "Seven fragments, seven regions, seven truths to uncover.",
                    ]),
                    familiar: lines(&[
                        "The river's knowledge flows to those pure of purpose. Seek the ruins in the western sands.",
                        "The map shows not places, but the paths between worlds. The Dust Plains hold the first path.",
                    ]),
                    trusted: lines(&[
                        "You have proven yourself, seeker. The first fragment lies among the ancient ruins of the Dust Plains, where kingdoms once flourished.",
                    ]),
                },
            )
            .with_preference("old_maps"),
            KnowledgeTopic::new(
                "garuda",
                vec!["garuda", "eagle", "divine bird", "suparna"],
                ResponseSet {
                    stranger: lines(&[
                        "Garuda, the divine eagle and mount of Lord Vishnu, represents the eternal struggle between good and evil.",
                        "The classical texts describe the golden-feathered Suparna as messengers between mortals and gods.",
                    ]),
                    familiar: lines(&[
                        "Those who seek Garuda's descendants must prove their righteousness. Sacred mantras and offerings of soma are essential.",
                        "Born of Kashyapa and Vinata, the great eagles carry Garuda's own blood. Approach with a pure heart.",
                    ]),
                    trusted: lines(&[
                        "Listen closely, friend: the Suparna nest above the Prayer Flag Valley. Bring a golden feather and speak the old mantras.",
                    ]),
                },
            )
            .with_min_level(
                5,
                "The divine birds are not for the unprepared. Build your strength and wisdom first, then ask me again.",
            )
            .with_preference("divine_beasts"),
            KnowledgeTopic::new(
                "naga",
                vec!["naga", "serpent", "vasuki"],
                ResponseSet {
                    stranger: lines(&[
                        "The Nagas are ancient serpent beings, children of Kashyapa and Kadru, guarding treasures beneath the waters.",
                    ]),
                    familiar: lines(&[
                        "Approaching the Nagas requires wisdom, respect, and often precious gems as offerings.",
                    ]),
                    trusted: lines(&[
                        "Vasuki's kin dwell in the sacred ponds. Demonstrate wisdom and respect for water, and they may test you rather than turn you away.",
                    ]),
                },
            )
            .with_preference("divine_beasts"),
            KnowledgeTopic::new(
                "lore",
                vec!["story", "legend", "myth", "history", "ancient"],
                ResponseSet::uniform(lines(&[
                    "The ancient texts speak of a time when humans and beasts lived in harmony, sharing wisdom and power.",
                    "The Puranas tell us each creature carries a fragment of divine consciousness.",
                    "Long ago, great sages could commune with all creatures. That knowledge is now scattered like leaves in the wind.",
                ])),
            )
            .with_preference("ancient_lore"),
        ],
        fallback: ResponseSet {
            stranger: lines(&[
                "I spend my days unraveling the mysteries woven into the ancient texts. Perhaps you seek knowledge too?",
                "What is found only when lost, and lost only when found?",
                "The silent bell rings loudest for those who truly listen.",
            ]),
            familiar: lines(&[
                "Welcome back, seeker. The river that flows backwards holds the key to tomorrow's wisdom.",
                "Knowledge is like water - it takes the shape of its container.",
            ]),
            trusted: lines(&[
                "Ah, my dear student returns. The wise traveler carries questions, not just answers. What shall we unravel today?",
            ]),
        },
    }
}

/// Ranger Devraj - practical wilderness guide in the Narmada Forest.
fn devraj() -> NpcDefinition {
    NpcDefinition {
        id: NpcId::new("devraj"),
        name: "Ranger Devraj".to_string(),
        personality: Personality::Practical,
        home_region: Region::NarmadaForest,
        topics: vec![
            KnowledgeTopic::new(
                "danger",
                vec!["danger", "safe", "path", "route", "warning"],
                ResponseSet {
                    stranger: lines(&[
                        "Listen well: strange lights have been seen near the ancient trees lately.",
                        "Bandits have been spotted on the trade routes to the north. Keep to the marked paths.",
                    ]),
                    familiar: lines(&[
                        "Wild elephants use the eastern route at sunset - best avoid it then.",
                        "Monsoon season approaches; the river will flood the lower paths soon.",
                    ]),
                    trusted: lines(&[
                        "Between us: the village reports livestock going missing. Something stalks the forest, and I could use sharp eyes like yours.",
                    ]),
                },
            ),
            KnowledgeTopic::new(
                "sacred_grove",
                vec!["grove", "sacred", "spirit", "banyan"],
                ResponseSet {
                    stranger: lines(&[
                        "The sacred grove is guarded by more than just tradition, friend.",
                    ]),
                    familiar: lines(&[
                        "The banyan trees there are over five hundred years old. Approach the grove with respect.",
                    ]),
                    trusted: lines(&[
                        "The forest spirits accept those the grove has watched and found patient. Walk slowly, speak softly, and they will show themselves.",
                    ]),
                },
            )
            .with_preference("forest_spirits"),
            KnowledgeTopic::new(
                "tracking",
                vec!["track", "tame", "beast", "wilderness", "survival", "hunt"],
                ResponseSet {
                    stranger: lines(&[
                        "Forest creatures follow predictable patterns - water at dawn, feeding at dusk, shelter at midday.",
                        "Look for tracks near streams, broken branches, disturbed vegetation. Move quietly and stay downwind.",
                    ]),
                    familiar: lines(&[
                        "Never drink from still water in the forest; find the running streams.",
                        "The morning mist reveals paths that are hidden in bright sunlight.",
                    ]),
                    trusted: lines(&[
                        "You have a tracker's patience now. Each creature is unique - observe and adapt, and the forest will teach you the rest.",
                    ]),
                },
            )
            .with_preference("beast_tracking"),
        ],
        fallback: ResponseSet {
            stranger: lines(&[
                "I patrol these woods to keep travelers safe. The forest can be dangerous for those who don't know her ways.",
                "The banyan trees here have seen many travelers come and go.",
            ]),
            familiar: lines(&[
                "Back again? Good. The forest rewards persistence.",
            ]),
            trusted: lines(&[
                "Good to see you, friend. The woods feel safer with you walking them.",
            ]),
        },
    }
}

/// Village Elder Rukmini - community leader on the Ocean Frontier.
fn rukmini() -> NpcDefinition {
    NpcDefinition {
        id: NpcId::new("rukmini"),
        name: "Village Elder Rukmini".to_string(),
        personality: Personality::Friendly,
        home_region: Region::OceanFrontier,
        topics: vec![
            KnowledgeTopic::new(
                "village",
                vec!["village", "help", "community", "people", "task"],
                ResponseSet {
                    stranger: lines(&[
                        "Our village faces many challenges: our fishing nets were damaged in the storm, and we need new rope from the market.",
                        "The lighthouse keeper is ill - someone must tend the beacon tonight.",
                    ]),
                    familiar: lines(&[
                        "The merchant caravan is three days overdue - they may need rescue.",
                        "Our shrine needs fresh flowers; the marigolds bloom in the hills.",
                    ]),
                    trusted: lines(&[
                        "You have done so much for us already. If you gather building materials, we can restore the old temple together, the traditional way.",
                    ]),
                },
            )
            .with_preference("village_life"),
            KnowledgeTopic::new(
                "old_maps",
                vec!["map", "river", "sarasvati", "song"],
                ResponseSet {
                    stranger: lines(&[
                        "The old songs tell of a map that could heal the broken rivers.",
                    ]),
                    familiar: lines(&[
                        "My grandmother spoke of times when the sea glowed with inner light, and of scholars who kept the river's map.",
                    ]),
                    trusted: lines(&[
                        "Seek out Arunima in the great city, child. She possesses knowledge of the ancient mysteries and the map's scattered fragments.",
                    ]),
                },
            )
            .with_preference("village_lore"),
        ],
        fallback: ResponseSet {
            stranger: lines(&[
                "Welcome to our humble village! We don't see many travelers these days. How can we help you?",
                "This village was founded by refugees from a great flood, centuries ago.",
                "Travelers from all five regions once gathered here for the festival.",
            ]),
            familiar: lines(&[
                "It warms my heart to see you again, traveler.",
                "The lighthouse was built on the foundation of an ancient temple, you know.",
            ]),
            trusted: lines(&[
                "Ah, child, you are always welcome at our fire. Sit, and tell me of your travels.",
            ]),
        },
    }
}

/// Hermit Chandran - reclusive mystic of the Himalayan Peaks.
fn chandran() -> NpcDefinition {
    NpcDefinition {
        id: NpcId::new("chandran"),
        name: "Hermit Chandran".to_string(),
        personality: Personality::Mysterious,
        home_region: Region::HimalayanPeaks,
        topics: vec![
            KnowledgeTopic::new(
                "meditation",
                vec!["meditate", "meditation", "silence", "peace", "sage"],
                ResponseSet {
                    stranger: lines(&[
                        "The mountain does not speak to those who are still full of the valley's noise.",
                    ]),
                    familiar: lines(&[
                        "Sit where the prayer flags end and the wind begins. Count breaths until counting stops.",
                    ]),
                    trusted: lines(&[
                        "You begin to hear it, don't you? The silence between heartbeats. That is where the old sages kept their maps.",
                    ]),
                },
            ),
            KnowledgeTopic::new(
                "sarasvati_map",
                vec!["sarasvati", "map", "fragment", "river"],
                ResponseSet {
                    stranger: lines(&[
                        "Rivers remember what people forget. Ask the scholar in the city of gold.",
                    ]),
                    familiar: lines(&[
                        "A fragment sleeps under ice somewhere above the monastery. The mountain decides who finds it.",
                    ]),
                    trusted: lines(&[
                        "When you have walked all five regions, come back to me. The seventh fragment is not a place at all.",
                    ]),
                },
            )
            .with_preference("old_maps"),
        ],
        fallback: ResponseSet {
            stranger: lines(&[
                "Few climb this high without a reason. Fewer still know their reason.",
                "The snow keeps all secrets equally well.",
            ]),
            familiar: lines(&[
                "The wind mentioned you would return.",
            ]),
            trusted: lines(&[
                "Sit. The tea is cold, but the view is warm.",
            ]),
        },
    }
}
