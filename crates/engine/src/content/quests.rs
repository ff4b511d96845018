//! The quest catalog: the Sarasvati Map main chain plus side work.

use horizon_domain::{
    CompletionRule, ItemId, NpcId, QuestDefinition, QuestId, QuestObjective, QuestReward, Region,
};

pub(super) fn quest_table() -> Vec<QuestDefinition> {
    vec![
        scholars_call(),
        first_fragment(),
        forest_secret(),
        village_rebuild(),
        rangers_wisdom(),
        ancient_scripts(),
    ]
}

/// Main quest 1: meet Arunima in the great city.
fn scholars_call() -> QuestDefinition {
    QuestDefinition {
        id: QuestId::new("main_001_scholars_call"),
        title: "The Scholar's Call".to_string(),
        description: "Meet Arunima, the Veda Scholar, in Indrapura City to learn about the lost Sarasvati Map.".to_string(),
        giver: NpcId::new("rukmini"),
        prerequisites: vec![],
        objectives: vec![
            QuestObjective::new(
                "travel_to_city",
                "Travel to Indrapura City",
                CompletionRule::EnterRegion {
                    region: Region::IndrapuraCity,
                },
            ),
            QuestObjective::new(
                "meet_arunima",
                "Speak with Arunima, the Veda Scholar",
                CompletionRule::TalkToNpc {
                    npc: NpcId::new("arunima"),
                },
            ),
        ],
        reward: QuestReward {
            experience: 100,
            items: vec![],
            reputation: vec![(NpcId::new("arunima"), 10)],
        },
    }
}

/// Main quest 2: recover the first map fragment from the Dust Plains.
fn first_fragment() -> QuestDefinition {
    QuestDefinition {
        id: QuestId::new("main_002_first_fragment"),
        title: "Echoes in the Dust".to_string(),
        description: "Search the Dust Plains for the first Sarasvati Map fragment near the ancient ruins.".to_string(),
        giver: NpcId::new("arunima"),
        prerequisites: vec![QuestId::new("main_001_scholars_call")],
        objectives: vec![
            QuestObjective::new(
                "explore_dust_plains",
                "Explore the Dust Plains region",
                CompletionRule::EnterRegion {
                    region: Region::DustPlains,
                },
            ),
            QuestObjective::new(
                "collect_fragment_1",
                "Collect the first Sarasvati Map fragment",
                CompletionRule::CollectItem {
                    item: ItemId::new("sarasvati_fragment"),
                    count: 1,
                },
            ),
        ],
        reward: QuestReward {
            experience: 250,
            items: vec![ItemId::new("ancient_scroll")],
            reputation: vec![(NpcId::new("arunima"), 15)],
        },
    }
}

/// Main quest 3: the second fragment sleeps in the Narmada Forest.
fn forest_secret() -> QuestDefinition {
    QuestDefinition {
        id: QuestId::new("main_003_forest_secret"),
        title: "The Forest's Secret".to_string(),
        description: "Venture into Narmada Forest and earn the grove's trust to find the second fragment.".to_string(),
        giver: NpcId::new("arunima"),
        prerequisites: vec![QuestId::new("main_002_first_fragment")],
        objectives: vec![
            QuestObjective::new(
                "enter_narmada_forest",
                "Enter the Narmada Forest",
                CompletionRule::EnterRegion {
                    region: Region::NarmadaForest,
                },
            ),
            QuestObjective::new(
                "collect_fragment_2",
                "Recover the fragment sleeping in the spirit grove",
                CompletionRule::CollectItem {
                    item: ItemId::new("sarasvati_fragment"),
                    count: 1,
                },
            ),
            QuestObjective::new(
                "learn_of_the_grove",
                "Ask Ranger Devraj what the grove has shown you",
                CompletionRule::DiscussTopic {
                    topic: "sacred_grove".to_string(),
                },
            ),
        ],
        reward: QuestReward {
            experience: 350,
            items: vec![ItemId::new("forest_blessing")],
            reputation: vec![(NpcId::new("devraj"), 20), (NpcId::new("arunima"), 10)],
        },
    }
}

/// Side quest: help Rukmini's village rebuild.
fn village_rebuild() -> QuestDefinition {
    QuestDefinition {
        id: QuestId::new("side_001_village_rebuild"),
        title: "Rebuilding the Past".to_string(),
        description: "Help Rukmini gather traditional materials to restore the village."
            .to_string(),
        giver: NpcId::new("rukmini"),
        prerequisites: vec![],
        objectives: vec![
            QuestObjective::new(
                "collect_materials",
                "Collect traditional building materials",
                CompletionRule::CollectItem {
                    item: ItemId::new("building_materials"),
                    count: 3,
                },
            ),
            QuestObjective::new(
                "deliver_materials",
                "Bring word of the materials to Elder Rukmini",
                CompletionRule::DiscussTopic {
                    topic: "village".to_string(),
                },
            ),
        ],
        reward: QuestReward {
            experience: 200,
            items: vec![],
            reputation: vec![(NpcId::new("rukmini"), 25)],
        },
    }
}

/// Side quest: learn wilderness craft from Devraj.
fn rangers_wisdom() -> QuestDefinition {
    QuestDefinition {
        id: QuestId::new("side_002_rangers_wisdom"),
        title: "Paths of the Ranger".to_string(),
        description: "Learn wilderness survival from Devraj, the experienced ranger.".to_string(),
        giver: NpcId::new("devraj"),
        prerequisites: vec![],
        objectives: vec![
            QuestObjective::new(
                "find_the_ranger",
                "Find Ranger Devraj in the Narmada Forest",
                CompletionRule::TalkToNpc {
                    npc: NpcId::new("devraj"),
                },
            ),
            QuestObjective::new(
                "learn_tracking",
                "Ask Devraj about tracking the forest beasts",
                CompletionRule::DiscussTopic {
                    topic: "tracking".to_string(),
                },
            ),
        ],
        reward: QuestReward {
            experience: 300,
            items: vec![ItemId::new("tracking_tools")],
            reputation: vec![(NpcId::new("devraj"), 30)],
        },
    }
}

/// Cultural quest: gather Sanskrit inscriptions for translation.
fn ancient_scripts() -> QuestDefinition {
    QuestDefinition {
        id: QuestId::new("cultural_001_ancient_scripts"),
        title: "Deciphering Ancient Scripts".to_string(),
        description: "Find ancient Sanskrit inscriptions across the world and bring them to Arunima.".to_string(),
        giver: NpcId::new("arunima"),
        prerequisites: vec![],
        objectives: vec![
            QuestObjective::new(
                "find_inscriptions",
                "Find ancient Sanskrit inscriptions",
                CompletionRule::CollectItem {
                    item: ItemId::new("sanskrit_inscription"),
                    count: 3,
                },
            ),
            QuestObjective::new(
                "translate_texts",
                "Return to Arunima to translate the texts",
                CompletionRule::TalkToNpc {
                    npc: NpcId::new("arunima"),
                },
            ),
        ],
        reward: QuestReward {
            experience: 500,
            items: vec![ItemId::new("scholar_robes")],
            reputation: vec![(NpcId::new("arunima"), 50)],
        },
    }
}
