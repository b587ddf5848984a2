//! Built-in demo rosters
//!
//! Fixed (non-random) nine-man lineups with a spread of hitter archetypes,
//! used by the CLI `--demo` flag and by tests that want realistic variety.

use std::collections::BTreeMap;

use crate::models::{
    BattingRatings, FieldingRatings, Hand, Leash, PitchType, PitchingRatings, Player, PlayerId,
    Position, Team,
};

struct Archetype {
    label: &'static str,
    position: Position,
    bats: Hand,
    // contact, power, discipline, eye, speed, baserunning, steal_tendency
    batting: [u8; 7],
    // fielding, throw_power, throw_accuracy, catch_sequence
    fielding: [u8; 4],
}

/// Batting order, leadoff first. The pitcher bats ninth.
const LINEUP: [Archetype; 9] = [
    Archetype {
        label: "Leadoff",
        position: Position::CenterField,
        bats: Hand::Left,
        batting: [68, 35, 62, 60, 85, 80, 75],
        fielding: [75, 60, 60, 50],
    },
    Archetype {
        label: "Table Setter",
        position: Position::SecondBase,
        bats: Hand::Right,
        batting: [72, 40, 58, 62, 65, 65, 45],
        fielding: [70, 55, 65, 50],
    },
    Archetype {
        label: "Slugger",
        position: Position::FirstBase,
        bats: Hand::Left,
        batting: [58, 85, 60, 55, 35, 40, 5],
        fielding: [55, 50, 55, 50],
    },
    Archetype {
        label: "Cleanup",
        position: Position::RightField,
        bats: Hand::Right,
        batting: [60, 78, 50, 52, 50, 50, 15],
        fielding: [60, 80, 60, 50],
    },
    Archetype {
        label: "Corner Bat",
        position: Position::ThirdBase,
        bats: Hand::Right,
        batting: [55, 65, 45, 48, 45, 45, 10],
        fielding: [65, 75, 60, 50],
    },
    Archetype {
        label: "Switch Hitter",
        position: Position::LeftField,
        bats: Hand::Switch,
        batting: [62, 50, 55, 55, 60, 60, 35],
        fielding: [55, 55, 55, 50],
    },
    Archetype {
        label: "Glove Shortstop",
        position: Position::Shortstop,
        bats: Hand::Right,
        batting: [52, 30, 45, 45, 70, 65, 40],
        fielding: [85, 75, 70, 50],
    },
    Archetype {
        label: "Catcher",
        position: Position::Catcher,
        bats: Hand::Right,
        batting: [45, 45, 50, 50, 25, 35, 2],
        fielding: [65, 70, 65, 70],
    },
    Archetype {
        label: "Starter",
        position: Position::Pitcher,
        bats: Hand::Right,
        batting: [15, 10, 20, 20, 30, 30, 0],
        fielding: [55, 60, 60, 50],
    },
];

fn starter_ratings() -> PitchingRatings {
    PitchingRatings {
        control: 60,
        accuracy: 62,
        stuff: 60,
        pickoff: 55,
        sequencing: 58,
        stamina: 65,
        arsenal: vec![PitchType::Fastball, PitchType::Slider, PitchType::Changeup, PitchType::Curveball],
        leash: Leash::Normal,
    }
}

/// Valid demo team. Player ids are `id_base + 1 ..= id_base + 9` in batting
/// order.
pub fn demo_team(id: &str, name: &str, id_base: u32) -> Team {
    let mut players = Vec::with_capacity(LINEUP.len());
    let mut defense = BTreeMap::new();
    let mut pitcher = PlayerId(id_base + 1);

    for (i, arch) in LINEUP.iter().enumerate() {
        let pid = id_base + i as u32 + 1;
        let [contact, power, discipline, eye, speed, baserunning, steal_tendency] = arch.batting;
        let [fielding, throw_power, throw_accuracy, catch_sequence] = arch.fielding;

        let mut player = Player::new(pid, format!("{name} {}", arch.label), arch.position);
        player.bats = arch.bats;
        player.batting =
            BattingRatings { contact, power, discipline, eye, speed, baserunning, steal_tendency };
        player.fielding = FieldingRatings { fielding, throw_power, throw_accuracy, catch_sequence };

        if arch.position == Position::Pitcher {
            player = player.with_pitching(starter_ratings());
            pitcher = player.id;
        } else {
            defense.insert(arch.position, player.id);
        }
        players.push(player);
    }

    Team {
        id: id.to_string(),
        name: name.to_string(),
        batting_order: players.iter().map(|p| p.id).collect(),
        players,
        order_index: 0,
        pitcher,
        defense,
    }
}

/// (away, home)
pub fn demo_matchup() -> (Team, Team) {
    (demo_team("AWY", "Visitors", 100), demo_team("HOM", "Hosts", 200))
}
