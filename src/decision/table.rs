//! The SSVC deployer decision tree as a fixed lookup table.
//!
//! Indexed by the ordinals of Exploitation, Automatable, Technical Impact
//! and Mission & Well-being. The array shape makes every one of the 36
//! leaves explicit.

use crate::models::{
    Action, AttackComplexity, Automatable, Exploitation, MissionImpact, PrivilegesRequired,
    TechnicalImpact, UserInteraction, Vocabulary,
};

use Action::{Act, Attend, Track, TrackStar};

/// `[exploitation][automatable][technical impact][mission]`, mission ordered low, medium, high.
pub const ACTION_TABLE: [[[[Action; 3]; 2]; 2]; 3] = [
    // Exploitation: none
    [
        // Automatable: no
        [[Track, Track, Track], [Track, Track, TrackStar]],
        // Automatable: yes
        [[Track, Track, Track], [Track, Track, Attend]],
    ],
    // Exploitation: poc
    [
        [[TrackStar, TrackStar, TrackStar], [TrackStar, TrackStar, Attend]],
        [[TrackStar, TrackStar, TrackStar], [TrackStar, Attend, Attend]],
    ],
    // Exploitation: active
    [
        [[Attend, Attend, Attend], [Attend, Act, Act]],
        [[Act, Act, Act], [Act, Act, Act]],
    ],
];

/// `[attack complexity][privileges required][user interaction]`.
/// Automatable only with low complexity, no privileges and no user interaction.
pub const AUTOMATABLE_TABLE: [[[Automatable; 2]; 3]; 2] = [
    // Attack complexity: low
    [
        [Automatable::Yes, Automatable::No],
        [Automatable::No, Automatable::No],
        [Automatable::No, Automatable::No],
    ],
    // Attack complexity: high
    [
        [Automatable::No, Automatable::No],
        [Automatable::No, Automatable::No],
        [Automatable::No, Automatable::No],
    ],
];

pub fn action_for(
    exploitation: Exploitation,
    automatable: Automatable,
    technical_impact: TechnicalImpact,
    mission_impact: MissionImpact,
) -> Action {
    ACTION_TABLE[exploitation.ordinal()][automatable.ordinal()][technical_impact.ordinal()]
        [mission_impact.ordinal()]
}

pub fn automatable_for(
    complexity: AttackComplexity,
    privileges: PrivilegesRequired,
    interaction: UserInteraction,
) -> Automatable {
    AUTOMATABLE_TABLE[complexity.ordinal()][privileges.ordinal()][interaction.ordinal()]
}

/// One leaf of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub exploitation: Exploitation,
    pub automatable: Automatable,
    pub technical_impact: TechnicalImpact,
    pub mission_impact: MissionImpact,
    pub action: Action,
}

/// Every leaf, in table order.
pub fn entries() -> impl Iterator<Item = TableEntry> {
    Exploitation::ALL.iter().flat_map(|&exploitation| {
        Automatable::ALL.iter().flat_map(move |&automatable| {
            TechnicalImpact::ALL.iter().flat_map(move |&technical_impact| {
                MissionImpact::ALL.iter().map(move |&mission_impact| TableEntry {
                    exploitation,
                    automatable,
                    technical_impact,
                    mission_impact,
                    action: action_for(exploitation, automatable, technical_impact, mission_impact),
                })
            })
        })
    })
}
