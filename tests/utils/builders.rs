use dotacup::bracket::{BracketSlot, Feeder, PlayoffBracket};
use dotacup::provider::{RawGameStats, RawPlayerStats};
use dotacup::standings::Group;
use dotacup::tournament::models::{
    Match, MatchSide, MatchStatus, Player, Role, SeriesFormat, TeamRef,
};

pub fn team_ref(id: &str) -> TeamRef {
    TeamRef {
        id: id.to_string(),
        name: id.to_uppercase(),
    }
}

/// A series between two seeded teams. Scores of 0-0 mean the series has not
/// started; a level score otherwise makes it a drawn Bo2, anything else a
/// completed Bo3 with the winner derived from the score.
pub fn series(
    id: &str,
    round_id: &str,
    group_id: Option<&str>,
    a: &str,
    a_score: u8,
    b: &str,
    b_score: u8,
) -> Match {
    let started = a_score > 0 || b_score > 0;
    let drawn = started && a_score == b_score;
    let winner_id = if !started || drawn {
        None
    } else if a_score > b_score {
        Some(a.to_string())
    } else {
        Some(b.to_string())
    };

    Match {
        id: id.to_string(),
        round_id: round_id.to_string(),
        group_id: group_id.map(str::to_string),
        series_format: if drawn {
            SeriesFormat::Bo2
        } else {
            SeriesFormat::Bo3
        },
        side_a: MatchSide {
            team: Some(team_ref(a)),
            score: a_score,
        },
        side_b: MatchSide {
            team: Some(team_ref(b)),
            score: b_score,
        },
        status: if started {
            MatchStatus::Completed
        } else {
            MatchStatus::Scheduled
        },
        winner_id,
        game_ids: vec![],
        scheduled_at: None,
    }
}

/// A bracket series whose participants are not known yet.
pub fn pending(id: &str, round_id: &str) -> Match {
    Match {
        id: id.to_string(),
        round_id: round_id.to_string(),
        group_id: None,
        series_format: SeriesFormat::Bo3,
        side_a: MatchSide::empty(),
        side_b: MatchSide::empty(),
        status: MatchStatus::Scheduled,
        winner_id: None,
        game_ids: vec![],
        scheduled_at: None,
    }
}

pub fn player(id: &str, team_id: &str, role: Role, account_id: i64) -> Player {
    Player {
        id: id.to_string(),
        name: id.to_string(),
        team_id: team_id.to_string(),
        role,
        account_id,
    }
}

pub fn group_of(id: &str, team_ids: &[&str]) -> Group {
    Group {
        id: id.to_string(),
        name: id.to_string(),
        team_ids: team_ids.iter().map(|t| t.to_string()).collect(),
        standings: vec![],
    }
}

/// Parsed game payload with one row per (account_id, slot, kills) triple.
/// Everything else is zeroed so expected fantasy scores stay easy to derive.
pub fn parsed_stats(
    opendota_match_id: i64,
    radiant_win: bool,
    rows: &[(i64, u16, u32)],
) -> RawGameStats {
    RawGameStats {
        match_id: opendota_match_id,
        radiant_win,
        duration: 2400,
        radiant_name: None,
        dire_name: None,
        tower_status_radiant: None,
        tower_status_dire: None,
        barracks_status_radiant: None,
        barracks_status_dire: None,
        radiant_roshan_kills: 0,
        dire_roshan_kills: 0,
        players: rows
            .iter()
            .map(|&(account_id, player_slot, kills)| RawPlayerStats {
                account_id: Some(account_id),
                player_slot,
                hero_id: 0,
                kills,
                deaths: 0,
                assists: 0,
                gold: 0,
                gold_per_min: 0,
                xp_per_min: 0,
                last_hits: 0,
                denies: 0,
                net_worth: 0,
                hero_damage: 0,
                tower_damage: 0,
                hero_healing: 0,
                obs_placed: 0,
                sen_placed: 0,
            })
            .collect(),
    }
}

/// Two semifinal slots feeding one final slot, seeded from the semifinal
/// matches' sides.
pub fn bracket_with_final(id: &str, semi_a: &Match, semi_b: &Match, final_id: &str) -> PlayoffBracket {
    let seed = |side: &MatchSide| Feeder::Seed {
        team: side.team.clone().expect("seeded semifinal side"),
    };

    PlayoffBracket {
        id: id.to_string(),
        name: id.to_string(),
        slots: vec![
            BracketSlot {
                id: "s1".to_string(),
                round: 1,
                match_id: Some(semi_a.id.clone()),
                feeders: [seed(&semi_a.side_a), seed(&semi_a.side_b)],
                winner: None,
            },
            BracketSlot {
                id: "s2".to_string(),
                round: 1,
                match_id: Some(semi_b.id.clone()),
                feeders: [seed(&semi_b.side_a), seed(&semi_b.side_b)],
                winner: None,
            },
            BracketSlot {
                id: "sf".to_string(),
                round: 2,
                match_id: Some(final_id.to_string()),
                feeders: [
                    Feeder::Slot {
                        slot_id: "s1".to_string(),
                    },
                    Feeder::Slot {
                        slot_id: "s2".to_string(),
                    },
                ],
                winner: None,
            },
        ],
    }
}
