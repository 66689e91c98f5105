use serde::{Deserialize, Serialize};

/// Raw per-game payload as stored on a parsed `Game`. Field names follow the
/// OpenDota match endpoint; anything the provider omits defaults to zero so
/// partially parsed replays still score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGameStats {
    pub match_id: i64,
    pub radiant_win: bool,
    /// Seconds.
    pub duration: u32,
    #[serde(default)]
    pub radiant_name: Option<String>,
    #[serde(default)]
    pub dire_name: Option<String>,
    /// Bit masks of structures still standing, 11 towers / 6 barracks a side.
    #[serde(default)]
    pub tower_status_radiant: Option<u32>,
    #[serde(default)]
    pub tower_status_dire: Option<u32>,
    #[serde(default)]
    pub barracks_status_radiant: Option<u32>,
    #[serde(default)]
    pub barracks_status_dire: Option<u32>,
    #[serde(default)]
    pub radiant_roshan_kills: u32,
    #[serde(default)]
    pub dire_roshan_kills: u32,
    pub players: Vec<RawPlayerStats>,
}

pub const TOWERS_PER_SIDE: u32 = 11;
pub const BARRACKS_PER_SIDE: u32 = 6;

impl RawGameStats {
    /// Enemy towers taken down by the given side.
    pub fn towers_destroyed_by(&self, radiant: bool) -> u32 {
        let enemy_mask = if radiant {
            self.tower_status_dire
        } else {
            self.tower_status_radiant
        };
        destroyed(enemy_mask, TOWERS_PER_SIDE)
    }

    /// Enemy barracks taken down by the given side.
    pub fn barracks_destroyed_by(&self, radiant: bool) -> u32 {
        let enemy_mask = if radiant {
            self.barracks_status_dire
        } else {
            self.barracks_status_radiant
        };
        destroyed(enemy_mask, BARRACKS_PER_SIDE)
    }

    pub fn roshan_kills_by(&self, radiant: bool) -> u32 {
        if radiant {
            self.radiant_roshan_kills
        } else {
            self.dire_roshan_kills
        }
    }

    pub fn won_by(&self, radiant: bool) -> bool {
        self.radiant_win == radiant
    }
}

fn destroyed(standing_mask: Option<u32>, total: u32) -> u32 {
    match standing_mask {
        Some(mask) => total.saturating_sub(mask.count_ones()),
        None => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerStats {
    #[serde(default)]
    pub account_id: Option<i64>,
    /// Slots 0-127 are Radiant, 128-255 Dire.
    pub player_slot: u16,
    #[serde(default)]
    pub hero_id: u32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub gold_per_min: u32,
    #[serde(default)]
    pub xp_per_min: u32,
    #[serde(default)]
    pub last_hits: u32,
    #[serde(default)]
    pub denies: u32,
    #[serde(default)]
    pub net_worth: u32,
    #[serde(default)]
    pub hero_damage: u32,
    #[serde(default)]
    pub tower_damage: u32,
    #[serde(default)]
    pub hero_healing: u32,
    #[serde(default)]
    pub obs_placed: u32,
    #[serde(default)]
    pub sen_placed: u32,
}

impl RawPlayerStats {
    pub fn is_radiant(&self) -> bool {
        self.player_slot < 128
    }
}
