//! Category filter
//!
//! Applied after transformation, so filtering never changes which IDs the
//! classifier or the reducer see as existing.

use bestiary_domain::{CanonicalMonster, FilterMode};

/// Whether a monster passes the role filter
pub fn should_include(monster: &CanonicalMonster, mode: FilterMode) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Slayer => monster.slayer_monster,
        FilterMode::Boss => monster.boss,
        FilterMode::SlayerOrBoss => monster.slayer_monster || monster.boss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::monster;

    #[test]
    fn test_filter_modes() {
        let plain = monster(1, "Chicken", None);
        let slayer = CanonicalMonster {
            slayer_monster: true,
            ..monster(2, "Cave crawler", None)
        };
        let boss = CanonicalMonster {
            boss: true,
            ..monster(3, "Giant mole", None)
        };

        for m in [&plain, &slayer, &boss] {
            assert!(should_include(m, FilterMode::All));
        }

        assert!(!should_include(&plain, FilterMode::Slayer));
        assert!(should_include(&slayer, FilterMode::Slayer));
        assert!(!should_include(&boss, FilterMode::Slayer));

        assert!(!should_include(&plain, FilterMode::Boss));
        assert!(!should_include(&slayer, FilterMode::Boss));
        assert!(should_include(&boss, FilterMode::Boss));

        assert!(!should_include(&plain, FilterMode::SlayerOrBoss));
        assert!(should_include(&slayer, FilterMode::SlayerOrBoss));
        assert!(should_include(&boss, FilterMode::SlayerOrBoss));
    }

    #[test]
    fn test_unknown_mode_behaves_like_all() {
        let plain = monster(1, "Chicken", None);
        assert!(should_include(&plain, FilterMode::parse_lenient("dragons")));
    }
}
