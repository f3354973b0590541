//! Canonical transformer
//!
//! Maps an accepted raw record to a [`CanonicalMonster`]. Pure and total:
//! every field goes through a coercer, so no field shape can make it fail.

use crate::classifier::Admission;
use crate::coerce::{
    coerce_attack_styles, coerce_attributes, coerce_bool, coerce_categories, coerce_int,
    coerce_string, coerce_uint, parse_max_hit,
};
use crate::strip::{strip_str, StripTags};
use bestiary_domain::{fields, CanonicalMonster, RawRecord};

/// Slayer category marking a boss task
const BOSS_CATEGORY: &str = "Bosses";

/// Lowercased attribute marking a boss
const BOSS_ATTRIBUTE: &str = "boss";

/// Transform an accepted record into canonical form
///
/// Identity fields come from the classifier's [`Admission`], so the
/// transformer never re-derives them. Parser markers are stripped from the
/// fully assembled entity as the last step.
pub fn transform(record: &RawRecord, admission: &Admission, source_tag: &str) -> CanonicalMonster {
    let int = |key: &str| coerce_int(record.field(key), 0);

    let category = coerce_categories(record.field(fields::SLAYER_CATEGORY));
    let attributes = coerce_attributes(record.field(fields::ATTRIBUTE));
    let slayer_xp = int(fields::SLAYER_EXPERIENCE);

    let slayer_monster = !category.is_empty() || slayer_xp > 0;
    let boss = attributes.iter().any(|a| a == BOSS_ATTRIBUTE)
        || category.iter().any(|c| c == BOSS_CATEGORY);

    let elemental_weakness = strip_str(&coerce_string(record.field(fields::ELEMENTAL_WEAKNESS), ""));

    CanonicalMonster {
        id: admission.id,
        name: admission.page_name.clone(),
        version: admission.version.clone(),
        combat_level: int(fields::COMBAT_LEVEL),
        hitpoints: admission.hitpoints,

        attack_level: int(fields::ATTACK_LEVEL),
        strength_level: int(fields::STRENGTH_LEVEL),
        defence_level: int(fields::DEFENCE_LEVEL),
        magic_level: int(fields::MAGIC_LEVEL),
        ranged_level: int(fields::RANGED_LEVEL),

        attack_bonus: int(fields::ATTACK_BONUS),
        strength_bonus: int(fields::STRENGTH_BONUS),
        attack_magic: int(fields::MAGIC_ATTACK_BONUS),
        magic_bonus: int(fields::MAGIC_DAMAGE_BONUS),
        attack_ranged: int(fields::RANGE_ATTACK_BONUS),
        ranged_bonus: int(fields::RANGE_STRENGTH_BONUS),

        defence_stab: int(fields::STAB_DEFENCE_BONUS),
        defence_slash: int(fields::SLASH_DEFENCE_BONUS),
        defence_crush: int(fields::CRUSH_DEFENCE_BONUS),
        defence_magic: int(fields::MAGIC_DEFENCE_BONUS),
        defence_ranged: int(fields::RANGE_DEFENCE_BONUS),
        defence_ranged_light: int(fields::LIGHT_RANGE_DEFENCE_BONUS),
        defence_ranged_standard: int(fields::STANDARD_RANGE_DEFENCE_BONUS),
        defence_ranged_heavy: int(fields::HEAVY_RANGE_DEFENCE_BONUS),

        attack_speed: coerce_uint(record.field(fields::ATTACK_SPEED), 0),
        attack_type: coerce_attack_styles(record.field(fields::ATTACK_STYLE)),
        max_hit: parse_max_hit(record.field(fields::MAX_HIT)),
        size: coerce_uint(record.field(fields::SIZE), 1),

        attributes,
        category,

        slayer_monster,
        slayer_level: coerce_uint(record.field(fields::SLAYER_LEVEL), 1),
        slayer_xp: slayer_xp as f64,

        boss,
        immune_poison: coerce_bool(record.field(fields::POISON_IMMUNE), false),
        immune_venom: coerce_bool(record.field(fields::VENOM_IMMUNE), false),

        elemental_weakness: (!elemental_weakness.is_empty()).then_some(elemental_weakness),
        elemental_weakness_percent: int(fields::ELEMENTAL_WEAKNESS_PERCENT),

        source: source_tag.to_string(),
        wiki_page: admission.page_name_sub.clone(),
    }
    .strip_tags()
}
