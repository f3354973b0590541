//! Raw records - untrusted payloads as returned by the wiki bucket API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names of the `infobox_monster` bucket
#[allow(missing_docs)]
pub mod fields {
    /// Display name of the page
    pub const PAGE_NAME: &str = "page_name";
    /// Qualified sub-page name (`Name#Version`)
    pub const PAGE_NAME_SUB: &str = "page_name_sub";
    /// Numeric NPC identifier
    pub const ID: &str = "id";
    /// In-game name
    pub const NAME: &str = "name";
    pub const COMBAT_LEVEL: &str = "combat_level";
    pub const HITPOINTS: &str = "hitpoints";
    pub const ATTACK_LEVEL: &str = "attack_level";
    pub const STRENGTH_LEVEL: &str = "strength_level";
    pub const DEFENCE_LEVEL: &str = "defence_level";
    pub const MAGIC_LEVEL: &str = "magic_level";
    pub const RANGED_LEVEL: &str = "ranged_level";
    pub const ATTACK_BONUS: &str = "attack_bonus";
    pub const STRENGTH_BONUS: &str = "strength_bonus";
    pub const MAGIC_ATTACK_BONUS: &str = "magic_attack_bonus";
    pub const MAGIC_DAMAGE_BONUS: &str = "magic_damage_bonus";
    pub const RANGE_ATTACK_BONUS: &str = "range_attack_bonus";
    pub const RANGE_STRENGTH_BONUS: &str = "range_strength_bonus";
    pub const STAB_DEFENCE_BONUS: &str = "stab_defence_bonus";
    pub const SLASH_DEFENCE_BONUS: &str = "slash_defence_bonus";
    pub const CRUSH_DEFENCE_BONUS: &str = "crush_defence_bonus";
    pub const MAGIC_DEFENCE_BONUS: &str = "magic_defence_bonus";
    /// Legacy aggregate ranged defence
    pub const RANGE_DEFENCE_BONUS: &str = "range_defence_bonus";
    pub const ATTACK_SPEED: &str = "attack_speed";
    pub const ATTACK_STYLE: &str = "attack_style";
    pub const MAX_HIT: &str = "max_hit";
    pub const SIZE: &str = "size";
    pub const ATTRIBUTE: &str = "attribute";
    pub const SLAYER_CATEGORY: &str = "slayer_category";
    pub const SLAYER_EXPERIENCE: &str = "slayer_experience";
    pub const SLAYER_LEVEL: &str = "slayer_level";
    pub const POISON_IMMUNE: &str = "poison_immune";
    pub const VENOM_IMMUNE: &str = "venom_immune";
    pub const IMAGE: &str = "image";
    pub const LIGHT_RANGE_DEFENCE_BONUS: &str = "light_range_defence_bonus";
    pub const STANDARD_RANGE_DEFENCE_BONUS: &str = "standard_range_defence_bonus";
    pub const HEAVY_RANGE_DEFENCE_BONUS: &str = "heavy_range_defence_bonus";
    pub const ELEMENTAL_WEAKNESS: &str = "elemental_weakness";
    pub const ELEMENTAL_WEAKNESS_PERCENT: &str = "elemental_weakness_percent";

    /// Every field selected from the bucket, in query order
    pub const ALL: &[&str] = &[
        PAGE_NAME,
        PAGE_NAME_SUB,
        ID,
        NAME,
        COMBAT_LEVEL,
        HITPOINTS,
        ATTACK_LEVEL,
        STRENGTH_LEVEL,
        DEFENCE_LEVEL,
        MAGIC_LEVEL,
        RANGED_LEVEL,
        ATTACK_BONUS,
        STRENGTH_BONUS,
        MAGIC_ATTACK_BONUS,
        MAGIC_DAMAGE_BONUS,
        RANGE_ATTACK_BONUS,
        RANGE_STRENGTH_BONUS,
        STAB_DEFENCE_BONUS,
        SLASH_DEFENCE_BONUS,
        CRUSH_DEFENCE_BONUS,
        MAGIC_DEFENCE_BONUS,
        RANGE_DEFENCE_BONUS,
        ATTACK_SPEED,
        ATTACK_STYLE,
        MAX_HIT,
        SIZE,
        ATTRIBUTE,
        SLAYER_CATEGORY,
        SLAYER_EXPERIENCE,
        SLAYER_LEVEL,
        POISON_IMMUNE,
        VENOM_IMMUNE,
        IMAGE,
        LIGHT_RANGE_DEFENCE_BONUS,
        STANDARD_RANGE_DEFENCE_BONUS,
        HEAVY_RANGE_DEFENCE_BONUS,
        ELEMENTAL_WEAKNESS,
        ELEMENTAL_WEAKNESS_PERCENT,
    ];
}

/// Shape of a raw field value
///
/// The bucket API returns the same logical field as absent, a single scalar,
/// or a list of scalars depending on the page. Coercers branch on this shape
/// rather than on the concrete JSON type. JSON `null` is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Field missing or null
    Absent,

    /// A single non-list value (number, string, bool or nested object)
    Scalar(&'a Value),

    /// A list of values, possibly empty
    List(&'a [Value]),
}

impl<'a> RawValue<'a> {
    /// Classify an optional JSON value by shape
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawValue::Absent,
            Some(Value::Array(items)) => RawValue::List(items),
            Some(other) => RawValue::Scalar(other),
        }
    }

    /// Whether the value is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }
}

impl<'a> From<&'a Value> for RawValue<'a> {
    fn from(value: &'a Value) -> Self {
        RawValue::of(Some(value))
    }
}

/// One untyped record from the external source, prior to normalization
///
/// No invariants hold for the contents; every field is untrusted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Create a record from a JSON object map
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Get a field classified by shape
    pub fn field(&self, key: &str) -> RawValue<'_> {
        RawValue::of(self.0.get(key))
    }

    /// Get the raw JSON value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, returning the record (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record, returning the underlying map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = Value;

    /// Fails (returning the input) when the value is not a JSON object
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_value_shapes() {
        let record = RawRecord::default()
            .with("n", 5)
            .with("s", "abc")
            .with("l", json!([1, 2]))
            .with("z", Value::Null);

        assert!(matches!(record.field("n"), RawValue::Scalar(_)));
        assert!(matches!(record.field("s"), RawValue::Scalar(_)));
        assert!(matches!(record.field("l"), RawValue::List(items) if items.len() == 2));
        assert!(record.field("z").is_absent());
        assert!(record.field("missing").is_absent());
    }

    #[test]
    fn test_try_from_object() {
        let record = RawRecord::try_from(json!({"id": 1})).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("id"), Some(&json!(1)));
    }

    #[test]
    fn test_try_from_non_object_fails() {
        assert!(RawRecord::try_from(json!([1, 2, 3])).is_err());
        assert!(RawRecord::try_from(json!("text")).is_err());
    }

    #[test]
    fn test_field_list_is_unique() {
        let mut names: Vec<&str> = fields::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), fields::ALL.len());
    }
}
