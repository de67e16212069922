use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(pub u32);

impl core::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(&format!("#{}", self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EquipmentType {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

/// A trackable physical asset (camera, microphone, tripod, …).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentItem {
    pub id: EquipmentId,
    pub nickname: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub equipment_type: Option<EquipmentType>,
    #[serde(default = "default_functional")]
    pub functional: bool,
}

impl EquipmentItem {
    /// Display label: nickname plus brand/model when known.
    pub fn label(&self) -> String {
        match (&self.brand, &self.model) {
            (Some(brand), Some(model)) => format!("{} ({brand} {model})", self.nickname),
            (Some(detail), None) | (None, Some(detail)) => {
                format!("{} ({detail})", self.nickname)
            }
            (None, None) => self.nickname.clone(),
        }
    }

    pub fn type_glyph(&self) -> &str {
        self.equipment_type.as_ref().map_or("", |t| t.emoji.as_str())
    }
}

const fn default_functional() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let item: EquipmentItem = serde_json::from_str(
            r#"{
                "id": 3,
                "nickname": "A-kamera",
                "brand": "Sony",
                "model": "FX3",
                "equipment_type": {"id": 1, "name": "Kamera", "emoji": "📹"},
                "functional": true
            }"#,
        )
        .unwrap();

        assert_eq!(item.id, EquipmentId(3));
        assert_eq!(item.label(), "A-kamera (Sony FX3)");
        assert_eq!(item.type_glyph(), "📹");
        assert!(item.functional);
    }

    #[test]
    fn sparse_record_defaults() {
        let item: EquipmentItem =
            serde_json::from_str(r#"{"id": 9, "nickname": "Mikroport"}"#).unwrap();

        assert_eq!(item.label(), "Mikroport");
        assert_eq!(item.type_glyph(), "");
        assert!(item.functional); // functional unless the backend says otherwise
    }

    #[test]
    fn label_with_brand_only() {
        let item: EquipmentItem =
            serde_json::from_str(r#"{"id": 9, "nickname": "Csúszka", "brand": "Manfrotto"}"#)
                .unwrap();

        assert_eq!(item.label(), "Csúszka (Manfrotto)");
    }
}
