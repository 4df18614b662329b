use serde::{Deserialize, Serialize};

use super::{Id, NEW_ID};

/// A team, tied to a sport by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Id,
    pub name: String,
    /// Sport definition name
    pub sport: String,
    /// Raw logo image bytes, base64 in serialized form
    #[serde(default, with = "logo_base64")]
    pub logo: Option<Vec<u8>>,
}

impl Team {
    /// Create an unsaved team without a logo
    pub fn new(name: impl Into<String>, sport: impl Into<String>) -> Self {
        Self {
            id: NEW_ID,
            name: name.into(),
            sport: sport.into(),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: Vec<u8>) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_ID
    }

    /// True when a non-empty logo payload is attached
    pub fn has_logo(&self) -> bool {
        self.logo.as_ref().is_some_and(|l| !l.is_empty())
    }
}

mod logo_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(logo: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match logo {
            Some(bytes) => s.serialize_some(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(d)?;
        encoded
            .map(|e| STANDARD.decode(e).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_logo_ignores_empty_payload() {
        assert!(!Team::new("Lions", "Fußball").has_logo());
        assert!(!Team::new("Lions", "Fußball").with_logo(Vec::new()).has_logo());
        assert!(Team::new("Lions", "Fußball").with_logo(vec![0x89, 0x50]).has_logo());
    }

    #[test]
    fn test_logo_serializes_as_base64() {
        let team = Team::new("Lions", "Fußball").with_logo(vec![1, 2, 3]);
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["logo"], "AQID");

        let back: Team = serde_json::from_value(json).unwrap();
        assert_eq!(back.logo, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_logo_field_deserializes_to_none() {
        let team: Team =
            serde_json::from_str(r#"{"id":4,"name":"Bears","sport":"American Football"}"#).unwrap();
        assert_eq!(team.logo, None);
    }
}
