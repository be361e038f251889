use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod date_of_birth;
pub mod validate;

pub use validate::{validate, MissingFields, RequiredFields};

/// Player record as stored and returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub squad_number: i64,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbr_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(rename = "starting11", skip_serializing_if = "Option::is_none")]
    pub starting_11: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /players and PUT /players/{id}.
///
/// Required fields are plain options and are enforced afterwards by
/// [`validate`]. Optional fields keep three states: absent (`None`),
/// explicit `null` (`Some(None)`) and a value (`Some(Some(_))`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "given")]
    pub middle_name: Option<Option<String>>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "date_of_birth::deserialize")]
    pub date_of_birth: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "squad_number")]
    pub squad_number: Option<i64>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "given")]
    pub abbr_position: Option<Option<String>>,
    #[serde(default, deserialize_with = "given")]
    pub team: Option<Option<String>>,
    #[serde(default, deserialize_with = "given")]
    pub league: Option<Option<String>>,
    #[serde(default, rename = "starting11", deserialize_with = "given")]
    pub starting_11: Option<Option<bool>>,
}

/// Only runs when the key is present, so `null` becomes `Some(None)`.
fn given<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Squad numbers arrive as JSON numbers; `10.0` is accepted as `10`.
fn squad_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(whole) = number.as_i64() {
        return Ok(Some(whole));
    }

    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
            Ok(Some(float as i64))
        }
        _ => Err(serde::de::Error::custom(format!(
            "invalid squadNumber `{}`, expected a whole number",
            number
        ))),
    }
}

/// A validated player ready to be inserted. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub squad_number: i64,
    pub position: String,
    pub abbr_position: Option<String>,
    pub team: Option<String>,
    pub league: Option<String>,
    pub starting_11: Option<bool>,
}

/// Field set written by an update.
///
/// Required fields are always written. For optional fields `None` leaves
/// the stored value untouched and `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerChanges {
    pub first_name: String,
    pub middle_name: Option<Option<String>>,
    pub last_name: String,
    pub date_of_birth: Option<Option<DateTime<Utc>>>,
    pub squad_number: i64,
    pub position: String,
    pub abbr_position: Option<Option<String>>,
    pub team: Option<Option<String>>,
    pub league: Option<Option<String>>,
    pub starting_11: Option<Option<bool>>,
}

impl PlayerChanges {
    /// Changes that rewrite only the required fields.
    pub fn from_required(required: RequiredFields) -> Self {
        Self {
            first_name: required.first_name,
            middle_name: None,
            last_name: required.last_name,
            date_of_birth: None,
            squad_number: required.squad_number,
            position: required.position,
            abbr_position: None,
            team: None,
            league: None,
            starting_11: None,
        }
    }
}

impl PlayerRequest {
    /// Validate and turn the body into an insertable record, copying the
    /// input fields verbatim.
    pub fn into_new_player(self) -> Result<NewPlayer, MissingFields> {
        let required = validate(&self)?;

        Ok(NewPlayer {
            first_name: required.first_name,
            middle_name: self.middle_name.flatten(),
            last_name: required.last_name,
            date_of_birth: self.date_of_birth.flatten(),
            squad_number: required.squad_number,
            position: required.position,
            abbr_position: self.abbr_position.flatten(),
            team: self.team.flatten(),
            league: self.league.flatten(),
            starting_11: self.starting_11.flatten(),
        })
    }

    /// Validate and turn the whole body into the field set an update applies.
    pub fn into_changes(self) -> Result<PlayerChanges, MissingFields> {
        let required = validate(&self)?;

        Ok(PlayerChanges {
            middle_name: self.middle_name,
            date_of_birth: self.date_of_birth,
            abbr_position: self.abbr_position,
            team: self.team,
            league: self.league,
            starting_11: self.starting_11,
            ..PlayerChanges::from_required(required)
        })
    }
}

/// Confirmation and error body: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn request_reads_camel_case_fields() {
        let body = json!({
            "firstName": "Lionel",
            "middleName": "Andrés",
            "lastName": "Messi",
            "dateOfBirth": "1987-06-24",
            "squadNumber": 10,
            "position": "Forward",
            "abbrPosition": "FW",
            "team": "Inter Miami",
            "league": "MLS",
            "starting11": true,
            "nickname": "La Pulga"
        });

        let request: PlayerRequest = serde_json::from_value(body).unwrap();

        assert_eq!(request.first_name.as_deref(), Some("Lionel"));
        assert_eq!(request.middle_name, Some(Some("Andrés".to_string())));
        assert_eq!(
            request.date_of_birth,
            Some(Some(Utc.with_ymd_and_hms(1987, 6, 24, 0, 0, 0).unwrap()))
        );
        assert_eq!(request.squad_number, Some(10));
        assert_eq!(request.starting_11, Some(Some(true)));
    }

    #[test]
    fn request_tells_null_apart_from_absent() {
        let body = json!({
            "firstName": "Lionel",
            "team": null,
            "dateOfBirth": null,
            "starting11": null
        });

        let request: PlayerRequest = serde_json::from_value(body).unwrap();

        assert_eq!(request.team, Some(None));
        assert_eq!(request.date_of_birth, Some(None));
        assert_eq!(request.starting_11, Some(None));
        assert_eq!(request.league, None);
        assert_eq!(request.middle_name, None);
    }

    #[test]
    fn squad_number_accepts_whole_floats_only() {
        let whole: PlayerRequest = serde_json::from_value(json!({ "squadNumber": 10.0 })).unwrap();
        assert_eq!(whole.squad_number, Some(10));

        let null: PlayerRequest = serde_json::from_value(json!({ "squadNumber": null })).unwrap();
        assert_eq!(null.squad_number, None);

        assert!(serde_json::from_value::<PlayerRequest>(json!({ "squadNumber": 10.5 })).is_err());
        assert!(serde_json::from_value::<PlayerRequest>(json!({ "squadNumber": "10" })).is_err());
    }

    #[test]
    fn player_omits_absent_optional_fields() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let player = Player {
            id: "abc".to_string(),
            first_name: "Lionel".to_string(),
            middle_name: None,
            last_name: "Messi".to_string(),
            date_of_birth: None,
            squad_number: 10,
            position: "Forward".to_string(),
            abbr_position: None,
            team: None,
            league: None,
            starting_11: Some(false),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&player).unwrap();

        assert_eq!(value["squadNumber"], 10);
        assert_eq!(value["starting11"], false);
        assert!(value.get("middleName").is_none());
        assert!(value.get("team").is_none());
        assert_eq!(value["createdAt"], "2024-01-01T12:00:00Z");
    }

    #[test]
    fn into_new_player_copies_fields_verbatim() {
        let request = PlayerRequest {
            first_name: Some("  Lionel ".to_string()),
            last_name: Some("Messi".to_string()),
            squad_number: Some(10),
            position: Some("Forward".to_string()),
            league: Some(Some("MLS".to_string())),
            team: Some(None),
            ..Default::default()
        };

        let player = request.into_new_player().unwrap();

        assert_eq!(player.first_name, "  Lionel ");
        assert_eq!(player.league.as_deref(), Some("MLS"));
        assert_eq!(player.team, None);
    }

    #[test]
    fn into_changes_keeps_explicit_nulls() {
        let request = PlayerRequest {
            first_name: Some("Lionel".to_string()),
            last_name: Some("Messi".to_string()),
            squad_number: Some(30),
            position: Some("Forward".to_string()),
            team: Some(None),
            ..Default::default()
        };

        let changes = request.into_changes().unwrap();

        assert_eq!(changes.squad_number, 30);
        assert_eq!(changes.team, Some(None));
        assert_eq!(changes.league, None);
    }

    #[test]
    fn into_changes_rejects_partial_body() {
        let request = PlayerRequest {
            squad_number: Some(30),
            ..Default::default()
        };

        let missing = request.into_changes().unwrap_err();

        assert_eq!(missing.0, vec!["firstName", "lastName", "position"]);
    }
}
