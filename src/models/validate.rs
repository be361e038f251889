use super::PlayerRequest;

/// Fixed message returned whenever a required field is missing.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Required: firstName, lastName, squadNumber, position";

/// Names of the required fields absent from a request, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl MissingFields {
    /// Every required field, as for a request with an empty body.
    pub fn all() -> Self {
        MissingFields(vec!["firstName", "lastName", "squadNumber", "position"])
    }
}

/// The four required values of a request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
    pub first_name: String,
    pub last_name: String,
    pub squad_number: i64,
    pub position: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// Check that firstName, lastName, squadNumber and position are present.
///
/// Strings must be non-empty and the squad number must be non-zero.
pub fn validate(request: &PlayerRequest) -> Result<RequiredFields, MissingFields> {
    let first_name = non_empty(&request.first_name);
    let last_name = non_empty(&request.last_name);
    let squad_number = request.squad_number.filter(|number| *number != 0);
    let position = non_empty(&request.position);

    match (first_name, last_name, squad_number, position) {
        (Some(first_name), Some(last_name), Some(squad_number), Some(position)) => {
            Ok(RequiredFields {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                squad_number,
                position: position.to_string(),
            })
        }
        (first_name, last_name, squad_number, position) => {
            let missing = [
                ("firstName", first_name.is_none()),
                ("lastName", last_name.is_none()),
                ("squadNumber", squad_number.is_none()),
                ("position", position.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();

            Err(MissingFields(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messi() -> PlayerRequest {
        PlayerRequest {
            first_name: Some("Lionel".to_string()),
            last_name: Some("Messi".to_string()),
            squad_number: Some(10),
            position: Some("Forward".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_complete_request() {
        assert_eq!(
            validate(&messi()),
            Ok(RequiredFields {
                first_name: "Lionel".to_string(),
                last_name: "Messi".to_string(),
                squad_number: 10,
                position: "Forward".to_string(),
            })
        );
    }

    #[test]
    fn reports_each_missing_field() {
        let cases: [(fn(&mut PlayerRequest), &str); 4] = [
            (|r| r.first_name = None, "firstName"),
            (|r| r.last_name = None, "lastName"),
            (|r| r.squad_number = None, "squadNumber"),
            (|r| r.position = None, "position"),
        ];

        for (strip, name) in cases {
            let mut request = messi();
            strip(&mut request);
            assert_eq!(validate(&request), Err(MissingFields(vec![name])));
        }
    }

    #[test]
    fn empty_request_misses_everything() {
        assert_eq!(validate(&PlayerRequest::default()), Err(MissingFields::all()));
    }

    #[test]
    fn empty_strings_and_zero_squad_number_count_as_missing() {
        let request = PlayerRequest {
            first_name: Some(String::new()),
            last_name: Some("Messi".to_string()),
            squad_number: Some(0),
            position: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(
            validate(&request),
            Err(MissingFields(vec!["firstName", "squadNumber", "position"]))
        );
    }

    #[test]
    fn optional_fields_are_not_required() {
        let request = PlayerRequest {
            middle_name: Some(None),
            team: None,
            starting_11: Some(Some(false)),
            ..messi()
        };

        assert!(validate(&request).is_ok());
    }
}
