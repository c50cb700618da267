use crate::core::value::Value;
use crate::form::field::FieldName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Initial value of every field. Both `FormState::new` and `reset` are built
/// from this table.
pub const DEFAULT_RECORD: [(FieldName, Value); 9] = [
    (FieldName::FirstName, Value::Text(String::new())),
    (FieldName::LastName, Value::Text(String::new())),
    (FieldName::Email, Value::Text(String::new())),
    (FieldName::Contact, Value::Text(String::new())),
    (FieldName::Gender, Value::Text(String::new())),
    (FieldName::Country, Value::None),
    (FieldName::Resume, Value::None),
    (FieldName::Url, Value::Text(String::new())),
    (FieldName::About, Value::Text(String::new())),
];

/// How `update` stores the incoming value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateShape {
    /// Store the raw value.
    #[default]
    Scalar,
    /// Store the value as a one-element list.
    Wrapped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    values: IndexMap<FieldName, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            values: DEFAULT_RECORD.into_iter().collect(),
        }
    }

    pub fn get(&self, field: FieldName) -> &Value {
        // Keys are seeded from DEFAULT_RECORD and never removed.
        &self.values[&field]
    }

    pub fn text(&self, field: FieldName) -> &str {
        self.get(field).as_text().unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &Value)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_default(&self) -> bool {
        *self == reset()
    }

    pub fn updated(&self, field: FieldName, value: Value, shape: UpdateShape) -> Self {
        update(self, field, value, shape)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `state` with only `field` replaced.
pub fn update(state: &FormState, field: FieldName, value: Value, shape: UpdateShape) -> FormState {
    let stored = match shape {
        UpdateShape::Scalar => value,
        UpdateShape::Wrapped => value.wrapped(),
    };
    let mut next = state.clone();
    if let Some(slot) = next.values.get_mut(&field) {
        *slot = stored;
    }
    next
}

pub fn reset() -> FormState {
    FormState::new()
}

#[cfg(test)]
mod tests {
    use super::{FormState, UpdateShape, reset, update};
    use crate::core::value::Value;
    use crate::form::field::FieldName;
    use pretty_assertions::assert_eq;

    fn populated() -> FormState {
        let entries = [
            (FieldName::FirstName, Value::text("Ada")),
            (FieldName::LastName, Value::text("Lovelace")),
            (FieldName::Email, Value::text("ada@example.com")),
            (FieldName::Contact, Value::text("+44 20 7946 0000")),
            (FieldName::Gender, Value::text("female")),
            (FieldName::Country, Value::text("uk")),
            (FieldName::Resume, Value::file("/tmp/ada.pdf")),
            (FieldName::Url, Value::text("https://example.com/ada.png")),
            (FieldName::About, Value::text("Analyst.\nPoet.")),
        ];
        entries
            .into_iter()
            .fold(FormState::new(), |state, (field, value)| {
                update(&state, field, value, UpdateShape::Scalar)
            })
    }

    #[test]
    fn update_touches_only_the_named_field() {
        let before = populated();
        for field in FieldName::ALL {
            let after = update(&before, field, Value::text("changed"), UpdateShape::Scalar);
            for other in FieldName::ALL {
                if other == field {
                    assert_eq!(after.get(other), &Value::text("changed"));
                } else {
                    assert_eq!(after.get(other), before.get(other), "{other} changed");
                }
            }
        }
    }

    #[test]
    fn update_keeps_key_set_and_order() {
        let state = update(&FormState::new(), FieldName::About, Value::text("x"), UpdateShape::Scalar);
        let keys: Vec<_> = state.iter().map(|(field, _)| field).collect();
        assert_eq!(keys, FieldName::ALL.to_vec());
    }

    #[test]
    fn first_name_update_from_defaults() {
        let defaults = FormState::new();
        let scalar = update(&defaults, FieldName::FirstName, Value::text("Ada"), UpdateShape::Scalar);
        assert_eq!(scalar.get(FieldName::FirstName), &Value::text("Ada"));

        let wrapped = update(&defaults, FieldName::FirstName, Value::text("Ada"), UpdateShape::Wrapped);
        assert_eq!(
            wrapped.get(FieldName::FirstName),
            &Value::List(vec![Value::text("Ada")])
        );
        assert_eq!(wrapped.text(FieldName::FirstName), "Ada");

        for field in FieldName::ALL.into_iter().skip(1) {
            assert_eq!(scalar.get(field), defaults.get(field));
            assert_eq!(wrapped.get(field), defaults.get(field));
        }
    }

    #[test]
    fn reset_matches_defaults_regardless_of_prior_state() {
        assert_eq!(reset(), FormState::new());
        assert!(!populated().is_default());
        assert!(reset().is_default());
    }

    #[test]
    fn defaults_leave_choices_unselected() {
        let state = FormState::new();
        assert_eq!(state.get(FieldName::Country), &Value::None);
        assert_eq!(state.get(FieldName::Resume), &Value::None);
        assert_eq!(state.text(FieldName::Gender), "");
    }

    #[test]
    fn serializes_in_field_order() {
        let text = serde_json::to_string(&populated()).expect("json");
        let positions: Vec<usize> = FieldName::ALL
            .iter()
            .map(|field| text.find(&format!("\"{}\":", field.as_str())).expect("key present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{text}");

        let json = populated().to_json().expect("json");
        assert_eq!(json["resume"], serde_json::json!("/tmp/ada.pdf"));
    }
}
