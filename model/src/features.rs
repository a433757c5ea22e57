use serde_json::{Map, Value};

use crate::error::FeatureErr;

/// Amount of features the model consumes.
pub const NUM_FEATURES: usize = 13;

/// The feature names in the exact order the model was trained on.
pub const FEATURES: [&str; NUM_FEATURES] = [
    "CRIM", "ZN", "INDUS", "CHAS", "NOX", "RM", "AGE", "DIS", "RAD", "TAX", "PTRATIO", "B",
    "LSTAT",
];

/// An ordered, complete set of feature values.
///
/// The position of each value is fixed by `FEATURES`, never by the order of the
/// keys in whatever input it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    /// Creates a new `FeatureVector`.
    ///
    /// # Arguments
    /// * `values` - The feature values ordered as in `FEATURES`.
    ///
    /// # Returns
    /// A new `FeatureVector` instance.
    pub fn new(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }

    /// Parses a raw request body and projects it onto the feature schema.
    ///
    /// # Arguments
    /// * `body` - The raw bytes of a json document.
    ///
    /// # Returns
    /// The projected feature vector or the reason the body was rejected.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, FeatureErr> {
        let value: Value = serde_json::from_slice(body)?;
        Self::project(&value)
    }

    /// Projects a json value onto the ordered feature schema.
    ///
    /// Keys that are not part of the schema are ignored. Strings are accepted as long as their
    /// trimmed content parses as a finite float.
    ///
    /// # Arguments
    /// * `value` - A json value, expected to be an object.
    ///
    /// # Returns
    /// The projected feature vector or the first reason the value was rejected.
    pub fn project(value: &Value) -> Result<Self, FeatureErr> {
        let Value::Object(map) = value else {
            return Err(FeatureErr::NotAnObject {
                got: kind_of(value),
            });
        };

        let mut values = [0.0; NUM_FEATURES];
        for (slot, key) in values.iter_mut().zip(FEATURES) {
            let raw = map.get(key).ok_or(FeatureErr::MissingKey(key))?;
            *slot = numeric(key, raw)?;
        }

        Ok(Self(values))
    }

    /// Returns the value of a feature by name, if the name belongs to the schema.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURES
            .iter()
            .position(|&feature| feature == name)
            .map(|i| self.0[i])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Builds the json object a client would send to get a prediction for this vector.
    pub fn to_json_object(&self) -> Value {
        let map: Map<String, Value> = FEATURES
            .iter()
            .zip(self.0)
            .map(|(name, value)| (name.to_string(), Value::from(value)))
            .collect();

        Value::Object(map)
    }
}

impl From<[f64; NUM_FEATURES]> for FeatureVector {
    fn from(values: [f64; NUM_FEATURES]) -> Self {
        Self::new(values)
    }
}

fn numeric(key: &'static str, raw: &Value) -> Result<f64, FeatureErr> {
    let not_numeric = || FeatureErr::NotNumeric {
        key,
        got: raw.to_string(),
    };

    match raw {
        Value::Number(n) => n.as_f64().ok_or_else(not_numeric),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(not_numeric),
        _ => Err(not_numeric()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "CRIM": 0.00632, "ZN": 18.0, "INDUS": 2.31, "CHAS": 0.0, "NOX": 0.538,
            "RM": 6.575, "AGE": 65.2, "DIS": 4.09, "RAD": 1.0, "TAX": 296.0,
            "PTRATIO": 15.3, "B": 396.9, "LSTAT": 4.98
        })
    }

    #[test]
    fn projects_in_schema_order() {
        let features = FeatureVector::project(&sample()).unwrap();

        assert_eq!(features.as_slice()[0], 0.00632);
        assert_eq!(features.as_slice()[5], 6.575);
        assert_eq!(features.as_slice()[12], 4.98);
        assert_eq!(features.get("TAX"), Some(296.0));
        assert_eq!(features.get("MEDV"), None);
    }

    #[test]
    fn missing_key_is_reported() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("NOX");

        let err = FeatureVector::project(&value).unwrap_err();
        assert!(matches!(err, FeatureErr::MissingKey("NOX")));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let mut value = sample();
        value["ZIP"] = json!("not even a number");

        let with_extra = FeatureVector::project(&value).unwrap();
        assert_eq!(with_extra, FeatureVector::project(&sample()).unwrap());
    }

    #[test]
    fn non_objects_are_rejected() {
        for (value, kind) in [
            (json!(3), "a number"),
            (json!([1, 2]), "an array"),
            (json!(null), "null"),
            (json!("CRIM"), "a string"),
        ] {
            let err = FeatureVector::project(&value).unwrap_err();
            assert!(matches!(err, FeatureErr::NotAnObject { got } if got == kind));
        }
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut value = sample();
        value["RM"] = json!(" 6.575 ");

        let features = FeatureVector::project(&value).unwrap();
        assert_eq!(features.get("RM"), Some(6.575));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        for bad in [json!("six"), json!("NaN"), json!("inf"), json!(true), json!(null), json!({})] {
            let mut value = sample();
            value["AGE"] = bad;

            let err = FeatureVector::project(&value).unwrap_err();
            assert!(matches!(err, FeatureErr::NotNumeric { key: "AGE", .. }));
        }
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = FeatureVector::from_json_slice(b"{\"CRIM\": ").unwrap_err();
        assert!(matches!(err, FeatureErr::MalformedBody(_)));
    }

    #[test]
    fn json_object_projects_back_to_the_same_vector() {
        let features = FeatureVector::project(&sample()).unwrap();
        let object = features.to_json_object();

        assert_eq!(object.as_object().unwrap().len(), NUM_FEATURES);
        assert_eq!(FeatureVector::project(&object).unwrap(), features);
    }
}
