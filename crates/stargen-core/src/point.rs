//! Labeled point type definitions

use serde::{Deserialize, Serialize};

/// A named point in some coordinate space.
///
/// Deserializes from either the object form
/// `{"name": "Sol", "coordinates": [0, 0, 0]}` or the pair form
/// `["Sol", [0, 0, 0]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct LabeledPoint {
    pub name: String,
    pub coordinates: Vec<f64>,
}

impl LabeledPoint {
    pub fn new(name: impl Into<String>, coordinates: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            coordinates: coordinates.into(),
        }
    }

    /// Number of coordinates
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Object {
        name: String,
        coordinates: Vec<f64>,
    },
    Pair(String, Vec<f64>),
}

impl From<PointRepr> for LabeledPoint {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Object { name, coordinates } | PointRepr::Pair(name, coordinates) => {
                Self { name, coordinates }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_object_form() {
        let p: LabeledPoint =
            serde_json::from_str(r#"{"name": "Sol", "coordinates": [0, 0, 0]}"#).unwrap();
        assert_eq!(p, LabeledPoint::new("Sol", vec![0.0, 0.0, 0.0]));
    }

    #[test]
    fn deserializes_pair_form() {
        let points: Vec<LabeledPoint> =
            serde_json::from_str(r#"[["Sirius", [-1.612, 8.078, -2.474]], ["Sol", [0, 0, 0]]]"#)
                .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Sirius");
        assert_eq!(points[0].coordinates, vec![-1.612, 8.078, -2.474]);
        assert_eq!(points[1].dimension(), 3);
    }

    #[test]
    fn serializes_object_form() {
        let json = serde_json::to_value(LabeledPoint::new("A", vec![1.5])).unwrap();
        assert_eq!(json, serde_json::json!({"name": "A", "coordinates": [1.5]}));
    }
}
