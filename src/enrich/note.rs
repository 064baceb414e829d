//! Technical note for `modell3d.TechnischeHinweise`

use serde_json::Value;

use super::MetadataError;

const SENSOR: &str = "/projects/0/measurement_series/0/sensors/0/capturing_device";
const SETUP: &str = "/projects/0/measurement_series/0/measurements/0/measurement_setup";
const MESH: &str = "/projects/0/meshes/0/mesh_information";
const TEXTURING_SENSOR: &str = "/projects/1/chunks/0/sensors/0";

/// Capture facts extracted from a portal document
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalNote {
    pub scanner_sensor: String,
    pub scanner_megapixels: i64,
    pub measuring_volume: (i64, i64, i64),
    pub point_distance: String,
    pub num_points: String,
    pub num_triangles: String,
    pub area_cm2: i64,
    pub texturing_sensor: String,
    pub texturing_megapixels: i64,
}

struct Document<'a> {
    object_id: &'a str,
    root: &'a Value,
}

impl<'a> Document<'a> {
    fn value(&self, base: &str, path: &str) -> Result<&'a Value, MetadataError> {
        let pointer = format!("{}/{}/value", base, path);
        self.root
            .pointer(&pointer)
            .ok_or_else(|| MetadataError::MissingField {
                object_id: self.object_id.to_string(),
                path: pointer,
            })
    }

    /// Strings as they are, anything else in JSON notation
    fn text(&self, base: &str, path: &str) -> Result<String, MetadataError> {
        Ok(match self.value(base, path)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn number(&self, base: &str, path: &str) -> Result<f64, MetadataError> {
        self.value(base, path)?
            .as_f64()
            .ok_or_else(|| MetadataError::InvalidDocument {
                object_id: self.object_id.to_string(),
                message: format!("'{}/{}/value' is not a number", base, path),
            })
    }

    fn truncated(&self, base: &str, path: &str) -> Result<i64, MetadataError> {
        Ok(self.number(base, path)?.trunc() as i64)
    }

    fn megapixels(&self, base: &str, height: &str, width: &str) -> Result<i64, MetadataError> {
        let h = self.number(base, height)?;
        let w = self.number(base, width)?;
        Ok((h * w / 1_000_000.0).trunc() as i64)
    }
}

impl TechnicalNote {
    /// Extract the note from a parsed portal document; every path is required.
    pub fn from_document(object_id: &str, document: &Value) -> Result<Self, MetadataError> {
        let doc = Document {
            object_id,
            root: document,
        };

        Ok(Self {
            scanner_sensor: doc.text(SENSOR, "sensor_type")?,
            scanner_megapixels: doc.megapixels(SETUP, "image_height", "image_width")?,
            measuring_volume: (
                doc.truncated(SENSOR, "measuring_volume_length")?,
                doc.truncated(SENSOR, "measuring_volume_width")?,
                doc.truncated(SENSOR, "measuring_volume_depth")?,
            ),
            point_distance: doc.text(SENSOR, "theoretical_measuring_point_distance")?,
            num_points: doc.text(MESH, "num_points")?,
            num_triangles: doc.text(MESH, "num_triangles")?,
            area_cm2: (doc.number(MESH, "area")? / 100.0).trunc() as i64,
            texturing_sensor: doc.text(TEXTURING_SENSOR, "capturing_device/name")?,
            texturing_megapixels: doc.megapixels(
                TEXTURING_SENSOR,
                "calibration/cal_properties/image_height",
                "calibration/cal_properties/image_width",
            )?,
        })
    }

    /// The note text (no trailing newline)
    pub fn render(&self) -> String {
        let (length, width, depth) = self.measuring_volume;
        [
            "3D Capturing".to_string(),
            "Capturing device: structured light scanner".to_string(),
            format!("Sensor:  {}", self.scanner_sensor),
            format!("Camera resolution: {} MegaPixel", self.scanner_megapixels),
            format!("Measuring volume: {} mm x {} mm x {} mm", length, width, depth),
            format!(
                "Theoretical measuring point distance: {}",
                self.point_distance
            ),
            String::new(),
            "3D Model".to_string(),
            format!("Number of points: {}", self.num_points),
            format!("Number of triangles: {}", self.num_triangles),
            format!("Area: {} cm^2", self.area_cm2),
            "Scale: 1:1".to_string(),
            String::new(),
            "Texturing".to_string(),
            "Capturing device: structure from motion".to_string(),
            format!("Sensor: {}", self.texturing_sensor),
            // spelling as published in Arachne
            format!("Camera resoulution: {} MegaPixel", self.texturing_megapixels),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "projects": [
                {
                    "measurement_series": [{
                        "sensors": [{
                            "capturing_device": {
                                "sensor_type": {"value": "stereoSENSOR"},
                                "measuring_volume_length": {"value": 500.7},
                                "measuring_volume_width": {"value": 370.2},
                                "measuring_volume_depth": {"value": 250},
                                "theoretical_measuring_point_distance": {"value": 0.25}
                            }
                        }],
                        "measurements": [{
                            "measurement_setup": {
                                "image_height": {"value": 2048},
                                "image_width": {"value": 2448}
                            }
                        }]
                    }],
                    "meshes": [{
                        "mesh_information": {
                            "num_points": {"value": 1234567},
                            "num_triangles": {"value": 2469000},
                            "area": {"value": 31999.9}
                        }
                    }]
                },
                {
                    "chunks": [{
                        "sensors": [{
                            "capturing_device": {"name": {"value": "Canon EOS 5DS R"}},
                            "calibration": {
                                "cal_properties": {
                                    "image_height": {"value": 5792},
                                    "image_width": {"value": 8688}
                                }
                            }
                        }]
                    }]
                }
            ]
        })
    }

    #[test]
    fn test_render_matches_published_layout() {
        let note = TechnicalNote::from_document("A1", &sample_document()).unwrap();
        let expected = "3D Capturing\n\
Capturing device: structured light scanner\n\
Sensor:  stereoSENSOR\n\
Camera resolution: 5 MegaPixel\n\
Measuring volume: 500 mm x 370 mm x 250 mm\n\
Theoretical measuring point distance: 0.25\n\
\n\
3D Model\n\
Number of points: 1234567\n\
Number of triangles: 2469000\n\
Area: 319 cm^2\n\
Scale: 1:1\n\
\n\
Texturing\n\
Capturing device: structure from motion\n\
Sensor: Canon EOS 5DS R\n\
Camera resoulution: 50 MegaPixel";
        assert_eq!(note.render(), expected);
        assert!(!note.render().ends_with('\n'));
    }

    #[test]
    fn test_missing_path_is_reported() {
        let mut doc = sample_document();
        doc["projects"][0]["meshes"][0]["mesh_information"]
            .as_object_mut()
            .unwrap()
            .remove("area");

        let err = TechnicalNote::from_document("A1", &doc).unwrap_err();
        match err {
            MetadataError::MissingField { object_id, path } => {
                assert_eq!(object_id, "A1");
                assert_eq!(path, "/projects/0/meshes/0/mesh_information/area/value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_second_project_is_reported() {
        let mut doc = sample_document();
        doc["projects"].as_array_mut().unwrap().truncate(1);
        assert!(matches!(
            TechnicalNote::from_document("A1", &doc),
            Err(MetadataError::MissingField { .. })
        ));
    }
}
