use crate::category::Category;
use crate::device_camera::interface::CaptureFrame;
use crate::image_classifier::interface::{
    AnnotatedImage, ClassifiedItem, ClassifyError, ImageClassifier, ScanOutcome,
};
use crate::library::logger::interface::Logger;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::sync::Arc;

/// Client for the remote tray classifier: POST `{"image": <data URL>}` to
/// `<base>/upload`, detections back as JSON. One attempt per call; the
/// only timeout is the transport's own default.
pub struct ImageClassifierHttp {
    endpoint: String,
    http: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(
        base_url: &str,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ClassifyError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        Ok(Self {
            endpoint: format!("{}/upload", base_url.trim_end_matches('/')),
            http,
            logger: logger
                .with_namespace("image_classifier")
                .with_namespace("http"),
        })
    }
}

impl ImageClassifier for ImageClassifierHttp {
    fn classify(&self, frame: CaptureFrame) -> Result<ScanOutcome, ClassifyError> {
        if frame.is_empty() {
            return Err(ClassifyError::EmptyFrame);
        }

        let _ = self
            .logger
            .info(&format!("Submitting {:?} to {}", frame, self.endpoint));
        let body = serde_json::json!({ "image": frame.to_data_url() });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Transport(format!(
                "classifier returned status {}",
                status
            )));
        }

        let text = response
            .text()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        let parsed = parse_response(&text)?;

        let annotated = match parsed.annotated_source {
            Some(source) => match decode_annotated(&source) {
                Ok(annotated) => Some(annotated),
                Err(reason) => {
                    // The echo is cosmetic; the detections still stand.
                    let _ = self
                        .logger
                        .warn(&format!("Dropping annotated image: {}", reason));
                    None
                }
            },
            None => None,
        };

        Ok(ScanOutcome {
            frame,
            items: parsed.items,
            annotated,
            summary: parsed.summary,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireResponse {
    Detections {
        detections: Vec<WireDetection>,
        #[serde(default)]
        image: Option<String>,
    },
    Simple {
        result: String,
    },
}

#[derive(Debug, Deserialize)]
struct WireDetection {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "class")]
    name: String,
    category: Category,
    confidence: f32,
}

struct ParsedResponse {
    items: Vec<ClassifiedItem>,
    annotated_source: Option<String>,
    summary: Option<String>,
}

fn parse_response(body: &str) -> Result<ParsedResponse, ClassifyError> {
    let wire: WireResponse =
        serde_json::from_str(body).map_err(|e| ClassifyError::Protocol(e.to_string()))?;

    match wire {
        WireResponse::Detections { detections, image } => Ok(ParsedResponse {
            items: to_items(detections)?,
            annotated_source: image,
            summary: None,
        }),
        WireResponse::Simple { result } => Ok(ParsedResponse {
            items: Vec::new(),
            annotated_source: None,
            summary: Some(result),
        }),
    }
}

fn to_items(detections: Vec<WireDetection>) -> Result<Vec<ClassifiedItem>, ClassifyError> {
    let mut items: Vec<ClassifiedItem> = Vec::with_capacity(detections.len());
    for (index, detection) in detections.into_iter().enumerate() {
        let id = match detection.id {
            Some(id) => id,
            None => (index + 1).to_string(),
        };
        if items.iter().any(|item| item.id == id) {
            return Err(ClassifyError::Protocol(format!(
                "duplicate detection id {:?}",
                id
            )));
        }
        items.push(ClassifiedItem {
            id,
            name: detection.name,
            category: detection.category,
            confidence: detection.confidence.clamp(0.0, 1.0),
        });
    }
    Ok(items)
}

fn decode_annotated(source: &str) -> Result<AnnotatedImage, String> {
    let encoded = match source.split_once("base64,") {
        Some((_, encoded)) => encoded,
        None => source,
    };
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| format!("bad base64: {}", e))?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| format!("bad image: {}", e))?;
    Ok(AnnotatedImage {
        data_url: source.to_string(),
        width: decoded.width(),
        height: decoded.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detections_shape() {
        let body = r#"{
            "detections": [
                {"id": "a", "name": "apple core", "category": "compost", "confidence": 0.91},
                {"id": "b", "name": "plastic bottle", "category": "recycle", "confidence": 0.72}
            ],
            "image": null
        }"#;
        let parsed = parse_response(body).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].id, "a");
        assert_eq!(parsed.items[0].name, "apple core");
        assert_eq!(parsed.items[0].category, Category::Compost);
        assert_eq!(parsed.items[1].category, Category::Recycle);
        assert!(parsed.annotated_source.is_none());
        assert!(parsed.summary.is_none());
    }

    #[test]
    fn test_parse_zero_detections_is_success() {
        let parsed = parse_response(r#"{"detections": []}"#).unwrap();
        assert!(parsed.items.is_empty());
        assert!(parsed.summary.is_none());
    }

    #[test]
    fn test_parse_degraded_result_shape() {
        let parsed = parse_response(r#"{"result": "tray looks clean"}"#).unwrap();
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.summary.as_deref(), Some("tray looks clean"));
    }

    #[test]
    fn test_parse_malformed_body_is_a_protocol_error() {
        let result = parse_response("not json at all");
        assert!(matches!(result, Err(ClassifyError::Protocol(_))));

        let result = parse_response(r#"{"something": "else"}"#);
        assert!(matches!(result, Err(ClassifyError::Protocol(_))));
    }

    #[test]
    fn test_parse_synthesizes_missing_ids_from_position() {
        let body = r#"{"detections": [
            {"name": "napkin", "category": "trash", "confidence": 0.5},
            {"name": "fork", "category": "dish return", "confidence": 0.6}
        ]}"#;
        let parsed = parse_response(body).unwrap();
        assert_eq!(parsed.items[0].id, "1");
        assert_eq!(parsed.items[1].id, "2");
        assert_eq!(parsed.items[1].category, Category::DishReturn);
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let body = r#"{"detections": [
            {"id": "x", "name": "napkin", "category": "trash", "confidence": 0.5},
            {"id": "x", "name": "fork", "category": "dish return", "confidence": 0.6}
        ]}"#;
        assert!(matches!(
            parse_response(body),
            Err(ClassifyError::Protocol(_))
        ));
    }

    #[test]
    fn test_parse_accepts_legacy_class_field_and_unknown_category() {
        let body = r#"{"detections": [
            {"class": "mystery object", "category": "metal", "confidence": 0.4}
        ]}"#;
        let parsed = parse_response(body).unwrap();
        assert_eq!(parsed.items[0].name, "mystery object");
        assert_eq!(parsed.items[0].category, Category::Unknown);
    }

    #[test]
    fn test_parse_clamps_out_of_range_confidence() {
        let body = r#"{"detections": [
            {"name": "napkin", "category": "trash", "confidence": 1.7},
            {"name": "fork", "category": "dish return", "confidence": -0.2}
        ]}"#;
        let parsed = parse_response(body).unwrap();
        assert_eq!(parsed.items[0].confidence, 1.0);
        assert_eq!(parsed.items[1].confidence, 0.0);
    }

    #[test]
    fn test_decode_annotated_round_trips_a_real_jpeg() {
        let mut jpeg = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 3))
            .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();
        let source = format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg));

        let annotated = decode_annotated(&source).unwrap();
        assert_eq!(annotated.width, 4);
        assert_eq!(annotated.height, 3);
        assert_eq!(annotated.data_url, source);
    }

    #[test]
    fn test_decode_annotated_rejects_garbage() {
        assert!(decode_annotated("data:image/jpeg;base64,!!!").is_err());
        assert!(decode_annotated("AAAA").is_err());
    }
}
