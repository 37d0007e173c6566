use super::*;
use async_trait::async_trait;
use formguard_core::{DomNode, DomSnapshot, SnapshotBuilder};
use formguard_core::{FieldType, FormType};
use formguard_frames::FrameInfo;

struct StaticFrames(Vec<FrameInfo>);

#[async_trait]
impl FrameEnumerator for StaticFrames {
    async fn all_frames(&self, _tab_id: TabId) -> Result<Option<Vec<FrameInfo>>, FrameError> {
        Ok(Some(self.0.clone()))
    }
}

/// Enumerator that must never be reached.
struct Unreachable;

#[async_trait]
impl FrameEnumerator for Unreachable {
    async fn all_frames(&self, _tab_id: TabId) -> Result<Option<Vec<FrameInfo>>, FrameError> {
        panic!("frame enumeration not expected");
    }
}

fn frame(frame_id: i64, parent_frame_id: i64, url: &str) -> FrameInfo {
    FrameInfo {
        frame_id,
        parent_frame_id,
        url: Some(url.to_string()),
    }
}

fn login_snapshot() -> DomSnapshot {
    SnapshotBuilder::new()
        .node(DomNode::new(1, "form").with_attr("id", "login-form"))
        .node(
            DomNode::new(2, "input")
                .with_parent(1)
                .with_attr("type", "text")
                .with_attr("name", "username")
                .with_rect(0.0, 0.0, 200.0, 30.0),
        )
        .node(
            DomNode::new(3, "input")
                .with_parent(1)
                .with_attr("type", "password")
                .with_attr("name", "password")
                .with_rect(0.0, 40.0, 200.0, 30.0),
        )
        .node(
            DomNode::new(4, "button")
                .with_parent(1)
                .with_rect(0.0, 80.0, 120.0, 30.0)
                .with_text("Sign in"),
        )
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_detect_then_offer_in_trusted_frame() {
    let mut engine = ContentEngine::new("example.com");
    let prediction = engine.detect(&login_snapshot()).unwrap();
    assert_eq!(prediction.forms.len(), 1);
    assert_eq!(prediction.forms[0].form_type, FormType::Login);

    let enumerator = StaticFrames(vec![
        frame(0, -1, "https://example.com/"),
        frame(1, 0, "https://login.example.com/embed"),
    ]);
    let offer = offer_autofill(&enumerator, 7, "example.com", 1, prediction)
        .await
        .unwrap()
        .expect("trusted frame should receive an offer");

    assert!(offer.frames.contains_key(&0));
    assert!(offer.frames.contains_key(&1));
    assert!(!offer.frames[&1].cross_origin);
    let types: Vec<FieldType> = offer.prediction.forms[0]
        .fields
        .iter()
        .map(|f| f.field_type)
        .collect();
    assert_eq!(types, vec![FieldType::Username, FieldType::PasswordCurrent]);
}

#[tokio::test]
async fn test_offer_withheld_when_source_frame_insecure() {
    let mut engine = ContentEngine::new("example.com");
    let prediction = engine.detect(&login_snapshot()).unwrap();

    let enumerator = StaticFrames(vec![
        frame(0, -1, "https://example.com/"),
        frame(1, 0, "http://example.com/embed"),
    ]);
    let offer = offer_autofill(&enumerator, 7, "example.com", 1, prediction)
        .await
        .unwrap();
    assert!(offer.is_none());
}

#[tokio::test]
async fn test_offer_withheld_for_unknown_source_frame() {
    let mut engine = ContentEngine::new("example.com");
    let prediction = engine.detect(&login_snapshot()).unwrap();

    let enumerator = StaticFrames(vec![frame(0, -1, "https://example.com/")]);
    let offer = offer_autofill(&enumerator, 7, "example.com", 9, prediction)
        .await
        .unwrap();
    assert!(offer.is_none());
}

#[tokio::test]
async fn test_empty_prediction_short_circuits() {
    let offer = offer_autofill(&Unreachable, 7, "example.com", 0, Prediction::default())
        .await
        .unwrap();
    assert!(offer.is_none());
}

#[tokio::test]
async fn test_enumeration_error_propagates() {
    struct Failing;

    #[async_trait]
    impl FrameEnumerator for Failing {
        async fn all_frames(&self, _tab_id: TabId) -> Result<Option<Vec<FrameInfo>>, FrameError> {
            Err(FrameError::Enumeration("tab gone".into()))
        }
    }

    let mut engine = ContentEngine::new("example.com");
    let prediction = engine.detect(&login_snapshot()).unwrap();
    let err = offer_autofill(&Failing, 7, "example.com", 0, prediction)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Frame(_)));
}

#[tokio::test]
async fn test_rules_payload_excludes_form() {
    let mut engine = ContentEngine::new("example.com")
        .with_rules_payload(r##"{"version":"1","exclude":["#login-form"]}"##);
    let prediction = engine.detect(&login_snapshot()).unwrap();
    assert!(prediction.is_empty());
}

#[tokio::test]
async fn test_malformed_rules_payload_is_dropped() {
    let mut engine = ContentEngine::new("example.com").with_rules_payload("not json");
    let prediction = engine.detect(&login_snapshot()).unwrap();
    assert_eq!(prediction.forms.len(), 1);
}
