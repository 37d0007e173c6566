use super::*;
use async_trait::async_trait;
use std::time::Duration;

const DEADLINE: Duration = Duration::from_millis(100);

struct Answer(FrameResponse);

#[async_trait]
impl FrameMessenger for Answer {
    async fn request(&self, _request: FrameRequest) -> Result<FrameResponse, FrameError> {
        Ok(self.0.clone())
    }
}

struct Failing;

#[async_trait]
impl FrameMessenger for Failing {
    async fn request(&self, _request: FrameRequest) -> Result<FrameResponse, FrameError> {
        Err(FrameError::Query("port closed".into()))
    }
}

struct Hanging;

#[async_trait]
impl FrameMessenger for Hanging {
    async fn request(&self, _request: FrameRequest) -> Result<FrameResponse, FrameError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        unreachable!()
    }
}

#[tokio::test]
async fn test_positive_answer_returns_form_id() {
    let messenger = Answer(FrameResponse {
        ok: true,
        form_id: Some("form-7".into()),
    });
    let result = frame_form_membership(&messenger, 3, vec!["name=card".into()], DEADLINE).await;
    assert_eq!(result.as_deref(), Some("form-7"));
}

#[tokio::test]
async fn test_negative_answer_is_not_contained() {
    let messenger = Answer(FrameResponse {
        ok: false,
        form_id: Some("ignored".into()),
    });
    let result = frame_form_membership(&messenger, 3, vec![], DEADLINE).await;
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_transport_error_fails_closed() {
    assert_eq!(frame_form_membership(&Failing, 3, vec![], DEADLINE).await, None);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_fails_closed() {
    assert_eq!(frame_form_membership(&Hanging, 3, vec![], DEADLINE).await, None);
}

#[test]
fn test_request_wire_format() {
    let request = FrameRequest::Form {
        frame_id: 4,
        frame_attributes: vec!["src".into()],
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["type"], "form");
    assert_eq!(json["frameId"], 4);
    assert_eq!(json["frameAttributes"][0], "src");

    let response: FrameResponse = serde_json::from_str(r#"{"ok":true,"formId":"f1"}"#).unwrap();
    assert!(response.ok);
    assert_eq!(response.form_id.as_deref(), Some("f1"));
}
