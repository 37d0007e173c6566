//! Cross-frame form-membership queries.
//!
//! Card forms are often split across sibling iframes: the number field lives
//! in one frame, the CVC in another, both logically belonging to a form in
//! the parent. The parent answers "is this child frame part of one of your
//! forms" over the message transport. The transport is out of scope here;
//! what this module fixes is the policy: a mandatory deadline, and every
//! failure mode (timeout, transport error, negative answer) collapsing to
//! "not contained".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::error::FrameError;
use crate::hierarchy::FrameId;

/// A request sent to a sibling or ancestor frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FrameRequest {
    /// "Is the frame with these attributes embedded inside one of your
    /// detected forms?"
    #[serde(rename = "form")]
    Form {
        frame_id: FrameId,
        frame_attributes: Vec<String>,
    },
}

/// Answer to a [`FrameRequest::Form`] query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
}

/// Message transport to other frames (external collaborator).
#[async_trait]
pub trait FrameMessenger: Send + Sync {
    async fn request(&self, request: FrameRequest) -> Result<FrameResponse, FrameError>;
}

/// Ask the parent whether `frame_id` is embedded inside a known form.
///
/// Returns the parent's form id on a positive answer. Timeouts and transport
/// errors resolve to `None` - fail-closed, never surfaced to the user.
pub async fn frame_form_membership<M>(
    messenger: &M,
    frame_id: FrameId,
    frame_attributes: Vec<String>,
    deadline: Duration,
) -> Option<String>
where
    M: FrameMessenger + ?Sized,
{
    let request = FrameRequest::Form {
        frame_id,
        frame_attributes,
    };

    match timeout(deadline, messenger.request(request)).await {
        Ok(Ok(response)) if response.ok => response.form_id,
        Ok(Ok(_)) => None,
        Ok(Err(err)) => {
            debug!(frame_id, error = %err, "cross-frame form query failed");
            None
        }
        Err(_) => {
            debug!(frame_id, deadline_ms = deadline.as_millis() as u64, "cross-frame form query timed out");
            None
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
