//! Frame trust validator.
//!
//! Given a frame that asked for autofill, proves which frames in the tab are
//! safe targets: every ancestor on the way to the top frame must be https
//! and belong to the trusted-origin set grown from the trigger's real
//! ancestry. The trusted set is rebuilt from scratch for each attempt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::error::FrameError;
use crate::hierarchy::{
    FrameId, FrameInfo, FrameMap, FrameNode, OriginResolution, TOP_FRAME_ID, build_frame_map,
    frame_path,
};

/// Host tab identifier.
pub type TabId = i64;

/// Host collaborator enumerating the frames currently alive in a tab.
///
/// Hosts may report `Ok(None)` when a tab has no frame tree; callers treat
/// that exactly like an empty list.
#[async_trait]
pub trait FrameEnumerator: Send + Sync {
    async fn all_frames(&self, tab_id: TabId) -> Result<Option<Vec<FrameInfo>>, FrameError>;
}

/// A frame cleared for autofill in one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillableFrame {
    pub frame: FrameNode,
    /// Whether the frame's origin differs from the triggering origin.
    pub cross_origin: bool,
}

/// Frames cleared for autofill, keyed by frame id.
pub type AutofillableFrames = BTreeMap<FrameId, AutofillableFrame>;

/// Validate the full ancestry path of a frame against a trusted-origin set.
///
/// Every frame on the path, the frame itself included, must be https and
/// have a trusted origin. Any miss, or an unknown frame id, fails the whole
/// path. Removing origins from `trusted_origins` can only invalidate paths,
/// never validate new ones.
pub fn validate_frame_path(
    map: &FrameMap,
    frame_id: FrameId,
    trusted_origins: &HashSet<String>,
) -> bool {
    let path = frame_path(map, frame_id);
    if path.is_empty() {
        return false;
    }

    path.iter().all(|id| {
        map.get(id).is_some_and(|frame| {
            frame.secure == Some(true)
                && frame
                    .origin
                    .as_deref()
                    .is_some_and(|origin| trusted_origins.contains(origin))
        })
    })
}

/// Resolve the set of frames safe to autofill for one attempt.
///
/// Fail-closed at every step:
///
/// 1. Build the frame map with origin/secure resolution.
/// 2. Missing or non-https top/source frame ⇒ empty (mixed-content pages
///    never get autofill).
/// 3. Trust seeds with the triggering origin, plus the top-frame origin when
///    the trigger is not the top frame.
/// 4. Each literal ancestor of the source frame is trusted *because* it is
///    an ancestor.
/// 5. The source frame's own ancestry must validate, unless it is the top
///    frame itself.
/// 6. A frame is kept only if it is https, its origin is the trigger origin
///    (or the top origin for a sub-frame trigger), and its entire ancestry
///    validates against the trusted set.
pub async fn autofillable_frames<E>(
    enumerator: &E,
    tab_id: TabId,
    source_origin: &str,
    source_frame_id: FrameId,
) -> Result<AutofillableFrames, FrameError>
where
    E: FrameEnumerator + ?Sized,
{
    let mut result = AutofillableFrames::new();

    let frames = enumerator.all_frames(tab_id).await?;
    let map = build_frame_map(
        frames.as_deref().unwrap_or(&[]),
        OriginResolution::Resolve,
    );

    let Some(top) = map.get(&TOP_FRAME_ID) else {
        debug!(tab_id, "no top frame; refusing autofill");
        return Ok(result);
    };
    let Some(source) = map.get(&source_frame_id) else {
        debug!(tab_id, source_frame_id, "unknown source frame; refusing autofill");
        return Ok(result);
    };
    if top.secure != Some(true) || source.secure != Some(true) {
        debug!(tab_id, source_frame_id, "insecure top or source frame; refusing autofill");
        return Ok(result);
    }

    // Ancestry gate: origins a path may traverse.
    let mut trusted_origins: HashSet<String> = HashSet::from([source_origin.to_string()]);
    // Eligibility gate: origins a returned frame may itself have. Stricter
    // than the ancestry gate on purpose - autofill is offered only in the
    // origin that asked, or the top-level page.
    let mut autofillable_origins = trusted_origins.clone();

    if source_frame_id != TOP_FRAME_ID {
        if let Some(origin) = &top.origin {
            trusted_origins.insert(origin.clone());
            autofillable_origins.insert(origin.clone());
        }
    }

    for ancestor in frame_path(&map, source_frame_id).into_iter().skip(1) {
        if let Some(origin) = map.get(&ancestor).and_then(|frame| frame.origin.clone()) {
            trusted_origins.insert(origin);
        }
    }

    if source_frame_id != TOP_FRAME_ID
        && !validate_frame_path(&map, source_frame_id, &trusted_origins)
    {
        debug!(tab_id, source_frame_id, "source frame ancestry failed validation");
        return Ok(result);
    }

    for (id, frame) in &map {
        if frame.secure != Some(true) {
            continue;
        }
        let Some(origin) = frame.origin.as_deref() else {
            continue;
        };
        if !autofillable_origins.contains(origin) {
            continue;
        }
        if !validate_frame_path(&map, *id, &trusted_origins) {
            continue;
        }
        result.insert(
            *id,
            AutofillableFrame {
                frame: frame.clone(),
                cross_origin: origin != source_origin,
            },
        );
    }

    Ok(result)
}

#[cfg(test)]
#[path = "trust_tests.rs"]
mod tests;
