//! Frame hierarchy tracker.
//!
//! Builds a parent→child map of every frame alive in a tab from the host's
//! frame enumeration, optionally annotating each frame with its origin and
//! transport security.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;
use url::Url;

use crate::error::FrameError;
use crate::trust::{FrameEnumerator, TabId};

/// Browsing-context frame identifier; 0 is the top frame.
pub type FrameId = i64;

/// The main frame of a tab.
pub const TOP_FRAME_ID: FrameId = 0;

/// Sentinel parent id marking a root frame in host enumerations.
const NO_PARENT: FrameId = -1;

/// One frame as reported by the host's frame enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    pub frame_id: FrameId,
    /// `-1` for root frames.
    pub parent_frame_id: FrameId,
    #[serde(default)]
    pub url: Option<String>,
}

/// One frame in a built [`FrameMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    pub frame_id: FrameId,
    /// `None` for root-equivalent frames.
    pub parent: Option<FrameId>,
    /// Registrable domain of the frame URL's host; `None` when unresolved or
    /// unresolvable (opaque schemes, missing host, skipped resolution).
    pub origin: Option<String>,
    /// `Some(true)` iff the frame URL scheme is https; `None` when
    /// unresolved or the scheme carries no transport security semantics.
    pub secure: Option<bool>,
}

/// Parent→child map of the frames in a tab, keyed by frame id.
pub type FrameMap = BTreeMap<FrameId, FrameNode>;

/// Whether [`build_frame_map`] should resolve origin/secure annotations.
///
/// Shape-only consumers skip resolution: URL parsing is pure cost when no
/// trust decision follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginResolution {
    Skip,
    Resolve,
}

/// Build a frame map from a host enumeration.
///
/// Root-equivalent frames (`frame_id == 0` or `parent_frame_id == -1`) are
/// recorded with no parent. Any other frame is recorded only if its declared
/// parent was already recorded; otherwise it is dropped entirely: a frame
/// whose ancestry cannot be verified must never be trusted. The drop rule is
/// order-dependent by design: host enumerations list parents before their
/// children.
pub fn build_frame_map(frames: &[FrameInfo], resolution: OriginResolution) -> FrameMap {
    let mut map = FrameMap::new();

    for info in frames {
        let root = info.frame_id == TOP_FRAME_ID || info.parent_frame_id == NO_PARENT;
        if !root && !map.contains_key(&info.parent_frame_id) {
            debug!(
                frame_id = info.frame_id,
                parent_frame_id = info.parent_frame_id,
                "dropping frame with unverifiable parent"
            );
            continue;
        }

        let (origin, secure) = match resolution {
            OriginResolution::Skip => (None, None),
            OriginResolution::Resolve => resolve_origin(info.url.as_deref()),
        };

        map.insert(
            info.frame_id,
            FrameNode {
                frame_id: info.frame_id,
                parent: (!root).then_some(info.parent_frame_id),
                origin,
                secure,
            },
        );
    }

    map
}

/// Fetch the frames of a tab and build a shape-only map (no origin
/// resolution). A `None` or empty enumeration yields an empty map.
pub async fn tab_frames<E>(enumerator: &E, tab_id: TabId) -> Result<FrameMap, FrameError>
where
    E: FrameEnumerator + ?Sized,
{
    let frames = enumerator.all_frames(tab_id).await?;
    Ok(build_frame_map(
        frames.as_deref().unwrap_or(&[]),
        OriginResolution::Skip,
    ))
}

/// Ordered frame ids from `frame_id` up to its root, leaf first.
///
/// Unknown ids yield an empty path; a frame whose parent is absent from the
/// map ends the path there. The walk keeps a visited set so a cyclic or
/// self-parented map, which is attacker-influenced input, terminates instead of
/// spinning.
pub fn frame_path(map: &FrameMap, frame_id: FrameId) -> Vec<FrameId> {
    let Some(mut node) = map.get(&frame_id) else {
        return Vec::new();
    };

    let mut path = vec![frame_id];
    let mut visited: HashSet<FrameId> = HashSet::from([frame_id]);

    while let Some(parent) = node.parent {
        if !visited.insert(parent) {
            break;
        }
        match map.get(&parent) {
            Some(next) => {
                path.push(parent);
                node = next;
            }
            None => break,
        }
    }

    path
}

/// Resolve `(origin, secure)` from a frame URL.
///
/// Origin is the registrable domain of the URL host (`payments.stripe.com`
/// → `stripe.com`), so sibling subdomains of one operator compare equal.
/// Opaque or hostless schemes (`about:`, `javascript:`, `data:`) resolve to
/// neither an origin nor a security bit and fail closed downstream.
fn resolve_origin(url: Option<&str>) -> (Option<String>, Option<bool>) {
    let Some(url) = url else {
        return (None, None);
    };
    let Ok(parsed) = Url::parse(url) else {
        return (None, None);
    };

    let secure = match parsed.scheme() {
        "https" => Some(true),
        "http" => Some(false),
        _ => None,
    };

    let origin = parsed
        .host_str()
        .and_then(|host| psl::domain_str(host))
        .map(|domain| domain.to_ascii_lowercase());

    (origin, secure)
}

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;
