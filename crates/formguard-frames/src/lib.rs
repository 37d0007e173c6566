//! # FormGuard Frames
//!
//! Frame hierarchy tracking and autofill trust validation for tabs composed
//! of nested iframes.
//!
//! Autofill sits on a security boundary: offering credentials inside the
//! wrong iframe leaks them to whoever embedded it. This crate builds a
//! parent→child map of every frame in a tab, annotates each frame with its
//! origin (registrable domain) and transport security, and proves, frame by
//! frame, ancestor by ancestor, which frames are safe targets for one
//! autofill attempt.
//!
//! Every decision is fail-closed: an orphaned frame, an unparseable URL, a
//! non-https ancestor or a timed-out cross-frame query all resolve to "no
//! autofill", never to an error surfaced to the user.
//!
//! Trust is never cached across attempts. The frame map is rebuilt from the
//! host's live frame enumeration for every decision, so a page that
//! navigates mid-decision cannot stage trust from a previous layout.

mod error;
mod hierarchy;
mod query;
mod trust;

pub use error::FrameError;
pub use hierarchy::{
    FrameId, FrameInfo, FrameMap, FrameNode, OriginResolution, TOP_FRAME_ID, build_frame_map,
    frame_path, tab_frames,
};
pub use query::{FrameRequest, FrameResponse, FrameMessenger, frame_form_membership};
pub use trust::{
    AutofillableFrame, AutofillableFrames, FrameEnumerator, TabId, autofillable_frames,
    validate_frame_path,
};
