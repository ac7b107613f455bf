//! Conversion of ZWO workout documents into Hammerhead workout records.
//!
//! A ZWO file looks like
//!
//! ```xml
//! <workout_file>
//!   <name>Sweet spot</name>
//!   <workout>
//!     <SteadyState Duration="300" Power="0.65" Cadence="90"/>
//!   </workout>
//! </workout_file>
//! ```
//!
//! Only `SteadyState` segments are converted. `Power` is a fraction of FTP
//! and becomes a whole percentage, truncated toward zero.

use karoosync_client::workout::{DEFAULT_WORKOUT_NAME, WORKOUT_SOURCE};
use karoosync_client::{Workout, WorkoutStep};
use roxmltree::{Document, Node};

use crate::error::{SyncError, SyncResult};

const STEADY_STATE: &str = "SteadyState";

/// Convert a ZWO document into a workout planned on `planned_date`.
///
/// Pure: the same document and date always give the same workout. Fails with
/// [`SyncError::MalformedInput`] when the document is not well-formed XML or
/// a step lacks a usable `Duration`; no partial workout is returned.
pub fn convert(document: &str, planned_date: &str) -> SyncResult<Workout> {
    let doc = Document::parse(document)
        .map_err(|e| SyncError::MalformedInput(format!("not a ZWO document: {e}")))?;

    let name = doc
        .descendants()
        .find(|n| n.has_tag_name("name"))
        .map(text_content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_WORKOUT_NAME.to_string());

    let structure = doc
        .descendants()
        .filter(|n| n.has_tag_name(STEADY_STATE))
        .enumerate()
        .map(|(index, node)| steady_step(index, node))
        .collect::<SyncResult<Vec<_>>>()?;

    let skipped: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("workout"))
        .flat_map(|w| w.children().filter(Node::is_element))
        .filter(|n| !n.has_tag_name(STEADY_STATE))
        .map(|n| n.tag_name().name())
        .collect();
    if !skipped.is_empty() {
        tracing::warn!(
            workout = %name,
            skipped = ?skipped,
            "only SteadyState segments are supported; other segments were left out"
        );
    }

    Ok(Workout {
        name,
        source: WORKOUT_SOURCE.to_string(),
        structure,
        planned_date: planned_date.to_string(),
    })
}

/// All text below a node, like the DOM's `textContent`.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

/// Build one step from its own attributes only.
fn steady_step(index: usize, node: Node<'_, '_>) -> SyncResult<WorkoutStep> {
    let malformed = |what: String| SyncError::MalformedInput(format!("step {}: {what}", index + 1));

    let duration = node
        .attribute("Duration")
        .ok_or_else(|| malformed("missing Duration".into()))?;
    let duration = duration
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(format!("Duration {duration:?} is not a whole number of seconds")))?;

    let power = match present(node, "Power") {
        Some(raw) => Some(power_percent(raw).ok_or_else(|| {
            malformed(format!("Power {raw:?} is not a number"))
        })?),
        None => None,
    };

    let cadence = match present(node, "Cadence") {
        Some(raw) => Some(
            raw.trim()
                .parse::<i64>()
                .map_err(|_| malformed(format!("Cadence {raw:?} is not a whole number")))?,
        ),
        None => None,
    };

    Ok(WorkoutStep::steady(duration, power, cadence))
}

/// An attribute with a non-empty value.
fn present<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.trim().is_empty())
}

/// `0.75` -> `75`. Truncates toward zero, so `0.559` is `55`, not `56`.
pub fn power_percent(raw: &str) -> Option<i64> {
    let fraction = raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some((fraction * 100.0).trunc() as i64)
}
