//! Alert presentation.
//!
//! Stored alerts carry the Title/Body templates of the rule that fired plus
//! the triggering event. Presenting an alert renders both templates through a
//! [`TemplateRenderer`](crate::template::TemplateRenderer) and derives the
//! list-view attributes (severity, resolved flag, timestamp).

mod present;
mod types;

pub use present::{present, present_all};
pub use types::{AlertRecord, AlertView, STATE_RESOLVED};
