/*!
 * Report Module
 * Observers that turn wait events into output
 */

mod json;
mod recording;
mod text;
pub mod traits;

pub use json::JsonReporter;
pub use recording::RecordingObserver;
pub use text::TextReporter;
pub use traits::StatusObserver;
