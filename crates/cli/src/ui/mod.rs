//! Terminal UI components for hookshelf
//!
//! - Progress indicators
//! - Status icons

pub mod icons;
pub mod progress;

pub use icons::StatusIcon;
pub use progress::create_spinner;
