//! DOM readiness detection for asynchronously rendered pages

pub mod detector;
pub mod predicate;

pub use detector::{ReadyElement, wait_for_element, wait_for_element_default};
pub use predicate::{contains_text, non_empty_text};
