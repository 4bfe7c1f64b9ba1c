//! Animation support for the tag field.
//!
//! Only one thing animates: the field's natural size, when chips are added,
//! removed or rewrap. See [`SizeTransition`].
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tagflow::widget::animation::SizeTransition;
//! use tagflow_core::Size;
//!
//! let mut transition = SizeTransition::new();
//! let start = Instant::now();
//! transition.start(Size::new(300.0, 24.0), Size::new(300.0, 49.0), start);
//!
//! let frame = transition.update(start + Duration::from_millis(100));
//! assert!(frame.is_running());
//! ```

mod easing;
mod transition;

pub use easing::{Easing, ease, lerp_eased};
pub use transition::{DEFAULT_SIZE_DURATION, SizeTransition, TransitionState};
