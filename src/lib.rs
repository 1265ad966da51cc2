//! `lectern` - hierarchical navigation and position-tracking engine
//!
//! The core of a multi-chapter document presenter: an immutable two-level
//! [`Outline`] is flattened into one traversable page sequence, a single
//! owned [`Position`] is kept in sync with panel clicks, next/previous
//! traversal, scroll tracking, and address-fragment changes, and two
//! presenters (the collapsible navigation panel and the content frame with
//! its swap transition) are derived from that state.
//!
//! Everything is single-threaded and event-driven: state changes are
//! synchronous reactions to a user intent, a scroll signal, or a fragment
//! signal, all funneled through [`Navigator`]'s four operations.

// Crate-level lint configuration
#![allow(clippy::cast_precision_loss)] // Intentional row/viewport math in f32
#![allow(clippy::cast_possible_truncation)] // Bounded index arithmetic
#![allow(clippy::cast_possible_wrap)] // Wrapping traversal uses signed steps
#![allow(clippy::cast_sign_loss)] // rem_euclid result is non-negative
#![allow(clippy::module_name_repetitions)] // Allow ScrollSync, PanelRow etc.
#![allow(clippy::missing_const_for_fn)] // Many accessors could be const, not critical

pub mod content;
pub mod deeplink;
pub mod error;
pub mod event;
pub mod flatten;
pub mod intent;
pub mod outline;
pub mod panel;
pub mod position;
pub mod presenter;
pub mod scroll;

// Re-export core types at crate root
pub use content::{AdvanceHint, ContentFrame, Transition, TransitionKind};
pub use deeplink::{FragmentHost, MemoryHost, apply_fragment, select_subsection};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use flatten::{FlatIndex, FlatPage, flatten};
pub use intent::Intent;
pub use outline::{Outline, Payload, Section, Subsection};
pub use panel::{NavPanel, PanelRow, Progress, RowFlags};
pub use position::{Navigator, Position};
pub use presenter::Presenter;
pub use scroll::{AnchorSpan, FocusBand, ScrollFocus, ScrollSync};
