//! Client-side navigation contract.
//!
//! Widgets never touch history themselves; they hand a path and an optional
//! state payload to whatever [`Navigator`] the host supplied.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// Visual transition requested for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
	Slide,
	Fade,
}

/// State payload carried alongside a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub open_series: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transition: Option<TransitionKind>,
}

impl NavigationState {
	/// State asking the series page to expand `series`.
	pub fn open_series(series: impl Into<String>) -> Self {
		Self {
			open_series: Some(series.into()),
			transition: None,
		}
	}

	pub fn with_transition(transition: TransitionKind) -> Self {
		Self {
			open_series: None,
			transition: Some(transition),
		}
	}
}

/// Host-supplied navigation function.
pub trait Navigator {
	fn navigate(&self, path: &str, state: Option<NavigationState>);
}

impl<F> Navigator for F
where
	F: Fn(&str, Option<NavigationState>),
{
	fn navigate(&self, path: &str, state: Option<NavigationState>) {
		self(path, state)
	}
}

/// Navigator that drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
	fn navigate(&self, path: &str, _state: Option<NavigationState>) {
		tracing::debug!(path, "navigation ignored");
	}
}

/// A recorded navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
	pub path: String,
	pub state: Option<NavigationState>,
}

/// Navigator that keeps every request for later inspection or replay.
#[derive(Default)]
pub struct RecordingNavigator {
	requests: RefCell<Vec<NavigationRequest>>,
}

impl fmt::Debug for RecordingNavigator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordingNavigator")
			.field("requests", &self.requests.borrow().len())
			.finish()
	}
}

impl RecordingNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn requests(&self) -> Vec<NavigationRequest> {
		self.requests.borrow().clone()
	}

	pub fn last(&self) -> Option<NavigationRequest> {
		self.requests.borrow().last().cloned()
	}

	/// Removes and returns everything recorded so far.
	pub fn take(&self) -> Vec<NavigationRequest> {
		std::mem::take(&mut *self.requests.borrow_mut())
	}
}

impl Navigator for RecordingNavigator {
	fn navigate(&self, path: &str, state: Option<NavigationState>) {
		self.requests.borrow_mut().push(NavigationRequest {
			path: path.to_string(),
			state,
		});
	}
}
