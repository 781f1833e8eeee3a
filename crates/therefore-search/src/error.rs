//! Search errors.

/// Errors raised while configuring or building a search index.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
	/// An option is outside its accepted range.
	#[error("invalid search option '{option}': {message}")]
	InvalidOption { option: &'static str, message: String },
}

impl SearchError {
	pub(crate) fn invalid(option: &'static str, message: impl Into<String>) -> Self {
		Self::InvalidOption {
			option,
			message: message.into(),
		}
	}
}
