//! State and presentation contract of the search modal.
//!
//! [`SearchModal`] owns everything the modal needs between keystrokes: the
//! open flag, the query, the post list it indexed and the active row. The
//! host renders whatever [`SearchModal::view`] returns and forwards key
//! presses to [`SearchModal::key_down`].

use crate::error::SearchError;
use crate::highlight::{Segment, highlight};
use crate::index::{SearchIndex, SearchResult};
use crate::options::{SearchField, SearchOptions};
use crate::post::PostListItem;
use crate::series::series_aggregate;
use crate::snippet::{Snippet, extract_snippet};
use chrono::{DateTime, NaiveDate};
use std::fmt;
use std::rc::Rc;
use therefore_dom::{NavigationState, Navigator};

/// Shown while the query is too short.
pub const PROMPT_TEXT: &str = "Type at least 2 characters to search";

/// Tags shown per result card.
pub const MAX_CARD_TAGS: usize = 3;

/// Series page path used by the aggregate card.
pub const SERIES_PATH: &str = "/series";

/// Path of a post page.
pub fn post_path(slug: &str) -> String {
	format!("/posts/{}", slug)
}

/// Formats a publish date as `Jan 2, 2006`.
///
/// Accepts RFC 3339 timestamps and `YYYY-MM-DD` dates; anything else is
/// returned unchanged.
pub fn format_publish_date(raw: &str) -> String {
	let date = DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.date_naive())
		.or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
	match date {
		Ok(date) => date.format("%b %-d, %Y").to_string(),
		Err(_) => raw.to_string(),
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCard {
	pub series: String,
	pub hits: usize,
	pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
	pub slug: String,
	pub title: Vec<Segment>,
	pub summary: Option<Vec<Segment>>,
	/// Body excerpt, only when the body matched and the summary did not.
	pub snippet: Option<Snippet>,
	pub date: String,
	pub tags: Vec<String>,
	pub active: bool,
}

/// One selectable row of the result list.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultCard {
	Series(SeriesCard),
	Post(PostCard),
}

impl ResultCard {
	pub fn is_active(&self) -> bool {
		match self {
			Self::Series(card) => card.active,
			Self::Post(card) => card.active,
		}
	}
}

/// What the modal should display.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalView {
	Closed,
	/// Posts have not arrived yet.
	Loading,
	/// Query below the minimum length.
	Prompt,
	NoResults { query: String },
	Results(Vec<ResultCard>),
}

impl ModalView {
	/// Message shown in place of results, if any.
	pub fn message(&self) -> Option<String> {
		match self {
			Self::Prompt => Some(PROMPT_TEXT.to_string()),
			Self::NoResults { query } => Some(format!("No posts found for \"{}\"", query)),
			_ => None,
		}
	}
}

enum Target {
	Series(String),
	Post(String),
}

pub struct SearchModal {
	options: SearchOptions,
	navigator: Rc<dyn Navigator>,
	open: bool,
	query: String,
	posts: Option<Rc<Vec<PostListItem>>>,
	index: Option<SearchIndex>,
	index_builds: usize,
	active: usize,
}

impl fmt::Debug for SearchModal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchModal")
			.field("open", &self.open)
			.field("query", &self.query)
			.field("posts", &self.posts.as_ref().map(|p| p.len()))
			.field("index_builds", &self.index_builds)
			.field("active", &self.active)
			.finish()
	}
}

impl SearchModal {
	pub fn new(options: SearchOptions, navigator: Rc<dyn Navigator>) -> Result<Self, SearchError> {
		options.validate()?;
		Ok(Self {
			options,
			navigator,
			open: false,
			query: String::new(),
			posts: None,
			index: None,
			index_builds: 0,
			active: 0,
		})
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn active(&self) -> usize {
		self.active
	}

	/// Times the index has been (re)built.
	pub fn index_builds(&self) -> usize {
		self.index_builds
	}

	pub fn open(&mut self) {
		self.open = true;
		self.active = 0;
	}

	/// Closes the modal and clears the query.
	pub fn close(&mut self) {
		self.open = false;
		self.query.clear();
		self.active = 0;
	}

	/// Supplies the post list; `None` while it is still loading.
	///
	/// The index is rebuilt only when a different list is supplied.
	pub fn set_posts(&mut self, posts: Option<Rc<Vec<PostListItem>>>) -> Result<(), SearchError> {
		let unchanged = match (&self.posts, &posts) {
			(Some(current), Some(next)) => Rc::ptr_eq(current, next),
			(None, None) => true,
			_ => false,
		};
		if unchanged {
			return Ok(());
		}

		self.index = match &posts {
			Some(list) => {
				let index = SearchIndex::build(list, self.options.clone())?;
				self.index_builds += 1;
				tracing::debug!(posts = list.len(), builds = self.index_builds, "search index rebuilt");
				Some(index)
			}
			None => None,
		};
		self.posts = posts;
		self.active = 0;
		Ok(())
	}

	pub fn set_query(&mut self, query: impl Into<String>) {
		self.query = query.into();
		self.active = 0;
	}

	fn ranked(&self) -> Vec<SearchResult> {
		match &self.index {
			Some(index) => index.search(&self.query, self.options.limit),
			None => Vec::new(),
		}
	}

	fn targets(&self) -> Vec<Target> {
		let Some(index) = &self.index else {
			return Vec::new();
		};
		let results = self.ranked();
		let mut targets = Vec::with_capacity(results.len() + 1);
		let series = results
			.iter()
			.map(|r| index.record(r.ref_index).and_then(|p| p.series.as_deref()));
		if let Some(aggregate) = series_aggregate(series) {
			targets.push(Target::Series(aggregate.series));
		}
		targets.extend(results.into_iter().map(|r| Target::Post(r.slug)));
		targets
	}

	/// Handles a key press while open. Returns `true` when the key was
	/// consumed.
	pub fn key_down(&mut self, key: &str) -> bool {
		if !self.open {
			return false;
		}
		match key {
			"ArrowDown" | "ArrowUp" => {
				let count = self.targets().len();
				if count > 0 {
					self.active = if key == "ArrowDown" {
						(self.active + 1) % count
					} else {
						(self.active + count - 1) % count
					};
				}
				true
			}
			"Enter" => self.select(self.active),
			"Escape" => {
				self.close();
				true
			}
			_ => false,
		}
	}

	/// Activates row `row`: closes the modal and navigates. Returns `false`
	/// when there is no such row.
	pub fn select(&mut self, row: usize) -> bool {
		let Some(target) = self.targets().into_iter().nth(row) else {
			return false;
		};
		self.close();
		match target {
			Target::Post(slug) => {
				tracing::debug!(%slug, "search result selected");
				self.navigator.navigate(&post_path(&slug), None);
			}
			Target::Series(series) => {
				tracing::debug!(%series, "series result selected");
				self.navigator.navigate(SERIES_PATH, Some(NavigationState::open_series(series)));
			}
		}
		true
	}

	pub fn view(&self) -> ModalView {
		if !self.open {
			return ModalView::Closed;
		}
		let Some(index) = &self.index else {
			return ModalView::Loading;
		};
		if self.query.chars().count() < self.options.min_query_length {
			return ModalView::Prompt;
		}

		let results = self.ranked();
		if results.is_empty() {
			return ModalView::NoResults {
				query: self.query.clone(),
			};
		}

		let mut cards = Vec::with_capacity(results.len() + 1);
		let series = results
			.iter()
			.map(|r| index.record(r.ref_index).and_then(|p| p.series.as_deref()));
		if let Some(aggregate) = series_aggregate(series) {
			cards.push(ResultCard::Series(SeriesCard {
				series: aggregate.series,
				hits: aggregate.hits,
				active: false,
			}));
		}
		for result in &results {
			if let Some(card) = self.post_card(result) {
				cards.push(ResultCard::Post(card));
			}
		}
		for (row, card) in cards.iter_mut().enumerate() {
			let active = row == self.active;
			match card {
				ResultCard::Series(card) => card.active = active,
				ResultCard::Post(card) => card.active = active,
			}
		}
		ModalView::Results(cards)
	}

	fn post_card(&self, result: &SearchResult) -> Option<PostCard> {
		let post = self.posts.as_ref()?.get(result.ref_index)?;
		let spans_of = |field| {
			result
				.field_match(field)
				.map(|m| m.spans.clone())
				.unwrap_or_default()
		};

		let summary_match = result.field_match(SearchField::Summary);
		let snippet = match (summary_match, result.field_match(SearchField::SearchContent)) {
			(None, Some(content)) => extract_snippet(&content.value, &content.spans, self.options.snippet_radius),
			_ => None,
		};

		Some(PostCard {
			slug: post.slug.clone(),
			title: highlight(&post.title, &spans_of(SearchField::Title)),
			summary: post
				.summary
				.as_deref()
				.map(|summary| highlight(summary, &spans_of(SearchField::Summary))),
			snippet,
			date: format_publish_date(&post.publish_date),
			tags: post
				.tags
				.iter()
				.flatten()
				.take(MAX_CARD_TAGS)
				.cloned()
				.collect(),
			active: false,
		})
	}
}
