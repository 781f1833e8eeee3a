//! Post data as supplied by the data layer, and the snapshot the index keeps.

use serde::{Deserialize, Serialize};

/// A post as listed by the posts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListItem {
	pub slug: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	/// ISO 8601 date or RFC 3339 timestamp.
	pub publish_date: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub series: Option<String>,
	/// Minutes.
	#[serde(default)]
	pub reading_time: u32,
	/// Plain-text body excerpt used only for search.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_content: Option<String>,
}

impl PostListItem {
	pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			slug: slug.into(),
			title: title.into(),
			summary: None,
			publish_date: String::new(),
			tags: None,
			series: None,
			reading_time: 0,
			search_content: None,
		}
	}

	pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
		self.summary = Some(summary.into());
		self
	}

	pub fn with_publish_date(mut self, date: impl Into<String>) -> Self {
		self.publish_date = date.into();
		self
	}

	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = Some(tags.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_series(mut self, series: impl Into<String>) -> Self {
		self.series = Some(series.into());
		self
	}

	pub fn with_search_content(mut self, content: impl Into<String>) -> Self {
		self.search_content = Some(content.into());
		self
	}
}

/// The searchable fields of a post, frozen when the index is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostRecord {
	pub slug: String,
	pub title: String,
	pub summary: Option<String>,
	pub tags: Vec<String>,
	pub series: Option<String>,
	pub search_content: Option<String>,
}

impl From<&PostListItem> for PostRecord {
	fn from(post: &PostListItem) -> Self {
		Self {
			slug: post.slug.clone(),
			title: post.title.clone(),
			summary: post.summary.clone(),
			tags: post.tags.clone().unwrap_or_default(),
			series: post.series.clone(),
			search_content: post.search_content.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_deserializes_api_shape() {
		let json = r#"{
			"slug": "on-free-will",
			"title": "On Free Will",
			"publishDate": "2024-03-01",
			"tags": ["freedom", "augustine"],
			"readingTime": 7,
			"searchContent": "Whether the will is free"
		}"#;
		let post: PostListItem = serde_json::from_str(json).unwrap();
		assert_eq!(post.slug, "on-free-will");
		assert_eq!(post.summary, None);
		assert_eq!(post.reading_time, 7);

		let record = PostRecord::from(&post);
		assert_eq!(record.tags, vec!["freedom", "augustine"]);
		assert_eq!(record.search_content.as_deref(), Some("Whether the will is free"));
	}
}
