//! Compound simple selectors.
//!
//! Supports the subset of CSS the hydration widgets need: a tag name,
//! `.class`, `#id`, `[attr]` and `[attr=value]` (value optionally quoted),
//! combined into one compound selector such as `a.tag-link` or
//! `span[role='tooltip']`. Combinators are not supported.

use crate::error::DomError;
use crate::node::ElementData;
use std::str::FromStr;

/// A single simple selector or a conjunction of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// Matches every element.
	Any,
	Tag(String),
	Class(String),
	Id(String),
	Attr(String),
	AttrEq(String, String),
	/// All inner selectors must match.
	And(Vec<Selector>),
}

impl Selector {
	pub fn tag(tag: impl Into<String>) -> Self {
		Self::Tag(tag.into().to_ascii_lowercase())
	}

	pub fn class(class: impl Into<String>) -> Self {
		Self::Class(class.into())
	}

	pub fn id(id: impl Into<String>) -> Self {
		Self::Id(id.into())
	}

	pub fn attr(name: impl Into<String>) -> Self {
		Self::Attr(name.into())
	}

	pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::AttrEq(name.into(), value.into())
	}

	/// Combines two selectors into a conjunction.
	pub fn and(self, other: Selector) -> Self {
		match self {
			Self::And(mut parts) => {
				parts.push(other);
				Self::And(parts)
			}
			Self::Any => other,
			first => Self::And(vec![first, other]),
		}
	}

	/// Parses a compound selector.
	pub fn parse(input: &str) -> Result<Self, DomError> {
		SelectorParser::new(input).parse()
	}

	pub(crate) fn matches(&self, el: &ElementData) -> bool {
		match self {
			Self::Any => true,
			Self::Tag(tag) => el.tag == *tag,
			Self::Class(class) => el.has_class(class),
			Self::Id(id) => el.attributes.get("id") == Some(id),
			Self::Attr(name) => {
				(name == "style" && !el.style.is_empty()) || el.attributes.contains_key(name)
			}
			Self::AttrEq(name, value) => el.attributes.get(name) == Some(value),
			Self::And(parts) => parts.iter().all(|p| p.matches(el)),
		}
	}
}

impl FromStr for Selector {
	type Err = DomError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

struct SelectorParser<'a> {
	input: &'a str,
	chars: Vec<char>,
	pos: usize,
}

impl<'a> SelectorParser<'a> {
	fn new(input: &'a str) -> Self {
		Self {
			input,
			chars: input.trim().chars().collect(),
			pos: 0,
		}
	}

	fn error(&self, reason: impl Into<String>) -> DomError {
		DomError::InvalidSelector {
			selector: self.input.to_string(),
			reason: reason.into(),
		}
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn ident(&mut self) -> String {
		let start = self.pos;
		while let Some(c) = self.peek() {
			if c.is_alphanumeric() || c == '-' || c == '_' {
				self.pos += 1;
			} else {
				break;
			}
		}
		self.chars[start..self.pos].iter().collect()
	}

	fn parse(mut self) -> Result<Selector, DomError> {
		if self.chars.is_empty() {
			return Err(self.error("empty selector"));
		}

		let mut selector = Selector::Any;

		match self.peek() {
			Some('*') => self.pos += 1,
			Some(c) if c.is_alphanumeric() => {
				let tag = self.ident();
				selector = selector.and(Selector::tag(tag));
			}
			_ => {}
		}

		while let Some(c) = self.peek() {
			self.pos += 1;
			match c {
				'.' => {
					let class = self.ident();
					if class.is_empty() {
						return Err(self.error("expected class name after '.'"));
					}
					selector = selector.and(Selector::class(class));
				}
				'#' => {
					let id = self.ident();
					if id.is_empty() {
						return Err(self.error("expected id after '#'"));
					}
					selector = selector.and(Selector::id(id));
				}
				'[' => selector = selector.and(self.attribute()?),
				other => return Err(self.error(format!("unexpected character '{}'", other))),
			}
		}

		Ok(selector)
	}

	fn attribute(&mut self) -> Result<Selector, DomError> {
		let name = self.ident();
		if name.is_empty() {
			return Err(self.error("expected attribute name"));
		}

		match self.peek() {
			Some(']') => {
				self.pos += 1;
				Ok(Selector::attr(name))
			}
			Some('=') => {
				self.pos += 1;
				let value = match self.peek() {
					Some(quote @ ('\'' | '"')) => {
						self.pos += 1;
						let start = self.pos;
						while self.peek().is_some_and(|c| c != quote) {
							self.pos += 1;
						}
						if self.peek().is_none() {
							return Err(self.error("unterminated quoted value"));
						}
						let value: String = self.chars[start..self.pos].iter().collect();
						self.pos += 1;
						value
					}
					_ => self.ident(),
				};
				if self.peek() != Some(']') {
					return Err(self.error("expected ']'"));
				}
				self.pos += 1;
				Ok(Selector::attr_eq(name, value))
			}
			_ => Err(self.error("expected ']' or '='")),
		}
	}
}
