//! Integration test utilities for Therefore
//!
//! Shared page markup, post fixtures and runtime builders used by the
//! end-to-end tests under `integration/tests/`.

use std::rc::Rc;
use therefore_dom::{Document, NodeId, RecordingNavigator};
use therefore_hydration::{ComponentRegistry, HydrationContext, HydrationRuntime};
use therefore_search::PostListItem;

/// A rendered post exercising every built-in component.
pub const POST_PAGE: &str = r##"
<article id="post">
	<header>
		<div id="author" data-component="avatar"><img src="/authors/jd.jpg" alt="Jane Doe"></div>
	</header>
	<div id="content" class="prose">
		<p>By grace<span id="cite-1" data-component="citation" data-citation-text="Augustine, Enchiridion 9.30"><button class="citation-trigger"></button></span> we are saved.</p>
		<p>Freedom<span id="note" data-component="sidenote" data-sidenote-content="<b>note</b>"><button class="sidenote-trigger">1</button></span> is a gift.</p>
		<p>The will<span id="cite-2" data-component="citation" data-citation-text="Aquinas, ST I-II q.109" data-citation-url="https://example.org/summa"><button class="citation-trigger"></button></span> is healed.</p>
		<figure id="figure" data-component="lightbox"><img src="/img/ordo.png" alt="Ordo salutis"></figure>
		<div id="scripture" data-component="scripture-compare" data-alt-count="3" data-alt-versions="ESV,NIV,KJV" data-ref="Romans 8:28">
			<div class="scripture-compare__panel">We know that for those who love God</div>
			<div class="scripture-compare__panel">And we know that in all things</div>
			<div class="scripture-compare__panel">And we know that all things work together</div>
			<span class="scripture-compare__alt-label"></span>
			<span class="scripture-compare__position"></span>
			<button class="scripture-compare__cycle-btn">Next</button>
			<a class="scripture-gateway-link" href="#">Read</a>
		</div>
		<ol id="timeline" data-component="timeline">
			<li class="timeline-event">354 Birth of Augustine</li>
			<li class="timeline-event">386 Conversion</li>
			<li class="timeline-event">426 City of God</li>
		</ol>
		<a id="tag" class="tag-link" href="/tags/grace">grace</a>
		<a id="external" class="tag-link" href="https://example.org/grace">elsewhere</a>
	</div>
</article>
"##;

/// Widgets in [`POST_PAGE`] that hydrate with a live cleanup.
pub const LIVE_WIDGETS: usize = 6;

/// Loads [`POST_PAGE`] and returns the document and the article element.
pub fn post_page() -> (Document, NodeId) {
	let doc = Document::from_body_html(POST_PAGE);
	let post = doc.get_element_by_id("post").unwrap_or_else(|| doc.body());
	(doc, post)
}

/// A runtime with the built-in components whose navigations are recorded.
pub fn recording_runtime() -> (HydrationRuntime, Rc<RecordingNavigator>) {
	let navigator = Rc::new(RecordingNavigator::new());
	let context = HydrationContext::default().with_navigator(navigator.clone());
	(HydrationRuntime::new(ComponentRegistry::default(), context), navigator)
}

/// A small library of posts, two of them in the same series.
pub fn library() -> Vec<PostListItem> {
	vec![
		PostListItem::new("grace-and-freedom", "Grace and Freedom")
			.with_summary("How grace restores the will rather than replacing it")
			.with_publish_date("2024-03-01")
			.with_tags(["grace", "freedom", "augustine", "pelagius"]),
		PostListItem::new("on-free-will", "On Free Will")
			.with_publish_date("2024-04-12T09:30:00Z")
			.with_search_content("Augustine wrote three books on the freedom of the will while in Rome")
			.with_series("Foundations"),
		PostListItem::new("free-grace", "Free Grace Revisited")
			.with_publish_date("2024-05-20")
			.with_series("Foundations"),
		PostListItem::new("the-problem-of-evil", "The Problem of Evil")
			.with_summary("Why a good God permits suffering")
			.with_publish_date("2024-06-02")
			.with_tags(["theodicy"]),
	]
}

/// The two-post corpus from the ranking acceptance test.
pub fn free_corpus() -> Vec<PostListItem> {
	vec![
		PostListItem::new("a", "Grace and Freedom"),
		PostListItem::new("b", "On Free Will"),
	]
}
