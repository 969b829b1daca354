use futures::future::join_all;
use tracing::warn;

use streamic_common::{config, Config, RawItem};
use streamic_feed::{FeedClient, FeedError};

use crate::templates::{self, Theme};

// --- Mount declarations ---

/// One mount point on a page: where cards go and which feed fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSpec {
    /// Feed resolved through the category table; the grid renders with the
    /// `id="grid-<key>"` contract.
    Category { key: String },
    /// Feed URL taken verbatim from the declaration; the grid renders with a
    /// `data-feed` attribute instead of a table lookup.
    Direct { title: String, url: String },
}

impl SectionSpec {
    pub fn category(key: &str) -> Self {
        SectionSpec::Category {
            key: key.to_string(),
        }
    }

    pub fn direct(title: &str, url: &str) -> Self {
        SectionSpec::Direct {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

struct ResolvedSection {
    title: String,
    grid_attr: String,
    view_all: Option<String>,
    target: String,
}

/// Turn declared mounts into fetchable sections. Category specs with no
/// table mapping are skipped with a warning; the rest of the page still
/// renders.
fn resolve_sections(sections: &[SectionSpec]) -> Vec<ResolvedSection> {
    let mut resolved = Vec::with_capacity(sections.len());
    for spec in sections {
        match spec {
            SectionSpec::Category { key } => match config::find_category(key) {
                Some(category) => resolved.push(ResolvedSection {
                    title: category.label.to_string(),
                    grid_attr: format!(r#"id="grid-{}""#, category.key),
                    view_all: Some(format!("/category/{}", category.key)),
                    target: category.path.to_string(),
                }),
                None => {
                    warn!(category = %key, "No feed mapping for category, skipping section");
                }
            },
            SectionSpec::Direct { title, url } => resolved.push(ResolvedSection {
                title: title.clone(),
                grid_attr: format!(r#"data-feed="{}""#, templates::html_escape(url)),
                view_all: None,
                target: url.clone(),
            }),
        }
    }
    resolved
}

/// Default homepage layout: one section per category, in table order.
pub fn home_sections() -> Vec<SectionSpec> {
    config::CATEGORIES
        .iter()
        .map(|c| SectionSpec::category(c.key))
        .collect()
}

// --- Homepage ---

pub async fn render_home(client: &FeedClient, cfg: &Config, theme: &Theme) -> String {
    render_home_with(client, cfg, theme, &home_sections()).await
}

/// Assemble a homepage from the given mounts. All feeds are fetched
/// concurrently and every section's outcome is isolated: one failing feed
/// never blanks its neighbours.
pub async fn render_home_with(
    client: &FeedClient,
    cfg: &Config,
    theme: &Theme,
    sections: &[SectionSpec],
) -> String {
    let resolved = resolve_sections(sections);

    let fetches = resolved.iter().map(|s| client.fetch_items(&s.target));
    let outcomes = join_all(fetches).await;

    let mut body = String::new();
    for (section, outcome) in resolved.iter().zip(outcomes) {
        let grid = render_section_body(outcome, cfg.home_section_size, theme, &section.target);
        body.push_str(&templates::render_home_section(
            &section.title,
            &section.grid_attr,
            section.view_all.as_deref(),
            &grid,
        ));
        body.push('\n');
    }

    templates::build_page("Home", &format!(r#"<main class="container">{body}</main>"#), theme)
}

/// Map one feed outcome onto the body of a mount point. A failed feed yields
/// exactly one notice element and zero cards; an empty feed never leaves the
/// grid silently blank; items render in feed order, first `limit` only.
pub fn render_section_body(
    outcome: Result<Vec<RawItem>, FeedError>,
    limit: usize,
    theme: &Theme,
    target: &str,
) -> String {
    match outcome {
        Err(e) => {
            warn!(feed = %target, error = %e, "Failed to load feed");
            templates::render_failure_notice()
        }
        Ok(items) if items.is_empty() => templates::render_empty_notice(),
        Ok(items) => items
            .iter()
            .take(limit)
            .map(|raw| templates::render_card(&raw.normalize(), theme))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// --- Category page ---

/// Pagination state for one category render: the fetched sequence plus a
/// cursor counting how many items have been rendered so far.
pub struct CategoryFeed {
    items: Vec<RawItem>,
    cursor: usize,
}

impl CategoryFeed {
    pub fn new(items: Vec<RawItem>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Render up to `n` further cards and advance the cursor by the count
    /// actually rendered, which near the end of the sequence may be fewer
    /// than `n`. With nothing remaining it renders nothing; calling it again
    /// stays a no-op.
    pub fn render_next(&mut self, n: usize, theme: &Theme) -> String {
        let end = self.cursor.saturating_add(n).min(self.items.len());
        let html = self.items[self.cursor..end]
            .iter()
            .map(|raw| templates::render_card(&raw.normalize(), theme))
            .collect::<Vec<_>>()
            .join("\n");
        self.cursor = end;
        html
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True once every stored item has been rendered; the load-more control
    /// hides at this point.
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }
}

/// Assemble a category page showing the first `shown` items (defaults to the
/// configured initial page size). The load-more control requests the same
/// page one step deeper and disappears once the sequence is exhausted.
pub async fn render_category(
    client: &FeedClient,
    cfg: &Config,
    theme: &Theme,
    key: &str,
    shown: Option<usize>,
) -> String {
    let category = config::resolve_category(key);
    let shown = shown.unwrap_or(cfg.category_first);

    let grid = match client.fetch_items(category.path).await {
        Err(e) => {
            warn!(category = category.key, error = %e, "Failed to load category feed");
            format!(
                r#"<div class="card-grid" id="grid-{}">{}</div>"#,
                category.key,
                templates::render_failure_notice()
            )
        }
        Ok(items) => {
            let mut feed = CategoryFeed::new(items);
            let cards = if feed.is_empty() {
                templates::render_empty_notice()
            } else {
                feed.render_next(shown, theme)
            };
            let load_more = if feed.exhausted() {
                String::new()
            } else {
                templates::render_load_more(&format!(
                    "/category/{}?shown={}",
                    category.key,
                    feed.cursor() + cfg.category_step
                ))
            };
            format!(
                r#"<div class="card-grid" id="grid-{}">{}</div>{}"#,
                category.key, cards, load_more
            )
        }
    };

    let content = format!(
        r#"<main class="container">
<section class="home-section">
    <div class="section-head"><h2>{}</h2></div>
    {grid}
</section>
</main>"#,
        templates::html_escape(category.label),
    );

    templates::build_page(category.label, &content, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamic_common::config::CATEGORIES;

    fn feed_of(n: usize) -> Vec<RawItem> {
        (0..n)
            .map(|i| RawItem {
                title: Some(format!("Item {i}")),
                link: Some(format!("https://example.com/{i}")),
                ..RawItem::default()
            })
            .collect()
    }

    fn card_count(html: &str) -> usize {
        html.matches(r#"<a class="card""#).count()
    }

    #[test]
    fn section_body_limits_and_preserves_feed_order() {
        let theme = Theme::default();
        let html = render_section_body(Ok(feed_of(30)), 10, &theme, "data/newsroom.json");

        assert_eq!(card_count(&html), 10);
        let first = html.find("Item 0").unwrap();
        let second = html.find("Item 1").unwrap();
        assert!(first < second);
        assert!(!html.contains("Item 10"));
    }

    #[test]
    fn section_body_renders_one_failure_element_and_no_cards() {
        let theme = Theme::default();
        let html = render_section_body(
            Err(FeedError::Status {
                status: 500,
                url: "http://feeds.invalid/data/newsroom.json".to_string(),
            }),
            10,
            &theme,
            "data/newsroom.json",
        );

        assert_eq!(card_count(&html), 0);
        assert_eq!(html.matches("feed-notice").count(), 1);
    }

    #[test]
    fn section_body_shows_placeholder_for_empty_feed() {
        let theme = Theme::default();
        let html = render_section_body(Ok(Vec::new()), 10, &theme, "data/newsroom.json");

        assert_eq!(card_count(&html), 0);
        assert!(html.contains("No items to show"));
    }

    #[test]
    fn pager_windows_then_exhausts() {
        let theme = Theme::default();
        let mut feed = CategoryFeed::new(feed_of(25));
        assert_eq!(feed.len(), 25);

        let first = feed.render_next(20, &theme);
        assert_eq!(card_count(&first), 20);
        assert!(first.contains("Item 0") && first.contains("Item 19"));
        assert_eq!(feed.cursor(), 20);
        assert!(!feed.exhausted());

        let second = feed.render_next(15, &theme);
        assert_eq!(card_count(&second), 5);
        assert!(second.contains("Item 20") && second.contains("Item 24"));
        assert_eq!(feed.cursor(), 25);
        assert!(feed.exhausted());

        let third = feed.render_next(15, &theme);
        assert_eq!(card_count(&third), 0);
        assert_eq!(feed.cursor(), 25);
    }

    #[test]
    fn pager_is_safe_on_an_empty_feed() {
        let theme = Theme::default();
        let mut feed = CategoryFeed::new(Vec::new());

        assert!(feed.exhausted());
        assert_eq!(feed.render_next(20, &theme), "");
        assert_eq!(feed.cursor(), 0);
    }

    #[test]
    fn unmapped_category_sections_are_skipped() {
        let specs = vec![
            SectionSpec::category("newsroom"),
            SectionSpec::category("esports"),
        ];
        let resolved = resolve_sections(&specs);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].grid_attr, r#"id="grid-newsroom""#);
    }

    #[test]
    fn direct_sections_carry_the_feed_url_in_markup() {
        let specs = vec![SectionSpec::direct(
            "Partner Wire",
            "https://wire.example.com/latest.json?tier=\"a\"",
        )];
        let resolved = resolve_sections(&specs);

        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].grid_attr.starts_with("data-feed="));
        assert!(resolved[0].grid_attr.contains("&quot;a&quot;"));
        assert_eq!(resolved[0].view_all, None);
    }

    #[test]
    fn default_home_layout_mounts_every_category() {
        assert_eq!(home_sections().len(), CATEGORIES.len());
    }
}
