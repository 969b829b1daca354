use streamic_common::{NormalizedItem, CATEGORIES};

// --- Theme ---

/// Presentation knobs that used to vary between per-page copies of the
/// renderer. One renderer, parameterized.
#[derive(Debug, Clone)]
pub struct Theme {
    pub site_title: &'static str,
    pub fallback_image: &'static str,
}

/// Placeholder artwork embedded as a data URI so the fallback never needs a
/// network fetch of its own. Single quotes are percent-encoded because the
/// value sits inside a double-quoted attribute and inside the inline error
/// handler's single-quoted string.
pub const FALLBACK_IMAGE: &str = "data:image/svg+xml;charset=utf-8,%3Csvg xmlns=%27http://www.w3.org/2000/svg%27 viewBox=%270 0 320 180%27%3E%3Crect width=%27320%27 height=%27180%27 fill=%27%23e8e8ee%27/%3E%3Ctext x=%27160%27 y=%2796%27 text-anchor=%27middle%27 font-family=%27sans-serif%27 font-size=%2715%27 fill=%27%23888%27%3ETHE STREAMIC%3C/text%3E%3C/svg%3E";

impl Default for Theme {
    fn default() -> Self {
        Self {
            site_title: "THE STREAMIC",
            fallback_image: FALLBACK_IMAGE,
        }
    }
}

// --- Cards ---

/// Render one card. Every feed-controlled value passes through
/// `html_escape` before it reaches text or attribute position; the link
/// opens in a new browsing context with opener and referrer isolation.
pub fn render_card(item: &NormalizedItem, theme: &Theme) -> String {
    let image = if item.image.is_empty() {
        theme.fallback_image
    } else {
        &item.image
    };
    let alt = if item.source.is_empty() {
        "News image".to_string()
    } else {
        format!("Image from {}", item.source)
    };
    let brief = if item.impact_brief.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="impact-brief">{}</p>"#,
            html_escape(&item.impact_brief)
        )
    };

    format!(
        r#"<a class="card" href="{href}" target="_blank" rel="noopener noreferrer">
    <figure class="card-image"><img src="{src}" alt="{alt}" loading="lazy" onerror="this.onerror=null;this.src='{fallback}';"></figure>
    <div class="card-body">
        <h3>{title}</h3>
        <span class="source">{source}</span>
        {brief}
    </div>
</a>"#,
        href = html_escape(&item.link),
        src = html_escape(image),
        alt = html_escape(&alt),
        fallback = theme.fallback_image,
        title = html_escape(&item.title),
        source = html_escape(&item.source),
    )
}

// --- Grid placeholders ---

/// Shown instead of cards when a feed cannot be loaded. Exactly one element,
/// never a silently empty grid.
pub fn render_failure_notice() -> String {
    r#"<div class="feed-notice">Unable to load content. Please try again later.</div>"#.to_string()
}

/// Shown when a feed loads but carries no items.
pub fn render_empty_notice() -> String {
    r#"<div class="feed-notice">No items to show right now. Check back soon.</div>"#.to_string()
}

/// The load-more control for paginated category pages. `href` requests a
/// deeper render of the same page.
pub fn render_load_more(href: &str) -> String {
    format!(
        r#"<a class="load-more" id="loadMoreBtn" href="{}">Load More</a>"#,
        html_escape(href)
    )
}

// --- Page assembly ---

/// One homepage section: heading, optional View All link, and the card grid
/// mount. `grid_attr` carries the mount identity (`id="grid-<key>"` for
/// table-mapped sections, `data-feed="<url>"` for direct ones) already in
/// attribute form.
pub fn render_home_section(
    title: &str,
    grid_attr: &str,
    view_all: Option<&str>,
    body: &str,
) -> String {
    let view_all = match view_all {
        Some(href) => format!(
            r#"<a class="view-all" href="{}">View All</a>"#,
            html_escape(href)
        ),
        None => String::new(),
    };

    format!(
        r#"<section class="home-section">
    <div class="section-head"><h2>{title}</h2>{view_all}</div>
    <div class="card-grid" {grid_attr}>{body}</div>
</section>"#,
        title = html_escape(title),
    )
}

pub fn build_page(title: &str, content: &str, theme: &Theme) -> String {
    let nav: String = CATEGORIES
        .iter()
        .map(|c| format!(r#"<a href="/category/{}">{}</a>"#, c.key, c.label))
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — {site}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#101018;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:700;letter-spacing:1px;}}
.header h1 a{{color:#fff;text-decoration:none;}}
.header nav a{{color:#ccc;text-decoration:none;margin-left:16px;font-size:13px;}}
.header nav a:hover{{color:#fff;}}
.container{{max-width:1080px;margin:0 auto;padding:24px;}}
.home-section{{margin-bottom:32px;}}
.section-head{{display:flex;align-items:baseline;justify-content:space-between;margin-bottom:12px;}}
.section-head h2{{font-size:20px;}}
.view-all{{font-size:13px;color:#0066cc;text-decoration:none;}}
.card-grid{{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px;}}
.card{{display:block;background:#fff;border:1px solid #e0e0e0;border-radius:8px;overflow:hidden;text-decoration:none;color:#1a1a1a;}}
.card:hover{{border-color:#999;}}
.card-image{{margin:0;aspect-ratio:16/9;background:#eee;}}
.card-image img{{width:100%;height:100%;object-fit:cover;display:block;}}
.card-body{{padding:12px;}}
.card-body h3{{font-size:15px;line-height:1.35;margin-bottom:6px;}}
.card-body .source{{font-size:12px;color:#888;}}
.impact-brief{{font-size:13px;color:#555;margin-top:8px;line-height:1.4;}}
.feed-notice{{grid-column:1/-1;text-align:center;color:#999;padding:40px 20px;font-size:14px;}}
.load-more{{display:block;width:max-content;margin:24px auto;padding:10px 28px;background:#0066cc;color:#fff;border-radius:4px;text-decoration:none;font-size:14px;font-weight:500;}}
.load-more:hover{{background:#004499;}}
</style>
</head>
<body>
<div class="header">
    <h1><a href="/">{site}</a></h1>
    <nav>{nav}</nav>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
        site = html_escape(theme.site_title),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
