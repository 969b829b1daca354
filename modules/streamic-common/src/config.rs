use std::env;

// --- Category table ---

/// One content category of the site. `path` locates the feed file relative
/// to the feed origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

/// Category -> feed file mapping. Defined once, never mutated. Keys match
/// the `grid-<key>` mount ids in the page markup.
pub const CATEGORIES: &[Category] = &[
    Category {
        key: "newsroom",
        label: "Newsroom",
        path: "data/newsroom.json",
    },
    Category {
        key: "playout",
        label: "Playout",
        path: "data/playout.json",
    },
    Category {
        key: "infrastructure",
        label: "Infrastructure",
        path: "data/infrastructure.json",
    },
    Category {
        key: "graphics",
        label: "Graphics",
        path: "data/graphics.json",
    },
    Category {
        key: "cloud",
        label: "Cloud",
        path: "data/cloud.json",
    },
    Category {
        key: "streaming",
        label: "Streaming",
        path: "data/streaming.json",
    },
    Category {
        key: "audio-ai",
        label: "Audio AI",
        path: "data/audio-ai.json",
    },
];

pub const DEFAULT_CATEGORY_KEY: &str = "newsroom";

/// Exact lookup by key. Homepage sections use this and skip unmapped keys.
pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Exact feed-path lookup for a homepage grid id.
pub fn feed_path(key: &str) -> Option<&'static str> {
    find_category(key).map(|c| c.path)
}

/// Category-page resolution: tolerates a trailing `.json` and mixed case;
/// unknown keys fall back to the default category rather than failing.
pub fn resolve_category(key: &str) -> &'static Category {
    let lowered = key.trim().to_ascii_lowercase();
    let stripped = lowered.strip_suffix(".json").unwrap_or(&lowered);
    find_category(stripped)
        .or_else(|| find_category(DEFAULT_CATEGORY_KEY))
        .expect("default category is always present in the table")
}

// --- Config ---

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Feed origin serving the data/*.json files
    pub feed_base_url: String,

    // Page sizes
    pub home_section_size: usize,
    pub category_first: usize,
    pub category_step: usize,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            feed_base_url: required_env("FEED_BASE_URL"),
            home_section_size: numeric_env("HOME_SECTION_SIZE", 10),
            category_first: numeric_env("CATEGORY_FIRST", 20),
            category_step: numeric_env("CATEGORY_STEP", 15),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn numeric_env(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number")),
        Err(_) => default,
    }
}
