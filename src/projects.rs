//! Whole-card links for `.project` cards.

pub struct ProjectLink {
    pub title: &'static str,
    pub url: &'static str,
}

/// Repository for each project, keyed by the exact `.project-title` text.
/// A card's `data-repo` attribute takes precedence.
pub const PROJECT_LINKS: &[ProjectLink] = &[
    ProjectLink {
        title: "Network Monitoring Tool",
        url: "https://github.com/username/network-monitoring-tool",
    },
    ProjectLink {
        title: "Network Intrusion Detection System (IDS)",
        url: "https://github.com/username/network-ids",
    },
];

pub const OPEN_TARGET: &str = "_blank";
pub const OPEN_FEATURES: &str = "noopener,noreferrer";

pub fn lookup_project_url(title: &str) -> Option<&'static str> {
    PROJECT_LINKS
        .iter()
        .find(|link| link.title == title)
        .map(|link| link.url)
}

/// An empty `data-repo` is treated as absent.
pub fn resolve_card_url(data_repo: Option<&str>, title: &str) -> Option<String> {
    data_repo
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| lookup_project_url(title.trim()).map(str::to_string))
}

/// Keys that activate a focused card.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

pub fn image_link_label(title: &str) -> String {
    let title = title.trim();
    let title = if title.is_empty() { "Project" } else { title };
    format!("{title} repository on GitHub")
}
