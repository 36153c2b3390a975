//! Plain-text rendering of the profile page.

use std::fmt::Write as _;

use shared::domain::User;

const MAX_TAB_ENTRIES: u64 = 6;

pub fn render_profile(user: &User) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}  (@{})", user.name, user.username);
    let _ = writeln!(out, "{}", user.location.display());
    let _ = writeln!(out, "avatar: {}", user.avatar);
    let _ = writeln!(
        out,
        "{} Followers · {} Followings",
        user.statistics.followers, user.statistics.following
    );

    let has_links = !user.social.profiles.is_empty() || user.social.website.is_some();
    if has_links {
        let _ = writeln!(out, "\nConnect with me");
        for profile in &user.social.profiles {
            let _ = writeln!(out, "  {:<10} {}", title_case(&profile.platform), profile.url);
        }
        if let Some(website) = &user.social.website {
            let _ = writeln!(out, "  {:<10} {}", "Website", website);
        }
    }

    let activity = user.statistics.activity;
    render_tab(&mut out, "Shots", "Shot", activity.shots);
    render_tab(&mut out, "Collection", "Collection", activity.collections);
    out
}

pub fn render_failure(message: &str) -> String {
    format!("error: {message}")
}

fn render_tab(out: &mut String, title: &str, item: &str, count: u64) {
    let _ = writeln!(out, "\n{title} ({count})");
    if count == 0 {
        let noun = title.to_lowercase();
        let _ = writeln!(out, "  No {noun} yet");
        let _ = writeln!(out, "  Start creating your first {noun}");
        return;
    }

    for index in 1..=count.min(MAX_TAB_ENTRIES) {
        let _ = writeln!(out, "  {item} {index}");
    }
    if count > MAX_TAB_ENTRIES {
        let _ = writeln!(out, "  …and {} more", count - MAX_TAB_ENTRIES);
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
