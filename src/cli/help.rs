//! Version banner shown at startup.

/// Source revision baked in at compile time
pub const COMMIT: &str = match option_env!("DIRDIGEST_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

/// Build date baked in at compile time
pub const BUILD_DATE: &str = match option_env!("DIRDIGEST_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

/// `dirdigest <version> - commit:<commit> - build:<date>`
pub fn banner() -> String {
    format!(
        "dirdigest {} - commit:{} - build:{}",
        env!("CARGO_PKG_VERSION"),
        COMMIT,
        BUILD_DATE
    )
}
