//! Shared test fixtures

use radgate_core::DirectoryEntry;

/// Shared secret used by transport fixtures
pub const TEST_SECRET: &str = "testing123";

/// Directory with a qualified and an unqualified user
///
/// - `alice@example.com` / `secret1`
/// - `carol` / `pa55word`
/// - `a@b@c` / `degenerate`
pub fn sample_directory() -> Vec<DirectoryEntry> {
    vec![
        DirectoryEntry::new("alice@example.com", "secret1"),
        DirectoryEntry::new("carol", "pa55word"),
        DirectoryEntry::new("a@b@c", "degenerate"),
    ]
}

/// [`sample_directory`] in the on-disk `username=password` format
pub fn sample_directory_file() -> String {
    sample_directory()
        .iter()
        .map(|entry| format!("{}={}\n", entry.username, entry.password))
        .collect()
}

/// Config file text for a directory-backed gateway on loopback
pub fn directory_config_text(port: u16, directory_file: &str, audit_log: &str) -> String {
    format!(
        "# test gateway\n\
         server_ip = 127.0.0.1\n\
         server_port = {port}\n\
         shared_secret = {TEST_SECRET}\n\
         verifier = directory\n\
         directory_file = {directory_file}\n\
         audit_log = {audit_log}\n"
    )
}
