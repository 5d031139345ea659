// src/pipeline/message.rs

//! Notification body formatting.

pub const GITHUB_SOURCE_URL: &str = "https://github.com/nixigaj/leap/blob/pages/leap.json";

const SEPARATOR: &str = "============";

/// Compose the notification body from the new bulletin and the API payload.
///
/// The bulletin is trimmed; the API payload is included untouched. Both are
/// decoded lossily, so invalid UTF-8 sequences become U+FFFD in the posted
/// message. The stored snapshot keeps the raw bytes.
pub fn format_message(new_content: &[u8], api_content: &[u8]) -> String {
    let content = String::from_utf8_lossy(new_content);
    let api = String::from_utf8_lossy(api_content);

    let mut message = String::with_capacity(content.len() + api.len() + 160);
    message.push_str(&format!("{SEPARATOR}\nNew content:\n{SEPARATOR}\n"));
    message.push_str(content.trim());
    message.push('\n');
    message.push_str(&format!("\n{SEPARATOR}\nAPI content:\n{SEPARATOR}\n"));
    message.push_str(&api);
    message.push('\n');
    message.push_str("\nGitHub source URL: ");
    message.push_str(GITHUB_SOURCE_URL);
    message
}
