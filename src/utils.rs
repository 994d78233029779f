use std::fs;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Report file stem for a username, with anything outside `[A-Za-z0-9._-]`
/// replaced by `_`.
pub fn report_stem(username: &str) -> String {
    let safe: String = username
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    format!("results_{}", safe)
}

/// Strip the line ending left by a prompt and reject a blank username.
/// Anything else is kept verbatim.
pub fn validate_username(raw: &str) -> anyhow::Result<&str> {
    let username = raw.trim_end_matches(['\r', '\n']);
    if username.trim().is_empty() {
        anyhow::bail!("username must not be empty");
    }
    Ok(username)
}
