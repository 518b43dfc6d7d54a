//! Upload limits and retention policy.

/// Tunable vault limits, sourced from daemon configuration.
#[derive(Clone, Debug)]
pub struct VaultPolicy {
    /// Hard cap on payload size. A payload of exactly this size passes.
    pub max_file_size_bytes: u64,
    /// Lowercased extensions admitted for upload.
    pub allowed_extensions: Vec<String>,
    /// Days a document rests in the vault before the sweep removes it.
    pub retention_days: u64,
}

impl Default for VaultPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            allowed_extensions: vec![
                "pdf".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
            retention_days: 30,
        }
    }
}

impl VaultPolicy {
    /// Whether a lowercased extension is on the allowlist.
    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }
}

/// Extract the lowercased extension from a file name.
///
/// Text after the final `.`; a dotless name yields the whole name, which
/// then fails the allowlist on its own.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}
