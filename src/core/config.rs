#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub max_token_len: usize,   // Tokens longer than this are not indexed
    pub skip_unreadable: bool,  // false: an unreadable document aborts the build
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            max_token_len: 255,
            skip_unreadable: false,
        }
    }
}
