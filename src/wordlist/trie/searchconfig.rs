#[derive(Default, Debug, Clone)]
pub struct SearchConfig {
    /// Most wildcard positions that may be filled from the letter budget; `None` for no limit.
    pub limit: Option<usize>,
    pub max_results: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> SearchConfig {
        Default::default()
    }

    pub fn with_limit(limit: Option<usize>) -> SearchConfig {
        SearchConfig { limit, ..Default::default() }
    }

    pub(crate) fn allows(&self, used: usize) -> bool {
        self.limit.map_or(true, |limit| used < limit)
    }
}
