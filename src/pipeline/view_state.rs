//! Browse view state: selected types and current page
//!
//! The state a browsing client owns, with its URL-query reflection. Pages
//! are 0-based internally and 1-based in the query string.

/// Selected type filter (insertion order = selection order) plus the current
/// 0-based page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected_types: Vec<String>,
    pub page: usize,
}

impl ViewState {
    /// Initialize state from the query representation: `type` is a
    /// comma-joined list (absent or empty means no filter), `page` is the
    /// 1-based page number (absent or unparseable means page 0).
    pub fn from_query(type_param: Option<&str>, page_param: Option<&str>) -> Self {
        let selected_types = type_param
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let page = page_param
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p - 1)
            .unwrap_or(0);

        Self {
            selected_types,
            page,
        }
    }

    /// Add the type if absent, remove it if present. A filter change
    /// invalidates the current page, so this always resets to page 0.
    pub fn toggle_type(&mut self, name: &str) {
        if let Some(pos) = self.selected_types.iter().position(|t| t == name) {
            self.selected_types.remove(pos);
        } else {
            self.selected_types.push(name.to_string());
        }
        self.page = 0;
    }

    /// Advance one page; no-op when already on the last page. No wraparound.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page + 1 < total_pages {
            self.page += 1;
        }
    }

    /// Go back one page; no-op on page 0.
    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
        }
    }

    /// Reset a dangling page number after the filter matched nothing.
    /// An out-of-range page against a non-empty result is left as-is (it
    /// renders as an empty slice, per the pipeline contract).
    pub fn reconcile(&mut self, total_pages: usize) {
        if total_pages == 0 {
            self.page = 0;
        }
    }

    /// The URL-query reflection of this state: `type=<comma-joined>` (omitted
    /// when empty) and `page=<1-based>`.
    pub fn to_query_string(&self) -> String {
        let page = format!("page={}", self.page + 1);
        if self.selected_types.is_empty() {
            page
        } else {
            format!("type={}&{}", self.selected_types.join(","), page)
        }
    }
}
