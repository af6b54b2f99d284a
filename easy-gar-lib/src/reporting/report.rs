use super::ReportTable;

/// A fetched report: the assembled table plus an optional display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    name: Option<String>,
    table: ReportTable,
    sampled: bool,
    data_golden: bool,
}

impl Report {
    #[must_use]
    pub fn new(table: ReportTable, name: Option<String>) -> Self {
        Self {
            name,
            table,
            sampled: false,
            data_golden: true,
        }
    }

    /// Record the sampling metadata the remote service attached to the pages.
    #[must_use]
    pub const fn with_sampling(mut self, sampled: bool, data_golden: bool) -> Self {
        self.sampled = sampled;
        self.data_golden = data_golden;
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn table(&self) -> &ReportTable {
        &self.table
    }

    /// True if the remote service computed any page from a sample.
    #[must_use]
    pub const fn is_sampled(&self) -> bool {
        self.sampled
    }

    /// False if any page holds data the remote service may still revise.
    #[must_use]
    pub const fn is_data_golden(&self) -> bool {
        self.data_golden
    }

    #[must_use]
    pub fn into_table(self) -> ReportTable {
        self.table
    }
}
