//! Table rendering for formatted output.

/// Spaces between columns.
const COLUMN_GAP: usize = 3;

/// A column-aligned table without borders.
///
/// Rows accumulate until the table is printed through the UI.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<&str>) {
        self.rows.push(row.iter().map(|s| s.to_string()).collect());
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the header line carries any text.
    pub fn has_headers(&self) -> bool {
        self.headers.iter().any(|h| !h.is_empty())
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|i| {
                std::iter::once(&self.headers)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_row(row: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            line.push_str(cell);
            let padding = width - cell.chars().count() + COLUMN_GAP;
            line.push_str(&" ".repeat(padding));
        }
        line.trim_end().to_string()
    }

    /// Render the header line, or `None` when every header is blank.
    pub fn render_header(&self) -> Option<String> {
        if !self.has_headers() {
            return None;
        }
        Some(Self::render_row(&self.headers, &self.column_widths()))
    }

    /// Render the data rows, one string per line.
    pub fn render_rows(&self) -> Vec<String> {
        let widths = self.column_widths();
        self.rows
            .iter()
            .map(|row| Self::render_row(row, &widths))
            .collect()
    }

    /// Render the whole table as plain text.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self.render_header().into_iter().collect();
        lines.extend(self.render_rows());
        lines.join("\n")
    }
}
