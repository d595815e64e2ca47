use crate::model::ResultRow;

/// Identifier of a forum/category
pub type CategoryId = i64;

/// Presentation collaborator: receives each retained row once
pub trait ResultRenderer {
    fn render_row(&mut self, row: &ResultRow);
}

impl<R: ResultRenderer + ?Sized> ResultRenderer for &mut R {
    fn render_row(&mut self, row: &ResultRow) {
        (**self).render_row(row);
    }
}

/// Collects rendered rows; used by callers that post-process in memory
impl ResultRenderer for Vec<ResultRow> {
    fn render_row(&mut self, row: &ResultRow) {
        self.push(row.clone());
    }
}

/// Suppresses rows belonging to one excluded category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    column: String,
    excluded: Option<CategoryId>,
}

impl CategoryFilter {
    pub fn new(column: impl Into<String>, excluded: Option<CategoryId>) -> Self {
        Self {
            column: column.into(),
            excluded,
        }
    }

    /// A filter that keeps every row
    pub fn disabled() -> Self {
        Self::new("forumid", None)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn excluded(&self) -> Option<CategoryId> {
        self.excluded
    }

    /// Whether `row` belongs to the excluded category
    ///
    /// Rows without the column, or with a NULL/non-numeric value, are kept.
    pub fn is_excluded(&self, row: &ResultRow) -> bool {
        match self.excluded {
            Some(excluded) => row
                .get(&self.column)
                .and_then(|value| value.as_category())
                .is_some_and(|category| category == excluded),
            None => false,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new("forumid", Some(5))
    }
}

/// Lazily yield the rows that survive `filter`, in input order
pub fn retained_rows<'a, I>(rows: I, filter: &'a CategoryFilter) -> impl Iterator<Item = ResultRow> + 'a
where
    I: IntoIterator<Item = ResultRow>,
    I::IntoIter: 'a,
{
    rows.into_iter().filter(move |row| !filter.is_excluded(row))
}

/// Forward every retained row to `renderer`, once, in order
///
/// Returns the number of rows rendered.
pub fn present<I, R>(rows: I, renderer: &mut R, filter: &CategoryFilter) -> usize
where
    I: IntoIterator<Item = ResultRow>,
    R: ResultRenderer + ?Sized,
{
    let mut rendered = 0;
    for row in rows.into_iter().filter(|row| !filter.is_excluded(row)) {
        renderer.render_row(&row);
        rendered += 1;
    }
    rendered
}
