//! Reads a student's rendered detail panel into an [`ExtractionResult`].
//!
//! Every field and table is an independent probe. A probe that fails is
//! logged and recorded in `diagnostics`; the rest still run.

use scraper::{ElementRef, Html, Node, Selector};

use crate::{
    domain::{ExtractionResult, Field, ResultTable, SemesterEntry, SubjectEntry},
    error::{ExtractionError, ExtractionFailure},
};

/// Parsed snapshot of the rendered document.
pub struct DetailDocument {
    html: Html,
}

impl DetailDocument {
    pub fn parse(source: &str) -> Self {
        DetailDocument {
            html: Html::parse_document(source),
        }
    }

    /// Trimmed text of the node right after the first element labelled
    /// `label`. Whitespace-only text between the two is skipped.
    pub fn labeled_value(&self, label: &str) -> Result<String, ExtractionError> {
        let element = self
            .label_elements(label)
            .next()
            .ok_or_else(|| ExtractionError::LabelNotFound(label.to_string()))?;

        let value = element
            .next_siblings()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(text.trim().to_string()),
                Node::Element(_) => ElementRef::wrap(node)
                    .map(|el| el.text().collect::<String>().trim().to_string()),
                _ => None,
            })
            .find(|text| !text.is_empty());

        value.ok_or_else(|| ExtractionError::MissingValue(label.to_string()))
    }

    /// How many elements carry exactly `label`.
    pub fn label_count(&self, label: &str) -> usize {
        self.label_elements(label).count()
    }

    /// Cell texts of each body row of the first table mentioning the
    /// table's heading. Empty when no such table is rendered.
    ///
    /// The selectors are fixed, so on any snapshot this only fails with
    /// [`ExtractionError::Selector`] if one of them is malformed.
    pub fn table_rows(&self, table: ResultTable) -> Result<Vec<Vec<String>>, ExtractionError> {
        let table_selector = selector("table")?;
        let row_selector = selector("tbody tr")?;
        let cell_selector = selector("td")?;
        let heading = table.heading();

        let mentions_heading = |el: &ElementRef| el.text().collect::<String>().contains(heading);

        // Innermost match, so a layout table wrapping the panel is skipped.
        let found = self.html.select(&table_selector).find(|candidate| {
            mentions_heading(candidate)
                && !candidate
                    .descendants()
                    .skip(1)
                    .filter_map(ElementRef::wrap)
                    .any(|inner| inner.value().name() == "table" && mentions_heading(&inner))
        });

        let Some(found) = found else {
            return Ok(vec![]);
        };

        Ok(found
            .select(&row_selector)
            .map(|row| row.select(&cell_selector).map(normalized_text).collect())
            .collect())
    }

    /// Innermost elements whose normalized text is exactly `label`, in
    /// document order.
    fn label_elements<'a>(&'a self, label: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |el| {
                normalized_text(*el) == label
                    && !el
                        .children()
                        .filter_map(ElementRef::wrap)
                        .any(|child| normalized_text(child) == label)
            })
    }

    pub fn extract(&self) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for field in Field::MANDATORY {
            self.read_field(field, &mut result);
        }

        if self.label_count(Field::CreditMarks.label()) > 0 {
            self.read_field(Field::CreditMarks, &mut result);
            self.read_field(Field::CreditPercentage, &mut result);
        }
        for field in [Field::Sgpa, Field::Cgpa] {
            if self.label_count(field.label()) > 0 {
                self.read_field(field, &mut result);
            }
        }

        match self.subjects() {
            Ok(subjects) => result.subjects = subjects,
            Err(source) => record_failure(
                &mut result,
                ExtractionFailure::Table {
                    table: ResultTable::Subjects,
                    source,
                },
            ),
        }

        match self.semesters() {
            Ok(semesters) => result.semesters = semesters,
            Err(source) => record_failure(
                &mut result,
                ExtractionFailure::Table {
                    table: ResultTable::Semesters,
                    source,
                },
            ),
        }

        result
    }

    fn read_field(&self, field: Field, result: &mut ExtractionResult) {
        match self.labeled_value(field.label()) {
            Ok(value) => result.record.set(field, value),
            Err(source) => record_failure(result, ExtractionFailure::Field { field, source }),
        }
    }

    fn subjects(&self) -> Result<Option<Vec<SubjectEntry>>, ExtractionError> {
        let table = ResultTable::Subjects;
        let rows = self.table_rows(table)?;
        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            rows.into_iter()
                .filter(|cells| cells.len() >= table.min_cells())
                .map(|mut cells| {
                    cells.truncate(2);
                    let marks = cells.pop().unwrap_or_default();
                    let subject = cells.pop().unwrap_or_default();
                    SubjectEntry { subject, marks }
                })
                .collect(),
        ))
    }

    fn semesters(&self) -> Result<Option<Vec<SemesterEntry>>, ExtractionError> {
        let table = ResultTable::Semesters;
        let rows = self.table_rows(table)?;
        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            rows.into_iter()
                .filter(|cells| cells.len() >= table.min_cells())
                .map(|cells| {
                    let mut cells = cells.into_iter();
                    SemesterEntry {
                        semester: cells.next().unwrap_or_default(),
                        marks: cells.next().unwrap_or_default(),
                        percentage: cells.next().unwrap_or_default(),
                        sgpa: cells.next().unwrap_or_default(),
                    }
                })
                .collect(),
        ))
    }
}

/// Extracts whatever can be read from a ready detail-panel document.
pub fn extract_student_data(source: &str) -> ExtractionResult {
    DetailDocument::parse(source).extract()
}

fn record_failure(result: &mut ExtractionResult, failure: ExtractionFailure) {
    log::warn!("{}", failure);
    result.diagnostics.push(failure);
}

fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::selector(css, e))
}

fn normalized_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
