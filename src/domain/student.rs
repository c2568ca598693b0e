use std::fmt;

use serde::Serialize;

use crate::error::ExtractionFailure;

/// Scalar fields a result detail panel may expose, keyed by the label the
/// site renders in front of each value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EnrollmentNumber,
    Name,
    Marks,
    Percentage,
    EquivalentPercentage,
    CreditsObtained,
    Rank,
    CreditMarks,
    CreditPercentage,
    Sgpa,
    Cgpa,
}

impl Field {
    pub const MANDATORY: [Field; 7] = [
        Field::EnrollmentNumber,
        Field::Name,
        Field::Marks,
        Field::Percentage,
        Field::EquivalentPercentage,
        Field::CreditsObtained,
        Field::Rank,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::EnrollmentNumber => "Enrollment Number:",
            Field::Name => "Name:",
            Field::Marks => "Marks:",
            Field::Percentage => "Percentage:",
            Field::EquivalentPercentage => "Equivalent Percentage:",
            Field::CreditsObtained => "Credits Obtained:",
            Field::Rank => "Rank:",
            Field::CreditMarks => "Credit Marks:",
            Field::CreditPercentage => "Credit Percentage:",
            Field::Sgpa => "SGPA:",
            Field::Cgpa => "CGPA:",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::EnrollmentNumber => "enrollment_number",
            Field::Name => "name",
            Field::Marks => "marks",
            Field::Percentage => "percentage",
            Field::EquivalentPercentage => "equivalent_percentage",
            Field::CreditsObtained => "credits_obtained",
            Field::Rank => "rank",
            Field::CreditMarks => "credit_marks",
            Field::CreditPercentage => "credit_percentage",
            Field::Sgpa => "sgpa",
            Field::Cgpa => "cgpa",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whatever subset of scalar fields could be read for one student. Absent
/// fields are left out of the serialized object entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    enrollment_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit_marks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sgpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cgpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    equivalent_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credits_obtained: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<String>,
}

impl StudentRecord {
    pub fn set(&mut self, field: Field, value: String) {
        *self.slot_mut(field) = Some(value);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::EnrollmentNumber => &self.enrollment_number,
            Field::Name => &self.name,
            Field::Marks => &self.marks,
            Field::Percentage => &self.percentage,
            Field::EquivalentPercentage => &self.equivalent_percentage,
            Field::CreditsObtained => &self.credits_obtained,
            Field::Rank => &self.rank,
            Field::CreditMarks => &self.credit_marks,
            Field::CreditPercentage => &self.credit_percentage,
            Field::Sgpa => &self.sgpa,
            Field::Cgpa => &self.cgpa,
        };
        slot.as_deref()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Number of fields that were populated.
    pub fn len(&self) -> usize {
        [
            &self.enrollment_number,
            &self.name,
            &self.marks,
            &self.percentage,
            &self.credit_marks,
            &self.credit_percentage,
            &self.sgpa,
            &self.cgpa,
            &self.equivalent_percentage,
            &self.credits_obtained,
            &self.rank,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::EnrollmentNumber => &mut self.enrollment_number,
            Field::Name => &mut self.name,
            Field::Marks => &mut self.marks,
            Field::Percentage => &mut self.percentage,
            Field::EquivalentPercentage => &mut self.equivalent_percentage,
            Field::CreditsObtained => &mut self.credits_obtained,
            Field::Rank => &mut self.rank,
            Field::CreditMarks => &mut self.credit_marks,
            Field::CreditPercentage => &mut self.credit_percentage,
            Field::Sgpa => &mut self.sgpa,
            Field::Cgpa => &mut self.cgpa,
        }
    }
}

/// The two variable-shape tables of a detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultTable {
    Subjects,
    Semesters,
}

impl ResultTable {
    /// Text identifying the table among the rendered tables.
    pub fn heading(self) -> &'static str {
        match self {
            ResultTable::Subjects => "Subject (Credits)",
            ResultTable::Semesters => "Semester",
        }
    }

    /// Rows with fewer cells than this are skipped.
    pub fn min_cells(self) -> usize {
        match self {
            ResultTable::Subjects => 2,
            ResultTable::Semesters => 3,
        }
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultTable::Subjects => f.write_str("subject-wise marks"),
            ResultTable::Semesters => f.write_str("semester summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectEntry {
    pub subject: String,
    pub marks: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterEntry {
    pub semester: String,
    pub marks: String,
    pub percentage: String,
    pub sgpa: String,
}

/// Everything read from one student's detail panel. Lives only for the
/// duration of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub record: StudentRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<SubjectEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semesters: Option<Vec<SemesterEntry>>,
    /// Fields and tables that were expected but could not be read.
    #[serde(skip)]
    pub diagnostics: Vec<ExtractionFailure>,
}
