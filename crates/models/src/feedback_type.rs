use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// The kind of feedback a student gives for one of their subjects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackType {
    /// Feedback on a theory subject
    Course,
    /// Feedback on a laboratory subject
    Lab,
}

impl FeedbackType {
    pub fn for_subject(is_theory: bool) -> Self {
        if is_theory { Self::Course } else { Self::Lab }
    }

    pub fn matches_subject(self, is_theory: bool) -> bool {
        Self::for_subject(is_theory) == self
    }

    pub fn question_category(self) -> QuestionCategory {
        match self {
            Self::Course => QuestionCategory::Course,
            Self::Lab => QuestionCategory::Lab,
        }
    }
}

/// Which questionnaire a question belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuestionCategory {
    /// Program educational objectives, answered by alumni
    Peo,
    /// Program outcomes, answered by alumni
    Po,
    Employer,
    Course,
    Lab,
}

impl QuestionCategory {
    /// Categories that make up the alumni questionnaire, in display order
    pub const ALUMNI: [Self; 2] = [Self::Peo, Self::Po];
}

/// Aggregated reports available to admins
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportKind {
    StudCourse,
    StudLab,
    Alumni,
    Employer,
}

impl ReportKind {
    /// The student feedback type a report summarises, if it is a student report
    pub fn student_feedback(self) -> Option<FeedbackType> {
        match self {
            Self::StudCourse => Some(FeedbackType::Course),
            Self::StudLab => Some(FeedbackType::Lab),
            Self::Alumni | Self::Employer => None,
        }
    }
}

/// Public response lists available to admins
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseType {
    Alumni,
    Employer,
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for QuestionCategory {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "QuestionCategory".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<QuestionCategory> for Value {
    fn from(category: QuestionCategory) -> Self {
        Value::String(Some(Box::new(category.as_ref().to_owned())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for QuestionCategory {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse QuestionCategory {val:?}: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for QuestionCategory {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_feedback_type_from_path() {
        assert_eq!(FeedbackType::from_str("course"), Ok(FeedbackType::Course));
        assert_eq!(FeedbackType::from_str("lab"), Ok(FeedbackType::Lab));
        assert!(FeedbackType::from_str("seminar").is_err());
    }

    #[test]
    fn test_feedback_type_matches_subject() {
        assert!(FeedbackType::Course.matches_subject(true));
        assert!(!FeedbackType::Course.matches_subject(false));
        assert!(FeedbackType::Lab.matches_subject(false));
    }

    #[test]
    fn test_report_kind_names() {
        assert_eq!(ReportKind::from_str("stud_course"), Ok(ReportKind::StudCourse));
        assert_eq!(ReportKind::StudLab.as_ref(), "stud_lab");
        assert_eq!(
            ReportKind::StudLab.student_feedback(),
            Some(FeedbackType::Lab)
        );
        assert_eq!(ReportKind::Alumni.student_feedback(), None);
    }

    #[test]
    fn test_question_category_round_trips_through_str() {
        assert_eq!(QuestionCategory::Peo.to_string(), "peo");
        assert_eq!(
            QuestionCategory::from_str("employer"),
            Ok(QuestionCategory::Employer)
        );
    }
}
