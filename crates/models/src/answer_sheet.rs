use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rating given to a question: 1 (fair), 2 (good) or 3 (excellent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(u8);

impl Score {
    pub const FAIR: Self = Score(1);
    pub const GOOD: Self = Score(2);
    pub const EXCELLENT: Self = Score(3);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn review(self) -> &'static str {
        match self.0 {
            1 => "Fair",
            2 => "Good",
            _ => "Excellent",
        }
    }
}

impl TryFrom<i32> for Score {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1..=3 => Ok(Score(value as u8)),
            _ => Err(ValidationError::ScoreOutOfRange),
        }
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        i32::from(score.0)
    }
}

/// Answers to a questionnaire, keyed by question id
///
/// Built from the question set so that every question starts unanswered and no
/// foreign question can be answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSheet {
    answers: BTreeMap<i32, Option<Score>>,
}

impl AnswerSheet {
    pub fn for_questions(question_ids: impl IntoIterator<Item = i32>) -> Self {
        Self {
            answers: question_ids.into_iter().map(|id| (id, None)).collect(),
        }
    }

    pub fn answer(&mut self, question_id: i32, score: Score) -> Result<(), ValidationError> {
        let entry = self
            .answers
            .get_mut(&question_id)
            .ok_or(ValidationError::UnknownQuestion(question_id))?;
        *entry = Some(score);
        Ok(())
    }

    /// Applies raw `(question_id, score)` pairs as they arrive from a request
    pub fn answer_all(
        &mut self,
        answers: impl IntoIterator<Item = (i32, i32)>,
    ) -> Result<(), ValidationError> {
        for (question_id, score) in answers {
            self.answer(question_id, Score::try_from(score)?)?;
        }
        Ok(())
    }

    pub fn get(&self, question_id: i32) -> Option<Score> {
        self.answers.get(&question_id).copied().flatten()
    }

    /// Submission is allowed once there is a question and all of them are answered
    pub fn is_submittable(&self) -> bool {
        !self.answers.is_empty() && self.answers.values().all(Option::is_some)
    }

    /// Answered `(question_id, score)` pairs, or an error while any is missing
    pub fn completed(&self) -> Result<Vec<(i32, Score)>, ValidationError> {
        if !self.is_submittable() {
            return Err(ValidationError::UnansweredQuestions);
        }

        Ok(self
            .answers
            .iter()
            .filter_map(|(&id, score)| score.map(|s| (id, s)))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
