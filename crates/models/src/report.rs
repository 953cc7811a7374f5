use crate::answer_sheet::Score;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a single question was rated across responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSummary {
    pub question_id: i32,
    pub responses: u32,
    pub mean: f64,
    /// Number of fair, good and excellent ratings, in that order
    pub distribution: [u32; 3],
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    counts: [u32; 3],
}

impl Tally {
    fn add(&mut self, score: Score) {
        self.counts[usize::from(score.value()) - 1] += 1;
    }

    fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        let weighted: u32 = self
            .counts
            .iter()
            .zip(1u32..)
            .map(|(count, score)| count * score)
            .sum();
        f64::from(weighted) / f64::from(total)
    }
}

/// Summarises `(group, question_id, score)` rows per group, questions in id order
pub fn summarise<K: Ord>(
    rows: impl IntoIterator<Item = (K, i32, Score)>,
) -> BTreeMap<K, Vec<QuestionSummary>> {
    let mut tallies: BTreeMap<K, BTreeMap<i32, Tally>> = BTreeMap::new();
    for (group, question_id, score) in rows {
        tallies
            .entry(group)
            .or_default()
            .entry(question_id)
            .or_default()
            .add(score);
    }

    tallies
        .into_iter()
        .map(|(group, questions)| {
            let summaries = questions
                .into_iter()
                .map(|(question_id, tally)| QuestionSummary {
                    question_id,
                    responses: tally.total(),
                    mean: tally.mean(),
                    distribution: tally.counts,
                })
                .collect();
            (group, summaries)
        })
        .collect()
}

/// Mean of the per-question means, for a one-number overview of a group
pub fn overall_mean(summaries: &[QuestionSummary]) -> Option<f64> {
    if summaries.is_empty() {
        return None;
    }
    Some(summaries.iter().map(|s| s.mean).sum::<f64>() / summaries.len() as f64)
}
