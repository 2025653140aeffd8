use course_core::evaluator::Evaluation;
use course_core::model::ExerciseKind;
use course_core::progression::ExerciseScorecard;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseTabVm {
    pub kind: ExerciseKind,
    pub label: &'static str,
    pub completed: bool,
    pub score_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseBoardVm {
    pub tabs: Vec<ExerciseTabVm>,
    pub completed_label: String,
    pub average_label: String,
    pub total_points_label: String,
    pub can_complete: bool,
}

#[must_use]
pub fn map_exercise_board(required: &[ExerciseKind], card: &ExerciseScorecard) -> ExerciseBoardVm {
    let tabs = required
        .iter()
        .map(|kind| ExerciseTabVm {
            kind: *kind,
            label: kind.label(),
            completed: card.is_completed(*kind),
            score_label: card.score(*kind).map(|score| score.to_string()),
        })
        .collect::<Vec<_>>();
    let done = tabs.iter().filter(|tab| tab.completed).count();

    ExerciseBoardVm {
        completed_label: format!("{done} / {} completed", tabs.len()),
        average_label: format!("Average: {}", card.running_average()),
        total_points_label: format!("Total points: {}", card.total_points()),
        can_complete: card.level_completion(required).is_some(),
        tabs,
    }
}

/// Result banner shown right after a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationVm {
    pub headline: &'static str,
    pub detail: String,
    pub passed: bool,
}

#[must_use]
pub fn map_evaluation(evaluation: &Evaluation) -> EvaluationVm {
    let headline = match (evaluation.kind.is_pass_fail(), evaluation.passed) {
        (true, true) => "Great job! Exercise passed.",
        (true, false) => "Not quite. The exercise was recorded with 0 points.",
        (false, _) => "Exercise completed!",
    };
    EvaluationVm {
        headline,
        detail: format!(
            "{} / {} correct · Score {}",
            evaluation.correct, evaluation.total, evaluation.score
        ),
        passed: evaluation.passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::{LevelId, Score};

    #[test]
    fn board_offers_completion_only_when_all_kinds_done() {
        let mut card = ExerciseScorecard::new(LevelId::FIRST);
        card.record(ExerciseKind::Writing, Score::new(50).unwrap());
        card.record(ExerciseKind::FillBlanks, Score::FULL);

        let vm = map_exercise_board(&ExerciseKind::ALL, &card);
        assert_eq!(vm.completed_label, "2 / 7 completed");
        assert_eq!(vm.average_label, "Average: 75%");
        assert_eq!(vm.total_points_label, "Total points: 150");
        assert_eq!(vm.tabs[0].score_label.as_deref(), Some("100%"));
        assert!(!vm.tabs[1].completed);
        assert!(!vm.can_complete);

        for kind in ExerciseKind::ALL {
            if !card.is_completed(kind) {
                card.record(kind, Score::ZERO);
            }
        }
        assert!(map_exercise_board(&ExerciseKind::ALL, &card).can_complete);
    }

    #[test]
    fn failed_pass_fail_exercise_still_reports_recorded() {
        let evaluation = Evaluation {
            kind: ExerciseKind::MatchFollowing,
            correct: 2,
            total: 5,
            passed: false,
            score: Score::ZERO,
        };
        let vm = map_evaluation(&evaluation);
        assert!(!vm.passed);
        assert!(vm.headline.contains("0 points"));
        assert_eq!(vm.detail, "2 / 5 correct · Score 0%");
    }
}
