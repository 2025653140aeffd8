mod exercise_vm;
mod level_vm;
mod study_vm;

pub use exercise_vm::{
    ExerciseBoardVm, ExerciseTabVm, EvaluationVm, map_evaluation, map_exercise_board,
};
pub use level_vm::{
    DashboardVm, LevelCardVm, TierGroupVm, map_dashboard, map_level_card, map_tier_groups,
};
pub use study_vm::{StudyTabVm, StudyVm, map_study};
