use course_core::model::Tier;
use course_core::progression::LevelState;
use course_core::{Catalog, LevelId, UserProgress};
use services::progress_view::tier_groups;
use services::{LevelCard, ProgressOverview};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub completed_label: String,
    pub completion_label: String,
    pub study_label: String,
    pub study_percent_label: String,
    pub current_level_label: String,
    pub current_tier_label: String,
    pub completion_percent: u8,
    pub continue_level: LevelId,
}

#[must_use]
pub fn map_dashboard(first_name: &str, progress: &UserProgress) -> DashboardVm {
    let overview = ProgressOverview::from_progress(progress);
    let tier = overview.current_tier;
    DashboardVm {
        greeting: format!("Welcome back, {first_name}!"),
        completed_label: format!("{} / {}", overview.completed, overview.total),
        completion_label: format!("{} complete", overview.completion_percent),
        study_label: format!("{} / {}", overview.study_completed, overview.total),
        study_percent_label: format!("{} studied", overview.study_percent),
        current_level_label: overview.current_level.to_string(),
        current_tier_label: format!("{} · {}", tier.code(), tier.title()),
        completion_percent: overview.completion_percent.value(),
        continue_level: overview.current_level,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCardVm {
    pub level: LevelId,
    pub id_label: String,
    pub title: String,
    pub status_label: &'static str,
    pub action_label: &'static str,
    pub score_label: Option<String>,
    pub is_current: bool,
    pub is_unlocked: bool,
    pub show_study_badge: bool,
    pub state_class: &'static str,
}

#[must_use]
pub fn map_level_card(card: &LevelCard) -> LevelCardVm {
    let state_class = if !card.is_unlocked() {
        "level-card--locked"
    } else if card.state == LevelState::Completed {
        "level-card--completed"
    } else if card.is_current {
        "level-card--current"
    } else {
        "level-card--open"
    };

    LevelCardVm {
        level: card.level,
        id_label: card.level.to_string(),
        title: card.title.clone(),
        status_label: card.status.label(),
        action_label: card.action.label(),
        score_label: card.score.map(|score| format!("Score: {score}")),
        is_current: card.is_current,
        is_unlocked: card.is_unlocked(),
        show_study_badge: card.shows_study_badge(),
        state_class,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierGroupVm {
    pub tier: Tier,
    pub heading: String,
    pub description: &'static str,
    pub cards: Vec<LevelCardVm>,
}

#[must_use]
pub fn map_tier_groups(progress: &UserProgress, catalog: &Catalog) -> Vec<TierGroupVm> {
    tier_groups(progress, catalog)
        .into_iter()
        .map(|group| TierGroupVm {
            tier: group.tier,
            heading: format!("{} · {}", group.tier.code(), group.tier.title()),
            description: group.tier.description(),
            cards: group.cards.iter().map(map_level_card).collect(),
        })
        .collect()
}
