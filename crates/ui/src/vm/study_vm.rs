use course_core::model::StudySection;
use course_core::progression::StudyChecklist;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudyTabVm {
    pub section: StudySection,
    pub label: &'static str,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyVm {
    pub tabs: Vec<StudyTabVm>,
    pub progress_label: String,
    pub percent: u8,
    pub all_completed: bool,
}

impl StudyVm {
    #[must_use]
    pub fn is_completed(&self, section: StudySection) -> bool {
        self.tabs
            .iter()
            .any(|tab| tab.section == section && tab.completed)
    }
}

#[must_use]
pub fn map_study(required: &[StudySection], checklist: &StudyChecklist) -> StudyVm {
    let tabs = required
        .iter()
        .map(|section| StudyTabVm {
            section: *section,
            label: section.label(),
            completed: checklist.contains(*section),
        })
        .collect::<Vec<_>>();
    let done = tabs.iter().filter(|tab| tab.completed).count();

    StudyVm {
        progress_label: format!("{done} / {} sections completed", tabs.len()),
        percent: checklist.percent(required).value(),
        all_completed: checklist.covers(required),
        tabs,
    }
}
