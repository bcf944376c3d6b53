/// Minutes offered as one-tap choices above the custom entry.
pub const SLEEP_TIME_PRESETS: [i32; 4] = [5, 15, 30, 60];

/// Minutes added or removed per press of the custom entry buttons.
pub const SLEEP_TIME_STEP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSource {
    Preset,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepTimerCommit {
    pub minutes: i32,
    pub source: CommitSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    CustomAdjusting,
    Committed(SleepTimerCommit),
}

/// Choice of a one-shot sleep timer duration. Committing ends the edit.
#[derive(Debug, Clone)]
pub struct SleepTimerEditor {
    custom_minutes: i32,
    state: EditorState,
}

impl SleepTimerEditor {
    pub fn new(custom_minutes: i32) -> Self {
        Self {
            custom_minutes,
            state: EditorState::Idle,
        }
    }

    pub fn custom_minutes(&self) -> i32 {
        self.custom_minutes
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.state, EditorState::Committed(_))
    }

    pub fn increment(&mut self) {
        self.adjust(SLEEP_TIME_STEP);
    }

    pub fn decrement(&mut self) {
        self.adjust(-SLEEP_TIME_STEP);
    }

    fn adjust(&mut self, delta: i32) {
        if self.is_committed() {
            return;
        }

        self.custom_minutes = self.custom_minutes.saturating_add(delta);
        self.state = EditorState::CustomAdjusting;
    }

    /// Commit one of the presets. The custom value is left as it is.
    pub fn select_preset(&mut self, minutes: i32) -> Option<SleepTimerCommit> {
        self.commit(SleepTimerCommit {
            minutes,
            source: CommitSource::Preset,
        })
    }

    pub fn commit_custom(&mut self) -> Option<SleepTimerCommit> {
        self.commit(SleepTimerCommit {
            minutes: self.custom_minutes,
            source: CommitSource::Custom,
        })
    }

    fn commit(&mut self, commit: SleepTimerCommit) -> Option<SleepTimerCommit> {
        if self.is_committed() {
            return None;
        }

        self.state = EditorState::Committed(commit);
        Some(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_value_steps_by_one_minute() {
        let mut editor = SleepTimerEditor::new(45);
        editor.increment();
        editor.increment();
        editor.decrement();

        assert_eq!(editor.custom_minutes(), 46);
        assert_eq!(editor.state(), EditorState::CustomAdjusting);
        assert_eq!(
            editor.commit_custom(),
            Some(SleepTimerCommit {
                minutes: 46,
                source: CommitSource::Custom
            })
        );
    }

    #[test]
    fn preset_commits_without_touching_custom_value() {
        let mut editor = SleepTimerEditor::new(45);

        let commit = editor.select_preset(60).unwrap();
        assert_eq!(commit.minutes, 60);
        assert_eq!(commit.source, CommitSource::Preset);
        assert_eq!(editor.custom_minutes(), 45);
    }

    #[test]
    fn committed_editor_ignores_further_input() {
        let mut editor = SleepTimerEditor::new(10);
        editor.select_preset(SLEEP_TIME_PRESETS[0]).unwrap();

        editor.increment();
        assert_eq!(editor.custom_minutes(), 10);
        assert_eq!(editor.commit_custom(), None);
        assert_eq!(editor.select_preset(30), None);
    }

    #[test]
    fn custom_value_is_not_clamped() {
        let mut editor = SleepTimerEditor::new(1);
        editor.decrement();
        editor.decrement();
        assert_eq!(editor.custom_minutes(), -1);
    }
}
