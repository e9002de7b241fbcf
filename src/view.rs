//! view.rs — two-state view model: aggregate feed vs. split detail.

use crate::result::AnalysisResult;

/// `Split` carries its selection, so a detail view without one is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Feed,
    Split { selected: AnalysisResult },
}

impl ViewState {
    pub fn is_split(&self) -> bool {
        matches!(self, ViewState::Split { .. })
    }

    pub fn selected(&self) -> Option<&AnalysisResult> {
        match self {
            ViewState::Feed => None,
            ViewState::Split { selected } => Some(selected),
        }
    }

    /// Enter (or re-target) the split view. Valid from both states; an
    /// existing selection is simply replaced.
    pub fn select(&mut self, result: AnalysisResult) {
        *self = ViewState::Split { selected: result };
    }

    /// Back to the feed; ignored when already there.
    pub fn close(&mut self) {
        *self = ViewState::Feed;
    }

    /// Out-of-band cancellation (e.g. an abort key): same as `close` from
    /// split, no effect from the feed.
    pub fn cancel(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_then_close_round_trip() {
        let mut view = ViewState::default();
        assert_eq!(view.selected(), None);

        let r = AnalysisResult::new("pick me", 30);
        view.select(r.clone());
        assert!(view.is_split());
        assert_eq!(view.selected(), Some(&r));

        view.close();
        assert_eq!(view, ViewState::Feed);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn close_from_feed_is_a_noop() {
        let mut view = ViewState::Feed;
        view.close();
        assert_eq!(view, ViewState::Feed);
    }

    #[test]
    fn reselect_replaces_the_selection() {
        let mut view = ViewState::default();
        let a = AnalysisResult::new("a", 1);
        let b = AnalysisResult::new("b", 2);

        view.select(a);
        view.select(b.clone());
        assert_eq!(view.selected(), Some(&b));
    }

    #[test]
    fn cancel_mirrors_close() {
        let mut view = ViewState::default();
        view.cancel(); // no effect from the feed
        assert_eq!(view, ViewState::Feed);

        view.select(AnalysisResult::new("open", 0));
        view.cancel();
        assert_eq!(view, ViewState::Feed);
    }
}
