//! Selection state for the calendar screen.
//!
//! Fetches run asynchronously and can resolve in any order. `MonthLoader`
//! hands out a `LoadTicket` for every fetch it wants and only applies a
//! result whose ticket is the latest one issued for the current selection.
//! Everything else is dropped quietly.

use std::fmt;

use chrono::NaiveDate;
use lms_core::MonthKey;
use lms_core::model::UserId;
use uuid::Uuid;

use crate::calendar_service::{MonthQuery, MonthView};

/// Identifies one requested fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    id: Uuid,
    query: MonthQuery,
}

impl LoadTicket {
    fn issue(query: MonthQuery) -> Self {
        Self {
            id: Uuid::new_v4(),
            query,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn query(&self) -> &MonthQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthNav {
    Previous,
    Next,
    Today(NaiveDate),
}

/// What happened to a resolved fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLoader {
    selection: MonthQuery,
    pending: Option<Uuid>,
    view: Option<MonthView>,
    notice: Option<String>,
}

impl MonthLoader {
    #[must_use]
    pub fn new(selection: MonthQuery) -> Self {
        Self {
            selection,
            pending: None,
            view: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &MonthQuery {
        &self.selection
    }

    /// The last successfully loaded month.
    ///
    /// While a different month is loading, or after it failed to load, this
    /// still holds the previous month; compare `view.query` with
    /// `selection()` to tell.
    #[must_use]
    pub fn view(&self) -> Option<&MonthView> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn view_is_current(&self) -> bool {
        self.view
            .as_ref()
            .is_some_and(|view| view.query == self.selection)
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a (re)fetch of the current selection.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = LoadTicket::issue(self.selection);
        self.pending = Some(ticket.id);
        tracing::debug!(ticket = %ticket.id, month = %self.selection.month, "month load started");
        ticket
    }

    /// Move to another month and request it.
    pub fn navigate(&mut self, nav: MonthNav) -> LoadTicket {
        let month = match nav {
            MonthNav::Previous => self.selection.month.prev(),
            MonthNav::Next => self.selection.month.next(),
            MonthNav::Today(today) => MonthKey::containing(today),
        };
        self.selection = self.selection.with_month(month);
        self.begin_load()
    }

    /// Switch whose calendar is shown, keeping the month.
    pub fn select_user(&mut self, user_id: Option<UserId>) -> LoadTicket {
        self.selection = self.selection.with_user(user_id);
        self.begin_load()
    }

    /// Apply a finished fetch if it still matches the selection.
    ///
    /// A successful result replaces the view wholesale. A failure sets the
    /// notice and keeps whatever view was already shown.
    pub fn resolve<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<MonthView, E>,
    ) -> Resolution {
        if self.pending != Some(ticket.id) || ticket.query != self.selection {
            tracing::debug!(ticket = %ticket.id, month = %ticket.query.month, "dropping stale month load");
            return Resolution::Stale;
        }
        self.pending = None;
        match result {
            Ok(view) => {
                self.view = Some(view);
                self.notice = None;
                Resolution::Applied
            }
            Err(err) => {
                tracing::warn!(ticket = %ticket.id, month = %ticket.query.month, %err, "month load failed");
                self.notice = Some(format!("Could not load {}: {err}", ticket.query.month.label()));
                Resolution::Failed
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{TrackId, TrainingTrack};

    fn november() -> MonthQuery {
        MonthQuery::new(MonthKey::new(2025, 10), None)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    }

    fn view_for(query: MonthQuery, tracks: u64) -> MonthView {
        let due = query.month.first_day();
        let tracks: Vec<_> = (0..tracks)
            .map(|id| {
                TrainingTrack::new(TrackId::new(id), format!("T{id}"), 0, 1).with_due_date(Some(due))
            })
            .collect();
        MonthView::build(query, today(), &tracks)
    }

    #[test]
    fn applies_matching_result() {
        let mut loader = MonthLoader::new(november());
        let ticket = loader.begin_load();
        assert!(loader.is_loading());

        let outcome = loader.resolve::<String>(ticket, Ok(view_for(november(), 2)));
        assert_eq!(outcome, Resolution::Applied);
        assert!(!loader.is_loading());
        assert!(loader.view_is_current());
        assert_eq!(loader.view().unwrap().summary.total_tracks, 2);
    }

    #[test]
    fn late_response_for_abandoned_month_is_dropped() {
        let mut loader = MonthLoader::new(november());
        let november_ticket = loader.begin_load();
        let december_ticket = loader.navigate(MonthNav::Next);
        assert_eq!(december_ticket.query().month, MonthKey::new(2025, 11));

        let december = *december_ticket.query();
        assert_eq!(
            loader.resolve::<String>(december_ticket, Ok(view_for(december, 1))),
            Resolution::Applied
        );
        assert_eq!(
            loader.resolve::<String>(november_ticket, Ok(view_for(november(), 5))),
            Resolution::Stale
        );
        assert_eq!(loader.view().unwrap().query, december);
        assert!(loader.notice().is_none());
    }

    #[test]
    fn superseded_ticket_for_same_month_is_dropped() {
        let mut loader = MonthLoader::new(november());
        let first = loader.begin_load();
        let second = loader.begin_load();
        assert_eq!(
            loader.resolve::<String>(first, Ok(view_for(november(), 1))),
            Resolution::Stale
        );
        assert!(loader.is_loading());
        assert_eq!(
            loader.resolve::<String>(second, Ok(view_for(november(), 3))),
            Resolution::Applied
        );
        assert_eq!(loader.view().unwrap().summary.total_tracks, 3);
    }

    #[test]
    fn failure_keeps_last_good_view() {
        let mut loader = MonthLoader::new(november());
        let ticket = loader.begin_load();
        loader.resolve::<String>(ticket, Ok(view_for(november(), 2)));

        let retry = loader.navigate(MonthNav::Next);
        let outcome = loader.resolve(retry, Err("connection reset"));
        assert_eq!(outcome, Resolution::Failed);
        assert_eq!(loader.view().unwrap().query, november());
        assert!(!loader.view_is_current());
        assert_eq!(
            loader.notice(),
            Some("Could not load December 2025: connection reset")
        );

        loader.dismiss_notice();
        assert!(loader.notice().is_none());
    }

    #[test]
    fn stale_failure_sets_no_notice() {
        let mut loader = MonthLoader::new(november());
        let abandoned = loader.begin_load();
        let _current = loader.navigate(MonthNav::Previous);
        assert_eq!(
            loader.resolve(abandoned, Err("timeout")),
            Resolution::Stale
        );
        assert!(loader.notice().is_none());
    }

    #[test]
    fn today_and_user_switch_update_selection() {
        let mut loader = MonthLoader::new(MonthQuery::new(MonthKey::new(2024, 1), None));
        loader.navigate(MonthNav::Today(today()));
        assert_eq!(loader.selection().month, MonthKey::new(2025, 10));

        let ticket = loader.select_user(Some(UserId::new(4)));
        assert_eq!(ticket.query().user_id, Some(UserId::new(4)));
        assert_eq!(loader.selection().month, MonthKey::new(2025, 10));
    }

    #[test]
    fn round_trip_navigation_reproduces_view() {
        let mut loader = MonthLoader::new(november());
        let first = loader.begin_load();
        loader.resolve::<String>(first, Ok(view_for(november(), 3)));
        let original = loader.view().cloned().unwrap();

        let dec = loader.navigate(MonthNav::Next);
        let dec_query = *dec.query();
        loader.resolve::<String>(dec, Ok(view_for(dec_query, 0)));
        let back = loader.navigate(MonthNav::Previous);
        let back_query = *back.query();
        loader.resolve::<String>(back, Ok(view_for(back_query, 3)));

        assert_eq!(loader.view(), Some(&original));
    }
}
