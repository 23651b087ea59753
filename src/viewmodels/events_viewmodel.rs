// ============================================================================
// EVENTS VIEWMODEL - Event list, registration for events, event creation
// ============================================================================

use chrono::{Local, NaiveDateTime};

use crate::error::{ApiError, AppError};
use crate::models::{Event, EventDraft, Notification, Registration};
use crate::state::{AppState, CreateEventOutcome, IncrementalUpdate, Loadable, PendingAction, Tab};
use crate::viewmodels::{NavigationViewModel, RegistrationsViewModel, Services};

#[derive(Clone)]
pub struct EventsViewModel {
    state: AppState,
    services: Services,
}

impl EventsViewModel {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    pub async fn load_events(&self) {
        *self.state.events.borrow_mut() = Loadable::Loading;
        self.state.notify_subscribers(IncrementalUpdate::Events);

        let loaded = self.services.api.list_events().await;
        *self.state.events.borrow_mut() = match loaded {
            Ok(events) => {
                log::info!("📅 [EVENTS] {} events loaded", events.len());
                Loadable::Loaded(events)
            }
            Err(e) => {
                log::error!("❌ [EVENTS] Loading events failed: {}", e);
                Loadable::Failed(e.user_message())
            }
        };
        self.state.notify_subscribers(IncrementalUpdate::Events);
    }

    /// Registers the signed-in user; without a session the auth tab is shown
    /// and nothing is sent.
    pub async fn register_for_event(&self, event_id: i64) -> Result<Registration, AppError> {
        let Some(token) = self.state.session.token() else {
            self.state.notify(Notification::error(AppError::NotLoggedIn.to_string()));
            NavigationViewModel::new(self.state.clone(), self.services.clone())
                .show_tab(Tab::Auth)
                .await;
            return Err(AppError::NotLoggedIn);
        };

        log::info!("🎟️ [EVENTS] Registering for event {}", event_id);
        let pending = PendingAction::RegisterForEvent(event_id);
        self.state.set_pending(pending, true);
        let result = self.services.api.register_for_event(&token, event_id).await;
        self.state.set_pending(pending, false);

        match result {
            Ok(registration) => {
                self.state.notify(Notification::success(
                    "Registration successful! QR code sent to your email.",
                ));
                self.load_events().await;
                RegistrationsViewModel::new(self.state.clone(), self.services.clone())
                    .load_mine()
                    .await;
                Ok(registration)
            }
            Err(e) => {
                let message = match &e {
                    ApiError::Rejected { detail, .. } => detail.clone(),
                    _ => "Registration failed. Please try again.".to_string(),
                };
                self.state.notify(Notification::error(message));
                Err(e.into())
            }
        }
    }

    pub async fn create_event(&self, draft: EventDraft) -> Result<Event, AppError> {
        self.create_event_at(draft, Local::now().naive_local()).await
    }

    /// Validates against `now`, then submits. Invalid drafts never reach
    /// the backend.
    pub async fn create_event_at(&self, draft: EventDraft, now: NaiveDateTime) -> Result<Event, AppError> {
        let new_event = match draft.validate(now) {
            Ok(event) => event,
            Err(e) => {
                self.state.notify(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };
        let Some(token) = self.state.session.token() else {
            self.state.notify(Notification::error(AppError::AdminRequired.to_string()));
            return Err(AppError::AdminRequired);
        };

        self.state.set_pending(PendingAction::CreateEvent, true);
        let result = self.services.api.create_event(&token, &new_event).await;
        self.state.set_pending(PendingAction::CreateEvent, false);

        match result {
            Ok(event) => {
                log::info!("✅ [EVENTS] Event {} created", event.id);
                *self.state.created_event.borrow_mut() = Some(CreateEventOutcome::Created(event.clone()));
                self.state.notify_subscribers(IncrementalUpdate::CreateEvent);
                self.state.notify(Notification::success("Event created successfully!"));
                self.load_events().await;
                Ok(event)
            }
            Err(e) => {
                let (outcome, message) = match &e {
                    ApiError::Rejected { detail, .. } => (
                        CreateEventOutcome::Failed(detail.clone()),
                        format!("Event creation failed: {}", detail),
                    ),
                    _ => (
                        CreateEventOutcome::NetworkError,
                        "Event creation failed. Please try again.".to_string(),
                    ),
                };
                *self.state.created_event.borrow_mut() = Some(outcome);
                self.state.notify_subscribers(IncrementalUpdate::CreateEvent);
                self.state.notify(Notification::error(message));
                Err(e.into())
            }
        }
    }

    /// Clears the result panel; the form itself is reset by the view
    pub fn clear_event_form(&self) {
        *self.state.created_event.borrow_mut() = None;
        self.state.notify_subscribers(IncrementalUpdate::CreateEvent);
        self.state.notify(Notification::info("Form cleared"));
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use futures::executor::block_on;

    use super::*;
    use crate::error::ValidationError;
    use crate::models::Role;
    use crate::testing::{rejected, sample_event, sample_registration, FakeApi};
    use crate::viewmodels::fixtures::Harness;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn draft(date: &str) -> EventDraft {
        EventDraft { title: "Launch Party".into(), date: date.into(), ..EventDraft::default() }
    }

    #[test]
    fn past_dates_are_rejected_before_any_request() {
        let h = Harness::new(FakeApi::default());
        h.state.session.establish("tok".into(), Role::Admin);
        let vm = EventsViewModel::new(h.state.clone(), h.services());

        let result = block_on(vm.create_event_at(draft("2029-12-31T10:00"), now()));

        assert_eq!(result, Err(AppError::Validation(ValidationError::DateNotInFuture)));
        assert_eq!(h.api.create_event_calls.get(), 0);
        assert_eq!(h.toasts(), vec!["Event date must be in the future"]);
    }

    #[test]
    fn created_event_fills_the_result_panel_and_reloads() {
        let api = FakeApi::default();
        *api.create_event.borrow_mut() = Ok(sample_event(9, "Launch Party"));
        let h = Harness::new(api);
        h.state.session.establish("tok".into(), Role::Admin);
        let vm = EventsViewModel::new(h.state.clone(), h.services());

        let event = block_on(vm.create_event_at(draft("2030-02-01T18:00"), now())).unwrap();

        assert_eq!(event.id, 9);
        assert!(matches!(*h.state.created_event.borrow(), Some(CreateEventOutcome::Created(ref e)) if e.id == 9));
        assert_eq!(h.api.events_calls.get(), 1);
        assert!(!h.state.is_pending(PendingAction::CreateEvent));
    }

    #[test]
    fn creation_rejection_is_reported_with_the_server_detail() {
        let api = FakeApi::default();
        *api.create_event.borrow_mut() = Err(rejected(403, "Not enough permissions"));
        let h = Harness::new(api);
        h.state.session.establish("tok".into(), Role::User);
        let vm = EventsViewModel::new(h.state.clone(), h.services());

        assert!(block_on(vm.create_event_at(draft("2030-02-01T18:00"), now())).is_err());
        assert_eq!(h.toasts(), vec!["Event creation failed: Not enough permissions"]);
        assert_eq!(
            *h.state.created_event.borrow(),
            Some(CreateEventOutcome::Failed("Not enough permissions".into()))
        );
    }

    #[test]
    fn registering_without_session_shows_auth() {
        let h = Harness::new(FakeApi::default());
        let vm = EventsViewModel::new(h.state.clone(), h.services());
        h.state.tabs.borrow_mut().show(Tab::Events);

        assert_eq!(block_on(vm.register_for_event(1)), Err(AppError::NotLoggedIn));
        assert_eq!(h.api.register_for_event_calls.get(), 0);
        assert!(h.state.tabs.borrow().is_visible(Tab::Auth));
        assert_eq!(h.toasts(), vec!["Please login to register for events"]);
    }

    #[test]
    fn registration_reloads_events_and_own_registrations() {
        let api = FakeApi::default();
        *api.register_for_event.borrow_mut() = Ok(sample_registration(5, 1));
        let h = Harness::new(api);
        h.state.session.establish("tok".into(), Role::User);
        let vm = EventsViewModel::new(h.state.clone(), h.services());

        block_on(vm.register_for_event(1)).unwrap();

        assert_eq!(h.api.events_calls.get(), 1);
        assert_eq!(h.api.my_registrations_calls.get(), 1);
        assert_eq!(h.toasts(), vec!["Registration successful! QR code sent to your email."]);
    }

    #[test]
    fn duplicate_registration_surfaces_detail_verbatim() {
        let api = FakeApi::default();
        *api.register_for_event.borrow_mut() = Err(rejected(400, "Already registered for this event"));
        let h = Harness::new(api);
        h.state.session.establish("tok".into(), Role::User);
        let vm = EventsViewModel::new(h.state.clone(), h.services());

        assert!(block_on(vm.register_for_event(1)).is_err());
        assert_eq!(h.toasts(), vec!["Already registered for this event"]);
        assert!(!h.state.is_pending(PendingAction::RegisterForEvent(1)));
    }
}
