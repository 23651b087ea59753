// ============================================================================
// APP STATE - Single application store
// ============================================================================
// Cloning an AppState clones the handles, not the data. It is created once
// in lib.rs and passed explicitly to viewmodels and views.
// ============================================================================

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::models::{Event, Notification, Registration};
use crate::state::scanner_state::CaptureLoop;
use crate::state::session_state::SessionState;
use crate::state::view_state::{AdminSection, AuthForm, SectionView, Tab};

/// Part of the DOM that needs refreshing after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncrementalUpdate {
    /// Role changed: nav visibility, user info, forms
    Session,
    /// Visible tab / admin section / auth sub-form
    Navigation,
    Events,
    MyRegistrations,
    AllRegistrations,
    /// Status line, buttons and result panel of the scanner
    Scanner,
    /// Flash the scanner frame
    ScannerFlash,
    CreateEvent,
    /// Busy state of action buttons
    Pending,
    Notifications,
}

/// Remote list with its loading state
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Loadable::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// Result panel of the create-event form
#[derive(Debug, Clone, PartialEq)]
pub enum CreateEventOutcome {
    Created(Event),
    Failed(String),
    NetworkError,
}

impl CreateEventOutcome {
    pub fn heading(&self) -> &'static str {
        match self {
            CreateEventOutcome::Created(_) => "✅ Event Created Successfully!",
            CreateEventOutcome::Failed(_) => "❌ Event Creation Failed",
            CreateEventOutcome::NetworkError => "❌ Network Error",
        }
    }

    /// Explanation under a failure heading
    pub fn failure_detail(&self) -> Option<&str> {
        match self {
            CreateEventOutcome::Created(_) => None,
            CreateEventOutcome::Failed(detail) => Some(detail),
            CreateEventOutcome::NetworkError => Some("Please check your connection and try again."),
        }
    }
}

/// Controls that show a spinner while their request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    Login,
    AdminLogin,
    CreateAccount,
    CreateEvent,
    RegisterForEvent(i64),
}

type Subscriber = Rc<dyn Fn(IncrementalUpdate)>;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,

    // Navigation
    pub tabs: Rc<RefCell<SectionView<Tab>>>,
    pub admin_sections: Rc<RefCell<SectionView<AdminSection>>>,
    pub auth_forms: Rc<RefCell<SectionView<AuthForm>>>,

    // Remote data
    pub events: Rc<RefCell<Loadable<Event>>>,
    pub my_registrations: Rc<RefCell<Loadable<Registration>>>,
    pub all_registrations: Rc<RefCell<Loadable<Registration>>>,
    pub created_event: Rc<RefCell<Option<CreateEventOutcome>>>,

    pub scanner: Rc<RefCell<CaptureLoop>>,

    pub pending: Rc<RefCell<HashSet<PendingAction>>>,
    pub notifications: Rc<RefCell<VecDeque<Notification>>>,

    pub change_subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            tabs: Rc::new(RefCell::new(SectionView::new(Tab::Auth))),
            admin_sections: Rc::new(RefCell::new(SectionView::new(AdminSection::QrScanner))),
            auth_forms: Rc::new(RefCell::new(SectionView::new(AuthForm::Login))),
            events: Rc::new(RefCell::new(Loadable::Idle)),
            my_registrations: Rc::new(RefCell::new(Loadable::Idle)),
            all_registrations: Rc::new(RefCell::new(Loadable::Idle)),
            created_event: Rc::new(RefCell::new(None)),
            scanner: Rc::new(RefCell::new(CaptureLoop::new())),
            pending: Rc::new(RefCell::new(HashSet::new())),
            notifications: Rc::new(RefCell::new(VecDeque::new())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Queues a toast
    pub fn notify(&self, notification: Notification) {
        log::debug!("🔔 [STATE] {:?}: {}", notification.kind, notification.message);
        self.notifications.borrow_mut().push_back(notification);
        self.notify_subscribers(IncrementalUpdate::Notifications);
    }

    /// Drains queued toasts for display
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.borrow_mut().drain(..).collect()
    }

    pub fn set_pending(&self, action: PendingAction, pending: bool) {
        let changed = {
            let mut set = self.pending.borrow_mut();
            if pending { set.insert(action) } else { set.remove(&action) }
        };
        if changed {
            self.notify_subscribers(IncrementalUpdate::Pending);
        }
    }

    pub fn is_pending(&self, action: PendingAction) -> bool {
        self.pending.borrow().contains(&action)
    }

    /// Drops every per-user list and panel
    pub fn reset_user_data(&self) {
        *self.my_registrations.borrow_mut() = Loadable::Idle;
        *self.all_registrations.borrow_mut() = Loadable::Idle;
        *self.created_event.borrow_mut() = None;
        self.pending.borrow_mut().clear();
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(IncrementalUpdate) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Subscribers run after the list borrow is released, so they may
    /// subscribe or mutate state themselves.
    pub fn notify_subscribers(&self, update: IncrementalUpdate) {
        let subscribers: Vec<Subscriber> = self.change_subscribers.borrow().iter().cloned().collect();
        for callback in subscribers {
            callback(update);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
