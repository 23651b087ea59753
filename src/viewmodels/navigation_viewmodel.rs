// ============================================================================
// NAVIGATION VIEWMODEL - Section switching and refresh dispatch
// ============================================================================

use crate::state::{AdminSection, AppState, IncrementalUpdate, RefreshAction, Tab};
use crate::viewmodels::{EventsViewModel, RegistrationsViewModel, ScannerViewModel, Services};

#[derive(Clone)]
pub struct NavigationViewModel {
    state: AppState,
    services: Services,
}

impl NavigationViewModel {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    pub async fn show_tab(&self, tab: Tab) {
        log::info!("🧭 [NAV] Showing tab {:?}", tab);
        let action = self.state.tabs.borrow_mut().show(tab);
        self.state.notify_subscribers(IncrementalUpdate::Navigation);
        self.run_refresh(action).await;
    }

    pub async fn show_admin_section(&self, section: AdminSection) {
        log::info!("🧭 [NAV] Showing admin section {:?}", section);
        let action = self.state.admin_sections.borrow_mut().show(section);
        self.state.notify_subscribers(IncrementalUpdate::Navigation);
        self.run_refresh(action).await;
    }

    async fn run_refresh(&self, action: RefreshAction) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            match action {
                RefreshAction::None => {}
                RefreshAction::LoadEvents => {
                    EventsViewModel::new(self.state.clone(), self.services.clone()).load_events().await;
                }
                RefreshAction::LoadMyRegistrations => {
                    RegistrationsViewModel::new(self.state.clone(), self.services.clone()).load_mine().await;
                }
                RefreshAction::LoadAllRegistrations => {
                    RegistrationsViewModel::new(self.state.clone(), self.services.clone()).load_all().await;
                }
                RefreshAction::ShowAdminPanel => {
                    let mut sections = self.state.admin_sections.borrow_mut();
                    let current = sections.visible();
                    next = Some(sections.show(current));
                }
                RefreshAction::InitializeScanner => {
                    ScannerViewModel::new(self.state.clone(), self.services.clone()).initialize();
                }
                RefreshAction::ClearCreateEventResult => {
                    *self.state.created_event.borrow_mut() = None;
                    self.state.notify_subscribers(IncrementalUpdate::CreateEvent);
                }
            }
        }
    }
}
