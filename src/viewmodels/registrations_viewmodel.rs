use crate::error::ApiError;
use crate::state::{AppState, IncrementalUpdate, Loadable};
use crate::viewmodels::Services;

/// Own and all-registrations lists
#[derive(Clone)]
pub struct RegistrationsViewModel {
    state: AppState,
    services: Services,
}

impl RegistrationsViewModel {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    pub async fn load_mine(&self) {
        *self.state.my_registrations.borrow_mut() = Loadable::Loading;
        self.state.notify_subscribers(IncrementalUpdate::MyRegistrations);

        let loaded = match self.state.session.token() {
            Some(token) => self.services.api.my_registrations(&token).await,
            None => Err(ApiError::MissingToken),
        };
        *self.state.my_registrations.borrow_mut() = match loaded {
            Ok(list) => {
                log::info!("🎟️ [REGISTRATIONS] {} own registrations", list.len());
                Loadable::Loaded(list)
            }
            Err(e) => {
                log::error!("❌ [REGISTRATIONS] Loading own registrations failed: {}", e);
                Loadable::Failed(e.user_message())
            }
        };
        self.state.notify_subscribers(IncrementalUpdate::MyRegistrations);
    }

    pub async fn load_all(&self) {
        *self.state.all_registrations.borrow_mut() = Loadable::Loading;
        self.state.notify_subscribers(IncrementalUpdate::AllRegistrations);

        let loaded = match self.state.session.token() {
            Some(token) => self.services.api.all_registrations(&token).await,
            None => Err(ApiError::MissingToken),
        };
        *self.state.all_registrations.borrow_mut() = match loaded {
            Ok(list) => {
                log::info!("📋 [REGISTRATIONS] {} registrations in total", list.len());
                Loadable::Loaded(list)
            }
            Err(e) => {
                log::error!("❌ [REGISTRATIONS] Loading all registrations failed: {}", e);
                Loadable::Failed(e.user_message())
            }
        };
        self.state.notify_subscribers(IncrementalUpdate::AllRegistrations);
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::models::Role;
    use crate::testing::{rejected, sample_registration, FakeApi};
    use crate::viewmodels::fixtures::Harness;

    #[test]
    fn loads_own_registrations_with_the_session_token() {
        let api = FakeApi::default();
        *api.my_registrations.borrow_mut() = Ok(vec![sample_registration(1, 2), sample_registration(2, 3)]);
        let h = Harness::new(api);
        h.state.session.establish("tok".into(), Role::User);

        block_on(RegistrationsViewModel::new(h.state.clone(), h.services()).load_mine());

        assert_eq!(h.state.my_registrations.borrow().items().len(), 2);
    }

    #[test]
    fn failures_keep_the_server_message_for_the_retry_card() {
        let api = FakeApi::default();
        *api.all_registrations.borrow_mut() = Err(rejected(403, "Not enough permissions"));
        let h = Harness::new(api);
        h.state.session.establish("tok".into(), Role::User);

        block_on(RegistrationsViewModel::new(h.state.clone(), h.services()).load_all());

        assert_eq!(*h.state.all_registrations.borrow(), Loadable::Failed("Not enough permissions".into()));
    }

    #[test]
    fn no_request_without_a_session() {
        let h = Harness::new(FakeApi::default());

        block_on(RegistrationsViewModel::new(h.state.clone(), h.services()).load_mine());

        assert_eq!(h.api.my_registrations_calls.get(), 0);
        assert_eq!(*h.state.my_registrations.borrow(), Loadable::Failed("Please login first".into()));
    }
}
