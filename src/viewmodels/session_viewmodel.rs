// ============================================================================
// SESSION VIEWMODEL - Login, role resolution, restore, logout
// ============================================================================
// Returns values for the caller; state changes go through AppState and are
// announced to subscribers.
// ============================================================================

use crate::error::{ApiError, AppError};
use crate::models::{Credentials, NewUser, Notification, Role, TokenClaims, User};
use crate::state::{AdminSection, AppState, AuthForm, IncrementalUpdate, PendingAction, Tab};
use crate::viewmodels::{NavigationViewModel, ScannerViewModel, Services};

#[derive(Clone)]
pub struct SessionViewModel {
    state: AppState,
    services: Services,
}

impl SessionViewModel {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    fn navigation(&self) -> NavigationViewModel {
        NavigationViewModel::new(self.state.clone(), self.services.clone())
    }

    /// Reads the role from the token's `is_admin` claim; opaque tokens fall
    /// back to probing the admin-only endpoint.
    pub async fn resolve_role(&self, token: &str) -> Role {
        if let Some(role) = TokenClaims::from_token(token).and_then(|c| c.role()) {
            log::debug!("🔐 [SESSION] Role {:?} read from token claim", role);
            return role;
        }
        match self.services.api.all_registrations(token).await {
            Ok(_) => Role::Admin,
            Err(e) => {
                log::debug!("🔐 [SESSION] Admin probe refused ({}), using user role", e);
                Role::User
            }
        }
    }

    /// Regular login form
    pub async fn login(&self, credentials: Credentials) -> Result<Role, AppError> {
        if let Err(e) = credentials.validate() {
            self.state.notify(Notification::error(e.to_string()));
            return Err(e.into());
        }

        log::info!("🔐 [SESSION] Logging in {}", credentials.email);
        self.state.set_pending(PendingAction::Login, true);
        let result = self.exchange_token(&credentials).await;
        self.state.set_pending(PendingAction::Login, false);

        match result {
            Ok((token, role)) => {
                self.establish(token, role);
                self.state.notify(Notification::success("Login successful!"));
                self.show_interface(role).await;
                Ok(role)
            }
            Err(e) => {
                log::warn!("❌ [SESSION] Login failed: {}", e);
                let message = match &e {
                    ApiError::Rejected { detail, .. } if detail.is_empty() => "Login failed".to_string(),
                    other => other.user_message(),
                };
                self.state.notify(Notification::error(message));
                Err(e.into())
            }
        }
    }

    /// Admin login form: same exchange, but only admin tokens are kept
    pub async fn admin_login(&self, credentials: Credentials) -> Result<Role, AppError> {
        if let Err(e) = credentials.validate() {
            self.state.notify(Notification::error(e.to_string()));
            return Err(e.into());
        }

        log::info!("🛡️ [SESSION] Admin login for {}", credentials.email);
        self.state.set_pending(PendingAction::AdminLogin, true);
        let result = self.exchange_token(&credentials).await;
        self.state.set_pending(PendingAction::AdminLogin, false);

        let (token, role) = match result {
            Ok(pair) => pair,
            Err(e) => {
                let message = match e {
                    ApiError::Rejected { .. } => "Invalid admin credentials".to_string(),
                    ref other => other.user_message(),
                };
                self.state.notify(Notification::error(message));
                return Err(e.into());
            }
        };

        if !role.is_admin() {
            log::warn!("🛡️ [SESSION] Token has no admin privileges");
            self.clear_session();
            self.state.notify(Notification::error(AppError::AdminRequired.to_string()));
            return Err(AppError::AdminRequired);
        }

        self.establish(token, role);
        self.state.notify(Notification::success("Admin login successful!"));
        self.show_interface(role).await;
        Ok(role)
    }

    /// Startup: keeps a persisted token only if the backend still accepts it
    pub async fn restore(&self) -> Role {
        let Some(token) = self.services.tokens.load() else {
            log::info!("🔐 [SESSION] No stored token");
            self.navigation().show_tab(Tab::Auth).await;
            return Role::Unauthenticated;
        };

        match self.services.api.my_registrations(&token).await {
            Ok(_) => {
                let role = self.resolve_role(&token).await;
                log::info!("✅ [SESSION] Restored session as {:?}", role);
                self.establish(token, role);
                self.show_interface(role).await;
                role
            }
            Err(e) => {
                log::warn!("⚠️ [SESSION] Stored token rejected: {}", e);
                self.clear_session();
                self.navigation().show_tab(Tab::Auth).await;
                Role::Unauthenticated
            }
        }
    }

    /// Creates an account, then switches the auth area to the login form
    pub async fn register_account(&self, new_user: NewUser) -> Result<User, AppError> {
        if let Err(e) = new_user.validate() {
            self.state.notify(Notification::error(e.to_string()));
            return Err(e.into());
        }

        self.state.set_pending(PendingAction::CreateAccount, true);
        let result = self.services.api.register_user(&new_user).await;
        self.state.set_pending(PendingAction::CreateAccount, false);

        match result {
            Ok(user) => {
                log::info!("📝 [SESSION] Account created for {}", user.email);
                self.state.notify(Notification::success("Registration successful! Please login."));
                self.state.auth_forms.borrow_mut().show(AuthForm::Login);
                self.state.notify_subscribers(IncrementalUpdate::Navigation);
                Ok(user)
            }
            Err(e) => {
                self.state.notify(Notification::error(e.user_message()));
                Err(e.into())
            }
        }
    }

    pub fn show_auth_form(&self, form: AuthForm) {
        self.state.auth_forms.borrow_mut().show(form);
        self.state.notify_subscribers(IncrementalUpdate::Navigation);
    }

    /// Drops the session and the camera, back to the auth tab
    pub async fn logout(&self) {
        log::info!("👋 [SESSION] Logging out");
        ScannerViewModel::new(self.state.clone(), self.services.clone()).release();
        self.clear_session();
        self.navigation().show_tab(Tab::Auth).await;
        self.state.notify(Notification::success("Logged out successfully"));
    }

    async fn exchange_token(&self, credentials: &Credentials) -> Result<(String, Role), ApiError> {
        let response = self.services.api.login(credentials).await?;
        let role = self.resolve_role(&response.access_token).await;
        Ok((response.access_token, role))
    }

    fn establish(&self, token: String, role: Role) {
        if let Err(e) = self.services.tokens.save(&token) {
            log::warn!("⚠️ [SESSION] Token not persisted: {}", e);
        }
        self.state.session.establish(token, role);
        self.state.notify_subscribers(IncrementalUpdate::Session);
    }

    fn clear_session(&self) {
        if let Err(e) = self.services.tokens.clear() {
            log::warn!("⚠️ [SESSION] Stored token not removed: {}", e);
        }
        self.state.session.clear();
        self.state.reset_user_data();
        self.state.admin_sections.borrow_mut().show(AdminSection::QrScanner);
        self.state.auth_forms.borrow_mut().show(AuthForm::Login);
        self.state.notify_subscribers(IncrementalUpdate::Session);
    }

    async fn show_interface(&self, role: Role) {
        let navigation = self.navigation();
        if role.is_admin() {
            self.state.admin_sections.borrow_mut().show(AdminSection::QrScanner);
            navigation.show_tab(Tab::Admin).await;
        } else {
            navigation.show_tab(Tab::Events).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use futures::executor::block_on;

    use super::*;
    use crate::error::ValidationError;
    use crate::services::TokenStore;
    use crate::state::{ScannerPhase, ScannerStatus};
    use crate::testing::{rejected, sample_registration, FakeApi, FakeCamera, MemoryTokenStore};
    use crate::viewmodels::fixtures::Harness;

    fn jwt(is_admin: bool) -> String {
        format!(
            "e30.{}.sig",
            URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"a@b.c","is_admin":{}}}"#, is_admin))
        )
    }

    #[test]
    fn unauthorized_login_persists_nothing() {
        let h = Harness::new(FakeApi::default());
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        let result = block_on(vm.login(Credentials::new("a@b.c", "wrong")));

        assert!(matches!(result, Err(AppError::Api(ref e)) if e.is_unauthorized()));
        assert_eq!(h.state.session.role(), Role::Unauthenticated);
        assert_eq!(h.tokens.load(), None);
        assert!(!h.state.is_pending(PendingAction::Login));
        assert_eq!(h.toasts(), vec!["Incorrect email or password"]);
    }

    #[test]
    fn opaque_token_with_refused_probe_is_a_user() {
        let api = FakeApi::with_token("opaque");
        *api.all_registrations.borrow_mut() = Err(rejected(403, "Not enough permissions"));
        let h = Harness::new(api);
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        let role = block_on(vm.login(Credentials::new("a@b.c", "pw"))).unwrap();

        assert_eq!(role, Role::User);
        assert_eq!(h.tokens.load().as_deref(), Some("opaque"));
        assert!(h.state.tabs.borrow().is_visible(Tab::Events));
        assert_eq!(h.api.events_calls.get(), 1);
        assert_eq!(h.toasts(), vec!["Login successful!"]);
    }

    #[test]
    fn admin_probe_success_opens_the_scanner_section() {
        let api = FakeApi::with_token("opaque");
        *api.all_registrations.borrow_mut() = Ok(vec![sample_registration(1, 1)]);
        let h = Harness::new(api);
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        let role = block_on(vm.admin_login(Credentials::new("admin@b.c", "pw"))).unwrap();

        assert_eq!(role, Role::Admin);
        assert!(h.state.tabs.borrow().is_visible(Tab::Admin));
        assert!(h.state.admin_sections.borrow().is_visible(AdminSection::QrScanner));
        assert_eq!(h.state.scanner.borrow().phase(), ScannerPhase::Inactive);
        assert_eq!(h.state.scanner.borrow().status(), ScannerStatus::Ready);
    }

    #[test]
    fn token_claim_wins_over_the_probe() {
        let h = Harness::new(FakeApi::with_token(&jwt(true)));
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        let role = block_on(vm.login(Credentials::new("a@b.c", "pw"))).unwrap();

        assert_eq!(role, Role::Admin);
        assert_eq!(h.api.all_registrations_calls.get(), 0);
    }

    #[test]
    fn admin_form_rejects_user_tokens() {
        let h = Harness::new(FakeApi::with_token(&jwt(false)));
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        let result = block_on(vm.admin_login(Credentials::new("a@b.c", "pw")));

        assert_eq!(result, Err(AppError::AdminRequired));
        assert_eq!(h.tokens.load(), None);
        assert!(!h.state.session.is_authenticated());
        assert_eq!(h.toasts(), vec!["Admin privileges required"]);
    }

    #[test]
    fn empty_fields_are_rejected_before_any_request() {
        let h = Harness::new(FakeApi::default());
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        let result = block_on(vm.login(Credentials::new("", "")));

        assert_eq!(result, Err(AppError::Validation(ValidationError::MissingFields)));
        assert_eq!(h.api.login_calls.get(), 0);
    }

    #[test]
    fn restore_keeps_a_live_token() {
        let h = Harness::with(FakeApi::default(), MemoryTokenStore::holding("stored"), FakeCamera::default());
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        assert_eq!(block_on(vm.restore()), Role::User);
        assert_eq!(h.state.session.token().as_deref(), Some("stored"));
        assert!(h.state.tabs.borrow().is_visible(Tab::Events));
    }

    #[test]
    fn restore_drops_a_dead_token() {
        let api = FakeApi::default();
        *api.my_registrations.borrow_mut() = Err(rejected(401, "Could not validate credentials"));
        let h = Harness::with(api, MemoryTokenStore::holding("expired"), FakeCamera::default());
        let vm = SessionViewModel::new(h.state.clone(), h.services());

        assert_eq!(block_on(vm.restore()), Role::Unauthenticated);
        assert_eq!(h.tokens.load(), None);
        assert!(h.state.tabs.borrow().is_visible(Tab::Auth));
    }

    #[test]
    fn registration_switches_to_the_login_form() {
        let api = FakeApi::default();
        *api.register_user.borrow_mut() = Ok(User {
            id: 4,
            email: "new@b.c".into(),
            full_name: "New Person".into(),
            is_admin: false,
            created_at: chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        });
        let h = Harness::new(api);
        let vm = SessionViewModel::new(h.state.clone(), h.services());
        vm.show_auth_form(AuthForm::Register);

        let user = block_on(vm.register_account(NewUser {
            email: "new@b.c".into(),
            full_name: "New Person".into(),
            password: "secret".into(),
        }))
        .unwrap();

        assert_eq!(user.id, 4);
        assert!(h.state.auth_forms.borrow().is_visible(AuthForm::Login));
        assert_eq!(h.toasts(), vec!["Registration successful! Please login."]);
    }

    #[test]
    fn logout_stops_the_camera() {
        let h = Harness::new(FakeApi::with_token(&jwt(true)));
        let vm = SessionViewModel::new(h.state.clone(), h.services());
        block_on(vm.login(Credentials::new("a@b.c", "pw"))).unwrap();
        let scanner = ScannerViewModel::new(h.state.clone(), h.services());
        block_on(scanner.start());
        assert!(h.state.scanner.borrow().has_stream());

        block_on(vm.logout());

        assert_eq!(h.camera.released(), 1);
        assert_eq!(h.state.scanner.borrow().phase(), ScannerPhase::Inactive);
        assert_eq!(h.state.session.role(), Role::Unauthenticated);
        assert_eq!(h.tokens.load(), None);
        assert!(h.state.tabs.borrow().is_visible(Tab::Auth));
        assert_eq!(h.toasts().last().map(String::as_str), Some("Logged out successfully"));
    }
}
