// ============================================================================
// VIEW STATE - Which section is visible
// ============================================================================
// Pure projection: `SectionView::show` records the requested section and
// hands back the refresh action. The DOM layer applies the projection and
// dispatches the action.
// ============================================================================

use std::fmt::Debug;

use crate::models::Role;

/// Work a section needs done when it becomes visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshAction {
    None,
    LoadEvents,
    LoadMyRegistrations,
    ShowAdminPanel,
    InitializeScanner,
    LoadAllRegistrations,
    ClearCreateEventResult,
}

/// A family of mutually exclusive sections
pub trait Section: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Name used in nav `data-*` attributes
    fn name(self) -> &'static str;

    fn dom_id(self) -> String;

    fn refresh(self) -> RefreshAction;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Auth,
    Events,
    MyRegistrations,
    Admin,
}

impl Tab {
    /// Whether the tab's nav control is offered to `role`
    pub fn visible_for(self, role: Role) -> bool {
        match self {
            Tab::Auth => !role.is_authenticated(),
            Tab::Events | Tab::MyRegistrations => role.is_authenticated(),
            Tab::Admin => role.is_admin(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Auth => "🔐 Login",
            Tab::Events => "📅 Events",
            Tab::MyRegistrations => "🎟️ My Registrations",
            Tab::Admin => "🛠️ Admin",
        }
    }
}

impl Section for Tab {
    const ALL: &'static [Self] = &[Tab::Auth, Tab::Events, Tab::MyRegistrations, Tab::Admin];

    fn name(self) -> &'static str {
        match self {
            Tab::Auth => "auth",
            Tab::Events => "events",
            Tab::MyRegistrations => "my-registrations",
            Tab::Admin => "admin",
        }
    }

    fn dom_id(self) -> String {
        self.name().to_string()
    }

    fn refresh(self) -> RefreshAction {
        match self {
            Tab::Auth => RefreshAction::None,
            Tab::Events => RefreshAction::LoadEvents,
            Tab::MyRegistrations => RefreshAction::LoadMyRegistrations,
            Tab::Admin => RefreshAction::ShowAdminPanel,
        }
    }
}

/// Sections inside the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    QrScanner,
    AllRegistrations,
    CreateEvent,
}

impl AdminSection {
    pub fn label(self) -> &'static str {
        match self {
            AdminSection::QrScanner => "📷 QR Scanner",
            AdminSection::AllRegistrations => "📋 All Registrations",
            AdminSection::CreateEvent => "➕ Create Event",
        }
    }
}

impl Section for AdminSection {
    const ALL: &'static [Self] = &[
        AdminSection::QrScanner,
        AdminSection::AllRegistrations,
        AdminSection::CreateEvent,
    ];

    fn name(self) -> &'static str {
        match self {
            AdminSection::QrScanner => "qr-scanner",
            AdminSection::AllRegistrations => "all-registrations",
            AdminSection::CreateEvent => "create-event",
        }
    }

    fn dom_id(self) -> String {
        format!("{}-section", self.name())
    }

    fn refresh(self) -> RefreshAction {
        match self {
            AdminSection::QrScanner => RefreshAction::InitializeScanner,
            AdminSection::AllRegistrations => RefreshAction::LoadAllRegistrations,
            AdminSection::CreateEvent => RefreshAction::ClearCreateEventResult,
        }
    }
}

/// Sub-forms of the auth tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Register,
    AdminLogin,
}

impl Section for AuthForm {
    const ALL: &'static [Self] = &[AuthForm::Login, AuthForm::Register, AuthForm::AdminLogin];

    fn name(self) -> &'static str {
        match self {
            AuthForm::Login => "login",
            AuthForm::Register => "register",
            AuthForm::AdminLogin => "admin-login",
        }
    }

    fn dom_id(self) -> String {
        format!("{}-form-container", self.name())
    }

    fn refresh(self) -> RefreshAction {
        RefreshAction::None
    }
}

/// Visibility of one section family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionView<S: Section> {
    current: S,
}

impl<S: Section> SectionView<S> {
    pub fn new(initial: S) -> Self {
        Self { current: initial }
    }

    /// Makes `section` the only visible one and returns its refresh action
    pub fn show(&mut self, section: S) -> RefreshAction {
        self.current = section;
        section.refresh()
    }

    pub fn visible(&self) -> S {
        self.current
    }

    pub fn is_visible(&self, section: S) -> bool {
        self.current == section
    }

    /// `(section, visible)` for every member of the family; nav controls
    /// are active exactly where the section is visible
    pub fn projection(&self) -> Vec<(S, bool)> {
        S::ALL.iter().map(|s| (*s, *s == self.current)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_single_visible<S: Section>(view: &SectionView<S>, expected: S) {
        let visible: Vec<S> = view.projection().into_iter().filter(|(_, v)| *v).map(|(s, _)| s).collect();
        assert_eq!(visible, vec![expected]);
    }

    #[test]
    fn show_leaves_exactly_one_tab_visible() {
        let mut view = SectionView::new(Tab::Auth);
        for tab in Tab::ALL {
            view.show(*tab);
            assert_single_visible(&view, *tab);
        }
    }

    #[test]
    fn show_returns_the_section_refresh_action() {
        let mut tabs = SectionView::new(Tab::Auth);
        assert_eq!(tabs.show(Tab::Events), RefreshAction::LoadEvents);
        assert_eq!(tabs.show(Tab::MyRegistrations), RefreshAction::LoadMyRegistrations);
        assert_eq!(tabs.show(Tab::Auth), RefreshAction::None);

        let mut admin = SectionView::new(AdminSection::QrScanner);
        assert_eq!(admin.show(AdminSection::AllRegistrations), RefreshAction::LoadAllRegistrations);
        assert_eq!(admin.show(AdminSection::QrScanner), RefreshAction::InitializeScanner);
        assert_single_visible(&admin, AdminSection::QrScanner);
    }

    #[test]
    fn admin_sections_use_suffixed_dom_ids() {
        assert_eq!(AdminSection::CreateEvent.dom_id(), "create-event-section");
        assert_eq!(Tab::MyRegistrations.dom_id(), "my-registrations");
        assert_eq!(AdminSection::parse("all-registrations"), Some(AdminSection::AllRegistrations));
        assert_eq!(Tab::parse("settings"), None);
    }

    #[test]
    fn nav_visibility_follows_role() {
        let visible = |role| Tab::ALL.iter().copied().filter(|t| t.visible_for(role)).collect::<Vec<_>>();
        assert_eq!(visible(Role::Unauthenticated), vec![Tab::Auth]);
        assert_eq!(visible(Role::User), vec![Tab::Events, Tab::MyRegistrations]);
        assert_eq!(visible(Role::Admin), vec![Tab::Events, Tab::MyRegistrations, Tab::Admin]);
    }
}
