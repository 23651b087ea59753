// ============================================================================
// SESSION STATE - Token and role of the signed-in user
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Role;

#[derive(Clone, Default)]
pub struct SessionState {
    pub token: Rc<RefCell<Option<String>>>,
    pub role: Rc<RefCell<Role>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an authenticated session
    pub fn establish(&self, token: String, role: Role) {
        *self.token.borrow_mut() = Some(token);
        *self.role.borrow_mut() = role;
    }

    pub fn clear(&self) {
        *self.token.borrow_mut() = None;
        *self.role.borrow_mut() = Role::Unauthenticated;
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn role(&self) -> Role {
        *self.role.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some() && self.role().is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_session() {
        let session = SessionState::new();
        let view = session.clone();
        session.establish("tok".into(), Role::Admin);
        assert_eq!(view.role(), Role::Admin);
        assert_eq!(view.token().as_deref(), Some("tok"));

        view.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), Role::Unauthenticated);
    }
}
