// ============================================================================
// STATE MODULE - Rc<RefCell> store + change notifications
// ============================================================================

pub mod session_state;
pub mod view_state;
pub mod scanner_state;
pub mod app_state;

pub use session_state::*;
pub use view_state::*;
pub use scanner_state::*;
pub use app_state::*;
