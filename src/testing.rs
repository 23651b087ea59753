// In-memory fakes for the service and capture traits

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::capture::{Camera, CameraConstraints, CameraStream, Frame, QrDecoder};
use crate::error::{ApiError, CameraError, StorageError};
use crate::models::{
    Credentials, Event, NewEvent, NewUser, Registration, TokenResponse, User, VerificationReceipt,
};
use crate::services::{EventApi, TokenStore};

pub fn rejected(status: u16, detail: &str) -> ApiError {
    ApiError::Rejected { status, detail: detail.to_string() }
}

pub fn sample_event(id: i64, title: &str) -> Event {
    Event {
        id,
        title: title.to_string(),
        description: None,
        date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(10, 0, 0).unwrap(),
        location: Some("Main Hall".into()),
        max_attendees: Some(100),
        created_at: None,
    }
}

pub fn sample_registration(id: i64, event_id: i64) -> Registration {
    Registration {
        id,
        event_id,
        user_id: 1,
        registration_date: NaiveDate::from_ymd_opt(2030, 4, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
        qr_code_data: format!("qr-{}", id),
        is_verified: false,
        verification_date: None,
        qr_code_image: None,
        event: None,
        user: None,
    }
}

pub fn sample_receipt() -> VerificationReceipt {
    VerificationReceipt {
        message: Some("QR code verified successfully".into()),
        user_name: "Ana Lopez".into(),
        event_title: "Tech Conference".into(),
        verified_at: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(10, 5, 0),
    }
}

/// Scripted `EventApi`: each field answers its endpoint, counters record calls
pub struct FakeApi {
    pub login: RefCell<Result<TokenResponse, ApiError>>,
    pub register_user: RefCell<Result<User, ApiError>>,
    pub my_registrations: RefCell<Result<Vec<Registration>, ApiError>>,
    pub all_registrations: RefCell<Result<Vec<Registration>, ApiError>>,
    pub events: RefCell<Result<Vec<Event>, ApiError>>,
    pub create_event: RefCell<Result<Event, ApiError>>,
    pub register_for_event: RefCell<Result<Registration, ApiError>>,
    pub verify: RefCell<Result<VerificationReceipt, ApiError>>,

    pub login_calls: Cell<u32>,
    pub register_user_calls: Cell<u32>,
    pub my_registrations_calls: Cell<u32>,
    pub all_registrations_calls: Cell<u32>,
    pub events_calls: Cell<u32>,
    pub create_event_calls: Cell<u32>,
    pub register_for_event_calls: Cell<u32>,
    pub verified_payloads: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_token(token: &str) -> Self {
        let api = Self::default();
        *api.login.borrow_mut() = Ok(TokenResponse { access_token: token.to_string(), token_type: "bearer".into() });
        api
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            login: RefCell::new(Err(rejected(401, "Incorrect email or password"))),
            register_user: RefCell::new(Err(ApiError::Network("unscripted".into()))),
            my_registrations: RefCell::new(Ok(Vec::new())),
            all_registrations: RefCell::new(Err(rejected(403, "Not enough permissions"))),
            events: RefCell::new(Ok(Vec::new())),
            create_event: RefCell::new(Err(ApiError::Network("unscripted".into()))),
            register_for_event: RefCell::new(Err(ApiError::Network("unscripted".into()))),
            verify: RefCell::new(Err(ApiError::Network("unscripted".into()))),
            login_calls: Cell::new(0),
            register_user_calls: Cell::new(0),
            my_registrations_calls: Cell::new(0),
            all_registrations_calls: Cell::new(0),
            events_calls: Cell::new(0),
            create_event_calls: Cell::new(0),
            register_for_event_calls: Cell::new(0),
            verified_payloads: RefCell::new(Vec::new()),
        }
    }
}

fn bump(counter: &Cell<u32>) {
    counter.set(counter.get() + 1);
}

#[async_trait(?Send)]
impl EventApi for FakeApi {
    async fn login(&self, _credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        bump(&self.login_calls);
        self.login.borrow().clone()
    }

    async fn register_user(&self, _user: &NewUser) -> Result<User, ApiError> {
        bump(&self.register_user_calls);
        self.register_user.borrow().clone()
    }

    async fn my_registrations(&self, _token: &str) -> Result<Vec<Registration>, ApiError> {
        bump(&self.my_registrations_calls);
        self.my_registrations.borrow().clone()
    }

    async fn all_registrations(&self, _token: &str) -> Result<Vec<Registration>, ApiError> {
        bump(&self.all_registrations_calls);
        self.all_registrations.borrow().clone()
    }

    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        bump(&self.events_calls);
        self.events.borrow().clone()
    }

    async fn create_event(&self, _token: &str, _event: &NewEvent) -> Result<Event, ApiError> {
        bump(&self.create_event_calls);
        self.create_event.borrow().clone()
    }

    async fn register_for_event(&self, _token: &str, _event_id: i64) -> Result<Registration, ApiError> {
        bump(&self.register_for_event_calls);
        self.register_for_event.borrow().clone()
    }

    async fn verify_qr(&self, _token: &str, payload: &str) -> Result<VerificationReceipt, ApiError> {
        self.verified_payloads.borrow_mut().push(payload.to_string());
        self.verify.borrow().clone()
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    pub token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn holding(token: &str) -> Self {
        Self { token: RefCell::new(Some(token.to_string())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// Stream that counts how often its tracks were stopped
pub struct FakeStream {
    pub stops: Rc<Cell<u32>>,
}

impl CameraStream for FakeStream {
    fn stop_tracks(&self) {
        self.stops.set(self.stops.get() + 1);
    }
}

/// Camera answering from a queue of scripted outcomes; grants by default
#[derive(Default)]
pub struct FakeCamera {
    pub stops: Rc<Cell<u32>>,
    pub opened: Cell<u32>,
    pub outcomes: RefCell<VecDeque<Result<(), CameraError>>>,
}

impl FakeCamera {
    pub fn denying(err: CameraError) -> Self {
        let camera = Self::default();
        camera.outcomes.borrow_mut().push_back(Err(err));
        camera
    }

    pub fn stream(&self) -> Box<dyn CameraStream> {
        Box::new(FakeStream { stops: self.stops.clone() })
    }

    pub fn released(&self) -> u32 {
        self.stops.get()
    }
}

#[async_trait(?Send)]
impl Camera for FakeCamera {
    async fn open(&self, _constraints: &CameraConstraints) -> Result<Box<dyn CameraStream>, CameraError> {
        let outcome = self.outcomes.borrow_mut().pop_front().unwrap_or(Ok(()));
        outcome.map(|()| {
            bump(&self.opened);
            self.stream()
        })
    }
}

/// Decoder that reads the first pixel: 0 means no code
pub struct FakeDecoder;

impl QrDecoder for FakeDecoder {
    fn decode(&self, frame: &Frame<'_>) -> Option<String> {
        match frame.data.first() {
            Some(0) | None => None,
            Some(n) => Some(format!("payload-{}", n)),
        }
    }
}
