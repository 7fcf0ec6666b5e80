//! Contact page store: a single record rather than a collection.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::state::{Busy, LoadState, LoadingGuard};
use crate::api::{ApiClient, Body, FilePart, Form, Method, endpoints};
use crate::error::{AppError, Result};
use crate::models::{CONTACT_LOCALES, ContactInfo, LocalizedText};

/// State of the contact store.
#[derive(Debug, Clone, Default)]
pub struct ContactState {
    pub info: Option<ContactInfo>,
    pub loading: bool,
    pub error: Option<String>,
    pub load_state: LoadState,
    pub(crate) in_flight: usize,
}

impl Busy for ContactState {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// Editable contact fields plus new images to upload.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub phone: String,
    pub email: String,
    pub address: LocalizedText,
    pub images: Vec<FilePart>,
}

impl ContactForm {
    fn validate(&self) -> Result<()> {
        let email = self.email.trim();
        if !email.is_empty() {
            let valid = email
                .split_once('@')
                .is_some_and(|(user, host)| !user.is_empty() && host.contains('.'));
            if !valid {
                return Err(AppError::validation(format!("invalid email address: {email}")));
            }
        }
        Ok(())
    }

    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("phone", self.phone.trim())
            .text("email", self.email.trim());
        for key in CONTACT_LOCALES {
            form = form.text(
                format!("address_{key}"),
                self.address.raw(key).unwrap_or_default(),
            );
        }
        self.images
            .into_iter()
            .fold(form, |form, image| form.file("images", image))
    }
}

impl From<&ContactInfo> for ContactForm {
    fn from(info: &ContactInfo) -> Self {
        Self {
            phone: info.phone.clone(),
            email: info.email.clone(),
            address: info.address.clone(),
            images: Vec::new(),
        }
    }
}

pub struct ContactStore {
    client: Arc<ApiClient>,
    state: RwLock<ContactState>,
}

impl ContactStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: RwLock::new(ContactState::default()),
        }
    }

    pub fn snapshot(&self) -> ContactState {
        self.read().clone()
    }

    pub fn info(&self) -> Option<ContactInfo> {
        self.read().info.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }

    pub async fn load(&self) -> Result<ContactInfo> {
        let _loading = LoadingGuard::begin(&self.state);
        let result = self.client.get::<ContactInfo>(endpoints::CONTACT).await;
        self.apply("load", result)
    }

    /// PUT the whole contact record; new images are appended server-side.
    pub async fn update(&self, form: ContactForm) -> Result<ContactInfo> {
        if let Err(e) = form.validate() {
            return Err(self.fail("update", e));
        }
        let _loading = LoadingGuard::begin(&self.state);
        let body = Body::Multipart(form.into_form());
        let result = self
            .client
            .request::<ContactInfo>(Method::PUT, endpoints::CONTACT, body)
            .await;
        self.apply("update", result)
    }

    /// Remove one stored image; the backend answers with the updated record.
    pub async fn delete_image(&self, name: &str) -> Result<ContactInfo> {
        if name.trim().is_empty() {
            return Err(self.fail("update", AppError::validation("image name is empty")));
        }
        let _loading = LoadingGuard::begin(&self.state);
        let result = self
            .client
            .request::<ContactInfo>(Method::DELETE, &endpoints::contact_image(name), Body::Empty)
            .await;
        self.apply("update", result)
    }

    fn apply(&self, action: &str, result: Result<ContactInfo>) -> Result<ContactInfo> {
        match result {
            Ok(info) => {
                let mut state = self.write();
                state.info = Some(info.clone());
                state.load_state = LoadState::Loaded;
                Ok(info)
            }
            Err(e) => Err(self.fail(action, e)),
        }
    }

    fn fail(&self, action: &str, err: AppError) -> AppError {
        let message = format!("Failed to {action} contact info: {err}");
        log::error!("{}", message);
        self.write().error = Some(message);
        err
    }

    fn read(&self) -> RwLockReadGuard<'_, ContactState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ContactState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
