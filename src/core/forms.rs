use crate::core::{BookingRequest, ContactRequest, MessageResponse, SalonApi};
use crate::ui::notification::NotificationCenter;
use crate::ui::page::{Form, SharedPage, APPOINTMENT_FORM_ID, CONTACT_FORM_ID};
use crate::utils::error::{Result, StudioError};
use crate::utils::validation::{parse_date, parse_service_id, validate_time};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const ERROR_PREFIX: &str = "Có lỗi xảy ra: ";

/// How one page form turns into an API request.
#[async_trait]
pub trait FormSubmission: Send + Sync + 'static {
    type Request: Send + Sync;

    fn form_id() -> &'static str;

    /// Reads the declared fields by name and assembles the request.
    fn build(form: &Form) -> Result<Self::Request>;

    async fn send(api: &dyn SalonApi, request: &Self::Request) -> Result<MessageResponse>;
}

fn field(form: &Form, name: &str) -> String {
    form.value(name).unwrap_or_default().to_string()
}

pub struct BookingSubmission;

#[async_trait]
impl FormSubmission for BookingSubmission {
    type Request = BookingRequest;

    fn form_id() -> &'static str {
        APPOINTMENT_FORM_ID
    }

    fn build(form: &Form) -> Result<BookingRequest> {
        let service_id = parse_service_id("service", &field(form, "service"))?;
        let date = field(form, "date");
        parse_date("date", &date)?;
        let time = field(form, "time");
        validate_time("time", &time)?;

        Ok(BookingRequest {
            name: field(form, "name"),
            phone: field(form, "phone"),
            email: field(form, "email"),
            service_id,
            date,
            time,
            message: form.value("message").map(str::to_string),
        })
    }

    async fn send(api: &dyn SalonApi, request: &BookingRequest) -> Result<MessageResponse> {
        api.create_booking(request).await
    }
}

pub struct ContactSubmission;

#[async_trait]
impl FormSubmission for ContactSubmission {
    type Request = ContactRequest;

    fn form_id() -> &'static str {
        CONTACT_FORM_ID
    }

    fn build(form: &Form) -> Result<ContactRequest> {
        Ok(ContactRequest {
            name: field(form, "name"),
            email: field(form, "email"),
            subject: field(form, "subject"),
            message: field(form, "message"),
        })
    }

    async fn send(api: &dyn SalonApi, request: &ContactRequest) -> Result<MessageResponse> {
        api.send_contact(request).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted; carries its message.
    Sent(String),
    /// Shown to the user as an error banner; fields are untouched.
    Failed(String),
    /// Another submission of the same form is still in flight.
    Ignored,
    /// The form is not on this page.
    Skipped,
}

/// Submit workflow for one form: idle → submitting → idle.
pub struct FormHandler<S: FormSubmission> {
    api: Arc<dyn SalonApi>,
    page: SharedPage,
    notifications: NotificationCenter,
    submitting: Arc<AtomicBool>,
    _submission: PhantomData<S>,
}

impl<S: FormSubmission> Clone for FormHandler<S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            page: self.page.clone(),
            notifications: self.notifications.clone(),
            submitting: self.submitting.clone(),
            _submission: PhantomData,
        }
    }
}

struct SubmittingGuard(Arc<AtomicBool>);

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<S: FormSubmission> FormHandler<S> {
    pub fn new(api: Arc<dyn SalonApi>, page: SharedPage, notifications: NotificationCenter) -> Self {
        Self {
            api,
            page,
            notifications,
            submitting: Arc::new(AtomicBool::new(false)),
            _submission: PhantomData,
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("#{} is already submitting, ignoring", S::form_id());
            return SubmitOutcome::Ignored;
        }
        let _guard = SubmittingGuard(self.submitting.clone());

        // 讀取表單欄位，送出前不持有頁面鎖
        let request = {
            let page = self.page.lock().await;
            let Some(form) = page.form(S::form_id()) else {
                return SubmitOutcome::Skipped;
            };
            S::build(form)
        };

        let result = match request {
            Ok(request) => S::send(self.api.as_ref(), &request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                // 成功後清空表單
                tracing::info!("#{} submitted: {}", S::form_id(), response.message);
                self.notifications.success(response.message.clone());
                if let Some(form) = self.page.lock().await.form_mut(S::form_id()) {
                    form.reset();
                }
                SubmitOutcome::Sent(response.message)
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: StudioError) -> SubmitOutcome {
        tracing::error!("#{} submission failed: {}", S::form_id(), error);
        let message = format!("{}{}", ERROR_PREFIX, error.user_message());
        self.notifications.error(message.clone());
        SubmitOutcome::Failed(message)
    }
}

pub type BookingFormHandler = FormHandler<BookingSubmission>;
pub type ContactFormHandler = FormHandler<ContactSubmission>;
