use crate::config::cli::LocalStorage;
use crate::core::client::HairStudioClient;
use crate::core::forms::{BookingFormHandler, ContactFormHandler, SubmitOutcome};
use crate::core::loaders::{LoadOutcome, ServiceLoader, SELECTED_SERVICE_KEY};
use crate::core::{ConfigProvider, SalonApi, SelectionStore};
use crate::ui::notification::{NotificationCenter, ALERT_STYLESHEET};
use crate::ui::page::{Page, SharedPage, APPOINTMENT_FORM_ID, BOOKING_PAGE_LOCATION};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Wires the API client, page, storage and banner together for one page.
pub struct App {
    page: SharedPage,
    store: Arc<dyn SelectionStore>,
    notifications: NotificationCenter,
    loader: ServiceLoader,
    booking: BookingFormHandler,
    contact: ContactFormHandler,
}

impl App {
    /// Loads the alert stylesheet into the page head and builds the
    /// components around an explicitly constructed client.
    pub fn setup(
        api: Arc<dyn SalonApi>,
        store: Arc<dyn SelectionStore>,
        mut page: Page,
        dismiss_after: Duration,
    ) -> Self {
        page.add_style(ALERT_STYLESHEET);
        let page = page.into_shared();
        let notifications = NotificationCenter::new(dismiss_after);

        Self {
            loader: ServiceLoader::new(
                api.clone(),
                store.clone(),
                page.clone(),
                notifications.clone(),
            ),
            booking: BookingFormHandler::new(api.clone(), page.clone(), notifications.clone()),
            contact: ContactFormHandler::new(api, page.clone(), notifications.clone()),
            page,
            store,
            notifications,
        }
    }

    /// 從設定建立 HTTP client 與本地存儲
    pub fn from_config<C: ConfigProvider>(config: &C, page: Page) -> Result<Self> {
        let client = HairStudioClient::from_config(config)?;
        tracing::info!("Using API at {}", client.base_url());
        let store = LocalStorage::new(config.storage_path().to_string());
        Ok(Self::setup(
            Arc::new(client),
            Arc::new(store),
            page,
            Duration::from_secs(config.dismiss_after_seconds()),
        ))
    }

    /// Page-load dispatch: runs the loaders for whichever elements exist.
    /// The two service loaders are independent and may finish in any order.
    pub async fn on_page_load(&self) -> (Result<LoadOutcome>, Result<LoadOutcome>) {
        let (has_container, has_booking_form) = {
            let page = self.page.lock().await;
            (
                page.has_services_container(),
                page.form(APPOINTMENT_FORM_ID).is_some(),
            )
        };

        let cards = async {
            if has_container {
                self.loader.load_services().await
            } else {
                Ok(LoadOutcome::Skipped)
            }
        };
        let select = async {
            if has_booking_form {
                self.loader.load_services_into_select().await
            } else {
                Ok(LoadOutcome::Skipped)
            }
        };
        tokio::join!(cards, select)
    }

    pub async fn on_date_change(&self) -> Result<LoadOutcome> {
        self.loader.load_available_times().await
    }

    pub async fn submit_booking(&self) -> SubmitOutcome {
        self.booking.submit().await
    }

    pub async fn submit_contact(&self) -> SubmitOutcome {
        self.contact.submit().await
    }

    /// Click on a service card: remember the choice and go to the booking form.
    pub async fn book_service(&self, service_id: i64) -> Result<()> {
        self.store
            .set_item(SELECTED_SERVICE_KEY, &service_id.to_string())?;
        self.page.lock().await.navigate(BOOKING_PAGE_LOCATION);
        tracing::info!("Selected service {} for booking", service_id);
        Ok(())
    }

    pub fn page(&self) -> SharedPage {
        self.page.clone()
    }

    pub fn loader(&self) -> &ServiceLoader {
        &self.loader
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }
}
