use crate::core::forms::ERROR_PREFIX;
use crate::core::{SalonApi, SelectionStore};
use crate::domain::model::Service;
use crate::ui::notification::NotificationCenter;
use crate::ui::page::{
    SharedPage, DATE_INPUT_ID, SERVICES_CONTAINER_SELECTOR, SERVICE_SELECT_ID, TIME_SELECT_ID,
};
use crate::ui::render;
use crate::utils::error::{Result, StudioError};
use crate::utils::validation::parse_date;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const SELECTED_SERVICE_KEY: &str = "selectedServiceId";

/// Monotonic ticket source; only the latest ticket may apply its result.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.load(Ordering::SeqCst) == ticket
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Number of records (or slots) rendered.
    Rendered(usize),
    /// The target element is missing or there is nothing to query.
    Skipped,
    /// A newer request superseded this one; its result was dropped.
    Stale,
}

/// Fetches services and time slots and renders them into the page.
///
/// Failures are logged, shown as an error banner and returned; the page is
/// left as it was.
#[derive(Clone)]
pub struct ServiceLoader {
    api: Arc<dyn SalonApi>,
    store: Arc<dyn SelectionStore>,
    page: SharedPage,
    notifications: NotificationCenter,
    times_generation: Arc<RequestGeneration>,
}

impl ServiceLoader {
    pub fn new(
        api: Arc<dyn SalonApi>,
        store: Arc<dyn SelectionStore>,
        page: SharedPage,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            api,
            store,
            page,
            notifications,
            times_generation: Arc::new(RequestGeneration::new()),
        }
    }

    fn report(&self, context: &str, error: StudioError) -> StudioError {
        tracing::error!("Error loading {}: {}", context, error);
        self.notifications
            .error(format!("{}{}", ERROR_PREFIX, error.user_message()));
        error
    }

    /// Renders one card per service into the services container.
    pub async fn load_services(&self) -> Result<LoadOutcome> {
        if !self.page.lock().await.has_services_container() {
            return Ok(LoadOutcome::Skipped);
        }

        let services = self
            .api
            .list_services()
            .await
            .map_err(|e| self.report("services", e))?;

        let html = render::services_html(&services);
        let mut page = self.page.lock().await;
        if !page.set_services_html(html) {
            return Ok(LoadOutcome::Skipped);
        }
        tracing::info!(
            "Rendered {} services into {}",
            services.len(),
            SERVICES_CONTAINER_SELECTOR
        );
        Ok(LoadOutcome::Rendered(services.len()))
    }

    /// Fills `#service-select` and applies the stored selection once.
    pub async fn load_services_into_select(&self) -> Result<LoadOutcome> {
        if self.page.lock().await.select(SERVICE_SELECT_ID).is_none() {
            return Ok(LoadOutcome::Skipped);
        }

        let services = self
            .api
            .list_services()
            .await
            .map_err(|e| self.report("services", e))?;

        let selected = self.take_selected_service();

        let mut page = self.page.lock().await;
        let Some(select) = page.select_mut(SERVICE_SELECT_ID) else {
            return Ok(LoadOutcome::Skipped);
        };
        select.replace_options(render::service_options(&services));

        if let Some(id) = selected {
            if !select.set_value(&id) {
                tracing::warn!("Stored service {} is not offered any more", id);
            }
        }
        Ok(LoadOutcome::Rendered(services.len()))
    }

    // Read once, cleared immediately. Only a pre-selection hint, so storage
    // problems are logged and the key is dropped instead of failing the load.
    fn take_selected_service(&self) -> Option<String> {
        let value = match self.store.get_item(SELECTED_SERVICE_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored selection: {}", e);
                None
            }
        };
        // 讀取後立即清除
        if let Err(e) = self.store.remove_item(SELECTED_SERVICE_KEY) {
            tracing::warn!("Could not clear stored selection: {}", e);
        }
        value.filter(|v| !v.is_empty())
    }

    /// Repopulates `#time-select` for the date in `#date-input`.
    ///
    /// Every call supersedes the ones still in flight, including calls that
    /// end up skipped or rejected, so an older reply never lands on a date
    /// that is no longer selected.
    pub async fn load_available_times(&self) -> Result<LoadOutcome> {
        let ticket = self.times_generation.next();

        let date_value = {
            let page = self.page.lock().await;
            if page.select(TIME_SELECT_ID).is_none() {
                return Ok(LoadOutcome::Skipped);
            }
            match page.input_value(DATE_INPUT_ID) {
                Some(v) if !v.trim().is_empty() => v.to_string(),
                _ => return Ok(LoadOutcome::Skipped),
            }
        };

        let date = parse_date("date", &date_value).map_err(|e| self.report("available times", e))?;

        // 只套用最新一次查詢的結果
        let result = self.api.available_times(date).await;
        if !self.times_generation.is_current(ticket) {
            tracing::warn!("Dropping stale available times for {}", date);
            return Ok(LoadOutcome::Stale);
        }
        let result = result.map_err(|e| self.report("available times", e))?;

        let mut page = self.page.lock().await;
        let Some(select) = page.select_mut(TIME_SELECT_ID) else {
            return Ok(LoadOutcome::Skipped);
        };
        select.replace_options(render::time_options(&result.available_times));
        tracing::debug!("{} slots available on {}", result.available_times.len(), date);
        Ok(LoadOutcome::Rendered(result.available_times.len()))
    }

    /// Fetches a single service; used by the detail view of the CLI.
    pub async fn load_service(&self, service_id: i64) -> Result<Service> {
        self.api
            .get_service(service_id)
            .await
            .map_err(|e| self.report("service", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_only_latest_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
