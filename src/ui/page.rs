//! Headless model of the page markup the client code depends on.
//!
//! Only the elements the booking site exposes are modelled: the services
//! container, the booking and contact forms with their controls, the head
//! stylesheets and the current location.

use std::sync::Arc;
use tokio::sync::Mutex;

pub const APPOINTMENT_FORM_ID: &str = "appointment-form";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const SERVICE_SELECT_ID: &str = "service-select";
pub const DATE_INPUT_ID: &str = "date-input";
pub const TIME_SELECT_ID: &str = "time-select";
pub const SERVICES_CONTAINER_SELECTOR: &str = ".ftco-services .container .row";

pub const BOOKING_PAGE_LOCATION: &str = "contact.html#booking";

pub type SharedPage = Arc<Mutex<Page>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    options: Vec<SelectOption>,
    value: String,
}

impl Select {
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces every option; the first one becomes selected.
    pub fn replace_options(&mut self, options: Vec<SelectOption>) {
        self.value = options.first().map(|o| o.value.clone()).unwrap_or_default();
        self.options = options;
    }

    /// Selects the option with `value`. Like the DOM, an unknown value
    /// leaves nothing selected and returns false.
    pub fn set_value(&mut self, value: &str) -> bool {
        if self.options.iter().any(|o| o.value == value) {
            self.value = value.to_string();
            true
        } else {
            self.value.clear();
            false
        }
    }

    fn reset(&mut self) {
        self.value = self
            .options
            .first()
            .map(|o| o.value.clone())
            .unwrap_or_default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Input(String),
    Select(Select),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub id: Option<String>,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub id: String,
    fields: Vec<Field>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_input(mut self, name: &str, id: Option<&str>) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            id: id.map(str::to_string),
            control: Control::Input(String::new()),
        });
        self
    }

    pub fn with_select(mut self, name: &str, id: Option<&str>) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            id: id.map(str::to_string),
            control: Control::Select(Select::default()),
        });
        self
    }

    /// `#appointment-form` as it appears on the booking page.
    pub fn booking() -> Self {
        Self::new(APPOINTMENT_FORM_ID)
            .with_input("name", None)
            .with_input("phone", None)
            .with_input("email", None)
            .with_select("service", Some(SERVICE_SELECT_ID))
            .with_input("date", Some(DATE_INPUT_ID))
            .with_select("time", Some(TIME_SELECT_ID))
            .with_input("message", None)
    }

    /// `#contact-form`.
    pub fn contact() -> Self {
        Self::new(CONTACT_FORM_ID)
            .with_input("name", None)
            .with_input("email", None)
            .with_input("subject", None)
            .with_input("message", None)
    }

    /// Current value of the field named `name`, as submitted with the form.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| match &f.control {
                Control::Input(v) => v.as_str(),
                Control::Select(s) => s.value(),
            })
    }

    /// Sets an input's text or picks a select option. Returns false when
    /// the field does not exist or the option is unknown.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(Field {
                control: Control::Input(v),
                ..
            }) => {
                *v = value.to_string();
                true
            }
            Some(Field {
                control: Control::Select(s),
                ..
            }) => s.set_value(value),
            None => false,
        }
    }

    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), self.value(&f.name).unwrap_or_default().to_string()))
            .collect()
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            match &mut field.control {
                Control::Input(v) => v.clear(),
                Control::Select(s) => s.reset(),
            }
        }
    }

    fn control_by_id(&self, id: &str) -> Option<&Control> {
        self.fields
            .iter()
            .find(|f| f.id.as_deref() == Some(id))
            .map(|f| &f.control)
    }

    fn control_by_id_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.fields
            .iter_mut()
            .find(|f| f.id.as_deref() == Some(id))
            .map(|f| &mut f.control)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    services_container: Option<String>,
    forms: Vec<Form>,
    styles: Vec<String>,
    location: String,
}

impl Page {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }

    /// `index.html`: the services section only.
    pub fn home() -> Self {
        Self::new("index.html").with_services_container()
    }

    /// `contact.html`: booking and contact forms.
    pub fn contact() -> Self {
        Self::new("contact.html")
            .with_form(Form::booking())
            .with_form(Form::contact())
    }

    pub fn with_services_container(mut self) -> Self {
        self.services_container = Some(String::new());
        self
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    pub fn into_shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn has_services_container(&self) -> bool {
        self.services_container.is_some()
    }

    pub fn services_html(&self) -> Option<&str> {
        self.services_container.as_deref()
    }

    /// Replaces the container's content. No-op when the container is absent.
    pub fn set_services_html(&mut self, html: String) -> bool {
        match self.services_container.as_mut() {
            Some(inner) => {
                *inner = html;
                true
            }
            None => false,
        }
    }

    pub fn form(&self, id: &str) -> Option<&Form> {
        self.forms.iter().find(|f| f.id == id)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        self.forms.iter_mut().find(|f| f.id == id)
    }

    pub fn select(&self, id: &str) -> Option<&Select> {
        self.forms.iter().find_map(|f| match f.control_by_id(id) {
            Some(Control::Select(s)) => Some(s),
            _ => None,
        })
    }

    pub fn select_mut(&mut self, id: &str) -> Option<&mut Select> {
        self.forms.iter_mut().find_map(|f| match f.control_by_id_mut(id) {
            Some(Control::Select(s)) => Some(s),
            _ => None,
        })
    }

    pub fn input_value(&self, id: &str) -> Option<&str> {
        self.forms.iter().find_map(|f| match f.control_by_id(id) {
            Some(Control::Input(v)) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn set_input_value(&mut self, id: &str, value: &str) -> bool {
        for form in &mut self.forms {
            if let Some(Control::Input(v)) = form.control_by_id_mut(id) {
                *v = value.to_string();
                return true;
            }
        }
        false
    }

    /// Adds a stylesheet unless an identical one is already loaded.
    pub fn add_style(&mut self, css: &str) -> bool {
        if self.styles.iter().any(|s| s == css) {
            return false;
        }
        self.styles.push(css.to_string());
        true
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn navigate(&mut self, location: &str) {
        self.location = location.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_value_and_reset() {
        let mut form = Form::booking();
        assert!(form.set_value("name", "An"));
        assert!(form.set_value("date", "2024-05-01"));
        assert!(!form.set_value("nickname", "x"));

        assert_eq!(form.value("name"), Some("An"));
        assert_eq!(form.value("service"), Some(""));

        form.reset();
        assert_eq!(form.value("name"), Some(""));
        assert_eq!(form.value("date"), Some(""));
    }

    #[test]
    fn test_select_unknown_value_clears_selection() {
        let mut select = Select::default();
        select.replace_options(vec![
            SelectOption::new("", "Chọn dịch vụ"),
            SelectOption::new("1", "Cắt tóc"),
        ]);
        assert!(select.set_value("1"));
        assert_eq!(select.value(), "1");

        assert!(!select.set_value("42"));
        assert_eq!(select.value(), "");
    }

    #[test]
    fn test_reset_selects_first_option() {
        let mut page = Page::contact();
        page.select_mut(SERVICE_SELECT_ID).unwrap().replace_options(vec![
            SelectOption::new("", "Chọn dịch vụ"),
            SelectOption::new("3", "Gội"),
        ]);
        let form = page.form_mut(APPOINTMENT_FORM_ID).unwrap();
        assert!(form.set_value("service", "3"));
        form.reset();
        assert_eq!(page.select(SERVICE_SELECT_ID).unwrap().value(), "");
    }

    #[test]
    fn test_lookup_by_element_id() {
        let mut page = Page::contact();
        assert!(page.set_input_value(DATE_INPUT_ID, "2024-05-01"));
        assert_eq!(page.input_value(DATE_INPUT_ID), Some("2024-05-01"));
        assert_eq!(
            page.form(APPOINTMENT_FORM_ID).unwrap().value("date"),
            Some("2024-05-01")
        );
        assert!(page.select(TIME_SELECT_ID).is_some());
        assert!(page.input_value(TIME_SELECT_ID).is_none());
        assert!(!page.has_services_container());
    }

    #[test]
    fn test_add_style_once() {
        let mut page = Page::home();
        assert!(page.add_style("a {}"));
        assert!(!page.add_style("a {}"));
        assert_eq!(page.styles().len(), 1);
    }
}
