use crate::domain::model::Service;
use crate::ui::page::SelectOption;

pub const SERVICE_PLACEHOLDER: &str = "Chọn dịch vụ";
pub const TIME_PLACEHOLDER: &str = "Chọn giờ";
pub const BOOK_BUTTON_LABEL: &str = "Đặt Lịch";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// vi-VN currency format for VND: whole dong, `.` as group separator,
/// `₫` after a no-break space.
pub fn format_price(price: f64) -> String {
    let rounded = price.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}\u{a0}₫", grouped)
    } else {
        format!("{}\u{a0}₫", grouped)
    }
}

pub fn service_card(service: &Service) -> String {
    format!(
        r#"<div class="col-md-3 d-flex align-self-stretch ftco-animate">
    <div class="media block-6 services d-block text-center">
        <div class="icon d-flex justify-content-center align-items-center">
            <span class="flaticon-scissors"></span>
        </div>
        <div class="media-body p-2 mt-3">
            <h3 class="heading">{name}</h3>
            <p>{description}</p>
            <p class="price"><span>{price}</span></p>
            <p class="duration">Thời gian: {duration} phút</p>
            <button class="btn btn-primary" data-book-service="{id}">{label}</button>
        </div>
    </div>
</div>
"#,
        name = escape_html(&service.name),
        description = escape_html(&service.description),
        price = escape_html(&format_price(service.price)),
        duration = service.duration,
        id = service.id,
        label = BOOK_BUTTON_LABEL,
    )
}

/// Markup for the services container, one card per record in order.
pub fn services_html(services: &[Service]) -> String {
    services.iter().map(service_card).collect()
}

pub fn service_options(services: &[Service]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", SERVICE_PLACEHOLDER))
        .chain(services.iter().map(|s| {
            SelectOption::new(
                s.id.to_string(),
                format!("{} - {}", s.name, format_price(s.price)),
            )
        }))
        .collect()
}

pub fn time_options(times: &[String]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", TIME_PLACEHOLDER))
        .chain(times.iter().map(|t| SelectOption::new(t.as_str(), t.as_str())))
        .collect()
}

/// Renders a select's options as `<option>` markup.
pub fn options_html(options: &[SelectOption]) -> String {
    options
        .iter()
        .map(|o| {
            format!(
                "<option value=\"{}\">{}</option>\n",
                escape_html(&o.value),
                escape_html(&o.label)
            )
        })
        .collect()
}
