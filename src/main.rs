use clap::Parser;
use hair_studio::core::forms::SubmitOutcome;
use hair_studio::core::loaders::LoadOutcome;
use hair_studio::ui::notification::AlertKind;
use hair_studio::ui::page::{
    Page, APPOINTMENT_FORM_ID, CONTACT_FORM_ID, DATE_INPUT_ID, TIME_SELECT_ID,
};
use hair_studio::ui::render::{format_price, options_html};
use hair_studio::utils::{logger, validation::Validate};
use hair_studio::{App, CliConfig, Command, Settings, StudioError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    let settings = match Settings::resolve(&cli).and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_message());
            std::process::exit(1);
        }
    };

    let ok = match cli.command {
        Command::Services => list_services(&settings).await?,
        Command::Service { id } => show_service(&settings, id).await?,
        Command::Times { date } => show_times(&settings, &date).await?,
        Command::Select { id } => {
            let app = App::from_config(&settings, Page::home())?;
            app.book_service(id).await?;
            println!(
                "✅ Service {} selected, continue at {}",
                id,
                app.page().lock().await.location()
            );
            true
        }
        Command::Book {
            name,
            phone,
            email,
            service,
            date,
            time,
            message,
        } => {
            let app = App::from_config(&settings, Page::contact())?;
            app.on_page_load().await.1?;

            {
                let page = app.page();
                let mut page = page.lock().await;
                let form = page
                    .form_mut(APPOINTMENT_FORM_ID)
                    .ok_or_else(|| anyhow::anyhow!("booking form missing"))?;
                form.set_value("name", &name);
                form.set_value("phone", &phone);
                form.set_value("email", &email);
                form.set_value("message", &message);
                if let Some(service) = &service {
                    if !form.set_value("service", service) {
                        anyhow::bail!("unknown service id {}", service);
                    }
                }
                page.set_input_value(DATE_INPUT_ID, &date);
            }

            app.on_date_change().await?;
            {
                let page = app.page();
                let mut page = page.lock().await;
                let offered = page
                    .select_mut(TIME_SELECT_ID)
                    .map(|s| s.set_value(&time))
                    .unwrap_or(false);
                if !offered {
                    anyhow::bail!("{} is not available on {}", time, date);
                }
            }

            report(&app, app.submit_booking().await)
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let app = App::from_config(&settings, Page::contact())?;
            {
                let page = app.page();
                let mut page = page.lock().await;
                let form = page
                    .form_mut(CONTACT_FORM_ID)
                    .ok_or_else(|| anyhow::anyhow!("contact form missing"))?;
                form.set_value("name", &name);
                form.set_value("email", &email);
                form.set_value("subject", &subject);
                form.set_value("message", &message);
            }
            report(&app, app.submit_contact().await)
        }
    };

    if !ok {
        std::process::exit(2);
    }
    Ok(())
}

async fn list_services(settings: &Settings) -> Result<bool, StudioError> {
    let app = App::from_config(settings, Page::home())?;
    let (cards, _) = app.on_page_load().await;
    match cards {
        Ok(LoadOutcome::Rendered(count)) => {
            let page = app.page();
            let page = page.lock().await;
            println!("{}", page.services_html().unwrap_or_default());
            tracing::info!("✅ {} services", count);
            Ok(true)
        }
        Ok(_) => Ok(true),
        Err(_) => Ok(print_banner(&app)),
    }
}

async fn show_service(settings: &Settings, id: i64) -> Result<bool, StudioError> {
    let app = App::from_config(settings, Page::home())?;
    match app.loader().load_service(id).await {
        Ok(service) => {
            println!("{}. {}", service.id, service.name);
            if !service.description.is_empty() {
                println!("   {}", service.description);
            }
            println!(
                "   {} · {} phút",
                format_price(service.price),
                service.duration
            );
            Ok(true)
        }
        Err(_) => Ok(print_banner(&app)),
    }
}

async fn show_times(settings: &Settings, date: &str) -> Result<bool, StudioError> {
    let app = App::from_config(settings, Page::contact())?;
    app.page().lock().await.set_input_value(DATE_INPUT_ID, date);
    match app.on_date_change().await {
        Ok(_) => {
            let page = app.page();
            let page = page.lock().await;
            if let Some(select) = page.select(TIME_SELECT_ID) {
                print!("{}", options_html(select.options()));
            }
            Ok(true)
        }
        Err(_) => Ok(print_banner(&app)),
    }
}

fn report(app: &App, outcome: SubmitOutcome) -> bool {
    tracing::debug!("Submit outcome: {:?}", outcome);
    print_banner(app);
    matches!(outcome, SubmitOutcome::Sent(_))
}

/// Prints the visible banner; returns true if it was a success banner.
fn print_banner(app: &App) -> bool {
    match app.notifications().current() {
        Some(banner) => {
            let line = format!("{} {}", banner.kind.icon(), banner.message);
            match banner.kind {
                AlertKind::Success => {
                    println!("{}", line);
                    true
                }
                AlertKind::Error => {
                    eprintln!("{}", line);
                    false
                }
            }
        }
        None => false,
    }
}
