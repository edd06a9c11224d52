use actix_web::{http::header, web, HttpResponse, Result};
use askama::Template;
use serde::Deserialize;

use crate::{
    catalog::{ServiceCatalog, ShopDirectory, SqliteDirectory},
    checkout::submit_booking,
    filters,
    models::{find_haircut_style, haircut_styles, Barber},
    state::AppState,
    templates::render,
    wizard::{BookingSelection, GuestInfo, Step, Wizard},
};

/// Slots the booking form offers. Purely presentational; whether a slot is
/// actually free is the checkout API's call.
const TIME_SLOTS: &[&str] = &[
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];

#[derive(Clone, Debug)]
struct StyleOption {
    id: &'static str,
    name: &'static str,
    selected: bool,
}

#[derive(Clone, Debug)]
struct ServiceOption {
    id: String,
    name: String,
    description: String,
    price: f64,
    selected: bool,
}

#[derive(Clone, Debug)]
struct SlotOption {
    value: &'static str,
    selected: bool,
}

#[derive(Clone, Debug)]
struct BarberOption {
    id: String,
    name: String,
    initials: String,
    selected: bool,
}

#[derive(Clone, Debug, Default)]
struct SummaryView {
    haircut: String,
    service: String,
    barber: String,
    total: f64,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "book.html")]
struct BookingTemplate {
    step: u8,
    guest_name: String,
    guest_phone: String,
    haircut_id: String,
    service_id: String,
    date: String,
    time: String,
    barber_id: String,
    styles: Vec<StyleOption>,
    services: Vec<ServiceOption>,
    services_loading: bool,
    time_slots: Vec<SlotOption>,
    barbers: Vec<BarberOption>,
    summary: SummaryView,
    error: String,
    busy: bool,
}

#[derive(Template)]
#[template(path = "receipt.html")]
struct ReceiptTemplate {
    transaction_id: String,
    guest_name: String,
}

/// The whole selection rides along in the form so the wizard survives the
/// round trip without server-side sessions.
#[derive(Deserialize)]
struct BookingForm {
    step: Option<u8>,
    action: Option<String>,
    guest_name: Option<String>,
    guest_phone: Option<String>,
    haircut_id: Option<String>,
    service_id: Option<String>,
    date: Option<String>,
    time: Option<String>,
    barber_id: Option<String>,
}

#[derive(Deserialize)]
struct ReceiptQuery {
    transaction_id: Option<String>,
    // Legacy key: the value is the guest's display name.
    email: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(
            web::resource("/book")
                .route(web::get().to(show_booking))
                .route(web::post().to(book_action)),
        )
        .service(web::resource("/receipt").route(web::get().to(receipt_page)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn home() -> Result<HttpResponse> {
    Ok(render(HomeTemplate))
}

async fn show_booking(state: web::Data<AppState>) -> Result<HttpResponse> {
    let directory = SqliteDirectory::new(state.db.clone());
    let catalog = ServiceCatalog::load(&directory).await;
    let barbers = directory.list_barbers().await.unwrap_or_default();

    Ok(wizard_page(&Wizard::new(), &catalog, &barbers))
}

async fn book_action(
    state: web::Data<AppState>,
    form: web::Form<BookingForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let directory = SqliteDirectory::new(state.db.clone());
    let catalog = ServiceCatalog::load(&directory).await;
    let barbers = directory.list_barbers().await.unwrap_or_default();

    let selection = resolve_selection(&form, &catalog, &barbers);
    let step = Step::from_number(form.step.unwrap_or(1));
    let mut wizard = Wizard::resume(step, selection);

    match form.action.as_deref().unwrap_or("next") {
        "back" => wizard.retreat(),
        "checkout" => {
            if let Some(receipt) = submit_booking(&mut wizard, &state.checkout).await {
                return Ok(HttpResponse::SeeOther()
                    .append_header((header::LOCATION, receipt.path()))
                    .finish());
            }
        }
        _ => {
            wizard.advance();
        }
    }

    Ok(wizard_page(&wizard, &catalog, &barbers))
}

async fn receipt_page(query: web::Query<ReceiptQuery>) -> Result<HttpResponse> {
    let query = query.into_inner();
    Ok(render(ReceiptTemplate {
        transaction_id: query.transaction_id.unwrap_or_default(),
        guest_name: query.email.unwrap_or_default(),
    }))
}

/// Rebuild the guest's selection from the posted form, resolving ids against
/// the live catalog and roster. Unknown ids simply drop the selection, which
/// the wizard's validation then reports.
fn resolve_selection(
    form: &BookingForm,
    catalog: &ServiceCatalog,
    barbers: &[Barber],
) -> BookingSelection {
    BookingSelection {
        guest: GuestInfo {
            name: form.guest_name.clone().unwrap_or_default(),
            phone: form.guest_phone.clone().unwrap_or_default(),
        },
        haircut: form.haircut_id.as_deref().and_then(find_haircut_style),
        service: form
            .service_id
            .as_deref()
            .and_then(|id| catalog.find(id))
            .cloned(),
        date: form.date.clone().filter(|value| !value.trim().is_empty()),
        time: form.time.clone().filter(|value| !value.trim().is_empty()),
        barber: form
            .barber_id
            .as_deref()
            .and_then(|id| barbers.iter().find(|barber| barber.id == id))
            .cloned(),
    }
}

fn wizard_page(wizard: &Wizard, catalog: &ServiceCatalog, barbers: &[Barber]) -> HttpResponse {
    let selection = wizard.selection();
    let haircut_id = selection
        .haircut
        .map(|style| style.id.to_string())
        .unwrap_or_default();
    let service_id = selection
        .service
        .as_ref()
        .map(|service| service.id.clone())
        .unwrap_or_default();
    let barber_id = selection
        .barber
        .as_ref()
        .map(|barber| barber.id.clone())
        .unwrap_or_default();
    let time = selection.time.clone().unwrap_or_default();

    let styles = haircut_styles()
        .iter()
        .map(|style| StyleOption {
            id: style.id,
            name: style.name,
            selected: style.id == haircut_id,
        })
        .collect();

    let services = catalog
        .services()
        .iter()
        .map(|service| ServiceOption {
            id: service.id.clone(),
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price,
            selected: service.id == service_id,
        })
        .collect();

    let time_slots = TIME_SLOTS
        .iter()
        .map(|slot| SlotOption {
            value: slot,
            selected: *slot == time,
        })
        .collect();

    let barbers = barbers
        .iter()
        .map(|barber| {
            let initials = [&barber.first_name, &barber.last_name]
                .iter()
                .filter_map(|part| part.chars().next())
                .collect::<String>()
                .to_uppercase();
            BarberOption {
                id: barber.id.clone(),
                name: barber.full_name(),
                initials,
                selected: barber.id == barber_id,
            }
        })
        .collect();

    let summary = SummaryView {
        haircut: selection
            .haircut
            .map(|style| style.name.to_string())
            .unwrap_or_default(),
        service: selection
            .service
            .as_ref()
            .map(|service| service.name.clone())
            .unwrap_or_default(),
        barber: selection
            .barber
            .as_ref()
            .map(|barber| barber.full_name())
            .unwrap_or_default(),
        total: selection
            .service
            .as_ref()
            .map(|service| service.price)
            .unwrap_or(0.0),
    };

    render(BookingTemplate {
        step: wizard.step().number(),
        guest_name: selection.guest.name.clone(),
        guest_phone: selection.guest.phone.clone(),
        haircut_id,
        service_id,
        date: selection.date.clone().unwrap_or_default(),
        time,
        barber_id,
        styles,
        services,
        services_loading: catalog.is_loading(),
        time_slots,
        barbers,
        summary,
        error: wizard.error().unwrap_or_default().to_string(),
        busy: wizard.is_busy(),
    })
}
