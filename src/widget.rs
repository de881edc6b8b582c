//! Panels that display data fetched from public APIs
//!
//! Every panel follows the same lifecycle: a loading placeholder is shown, the request is sent, and then either the formatted
//! data or a fixed error message is displayed. Errors are logged and never returned to the caller.

use std::error::Error;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::client::{endpoint, ApiClient};
use crate::config;
use crate::traits::ApiWidget;
use crate::utils::escape_html;

/// How many holidays are displayed
const HOLIDAYS_SHOWN: usize = 6;
/// How many vehicle brands are displayed
const BRANDS_SHOWN: usize = 8;
/// Names shorter than this are not sent to the age prediction API
const MIN_NAME_LEN: usize = 2;


/// What a panel displays
#[derive(Clone, Debug, PartialEq)]
pub enum PanelContent {
    /// Plain text
    Text(String),
    /// HTML markup. Every interpolated value has been escaped
    Html(String),
}

impl PanelContent {
    pub fn as_str(&self) -> &str {
        match self {
            PanelContent::Text(s) => s,
            PanelContent::Html(s) => s,
        }
    }
}

impl Default for PanelContent {
    fn default() -> Self {
        PanelContent::Text(String::new())
    }
}


/// The content and error areas of a widget
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Panel {
    pub content: PanelContent,
    pub error: String,
}

impl Panel {
    /// Show the loading placeholder of `widget`
    pub fn set_loading<W: ApiWidget + ?Sized>(&mut self, widget: &W) {
        self.content = PanelContent::Text(widget.loading_message());
        self.error.clear();
    }

    pub fn is_error(&self) -> bool {
        self.error.is_empty() == false
    }
}

/// Load (or reload) a panel: show the placeholder, fetch the data, then show either the data or the widget's error message
pub async fn refresh_panel<W: ApiWidget + Sync + ?Sized>(panel: &mut Panel, widget: &W, client: &ApiClient) {
    panel.set_loading(widget);

    match widget.fetch_content(client).await {
        Ok(content) => {
            panel.content = content;
        },
        Err(err) => {
            log::error!("{} error: {}", widget.name(), err);
            panel.content = PanelContent::Text(String::new());
            panel.error = widget.error_message().to_string();
        },
    }
}

/// Build and load a panel for `widget`
pub async fn load_panel<W: ApiWidget + Sync + ?Sized>(widget: &W, client: &ApiClient) -> Panel {
    let mut panel = Panel::default();
    refresh_panel(&mut panel, widget, client).await;
    panel
}


/// Display a JSON scalar the way a web page would interpolate it
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}



/// A Star Wars character, as returned by SWAPI
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub height: Value,
    #[serde(default)]
    pub mass: Value,
    #[serde(default)]
    pub birth_year: Value,
    #[serde(default)]
    pub gender: Value,
}

impl Person {
    /// Render as a labeled list
    pub fn to_html(&self) -> String {
        format!("<strong>Nome:</strong> {}<br/>\n\
                 <strong>Altura:</strong> {} cm<br/>\n\
                 <strong>Peso:</strong> {} kg<br/>\n\
                 <strong>Nascimento:</strong> {}<br/>\n\
                 <strong>Gênero:</strong> {}",
            escape_html(display_value(&self.name)),
            escape_html(display_value(&self.height)),
            escape_html(display_value(&self.mass)),
            escape_html(display_value(&self.birth_year)),
            escape_html(display_value(&self.gender)),
        )
    }
}

/// Displays a single SWAPI person
pub struct SwapiWidget {
    base_url: String,
    person_id: u32,
}

impl SwapiWidget {
    /// The widget for Luke Skywalker, on the configured SWAPI server
    pub fn new() -> Self {
        Self::with_base_url(config::get(&config::SWAPI_URL))
    }

    pub fn with_base_url<S: ToString>(base_url: S) -> Self {
        Self { base_url: base_url.to_string(), person_id: 1 }
    }
}

#[async_trait]
impl ApiWidget for SwapiWidget {
    fn name(&self) -> &str { "SWAPI" }
    fn loading_message(&self) -> String { "Carregando SWAPI...".to_string() }
    fn error_message(&self) -> &'static str { "Erro ao carregar dados do SWAPI." }

    async fn fetch_content(&self, client: &ApiClient) -> Result<PanelContent, Box<dyn Error>> {
        let url = endpoint(&self.base_url, &format!("/api/people/{}/", self.person_id))?;
        let person: Person = client.get_json(&url).await?;
        Ok(PanelContent::Html(person.to_html()))
    }
}



/// A public holiday, as returned by BrasilAPI
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Holiday {
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub name: Value,
}

/// Render the first holidays, one per line
pub fn holidays_content(holidays: &[Holiday]) -> PanelContent {
    if holidays.is_empty() {
        return PanelContent::Text("Nenhum feriado encontrado.".to_string());
    }
    let lines: Vec<String> = holidays.iter()
        .take(HOLIDAYS_SHOWN)
        .map(|h| format!("{} — {}", escape_html(display_value(&h.date)), escape_html(display_value(&h.name))))
        .collect();
    PanelContent::Html(lines.join("<br/>"))
}

/// Displays the national holidays of a year
pub struct HolidaysWidget {
    base_url: String,
    year: i32,
}

impl HolidaysWidget {
    /// The widget for the configured year, on the configured BrasilAPI server
    pub fn new() -> Self {
        Self::with_base_url(config::get(&config::BRASILAPI_URL), config::holiday_year())
    }

    pub fn with_base_url<S: ToString>(base_url: S, year: i32) -> Self {
        Self { base_url: base_url.to_string(), year }
    }
}

#[async_trait]
impl ApiWidget for HolidaysWidget {
    fn name(&self) -> &str { "BrasilAPI" }
    fn loading_message(&self) -> String { format!("Carregando feriados {}...", self.year) }
    fn error_message(&self) -> &'static str { "Erro ao carregar dados da BrasilAPI." }

    async fn fetch_content(&self, client: &ApiClient) -> Result<PanelContent, Box<dyn Error>> {
        let url = endpoint(&self.base_url, &format!("/api/feriados/v1/{}", self.year))?;
        let holidays: Vec<Holiday> = client.get_json(&url).await?;
        Ok(holidays_content(&holidays))
    }
}



/// A vehicle brand, as returned by the FIPE API
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Brand {
    #[serde(default)]
    pub codigo: Value,
    #[serde(default)]
    pub nome: Value,
}

/// Render the first brands, one per line
pub fn brands_content(brands: &[Brand]) -> PanelContent {
    if brands.is_empty() {
        return PanelContent::Text("Nenhuma marca encontrada.".to_string());
    }
    let lines: Vec<String> = brands.iter()
        .take(BRANDS_SHOWN)
        .map(|b| format!("{} — {}", escape_html(display_value(&b.codigo)), escape_html(display_value(&b.nome))))
        .collect();
    PanelContent::Html(lines.join("<br/>"))
}

/// Displays the car brands known to FIPE
pub struct BrandsWidget {
    base_url: String,
}

impl BrandsWidget {
    pub fn new() -> Self {
        Self::with_base_url(config::get(&config::FIPE_URL))
    }

    pub fn with_base_url<S: ToString>(base_url: S) -> Self {
        Self { base_url: base_url.to_string() }
    }
}

#[async_trait]
impl ApiWidget for BrandsWidget {
    fn name(&self) -> &str { "FIPE" }
    fn loading_message(&self) -> String { "Carregando marcas FIPE...".to_string() }
    fn error_message(&self) -> &'static str { "Erro ao carregar dados da FIPE." }

    async fn fetch_content(&self, client: &ApiClient) -> Result<PanelContent, Box<dyn Error>> {
        let url = endpoint(&self.base_url, "/fipe/api/v1/carros/marcas")?;
        let brands: Vec<Brand> = client.get_json(&url).await?;
        Ok(brands_content(&brands))
    }
}



/// An age prediction, as returned by Agify
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AgePrediction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl AgePrediction {
    pub fn to_html(&self) -> String {
        let age = match self.age {
            Some(age) => age.to_string(),
            None => "Não disponível".to_string(),
        };
        let count = match self.count {
            Some(count) => count.to_string(),
            None => "N/A".to_string(),
        };
        format!("<strong>Nome:</strong> {}<br/>\n\
                 <strong>Idade estimada:</strong> {}<br/>\n\
                 <strong>Contagem de registros:</strong> {}",
            escape_html(self.name.as_deref().unwrap_or("")), age, count)
    }
}

/// The label of the submit button when it is enabled
pub const AGE_SUBMIT_LABEL: &str = "Prever idade";
/// The label of the submit button while a request is in flight
pub const AGE_SUBMITTING_LABEL: &str = "Carregando...";

/// A form that predicts someone's age from their name
#[derive(Clone, Debug)]
pub struct AgeForm {
    base_url: String,
    pub name_input: String,
    pub panel: Panel,
    submitting: bool,
}

impl AgeForm {
    /// A form that uses the configured Agify server
    pub fn new() -> Self {
        Self::with_base_url(config::get(&config::AGIFY_URL))
    }

    pub fn with_base_url<S: ToString>(base_url: S) -> Self {
        Self {
            base_url: base_url.to_string(),
            name_input: String::new(),
            panel: Panel::default(),
            submitting: false,
        }
    }

    /// Whether the submit button is disabled (a request is in flight)
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting { AGE_SUBMITTING_LABEL } else { AGE_SUBMIT_LABEL }
    }

    /// Send the current name to the API, and display the prediction (or an error).
    ///
    /// Names shorter than two characters are rejected without any request.
    /// The submit button is disabled during the request, and enabled again whatever the outcome.
    pub async fn submit(&mut self, client: &ApiClient) {
        let name = self.name_input.trim().to_string();
        if name.chars().count() < MIN_NAME_LEN {
            self.show_error("Por favor, informe um nome com pelo menos 2 caracteres.");
            return;
        }

        self.submitting = true;
        self.panel.content = PanelContent::Text("Aguardando resposta da API...".to_string());
        self.panel.error.clear();

        match self.fetch(client, &name).await {
            Ok(prediction) => {
                self.panel.error.clear();
                self.panel.content = PanelContent::Html(prediction.to_html());
            },
            Err(err) => {
                log::error!("Agify error: {}", err);
                self.show_error("Não foi possível obter a previsão de idade. Verifique sua conexão e tente novamente.");
            },
        }

        self.submitting = false;
    }

    async fn fetch(&self, client: &ApiClient, name: &str) -> Result<AgePrediction, Box<dyn Error>> {
        let mut url = endpoint(&self.base_url, "/")?;
        url.query_pairs_mut().append_pair("name", name);
        client.get_json(&url).await
    }

    fn show_error(&mut self, message: &str) {
        self.panel.error = message.to_string();
        self.panel.content = PanelContent::Text(String::new());
    }

    /// Empty the input, the result and the error
    pub fn clear(&mut self) {
        self.name_input.clear();
        self.panel = Panel::default();
    }
}
