mod api;
mod app;
mod cascade;
mod config;
mod remote;
mod reports;
mod screens;
mod validate;

use iced::Task;
use tracing::error;
use tracing_subscriber::EnvFilter;

use app::App;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::load_config();
    let base_url = config::api_base_url(&config);
    let api = match api::ApiClient::new(&base_url) {
        Ok(api) => api,
        Err(err) => {
            error!("no se pudo crear el cliente HTTP: {err}");
            std::process::exit(1);
        }
    };

    iced::application("Panel Escolar", App::update, App::view)
        .theme(|app: &App| app.theme.clone())
        .window_size(iced::Size::new(1400.0, 800.0))
        .run_with(move || (App::new(config, api), Task::none()))
}
