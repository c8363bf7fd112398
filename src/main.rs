use promano::app::Root;
use promano::{logging, AppConfig};
use tracing::info;

fn main() {
    logging::init();

    let config = AppConfig::from_env().expect("should load configuration from environment");
    let webview_data_dir = config
        .webview_data_dir()
        .expect("should resolve and create WebView2 data directory");
    info!(
        page_size = config.pagination.initial_page_size,
        data_dir = %config.data_dir.display(),
        "starting ProMano"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("ProMano"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config.pagination)
        .launch(Root);
}
