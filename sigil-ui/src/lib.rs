use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use sigil_common::config::SigilConfig;
use std::rc::Rc;
use wasm_bindgen::prelude::wasm_bindgen;

pub mod components;
mod console;
mod pages;
pub mod session;

use components::{ToastStack, Toaster};
use console::ConsoleWriter;
use pages::{DashboardPage, LoginPage};
use session::SessionContext;

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Settings compiled into the bundle
const EMBEDDED_CONFIG: &str = include_str!("../sigil.toml");

pub fn load_config() -> SigilConfig {
    match SigilConfig::from_toml_str(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("Using default settings: {}", err);
            SigilConfig::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = Rc::new(load_config());
    if config.login.success_route != DASHBOARD_ROUTE {
        logging::warn!(
            "success_route '{}' has no page in this build",
            config.login.success_route
        );
    }

    let toaster = Toaster::new(config.notifications.duration_ms);
    provide_context(config);
    provide_context(SessionContext::restore());
    provide_context(toaster);

    view! {
        <Stylesheet id="leptos" href="/pkg/sigil-ui.css"/>
        <Title text="Sigil - Sign in"/>
        <Router>
            <main class="main-content">
                <Routes>
                    <Route path="" view=|| view! { <Redirect path=LOGIN_ROUTE/> }/>
                    <Route path=LOGIN_ROUTE view=LoginPage/>
                    <Route path=DASHBOARD_ROUTE view=DashboardPage/>
                </Routes>
            </main>
            <ToastStack toaster=toaster/>
        </Router>
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let logging_config = load_config().logging;
    if let Err(err) = logging_config.init_with_writer(ConsoleWriter::default) {
        logging::warn!("Tracing unavailable: {}", err);
    }

    mount_to_body(|| view! { <App/> });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = SigilConfig::from_toml_str(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.login.success_route, DASHBOARD_ROUTE);
        assert_eq!(config.credentials.len(), 2);
        assert_eq!(config, SigilConfig::default());
    }
}
