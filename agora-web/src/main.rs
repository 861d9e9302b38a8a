use agora_client::api::Session;

mod api;
mod ui;

lazy_static::lazy_static! {
    pub static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

/// Where the hosted store lives and who we are there, persisted across page
/// loads. A `None` session browses anonymously: reading works, submitting is
/// rejected locally before any request goes out.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginInfo {
    pub host: String,
    pub session: Option<Session>,
}

impl LoginInfo {
    pub fn anonymous(host: String) -> LoginInfo {
        LoginInfo {
            host,
            session: None,
        }
    }
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}
