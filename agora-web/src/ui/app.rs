use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use agora_client::api::{self, CommunityId, PostId};

use crate::{api as backend, ui, LoginInfo};

const KEY_LOGIN: &str = "login";

#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    Home,
    Communities,
    Community(CommunityId, String),
    Post(PostId),
    Profile(String), // keyed by email, like the store's profiles table
    CreatePost,
    CreateCommunity,
}

pub enum AppMsg {
    SubmitLogin { host: String, user: String, pass: String },
    BrowseAnonymously(String),
    LoggedIn(LoginInfo),
    LoginFailed(String),
    Logout,
    Navigate(Page),
}

pub struct App {
    login: Option<LoginInfo>,
    login_error: Option<String>,
    page: Page,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        App {
            login: LocalStorage::get(KEY_LOGIN).ok(),
            login_error: None,
            page: Page::Home,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::SubmitLogin { host, user, pass } => {
                ctx.link().send_future(async move {
                    let session = backend::auth(
                        host.clone(),
                        api::NewSession {
                            user,
                            password: pass,
                            device: String::from("agora-web"),
                        },
                    )
                    .await;
                    match session {
                        Ok(session) => AppMsg::LoggedIn(LoginInfo {
                            host,
                            session: Some(session),
                        }),
                        Err(e) => AppMsg::LoginFailed(format!("{:#}", e)),
                    }
                });
            }
            AppMsg::BrowseAnonymously(host) => {
                ctx.link()
                    .send_message(AppMsg::LoggedIn(LoginInfo::anonymous(host)));
            }
            AppMsg::LoggedIn(login) => {
                LocalStorage::set(KEY_LOGIN, &login)
                    .expect("failed saving login info to LocalStorage");
                self.login = Some(login);
                self.login_error = None;
                self.page = Page::Home;
            }
            AppMsg::LoginFailed(e) => {
                self.login_error = Some(e);
            }
            AppMsg::Logout => {
                LocalStorage::delete(KEY_LOGIN);
                if let Some(login) = self.login.take() {
                    spawn_local(backend::unauth(login));
                }
                self.page = Page::Home;
            }
            AppMsg::Navigate(page) => {
                self.page = page;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let login = match &self.login {
            None => {
                return html! {
                    <div class="container">
                        <ui::Login
                            error={self.login_error.clone()}
                            on_login={ctx.link().callback(|(host, user, pass)| {
                                AppMsg::SubmitLogin { host, user, pass }
                            })}
                            on_anonymous={ctx.link().callback(AppMsg::BrowseAnonymously)}
                        />
                    </div>
                };
            }
            Some(login) => login.clone(),
        };
        let on_nav = ctx.link().callback(AppMsg::Navigate);
        let page = match self.page.clone() {
            Page::Home => html! {
                <ui::PostList login={login.clone()} on_nav={on_nav.clone()} />
            },
            Page::Communities => html! {
                <ui::CommunityList login={login.clone()} on_nav={on_nav.clone()} />
            },
            Page::Community(id, name) => html! {
                <ui::CommunityDisplay
                    login={login.clone()}
                    community={id}
                    name={name}
                    on_nav={on_nav.clone()}
                />
            },
            Page::Post(id) => html! {
                <ui::PostDetail login={login.clone()} post={id} on_nav={on_nav.clone()} />
            },
            Page::Profile(email) => html! {
                <ui::UserProfile login={login.clone()} email={email} on_nav={on_nav.clone()} />
            },
            Page::CreatePost => html! {
                <ui::CreatePost login={login.clone()} on_nav={on_nav.clone()} />
            },
            Page::CreateCommunity => html! {
                <ui::CreateCommunity login={login.clone()} on_nav={on_nav.clone()} />
            },
        };
        html! {
            <div class="container">
                { self.navbar(ctx, &login) }
                <main class="py-3">
                    { page }
                </main>
            </div>
        }
    }
}

impl App {
    fn navbar(&self, ctx: &Context<Self>, login: &LoginInfo) -> Html {
        let nav_link = |label: &str, page: Page| {
            let active = (page == self.page).then(|| "active");
            html! {
                <li class="nav-item">
                    <a
                        class={classes!("nav-link", active)}
                        onclick={ctx.link().callback(move |_| AppMsg::Navigate(page.clone()))}
                    >
                        { label }
                    </a>
                </li>
            }
        };
        let session_links = match &login.session {
            Some(session) => {
                let email = session.email.clone();
                html! {<>
                    { nav_link("Create Post", Page::CreatePost) }
                    { nav_link("Create Community", Page::CreateCommunity) }
                    { nav_link(&format!("@{}", session.display_name), Page::Profile(email)) }
                </>}
            }
            None => html! {
                <li class="nav-item">
                    <span class="nav-link disabled">{ "browsing anonymously" }</span>
                </li>
            },
        };
        html! {
            <nav class="navbar navbar-expand">
                <a class="navbar-brand" onclick={ctx.link().callback(|_| AppMsg::Navigate(Page::Home))}>
                    { "agora" }
                </a>
                <ul class="navbar-nav me-auto">
                    { nav_link("Home", Page::Home) }
                    { nav_link("Communities", Page::Communities) }
                    { session_links }
                </ul>
                <button
                    type="button"
                    class="btn btn-outline-secondary btn-sm"
                    onclick={ctx.link().callback(|_| AppMsg::Logout)}
                >
                    { if login.session.is_some() { "Logout" } else { "Switch host" } }
                </button>
            </nav>
        }
    }
}
