use yew::prelude::*;

use agora_client::api::{PostSummary, Profile};

use crate::{api, ui, ui::post_list::post_card, LoginInfo};

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Profile,
    Posts,
}

#[derive(Clone, PartialEq, Properties)]
pub struct UserProfileProps {
    pub login: LoginInfo,
    pub email: String,
    pub on_nav: Callback<ui::Page>,
}

pub enum UserProfileMsg {
    Profile(Result<Profile, String>),
    Posts(Result<Vec<PostSummary>, String>),
    SelectTab(Tab),
    EditBio,
    BioChanged(String),
    SaveBio,
    SaveBioDone(Result<(), String>),
    CancelEdit,
}

pub struct UserProfile {
    profile: ui::Remote<Profile>,
    posts: ui::Remote<Vec<PostSummary>>,
    tab: Tab,
    bio_draft: Option<String>,
    saving: bool,
    save_message: Option<Result<(), String>>,
}

impl UserProfile {
    fn fetch(ctx: &Context<Self>) {
        let login = ctx.props().login.clone();
        let email = ctx.props().email.clone();
        ctx.link().send_future(async move {
            UserProfileMsg::Profile(
                api::fetch_profile(&login, &email)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
        let login = ctx.props().login.clone();
        let email = ctx.props().email.clone();
        ctx.link().send_future(async move {
            UserProfileMsg::Posts(
                api::fetch_user_posts(&login, &email)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
    }

    fn is_own_profile(&self, ctx: &Context<Self>) -> bool {
        ctx.props()
            .login
            .session
            .as_ref()
            .map(|s| s.email == ctx.props().email)
            .unwrap_or(false)
    }
}

impl Component for UserProfile {
    type Message = UserProfileMsg;
    type Properties = UserProfileProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::fetch(ctx);
        UserProfile {
            profile: ui::Remote::Loading,
            posts: ui::Remote::Loading,
            tab: Tab::Profile,
            bio_draft: None,
            saving: false,
            save_message: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().email != old_props.email {
            self.profile = ui::Remote::Loading;
            self.posts = ui::Remote::Loading;
            self.tab = Tab::Profile;
            self.bio_draft = None;
            self.saving = false;
            self.save_message = None;
            Self::fetch(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            UserProfileMsg::Profile(Ok(p)) => self.profile = ui::Remote::Ready(p),
            UserProfileMsg::Profile(Err(e)) => self.profile = ui::Remote::Failed(e),
            UserProfileMsg::Posts(Ok(ps)) => self.posts = ui::Remote::Ready(ps),
            UserProfileMsg::Posts(Err(e)) => self.posts = ui::Remote::Failed(e),
            UserProfileMsg::SelectTab(tab) => self.tab = tab,
            UserProfileMsg::EditBio => {
                let current = match &self.profile {
                    ui::Remote::Ready(p) => p.bio.clone(),
                    _ => String::new(),
                };
                self.bio_draft = Some(current);
                self.save_message = None;
            }
            UserProfileMsg::BioChanged(b) => self.bio_draft = Some(b),
            UserProfileMsg::SaveBio => {
                let bio = match &self.bio_draft {
                    Some(b) => b.clone(),
                    None => return false,
                };
                self.saving = true;
                let login = ctx.props().login.clone();
                let email = ctx.props().email.clone();
                ctx.link().send_future(async move {
                    UserProfileMsg::SaveBioDone(
                        api::update_bio(&login, &email, bio)
                            .await
                            .map_err(|e| format!("{:#}", e)),
                    )
                });
            }
            UserProfileMsg::SaveBioDone(res) => {
                self.saving = false;
                if res.is_ok() {
                    if let (ui::Remote::Ready(p), Some(bio)) =
                        (&mut self.profile, self.bio_draft.take())
                    {
                        p.bio = bio;
                    }
                }
                self.save_message = Some(res);
            }
            UserProfileMsg::CancelEdit => {
                self.bio_draft = None;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let profile = match &self.profile {
            ui::Remote::Loading => return html! { <div>{ "Loading..." }</div> },
            ui::Remote::Failed(e) => {
                return html! { <div class="text-danger">{ format!("Error: {}", e) }</div> }
            }
            ui::Remote::Ready(p) => p,
        };
        let tab_button = |label: &str, tab: Tab| {
            let active = (tab == self.tab).then(|| "active");
            html! {
                <button
                    type="button"
                    class={classes!("nav-link", active)}
                    onclick={ctx.link().callback(move |_| UserProfileMsg::SelectTab(tab))}
                >
                    { label }
                </button>
            }
        };
        let body = match self.tab {
            Tab::Profile => self.profile_tab(ctx, profile),
            Tab::Posts => self.posts_tab(ctx),
        };
        html! {
            <div class="user-profile">
                <h2 class="text-center">{ format!("{}'s Profile", profile.name) }</h2>
                <div class="nav nav-tabs justify-content-center mb-3">
                    { tab_button("Profile", Tab::Profile) }
                    { tab_button("Posts", Tab::Posts) }
                </div>
                { body }
            </div>
        }
    }
}

impl UserProfile {
    fn profile_tab(&self, ctx: &Context<Self>, profile: &Profile) -> Html {
        let avatar = profile.avatar_url.as_ref().map(|url| {
            html! { <img src={url.clone()} alt={profile.name.clone()} class="rounded my-3" /> }
        });
        let bio = match &self.bio_draft {
            Some(draft) => html! {<>
                <textarea
                    rows="4"
                    class="form-control"
                    placeholder="Enter your bio"
                    value={draft.clone()}
                    onchange={ctx.link().callback(|e: web_sys::Event| {
                        let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                        UserProfileMsg::BioChanged(input.value())
                    })}
                >
                </textarea>
                <div class="mt-2">
                    <button
                        type="button"
                        class="btn btn-primary btn-sm me-2"
                        disabled={self.saving}
                        onclick={ctx.link().callback(|_| UserProfileMsg::SaveBio)}
                    >
                        { if self.saving { "Saving..." } else { "Save" } }
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary btn-sm"
                        onclick={ctx.link().callback(|_| UserProfileMsg::CancelEdit)}
                    >
                        { "Cancel" }
                    </button>
                </div>
            </>},
            None => {
                let edit = self.is_own_profile(ctx).then(|| html! {
                    <button
                        type="button"
                        class="btn btn-link btn-sm"
                        onclick={ctx.link().callback(|_| UserProfileMsg::EditBio)}
                    >
                        { "Edit" }
                    </button>
                });
                let text = match profile.bio.is_empty() {
                    true => "No bio added yet.",
                    false => profile.bio.as_str(),
                };
                html! {<>
                    <p class="mb-0">{ text }</p>
                    { for edit }
                </>}
            }
        };
        let save_message = self.save_message.as_ref().map(|res| match res {
            Ok(()) => html! { <p class="text-success small mt-2">{ "Bio updated" }</p> },
            Err(e) => html! { <p class="text-danger small mt-2">{ format!("Failed to update bio: {}", e) }</p> },
        });
        html! {
            <div>
                { for avatar }
                <p class="text-muted">{ format!("Email: {}", profile.email) }</p>
                <p class="text-muted fw-semibold mb-1">{ "Bio:" }</p>
                { bio }
                { for save_message }
            </div>
        }
    }

    fn posts_tab(&self, ctx: &Context<Self>) -> Html {
        match &self.posts {
            ui::Remote::Loading => html! { <p class="text-muted">{ "Loading posts..." }</p> },
            ui::Remote::Failed(e) => html! {
                <p class="text-danger">{ format!("Error loading posts: {}", e) }</p>
            },
            ui::Remote::Ready(posts) if posts.is_empty() => html! {
                <p class="text-muted text-center">{ "No posts yet." }</p>
            },
            ui::Remote::Ready(posts) => html! {
                <div>{ for posts.iter().map(|p| post_card(p, &ctx.props().on_nav)) }</div>
            },
        }
    }
}
