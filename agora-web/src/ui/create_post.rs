use yew::prelude::*;

use agora_client::api::{Community, CommunityId, NewPost};

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CreatePostProps {
    pub login: LoginInfo,
    pub on_nav: Callback<ui::Page>,
}

pub enum CreatePostMsg {
    Communities(Result<Vec<Community>, String>),
    TitleChanged(String),
    ContentChanged(String),
    ImageUrlChanged(String),
    CommunityChanged(String),
    Submit,
    SubmitDone(Result<(), String>),
}

pub struct CreatePost {
    communities: ui::Remote<Vec<Community>>,
    title: String,
    content: String,
    image_url: String,
    community: Option<CommunityId>,
    submitting: bool,
    error: Option<String>,
}

impl Component for CreatePost {
    type Message = CreatePostMsg;
    type Properties = CreatePostProps;

    fn create(ctx: &Context<Self>) -> Self {
        let login = ctx.props().login.clone();
        ctx.link().send_future(async move {
            CreatePostMsg::Communities(
                api::fetch_communities(&login)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
        CreatePost {
            communities: ui::Remote::Loading,
            title: String::new(),
            content: String::new(),
            image_url: String::new(),
            community: None,
            submitting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CreatePostMsg::Communities(Ok(cs)) => self.communities = ui::Remote::Ready(cs),
            CreatePostMsg::Communities(Err(e)) => self.communities = ui::Remote::Failed(e),
            CreatePostMsg::TitleChanged(t) => self.title = t,
            CreatePostMsg::ContentChanged(c) => self.content = c,
            CreatePostMsg::ImageUrlChanged(u) => self.image_url = u,
            CreatePostMsg::CommunityChanged(value) => {
                self.community = value.parse::<i64>().ok().map(CommunityId);
            }
            CreatePostMsg::Submit => {
                let community = match self.community {
                    Some(c) => c,
                    None => {
                        self.error = Some(String::from("Pick a community first"));
                        return true;
                    }
                };
                let image_url = match self.image_url.is_empty() {
                    true => None,
                    false => Some(self.image_url.clone()),
                };
                let new_post = match NewPost::new(
                    ctx.props().login.session.as_ref(),
                    community,
                    self.title.clone(),
                    self.content.clone(),
                    image_url,
                ) {
                    Ok(p) => p,
                    Err(e) => {
                        self.error = Some(e.to_string());
                        return true;
                    }
                };
                self.submitting = true;
                self.error = None;
                let login = ctx.props().login.clone();
                ctx.link().send_future(async move {
                    CreatePostMsg::SubmitDone(
                        api::insert_post(&login, new_post)
                            .await
                            .map_err(|e| format!("{:#}", e)),
                    )
                });
            }
            CreatePostMsg::SubmitDone(Ok(())) => {
                self.submitting = false;
                ctx.props().on_nav.emit(ui::Page::Home);
            }
            CreatePostMsg::SubmitDone(Err(e)) => {
                self.submitting = false;
                self.error = Some(e);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let communities = match &self.communities {
            ui::Remote::Loading => return html! { <div>{ "Loading..." }</div> },
            ui::Remote::Failed(e) => {
                return html! { <div class="text-danger">{ format!("Error: {}", e) }</div> }
            }
            ui::Remote::Ready(cs) => cs,
        };
        let error = self
            .error
            .as_ref()
            .map(|e| html! { <p class="text-danger">{ e }</p> });
        html! {
            <form onsubmit={ctx.link().callback(|e: web_sys::SubmitEvent| {
                e.prevent_default();
                CreatePostMsg::Submit
            })}>
                <h2>{ "Create New Post" }</h2>
                <div class="mb-3">
                    <label class="form-label" for="community">{ "Community" }</label>
                    <select
                        id="community"
                        class="form-select"
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                            CreatePostMsg::CommunityChanged(select.value())
                        })}
                    >
                        <option value="" selected={self.community.is_none()}>
                            { "-- pick a community --" }
                        </option>
                        { for communities.iter().map(|c| html! {
                            <option
                                value={c.id.0.to_string()}
                                selected={self.community == Some(c.id)}
                            >
                                { &c.name }
                            </option>
                        }) }
                    </select>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="title">{ "Title" }</label>
                    <input
                        type="text"
                        id="title"
                        required={true}
                        class="form-control"
                        value={self.title.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            CreatePostMsg::TitleChanged(input.value())
                        })}
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="content">{ "Content" }</label>
                    <textarea
                        id="content"
                        rows="5"
                        class="form-control"
                        value={self.content.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CreatePostMsg::ContentChanged(input.value())
                        })}
                    >
                    </textarea>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="image-url">{ "Image URL (optional)" }</label>
                    <input
                        type="url"
                        id="image-url"
                        class="form-control"
                        value={self.image_url.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            CreatePostMsg::ImageUrlChanged(input.value())
                        })}
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled={self.submitting}>
                    { if self.submitting { "Saving..." } else { "Create" } }
                </button>
                { for error }
            </form>
        }
    }
}
