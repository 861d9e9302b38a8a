use yew::prelude::*;

use agora_client::api::NewCommunity;

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CreateCommunityProps {
    pub login: LoginInfo,
    pub on_nav: Callback<ui::Page>,
}

pub enum CreateCommunityMsg {
    NameChanged(String),
    DescriptionChanged(String),
    Submit,
    SubmitDone(Result<(), String>),
}

pub struct CreateCommunity {
    name: String,
    description: String,
    submitting: bool,
    error: Option<String>,
}

impl Component for CreateCommunity {
    type Message = CreateCommunityMsg;
    type Properties = CreateCommunityProps;

    fn create(_ctx: &Context<Self>) -> Self {
        CreateCommunity {
            name: String::new(),
            description: String::new(),
            submitting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CreateCommunityMsg::NameChanged(n) => self.name = n,
            CreateCommunityMsg::DescriptionChanged(d) => self.description = d,
            CreateCommunityMsg::Submit => {
                let community = match NewCommunity::new(
                    ctx.props().login.session.as_ref(),
                    self.name.clone(),
                    self.description.clone(),
                ) {
                    Ok(c) => c,
                    Err(e) => {
                        self.error = Some(e.to_string());
                        return true;
                    }
                };
                self.submitting = true;
                self.error = None;
                let login = ctx.props().login.clone();
                ctx.link().send_future(async move {
                    CreateCommunityMsg::SubmitDone(
                        api::insert_community(&login, community)
                            .await
                            .map_err(|e| format!("{:#}", e)),
                    )
                });
            }
            CreateCommunityMsg::SubmitDone(Ok(())) => {
                self.submitting = false;
                ctx.props().on_nav.emit(ui::Page::Communities);
            }
            CreateCommunityMsg::SubmitDone(Err(e)) => {
                self.submitting = false;
                self.error = Some(e);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let error = self
            .error
            .as_ref()
            .map(|e| html! { <p class="text-danger">{ e }</p> });
        html! {
            <form onsubmit={ctx.link().callback(|e: web_sys::SubmitEvent| {
                e.prevent_default();
                CreateCommunityMsg::Submit
            })}>
                <h2>{ "Create New Community" }</h2>
                <div class="mb-3">
                    <label class="form-label" for="name">{ "Community Name" }</label>
                    <input
                        type="text"
                        id="name"
                        required={true}
                        class="form-control"
                        value={self.name.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            CreateCommunityMsg::NameChanged(input.value())
                        })}
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="description">{ "Description" }</label>
                    <textarea
                        id="description"
                        rows="3"
                        class="form-control"
                        value={self.description.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CreateCommunityMsg::DescriptionChanged(input.value())
                        })}
                    >
                    </textarea>
                </div>
                <button type="submit" class="btn btn-primary" disabled={self.submitting}>
                    { if self.submitting { "Saving..." } else { "Save" } }
                </button>
                { for error }
            </form>
        }
    }
}
