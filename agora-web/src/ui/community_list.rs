use yew::prelude::*;

use agora_client::api::Community;

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CommunityListProps {
    pub login: LoginInfo,
    pub on_nav: Callback<ui::Page>,
}

pub enum CommunityListMsg {
    Communities(Result<Vec<Community>, String>),
}

pub struct CommunityList {
    communities: ui::Remote<Vec<Community>>,
}

impl Component for CommunityList {
    type Message = CommunityListMsg;
    type Properties = CommunityListProps;

    fn create(ctx: &Context<Self>) -> Self {
        let login = ctx.props().login.clone();
        ctx.link().send_future(async move {
            CommunityListMsg::Communities(
                api::fetch_communities(&login)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
        CommunityList {
            communities: ui::Remote::Loading,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommunityListMsg::Communities(Ok(cs)) => self.communities = ui::Remote::Ready(cs),
            CommunityListMsg::Communities(Err(e)) => self.communities = ui::Remote::Failed(e),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.communities {
            ui::Remote::Loading => html! { <div>{ "Loading..." }</div> },
            ui::Remote::Failed(e) => html! {
                <div class="text-danger">{ format!("Error: {}", e) }</div>
            },
            ui::Remote::Ready(communities) => html! {
                <div class="community-list">
                    <h2>{ "Communities" }</h2>
                    { for communities.iter().map(|c| {
                        let open = {
                            let id = c.id;
                            let name = c.name.clone();
                            ctx.props().on_nav.reform(move |_| {
                                ui::Page::Community(id, name.clone())
                            })
                        };
                        html! {
                            <div class="card p-3 mb-3">
                                <h4><a onclick={open}>{ &c.name }</a></h4>
                                <p class="text-muted mb-0">{ &c.description }</p>
                            </div>
                        }
                    }) }
                </div>
            },
        }
    }
}
