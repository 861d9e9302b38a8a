use yew::prelude::*;

use agora_client::api::{CommunityId, PostSummary};

use crate::{api, ui, ui::post_list::post_card, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CommunityDisplayProps {
    pub login: LoginInfo,
    pub community: CommunityId,
    pub name: String,
    pub on_nav: Callback<ui::Page>,
}

pub enum CommunityDisplayMsg {
    Posts(Result<Vec<PostSummary>, String>),
}

pub struct CommunityDisplay {
    posts: ui::Remote<Vec<PostSummary>>,
}

impl CommunityDisplay {
    fn fetch(ctx: &Context<Self>) {
        let login = ctx.props().login.clone();
        let community = ctx.props().community;
        ctx.link().send_future(async move {
            CommunityDisplayMsg::Posts(
                api::fetch_community_posts(&login, community)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
    }
}

impl Component for CommunityDisplay {
    type Message = CommunityDisplayMsg;
    type Properties = CommunityDisplayProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::fetch(ctx);
        CommunityDisplay {
            posts: ui::Remote::Loading,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().community != old_props.community {
            self.posts = ui::Remote::Loading;
            Self::fetch(ctx);
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommunityDisplayMsg::Posts(Ok(posts)) => self.posts = ui::Remote::Ready(posts),
            CommunityDisplayMsg::Posts(Err(e)) => self.posts = ui::Remote::Failed(e),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match &self.posts {
            ui::Remote::Loading => html! { <div>{ "Loading..." }</div> },
            ui::Remote::Failed(e) => html! {
                <div class="text-danger">{ format!("Error: {}", e) }</div>
            },
            ui::Remote::Ready(posts) if posts.is_empty() => html! {
                <p class="text-muted">{ "No post in this community yet" }</p>
            },
            ui::Remote::Ready(posts) => html! {
                <div>{ for posts.iter().map(|p| post_card(p, &ctx.props().on_nav)) }</div>
            },
        };
        html! {
            <div>
                <h2 class="text-center">{ format!("{} Community Posts", ctx.props().name) }</h2>
                { body }
            </div>
        }
    }
}
