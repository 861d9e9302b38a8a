use yew::prelude::*;

use agora_client::api::PostSummary;

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct PostListProps {
    pub login: LoginInfo,
    pub on_nav: Callback<ui::Page>,
}

pub enum PostListMsg {
    Posts(Result<Vec<PostSummary>, String>),
}

pub struct PostList {
    posts: ui::Remote<Vec<PostSummary>>,
}

impl Component for PostList {
    type Message = PostListMsg;
    type Properties = PostListProps;

    fn create(ctx: &Context<Self>) -> Self {
        let login = ctx.props().login.clone();
        ctx.link().send_future(async move {
            PostListMsg::Posts(api::fetch_posts(&login).await.map_err(|e| format!("{:#}", e)))
        });
        PostList {
            posts: ui::Remote::Loading,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PostListMsg::Posts(Ok(posts)) => self.posts = ui::Remote::Ready(posts),
            PostListMsg::Posts(Err(e)) => self.posts = ui::Remote::Failed(e),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.posts {
            ui::Remote::Loading => html! { <div>{ "Loading..." }</div> },
            ui::Remote::Failed(e) => html! {
                <div class="text-danger">{ format!("Error: {}", e) }</div>
            },
            ui::Remote::Ready(posts) => html! {
                <div class="post-list">
                    { for posts.iter().map(|p| post_card(p, &ctx.props().on_nav)) }
                </div>
            },
        }
    }
}

/// One post tile in a listing, shared by the home page, community pages and
/// profile post tabs.
pub(crate) fn post_card(p: &PostSummary, on_nav: &Callback<ui::Page>) -> Html {
    let post = &p.post;
    let open_post = {
        let id = post.id;
        on_nav.reform(move |_| ui::Page::Post(id))
    };
    let open_author = {
        let email = post.author_email.clone();
        on_nav.reform(move |_| ui::Page::Profile(email.clone()))
    };
    let open_community = {
        let id = post.community_id;
        let name = post.community_name.clone();
        on_nav.reform(move |_| ui::Page::Community(id, name.clone()))
    };
    html! {
        <div class="card p-3 mb-3">
            <h4><a onclick={open_post}>{ &post.title }</a></h4>
            <p class="text-muted mb-1">
                { "by " }
                <a onclick={open_author}>{ &post.author_name }</a>
                { " in " }
                <a onclick={open_community}>{ &post.community_name }</a>
            </p>
            <div class="text-muted small">
                <span class="me-3">{ format!("likes: {}", p.like_count) }</span>
                <span>{ format!("comments: {}", p.comment_count) }</span>
            </div>
        </div>
    }
}
