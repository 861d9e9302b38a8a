use yew::prelude::*;

use agora_client::api::{Post, PostId};

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct PostDetailProps {
    pub login: LoginInfo,
    pub post: PostId,
    pub on_nav: Callback<ui::Page>,
}

pub enum PostDetailMsg {
    Post(Result<Post, String>),
}

pub struct PostDetail {
    post: ui::Remote<Post>,
}

impl PostDetail {
    fn fetch(ctx: &Context<Self>) {
        let login = ctx.props().login.clone();
        let id = ctx.props().post;
        ctx.link().send_future(async move {
            PostDetailMsg::Post(
                api::fetch_post(&login, id)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
    }
}

impl Component for PostDetail {
    type Message = PostDetailMsg;
    type Properties = PostDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::fetch(ctx);
        PostDetail {
            post: ui::Remote::Loading,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().post != old_props.post {
            self.post = ui::Remote::Loading;
            Self::fetch(ctx);
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PostDetailMsg::Post(Ok(post)) => self.post = ui::Remote::Ready(post),
            PostDetailMsg::Post(Err(e)) => self.post = ui::Remote::Failed(e),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let post = match &self.post {
            ui::Remote::Loading => return html! { <div>{ "Loading..." }</div> },
            ui::Remote::Failed(e) => {
                return html! { <div class="text-danger">{ format!("Error: {}", e) }</div> }
            }
            ui::Remote::Ready(post) => post,
        };
        let open_author = {
            let email = post.author_email.clone();
            ctx.props()
                .on_nav
                .reform(move |_| ui::Page::Profile(email.clone()))
        };
        let open_community = {
            let id = post.community_id;
            let name = post.community_name.clone();
            ctx.props()
                .on_nav
                .reform(move |_| ui::Page::Community(id, name.clone()))
        };
        let image = post.image_url.as_ref().map(|url| {
            html! { <img src={url.clone()} alt={post.title.clone()} class="rounded my-3" /> }
        });
        html! {
            <div class="post-detail">
                <h2 class="text-center">{ &post.title }</h2>
                { for image }
                <p>{ &post.content }</p>
                <p class="text-muted small">
                    { format!("Posted on {} by ", post.created_at.format("%Y-%m-%d")) }
                    <a onclick={open_author}>{ &post.author_name }</a>
                    { " in " }
                    <a onclick={open_community}>{ &post.community_name }</a>
                </p>
                <ui::LikeButton login={ctx.props().login.clone()} post={post.id} />
                <ui::CommentSection login={ctx.props().login.clone()} post={post.id} />
            </div>
        }
    }
}
