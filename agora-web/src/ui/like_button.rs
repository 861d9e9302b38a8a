use yew::prelude::*;

use agora_client::api::{NewVote, PostId, Vote, VoteValue};

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct LikeButtonProps {
    pub login: LoginInfo,
    pub post: PostId,
}

pub enum LikeButtonMsg {
    Votes(Result<Vec<Vote>, String>),
    Cast(VoteValue),
    CastDone(Result<(), String>),
}

pub struct LikeButton {
    votes: ui::Remote<Vec<Vote>>,
    error: Option<String>,
}

impl LikeButton {
    fn fetch(ctx: &Context<Self>) {
        let login = ctx.props().login.clone();
        let post = ctx.props().post;
        ctx.link().send_future(async move {
            LikeButtonMsg::Votes(
                api::fetch_votes(&login, post)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
    }
}

impl Component for LikeButton {
    type Message = LikeButtonMsg;
    type Properties = LikeButtonProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::fetch(ctx);
        LikeButton {
            votes: ui::Remote::Loading,
            error: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().post != old_props.post {
            self.votes = ui::Remote::Loading;
            self.error = None;
            Self::fetch(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LikeButtonMsg::Votes(Ok(votes)) => self.votes = ui::Remote::Ready(votes),
            LikeButtonMsg::Votes(Err(e)) => self.votes = ui::Remote::Failed(e),
            LikeButtonMsg::Cast(value) => {
                let vote = match NewVote::new(
                    ctx.props().login.session.as_ref(),
                    ctx.props().post,
                    value,
                ) {
                    Ok(v) => v,
                    // rejected locally, no request goes out
                    Err(e) => {
                        self.error = Some(e.to_string());
                        return true;
                    }
                };
                let login = ctx.props().login.clone();
                ctx.link().send_future(async move {
                    LikeButtonMsg::CastDone(
                        api::cast_vote(&login, vote)
                            .await
                            .map_err(|e| format!("{:#}", e)),
                    )
                });
            }
            LikeButtonMsg::CastDone(Ok(())) => {
                self.error = None;
                Self::fetch(ctx);
            }
            LikeButtonMsg::CastDone(Err(e)) => self.error = Some(e),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let votes = match &self.votes {
            ui::Remote::Loading => return html! { <div>{ "..." }</div> },
            ui::Remote::Failed(e) => {
                return html! { <div class="text-danger">{ format!("Error: {}", e) }</div> }
            }
            ui::Remote::Ready(votes) => votes,
        };
        let likes = votes.iter().filter(|v| v.value == VoteValue::Like).count();
        let dislikes = votes
            .iter()
            .filter(|v| v.value == VoteValue::Dislike)
            .count();
        let mine = ctx.props().login.session.as_ref().and_then(|s| {
            votes
                .iter()
                .find(|v| v.user_id == s.user_id)
                .map(|v| v.value)
        });
        let logged_out = ctx.props().login.session.is_none();
        let button = |value: VoteValue, label: String| {
            let active = (mine == Some(value)).then(|| "active");
            html! {
                <button
                    type="button"
                    class={classes!("btn", "btn-outline-secondary", "btn-sm", "me-2", active)}
                    disabled={logged_out}
                    onclick={ctx.link().callback(move |_| LikeButtonMsg::Cast(value))}
                >
                    { label }
                </button>
            }
        };
        let error = self
            .error
            .as_ref()
            .map(|e| html! { <span class="text-danger small ms-2">{ e }</span> });
        html! {
            <div class="like-button">
                { button(VoteValue::Like, format!("👍 {}", likes)) }
                { button(VoteValue::Dislike, format!("👎 {}", dislikes)) }
                { for error }
            </div>
        }
    }
}
