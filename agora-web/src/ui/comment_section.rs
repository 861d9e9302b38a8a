use futures::channel::oneshot;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use agora_client::{
    api::{Comment, CommentId, NewComment, PostId},
    build_forest, forest_len, Collapsed,
};

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentSectionProps {
    pub login: LoginInfo,
    pub post: PostId,
}

pub enum CommentSectionMsg {
    /// A poll or an explicit refetch completed; the forest is rebuilt from
    /// scratch, whatever arrived last wins.
    Comments(Result<Vec<Comment>, String>),
    DraftChanged(String),
    Submit,
    Reply(CommentId, String),
    SubmitDone(Result<(), String>),
    ToggleCollapsed(CommentId),
}

pub struct CommentSection {
    comments: ui::Remote<Vec<Comment>>,
    collapsed: Collapsed,
    draft: String,
    submitting: bool,
    submit_error: Option<String>,
    poll_canceller: oneshot::Receiver<()>,
}

impl CommentSection {
    fn start_poll(ctx: &Context<Self>) -> oneshot::Receiver<()> {
        let (cancel, canceller) = oneshot::channel();
        spawn_local(api::start_comment_poll(
            ctx.props().login.clone(),
            ctx.props().post,
            ctx.link().clone(),
            cancel,
        ));
        canceller
    }

    fn refetch(&self, ctx: &Context<Self>) {
        let login = ctx.props().login.clone();
        let post = ctx.props().post;
        ctx.link().send_future(async move {
            CommentSectionMsg::Comments(
                api::fetch_comments(&login, post)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
    }

    fn submit(&mut self, ctx: &Context<Self>, parent: Option<CommentId>, content: String) {
        let comment = match NewComment::new(
            ctx.props().login.session.as_ref(),
            ctx.props().post,
            parent,
            content,
        ) {
            Ok(c) => c,
            // Precondition failure: nothing was sent to the store.
            Err(e) => {
                self.submit_error = Some(e.to_string());
                return;
            }
        };
        self.submitting = true;
        self.submit_error = None;
        let login = ctx.props().login.clone();
        ctx.link().send_future(async move {
            CommentSectionMsg::SubmitDone(
                api::insert_comment(&login, comment)
                    .await
                    .map_err(|e| format!("{:#}", e)),
            )
        });
    }
}

impl Component for CommentSection {
    type Message = CommentSectionMsg;
    type Properties = CommentSectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        CommentSection {
            comments: ui::Remote::Loading,
            collapsed: Collapsed::new(),
            draft: String::new(),
            submitting: false,
            submit_error: None,
            poll_canceller: Self::start_poll(ctx),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().post != old_props.post {
            // Dropping the old canceller stops the previous poll loop.
            self.poll_canceller = Self::start_poll(ctx);
            self.comments = ui::Remote::Loading;
            self.collapsed = Collapsed::new();
            self.draft = String::new();
            self.submitting = false;
            self.submit_error = None;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommentSectionMsg::Comments(Ok(flat)) => {
                self.comments = ui::Remote::Ready(flat);
            }
            CommentSectionMsg::Comments(Err(e)) => {
                self.comments = ui::Remote::Failed(e);
            }
            CommentSectionMsg::DraftChanged(text) => {
                self.draft = text;
            }
            CommentSectionMsg::Submit => {
                let draft = std::mem::take(&mut self.draft);
                self.submit(ctx, None, draft);
            }
            CommentSectionMsg::Reply(parent, text) => {
                self.submit(ctx, Some(parent), text);
            }
            CommentSectionMsg::SubmitDone(Ok(())) => {
                self.submitting = false;
                // Acknowledged: invalidate and refetch the whole list, the
                // new comment shows up through the rebuild.
                self.refetch(ctx);
            }
            CommentSectionMsg::SubmitDone(Err(e)) => {
                self.submitting = false;
                self.submit_error = Some(e);
            }
            CommentSectionMsg::ToggleCollapsed(id) => {
                self.collapsed.toggle(id);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let flat = match &self.comments {
            ui::Remote::Loading => return html! { <div>{ "Loading comments..." }</div> },
            ui::Remote::Failed(e) => {
                return html! { <div class="text-danger">{ format!("Error: {}", e) }</div> }
            }
            ui::Remote::Ready(flat) => flat.clone(),
        };
        let forest = build_forest(flat);
        let submit_error = self
            .submit_error
            .as_ref()
            .map(|e| html! { <p class="text-danger mt-2">{ e }</p> });
        let form = match &ctx.props().login.session {
            Some(_) => html! {
                <form class="mb-4" onsubmit={ctx.link().callback(|e: web_sys::SubmitEvent| {
                    e.prevent_default();
                    CommentSectionMsg::Submit
                })}>
                    <textarea
                        rows="3"
                        class="form-control"
                        placeholder="Write a comment..."
                        value={self.draft.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CommentSectionMsg::DraftChanged(input.value())
                        })}
                    >
                    </textarea>
                    <button
                        type="submit"
                        class="btn btn-primary mt-2"
                        disabled={self.draft.is_empty() || self.submitting}
                    >
                        { if self.submitting { "Sending..." } else { "Send" } }
                    </button>
                    { for submit_error.clone() }
                </form>
            },
            None => html! { <p>{ "You must be logged in to post a comment" }</p> },
        };
        let on_toggle = ctx.link().callback(CommentSectionMsg::ToggleCollapsed);
        let on_reply = ctx
            .link()
            .callback(|(parent, text)| CommentSectionMsg::Reply(parent, text));
        html! {
            <div class="mt-3">
                <h3>{ format!("Comments ({})", forest_len(&forest)) }</h3>
                { form }
                <div class="comment-thread">
                    { for forest.into_iter().map(|node| html! {
                        <ui::CommentItem
                            {node}
                            logged_in={ctx.props().login.session.is_some()}
                            collapsed={self.collapsed.clone()}
                            on_toggle={on_toggle.clone()}
                            on_reply={on_reply.clone()}
                        />
                    }) }
                </div>
            </div>
        }
    }
}
