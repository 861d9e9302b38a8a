use yew::prelude::*;

use agora_client::{api::CommentId, Collapsed, CommentNode};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentItemProps {
    pub node: CommentNode,
    pub logged_in: bool,
    /// The collapse side table, owned by the section so it survives rebuilds.
    pub collapsed: Collapsed,
    pub on_toggle: Callback<CommentId>,
    /// (parent id, reply text)
    pub on_reply: Callback<(CommentId, String)>,
}

#[function_component(CommentItem)]
pub fn comment_item(p: &CommentItemProps) -> Html {
    let show_reply = use_state(|| false);
    let reply_text = use_state(String::new);

    let comment = &p.node.comment;
    let is_collapsed = p.collapsed.is_collapsed(comment.id);

    let reply_form = (*show_reply && p.logged_in).then(|| {
        let on_submit = {
            let id = comment.id;
            let reply_text = reply_text.clone();
            let show_reply = show_reply.clone();
            p.on_reply.reform(move |e: web_sys::SubmitEvent| {
                e.prevent_default();
                let text = (*reply_text).clone();
                reply_text.set(String::new());
                show_reply.set(false);
                (id, text)
            })
        };
        let on_change = {
            let reply_text = reply_text.clone();
            Callback::from(move |e: web_sys::Event| {
                let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                reply_text.set(input.value());
            })
        };
        html! {
            <form class="mb-3" onsubmit={on_submit}>
                <textarea
                    rows="2"
                    class="form-control"
                    placeholder="Write a reply..."
                    value={(*reply_text).clone()}
                    onchange={on_change}
                >
                </textarea>
                <button type="submit" class="btn btn-sm btn-primary mt-1" disabled={reply_text.is_empty()}>
                    { "Send" }
                </button>
            </form>
        }
    });

    let children = (!p.node.children.is_empty()).then(|| {
        let toggle = {
            let id = comment.id;
            p.on_toggle.reform(move |_| id)
        };
        let subtree = (!is_collapsed).then(|| html! {
            <div class="comment-children">
                { for p.node.children.iter().map(|child| html! {
                    <CommentItem
                        node={child.clone()}
                        logged_in={p.logged_in}
                        collapsed={p.collapsed.clone()}
                        on_toggle={p.on_toggle.clone()}
                        on_reply={p.on_reply.clone()}
                    />
                }) }
            </div>
        });
        html! {
            <div>
                <button type="button" class="btn btn-sm btn-link" onclick={toggle}>
                    { if is_collapsed { "Show Replies" } else { "Hide Replies" } }
                </button>
                { for subtree }
            </div>
        }
    });

    html! {
        <div class="comment ps-4 border-start">
            <div class="mb-2">
                <span class="fw-bold">{ &comment.author_name }</span>
                { " " }
                <span class="text-muted small">
                    { comment.created_at.format("%Y-%m-%d %H:%M").to_string() }
                </span>
                <p class="mb-1">{ &comment.content }</p>
                { for p.logged_in.then(|| {
                    let show = *show_reply;
                    let show_reply = show_reply.clone();
                    html! {
                        <button
                            type="button"
                            class="btn btn-sm btn-link p-0"
                            onclick={Callback::from(move |_| show_reply.set(!show))}
                        >
                            { if show { "Cancel" } else { "Reply" } }
                        </button>
                    }
                }) }
            </div>
            { for reply_form }
            { for children }
        </div>
    }
}
