use teatok_client::{
    api::{Comment, CommentId, PostId},
    execute, time_ago, HttpApi, Identity, Notice, Request, Response, Thread, ThreadState,
    EMPTY_THREAD_MESSAGE,
};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentsSectionProps {
    pub api: HttpApi,
    pub post: PostId,
    pub identity: Option<Identity>,
    pub on_notice: Callback<Notice>,
}

pub enum CommentsMsg {
    Toggle,
    DraftChanged(String),
    Submit,
    StartReply(CommentId),
    CancelReply,
    ReplyDraftChanged(String),
    SubmitReply(CommentId),
    Delete(CommentId),
    Done(Response),
}

/// Collapsible comment thread under a post
pub struct CommentsSection {
    thread: Thread,
}

impl CommentsSection {
    fn perform(&self, ctx: &Context<Self>, req: Option<Request>) {
        if let Some(req) = req {
            let api = ctx.props().api.clone();
            ctx.link()
                .send_future(async move { CommentsMsg::Done(execute(&api, req).await) });
        }
    }

    fn view_comment(&self, ctx: &Context<Self>, c: &Comment) -> Html {
        let now = chrono::Utc::now();
        let id = c.id.clone();
        let replying = self.thread.replying_to() == Some(&c.id);
        let delete_button = self.thread.can_delete(c).then(|| {
            let id = id.clone();
            html! {
                <button
                    class="btn btn-sm btn-link text-danger"
                    onclick={ ctx.link().callback(move |_| CommentsMsg::Delete(id.clone())) }
                >
                    { "Delete" }
                </button>
            }
        });
        let composer = replying.then(|| {
            let submit_id = id.clone();
            html! {
                <div class="reply-composer ms-4">
                    <textarea
                        class="form-control form-control-sm"
                        placeholder="Write a reply..."
                        value={ self.thread.reply_draft().to_string() }
                        oninput={ ctx.link().callback(|e: InputEvent| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CommentsMsg::ReplyDraftChanged(input.value())
                        }) }
                    />
                    <button
                        class="btn btn-sm btn-primary mt-1"
                        disabled={ !self.thread.can_submit_reply() }
                        onclick={ ctx.link().callback(move |_| CommentsMsg::SubmitReply(submit_id.clone())) }
                    >
                        { "Reply" }
                    </button>
                    <button
                        class="btn btn-sm btn-link mt-1"
                        onclick={ ctx.link().callback(|_| CommentsMsg::CancelReply) }
                    >
                        { "Cancel" }
                    </button>
                </div>
            }
        });
        html! {
            <li class="list-group-item" key={ c.id.0.clone() }>
                <div class="d-flex">
                    <strong class="me-2">{ c.author.display_name() }</strong>
                    <span class="text-muted flex-fill">{ time_ago(c.created_at, now) }</span>
                    <button
                        class="btn btn-sm btn-link"
                        onclick={ ctx.link().callback(move |_| CommentsMsg::StartReply(id.clone())) }
                    >
                        { "Reply" }
                    </button>
                    { for delete_button }
                </div>
                <p class="mb-1">{ &c.content }</p>
                <ul class="list-unstyled ms-4">
                    { for c.replies.iter().map(|r| html! {
                        <li key={ r.id.0.clone() }>
                            <strong class="me-2">{ r.author.display_name() }</strong>
                            <span class="text-muted">{ time_ago(r.created_at, now) }</span>
                            <p class="mb-1">{ &r.content }</p>
                        </li>
                    }) }
                </ul>
                { for composer }
            </li>
        }
    }
}

impl Component for CommentsSection {
    type Message = CommentsMsg;
    type Properties = CommentsSectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        CommentsSection {
            thread: Thread::new(ctx.props().post.clone(), ctx.props().identity.clone()),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let p = ctx.props();
        if p.post != old_props.post {
            self.thread = Thread::new(p.post.clone(), p.identity.clone());
        } else if p.identity != old_props.identity {
            self.thread.set_identity(p.identity.clone());
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommentsMsg::Toggle => {
                let req = self.thread.toggle();
                self.perform(ctx, req);
            }
            CommentsMsg::DraftChanged(t) => self.thread.set_draft(t),
            CommentsMsg::Submit => {
                let req = self.thread.submit_comment();
                self.perform(ctx, req);
            }
            CommentsMsg::StartReply(id) => self.thread.start_reply(id),
            CommentsMsg::CancelReply => self.thread.cancel_reply(),
            CommentsMsg::ReplyDraftChanged(t) => self.thread.set_reply_draft(t),
            CommentsMsg::SubmitReply(id) => {
                let req = self.thread.submit_reply(id);
                self.perform(ctx, req);
            }
            CommentsMsg::Delete(id) => {
                let req = self.thread.delete(id);
                self.perform(ctx, req);
            }
            CommentsMsg::Done(resp) => {
                if let Some(notice) = self.thread.apply(resp) {
                    ctx.props().on_notice.emit(notice);
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let toggle_label = match self.thread.state() {
            ThreadState::Closed { count: 0 } => String::from("Comments"),
            ThreadState::Closed { count } => format!("Comments ({count})"),
            _ => String::from("Hide comments"),
        };
        let body = match self.thread.state() {
            ThreadState::Closed { .. } => html! {},
            ThreadState::Loading => html! {
                <div class="spinner-border spinner-border-sm m-2" role="status"></div>
            },
            ThreadState::Empty => html! {
                <p class="text-muted">{ EMPTY_THREAD_MESSAGE }</p>
            },
            ThreadState::Comments(comments) => html! {
                <ul class="list-group">
                    { for comments.iter().map(|c| self.view_comment(ctx, c)) }
                </ul>
            },
        };
        let composer = (self.thread.is_open() && !self.thread.is_loading()).then(|| {
            html! {
                <div class="comment-composer my-2">
                    <textarea
                        class="form-control"
                        placeholder="Add a comment..."
                        value={ self.thread.draft().to_string() }
                        oninput={ ctx.link().callback(|e: InputEvent| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CommentsMsg::DraftChanged(input.value())
                        }) }
                    />
                    <button
                        class="btn btn-primary mt-1"
                        disabled={ !self.thread.can_submit_comment() }
                        onclick={ ctx.link().callback(|_| CommentsMsg::Submit) }
                    >
                        { if self.thread.is_submitting() { "Posting..." } else { "Post" } }
                    </button>
                </div>
            }
        });
        html! {
            <section class="comments-section">
                <button class="btn btn-sm btn-outline-secondary" onclick={ ctx.link().callback(|_| CommentsMsg::Toggle) }>
                    { toggle_label }
                </button>
                { for composer }
                { body }
            </section>
        }
    }
}
