use std::time::Duration;

use teatok_client::{
    api::{NewPost, Post},
    Error, Notice,
};
use yew::prelude::*;

use crate::{ui, LoginInfo};

const NOTICE_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Clone, PartialEq, Properties)]
pub struct AppProps {
    pub login: LoginInfo,
    pub on_logout: Callback<()>,
}

pub enum AppMsg {
    Logout,
    Refresh,
    ReceivedPosts(Result<Vec<Post>, Error>),
    CreatePost(NewPost),
    PostCreated(Result<Post, Error>),
    NewNotice(Notice),
    DismissNotice(usize),
}

pub struct App {
    posts: Vec<Post>,
    loading: bool,
    posting: bool,
    notices: Vec<(usize, Notice)>,
    next_notice: usize,
}

impl App {
    fn fetch_posts(&mut self, ctx: &Context<Self>) {
        self.loading = true;
        let api = ctx.props().login.api();
        ctx.link()
            .send_future(async move { AppMsg::ReceivedPosts(api.fetch_posts(None).await) });
    }

    fn show(&mut self, ctx: &Context<Self>, notice: Notice) {
        let id = self.next_notice;
        self.next_notice += 1;
        self.notices.push((id, notice));
        ctx.link().send_future(async move {
            if let Err(err) = wasm_timer::Delay::new(NOTICE_LIFETIME).await {
                tracing::warn!(?err, "failed waiting before dismissing notice");
            }
            AppMsg::DismissNotice(id)
        });
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut this = App {
            posts: Vec::new(),
            loading: false,
            posting: false,
            notices: Vec::new(),
            next_notice: 0,
        };
        this.fetch_posts(ctx);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Logout => {
                ctx.props().on_logout.emit(());
                return false;
            }
            AppMsg::Refresh => self.fetch_posts(ctx),
            AppMsg::ReceivedPosts(Ok(posts)) => {
                self.loading = false;
                self.posts = posts;
            }
            AppMsg::ReceivedPosts(Err(err)) => {
                self.loading = false;
                tracing::error!(?err, "failed to fetch posts");
                self.show(ctx, Notice::error("Failed to load posts"));
            }
            AppMsg::CreatePost(post) => {
                if self.posting {
                    return false;
                }
                self.posting = true;
                let api = ctx.props().login.api();
                ctx.link()
                    .send_future(async move { AppMsg::PostCreated(api.create_post(&post).await) });
            }
            AppMsg::PostCreated(Ok(post)) => {
                self.posting = false;
                self.posts.insert(0, post);
                self.show(ctx, Notice::success("Post created!"));
            }
            AppMsg::PostCreated(Err(err)) => {
                self.posting = false;
                tracing::error!(?err, "failed to create post");
                let msg = err
                    .server_message()
                    .unwrap_or_else(|| String::from("Failed to create post"));
                self.show(ctx, Notice::error(msg));
            }
            AppMsg::NewNotice(n) => self.show(ctx, n),
            AppMsg::DismissNotice(id) => self.notices.retain(|(i, _)| *i != id),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let login = &ctx.props().login;
        let on_notice = ctx.link().callback(AppMsg::NewNotice);
        html! {
            <div class="container">
                <nav class="d-flex align-items-center my-3">
                    <h1 class="flex-fill">{ "TeaTok" }</h1>
                    <span class="me-3">{ login.identity.display_name() }</span>
                    <button
                        class="btn btn-light me-2"
                        disabled={ self.loading }
                        onclick={ ctx.link().callback(|_| AppMsg::Refresh) }
                    >
                        { "Refresh" }
                    </button>
                    <button class="btn btn-secondary" onclick={ ctx.link().callback(|_| AppMsg::Logout) }>
                        { "Logout" }
                    </button>
                </nav>
                <ui::NewPostForm
                    author={ login.identity.id.clone() }
                    disabled={ self.posting }
                    on_submit={ ctx.link().callback(AppMsg::CreatePost) }
                />
                { for self.loading.then(|| html! { <h2>{ "Loading..." }</h2> }) }
                { for self.posts.iter().map(|p| html! {
                    <ui::PostCard
                        key={ p.id.0.clone() }
                        api={ login.api() }
                        identity={ login.identity.clone() }
                        post={ p.clone() }
                        on_notice={ on_notice.clone() }
                    />
                }) }
                <ui::Toasts
                    notices={ self.notices.clone() }
                    on_dismiss={ ctx.link().callback(AppMsg::DismissNotice) }
                />
            </div>
        }
    }
}
