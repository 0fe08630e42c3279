use teatok_client::{api::Post, time_ago, HttpApi, Identity, Notice};
use yew::prelude::*;

use crate::ui;

#[derive(Clone, PartialEq, Properties)]
pub struct PostCardProps {
    pub api: HttpApi,
    pub identity: Identity,
    pub post: Post,
    pub on_notice: Callback<Notice>,
}

#[function_component(PostCard)]
pub fn post_card(p: &PostCardProps) -> Html {
    let post = &p.post;
    html! {
        <article class="card my-3">
            <div class="card-body">
                <h5 class="card-title">{ &post.title }</h5>
                <h6 class="card-subtitle mb-2 text-muted">
                    { post.author.display_name() }
                    { " · " }
                    { time_ago(post.created_at, chrono::Utc::now()) }
                    { " · #" }
                    { &post.room_id.0 }
                </h6>
                <p class="card-text">{ &post.content }</p>
                <ui::CommentsSection
                    api={ p.api.clone() }
                    post={ post.id.clone() }
                    identity={ Some(p.identity.clone()) }
                    on_notice={ p.on_notice.clone() }
                />
            </div>
        </article>
    }
}
